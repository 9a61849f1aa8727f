//! Layered Compositor
//!
//! Manages z-ordered layers for rendering. Each layer has its own buffer
//! and can be positioned, resized, and shown or hidden independently.
//!
//! A cell is transparent when it holds a blank symbol and no background
//! color. Panels that must hide what is behind them paint a background.

mod layer;

use std::collections::HashMap;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;

pub use layer::Layer;

/// Unique identifier for a layer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LayerId(u32);

/// The compositor manages all layers and composites them together
pub struct Compositor {
    /// All layers by ID
    layers: HashMap<LayerId, Layer>,
    /// Layers sorted by z-index for rendering
    render_order: Vec<LayerId>,
    /// Next layer ID to assign
    next_id: u32,
    /// Output buffer (composited result)
    output: Buffer,
    /// Total area
    area: Rect,
}

impl Compositor {
    /// Create a new compositor for the given area
    pub fn new(area: Rect) -> Self {
        Self {
            layers: HashMap::new(),
            render_order: Vec::new(),
            next_id: 0,
            output: Buffer::empty(area),
            area,
        }
    }

    /// Create a new layer and return its ID
    pub fn create_layer(&mut self, bounds: Rect, z_index: i32) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;

        self.layers.insert(id, Layer::new(id, bounds, z_index));
        self.update_render_order();

        id
    }

    /// Get mutable access to a layer's buffer for rendering
    pub fn layer_buffer_mut(&mut self, id: LayerId) -> Option<&mut Buffer> {
        self.layers.get_mut(&id).map(|l| &mut l.buffer)
    }

    /// Move and resize a layer in one step
    ///
    /// The buffer is only reallocated when the size actually changes.
    pub fn place_layer(&mut self, id: LayerId, bounds: Rect) {
        if let Some(layer) = self.layers.get_mut(&id) {
            if layer.bounds.width != bounds.width || layer.bounds.height != bounds.height {
                layer.buffer = Buffer::empty(Rect::new(0, 0, bounds.width, bounds.height));
            }
            layer.bounds = bounds;
        }
    }

    /// Screen bounds of a layer
    pub fn layer_bounds(&self, id: LayerId) -> Option<Rect> {
        self.layers.get(&id).map(|l| l.bounds)
    }

    /// Set layer visibility
    pub fn set_visible(&mut self, id: LayerId, visible: bool) {
        if let Some(layer) = self.layers.get_mut(&id) {
            layer.visible = visible;
        }
    }

    /// Whether a layer is currently shown
    pub fn is_visible(&self, id: LayerId) -> bool {
        self.layers.get(&id).is_some_and(|l| l.visible)
    }

    /// Resize the entire compositor
    pub fn resize(&mut self, area: Rect) {
        self.area = area;
        self.output = Buffer::empty(area);
    }

    /// Composite all visible layers into the output buffer
    pub fn composite(&mut self) -> &Buffer {
        self.output.reset();

        // Back to front
        for id in &self.render_order {
            if let Some(layer) = self.layers.get(id) {
                if layer.visible {
                    Self::blit_layer(&mut self.output, &self.area, layer);
                }
            }
        }

        &self.output
    }

    /// Blit a layer onto the output buffer
    fn blit_layer(output: &mut Buffer, area: &Rect, layer: &Layer) {
        let lb = &layer.bounds;

        for ly in 0..lb.height {
            for lx in 0..lb.width {
                let dst_x = lb.x + lx;
                let dst_y = lb.y + ly;

                if dst_x >= area.width || dst_y >= area.height {
                    continue;
                }

                let src_idx = layer.buffer.index_of(lx, ly);
                let Some(src_cell) = layer.buffer.content.get(src_idx) else {
                    continue;
                };

                // Blank unpainted cells are holes
                if src_cell.symbol() == " " && src_cell.bg == Color::Reset {
                    continue;
                }

                let dst_idx = output.index_of(dst_x, dst_y);
                if let Some(dst) = output.content.get_mut(dst_idx) {
                    *dst = src_cell.clone();
                }
            }
        }
    }

    /// Find the topmost layer at a given position (for mouse events)
    pub fn layer_at(&self, x: u16, y: u16) -> Option<LayerId> {
        // Front to back
        for &id in self.render_order.iter().rev() {
            if let Some(layer) = self.layers.get(&id) {
                if layer.visible && layer.contains(x, y) {
                    return Some(id);
                }
            }
        }
        None
    }

    /// Translate a screen point into a layer's local coordinates
    pub fn local_point(&self, id: LayerId, x: u16, y: u16) -> Option<(u16, u16)> {
        self.layers.get(&id).and_then(|l| l.to_local(x, y))
    }

    /// Update render order based on z-indices
    fn update_render_order(&mut self) {
        self.render_order = self.layers.keys().copied().collect();
        self.render_order
            .sort_by_key(|id| self.layers.get(id).map_or(0, |l| l.z_index));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Style;

    fn symbol_at(buf: &Buffer, x: u16, y: u16) -> &str {
        buf[(x, y)].symbol()
    }

    #[test]
    fn test_front_layer_wins() {
        let mut compositor = Compositor::new(Rect::new(0, 0, 4, 1));
        let back = compositor.create_layer(Rect::new(0, 0, 4, 1), 0);
        let front = compositor.create_layer(Rect::new(1, 0, 2, 1), 10);

        if let Some(buf) = compositor.layer_buffer_mut(back) {
            buf.set_string(0, 0, "aaaa", Style::default());
        }
        if let Some(buf) = compositor.layer_buffer_mut(front) {
            buf.set_string(0, 0, "bb", Style::default());
        }

        let out = compositor.composite();
        assert_eq!(symbol_at(out, 0, 0), "a");
        assert_eq!(symbol_at(out, 1, 0), "b");
        assert_eq!(symbol_at(out, 3, 0), "a");
    }

    #[test]
    fn test_blank_cells_are_transparent_unless_painted() {
        let mut compositor = Compositor::new(Rect::new(0, 0, 2, 1));
        let back = compositor.create_layer(Rect::new(0, 0, 2, 1), 0);
        let front = compositor.create_layer(Rect::new(0, 0, 2, 1), 10);

        if let Some(buf) = compositor.layer_buffer_mut(back) {
            buf.set_string(0, 0, "xx", Style::default());
        }
        if let Some(buf) = compositor.layer_buffer_mut(front) {
            buf.set_string(1, 0, " ", Style::default().bg(Color::Blue));
        }

        let out = compositor.composite();
        assert_eq!(symbol_at(out, 0, 0), "x");
        assert_eq!(symbol_at(out, 1, 0), " ");
    }

    #[test]
    fn test_layer_at_skips_hidden_layers() {
        let mut compositor = Compositor::new(Rect::new(0, 0, 10, 10));
        let back = compositor.create_layer(Rect::new(0, 0, 10, 10), 0);
        let front = compositor.create_layer(Rect::new(5, 5, 2, 2), 50);

        assert_eq!(compositor.layer_at(5, 5), Some(front));
        assert_eq!(compositor.local_point(front, 6, 6), Some((1, 1)));

        compositor.set_visible(front, false);
        assert_eq!(compositor.layer_at(5, 5), Some(back));
    }

    #[test]
    fn test_place_layer_moves_and_resizes() {
        let mut compositor = Compositor::new(Rect::new(0, 0, 20, 20));
        let id = compositor.create_layer(Rect::new(0, 0, 4, 4), 0);

        compositor.place_layer(id, Rect::new(3, 2, 6, 5));

        assert_eq!(compositor.layer_bounds(id), Some(Rect::new(3, 2, 6, 5)));
        let buf = compositor.layer_buffer_mut(id).map(|b| b.area);
        assert_eq!(buf, Some(Rect::new(0, 0, 6, 5)));
    }
}
