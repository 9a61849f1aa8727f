//! Avatar - the workshop's golden retriever on screen
//!
//! Renders whatever [`MascotView`] the core hands over:
//!
//! - the body pose for the current [`Expression`] (tail wag, bob, trick jump)
//! - a decoration overlay (z's, hearts, sparkles) when the mood has one
//! - a brighter coat while the mouse hovers over the dog
//!
//! The avatar owns no behaviour. Moods, captions and timers live in
//! `workshop-core`; this module only turns them into cells.

mod animation;
pub mod poses;
pub mod sprites;

use std::time::Duration;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};

use workshop_core::mascot::Decoration;
use workshop_core::{Expression, MascotView};

pub use animation::{AnimationEngine, Playback};
use poses::{build_decoration, DecorationOverlay, POSE_HEIGHT, POSE_WIDTH};
use sprites::{ColoredCell, Frame};

use crate::theme::{COAT, COAT_HOVER};

/// Decoration currently floating near the dog
struct ActiveDecoration {
    kind: Decoration,
    overlay: DecorationOverlay,
    playback: Playback,
}

/// The mascot renderer
pub struct Avatar {
    engine: AnimationEngine,
    decoration: Option<ActiveDecoration>,
    hovered: bool,
}

impl Avatar {
    /// Create an avatar showing `view`
    pub fn new(view: &MascotView) -> Self {
        let mut avatar = Self {
            engine: AnimationEngine::new(view.expression),
            decoration: None,
            hovered: false,
        };
        avatar.sync(view);
        avatar
    }

    /// Follow the core's latest view
    pub fn sync(&mut self, view: &MascotView) {
        self.engine.play(view.expression);

        let wanted = view.expression.decoration;
        if self.decoration.as_ref().map(|d| d.kind) != wanted {
            self.decoration = wanted.map(|kind| ActiveDecoration {
                kind,
                overlay: build_decoration(kind),
                playback: Playback::default(),
            });
        }
    }

    /// Advance the body and decoration animations
    pub fn update(&mut self, delta: Duration) {
        self.engine.update(delta);
        if let Some(active) = &mut self.decoration {
            active.playback.advance(&active.overlay.animation, delta);
        }
    }

    /// Set whether the mouse is over the dog
    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    /// Whether the mouse is over the dog
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Expression being drawn
    pub fn expression(&self) -> Expression {
        self.engine.current()
    }

    /// Size of the area the dog needs
    pub fn bounds() -> (u16, u16) {
        (POSE_WIDTH, POSE_HEIGHT)
    }

    /// Render into `area`, bottom-aligned and centered
    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let Some(frame) = self.engine.current_frame() else {
            return;
        };

        let area = area.intersection(buf.area);
        let x_offset = area.width.saturating_sub(frame.width) / 2;
        let y_offset = area.height.saturating_sub(frame.height);

        self.blit(area, buf, frame, x_offset, y_offset);

        if let Some(active) = &self.decoration {
            if let Some(overlay_frame) = active.overlay.animation.frames.get(active.playback.frame) {
                let (dx, dy) = active.overlay.offset;
                self.blit(area, buf, overlay_frame, x_offset + dx, y_offset + dy);
            }
        }
    }

    /// Copy a frame's non-empty cells into the buffer
    fn blit(&self, area: Rect, buf: &mut Buffer, frame: &Frame, x_offset: u16, y_offset: u16) {
        for (row_idx, row) in frame.cells.iter().enumerate() {
            let y = area.y + y_offset + row_idx as u16;
            if y >= area.y + area.height {
                break;
            }

            for (col_idx, cell) in row.iter().enumerate() {
                let x = area.x + x_offset + col_idx as u16;
                if x >= area.x + area.width {
                    break;
                }
                if cell.is_empty() {
                    continue;
                }

                buf[(x, y)]
                    .set_char(cell.ch)
                    .set_style(self.cell_style(cell));
            }
        }
    }

    fn cell_style(&self, cell: &ColoredCell) -> Style {
        if !self.hovered {
            return Style::default().fg(cell.fg).bg(cell.bg);
        }
        // Hover brightens the coat and bolds everything
        let lift = |c: Color| if c == COAT { COAT_HOVER } else { c };
        Style::default()
            .fg(lift(cell.fg))
            .bg(lift(cell.bg))
            .add_modifier(Modifier::BOLD)
    }
}
