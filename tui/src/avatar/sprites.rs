//! Sprite Definitions
//!
//! Blocky pixel art using Unicode block elements and colors.
//! Each cell has its own foreground (and optional background) color so
//! small details like eyes can sit on top of the coat.

use std::collections::HashMap;

use ratatui::style::Color;

/// How a palette key is drawn
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ink {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Ink {
    /// Glyph on a transparent background
    pub const fn new(ch: char, fg: Color) -> Self {
        Self {
            ch,
            fg,
            bg: Color::Reset,
        }
    }

    /// Glyph on a solid background
    pub const fn on(ch: char, fg: Color, bg: Color) -> Self {
        Self { ch, fg, bg }
    }
}

/// A single colored cell in a sprite
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColoredCell {
    /// The character to display
    pub ch: char,
    /// Foreground color
    pub fg: Color,
    /// Background color (`Reset` lets the layer below show)
    pub bg: Color,
}

impl ColoredCell {
    /// Empty/transparent cell
    pub const fn empty() -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
            bg: Color::Reset,
        }
    }

    /// Check if cell is empty/transparent
    pub fn is_empty(&self) -> bool {
        self.ch == ' ' && self.bg == Color::Reset
    }
}

impl From<Ink> for ColoredCell {
    fn from(ink: Ink) -> Self {
        Self {
            ch: ink.ch,
            fg: ink.fg,
            bg: ink.bg,
        }
    }
}

/// A single animation frame with per-cell coloring
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// 2D grid of colored cells (row-major)
    pub cells: Vec<Vec<ColoredCell>>,
    /// Width in terminal cells
    pub width: u16,
    /// Height in terminal cells
    pub height: u16,
    /// How long the frame stays on screen
    pub duration_ms: u64,
}

impl Frame {
    /// Create a frame from a grid of colored cells
    pub fn new(cells: Vec<Vec<ColoredCell>>, duration_ms: u64) -> Self {
        let height = cells.len() as u16;
        let width = cells.iter().map(|row| row.len() as u16).max().unwrap_or(0);

        Self {
            cells,
            width,
            height,
            duration_ms,
        }
    }

    /// Get cell at position (returns empty if out of bounds)
    pub fn get(&self, x: u16, y: u16) -> &ColoredCell {
        static EMPTY: ColoredCell = ColoredCell::empty();
        self.cells
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .unwrap_or(&EMPTY)
    }
}

/// An animation sequence
#[derive(Clone, Debug)]
pub struct Animation {
    /// Frames in sequence
    pub frames: Vec<Frame>,
    /// Whether to loop
    pub looping: bool,
}

impl Animation {
    /// Total duration of all frames
    pub fn total_duration(&self) -> u64 {
        self.frames.iter().map(|f| f.duration_ms).sum()
    }
}

// ============================================================================
// Sprite Builder Helpers
// ============================================================================

/// Parse a sprite definition using a color map
///
/// Each character in the pattern is looked up in the palette. A space is
/// always transparent, and so is any key the palette does not know.
///
/// ```ignore
/// let palette = [('H', Ink::new('█', COAT)), ('e', Ink::on('•', EYES, COAT))];
/// let frame = build_frame(&[" HeH ", "HHHHH"], &palette, 100);
/// ```
pub fn build_frame<S: AsRef<str>>(pattern: &[S], palette: &[(char, Ink)], duration_ms: u64) -> Frame {
    let color_map: HashMap<char, Ink> = palette.iter().copied().collect();

    let cells = pattern
        .iter()
        .map(|line| {
            line.as_ref()
                .chars()
                .map(|c| match color_map.get(&c) {
                    Some(ink) if c != ' ' => ColoredCell::from(*ink),
                    _ => ColoredCell::empty(),
                })
                .collect()
        })
        .collect();

    Frame::new(cells, duration_ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_frame_maps_palette() {
        let palette = [('A', Ink::new('█', Color::Red)), ('b', Ink::on('o', Color::Black, Color::Red))];
        let frame = build_frame(&["AbA", " A "], &palette, 120);

        assert_eq!(frame.width, 3);
        assert_eq!(frame.height, 2);
        assert_eq!(frame.duration_ms, 120);
        assert_eq!(frame.get(1, 0).ch, 'o');
        assert_eq!(frame.get(1, 0).bg, Color::Red);
        assert!(frame.get(0, 1).is_empty());
    }

    #[test]
    fn test_unknown_keys_are_transparent() {
        let frame = build_frame(&["?"], &[], 100);
        assert!(frame.get(0, 0).is_empty());
        assert!(frame.get(9, 9).is_empty());
    }
}
