//! Theme and Colors
//!
//! The workshop's palette: a golden retriever for pixel art, and a quiet
//! zinc scheme for the page itself so the mascot and confetti stand out.

use ratatui::style::{Color, Modifier, Style};

use workshop_core::Rgb;

// ============================================================================
// Golden Retriever Palette
// ============================================================================

/// Coat - warm gold (main color)
pub const COAT: Color = Color::Rgb(212, 164, 76);

/// Coat shadow - legs and underside
pub const COAT_SHADOW: Color = Color::Rgb(184, 132, 60);

/// Fluffy chest and muzzle
pub const COAT_FLUFF: Color = Color::Rgb(232, 195, 106);

/// Ears - a shade darker than the coat
pub const EARS: Color = Color::Rgb(176, 124, 52);

/// Eyes - dark brown
pub const EYES: Color = Color::Rgb(74, 55, 40);

/// Nose
pub const NOSE: Color = Color::Rgb(51, 51, 51);

/// Tongue - for the happy pant
pub const TONGUE: Color = Color::Rgb(255, 107, 157);

/// Cheek blush
pub const BLUSH: Color = Color::Rgb(255, 153, 153);

/// Coat under the mouse cursor
pub const COAT_HOVER: Color = Color::Rgb(236, 190, 96);

// ============================================================================
// Decoration Colors
// ============================================================================

/// Sleepy "z"s
pub const DROWSY: Color = Color::Rgb(167, 139, 250);

/// Floating hearts
pub const HEART: Color = Color::Rgb(255, 107, 157);

/// Excited sparkles
pub const SPARKLE: Color = Color::Rgb(255, 215, 0);

// ============================================================================
// Page Colors
// ============================================================================

/// Body text
pub const TEXT: Color = Color::Rgb(228, 228, 231);

/// Secondary text (subtitle, previews, hints)
pub const DIM: Color = Color::Rgb(161, 161, 170);

/// Faint text and rules
pub const FAINT: Color = Color::Rgb(82, 82, 91);

/// Borders of inactive cards
pub const BORDER: Color = Color::Rgb(63, 63, 70);

/// Panel and speech bubble fill
pub const PANEL_BG: Color = Color::Rgb(24, 24, 27);

/// Inline code and code blocks
pub const CODE_BG: Color = Color::Rgb(39, 39, 42);

/// Code text
pub const CODE_FG: Color = Color::Rgb(228, 228, 231);

/// Links and focus
pub const ACCENT: Color = Color::Rgb(96, 165, 250);

/// Quote bar
pub const QUOTE_BAR: Color = Color::Rgb(59, 130, 246);

/// Celebration banner
pub const BANNER: Color = Color::Rgb(255, 215, 0);

// ============================================================================
// Styles
// ============================================================================

/// Page title
pub fn title_style() -> Style {
    Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
}

/// Active tab
pub fn active_tab_style() -> Style {
    Style::default()
        .fg(TEXT)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

/// Inactive tab
pub fn inactive_tab_style() -> Style {
    Style::default().fg(DIM)
}

/// Inline `code`
pub fn code_style() -> Style {
    Style::default().fg(CODE_FG).bg(CODE_BG)
}

/// Hyperlinks
pub fn link_style() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::UNDERLINED)
}

/// Convert a core color to a terminal color
pub fn rgb(color: Rgb) -> Color {
    let Rgb(r, g, b) = color;
    Color::Rgb(r, g, b)
}
