//! OpenCode Workshop TUI - the workshop page in a terminal
//!
//! This crate provides a full-screen terminal page with the workshop guide,
//! the quick reference cards, and a golden retriever mascot whose behaviour
//! lives in `workshop-core`.
//!
//! # Architecture
//!
//! - **Compositor**: Layered rendering with z-ordering for overlays
//! - **Avatar**: Sprite poses and animation playback for the mascot
//! - **Guide**: Markdown rendering and scrolling
//! - **Reference**: Tip card grid and detail panel
//! - **Confetti**: Particle field behind the celebration bursts

pub mod app;
pub mod avatar;
pub mod compositor;
pub mod confetti;
pub mod guide;
pub mod reference;
pub mod theme;

pub use app::App;
