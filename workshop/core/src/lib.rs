//! Workshop Core - Headless Mascot Logic for the OpenCode Workshop
//!
//! This crate holds the behaviour behind the workshop's golden retriever
//! mascot, independent of any UI framework. A terminal surface, a web
//! surface, or a test can all drive it the same way.
//!
//! # Architecture
//!
//! ```text
//!   Surface (TUI)                         workshop-core
//!  ┌──────────────┐   click / key    ┌─────────────────────────┐
//!  │ event loop   │ ───────────────▶ │ Mascot                  │
//!  │              │   update(delta)  │  ├─ MoodController      │
//!  │              │ ───────────────▶ │  └─ GestureDetector     │
//!  │ renderer     │ ◀─────────────── │ MascotView / Expression │
//!  │ confetti     │ ◀── fire(Burst)  │ CelebrationEffects      │
//!  └──────────────┘                  └─────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`Mascot`]: facade over both state machines and the virtual clock
//! - [`MoodState`]: the six expressive states
//! - [`Burst`] / [`CelebrationEffects`]: confetti requests and their sink
//! - [`WorkshopConfig`]: resolved configuration

pub mod celebration;
pub mod config;
pub mod mascot;

pub use celebration::{Burst, BurstPreset, CelebrationEffects, Origin, Rgb};
pub use config::{ConfigError, ConfigOverrides, ConfigSource, WorkshopConfig};
pub use mascot::{
    ClickOutcome, Expression, GestureKey, GestureOutcome, Mascot, MascotTimings, MascotView,
    MoodState,
};
