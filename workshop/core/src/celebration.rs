//! Celebration Bursts
//!
//! Surface-agnostic description of a confetti burst. The core decides
//! *when* to celebrate and with which preset; the surface owns the
//! particles.

use std::time::Duration;

/// 24-bit colour, independent of any terminal or canvas type
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Gold and pink, used for the mascot's own celebrations
pub const GOLDEN_PALETTE: &[Rgb] = &[
    Rgb(255, 215, 0),
    Rgb(255, 165, 0),
    Rgb(255, 107, 157),
    Rgb(212, 164, 76),
    Rgb(232, 195, 106),
];

/// Full spectrum, used for the secret code
pub const RAINBOW_PALETTE: &[Rgb] = &[
    Rgb(255, 0, 0),
    Rgb(255, 165, 0),
    Rgb(255, 255, 0),
    Rgb(0, 255, 0),
    Rgb(0, 0, 255),
    Rgb(75, 0, 130),
    Rgb(238, 130, 238),
];

/// Cool neutrals, used when a reference card is opened
pub const CARD_PALETTE: &[Rgb] = &[
    Rgb(96, 165, 250),
    Rgb(167, 139, 250),
    Rgb(52, 211, 153),
    Rgb(244, 244, 245),
];

/// Where a burst starts, in normalized viewport coordinates (0.0..=1.0)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Origin {
    pub x: f32,
    pub y: f32,
}

impl Origin {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: x.clamp(0.0, 1.0),
            y: y.clamp(0.0, 1.0),
        }
    }
}

/// Intensity presets
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BurstPreset {
    /// One 30-particle pop at a card
    CardSelect,
    /// Dual-origin repeating burst after five mascot clicks
    Trick,
    /// Dual-origin repeating burst for the secret code
    SecretCode,
}

impl BurstPreset {
    /// Particles per emission
    pub fn particle_count(self) -> usize {
        match self {
            Self::CardSelect => 30,
            Self::Trick => 40,
            Self::SecretCode => 50,
        }
    }

    /// How long the emitter keeps firing (zero for a single pop)
    pub fn duration(self) -> Duration {
        match self {
            Self::CardSelect => Duration::ZERO,
            Self::Trick => Duration::from_secs(3),
            Self::SecretCode => Duration::from_secs(5),
        }
    }

    /// Gap between emissions while the emitter runs
    pub fn interval(self) -> Duration {
        Duration::from_millis(250)
    }

    /// Spread of launch angles, in degrees
    pub fn spread_degrees(self) -> f32 {
        match self {
            Self::CardSelect => 60.0,
            Self::Trick | Self::SecretCode => 360.0,
        }
    }
}

/// A request to the celebration collaborator
#[derive(Clone, Debug, PartialEq)]
pub struct Burst {
    pub preset: BurstPreset,
    pub origins: Vec<Origin>,
    pub palette: &'static [Rgb],
}

impl Burst {
    /// Single pop where a card was selected
    pub fn card_select(at: Origin) -> Self {
        Self {
            preset: BurstPreset::CardSelect,
            origins: vec![at],
            palette: CARD_PALETTE,
        }
    }

    /// Mascot trick: both lower corners, golden palette
    pub fn trick() -> Self {
        Self {
            preset: BurstPreset::Trick,
            origins: vec![Origin::new(0.2, 0.7), Origin::new(0.8, 0.7)],
            palette: GOLDEN_PALETTE,
        }
    }

    /// Secret code: both upper thirds, rainbow palette
    pub fn secret_code() -> Self {
        Self {
            preset: BurstPreset::SecretCode,
            origins: vec![Origin::new(0.2, 0.3), Origin::new(0.8, 0.3)],
            palette: RAINBOW_PALETTE,
        }
    }
}

/// The external particle-effect trigger
pub trait CelebrationEffects {
    /// Start a burst
    fn fire(&mut self, burst: Burst);
}

/// Recording sink, handy for headless runs
impl CelebrationEffects for Vec<Burst> {
    fn fire(&mut self, burst: Burst) {
        self.push(burst);
    }
}
