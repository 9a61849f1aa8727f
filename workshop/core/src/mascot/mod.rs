//! Mascot - the workshop's golden retriever
//!
//! The [`Mascot`] facade owns the two cooperating state machines and the
//! shared virtual clock:
//!
//! - [`MoodController`]: mood, captions, auto-decay, click tricks
//! - [`GestureDetector`]: the secret key sequence and its celebration window
//!
//! When the secret code completes, the detector's result is routed into the
//! mood controller's override path (pinning `excited`) and the celebration
//! collaborator is asked to fire. When the window closes, the override goes
//! back to whatever the host supplied.
//!
//! Surfaces feed input through [`Mascot::click`] and [`Mascot::key`], call
//! [`Mascot::update`] once per frame, and read a [`MascotView`] to draw.

mod captions;
mod expression;
mod gesture;
mod mood;
mod timer;

use std::time::Duration;

pub use captions::CaptionPool;
pub use expression::{AnimationProfile, BodyMotion, Decoration, Expression, Eyes};
pub use gesture::{GestureDetector, GestureKey, GestureOutcome, SECRET_SEQUENCE};
pub use mood::{ClickOutcome, EffectiveMood, MoodController, MoodState, ParseMoodError};
pub use timer::{IntervalTimer, ScopedTimer};

use crate::celebration::{Burst, CelebrationEffects};

/// Caption rotation cadence
pub const CAPTION_INTERVAL: Duration = Duration::from_millis(4000);
/// Residency before a lively mood settles back to idle
pub const DECAY_AFTER: Duration = Duration::from_millis(5000);
/// Performing pulse after an ordinary click
pub const PET_PULSE: Duration = Duration::from_millis(600);
/// Performing pulse after a trick
pub const TRICK_PULSE: Duration = Duration::from_millis(1000);
/// Secret code celebration window
pub const CELEBRATION_WINDOW: Duration = Duration::from_millis(10_000);
/// Clicks needed for a trick
pub const CLICK_THRESHOLD: u32 = 5;

/// Timing knobs for the mascot
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MascotTimings {
    pub caption_interval: Duration,
    pub decay: Duration,
    pub pet_pulse: Duration,
    pub trick_pulse: Duration,
    pub celebration: Duration,
    pub click_threshold: u32,
}

impl Default for MascotTimings {
    fn default() -> Self {
        Self {
            caption_interval: CAPTION_INTERVAL,
            decay: DECAY_AFTER,
            pet_pulse: PET_PULSE,
            trick_pulse: TRICK_PULSE,
            celebration: CELEBRATION_WINDOW,
            click_threshold: CLICK_THRESHOLD,
        }
    }
}

/// Snapshot of everything needed to draw the mascot
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MascotView {
    pub mood: MoodState,
    pub caption: &'static str,
    pub performing: bool,
    pub celebrating: bool,
    pub gesture_progress: usize,
    pub expression: Expression,
}

/// The mascot: mood controller + secret code detector on one clock
#[derive(Debug)]
pub struct Mascot {
    mood: MoodController,
    gesture: GestureDetector,
    host_mood: Option<MoodState>,
    now: Duration,
}

impl Mascot {
    /// Create a mascot with the given timings
    pub fn new(timings: MascotTimings) -> Self {
        Self::from_parts(MoodController::new(timings), timings)
    }

    /// Create a mascot with deterministic captions
    pub fn with_seed(timings: MascotTimings, seed: u64) -> Self {
        Self::from_parts(MoodController::with_seed(timings, seed), timings)
    }

    fn from_parts(mood: MoodController, timings: MascotTimings) -> Self {
        Self {
            mood,
            gesture: GestureDetector::new(timings.celebration),
            host_mood: None,
            now: Duration::ZERO,
        }
    }

    /// Supply (or withdraw) the host's mood override
    ///
    /// While a secret-code celebration is running the celebration keeps the
    /// mascot excited; the host value takes over when it ends.
    pub fn set_host_mood(&mut self, mood: Option<MoodState>) {
        self.host_mood = mood;
        if !self.gesture.is_celebrating() {
            self.mood.on_external_mood_change(mood);
        }
    }

    /// Host override currently supplied
    pub fn host_mood(&self) -> Option<MoodState> {
        self.host_mood
    }

    /// The mascot was clicked
    pub fn click(&mut self, effects: &mut dyn CelebrationEffects) -> ClickOutcome {
        self.mood.on_mascot_clicked(effects)
    }

    /// A key was pressed anywhere
    pub fn key(&mut self, key: GestureKey, effects: &mut dyn CelebrationEffects) -> GestureOutcome {
        let outcome = self.gesture.on_key(key);
        if outcome == GestureOutcome::Completed {
            self.mood.on_external_mood_change(Some(MoodState::Excited));
            effects.fire(Burst::secret_code());
        }
        outcome
    }

    /// Advance the shared clock by `delta`
    pub fn update(&mut self, delta: Duration) {
        let target = self.now + delta;

        // The celebration end feeds back into the mood override, so the mood
        // controller must be brought to exactly that instant first.
        if let Some(end) = self.gesture.celebration_deadline().filter(|end| *end <= target) {
            self.mood.advance_to(end);
            if self.gesture.advance_to(end) {
                self.mood.on_external_mood_change(self.host_mood);
            }
        }

        self.mood.advance_to(target);
        self.gesture.advance_to(target);
        self.now = target;
    }

    /// Shared clock
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Mood controller (read-only)
    pub fn mood(&self) -> &MoodController {
        &self.mood
    }

    /// Secret code detector (read-only)
    pub fn gesture(&self) -> &GestureDetector {
        &self.gesture
    }

    /// Whether the secret-code celebration is on screen
    pub fn is_celebrating(&self) -> bool {
        self.gesture.is_celebrating()
    }

    /// Everything a surface needs for this frame
    pub fn view(&self) -> MascotView {
        let mood = self.mood.mood();
        let performing = self.mood.is_performing();
        MascotView {
            mood,
            caption: self.mood.caption(),
            performing,
            celebrating: self.gesture.is_celebrating(),
            gesture_progress: self.gesture.progress(),
            expression: Expression::for_mood(mood, performing),
        }
    }
}

impl Default for Mascot {
    fn default() -> Self {
        Self::new(MascotTimings::default())
    }
}
