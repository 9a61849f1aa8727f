//! Mood Controller
//!
//! Owns the mascot's expressive state and the caption beside it.
//!
//! Three timer lines run against the controller's virtual clock:
//! - caption rotation (repeating, anchored to the last effective mood change)
//! - auto-decay back to idle (one-shot, re-armed on every click or override)
//! - the performing pulse after a click (one-shot)
//!
//! An external override pins the displayed mood and suspends auto-decay for
//! as long as it is present.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::captions::CaptionPool;
use super::timer::{earliest_due, IntervalTimer, ScopedTimer};
use super::MascotTimings;
use crate::celebration::{Burst, CelebrationEffects};

/// The mascot's discrete expressive states
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodState {
    #[default]
    Idle,
    Happy,
    Excited,
    Sleeping,
    Thinking,
    Love,
}

impl MoodState {
    /// Every mood, in declaration order
    pub const ALL: [MoodState; 6] = [
        MoodState::Idle,
        MoodState::Happy,
        MoodState::Excited,
        MoodState::Sleeping,
        MoodState::Thinking,
        MoodState::Love,
    ];

    /// Lowercase name
    pub fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Happy => "happy",
            Self::Excited => "excited",
            Self::Sleeping => "sleeping",
            Self::Thinking => "thinking",
            Self::Love => "love",
        }
    }

    /// Whether this mood stays put without input
    pub fn is_resting(self) -> bool {
        matches!(self, Self::Idle | Self::Sleeping)
    }

    /// The next mood in declaration order, wrapping around
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for MoodState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown mood name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown mood '{0}' (expected one of: idle, happy, excited, sleeping, thinking, love)")]
pub struct ParseMoodError(pub String);

impl FromStr for MoodState {
    type Err = ParseMoodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|mood| mood.name() == wanted)
            .ok_or_else(|| ParseMoodError(s.to_string()))
    }
}

/// The mood actually shown: pinned by an override, or internally driven
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectiveMood {
    /// Driven by clicks and timers
    Internal(MoodState),
    /// Pinned by an external override
    Pinned(MoodState),
}

impl EffectiveMood {
    /// The mood to render
    pub fn state(self) -> MoodState {
        match self {
            Self::Internal(mood) | Self::Pinned(mood) => mood,
        }
    }

    /// Whether an override is in force
    pub fn is_pinned(self) -> bool {
        matches!(self, Self::Pinned(_))
    }
}

/// What a mascot click turned into
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Ordinary pat: happy + short hop
    Pet,
    /// Threshold reached: excited + celebration
    Trick,
}

/// Mood state machine with caption rotation and auto-decay
#[derive(Debug)]
pub struct MoodController {
    internal: MoodState,
    external: Option<MoodState>,
    clicks: u32,
    performing: bool,
    caption: &'static str,
    now: Duration,
    rotation: IntervalTimer,
    decay: ScopedTimer,
    pulse: ScopedTimer,
    timings: MascotTimings,
    rng: StdRng,
}

impl MoodController {
    /// Create a controller mounted at time zero
    pub fn new(timings: MascotTimings) -> Self {
        Self::with_rng(timings, StdRng::from_entropy())
    }

    /// Create a controller with a deterministic caption sequence
    pub fn with_seed(timings: MascotTimings, seed: u64) -> Self {
        Self::with_rng(timings, StdRng::seed_from_u64(seed))
    }

    fn with_rng(timings: MascotTimings, rng: StdRng) -> Self {
        let mut rotation = IntervalTimer::new(timings.caption_interval);
        rotation.arm(Duration::ZERO);

        Self {
            internal: MoodState::Idle,
            external: None,
            clicks: 0,
            performing: false,
            caption: CaptionPool::greeting(),
            now: Duration::ZERO,
            rotation,
            decay: ScopedTimer::idle(),
            pulse: ScopedTimer::idle(),
            timings,
            rng,
        }
    }

    /// Override wins over internal state whenever present
    pub fn effective(&self) -> EffectiveMood {
        match self.external {
            Some(mood) => EffectiveMood::Pinned(mood),
            None => EffectiveMood::Internal(self.internal),
        }
    }

    /// The mood to render
    pub fn mood(&self) -> MoodState {
        self.effective().state()
    }

    /// Current speech bubble text
    pub fn caption(&self) -> &'static str {
        self.caption
    }

    /// Clicks since the last trick
    pub fn click_count(&self) -> u32 {
        self.clicks
    }

    /// Whether the post-click animation is playing
    pub fn is_performing(&self) -> bool {
        self.performing
    }

    /// Current override, if any
    pub fn external_mood(&self) -> Option<MoodState> {
        self.external
    }

    /// Controller clock
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Whether an auto-decay is pending
    pub fn decay_pending(&self) -> bool {
        self.decay.is_armed()
    }

    /// Earliest pending deadline across all timer lines
    pub fn next_deadline(&self) -> Option<Duration> {
        [
            self.pulse.deadline(),
            self.rotation.deadline(),
            self.decay.deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// Apply (or clear) an external mood override
    ///
    /// A present override is adopted as the current state immediately.
    pub fn on_external_mood_change(&mut self, mood: Option<MoodState>) {
        if self.external == mood {
            return;
        }

        let before = self.mood();
        self.external = mood;
        if let Some(pinned) = mood {
            self.internal = pinned;
        }
        tracing::debug!(override_mood = ?mood, "mascot mood override changed");
        self.settle(before);
    }

    /// Handle a click on the mascot
    pub fn on_mascot_clicked(&mut self, effects: &mut dyn CelebrationEffects) -> ClickOutcome {
        let before = self.mood();
        self.clicks += 1;

        let outcome = if self.clicks >= self.timings.click_threshold {
            self.clicks = 0;
            self.internal = MoodState::Excited;
            self.pulse.arm(self.now, self.timings.trick_pulse);
            effects.fire(Burst::trick());
            tracing::info!("mascot trick unlocked");
            ClickOutcome::Trick
        } else {
            self.internal = MoodState::Happy;
            self.pulse.arm(self.now, self.timings.pet_pulse);
            ClickOutcome::Pet
        };

        self.performing = true;
        self.settle(before);
        outcome
    }

    /// Advance the clock by `delta`
    pub fn update(&mut self, delta: Duration) {
        self.advance_to(self.now + delta);
    }

    /// Advance the clock to `at`, firing due timers in deadline order
    pub fn advance_to(&mut self, at: Duration) {
        if at < self.now {
            return;
        }

        while let Some(due) = earliest_due(
            &[
                self.pulse.deadline(),
                self.rotation.deadline(),
                self.decay.deadline(),
            ],
            at,
        ) {
            self.now = due;

            if self.pulse.fire(due) {
                self.performing = false;
            }
            if self.rotation.fire(due) {
                self.rotate_caption();
            }
            if self.decay.fire(due) {
                let before = self.mood();
                self.internal = MoodState::Idle;
                tracing::debug!("mascot settled back to idle");
                self.settle(before);
            }
        }

        self.now = at;
    }

    /// Re-arm timers after a state-changing input
    fn settle(&mut self, before: MoodState) {
        if self.mood() != before {
            self.rotation.arm(self.now);
        }

        if self.external.is_none() && !self.internal.is_resting() {
            self.decay.arm(self.now, self.timings.decay);
        } else {
            self.decay.cancel();
        }
    }

    fn rotate_caption(&mut self) {
        if let Some(caption) = CaptionPool::for_mood(self.mood()).choose(&mut self.rng) {
            self.caption = *caption;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn controller() -> MoodController {
        MoodController::with_seed(MascotTimings::default(), 7)
    }

    #[test]
    fn test_starts_idle_with_greeting() {
        let mood = controller();
        assert_eq!(mood.mood(), MoodState::Idle);
        assert_eq!(mood.caption(), CaptionPool::greeting());
        assert_eq!(mood.click_count(), 0);
        assert!(!mood.is_performing());
    }

    #[test]
    fn test_click_cycle() {
        let mut mood = controller();
        let mut fired: Vec<Burst> = Vec::new();

        for round in 0..2 {
            for expected in 1..=4 {
                assert_eq!(mood.on_mascot_clicked(&mut fired), ClickOutcome::Pet);
                assert_eq!(mood.mood(), MoodState::Happy);
                assert_eq!(mood.click_count(), expected);
            }
            assert_eq!(mood.on_mascot_clicked(&mut fired), ClickOutcome::Trick);
            assert_eq!(mood.mood(), MoodState::Excited);
            assert_eq!(mood.click_count(), 0);
            assert_eq!(fired.len(), round + 1);
        }
    }

    #[test]
    fn test_pet_pulse_clears_after_600ms() {
        let mut mood = controller();
        mood.on_mascot_clicked(&mut Vec::<Burst>::new());
        assert!(mood.is_performing());

        mood.update(ms(599));
        assert!(mood.is_performing());
        mood.update(ms(1));
        assert!(!mood.is_performing());
    }

    #[test]
    fn test_trick_pulse_lasts_1000ms() {
        let mut mood = controller();
        let mut fired: Vec<Burst> = Vec::new();
        for _ in 0..5 {
            mood.on_mascot_clicked(&mut fired);
        }

        mood.update(ms(999));
        assert!(mood.is_performing());
        mood.update(ms(1));
        assert!(!mood.is_performing());
    }

    #[test]
    fn test_later_click_extends_pulse() {
        let mut mood = controller();
        mood.on_mascot_clicked(&mut Vec::<Burst>::new());
        mood.update(ms(500));
        mood.on_mascot_clicked(&mut Vec::<Burst>::new());

        mood.update(ms(200));
        assert!(mood.is_performing(), "first pulse must not clear the second");
        mood.update(ms(400));
        assert!(!mood.is_performing());
    }

    #[test]
    fn test_decay_to_idle_after_5s() {
        let mut mood = controller();
        mood.on_mascot_clicked(&mut Vec::<Burst>::new());

        mood.update(ms(4999));
        assert_eq!(mood.mood(), MoodState::Happy);
        mood.update(ms(1));
        assert_eq!(mood.mood(), MoodState::Idle);
        assert!(!mood.decay_pending());
    }

    #[test]
    fn test_click_restarts_decay() {
        let mut mood = controller();
        mood.on_mascot_clicked(&mut Vec::<Burst>::new());
        mood.update(ms(4000));
        mood.on_mascot_clicked(&mut Vec::<Burst>::new());

        mood.update(ms(4000));
        assert_eq!(mood.mood(), MoodState::Happy);
        mood.update(ms(1000));
        assert_eq!(mood.mood(), MoodState::Idle);
    }

    #[test]
    fn test_override_pins_every_mood() {
        for pinned in MoodState::ALL {
            let mut mood = controller();
            mood.on_mascot_clicked(&mut Vec::<Burst>::new());
            mood.on_external_mood_change(Some(pinned));

            assert_eq!(mood.mood(), pinned);
            assert!(mood.effective().is_pinned());

            // Clicks and time cannot move a pinned mood
            mood.on_mascot_clicked(&mut Vec::<Burst>::new());
            mood.update(ms(60_000));
            assert_eq!(mood.mood(), pinned);
        }
    }

    #[test]
    fn test_clearing_override_resumes_decay() {
        let mut mood = controller();
        mood.on_external_mood_change(Some(MoodState::Love));
        mood.update(ms(20_000));
        assert_eq!(mood.mood(), MoodState::Love);

        mood.on_external_mood_change(None);
        assert_eq!(mood.effective(), EffectiveMood::Internal(MoodState::Love));
        mood.update(ms(5000));
        assert_eq!(mood.mood(), MoodState::Idle);
    }

    #[test]
    fn test_sleeping_does_not_decay() {
        let mut mood = controller();
        mood.on_external_mood_change(Some(MoodState::Sleeping));
        mood.on_external_mood_change(None);
        mood.update(ms(60_000));
        assert_eq!(mood.mood(), MoodState::Sleeping);
    }

    #[test]
    fn test_caption_rotation_follows_mood() {
        let mut mood = controller();
        mood.on_external_mood_change(Some(MoodState::Thinking));

        mood.update(ms(3999));
        assert_eq!(mood.caption(), CaptionPool::greeting());
        mood.update(ms(1));
        assert!(CaptionPool::contains(MoodState::Thinking, mood.caption()));
    }

    #[test]
    fn test_rotation_reanchors_on_mood_change() {
        let mut mood = controller();
        mood.update(ms(3000));
        mood.on_mascot_clicked(&mut Vec::<Burst>::new());
        assert_eq!(mood.next_deadline(), Some(ms(3600)));

        // Old cadence would tick at 4000; the new one ticks at 7000
        mood.update(ms(1000));
        assert_eq!(mood.caption(), CaptionPool::greeting());
        mood.update(ms(3000));
        assert!(CaptionPool::contains(MoodState::Happy, mood.caption()));
    }

    #[test]
    fn test_large_step_observes_every_transition() {
        let mut mood = controller();
        mood.on_mascot_clicked(&mut Vec::<Burst>::new());

        // happy tick at 4000, decay at 5000, idle tick at 9000
        mood.update(ms(9000));
        assert_eq!(mood.mood(), MoodState::Idle);
        assert!(CaptionPool::contains(MoodState::Idle, mood.caption()));
        assert_eq!(mood.now(), ms(9000));
    }

    #[test]
    fn test_parse_mood() {
        assert_eq!("Love".parse::<MoodState>(), Ok(MoodState::Love));
        assert_eq!(" sleeping ".parse::<MoodState>(), Ok(MoodState::Sleeping));
        assert!("grumpy".parse::<MoodState>().is_err());
    }

    #[test]
    fn test_next_wraps() {
        assert_eq!(MoodState::Love.next(), MoodState::Idle);
        assert_eq!(MoodState::Idle.next(), MoodState::Happy);
    }
}
