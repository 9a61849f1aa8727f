//! Secret Code Detector
//!
//! Watches every key press for the classic up-up-down-down sequence.
//! Progress only advances on an exact match of the next token; anything
//! else drops it straight back to zero. Completing the sequence starts a
//! celebration window that ends on its own.

use std::time::Duration;

use super::timer::ScopedTimer;

/// Key tokens the detector cares about
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GestureKey {
    Up,
    Down,
    Left,
    Right,
    B,
    A,
    /// Any key outside the sequence alphabet
    Other,
}

impl GestureKey {
    /// Map a DOM-style key code (`"ArrowUp"`, `"KeyB"`, ...) to a token
    pub fn from_code(code: &str) -> Self {
        match code {
            "ArrowUp" => Self::Up,
            "ArrowDown" => Self::Down,
            "ArrowLeft" => Self::Left,
            "ArrowRight" => Self::Right,
            "KeyB" => Self::B,
            "KeyA" => Self::A,
            _ => Self::Other,
        }
    }

    /// Map a typed character to a token (case-insensitive)
    pub fn from_char(c: char) -> Self {
        match c.to_ascii_lowercase() {
            'b' => Self::B,
            'a' => Self::A,
            _ => Self::Other,
        }
    }
}

/// The secret sequence
pub const SECRET_SEQUENCE: [GestureKey; 10] = [
    GestureKey::Up,
    GestureKey::Up,
    GestureKey::Down,
    GestureKey::Down,
    GestureKey::Left,
    GestureKey::Right,
    GestureKey::Left,
    GestureKey::Right,
    GestureKey::B,
    GestureKey::A,
];

/// Result of feeding one key to the detector
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureOutcome {
    /// Matched the next token; carries the new progress
    Advanced(usize),
    /// Matched the final token; celebration started
    Completed,
    /// Mismatch; progress is back to zero
    Reset,
}

/// Rolling prefix matcher against [`SECRET_SEQUENCE`]
#[derive(Debug)]
pub struct GestureDetector {
    progress: usize,
    celebrating: bool,
    now: Duration,
    reset: ScopedTimer,
    celebration_length: Duration,
}

impl GestureDetector {
    /// Create a detector whose celebrations last `celebration_length`
    pub fn new(celebration_length: Duration) -> Self {
        Self {
            progress: 0,
            celebrating: false,
            now: Duration::ZERO,
            reset: ScopedTimer::idle(),
            celebration_length,
        }
    }

    /// Tokens matched so far (0..=10)
    pub fn progress(&self) -> usize {
        self.progress
    }

    /// Whether the celebration window is open
    pub fn is_celebrating(&self) -> bool {
        self.celebrating
    }

    /// When the current celebration ends, if one is running
    pub fn celebration_deadline(&self) -> Option<Duration> {
        self.reset.deadline()
    }

    /// Detector clock
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Feed one key press
    pub fn on_key(&mut self, key: GestureKey) -> GestureOutcome {
        match SECRET_SEQUENCE.get(self.progress) {
            Some(expected) if *expected == key => {
                self.progress += 1;
                if self.progress == SECRET_SEQUENCE.len() {
                    self.celebrating = true;
                    self.reset.arm(self.now, self.celebration_length);
                    tracing::info!("secret code entered");
                    GestureOutcome::Completed
                } else {
                    GestureOutcome::Advanced(self.progress)
                }
            }
            _ => {
                self.progress = 0;
                GestureOutcome::Reset
            }
        }
    }

    /// Advance the clock to `at`
    ///
    /// Returns `true` when a celebration ended during this step.
    pub fn advance_to(&mut self, at: Duration) -> bool {
        if at < self.now {
            return false;
        }

        let ended = if self.reset.fire(at) {
            self.celebrating = false;
            self.progress = 0;
            tracing::debug!("secret code celebration finished");
            true
        } else {
            false
        };

        self.now = at;
        ended
    }
}
