//! Animation Engine
//!
//! Manages animation playback and frame timing. Poses are built lazily per
//! expression and cached, so switching moods back and forth is free.

use std::collections::HashMap;
use std::time::Duration;

use workshop_core::Expression;

use super::poses::build_pose;
use super::sprites::{Animation, Frame};

/// Frame cursor over an [`Animation`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Playback {
    /// Current frame index
    pub frame: usize,
    /// Time accumulated on current frame
    frame_time: Duration,
}

impl Playback {
    /// Advance through `animation` by `delta`, carrying leftover time across frames
    pub fn advance(&mut self, animation: &Animation, delta: Duration) {
        if animation.frames.is_empty() {
            return;
        }

        self.frame_time += delta;

        loop {
            let Some(frame) = animation.frames.get(self.frame) else {
                self.frame = 0;
                return;
            };
            let frame_duration = Duration::from_millis(frame.duration_ms.max(1));
            if self.frame_time < frame_duration {
                return;
            }

            let last = animation.frames.len() - 1;
            if self.frame == last && !animation.looping {
                // Stay on last frame
                self.frame_time = Duration::ZERO;
                return;
            }

            self.frame_time -= frame_duration;
            self.frame = if self.frame == last { 0 } else { self.frame + 1 };
        }
    }

    /// Back to the first frame
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Engine that manages the dog's body animation
pub struct AnimationEngine {
    /// Built poses by expression
    poses: HashMap<Expression, Animation>,
    /// Expression being played
    current: Expression,
    playback: Playback,
}

impl AnimationEngine {
    /// Create an engine showing `expression`
    pub fn new(expression: Expression) -> Self {
        let mut poses = HashMap::new();
        poses.insert(expression, build_pose(&expression));
        Self {
            poses,
            current: expression,
            playback: Playback::default(),
        }
    }

    /// Update animation state
    pub fn update(&mut self, delta: Duration) {
        if let Some(animation) = self.poses.get(&self.current) {
            self.playback.advance(animation, delta);
        }
    }

    /// Switch to a different expression (no-op if already playing it)
    pub fn play(&mut self, expression: Expression) {
        if self.current != expression {
            self.poses
                .entry(expression)
                .or_insert_with(|| build_pose(&expression));
            self.current = expression;
            self.playback.reset();
        }
    }

    /// Get the current frame for rendering
    pub fn current_frame(&self) -> Option<&Frame> {
        self.poses
            .get(&self.current)
            .and_then(|animation| animation.frames.get(self.playback.frame))
    }

    /// Expression being played
    pub fn current(&self) -> Expression {
        self.current
    }

    /// Index of the frame on screen
    pub fn frame_index(&self) -> usize {
        self.playback.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use workshop_core::MoodState;

    use crate::avatar::sprites::build_frame;

    fn two_frames(looping: bool) -> Animation {
        Animation {
            frames: vec![build_frame(&["a"], &[], 100), build_frame(&["b"], &[], 100)],
            looping,
        }
    }

    #[test]
    fn test_playback_loops() {
        let animation = two_frames(true);
        let mut playback = Playback::default();

        playback.advance(&animation, Duration::from_millis(150));
        assert_eq!(playback.frame, 1);
        playback.advance(&animation, Duration::from_millis(50));
        assert_eq!(playback.frame, 0);
    }

    #[test]
    fn test_playback_holds_last_frame() {
        let animation = two_frames(false);
        let mut playback = Playback::default();

        playback.advance(&animation, Duration::from_millis(1000));
        assert_eq!(playback.frame, 1);
    }

    #[test]
    fn test_play_restarts_on_new_expression() {
        let idle = Expression::for_mood(MoodState::Idle, false);
        let trick = Expression::for_mood(MoodState::Happy, true);
        let mut engine = AnimationEngine::new(idle);

        engine.update(Duration::from_millis(450));
        assert!(engine.frame_index() > 0);

        engine.play(trick);
        assert_eq!(engine.frame_index(), 0);
        assert_eq!(engine.current(), trick);
        assert!(engine.current_frame().is_some());

        engine.play(trick);
        assert_eq!(engine.frame_index(), 0);
    }
}
