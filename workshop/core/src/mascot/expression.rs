//! Expression Table
//!
//! Pure lookup from mood to how the mascot should look: which motion
//! profile drives the tail and body, which decorations float around it,
//! and which facial details are shown. Surfaces translate these into
//! their own sprites.

use std::time::Duration;

use super::MoodState;

/// Named motion profiles
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimationProfile {
    /// Fast, wide tail wag and quick hops
    RapidOscillation,
    /// Steady tail wag
    ModerateOscillation,
    /// Barely moving, slow breathing
    MinimalDrift,
    /// Default gentle bob
    GentleBob,
}

impl AnimationProfile {
    /// Profile used for a mood
    pub fn for_mood(mood: MoodState) -> Self {
        match mood {
            MoodState::Excited => Self::RapidOscillation,
            MoodState::Happy => Self::ModerateOscillation,
            MoodState::Sleeping => Self::MinimalDrift,
            _ => Self::GentleBob,
        }
    }

    /// Animation name surfaces key their sprite sheets by
    pub fn name(self) -> &'static str {
        match self {
            Self::RapidOscillation => "rapid",
            Self::ModerateOscillation => "wag",
            Self::MinimalDrift => "drift",
            Self::GentleBob => "bob",
        }
    }

    /// Tail swing either side of rest, in degrees
    pub fn tail_swing_degrees(self) -> u16 {
        match self {
            Self::RapidOscillation => 20,
            Self::ModerateOscillation => 15,
            Self::MinimalDrift => 0,
            Self::GentleBob => 8,
        }
    }

    /// One full tail cycle
    pub fn tail_period(self) -> Duration {
        match self {
            Self::RapidOscillation => Duration::from_millis(300),
            Self::ModerateOscillation => Duration::from_millis(400),
            Self::MinimalDrift => Duration::from_millis(2000),
            Self::GentleBob => Duration::from_millis(800),
        }
    }

    /// One full body bob cycle
    pub fn body_period(self) -> Duration {
        match self {
            Self::RapidOscillation => Duration::from_millis(300),
            _ => Duration::from_millis(2000),
        }
    }
}

/// Floating markers drawn around the mascot
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Decoration {
    /// Drifting "z" marks
    Drowsy,
    /// Floating hearts
    Affection,
    /// Sparkles and stars
    Emphasis,
}

impl Decoration {
    /// Decoration for a mood, if any
    pub fn for_mood(mood: MoodState) -> Option<Self> {
        match mood {
            MoodState::Sleeping => Some(Self::Drowsy),
            MoodState::Love => Some(Self::Affection),
            MoodState::Excited => Some(Self::Emphasis),
            _ => None,
        }
    }
}

/// Eye shape
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Eyes {
    Open,
    Closed,
}

/// Body motion layered over the profile
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BodyMotion {
    /// Follow the profile's bob
    Profile,
    /// Jump-and-spin after a click
    Trick,
}

impl BodyMotion {
    /// Length of one trick jump
    pub const TRICK_DURATION: Duration = Duration::from_millis(600);
}

/// Everything a surface needs to draw the mascot for one mood
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Expression {
    pub mood: MoodState,
    pub profile: AnimationProfile,
    pub decoration: Option<Decoration>,
    pub eyes: Eyes,
    pub tongue: bool,
    pub blush: bool,
    pub raised_brows: bool,
    pub motion: BodyMotion,
}

impl Expression {
    /// Look up the expression for a mood
    pub fn for_mood(mood: MoodState, performing: bool) -> Self {
        Self {
            mood,
            profile: AnimationProfile::for_mood(mood),
            decoration: Decoration::for_mood(mood),
            eyes: if mood == MoodState::Sleeping {
                Eyes::Closed
            } else {
                Eyes::Open
            },
            tongue: matches!(mood, MoodState::Happy | MoodState::Excited),
            blush: mood == MoodState::Love,
            raised_brows: mood == MoodState::Excited,
            motion: if performing {
                BodyMotion::Trick
            } else {
                BodyMotion::Profile
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles() {
        assert_eq!(
            AnimationProfile::for_mood(MoodState::Excited),
            AnimationProfile::RapidOscillation
        );
        assert_eq!(
            AnimationProfile::for_mood(MoodState::Happy),
            AnimationProfile::ModerateOscillation
        );
        assert_eq!(
            AnimationProfile::for_mood(MoodState::Sleeping),
            AnimationProfile::MinimalDrift
        );
        for mood in [MoodState::Idle, MoodState::Thinking, MoodState::Love] {
            assert_eq!(AnimationProfile::for_mood(mood), AnimationProfile::GentleBob);
        }
    }

    #[test]
    fn test_decorations() {
        assert_eq!(Decoration::for_mood(MoodState::Sleeping), Some(Decoration::Drowsy));
        assert_eq!(Decoration::for_mood(MoodState::Love), Some(Decoration::Affection));
        assert_eq!(Decoration::for_mood(MoodState::Excited), Some(Decoration::Emphasis));
        assert_eq!(Decoration::for_mood(MoodState::Idle), None);
    }

    #[test]
    fn test_facial_details() {
        let sleeping = Expression::for_mood(MoodState::Sleeping, false);
        assert_eq!(sleeping.eyes, Eyes::Closed);
        assert!(!sleeping.tongue);

        let excited = Expression::for_mood(MoodState::Excited, true);
        assert!(excited.tongue && excited.raised_brows);
        assert_eq!(excited.motion, BodyMotion::Trick);

        assert!(Expression::for_mood(MoodState::Love, false).blush);
    }
}
