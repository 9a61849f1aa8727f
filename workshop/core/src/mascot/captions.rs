//! Speech bubble captions, one pool per mood

use super::MoodState;

const IDLE: &[&str] = &[
    "Woof! Need help? 🐕",
    "Click me for a trick!",
    "I believe in you! ✨",
    "You're doing great!",
    "Code is fun! 💻",
];

const HAPPY: &[&str] = &[
    "Yay! Good job! 🎉",
    "That's pawsome! 🐾",
    "Tail wags for you!",
    "*happy panting*",
    "You rock! 🎸",
];

const EXCITED: &[&str] = &[
    "WOW WOW WOW! 🤩",
    "SO EXCITING!!!",
    "*zoomies*",
    "BEST DAY EVER!",
    "LET'S GOOO! 🚀",
];

const SLEEPING: &[&str] = &[
    "Zzz... 💤",
    "*snoring softly*",
    "Dreaming of treats...",
    "Five more minutes...",
];

const THINKING: &[&str] = &[
    "Hmm... 🤔",
    "*tilts head*",
    "Let me think...",
    "Interesting...",
];

const LOVE: &[&str] = &[
    "I love coding! 💖",
    "You're the best! 💕",
    "*heart eyes*",
    "So much love! 🥰",
];

/// Static caption table keyed by mood
pub struct CaptionPool;

impl CaptionPool {
    /// Captions for a mood (never empty)
    pub fn for_mood(mood: MoodState) -> &'static [&'static str] {
        match mood {
            MoodState::Idle => IDLE,
            MoodState::Happy => HAPPY,
            MoodState::Excited => EXCITED,
            MoodState::Sleeping => SLEEPING,
            MoodState::Thinking => THINKING,
            MoodState::Love => LOVE,
        }
    }

    /// The caption shown before the first rotation tick
    pub fn greeting() -> &'static str {
        IDLE[0]
    }

    /// Whether `caption` belongs to the pool for `mood`
    pub fn contains(mood: MoodState, caption: &str) -> bool {
        Self::for_mood(mood).contains(&caption)
    }
}
