//! Golden Retriever Poses
//!
//! The dog is drawn from one body pattern. Face keys (eyes, brows, mouth,
//! cheeks) are re-inked per [`Expression`], the tail is swapped per frame,
//! and the whole body is shifted up to bob or jump.
//!
//! ```text
//!   ▄^▄^▄              <- brows (raised when excited)
//!  ▐█•█•█▌  ╱          <- ears, eyes, tail
//!   █████ ▄▄▄▄▄▄▄ ╱
//!    ▾▓▓██████████     <- tongue, chest fluff
//!     ▀▀ ▀    ▀ ▀▀     <- paws
//! ```

use std::time::Duration;

use workshop_core::mascot::{AnimationProfile, BodyMotion, Decoration, Expression, Eyes};

use super::sprites::{build_frame, Animation, Frame, Ink};
use crate::theme::{BLUSH, COAT, COAT_FLUFF, COAT_SHADOW, DROWSY, EARS, EYES, HEART, NOSE, SPARKLE, TONGUE};

/// Blank rows kept above the dog for bobbing and jumping
pub const HEADROOM: usize = 2;

/// Width of every pose frame
pub const POSE_WIDTH: u16 = 18;

/// Height of every pose frame
pub const POSE_HEIGHT: u16 = (HEADROOM + BODY.len()) as u16;

/// Body pattern; the two right-most columns are reserved for the tail
const BODY: [&str; 5] = [
    "  lblbl           ",
    " EHeHeHE          ",
    "  rHNHr lllllll   ",
    "   mFFHHHHHHHHHH  ",
    "    ss s    s ss  ",
];

/// Tail position, drawn into the top-right corner of the body rows 1..=2
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tail {
    High,
    Level,
    Droop,
}

impl Tail {
    fn rows(self) -> [&'static str; 2] {
        match self {
            Tail::High => [" 1", "1 "],
            Tail::Level => ["  ", "22"],
            Tail::Droop => ["  ", "3 "],
        }
    }
}

/// One step of a body animation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Beat {
    pub tail: Tail,
    /// Rows the body is lifted (0..=HEADROOM)
    pub lift: usize,
    pub duration: Duration,
}

impl Beat {
    fn new(tail: Tail, lift: usize, duration: Duration) -> Self {
        Self {
            tail,
            lift: lift.min(HEADROOM),
            duration,
        }
    }
}

/// Tail positions for one wag cycle at a given swing
fn wag_cycle(swing_degrees: u16) -> [Tail; 4] {
    match swing_degrees {
        0 => [Tail::Droop; 4],
        1..=9 => [Tail::Level, Tail::Level, Tail::High, Tail::High],
        10..=15 => [Tail::High, Tail::Level, Tail::Droop, Tail::Level],
        _ => [Tail::High, Tail::Level, Tail::High, Tail::Level],
    }
}

/// Beats for a profile, timed from its tail and body periods
pub fn profile_beats(profile: AnimationProfile) -> Vec<Beat> {
    let tail = profile.tail_period();
    let wag = wag_cycle(profile.tail_swing_degrees());
    match profile {
        AnimationProfile::RapidOscillation => {
            // Tail and body share one fast period: wag twice per hop
            let step = tail / 4;
            wag.iter()
                .zip([0, 1, 1, 0])
                .map(|(&t, lift)| Beat::new(t, lift, step))
                .collect()
        }
        AnimationProfile::ModerateOscillation => {
            let step = tail / 4;
            wag.iter().map(|&t| Beat::new(t, 0, step)).collect()
        }
        AnimationProfile::MinimalDrift => {
            // Slow breathing: rise once per body period
            let half = profile.body_period() / 2;
            vec![Beat::new(wag[0], 0, half), Beat::new(wag[0], 1, half)]
        }
        AnimationProfile::GentleBob => {
            // Tail wags on a quarter beat; the body lifts once per period
            let step = tail / 4;
            let beats = (profile.body_period().as_millis() / step.as_millis().max(1)) as usize;
            (0..beats)
                .map(|i| {
                    let lift = usize::from((beats * 2 / 5..beats * 3 / 5).contains(&i));
                    Beat::new(wag[i % 4], lift, step)
                })
                .collect()
        }
    }
}

/// Beats for the click trick
pub fn trick_beats() -> Vec<Beat> {
    let total = BodyMotion::TRICK_DURATION;
    let short = total / 6;
    let long = total / 4;
    vec![
        Beat::new(Tail::High, 0, short),
        Beat::new(Tail::High, 1, short),
        Beat::new(Tail::High, 2, long),
        Beat::new(Tail::High, 1, long),
        Beat::new(Tail::High, 0, short),
    ]
}

/// Palette for a face
fn palette(expression: &Expression) -> Vec<(char, Ink)> {
    let eye = match expression.eyes {
        Eyes::Open => Ink::on('•', EYES, COAT),
        Eyes::Closed => Ink::on('─', EYES, COAT),
    };
    let brow = if expression.raised_brows {
        Ink::new('^', EYES)
    } else {
        Ink::new('▄', COAT)
    };
    let mouth = if expression.tongue {
        Ink::new('▾', TONGUE)
    } else {
        Ink::new('▀', COAT)
    };
    let cheek = if expression.blush {
        Ink::on('▪', BLUSH, COAT)
    } else {
        Ink::new('█', COAT)
    };

    vec![
        ('H', Ink::new('█', COAT)),
        ('l', Ink::new('▄', COAT)),
        ('E', Ink::new('█', EARS)),
        ('F', Ink::new('█', COAT_FLUFF)),
        ('s', Ink::new('▀', COAT_SHADOW)),
        ('N', Ink::on('●', NOSE, COAT)),
        ('e', eye),
        ('b', brow),
        ('m', mouth),
        ('r', cheek),
        ('1', Ink::new('╱', COAT)),
        ('2', Ink::new('━', COAT)),
        ('3', Ink::new('╲', COAT)),
    ]
}

/// Lay out one frame: headroom, body lifted by `beat.lift`, tail spliced in
fn pose_frame(palette: &[(char, Ink)], beat: Beat) -> Frame {
    let mut rows: Vec<String> = BODY.iter().map(|row| row.to_string()).collect();
    for (row, tail) in rows[1..=2].iter_mut().zip(beat.tail.rows()) {
        let keep: String = row.chars().take(POSE_WIDTH as usize - 2).collect();
        *row = format!("{keep}{tail}");
    }

    let blank = " ".repeat(POSE_WIDTH as usize);
    let above = HEADROOM - beat.lift;
    let pattern: Vec<String> = std::iter::repeat(blank.clone())
        .take(above)
        .chain(rows)
        .chain(std::iter::repeat(blank).take(beat.lift))
        .collect();

    build_frame(&pattern, palette, beat.duration.as_millis() as u64)
}

/// Build the body animation for an expression
pub fn build_pose(expression: &Expression) -> Animation {
    let palette = palette(expression);
    let (beats, looping) = match expression.motion {
        BodyMotion::Profile => (profile_beats(expression.profile), true),
        BodyMotion::Trick => (trick_beats(), false),
    };

    Animation {
        frames: beats.into_iter().map(|beat| pose_frame(&palette, beat)).collect(),
        looping,
    }
}

// ============================================================================
// Decorations
// ============================================================================

/// A small looping animation that floats near the dog
pub struct DecorationOverlay {
    pub animation: Animation,
    /// Position relative to the pose frame's top-left corner
    pub offset: (u16, u16),
}

/// Build the overlay for a decoration
pub fn build_decoration(decoration: Decoration) -> DecorationOverlay {
    let palette = [
        ('z', Ink::new('z', DROWSY)),
        ('Z', Ink::new('Z', DROWSY)),
        ('h', Ink::new('♥', HEART)),
        ('*', Ink::new('*', SPARKLE)),
        ('+', Ink::new('✦', SPARKLE)),
    ];

    let (frames, offset): (Vec<([&str; 2], u64)>, (u16, u16)) = match decoration {
        Decoration::Drowsy => (
            vec![
                (["   ", "z  "], 700),
                ([" z ", "Z  "], 700),
                (["  Z", " z "], 700),
                (["   ", "  Z"], 700),
            ],
            (7, 0),
        ),
        Decoration::Affection => (
            vec![
                (["   ", "h  "], 500),
                ([" h ", "  h"], 500),
                (["h  ", " h "], 500),
            ],
            (8, 0),
        ),
        Decoration::Emphasis => (
            vec![
                (["+     *", "       "], 250),
                (["   *   ", "+     +"], 250),
                (["*     +", "   +   "], 250),
            ],
            (0, 0),
        ),
    };

    DecorationOverlay {
        animation: Animation {
            frames: frames
                .into_iter()
                .map(|(pattern, ms)| build_frame(&pattern, &palette, ms))
                .collect(),
            looping: true,
        },
        offset,
    }
}
