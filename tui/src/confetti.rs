//! Confetti
//!
//! Terminal particle field that plays the core's [`Burst`] requests.
//! Single pops spawn once; repeating presets keep an emitter alive that
//! fires every interval with a shrinking particle count.

use std::f32::consts::PI;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratatui::buffer::Buffer;
use ratatui::style::{Color, Style};

use workshop_core::{Burst, CelebrationEffects};

use crate::theme::rgb;

/// Downward pull, in rows per second squared
const GRAVITY: f32 = 28.0;
/// Horizontal slowdown per second
const DRAG: f32 = 0.6;
/// Hard cap so a long celebration cannot flood the screen
const MAX_PARTICLES: usize = 800;

const GLYPHS: [char; 6] = ['▪', '•', '*', '✦', '▴', '◆'];

/// One piece of confetti, in cell coordinates
#[derive(Clone, Debug)]
struct Particle {
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
    color: Color,
    glyph: char,
    age: Duration,
    ttl: Duration,
}

/// A repeating burst still firing
#[derive(Debug)]
struct Emitter {
    burst: Burst,
    remaining: Duration,
    until_next: Duration,
}

/// Particles and emitters for the whole screen
pub struct ConfettiField {
    particles: Vec<Particle>,
    emitters: Vec<Emitter>,
    width: u16,
    height: u16,
    enabled: bool,
    bursts_fired: usize,
    rng: StdRng,
}

impl ConfettiField {
    /// Create a field covering `width` x `height` cells
    pub fn new(width: u16, height: u16) -> Self {
        Self::with_rng(width, height, StdRng::from_entropy())
    }

    /// Create a field with reproducible particles
    pub fn with_seed(width: u16, height: u16, seed: u64) -> Self {
        Self::with_rng(width, height, StdRng::seed_from_u64(seed))
    }

    fn with_rng(width: u16, height: u16, rng: StdRng) -> Self {
        Self {
            particles: Vec::new(),
            emitters: Vec::new(),
            width,
            height,
            enabled: true,
            bursts_fired: 0,
            rng,
        }
    }

    /// Follow a terminal resize
    pub fn set_area(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    /// Turn drawing on or off; off also clears what is on screen
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.particles.clear();
            self.emitters.clear();
        }
    }

    /// Whether anything is still moving or queued
    pub fn is_active(&self) -> bool {
        !self.particles.is_empty() || !self.emitters.is_empty()
    }

    /// Live particles
    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Bursts accepted since startup
    pub fn bursts_fired(&self) -> usize {
        self.bursts_fired
    }

    /// Advance emitters and particles
    pub fn update(&mut self, delta: Duration) {
        let mut due = Vec::new();
        for emitter in &mut self.emitters {
            let interval = emitter.burst.preset.interval();
            let mut elapsed = delta;
            while !emitter.remaining.is_zero() && elapsed >= emitter.until_next {
                elapsed -= emitter.until_next;
                emitter.remaining = emitter.remaining.saturating_sub(emitter.until_next);
                emitter.until_next = interval;
                if emitter.remaining.is_zero() {
                    break;
                }
                // Fewer particles as the celebration winds down
                let share = emitter.remaining.as_secs_f32() / emitter.burst.preset.duration().as_secs_f32();
                let count = (emitter.burst.preset.particle_count() as f32 * share).round() as usize;
                due.push((emitter.burst.clone(), count));
            }
            emitter.until_next = emitter.until_next.saturating_sub(elapsed);
            emitter.remaining = emitter.remaining.saturating_sub(elapsed);
        }
        self.emitters.retain(|e| !e.remaining.is_zero());
        for (burst, count) in due {
            self.spawn(&burst, count);
        }

        let dt = delta.as_secs_f32();
        let drag = DRAG.powf(dt);
        for p in &mut self.particles {
            p.vy += GRAVITY * dt;
            p.vx *= drag;
            p.x += p.vx * dt;
            p.y += p.vy * dt;
            p.age += delta;
        }

        let (w, h) = (f32::from(self.width), f32::from(self.height));
        self.particles
            .retain(|p| p.age < p.ttl && p.y < h + 1.0 && p.x > -2.0 && p.x < w + 2.0);
    }

    /// Spawn `count` particles at every origin of `burst`
    fn spawn(&mut self, burst: &Burst, count: usize) {
        let (w, h) = (f32::from(self.width), f32::from(self.height));
        let spread = burst.preset.spread_degrees().to_radians();

        for origin in &burst.origins {
            for _ in 0..count {
                if self.particles.len() >= MAX_PARTICLES {
                    return;
                }

                // Straight up is -PI/2 on screen
                let angle = -PI / 2.0 + self.rng.gen_range(-0.5f32..=0.5) * spread;
                let speed: f32 = self.rng.gen_range(12.0..30.0);
                let color = burst
                    .palette
                    .get(self.rng.gen_range(0..burst.palette.len().max(1)))
                    .map_or(Color::White, |c| rgb(*c));

                self.particles.push(Particle {
                    x: origin.x * w,
                    y: origin.y * h,
                    // Cells are about twice as tall as wide
                    vx: angle.cos() * speed * 2.0,
                    vy: angle.sin() * speed,
                    color,
                    glyph: GLYPHS[self.rng.gen_range(0..GLYPHS.len())],
                    age: Duration::ZERO,
                    ttl: Duration::from_millis(self.rng.gen_range(1200..2800)),
                });
            }
        }
    }

    /// Draw particles; every other cell stays transparent
    pub fn render(&self, buf: &mut Buffer) {
        let area = buf.area;
        for p in &self.particles {
            if p.x < 0.0 || p.y < 0.0 {
                continue;
            }
            let (x, y) = (p.x as u16, p.y as u16);
            if x >= area.width || y >= area.height {
                continue;
            }
            buf[(area.x + x, area.y + y)]
                .set_char(p.glyph)
                .set_style(Style::default().fg(p.color));
        }
    }
}

impl CelebrationEffects for ConfettiField {
    fn fire(&mut self, burst: Burst) {
        if !self.enabled {
            tracing::debug!(preset = ?burst.preset, "confetti disabled, burst skipped");
            return;
        }

        self.bursts_fired += 1;
        self.spawn(&burst, burst.preset.particle_count());

        let duration = burst.preset.duration();
        if !duration.is_zero() {
            let until_next = burst.preset.interval();
            self.emitters.push(Emitter {
                burst,
                remaining: duration,
                until_next,
            });
        }
    }
}
