//! Periodic limb swing for gait-like motions.
//!
//! All functions take a normalised cycle position; any real value is
//! accepted and wraps naturally through the trigonometry.

use crate::body::Side;
use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};

/// Sinusoid around a rest angle: `rest + amplitude * sin(2 pi cycle + offset)`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Oscillator {
    pub rest: f32,
    pub amplitude: f32,
    pub offset: f32,
}

impl Oscillator {
    pub const fn new(rest: f32, amplitude: f32, offset: f32) -> Self {
        Self {
            rest,
            amplitude,
            offset,
        }
    }

    #[inline]
    pub fn at(&self, cycle: f32) -> f32 {
        self.rest + self.amplitude * (TAU * cycle + self.offset).sin()
    }

    /// One-sided variant for flexion: stays in `[rest, rest + amplitude]`
    #[inline]
    pub fn flexion_at(&self, cycle: f32) -> f32 {
        self.rest + self.amplitude * 0.5 * (1.0 + (TAU * cycle + self.offset).sin())
    }

    pub fn scaled(self, factor: f32) -> Self {
        Self {
            amplitude: self.amplitude * factor,
            ..self
        }
    }
}

/// Two-segment limb driven by a proximal swing and a lagged distal flexion.
///
/// The right limb runs half a cycle behind the left one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LimbSwing {
    /// Hip or shoulder swing
    pub proximal: Oscillator,
    /// Knee or elbow flexion; its `offset` is relative to the proximal joint
    pub distal: Oscillator,
}

impl LimbSwing {
    pub const fn new(proximal: Oscillator, distal: Oscillator) -> Self {
        Self { proximal, distal }
    }

    /// Phase offset of a side in radians (contralateral limbs are PI apart)
    #[inline]
    pub fn side_offset(side: Side) -> f32 {
        match side {
            Side::Right => PI,
            _ => 0.0,
        }
    }

    /// `(proximal angle, distal flexion)` for one side
    pub fn angles(&self, cycle: f32, side: Side) -> (f32, f32) {
        let shift = Self::side_offset(side) / TAU;
        let proximal = self.proximal.at(cycle + shift);
        let distal = Oscillator {
            offset: self.proximal.offset + self.distal.offset,
            ..self.distal
        }
        .flexion_at(cycle + shift);
        (proximal, distal)
    }

    /// Shrink both swings; rest angles are kept
    pub fn scaled(self, factor: f32) -> Self {
        Self {
            proximal: self.proximal.scaled(factor),
            distal: self.distal.scaled(factor),
        }
    }
}

/// Vertical root bob: two dips per gait cycle, lowest at double support
#[inline]
pub fn bounce(cycle: f32, amplitude: f32) -> f32 {
    amplitude * (2.0 * TAU * cycle).cos()
}

/// Lateral weight shift: once per gait cycle
#[inline]
pub fn sway(cycle: f32, amplitude: f32) -> f32 {
    amplitude * (TAU * cycle).sin()
}
