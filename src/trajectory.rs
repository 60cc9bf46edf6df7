//! Parabolic root trajectory for jumps.
//!
//! A jump cycle is split into crouch, flight and landing sub-intervals. The
//! vertical offset eases in during the crouch, follows a ballistic parabola
//! in flight and eases out on landing. It is continuous everywhere and also
//! C1 at both boundaries whenever crouch and landing are equally long.

use crate::error::{PoseError, PoseResult};
use crate::math::EPSILON;
use serde::{Deserialize, Serialize};

/// Sub-interval of a jump cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JumpStage {
    Crouch,
    Flight,
    Land,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JumpProfile {
    /// Fraction of the cycle spent crouching / pushing off
    pub crouch: f32,
    /// Fraction of the cycle spent airborne
    pub flight: f32,
    /// Fraction of the cycle spent landing
    pub land: f32,
    /// Peak root rise in body units
    pub height: f32,
    /// Forward travel per jump (jump-forward only)
    pub distance: f32,
    /// Cycle length in seconds
    pub duration: f32,
}

impl Default for JumpProfile {
    fn default() -> Self {
        Self {
            crouch: 0.2,
            flight: 0.6,
            land: 0.2,
            height: 0.35,
            distance: 0.6,
            duration: 1.5,
        }
    }
}

impl JumpProfile {
    /// Check ranges and rescale the fractions so they sum to one
    pub fn normalized(self) -> PoseResult<Self> {
        let fractions = [self.crouch, self.flight, self.land];
        if fractions.iter().any(|f| !f.is_finite() || *f < 0.0) {
            return Err(PoseError::parameter(format!(
                "jump fractions must be non-negative numbers (crouch {}, flight {}, land {})",
                self.crouch, self.flight, self.land
            )));
        }
        if self.flight <= EPSILON {
            return Err(PoseError::parameter("jump flight fraction must be positive"));
        }
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(PoseError::parameter(format!(
                "jump duration must be positive, got {}",
                self.duration
            )));
        }
        if !self.height.is_finite() || !self.distance.is_finite() {
            return Err(PoseError::parameter("jump height and distance must be finite"));
        }

        let total = self.crouch + self.flight + self.land;
        Ok(Self {
            crouch: self.crouch / total,
            flight: self.flight / total,
            land: self.land / total,
            ..self
        })
    }

    /// Sub-interval containing `u` and the local fraction within it.
    /// `u` is clamped to `[0, 1]`.
    pub fn stage(&self, u: f32) -> (JumpStage, f32) {
        let u = clamp_unit(u);
        let flight_start = self.crouch;
        let flight_end = self.crouch + self.flight;

        if u < flight_start {
            (JumpStage::Crouch, u / self.crouch)
        } else if u <= flight_end {
            (JumpStage::Flight, (u - flight_start) / self.flight)
        } else {
            let local = if self.land > 0.0 {
                (u - flight_end) / self.land
            } else {
                1.0
            };
            (JumpStage::Land, local.min(1.0))
        }
    }

    /// Root height at the flight boundaries, chosen so the crouch ease-in
    /// and the parabola meet with matching slope
    pub fn takeoff_height(&self) -> f32 {
        let m = 0.5 * (self.crouch + self.land);
        2.0 * self.height * m / (self.flight + 2.0 * m)
    }

    /// Root rise above standing height at normalised time `u`
    pub fn vertical_offset(&self, u: f32) -> f32 {
        let base = self.takeoff_height();
        match self.stage(u) {
            (JumpStage::Crouch, s) => base * s * s,
            (JumpStage::Flight, s) => base + 4.0 * (self.height - base) * s * (1.0 - s),
            (JumpStage::Land, s) => base * (1.0 - s) * (1.0 - s),
        }
    }

    /// Forward root travel at normalised time `u`, linear over the cycle
    pub fn horizontal_offset(&self, u: f32) -> f32 {
        self.distance * clamp_unit(u)
    }
}

#[inline]
fn clamp_unit(u: f32) -> f32 {
    if u > 0.0 {
        u.min(1.0)
    } else {
        0.0
    }
}
