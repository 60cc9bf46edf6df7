//! JSON-facing configuration.
//!
//! Every field has a default, so `{}` is a valid tuning block and a config
//! only needs to name the motion.

use crate::error::{PoseError, PoseResult};
use crate::math::Ease;
use crate::motion::WaveProfile;
use crate::style::StyleJson;
use crate::trajectory::JumpProfile;
use serde::{Deserialize, Serialize};

/// Tunable parameters shared by all motion kinds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Playback rate; 2.0 runs every motion twice as fast
    pub tempo: f32,
    pub jump: JumpProfile,
    pub wave: WaveProfile,
    /// Wrap accumulated locomotion travel to this length (body units)
    pub travel_wrap: Option<f32>,
    /// Curve between keyframes of bow, sit-down, lie-down and forward-roll
    pub ease: Ease,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            tempo: 1.0,
            jump: JumpProfile::default(),
            wave: WaveProfile::default(),
            travel_wrap: None,
            ease: Ease::Cosine,
        }
    }
}

impl MotionConfig {
    pub fn validate(&self) -> PoseResult<()> {
        self.validated().map(|_| ())
    }

    /// Check every field and return a copy with normalised jump fractions
    pub fn validated(&self) -> PoseResult<Self> {
        if !self.tempo.is_finite() || self.tempo <= 0.0 {
            return Err(PoseError::parameter(format!(
                "tempo must be positive, got {}",
                self.tempo
            )));
        }
        if let Some(wrap) = self.travel_wrap {
            if !wrap.is_finite() || wrap <= 0.0 {
                return Err(PoseError::parameter(format!(
                    "travel_wrap must be positive, got {}",
                    wrap
                )));
            }
        }
        self.wave.validate()?;

        Ok(Self {
            jump: self.jump.normalized()?,
            ..*self
        })
    }
}

/// Complete animator setup as a single JSON document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimatorConfig {
    #[serde(default)]
    pub style: StyleJson,
    /// Motion kind name, e.g. `"jump-forward"`
    pub motion: String,
    #[serde(default)]
    pub tuning: MotionConfig,
}

impl AnimatorConfig {
    pub fn from_json(json: &str) -> PoseResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
