//! Qualitative style of a figure and the multipliers it implies.
//!
//! Affect coefficients are tuning knobs, not a biomechanical model.

use crate::error::{PoseError, PoseResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Build {
    #[default]
    Light,
    Heavy,
}

/// Gender-coded proportion set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    #[default]
    Neutral,
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Affect {
    #[default]
    Neutral,
    Happy,
    Sad,
}

impl FromStr for Build {
    type Err = PoseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Build::Light),
            "heavy" => Ok(Build::Heavy),
            _ => Err(PoseError::unknown_style("weight", s)),
        }
    }
}

impl FromStr for Gender {
    type Err = PoseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "neutral" => Ok(Gender::Neutral),
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            _ => Err(PoseError::unknown_style("gender", s)),
        }
    }
}

impl FromStr for Affect {
    type Err = PoseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "neutral" => Ok(Affect::Neutral),
            "happy" => Ok(Affect::Happy),
            "sad" => Ok(Affect::Sad),
            _ => Err(PoseError::unknown_style("affect", s)),
        }
    }
}

/// Largest accepted jitter amplitude in body units
pub const MAX_JITTER: f32 = 1.0;

/// Explicitly seeded positional noise
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Jitter {
    /// Maximum per-axis offset in body units
    pub amplitude: f32,
    pub seed: u64,
}

impl Jitter {
    pub fn validate(&self) -> PoseResult<()> {
        if (0.0..=MAX_JITTER).contains(&self.amplitude) {
            Ok(())
        } else {
            Err(PoseError::parameter(format!(
                "jitter amplitude must be within [0, {}], got {}",
                MAX_JITTER, self.amplitude
            )))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    pub weight: Build,
    pub gender: Gender,
    pub affect: Affect,
    pub jitter: Option<Jitter>,
}

/// Multipliers applied by motion strategies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleParams {
    /// Swing amplitude scale
    pub amplitude: f32,
    /// Cycle rate scale (periods are divided by this)
    pub frequency: f32,
    /// Vertical bob scale
    pub bounce: f32,
    /// Lateral weight-shift scale
    pub sway: f32,
    /// Forward slump of trunk and head, in radians-ish units
    pub droop: f32,
}

impl Default for StyleParams {
    fn default() -> Self {
        Self {
            amplitude: 1.0,
            frequency: 1.0,
            bounce: 1.0,
            sway: 1.0,
            droop: 0.0,
        }
    }
}

impl Style {
    pub fn new(weight: Build, gender: Gender, affect: Affect) -> Self {
        Self {
            weight,
            gender,
            affect,
            jitter: None,
        }
    }

    pub fn with_jitter(self, amplitude: f32, seed: u64) -> Self {
        Self {
            jitter: Some(Jitter { amplitude, seed }),
            ..self
        }
    }

    pub fn validate(&self) -> PoseResult<()> {
        match &self.jitter {
            Some(jitter) => jitter.validate(),
            None => Ok(()),
        }
    }

    pub fn params(&self) -> StyleParams {
        let mut params = StyleParams::default();

        if self.weight == Build::Heavy {
            params.amplitude *= 0.8;
            params.frequency *= 0.8;
            params.bounce *= 0.7;
        }

        match self.affect {
            Affect::Neutral => {}
            Affect::Happy => {
                params.amplitude *= 1.2;
                params.bounce *= 1.5;
                params.droop -= 0.05;
            }
            Affect::Sad => {
                params.amplitude *= 0.7;
                params.frequency *= 0.85;
                params.bounce *= 0.5;
                params.droop += 0.3;
            }
        }

        if self.gender == Gender::Female {
            params.sway *= 1.5;
        }

        params
    }
}

/// Loosely typed style as it arrives from JSON or JS.
///
/// Missing fields take the defaults; present fields must name a known value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleJson {
    pub weight: Option<String>,
    pub gender: Option<String>,
    pub affect: Option<String>,
    pub jitter: Option<Jitter>,
}

impl StyleJson {
    pub fn from_json(json: &str) -> PoseResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl TryFrom<StyleJson> for Style {
    type Error = PoseError;

    fn try_from(raw: StyleJson) -> PoseResult<Self> {
        fn parse<T: FromStr<Err = PoseError> + Default>(value: Option<String>) -> PoseResult<T> {
            value.map_or_else(|| Ok(T::default()), |v| v.parse())
        }

        let style = Style {
            weight: parse(raw.weight)?,
            gender: parse(raw.gender)?,
            affect: parse(raw.affect)?,
            jitter: raw.jitter,
        };
        style.validate()?;
        Ok(style)
    }
}

impl From<Style> for StyleJson {
    fn from(style: Style) -> Self {
        fn name<T: Serialize>(value: T) -> Option<String> {
            match serde_json::to_value(value) {
                Ok(serde_json::Value::String(s)) => Some(s),
                _ => None,
            }
        }

        Self {
            weight: name(style.weight),
            gender: name(style.gender),
            affect: name(style.affect),
            jitter: style.jitter,
        }
    }
}
