use super::{Contact, JointDriver, MotionKind, MotionStrategy, Timing};
use crate::body::{Channel, Joint, Posture, Side};
use crate::error::{PoseError, PoseResult};
use crate::sequencer::Playback;
use crate::style::StyleParams;
use crate::swing::Oscillator;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Path traced by the waving hand in the frontal plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WavePattern {
    #[default]
    Circle,
    FigureEight,
    SideToSide,
}

impl WavePattern {
    /// Unit-amplitude `(vertical, outward)` offset at cycle position
    pub fn offset(self, cycle: f32) -> (f32, f32) {
        let angle = TAU * cycle;
        match self {
            WavePattern::Circle => (angle.sin(), angle.cos()),
            WavePattern::FigureEight => (0.5 * (2.0 * angle).sin(), angle.sin()),
            WavePattern::SideToSide => (0.0, angle.sin()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveProfile {
    pub pattern: WavePattern,
    /// Path radius in body units
    pub amplitude: f32,
    /// Path centre relative to the shoulder
    pub reach_forward: f32,
    pub reach_up: f32,
    pub reach_out: f32,
    /// Seconds per wave
    pub period: f32,
}

impl Default for WaveProfile {
    fn default() -> Self {
        Self {
            pattern: WavePattern::Circle,
            amplitude: 0.12,
            reach_forward: 0.05,
            reach_up: 0.30,
            reach_out: 0.20,
            period: 1.2,
        }
    }
}

impl WaveProfile {
    pub fn validate(&self) -> PoseResult<()> {
        let finite = [
            self.amplitude,
            self.reach_forward,
            self.reach_up,
            self.reach_out,
            self.period,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !finite || self.amplitude < 0.0 || self.period <= 0.0 {
            return Err(PoseError::parameter(format!(
                "wave needs finite values, amplitude >= 0 and period > 0 (got {:?})",
                self
            )));
        }
        Ok(())
    }
}

/// Right hand waves above the shoulder; the left arm hangs loosely
#[derive(Debug, Clone)]
pub struct WaveHand {
    profile: WaveProfile,
    period: f32,
    amplitude: f32,
    left_arm: Oscillator,
    droop: f32,
}

impl WaveHand {
    pub fn new(params: &StyleParams, profile: WaveProfile, tempo: f32) -> Self {
        Self {
            profile,
            period: profile.period / (params.frequency * tempo),
            amplitude: profile.amplitude * params.amplitude,
            left_arm: Oscillator::new(0.0, 0.05, 0.0),
            droop: params.droop,
        }
    }

    /// Side that waves
    pub const WAVING: Side = Side::Right;
}

impl MotionStrategy for WaveHand {
    fn kind(&self) -> MotionKind {
        MotionKind::WaveHand
    }

    fn timing(&self) -> Timing {
        Timing {
            period: self.period,
            playback: Playback::Loop,
        }
    }

    fn driver(&self, joint: Joint) -> JointDriver {
        match joint {
            Joint::Pelvis => JointDriver::Root,
            Joint::RightElbow | Joint::RightWrist => JointDriver::Reach,
            Joint::LeftElbow | Joint::LeftWrist => JointDriver::Swing,
            _ => JointDriver::Rest,
        }
    }

    fn posture(&self, cycle: f32) -> Posture {
        let lean = 0.5 * self.droop;
        Posture::neutral()
            .with(Channel::TrunkLean, lean)
            .with(Channel::HeadTilt, self.droop)
            .with(Channel::LeftShoulder, lean + self.left_arm.at(cycle))
            .with(Channel::LeftElbow, 0.1)
            // Replaced by the reach solution
            .with(Channel::RightShoulder, lean)
    }

    fn reach_target(&self, side: Side, cycle: f32, shoulder: Vec3) -> Option<Vec3> {
        if side != Self::WAVING {
            return None;
        }
        let (up, out) = self.profile.pattern.offset(cycle);
        let centre = Vec3::new(
            self.profile.reach_forward,
            self.profile.reach_up,
            self.profile.reach_out * side.sign(),
        );
        let path = Vec3::new(0.0, up, out * side.sign()) * self.amplitude;
        Some(shoulder + centre + path)
    }

    fn contact(&self) -> Contact {
        Contact::Feet
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_right_hand_reaches() {
        let wave = WaveHand::new(&StyleParams::default(), WaveProfile::default(), 1.0);
        assert!(wave.reach_target(Side::Left, 0.3, Vec3::ZERO).is_none());
        let target = wave.reach_target(Side::Right, 0.0, Vec3::ZERO).unwrap();
        // Above and outside (-z) the right shoulder
        assert!(target.y > 0.2);
        assert!(target.z < -0.2);
    }

    #[test]
    fn test_paths_loop() {
        for pattern in [
            WavePattern::Circle,
            WavePattern::FigureEight,
            WavePattern::SideToSide,
        ] {
            let (a0, b0) = pattern.offset(0.0);
            let (a1, b1) = pattern.offset(1.0);
            assert!((a0 - a1).abs() < 1e-5 && (b0 - b1).abs() < 1e-5, "{:?}", pattern);
        }
    }

    #[test]
    fn test_circle_radius() {
        let profile = WaveProfile::default();
        let wave = WaveHand::new(&StyleParams::default(), profile, 1.0);
        let centre = Vec3::new(profile.reach_forward, profile.reach_up, -profile.reach_out);
        for i in 0..12 {
            let target = wave.reach_target(Side::Right, i as f32 / 12.0, Vec3::ZERO).unwrap();
            assert!((target.distance(centre) - profile.amplitude).abs() < 1e-5);
        }
    }

    #[test]
    fn test_profile_validation() {
        assert!(WaveProfile::default().validate().is_ok());
        let bad = WaveProfile {
            period: 0.0,
            ..WaveProfile::default()
        };
        assert!(bad.validate().is_err());
        let bad = WaveProfile {
            reach_up: f32::NAN,
            ..WaveProfile::default()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_left_arm_hangs() {
        let wave = WaveHand::new(&StyleParams::default(), WaveProfile::default(), 1.0);
        for i in 0..10 {
            let posture = wave.posture(i as f32 / 10.0);
            assert!(posture.get(Channel::LeftShoulder).abs() <= 0.05 + 1e-6);
        }
    }
}
