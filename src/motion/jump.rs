use super::{Contact, JointDriver, MotionKind, MotionStrategy, Timing};
use crate::body::{Channel, Joint, Posture};
use crate::sequencer::Playback;
use crate::style::StyleParams;
use crate::trajectory::{JumpProfile, JumpStage};
use glam::Vec3;
use std::f32::consts::PI;

/// Knee bend at the bottom of the crouch and the landing
const CROUCH_KNEE: f32 = 0.4;
const FLIGHT_TUCK: f32 = 0.8;
/// Arms swing back while loading
const ARM_BACKSWING: f32 = 0.5;
/// Arms thrown up during flight
const ARM_RAISE: f32 = 2.4;
const FORWARD_LEAN: f32 = 0.25;

/// Repeated jump along the parabolic root trajectory
#[derive(Debug, Clone)]
pub struct Jump {
    kind: MotionKind,
    profile: JumpProfile,
    period: f32,
    amplitude: f32,
}

impl Jump {
    /// `profile` must already be normalised
    pub fn up(params: &StyleParams, profile: JumpProfile, tempo: f32) -> Self {
        Self {
            kind: MotionKind::JumpUp,
            profile,
            period: profile.duration / tempo,
            amplitude: params.amplitude,
        }
    }

    /// Like `up`, drifting forward by `profile.distance` per jump
    pub fn forward(params: &StyleParams, profile: JumpProfile, tempo: f32) -> Self {
        Self {
            kind: MotionKind::JumpForward,
            ..Self::up(params, profile, tempo)
        }
    }

    fn travels(&self) -> bool {
        self.kind == MotionKind::JumpForward
    }
}

impl MotionStrategy for Jump {
    fn kind(&self) -> MotionKind {
        self.kind
    }

    fn timing(&self) -> Timing {
        Timing {
            period: self.period,
            playback: Playback::Loop,
        }
    }

    fn driver(&self, joint: Joint) -> JointDriver {
        match joint {
            Joint::Pelvis => JointDriver::Trajectory,
            Joint::LeftElbow
            | Joint::RightElbow
            | Joint::LeftWrist
            | Joint::RightWrist
            | Joint::LeftKnee
            | Joint::RightKnee
            | Joint::LeftAnkle
            | Joint::RightAnkle => JointDriver::Swing,
            _ => JointDriver::Rest,
        }
    }

    fn posture(&self, cycle: f32) -> Posture {
        let (stage, local) = self.profile.stage(cycle);
        let pulse = (PI * local).sin();

        let (knee, shoulder) = match stage {
            JumpStage::Crouch => (CROUCH_KNEE * pulse, -ARM_BACKSWING * self.amplitude * pulse),
            JumpStage::Flight => (
                FLIGHT_TUCK * self.amplitude * pulse,
                ARM_RAISE * self.amplitude * pulse,
            ),
            JumpStage::Land => (CROUCH_KNEE * pulse, 0.0),
        };
        let hip = 0.5 * knee;
        let elbow = 0.3 * knee;

        let mut posture = Posture::neutral()
            .with(Channel::RootY, self.profile.vertical_offset(cycle))
            .with_limbs(shoulder, elbow, hip, knee);

        if self.travels() {
            let lean = FORWARD_LEAN * (PI * cycle.clamp(0.0, 1.0)).sin();
            posture = posture
                .with(Channel::RootX, self.profile.horizontal_offset(cycle))
                .with(Channel::TrunkLean, lean);
        }
        posture
    }

    fn contact(&self) -> Contact {
        Contact::Free
    }

    fn travel_per_cycle(&self) -> Vec3 {
        if self.travels() {
            Vec3::new(self.profile.distance, 0.0, 0.0)
        } else {
            Vec3::ZERO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> JumpProfile {
        JumpProfile::default().normalized().unwrap()
    }

    #[test]
    fn test_jump_starts_and_ends_standing() {
        let jump = Jump::up(&StyleParams::default(), profile(), 1.0);
        for cycle in [0.0, 1.0] {
            let posture = jump.posture(cycle);
            for value in posture.values() {
                assert!(value.abs() < 1e-5, "{:?} at {}", posture, cycle);
            }
        }
    }

    #[test]
    fn test_crouch_then_tuck() {
        let jump = Jump::up(&StyleParams::default(), profile(), 1.0);
        let crouch = jump.posture(0.1);
        assert!(crouch.get(Channel::LeftKnee) > 0.3);
        assert!(crouch.get(Channel::LeftShoulder) < 0.0, "arms swing back");

        let apex = jump.posture(0.5);
        assert!(apex.get(Channel::RightKnee) > crouch.get(Channel::RightKnee));
        assert!(apex.get(Channel::RightShoulder) > 2.0, "arms thrown up");
        assert!((apex.get(Channel::RootY) - 0.35).abs() < 1e-5);
    }

    #[test]
    fn test_forward_jump_drifts() {
        let up = Jump::up(&StyleParams::default(), profile(), 1.0);
        let forward = Jump::forward(&StyleParams::default(), profile(), 1.0);
        assert_eq!(up.travel_per_cycle(), Vec3::ZERO);
        assert_eq!(forward.travel_per_cycle(), Vec3::new(0.6, 0.0, 0.0));

        assert_eq!(up.posture(0.5).get(Channel::RootX), 0.0);
        assert!((forward.posture(0.5).get(Channel::RootX) - 0.3).abs() < 1e-6);
        assert!(forward.posture(0.5).get(Channel::TrunkLean) > 0.2);
        // Same vertical arc
        assert_eq!(
            up.posture(0.3).get(Channel::RootY),
            forward.posture(0.3).get(Channel::RootY)
        );
    }

    #[test]
    fn test_tempo_and_duration() {
        let mut profile = profile();
        profile.duration = 2.0;
        let jump = Jump::up(&StyleParams::default(), profile, 2.0);
        assert!((jump.timing().period - 1.0).abs() < 1e-6);
    }
}
