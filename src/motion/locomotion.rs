use super::{Contact, JointDriver, MotionKind, MotionStrategy, Timing};
use crate::body::{Channel, Joint, Posture, Side};
use crate::math::Ease;
use crate::sequencer::Playback;
use crate::style::StyleParams;
use crate::swing::{bounce, sway, LimbSwing, Oscillator};
use std::f32::consts::{FRAC_PI_2, PI};

const WALK_PERIOD: f32 = 1.0;
const RUN_PERIOD: f32 = 0.7;

/// Cyclic in-place gait shared by walking and running
#[derive(Debug, Clone)]
pub struct Gait {
    kind: MotionKind,
    period: f32,
    legs: LimbSwing,
    arms: LimbSwing,
    bounce: f32,
    sway: f32,
    trunk_lean: f32,
    head_tilt: f32,
}

impl Gait {
    pub fn walk(params: &StyleParams, tempo: f32) -> Self {
        let amp = params.amplitude;
        Self {
            kind: MotionKind::Walk,
            period: WALK_PERIOD / (params.frequency * tempo),
            legs: LimbSwing::new(
                Oscillator::new(0.0, 0.45 * amp, 0.0),
                Oscillator::new(0.05, 0.9 * amp, FRAC_PI_2),
            ),
            // Arms swing against the leg on the same side
            arms: LimbSwing::new(
                Oscillator::new(0.0, 0.35 * amp, PI),
                Oscillator::new(0.15 + 0.2 * params.droop, 0.3 * amp, 0.0),
            ),
            bounce: 0.03 * params.bounce,
            sway: 0.02 * params.sway,
            trunk_lean: 0.05 + 0.5 * params.droop,
            head_tilt: params.droop,
        }
    }

    pub fn run(params: &StyleParams, tempo: f32) -> Self {
        let amp = params.amplitude;
        Self {
            kind: MotionKind::Run,
            period: RUN_PERIOD / (params.frequency * tempo),
            legs: LimbSwing::new(
                Oscillator::new(0.1, 0.7 * amp, 0.0),
                Oscillator::new(0.3, 1.4 * amp, FRAC_PI_2),
            ),
            arms: LimbSwing::new(
                Oscillator::new(0.0, 0.6 * amp, PI),
                Oscillator::new(1.4, 0.2 * amp, 0.0),
            ),
            bounce: 0.06 * params.bounce,
            sway: 0.01 * params.sway,
            trunk_lean: 0.2 + 0.5 * params.droop,
            head_tilt: params.droop,
        }
    }

    /// Same gait with every swing shrunk by `factor`
    pub fn damped(self, factor: f32) -> Self {
        Self {
            legs: self.legs.scaled(factor),
            arms: self.arms.scaled(factor),
            bounce: self.bounce * factor,
            sway: self.sway * factor,
            ..self
        }
    }

    pub fn period(&self) -> f32 {
        self.period
    }
}

impl MotionStrategy for Gait {
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
        gait_driver(joint)
    }

    fn posture(&self, cycle: f32) -> Posture {
        let mut posture = Posture::neutral()
            .with(Channel::RootY, bounce(cycle, self.bounce))
            .with(Channel::RootZ, sway(cycle, self.sway))
            .with(Channel::TrunkLean, self.trunk_lean)
            .with(Channel::HeadTilt, self.head_tilt);

        for side in Side::LIMBS {
            let (hip, knee) = self.legs.angles(cycle, side);
            let (shoulder, elbow) = self.arms.angles(cycle, side);
            // Hang the arms from the leaning trunk rather than with it
            posture = posture.with_side(side, shoulder + self.trunk_lean, elbow, hip, knee);
        }
        posture
    }

    fn contact(&self) -> Contact {
        Contact::Free
    }
}

fn gait_driver(joint: Joint) -> JointDriver {
    match joint {
        Joint::Pelvis => JointDriver::Root,
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

/// Half-speed stepping while the heading eases round by half a turn
#[derive(Debug, Clone)]
pub struct TurnAround {
    gait: Gait,
    /// Gait cycles stepped during the turn
    steps: f32,
}

impl TurnAround {
    pub fn new(params: &StyleParams, tempo: f32) -> Self {
        Self {
            gait: Gait::walk(params, tempo).damped(0.5),
            steps: 2.0,
        }
    }
}

impl MotionStrategy for TurnAround {
    fn kind(&self) -> MotionKind {
        MotionKind::TurnAround
    }

    fn timing(&self) -> Timing {
        Timing {
            period: self.gait.period() * self.steps,
            playback: Playback::Once,
        }
    }

    fn driver(&self, joint: Joint) -> JointDriver {
        gait_driver(joint)
    }

    fn posture(&self, cycle: f32) -> Posture {
        let step = (cycle * self.steps).rem_euclid(1.0);
        self.gait
            .posture(step)
            .with(Channel::Heading, PI * Ease::Cosine.apply(cycle))
    }
}
