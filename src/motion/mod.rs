//! Motion strategies: one per action, all sharing the same assembler.
//!
//! A strategy only describes local joint angles and reach targets as a
//! function of normalised cycle position. Proportions, global transforms and
//! phase bookkeeping live elsewhere.

mod jump;
mod keyframed;
mod locomotion;
mod wave;

pub use jump::Jump;
pub use keyframed::Keyframed;
pub use locomotion::{Gait, TurnAround};
pub use wave::{WaveHand, WavePattern, WaveProfile};

use crate::body::{Joint, Posture, Side};
use crate::config::MotionConfig;
use crate::error::{PoseError, PoseResult};
use crate::sequencer::{normalize_phase, Playback};
use crate::style::Style;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The supported actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MotionKind {
    Walk,
    Run,
    JumpUp,
    JumpForward,
    TurnAround,
    Bow,
    SitDown,
    LieDown,
    WaveHand,
    ForwardRoll,
}

impl MotionKind {
    pub const COUNT: usize = 10;

    pub const ALL: [MotionKind; Self::COUNT] = [
        MotionKind::Walk,
        MotionKind::Run,
        MotionKind::JumpUp,
        MotionKind::JumpForward,
        MotionKind::TurnAround,
        MotionKind::Bow,
        MotionKind::SitDown,
        MotionKind::LieDown,
        MotionKind::WaveHand,
        MotionKind::ForwardRoll,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            MotionKind::Walk => "walk",
            MotionKind::Run => "run",
            MotionKind::JumpUp => "jump-up",
            MotionKind::JumpForward => "jump-forward",
            MotionKind::TurnAround => "turn-around",
            MotionKind::Bow => "bow",
            MotionKind::SitDown => "sit-down",
            MotionKind::LieDown => "lie-down",
            MotionKind::WaveHand => "wave-hand",
            MotionKind::ForwardRoll => "forward-roll",
        }
    }

    /// Whether the action repeats or runs once and holds
    pub const fn playback(self) -> Playback {
        match self {
            MotionKind::Walk
            | MotionKind::Run
            | MotionKind::JumpUp
            | MotionKind::JumpForward
            | MotionKind::WaveHand => Playback::Loop,
            MotionKind::TurnAround
            | MotionKind::Bow
            | MotionKind::SitDown
            | MotionKind::LieDown
            | MotionKind::ForwardRoll => Playback::Once,
        }
    }
}

impl fmt::Display for MotionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MotionKind {
    type Err = PoseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        MotionKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| PoseError::UnknownMotionKind(s.to_string()))
    }
}

/// Period and end-of-cycle behaviour of a motion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    /// Seconds per cycle
    pub period: f32,
    pub playback: Playback,
}

/// Which primitive positions a joint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JointDriver {
    /// Root of the figure, placed by root offsets only
    Root,
    /// Carried rigidly by its parent segment
    Rest,
    /// Periodic limb swing
    Swing,
    /// Stage-shaped jump trajectory
    Trajectory,
    /// Keyframe interpolation
    Keyframe,
    /// Two-bone IK towards a target
    Reach,
}

/// Per-joint driver lookup, indexed by `Joint::index()`
pub type DriverTable = [JointDriver; Joint::COUNT];

/// How the figure meets the floor after the global transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Contact {
    /// Root height is taken as-is (bounce, flight)
    Free,
    /// The lower ankle rests on y = 0
    Feet,
    /// The lowest marker rests on y = 0
    Lowest,
}

/// Local joint motion for one action
pub trait MotionStrategy: Send + Sync + fmt::Debug {
    fn kind(&self) -> MotionKind;

    fn timing(&self) -> Timing;

    fn driver(&self, joint: Joint) -> JointDriver;

    /// Joint angles and root offsets at normalised cycle position
    fn posture(&self, cycle: f32) -> Posture;

    /// Wrist target in the pelvis-local frame for reach-driven arms
    fn reach_target(&self, _side: Side, _cycle: f32, _shoulder: Vec3) -> Option<Vec3> {
        None
    }

    /// Normal of the plane a reaching arm bends in
    fn bend_normal(&self, side: Side) -> Vec3 {
        match side {
            Side::Right => Vec3::NEG_X,
            _ => Vec3::X,
        }
    }

    fn contact(&self) -> Contact {
        Contact::Free
    }

    /// Root displacement accumulated by one full cycle
    fn travel_per_cycle(&self) -> Vec3 {
        Vec3::ZERO
    }
}

/// A strategy with its timing and driver table resolved
#[derive(Debug)]
pub struct Motion {
    strategy: Box<dyn MotionStrategy>,
    timing: Timing,
    drivers: DriverTable,
}

impl Motion {
    pub fn new(kind: MotionKind, style: &Style, config: &MotionConfig) -> PoseResult<Self> {
        style.validate()?;
        let config = config.validated()?;
        let params = style.params();

        let strategy: Box<dyn MotionStrategy> = match kind {
            MotionKind::Walk => Box::new(Gait::walk(&params, config.tempo)),
            MotionKind::Run => Box::new(Gait::run(&params, config.tempo)),
            MotionKind::TurnAround => Box::new(TurnAround::new(&params, config.tempo)),
            MotionKind::JumpUp => Box::new(Jump::up(&params, config.jump, config.tempo)),
            MotionKind::JumpForward => {
                Box::new(Jump::forward(&params, config.jump, config.tempo))
            }
            MotionKind::Bow => {
                Box::new(Keyframed::bow(&params, config.tempo)?.with_ease(config.ease))
            }
            MotionKind::SitDown => {
                Box::new(Keyframed::sit_down(&params, config.tempo)?.with_ease(config.ease))
            }
            MotionKind::LieDown => {
                Box::new(Keyframed::lie_down(&params, config.tempo)?.with_ease(config.ease))
            }
            MotionKind::ForwardRoll => {
                Box::new(Keyframed::forward_roll(&params, config.tempo)?.with_ease(config.ease))
            }
            MotionKind::WaveHand => Box::new(WaveHand::new(&params, config.wave, config.tempo)),
        };

        Self::from_strategy(strategy)
    }

    /// Wrap a custom strategy, checking its timing
    pub fn from_strategy(strategy: Box<dyn MotionStrategy>) -> PoseResult<Self> {
        let timing = strategy.timing();
        if !timing.period.is_finite() || timing.period <= 0.0 {
            return Err(PoseError::parameter(format!(
                "{} period must be positive, got {}",
                strategy.kind(),
                timing.period
            )));
        }
        let drivers = Joint::ALL.map(|joint| strategy.driver(joint));
        check_drivers(strategy.kind(), &drivers)?;

        Ok(Self {
            strategy,
            timing,
            drivers,
        })
    }

    #[inline]
    pub fn kind(&self) -> MotionKind {
        self.strategy.kind()
    }

    #[inline]
    pub fn timing(&self) -> Timing {
        self.timing
    }

    #[inline]
    pub fn period(&self) -> f32 {
        self.timing.period
    }

    #[inline]
    pub fn driver(&self, joint: Joint) -> JointDriver {
        self.drivers[joint.index()]
    }

    pub fn drivers(&self) -> &DriverTable {
        &self.drivers
    }

    pub fn strategy(&self) -> &dyn MotionStrategy {
        self.strategy.as_ref()
    }

    /// Normalised cycle position in `[0, 1]` for any phase in seconds
    pub fn cycle_at(&self, phase: f32) -> f32 {
        normalize_phase(phase, self.timing.period, self.timing.playback) / self.timing.period
    }
}

/// The pelvis alone is root-placed, and reach drives whole forearms
fn check_drivers(kind: MotionKind, drivers: &DriverTable) -> PoseResult<()> {
    for joint in Joint::ALL {
        let driver = drivers[joint.index()];
        let rooted = matches!(driver, JointDriver::Root | JointDriver::Trajectory);
        if rooted != (joint == Joint::Pelvis) {
            return Err(PoseError::parameter(format!(
                "{}: {} cannot be driven by {:?}",
                kind,
                joint.name(),
                driver
            )));
        }
    }
    for side in Side::LIMBS {
        let elbow = drivers[Joint::elbow(side).index()] == JointDriver::Reach;
        let wrist = drivers[Joint::wrist(side).index()] == JointDriver::Reach;
        if elbow != wrist {
            return Err(PoseError::parameter(format!(
                "{}: reach must drive both {} and {}",
                kind,
                Joint::elbow(side).name(),
                Joint::wrist(side).name()
            )));
        }
    }
    let stray = Joint::ALL.into_iter().find(|&joint| {
        drivers[joint.index()] == JointDriver::Reach
            && !Side::LIMBS
                .iter()
                .any(|&side| joint == Joint::elbow(side) || joint == Joint::wrist(side))
    });
    match stray {
        Some(joint) => Err(PoseError::parameter(format!(
            "{}: only arms can reach, not {}",
            kind,
            joint.name()
        ))),
        None => Ok(()),
    }
}
