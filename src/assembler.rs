//! Turns a motion's local description into the final 15 markers.
//!
//! Pipeline per frame:
//! 1. normalise phase to a cycle position
//! 2. strategy posture at that position
//! 3. forward kinematics over the body's proportions
//! 4. per-joint driver dispatch: two-bone IK for reach-driven arms,
//!    forward kinematics for the rest (pelvis-local frame)
//! 5. heading about the pelvis, then root translation, applied to every marker
//! 6. floor contact as a whole-body vertical shift
//! 7. optional seeded jitter

use crate::body::{Channel, Joint, Pose, Posture, Side};
use crate::error::PoseResult;
use crate::ik::{solve_two_bone, TwoBoneSolution};
use crate::motion::{Contact, JointDriver, Motion};
use crate::skeleton::{Proportions, SkeletonModel};
use crate::style::{Jitter, Style, MAX_JITTER};
use glam::{Quat, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Elbows from the previous frame, per limb side, for IK branch continuity
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReachMemory {
    elbows: [Option<Vec3>; 2],
}

impl ReachMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elbow(&self, side: Side) -> Option<Vec3> {
        self.elbows[side.limb_index()]
    }

    pub fn clear(&mut self) {
        self.elbows = [None; 2];
    }
}

/// Shared, style-bound assembly step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseAssembler {
    proportions: Proportions,
    jitter: Option<Jitter>,
}

impl PoseAssembler {
    /// Jitter that fails validation is dropped with a warning
    pub fn new(style: &Style) -> Self {
        let jitter = style.jitter.filter(|jitter| match jitter.validate() {
            Ok(()) => true,
            Err(err) => {
                log::warn!("Ignoring jitter: {}", err);
                false
            }
        });
        Self {
            proportions: SkeletonModel::proportions(style),
            jitter,
        }
    }

    /// Assembler for hand-specified proportions, without jitter
    pub fn with_proportions(proportions: Proportions) -> PoseResult<Self> {
        proportions.validate()?;
        Ok(Self {
            proportions,
            jitter: None,
        })
    }

    pub fn proportions(&self) -> &Proportions {
        &self.proportions
    }

    /// Pure assembly: no IK history, so reach branches use the preferred side
    pub fn assemble(&self, phase: f32, motion: &Motion) -> Pose {
        let mut memory = ReachMemory::new();
        self.assemble_with_memory(phase, motion, &mut memory)
    }

    pub fn assemble_with_memory(&self, phase: f32, motion: &Motion, memory: &mut ReachMemory) -> Pose {
        let cycle = motion.cycle_at(phase);
        let strategy = motion.strategy();
        let posture = strategy.posture(cycle);

        let fk = posture.solve(&self.proportions);
        let local = self.resolve_drivers(fk, motion, cycle, memory);

        let pose = self.place(local, &posture);
        let pose = apply_contact(pose, strategy.contact());
        self.apply_jitter(pose, cycle)
    }

    /// Forward kinematics plus the global transform, no contact or jitter
    pub fn pose_from_posture(&self, posture: &Posture) -> Pose {
        self.place(posture.solve(&self.proportions), posture)
    }

    /// Pelvis-local marker for every joint, chosen by its driver
    fn resolve_drivers(
        &self,
        fk: [Vec3; Joint::COUNT],
        motion: &Motion,
        cycle: f32,
        memory: &mut ReachMemory,
    ) -> [Vec3; Joint::COUNT] {
        let reach = Side::LIMBS.map(|side| self.solve_reach(&fk, motion, cycle, side, memory));

        let mut local = fk;
        for joint in Joint::ALL {
            local[joint.index()] = match motion.driver(joint) {
                // Root offsets are applied in `place`
                JointDriver::Root | JointDriver::Trajectory => Vec3::ZERO,
                JointDriver::Rest | JointDriver::Swing | JointDriver::Keyframe => fk[joint.index()],
                JointDriver::Reach => {
                    let side = joint.side();
                    match reach[side.limb_index()] {
                        Some(solution) if joint == Joint::elbow(side) => solution.mid,
                        Some(solution) => solution.end,
                        None => fk[joint.index()],
                    }
                }
            };
        }
        local
    }

    fn solve_reach(
        &self,
        fk: &[Vec3; Joint::COUNT],
        motion: &Motion,
        cycle: f32,
        side: Side,
        memory: &mut ReachMemory,
    ) -> Option<TwoBoneSolution> {
        if motion.driver(Joint::wrist(side)) != JointDriver::Reach {
            return None;
        }
        let strategy = motion.strategy();
        let shoulder = fk[Joint::shoulder(side).index()];
        let target = strategy.reach_target(side, cycle, shoulder)?;

        let solution = solve_two_bone(
            shoulder,
            target,
            self.proportions.upper_arm,
            self.proportions.forearm,
            strategy.bend_normal(side),
            memory.elbow(side),
        );
        memory.elbows[side.limb_index()] = Some(solution.mid);
        Some(solution)
    }

    /// Heading about the pelvis, then translation to standing height plus
    /// root offsets. Every marker goes through the same transform.
    fn place(&self, local: [Vec3; Joint::COUNT], posture: &Posture) -> Pose {
        let heading = Quat::from_rotation_y(posture.get(Channel::Heading));
        let root = Vec3::new(0.0, self.proportions.standing_height(), 0.0) + posture.root_offset();
        Pose::from_points(local.map(|p| heading * p + root))
    }

    /// Noise is keyed on the normalised cycle, so wrapped and held phases
    /// repeat the same offsets
    fn apply_jitter(&self, pose: Pose, cycle: f32) -> Pose {
        let Some(jitter) = self.jitter else {
            return pose;
        };
        if !(jitter.amplitude > 0.0 && jitter.amplitude <= MAX_JITTER) {
            return pose;
        }

        let a = jitter.amplitude;
        let mut points = *pose.points();
        for joint in Joint::ALL {
            let mut rng = StdRng::seed_from_u64(jitter_seed(jitter.seed, cycle, joint));
            points[joint.index()] += Vec3::new(
                rng.random_range(-a..=a),
                rng.random_range(-a..=a),
                rng.random_range(-a..=a),
            );
        }
        Pose::from_points(points)
    }
}

fn apply_contact(pose: Pose, contact: Contact) -> Pose {
    let floor = match contact {
        Contact::Free => return pose,
        Contact::Feet => pose.min_y(&[Joint::LeftAnkle, Joint::RightAnkle]),
        Contact::Lowest => pose.min_y(&Joint::ALL),
    };
    if floor.is_finite() {
        pose.translated(Vec3::new(0.0, -floor, 0.0))
    } else {
        pose
    }
}

fn jitter_seed(seed: u64, cycle: f32, joint: Joint) -> u64 {
    let cycle_bits = u64::from(cycle.to_bits());
    seed ^ cycle_bits.rotate_left(29) ^ (joint.index() as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// One-off assembly for a given style
pub fn assemble(phase: f32, style: &Style, motion: &Motion) -> Pose {
    PoseAssembler::new(style).assemble(phase, motion)
}
