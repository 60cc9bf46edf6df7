use super::joint::{Joint, Side};
use crate::math::sagittal;
use crate::skeleton::Proportions;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Scalar degrees of freedom of one frame.
///
/// Angles are radians in the sagittal plane; positive swings a limb forward,
/// positive elbow flexion brings the hand forward, positive knee flexion
/// folds the shin backward. Root channels are body-space offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Channel {
    RootX = 0,
    RootY = 1,
    RootZ = 2,
    /// Yaw about the vertical axis through the pelvis
    Heading = 3,
    /// Whole-body pitch about the pelvis (forward roll, lying down)
    BodyPitch = 4,
    /// Trunk lean relative to the legs
    TrunkLean = 5,
    HeadTilt = 6,
    LeftShoulder = 7,
    LeftElbow = 8,
    RightShoulder = 9,
    RightElbow = 10,
    LeftHip = 11,
    LeftKnee = 12,
    RightHip = 13,
    RightKnee = 14,
}

impl Channel {
    pub const COUNT: usize = 15;

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const ALL: [Channel; Self::COUNT] = [
        Channel::RootX,
        Channel::RootY,
        Channel::RootZ,
        Channel::Heading,
        Channel::BodyPitch,
        Channel::TrunkLean,
        Channel::HeadTilt,
        Channel::LeftShoulder,
        Channel::LeftElbow,
        Channel::RightShoulder,
        Channel::RightElbow,
        Channel::LeftHip,
        Channel::LeftKnee,
        Channel::RightHip,
        Channel::RightKnee,
    ];

    pub const fn shoulder(side: Side) -> Channel {
        match side {
            Side::Right => Channel::RightShoulder,
            _ => Channel::LeftShoulder,
        }
    }

    pub const fn elbow(side: Side) -> Channel {
        match side {
            Side::Right => Channel::RightElbow,
            _ => Channel::LeftElbow,
        }
    }

    pub const fn hip(side: Side) -> Channel {
        match side {
            Side::Right => Channel::RightHip,
            _ => Channel::LeftHip,
        }
    }

    pub const fn knee(side: Side) -> Channel {
        match side {
            Side::Right => Channel::RightKnee,
            _ => Channel::LeftKnee,
        }
    }
}

/// Local, angle-space description of a frame.
///
/// Forward kinematics over fixed segment lengths turns a posture into joint
/// positions, so any posture (including blends of postures) keeps every bone
/// at its configured length.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Posture {
    values: [f32; Channel::COUNT],
}

impl Posture {
    /// Standing straight, arms hanging, no root offset
    pub const fn neutral() -> Self {
        Self {
            values: [0.0; Channel::COUNT],
        }
    }

    #[inline]
    pub fn get(&self, channel: Channel) -> f32 {
        self.values[channel.index()]
    }

    #[inline]
    pub fn set(&mut self, channel: Channel, value: f32) {
        self.values[channel.index()] = value;
    }

    /// Return a new posture with the channel set (Functional Set)
    pub fn with(self, channel: Channel, value: f32) -> Self {
        let mut new_posture = self;
        new_posture.values[channel.index()] = value;
        new_posture
    }

    /// Set the shoulder/elbow/hip/knee channels of one side at once
    pub fn with_side(self, side: Side, shoulder: f32, elbow: f32, hip: f32, knee: f32) -> Self {
        self.with(Channel::shoulder(side), shoulder)
            .with(Channel::elbow(side), elbow)
            .with(Channel::hip(side), hip)
            .with(Channel::knee(side), knee)
    }

    /// Same limb angles on both sides
    pub fn with_limbs(self, shoulder: f32, elbow: f32, hip: f32, knee: f32) -> Self {
        self.with_side(Side::Left, shoulder, elbow, hip, knee)
            .with_side(Side::Right, shoulder, elbow, hip, knee)
    }

    #[inline]
    pub fn values(&self) -> &[f32; Channel::COUNT] {
        &self.values
    }

    pub fn root_offset(&self) -> Vec3 {
        Vec3::new(
            self.get(Channel::RootX),
            self.get(Channel::RootY),
            self.get(Channel::RootZ),
        )
    }

    /// Forward kinematics in the pelvis-centred body frame.
    ///
    /// Heading and root offsets are not applied here; the assembler applies
    /// them to all 15 points together.
    pub fn solve(&self, proportions: &Proportions) -> [Vec3; Joint::COUNT] {
        let mut points = [Vec3::ZERO; Joint::COUNT];

        let body = self.get(Channel::BodyPitch);
        let trunk = body + self.get(Channel::TrunkLean);

        let pelvis = Vec3::ZERO;
        let neck = pelvis + sagittal(trunk) * proportions.spine;
        points[Joint::Pelvis.index()] = pelvis;
        points[Joint::Neck.index()] = neck;
        points[Joint::Head.index()] =
            neck + sagittal(trunk + self.get(Channel::HeadTilt)) * proportions.head;

        for side in Side::LIMBS {
            // Pitch rotates about z, so lateral offsets are unaffected by it
            let lateral = Vec3::Z * side.sign();

            let shoulder = neck + lateral * proportions.clavicle;
            let upper_arm = trunk + PI - self.get(Channel::shoulder(side));
            let elbow = shoulder + sagittal(upper_arm) * proportions.upper_arm;
            let forearm = upper_arm - self.get(Channel::elbow(side));
            let wrist = elbow + sagittal(forearm) * proportions.forearm;

            let hip = pelvis + lateral * proportions.pelvis;
            let thigh = body + PI - self.get(Channel::hip(side));
            let knee = hip + sagittal(thigh) * proportions.thigh;
            let shin = thigh + self.get(Channel::knee(side));
            let ankle = knee + sagittal(shin) * proportions.shin;

            points[Joint::shoulder(side).index()] = shoulder;
            points[Joint::elbow(side).index()] = elbow;
            points[Joint::wrist(side).index()] = wrist;
            points[Joint::hip(side).index()] = hip;
            points[Joint::knee(side).index()] = knee;
            points[Joint::ankle(side).index()] = ankle;
        }

        points
    }
}
