use serde::{Deserialize, Serialize};
use static_assertions::const_assert_eq;

/// Body side of a joint or limb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
    Centre,
}

impl Side {
    /// The two limb sides, left first
    pub const LIMBS: [Side; 2] = [Side::Left, Side::Right];

    /// Lateral sign: left is +z, right is -z
    #[inline]
    pub const fn sign(self) -> f32 {
        match self {
            Side::Left => 1.0,
            Side::Right => -1.0,
            Side::Centre => 0.0,
        }
    }

    /// Index into per-limb arrays (left = 0, right = 1)
    #[inline]
    pub const fn limb_index(self) -> usize {
        match self {
            Side::Right => 1,
            _ => 0,
        }
    }
}

/// One of the 15 point-light markers.
/// Discriminants give the fixed output order of every `Pose`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Joint {
    Head = 0,
    Neck = 1,

    LeftShoulder = 2,
    RightShoulder = 3,
    LeftElbow = 4,
    RightElbow = 5,
    LeftWrist = 6,
    RightWrist = 7,

    // Root
    Pelvis = 8,

    LeftHip = 9,
    RightHip = 10,
    LeftKnee = 11,
    RightKnee = 12,
    LeftAnkle = 13,
    RightAnkle = 14,
}

impl Joint {
    /// Total number of markers in the figure
    pub const COUNT: usize = 15;

    /// Convert to array index
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// All joints in output order
    pub const ALL: [Joint; Self::COUNT] = [
        Joint::Head,
        Joint::Neck,
        Joint::LeftShoulder,
        Joint::RightShoulder,
        Joint::LeftElbow,
        Joint::RightElbow,
        Joint::LeftWrist,
        Joint::RightWrist,
        Joint::Pelvis,
        Joint::LeftHip,
        Joint::RightHip,
        Joint::LeftKnee,
        Joint::RightKnee,
        Joint::LeftAnkle,
        Joint::RightAnkle,
    ];

    /// Parent joint in the skeleton tree (None for the pelvis root)
    pub const fn parent(self) -> Option<Joint> {
        match self {
            Joint::Pelvis => None,
            Joint::Neck | Joint::LeftHip | Joint::RightHip => Some(Joint::Pelvis),
            Joint::Head | Joint::LeftShoulder | Joint::RightShoulder => Some(Joint::Neck),
            Joint::LeftElbow => Some(Joint::LeftShoulder),
            Joint::RightElbow => Some(Joint::RightShoulder),
            Joint::LeftWrist => Some(Joint::LeftElbow),
            Joint::RightWrist => Some(Joint::RightElbow),
            Joint::LeftKnee => Some(Joint::LeftHip),
            Joint::RightKnee => Some(Joint::RightHip),
            Joint::LeftAnkle => Some(Joint::LeftKnee),
            Joint::RightAnkle => Some(Joint::RightKnee),
        }
    }

    pub const fn side(self) -> Side {
        match self {
            Joint::LeftShoulder
            | Joint::LeftElbow
            | Joint::LeftWrist
            | Joint::LeftHip
            | Joint::LeftKnee
            | Joint::LeftAnkle => Side::Left,
            Joint::RightShoulder
            | Joint::RightElbow
            | Joint::RightWrist
            | Joint::RightHip
            | Joint::RightKnee
            | Joint::RightAnkle => Side::Right,
            _ => Side::Centre,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Joint::Head => "head",
            Joint::Neck => "neck",
            Joint::LeftShoulder => "left_shoulder",
            Joint::RightShoulder => "right_shoulder",
            Joint::LeftElbow => "left_elbow",
            Joint::RightElbow => "right_elbow",
            Joint::LeftWrist => "left_wrist",
            Joint::RightWrist => "right_wrist",
            Joint::Pelvis => "pelvis",
            Joint::LeftHip => "left_hip",
            Joint::RightHip => "right_hip",
            Joint::LeftKnee => "left_knee",
            Joint::RightKnee => "right_knee",
            Joint::LeftAnkle => "left_ankle",
            Joint::RightAnkle => "right_ankle",
        }
    }

    pub const fn shoulder(side: Side) -> Joint {
        match side {
            Side::Right => Joint::RightShoulder,
            _ => Joint::LeftShoulder,
        }
    }

    pub const fn elbow(side: Side) -> Joint {
        match side {
            Side::Right => Joint::RightElbow,
            _ => Joint::LeftElbow,
        }
    }

    pub const fn wrist(side: Side) -> Joint {
        match side {
            Side::Right => Joint::RightWrist,
            _ => Joint::LeftWrist,
        }
    }

    pub const fn hip(side: Side) -> Joint {
        match side {
            Side::Right => Joint::RightHip,
            _ => Joint::LeftHip,
        }
    }

    pub const fn knee(side: Side) -> Joint {
        match side {
            Side::Right => Joint::RightKnee,
            _ => Joint::LeftKnee,
        }
    }

    pub const fn ankle(side: Side) -> Joint {
        match side {
            Side::Right => Joint::RightAnkle,
            _ => Joint::LeftAnkle,
        }
    }
}

const_assert_eq!(Joint::COUNT, 15);

/// Rigid segment kinds. Left and right limbs share a length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Segment {
    Spine,
    Head,
    Clavicle,
    UpperArm,
    Forearm,
    Pelvis,
    Thigh,
    Shin,
}

impl Segment {
    pub const COUNT: usize = 8;

    pub const ALL: [Segment; Self::COUNT] = [
        Segment::Spine,
        Segment::Head,
        Segment::Clavicle,
        Segment::UpperArm,
        Segment::Forearm,
        Segment::Pelvis,
        Segment::Thigh,
        Segment::Shin,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Static bone definition: the parent/child joints and which segment length applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bone {
    pub parent: Joint,
    pub child: Joint,
    pub segment: Segment,
}

const fn bone(parent: Joint, child: Joint, segment: Segment) -> Bone {
    Bone {
        parent,
        child,
        segment,
    }
}

/// Every parent-child pair of the 15-joint tree.
pub const BONES: [Bone; Joint::COUNT - 1] = [
    bone(Joint::Pelvis, Joint::Neck, Segment::Spine),
    bone(Joint::Neck, Joint::Head, Segment::Head),
    bone(Joint::Neck, Joint::LeftShoulder, Segment::Clavicle),
    bone(Joint::Neck, Joint::RightShoulder, Segment::Clavicle),
    bone(Joint::LeftShoulder, Joint::LeftElbow, Segment::UpperArm),
    bone(Joint::RightShoulder, Joint::RightElbow, Segment::UpperArm),
    bone(Joint::LeftElbow, Joint::LeftWrist, Segment::Forearm),
    bone(Joint::RightElbow, Joint::RightWrist, Segment::Forearm),
    bone(Joint::Pelvis, Joint::LeftHip, Segment::Pelvis),
    bone(Joint::Pelvis, Joint::RightHip, Segment::Pelvis),
    bone(Joint::LeftHip, Joint::LeftKnee, Segment::Thigh),
    bone(Joint::RightHip, Joint::RightKnee, Segment::Thigh),
    bone(Joint::LeftKnee, Joint::LeftAnkle, Segment::Shin),
    bone(Joint::RightKnee, Joint::RightAnkle, Segment::Shin),
];
