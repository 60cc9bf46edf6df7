//! Skeleton model: segment lengths and the neutral standing pose.
//!
//! Proportions are a pure function of `Style`. They are resolved once when an
//! animator is created and stay fixed for its lifetime.

use crate::body::{Joint, Pose, Posture, Segment, BONES};
use crate::error::{PoseError, PoseResult};
use crate::skeleton_constants::*;
use crate::style::{Build, Gender, Style};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Segment lengths of one body, in body-space units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Proportions {
    pub spine: f32,
    pub head: f32,
    pub clavicle: f32,
    pub upper_arm: f32,
    pub forearm: f32,
    pub pelvis: f32,
    pub thigh: f32,
    pub shin: f32,
}

impl Default for Proportions {
    fn default() -> Self {
        Self {
            spine: DEFAULT_SPINE,
            head: DEFAULT_HEAD,
            clavicle: DEFAULT_CLAVICLE,
            upper_arm: DEFAULT_UPPER_ARM,
            forearm: DEFAULT_FOREARM,
            pelvis: DEFAULT_PELVIS,
            thigh: DEFAULT_THIGH,
            shin: DEFAULT_SHIN,
        }
    }
}

impl Proportions {
    pub fn length(&self, segment: Segment) -> f32 {
        match segment {
            Segment::Spine => self.spine,
            Segment::Head => self.head,
            Segment::Clavicle => self.clavicle,
            Segment::UpperArm => self.upper_arm,
            Segment::Forearm => self.forearm,
            Segment::Pelvis => self.pelvis,
            Segment::Thigh => self.thigh,
            Segment::Shin => self.shin,
        }
    }

    /// Length of the bone joining `parent` to `child`, if they are adjacent
    pub fn bone_length(&self, parent: Joint, child: Joint) -> Option<f32> {
        BONES
            .iter()
            .find(|b| b.parent == parent && b.child == child)
            .map(|b| self.length(b.segment))
    }

    /// `(parent, child, length)` for every bone of the figure
    pub fn segment_lengths(&self) -> impl Iterator<Item = (Joint, Joint, f32)> + '_ {
        BONES
            .iter()
            .map(move |b| (b.parent, b.child, self.length(b.segment)))
    }

    /// Pelvis height when standing straight with ankles on the floor
    pub fn standing_height(&self) -> f32 {
        self.thigh + self.shin
    }

    /// Full reach of one arm (shoulder to wrist)
    pub fn arm_reach(&self) -> f32 {
        self.upper_arm + self.forearm
    }

    pub fn scaled(self, factor: f32) -> Self {
        Self {
            spine: self.spine * factor,
            head: self.head * factor,
            clavicle: self.clavicle * factor,
            upper_arm: self.upper_arm * factor,
            forearm: self.forearm * factor,
            pelvis: self.pelvis * factor,
            thigh: self.thigh * factor,
            shin: self.shin * factor,
        }
    }

    pub fn validate(&self) -> PoseResult<()> {
        for segment in Segment::ALL {
            let len = self.length(segment);
            if !len.is_finite() || len < 0.0 {
                return Err(PoseError::parameter(format!(
                    "{:?} length must be a non-negative number, got {}",
                    segment, len
                )));
            }
        }
        Ok(())
    }
}

/// Rest geometry of the figure for a given style.
pub struct SkeletonModel;

impl SkeletonModel {
    pub fn proportions(style: &Style) -> Proportions {
        let (clavicle, pelvis, scale) = match style.gender {
            Gender::Neutral => (1.0, 1.0, 1.0),
            Gender::Male => MALE_SCALE,
            Gender::Female => FEMALE_SCALE,
        };
        let (build_clavicle, build_pelvis) = match style.weight {
            Build::Light => (1.0, 1.0),
            Build::Heavy => (HEAVY_CLAVICLE_SCALE, HEAVY_PELVIS_SCALE),
        };

        let base = Proportions::default();
        Proportions {
            clavicle: base.clavicle * clavicle * build_clavicle,
            pelvis: base.pelvis * pelvis * build_pelvis,
            ..base
        }
        .scaled(scale)
    }

    /// Neutral standing pose: arms hanging, ankles on y = 0
    pub fn rest_pose(style: &Style) -> Pose {
        let proportions = Self::proportions(style);
        let root = Vec3::new(0.0, proportions.standing_height(), 0.0);
        Pose::from_points(Posture::neutral().solve(&proportions)).translated(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Affect;

    #[test]
    fn test_rest_pose_matches_proportions() {
        for style in [
            Style::default(),
            Style {
                weight: Build::Heavy,
                gender: Gender::Female,
                ..Style::default()
            },
            Style {
                gender: Gender::Male,
                affect: Affect::Sad,
                ..Style::default()
            },
        ] {
            let proportions = SkeletonModel::proportions(&style);
            let pose = SkeletonModel::rest_pose(&style);
            for (parent, child, len) in proportions.segment_lengths() {
                let actual = pose.distance(parent, child);
                assert!(
                    (actual - len).abs() < 1e-5,
                    "{} -> {}: expected {}, got {}",
                    parent.name(),
                    child.name(),
                    len,
                    actual
                );
            }
        }
    }

    #[test]
    fn test_rest_pose_stands_on_floor() {
        let pose = SkeletonModel::rest_pose(&Style::default());
        assert!(pose.get(Joint::LeftAnkle).y.abs() < 1e-5);
        assert!(pose.get(Joint::RightAnkle).y.abs() < 1e-5);
        assert!(pose.get(Joint::Head).y > pose.get(Joint::Neck).y);
        assert!(pose.get(Joint::Neck).y > pose.get(Joint::Pelvis).y);
        // Left side is +z
        assert!(pose.get(Joint::LeftShoulder).z > 0.0);
        assert!(pose.get(Joint::RightHip).z < 0.0);
    }

    #[test]
    fn test_heavy_build_is_wider() {
        let light = SkeletonModel::proportions(&Style::default());
        let heavy = SkeletonModel::proportions(&Style {
            weight: Build::Heavy,
            ..Style::default()
        });
        assert!(heavy.clavicle > light.clavicle);
        assert!(heavy.pelvis > light.pelvis);
        assert_eq!(heavy.thigh, light.thigh);
    }

    #[test]
    fn test_gender_proportions() {
        let female = SkeletonModel::proportions(&Style {
            gender: Gender::Female,
            ..Style::default()
        });
        let male = SkeletonModel::proportions(&Style {
            gender: Gender::Male,
            ..Style::default()
        });
        assert!(female.pelvis > male.pelvis);
        assert!(male.clavicle > female.clavicle);
        assert!(female.spine < male.spine);
    }

    #[test]
    fn test_bone_length_lookup() {
        let p = Proportions::default();
        assert_eq!(p.bone_length(Joint::LeftHip, Joint::LeftKnee), Some(p.thigh));
        assert_eq!(p.bone_length(Joint::Neck, Joint::Head), Some(p.head));
        // Not adjacent, or reversed
        assert_eq!(p.bone_length(Joint::Head, Joint::Neck), None);
        assert_eq!(p.bone_length(Joint::Pelvis, Joint::Head), None);
        assert_eq!(p.segment_lengths().count(), Joint::COUNT - 1);
    }

    #[test]
    fn test_validate_rejects_negative_lengths() {
        let p = Proportions {
            forearm: -0.1,
            ..Proportions::default()
        };
        assert!(p.validate().is_err());
        let p = Proportions {
            shin: f32::NAN,
            ..Proportions::default()
        };
        assert!(p.validate().is_err());
        assert!(Proportions::default().validate().is_ok());
    }
}
