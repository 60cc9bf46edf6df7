//! Body representation: joint identities, angle-space postures, marker poses
//! and keyframe tracks.
//!
//! ## Key Concepts
//!
//! - **Joint**: the 15 markers in fixed output order, with parent links
//! - **Posture**: joint angles plus root offsets; forward kinematics preserves bone lengths
//! - **Pose**: the 15 marker positions handed to a renderer
//! - **KeyframeTrack**: eased, optionally staggered interpolation between keyframes

pub mod clip;
pub mod joint;
pub mod pose;
pub mod posture;

pub use clip::*;
pub use joint::*;
pub use pose::*;
pub use posture::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PoseResult;
    use crate::math::Ease;
    use crate::skeleton::Proportions;
    use glam::Vec3;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn assert_lengths(points: &[Vec3; Joint::COUNT], proportions: &Proportions) {
        for (parent, child, len) in proportions.segment_lengths() {
            let actual = points[parent.index()].distance(points[child.index()]);
            assert!(
                (actual - len).abs() < 1e-5,
                "{} -> {} stretched: expected {}, got {}",
                parent.name(),
                child.name(),
                len,
                actual
            );
        }
    }

    #[test]
    fn test_joint_order_and_parents() {
        for (i, joint) in Joint::ALL.iter().enumerate() {
            assert_eq!(joint.index(), i);
        }
        assert_eq!(Joint::Pelvis.parent(), None);
        assert_eq!(Joint::LeftWrist.parent(), Some(Joint::LeftElbow));
        assert_eq!(Joint::RightAnkle.parent(), Some(Joint::RightKnee));

        // Every non-root joint appears exactly once as a bone child
        for joint in Joint::ALL {
            let as_child = BONES.iter().filter(|b| b.child == joint).count();
            let expected = if joint == Joint::Pelvis { 0 } else { 1 };
            assert_eq!(as_child, expected, "{}", joint.name());
            if let Some(bone) = BONES.iter().find(|b| b.child == joint) {
                assert_eq!(Some(bone.parent), joint.parent());
            }
        }
    }

    #[test]
    fn test_side_helpers() {
        for side in Side::LIMBS {
            assert_eq!(Joint::wrist(side).side(), side);
            assert_eq!(Joint::knee(side).side(), side);
        }
        assert_eq!(Joint::Head.side(), Side::Centre);
        assert_eq!(Side::Right.limb_index(), 1);
    }

    #[test]
    fn test_neutral_posture_geometry() {
        let p = Proportions::default();
        let points = Posture::neutral().solve(&p);

        assert_eq!(points[Joint::Pelvis.index()], Vec3::ZERO);
        assert!((points[Joint::Neck.index()].y - p.spine).abs() < 1e-6);
        // Arms hang straight down from the shoulders
        let shoulder = points[Joint::LeftShoulder.index()];
        let wrist = points[Joint::LeftWrist.index()];
        assert!((shoulder.y - wrist.y - p.arm_reach()).abs() < 1e-5);
        assert!((shoulder.x - wrist.x).abs() < 1e-5);
        // Ankles sit one leg length below the pelvis
        assert!((points[Joint::RightAnkle.index()].y + p.standing_height()).abs() < 1e-5);
    }

    #[test]
    fn test_swing_directions() {
        let p = Proportions::default();
        let forward = Posture::neutral().with_limbs(0.5, 0.0, 0.5, 0.0).solve(&p);
        // Forward swing moves elbows and knees to +x
        assert!(forward[Joint::LeftElbow.index()].x > 0.0);
        assert!(forward[Joint::RightKnee.index()].x > 0.0);

        let flexed = Posture::neutral().with_limbs(0.0, FRAC_PI_2, 0.0, FRAC_PI_2).solve(&p);
        // Elbow flexion brings the hand forward, knee flexion folds the shin back
        assert!(flexed[Joint::LeftWrist.index()].x > 0.1);
        assert!(flexed[Joint::LeftAnkle.index()].x < -0.1);
    }

    #[test]
    fn test_forward_kinematics_preserves_lengths() {
        let p = Proportions::default();
        let posture = Posture::neutral()
            .with(Channel::BodyPitch, 2.1)
            .with(Channel::TrunkLean, -0.7)
            .with(Channel::HeadTilt, 0.4)
            .with_side(Side::Left, 1.3, 2.0, -0.4, 1.1)
            .with_side(Side::Right, -0.9, 0.2, 1.7, 2.5);
        assert_lengths(&posture.solve(&p), &p);
    }

    #[test]
    fn test_body_pitch_rotates_whole_figure() {
        let p = Proportions::default();
        let lying = Posture::neutral().with(Channel::BodyPitch, -FRAC_PI_2).solve(&p);
        // Lying on the back: head towards -x, feet towards +x, all at pelvis height
        assert!(lying[Joint::Head.index()].x < -0.6);
        assert!(lying[Joint::LeftAnkle.index()].x > 0.8);
        assert!(lying[Joint::Head.index()].y.abs() < 1e-5);

        let flipped = Posture::neutral().with(Channel::BodyPitch, PI).solve(&p);
        assert!(flipped[Joint::Head.index()].y < 0.0);
    }

    #[test]
    fn test_pose_projection() {
        let points = Posture::neutral().solve(&Proportions::default());
        let pose = Pose::from_points(points);
        assert_eq!(pose.len(), 15);

        let side = pose.project(0.0);
        for (a, b) in side.iter().zip(pose.to_xy().iter()) {
            assert!(a.distance(*b) < 1e-6);
        }

        // From the front, the lateral axis becomes screen x
        let front = pose.project(FRAC_PI_2);
        let l = front[Joint::LeftShoulder.index()];
        let r = front[Joint::RightShoulder.index()];
        assert!((l.x - r.x).abs() > 0.3);
        assert!((l.y - r.y).abs() < 1e-6);
    }

    #[test]
    fn test_pose_flat_view() {
        let pose = Pose::from_points([Vec3::new(1.0, 2.0, 3.0); Joint::COUNT]);
        let flat = pose.as_flat();
        assert_eq!(flat.len(), 45);
        assert_eq!(&flat[0..3], &[1.0, 2.0, 3.0]);

        let side = pose.project_flat(0.0);
        assert_eq!(side.len(), 30);
        assert_eq!(&side[0..2], &[1.0, 2.0]);
    }

    #[test]
    fn test_pose_translation_moves_every_marker() {
        let pose = Pose::from_points(Posture::neutral().solve(&Proportions::default()));
        let v = Vec3::new(0.3, -1.2, 2.0);
        let moved = pose.translated(v);
        for joint in Joint::ALL {
            assert!((moved.get(joint) - pose.get(joint) - v).length() < 1e-6);
        }
    }

    fn track(times: &[f32]) -> PoseResult<KeyframeTrack<Posture>> {
        let frames = times
            .iter()
            .enumerate()
            .map(|(i, &t)| Keyframe::new(t, Posture::neutral().with(Channel::TrunkLean, i as f32)))
            .collect();
        KeyframeTrack::new(frames, Ease::Linear)
    }

    #[test]
    fn test_keyframe_validation() {
        assert!(track(&[]).is_err());
        assert!(track(&[0.0, 0.0]).is_err());
        assert!(track(&[0.0, 1.0, 0.5]).is_err());
        assert!(track(&[0.0, f32::NAN]).is_err());
        assert!(track(&[0.3]).is_ok());
        assert!(track(&[0.0, 0.5, 1.0]).is_ok());
    }

    #[test]
    fn test_keyframe_sampling_clamps() {
        let track = track(&[1.0, 2.0, 4.0]).unwrap();
        assert_eq!(track.sample(-5.0).get(Channel::TrunkLean), 0.0);
        assert_eq!(track.sample(1.0).get(Channel::TrunkLean), 0.0);
        assert_eq!(track.sample(4.0).get(Channel::TrunkLean), 2.0);
        assert_eq!(track.sample(100.0).get(Channel::TrunkLean), 2.0);
        assert_eq!(track.sample(f32::NAN).get(Channel::TrunkLean), 0.0);

        assert!((track.sample(1.5).get(Channel::TrunkLean) - 0.5).abs() < 1e-6);
        assert!((track.sample(3.0).get(Channel::TrunkLean) - 1.5).abs() < 1e-6);
        assert!((track.sample(2.0).get(Channel::TrunkLean) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_single_keyframe_is_constant() {
        let track = track(&[0.5]).unwrap();
        for t in [-1.0, 0.5, 3.0] {
            assert_eq!(track.sample(t), Posture::neutral());
        }
    }

    #[test]
    fn test_cosine_ease_between_keyframes() {
        let frames = vec![
            Keyframe::new(0.0, Posture::neutral()),
            Keyframe::new(1.0, Posture::neutral().with(Channel::HeadTilt, 1.0)),
        ];
        let track = KeyframeTrack::new(frames, Ease::Cosine).unwrap();
        assert!((track.sample(0.5).get(Channel::HeadTilt) - 0.5).abs() < 1e-6);
        assert!(track.sample(0.2).get(Channel::HeadTilt) < 0.2);
        assert!(track.sample(0.8).get(Channel::HeadTilt) > 0.8);
    }

    #[test]
    fn test_staggered_channels() {
        let target = Posture::neutral()
            .with(Channel::HeadTilt, 1.0)
            .with(Channel::LeftKnee, 1.0);
        let frames = vec![
            Keyframe::new(0.0, Posture::neutral()),
            Keyframe::new(2.0, target),
        ];
        let track = KeyframeTrack::new(frames, Ease::Linear)
            .unwrap()
            .with_stagger(Channel::HeadTilt.index(), Window::new(0.0, 0.5))
            .unwrap()
            .with_stagger(Channel::LeftKnee.index(), Window::new(0.5, 0.5))
            .unwrap();

        // Head finishes by the midpoint, knee has not started yet
        let mid = track.sample(1.0);
        assert!((mid.get(Channel::HeadTilt) - 1.0).abs() < 1e-6);
        assert!(mid.get(Channel::LeftKnee).abs() < 1e-6);

        let early = track.sample(0.5);
        assert!((early.get(Channel::HeadTilt) - 0.5).abs() < 1e-5);

        // Both land on the final keyframe
        assert_eq!(track.sample(2.0), target);
        assert_eq!(track.sample(0.0), Posture::neutral());
    }

    #[test]
    fn test_stagger_validation() {
        let base = track(&[0.0, 1.0]).unwrap();
        assert!(base.clone().with_stagger(99, Window::FULL).is_err());
        assert!(base.clone().with_stagger(0, Window::new(0.6, 0.6)).is_err());
        assert!(base.clone().with_stagger(0, Window::new(0.2, 0.0)).is_err());
        assert!(base.with_stagger(0, Window::new(0.25, 0.75)).is_ok());
    }
}
