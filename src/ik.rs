use crate::math::EPSILON;
use glam::Vec3;

/// Result of a two-bone solve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoBoneSolution {
    /// Middle joint (elbow or knee)
    pub mid: Vec3,
    /// End effector actually reached (wrist or ankle)
    pub end: Vec3,
    /// True when the requested target was out of reach and got clamped
    pub clamped: bool,
}

/// Solve a two-bone chain in closed form (law of cosines).
///
/// # Arguments
/// * `root` - Fixed proximal joint (shoulder or hip)
/// * `target` - Desired end effector position
/// * `upper` - Length of the first bone
/// * `lower` - Length of the second bone
/// * `bend_normal` - Normal of the plane the limb bends in; the preferred
///   middle joint lies on the `bend_normal x (target - root)` side
/// * `hint` - Previous frame's middle joint, used to stay on the same branch
///
/// # Returns
/// * `TwoBoneSolution` - Middle joint and reached end effector. Targets
///   closer than `|upper - lower|` or further than `upper + lower` are
///   clamped onto the nearest reachable sphere; the result is always finite
///   for finite `root`.
pub fn solve_two_bone(
    root: Vec3,
    target: Vec3,
    upper: f32,
    lower: f32,
    bend_normal: Vec3,
    hint: Option<Vec3>,
) -> TwoBoneSolution {
    let upper = sanitize_length(upper);
    let lower = sanitize_length(lower);
    let target = if target.is_finite() { target } else { root };

    let offset = target - root;
    let dist = offset.length();
    let dir = if dist > EPSILON {
        offset / dist
    } else {
        // No direction to aim along; hang the limb straight down
        Vec3::NEG_Y
    };

    // Clamp onto the reachable shell
    let max_reach = upper + lower;
    let min_reach = (upper - lower).abs();
    let reach = dist.clamp(min_reach, max_reach);
    let clamped = (reach - dist).abs() > EPSILON;
    if clamped {
        log::trace!(
            "IK target at distance {:.3} outside [{:.3}, {:.3}], clamping",
            dist,
            min_reach,
            max_reach
        );
    }
    let end = root + dir * reach;

    let perpendicular = bend_direction(bend_normal, dir);

    if reach < EPSILON {
        // Equal bones folded flat onto the root
        return TwoBoneSolution {
            mid: root + perpendicular * upper,
            end,
            clamped,
        };
    }

    // Distance along root->end to the foot of the middle joint, and the
    // perpendicular offset from the line
    let a = (upper * upper - lower * lower + reach * reach) / (2.0 * reach);
    let h = (upper * upper - a * a).max(0.0).sqrt();

    let base = root + dir * a;
    let preferred = base + perpendicular * h;
    let flipped = base - perpendicular * h;

    let mid = match hint {
        Some(prev) if prev.is_finite() && flipped.distance_squared(prev) < preferred.distance_squared(prev) => {
            flipped
        }
        _ => preferred,
    };

    TwoBoneSolution { mid, end, clamped }
}

#[inline]
fn sanitize_length(len: f32) -> f32 {
    if len.is_finite() {
        len.abs()
    } else {
        0.0
    }
}

/// Unit vector perpendicular to `dir` inside the bend plane
fn bend_direction(bend_normal: Vec3, dir: Vec3) -> Vec3 {
    let perpendicular = bend_normal.cross(dir);
    if perpendicular.length_squared() > EPSILON {
        perpendicular.normalize()
    } else {
        dir.any_orthonormal_vector()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    const UPPER: f32 = 0.30;
    const LOWER: f32 = 0.27;

    fn assert_chain(root: Vec3, solution: &TwoBoneSolution) {
        assert!(solution.mid.is_finite() && solution.end.is_finite());
        assert!(
            (root.distance(solution.mid) - UPPER).abs() < 1e-4,
            "Upper bone length changed: {}",
            root.distance(solution.mid)
        );
        assert!(
            (solution.mid.distance(solution.end) - LOWER).abs() < 1e-4,
            "Lower bone length changed: {}",
            solution.mid.distance(solution.end)
        );
    }

    #[test]
    fn test_two_bone_reachable_target() {
        let root = Vec3::new(0.0, 1.4, -0.18);
        let target = root + Vec3::new(0.0, 0.3, -0.2);

        let result = solve_two_bone(root, target, UPPER, LOWER, Vec3::NEG_X, None);

        assert!(!result.clamped);
        assert!(result.end.distance(target) < 1e-5);
        assert_chain(root, &result);
    }

    #[test]
    fn test_two_bone_unreachable_target() {
        // Target beyond max reach
        let root = Vec3::ZERO;
        let target = Vec3::new(0.0, 2.0, 0.0);

        let result = solve_two_bone(root, target, UPPER, LOWER, Vec3::X, None);

        assert!(result.clamped);
        // Wrist lands on the boundary sphere, pointing at the target
        assert!((result.end.length() - (UPPER + LOWER)).abs() < 1e-5);
        assert!(result.end.normalize().distance(Vec3::Y) < 1e-5);
        assert_chain(root, &result);
    }

    #[test]
    fn test_two_bone_target_too_close() {
        let root = Vec3::ZERO;
        let target = Vec3::new(0.01, 0.0, 0.0);

        let result = solve_two_bone(root, target, UPPER, LOWER, Vec3::Z, None);

        assert!(result.clamped);
        assert!((result.end.length() - (UPPER - LOWER)).abs() < 1e-5);
        assert_chain(root, &result);
    }

    #[test]
    fn test_two_bone_target_at_root() {
        let root = Vec3::new(0.5, 1.0, 0.0);
        let result = solve_two_bone(root, root, 0.3, 0.3, Vec3::X, None);

        assert!(result.mid.is_finite() && result.end.is_finite());
        assert!((root.distance(result.mid) - 0.3).abs() < 1e-5);
        assert!((result.mid.distance(result.end) - 0.3).abs() < 1e-5);
    }

    #[test]
    fn test_two_bone_degenerate_inputs() {
        let root = Vec3::ZERO;
        let nan = solve_two_bone(root, Vec3::splat(f32::NAN), UPPER, LOWER, Vec3::X, None);
        assert!(nan.mid.is_finite() && nan.end.is_finite());

        let zero_bone = solve_two_bone(root, Vec3::new(0.0, 1.0, 0.0), 0.0, LOWER, Vec3::X, None);
        assert!(zero_bone.mid.is_finite() && zero_bone.end.is_finite());
        assert!(zero_bone.mid.distance(root) < 1e-5);

        // Bend normal parallel to the limb still yields a valid elbow
        let parallel = solve_two_bone(root, Vec3::new(0.0, 0.4, 0.0), UPPER, LOWER, Vec3::Y, None);
        assert_chain(root, &parallel);
    }

    #[test]
    fn test_two_bone_preferred_bend_side() {
        let root = Vec3::ZERO;
        let target = Vec3::new(0.0, 0.4, 0.0);

        // X cross Y = Z, so the elbow bulges towards +z
        let result = solve_two_bone(root, target, UPPER, LOWER, Vec3::X, None);
        assert!(result.mid.z > 0.0);

        let result = solve_two_bone(root, target, UPPER, LOWER, Vec3::NEG_X, None);
        assert!(result.mid.z < 0.0);
    }

    #[test]
    fn test_two_bone_follows_hint_branch() {
        let root = Vec3::ZERO;
        let target = Vec3::new(0.0, 0.4, 0.0);

        let preferred = solve_two_bone(root, target, UPPER, LOWER, Vec3::X, None);
        let mirrored_hint = Vec3::new(preferred.mid.x, preferred.mid.y, -preferred.mid.z);
        let result = solve_two_bone(root, target, UPPER, LOWER, Vec3::X, Some(mirrored_hint));

        assert!(result.mid.z < 0.0, "should stay on the hinted branch");
        assert_chain(root, &result);

        // A hint on the preferred side keeps the preferred branch
        let same = solve_two_bone(root, target, UPPER, LOWER, Vec3::X, Some(preferred.mid));
        assert!(same.mid.distance(preferred.mid) < 1e-6);
    }

    #[test]
    fn test_two_bone_branch_is_continuous_along_a_path() {
        let root = Vec3::ZERO;
        let mut hint = None;
        let mut prev_mid: Option<Vec3> = None;
        for i in 0..=60 {
            let angle = i as f32 / 60.0 * std::f32::consts::TAU;
            let target = Vec3::new(0.0, 0.35 + 0.12 * angle.sin(), -0.2 + 0.12 * angle.cos());
            let result = solve_two_bone(root, target, UPPER, LOWER, Vec3::NEG_X, hint);
            if let Some(prev) = prev_mid {
                assert!(result.mid.distance(prev) < 0.1, "elbow jumped at step {}", i);
            }
            prev_mid = Some(result.mid);
            hint = Some(result.mid);
        }
    }
}
