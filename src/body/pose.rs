use super::joint::Joint;
use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};
use static_assertions::assert_eq_size;

/// One frame of the figure: exactly 15 marker positions in body-space units.
///
/// x points forward, y up and z to the figure's left. A pose is a value:
/// every frame produces a new one, nothing mutates it after assembly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    points: [Vec3; Joint::COUNT],
}

assert_eq_size!(Pose, [f32; Joint::COUNT * 3]);

impl Pose {
    pub const fn from_points(points: [Vec3; Joint::COUNT]) -> Self {
        Self { points }
    }

    /// Always 15
    #[inline]
    pub const fn len(&self) -> usize {
        Joint::COUNT
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        false
    }

    #[inline]
    pub fn get(&self, joint: Joint) -> Vec3 {
        self.points[joint.index()]
    }

    #[inline]
    pub fn points(&self) -> &[Vec3; Joint::COUNT] {
        &self.points
    }

    pub fn iter(&self) -> impl Iterator<Item = (Joint, Vec3)> + '_ {
        Joint::ALL.iter().map(move |&j| (j, self.points[j.index()]))
    }

    /// Euclidean distance between two markers
    pub fn distance(&self, a: Joint, b: Joint) -> f32 {
        self.get(a).distance(self.get(b))
    }

    /// Return a new pose with every marker moved by `offset`
    pub fn translated(self, offset: Vec3) -> Self {
        Self {
            points: self.points.map(|p| p + offset),
        }
    }

    /// Orthographic projection for 2D renderers.
    ///
    /// `view_yaw` turns the camera about the vertical axis: 0 looks at the
    /// figure's left side (x to the right of the screen, y up), PI/2 looks
    /// at its front.
    pub fn project(&self, view_yaw: f32) -> [Vec2; Joint::COUNT] {
        let view = Quat::from_rotation_y(-view_yaw);
        self.points.map(|p| {
            let v = view * p;
            Vec2::new(v.x, v.y)
        })
    }

    /// Projected markers as `[x0, y0, x1, y1, ...]` (30 floats)
    pub fn project_flat(&self, view_yaw: f32) -> Vec<f32> {
        bytemuck::cast_slice(&self.project(view_yaw)).to_vec()
    }

    /// Side-view `(x, y)` pairs
    pub fn to_xy(&self) -> [Vec2; Joint::COUNT] {
        self.points.map(|p| p.truncate())
    }

    /// Flat `[x0, y0, z0, x1, ...]` view for upload to a renderer
    pub fn as_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.points)
    }

    pub fn is_finite(&self) -> bool {
        self.points.iter().all(|p| p.is_finite())
    }

    /// Lowest y over the given markers
    pub fn min_y(&self, joints: &[Joint]) -> f32 {
        joints
            .iter()
            .map(|&j| self.points[j.index()].y)
            .fold(f32::INFINITY, f32::min)
    }
}
