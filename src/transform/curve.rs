//! Parametric curve transforms: piecewise cubic Bézier paths and straight
//! line segments, both driven by a scalar parameter in `[0, 1]`.

use glam::{Mat4, Vec3, Vec4};

/// Cubic Bézier basis, column-major. The weight vector for a local
/// parameter `u` is `Bᵀ · [u³ u² u 1]`.
const BEZIER_BASIS: Mat4 = Mat4::from_cols(
    Vec4::new(-1.0, 3.0, -3.0, 1.0),
    Vec4::new(3.0, -6.0, 3.0, 0.0),
    Vec4::new(-3.0, 3.0, 0.0, 0.0),
    Vec4::new(1.0, 0.0, 0.0, 0.0),
);

/// Tangents shorter than this are treated as degenerate.
const MIN_TANGENT_LENGTH: f32 = 1e-4;

/// A piecewise cubic Bézier path producing a position + orientation frame.
///
/// The path needs at least 4 control points. Each extra segment shares its
/// first point with the previous segment's last, so a path over `n` points
/// has `(n - 1) / 3` segments. The global parameter `t ∈ [0, 1]` spans the
/// whole path uniformly over segments.
///
/// A malformed path (fewer than 4 points) degrades to the origin with a
/// default forward vector rather than failing: curves are visual, and a
/// render loop should not crash over one.
#[derive(Clone, Debug)]
pub struct BezierCurve {
    control_points: Vec<Vec3>,
    param: f32,
}

impl BezierCurve {
    /// Path over a single cubic segment.
    pub fn new(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3) -> Self {
        Self::from_points(vec![p0, p1, p2, p3])
    }

    /// Path over an arbitrary control polygon.
    pub fn from_points(control_points: Vec<Vec3>) -> Self {
        Self {
            control_points,
            param: 0.0,
        }
    }

    /// Set the path parameter, clamped to `[0, 1]`.
    pub fn set_param(&mut self, t: f32) {
        self.param = t.clamp(0.0, 1.0);
    }

    /// Current path parameter.
    pub fn param(&self) -> f32 {
        self.param
    }

    /// Replace the control polygon.
    pub fn set_control_points(&mut self, points: Vec<Vec3>) {
        self.control_points = points;
    }

    /// The control polygon.
    pub fn control_points(&self) -> &[Vec3] {
        &self.control_points
    }

    /// Number of cubic segments in the path. Zero when malformed.
    pub fn segment_count(&self) -> usize {
        self.control_points.len().saturating_sub(1) / 3
    }

    /// Segment index and local parameter for the current `t`.
    ///
    /// The local parameter saturates to `1.0` on the final segment so that
    /// `t = 1` lands exactly on the last control point.
    fn segment_at(&self, t: f32) -> (usize, f32) {
        let segments = self.segment_count().max(1);
        let scaled = t * segments as f32;
        let index = scaled as usize;
        if index >= segments {
            (segments - 1, 1.0)
        } else {
            (index, scaled - index as f32)
        }
    }

    /// Evaluate the weighted combination of the active segment's four
    /// control points for one basis row vector.
    fn evaluate(&self, basis_vec: Vec4) -> Vec3 {
        let (segment, _) = self.segment_at(self.param);
        let base = (segment * 3).min(self.control_points.len() - 4);
        let w = BEZIER_BASIS.transpose() * basis_vec;
        w.x * self.control_points[base]
            + w.y * self.control_points[base + 1]
            + w.z * self.control_points[base + 2]
            + w.w * self.control_points[base + 3]
    }

    /// Position on the path at the current parameter.
    pub fn position_on_curve(&self) -> Vec3 {
        if self.control_points.len() < 4 {
            return Vec3::ZERO;
        }
        let (_, u) = self.segment_at(self.param);
        self.evaluate(Vec4::new(u * u * u, u * u, u, 1.0))
    }

    /// Normalized path tangent at the current parameter.
    ///
    /// Falls back to `+Z` when the derivative is near zero, keeping NaNs out
    /// of the orientation frame.
    pub fn tangent_on_curve(&self) -> Vec3 {
        if self.control_points.len() < 4 {
            return Vec3::Z;
        }
        let (_, u) = self.segment_at(self.param);
        let tangent = self.evaluate(Vec4::new(3.0 * u * u, 2.0 * u, 1.0, 0.0));
        if tangent.length() > MIN_TANGENT_LENGTH {
            tangent.normalize()
        } else {
            Vec3::Z
        }
    }

    /// Full frame matrix: translation to the path position times an
    /// orientation whose forward axis follows the tangent.
    ///
    /// When the tangent runs parallel to world-up the right vector snaps to
    /// `+X`, which can show as an orientation flip where a path passes
    /// through vertical.
    pub fn matrix(&self) -> Mat4 {
        let position = self.position_on_curve();
        let forward = self.tangent_on_curve();

        let cross = Vec3::Y.cross(forward);
        let right = if cross.length() < 1e-3 {
            Vec3::X
        } else {
            cross.normalize()
        };
        let up = forward.cross(right).normalize();

        let rotation = Mat4::from_cols(
            right.extend(0.0),
            up.extend(0.0),
            forward.extend(0.0),
            Vec4::W,
        );
        Mat4::from_translation(position) * rotation
    }
}

/// Straight-line interpolation between two points.
///
/// Produces a translation-only matrix; callers that only need the raw point
/// (for re-rooting a composite each frame) read [`LinearPath::position_on_path`].
#[derive(Clone, Copy, Debug)]
pub struct LinearPath {
    start: Vec3,
    end: Vec3,
    param: f32,
}

impl LinearPath {
    pub fn new(start: Vec3, end: Vec3) -> Self {
        Self {
            start,
            end,
            param: 0.0,
        }
    }

    /// Set the path parameter, clamped to `[0, 1]`.
    pub fn set_param(&mut self, t: f32) {
        self.param = t.clamp(0.0, 1.0);
    }

    pub fn param(&self) -> f32 {
        self.param
    }

    pub fn set_start(&mut self, point: Vec3) {
        self.start = point;
    }

    pub fn set_end(&mut self, point: Vec3) {
        self.end = point;
    }

    pub fn start(&self) -> Vec3 {
        self.start
    }

    pub fn end(&self) -> Vec3 {
        self.end
    }

    /// Interpolated position at the current parameter.
    pub fn position_on_path(&self) -> Vec3 {
        self.start.lerp(self.end, self.param)
    }

    /// Translation matrix to the current position.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position_on_path())
    }
}
