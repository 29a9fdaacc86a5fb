//! Composable model transforms.
//!
//! Every drawable object in a scene positions itself through a chain of
//! transforms: a rotation followed by a translation followed by a scale, a
//! point sampled from a Bézier path, a fixed correction matrix, and so on.
//! This module provides the pieces and the machinery to compose them:
//!
//! - [`Transform`] — a closed enum over every transform kind.
//! - [`TransformGraph`] — an insert-only arena that owns transforms and
//!   evaluates composites. Composites reference children by [`TransformId`],
//!   so one node (a shared world-correction matrix, a shared spin) can appear
//!   in any number of chains without ownership gymnastics.
//! - [`BezierCurve`] / [`LinearPath`] — parametric curve transforms that also
//!   work as standalone values, for callers that want the raw position on the
//!   path rather than a matrix.
//!
//! Composition order is load-bearing: a composite's matrix is the
//! left-to-right product of its children, and `rotate * translate` places an
//! object on an orbit while `translate * rotate` spins it in place.
//!
//! Transforms never animate themselves. Scenes advance angles, offsets and
//! curve parameters from their own clock and the matrix is recomputed on
//! demand.

mod curve;
mod graph;

pub use curve::{BezierCurve, LinearPath};
pub use graph::{TransformGraph, TransformId};

use glam::{Mat4, Vec3};

/// A single node in a [`TransformGraph`].
///
/// Leaf variants wrap one geometric operation; [`Transform::Composite`]
/// chains previously inserted nodes by id.
#[derive(Clone, Debug)]
pub enum Transform {
    /// The identity matrix.
    Identity,
    /// Translation by `offset`.
    Translation { offset: Vec3 },
    /// Rotation of `degrees` around `axis`.
    ///
    /// The axis is assumed pre-normalized by the caller; a zero-length axis
    /// yields a degenerate matrix.
    Rotation { degrees: f32, axis: Vec3 },
    /// Per-axis scaling.
    Scale { factors: Vec3 },
    /// An opaque caller-supplied matrix, e.g. a custom correction hack.
    Matrix { matrix: Mat4 },
    /// Ordered chain of child transforms; matrix = product of children in
    /// insertion order. Empty composites evaluate to identity.
    Composite { children: Vec<TransformId> },
    /// Position + orientation frame along a piecewise cubic Bézier path.
    Bezier(BezierCurve),
    /// Translation along a straight line.
    Linear(LinearPath),
}

impl Transform {
    /// Matrix of a leaf node. `None` for composites, which need the graph
    /// to resolve their children.
    pub(crate) fn leaf_matrix(&self) -> Option<Mat4> {
        match self {
            Transform::Identity => Some(Mat4::IDENTITY),
            Transform::Translation { offset } => Some(Mat4::from_translation(*offset)),
            Transform::Rotation { degrees, axis } => {
                Some(Mat4::from_axis_angle(*axis, degrees.to_radians()))
            }
            Transform::Scale { factors } => Some(Mat4::from_scale(*factors)),
            Transform::Matrix { matrix } => Some(*matrix),
            Transform::Composite { .. } => None,
            Transform::Bezier(curve) => Some(curve.matrix()),
            Transform::Linear(path) => Some(path.matrix()),
        }
    }
}
