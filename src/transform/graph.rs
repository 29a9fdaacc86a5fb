//! Arena storage and evaluation for transform chains.

use glam::{Mat4, Vec3};

use super::{BezierCurve, LinearPath, Transform};

/// Opaque handle to a node in a [`TransformGraph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TransformId(usize);

/// Insert-only arena of [`Transform`] nodes.
///
/// Composites reference children by [`TransformId`], so a node shared by
/// several chains is stored once and mutated in one place. Because a
/// composite can only reference nodes that already existed when it was built,
/// every chain is acyclic by construction and evaluation always terminates.
///
/// Animated scenes typically rebuild their per-frame chains wholesale instead
/// of mutating them in place: record [`TransformGraph::len`] after static
/// setup, then [`TransformGraph::truncate`] back to that watermark at the top
/// of each frame and re-insert. Truncation only ever discards a suffix, and
/// since children precede their composites, no surviving node can refer to a
/// discarded one.
#[derive(Default)]
pub struct TransformGraph {
    nodes: Vec<Transform>,
}

impl TransformGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node and return its handle.
    pub fn insert(&mut self, transform: Transform) -> TransformId {
        let id = TransformId(self.nodes.len());
        self.nodes.push(transform);
        id
    }

    /// Insert an identity node.
    pub fn identity(&mut self) -> TransformId {
        self.insert(Transform::Identity)
    }

    /// Insert a translation by `offset`.
    pub fn translation(&mut self, offset: Vec3) -> TransformId {
        self.insert(Transform::Translation { offset })
    }

    /// Insert a rotation of `degrees` around `axis`.
    pub fn rotation(&mut self, degrees: f32, axis: Vec3) -> TransformId {
        self.insert(Transform::Rotation { degrees, axis })
    }

    /// Insert a per-axis scale.
    pub fn scale(&mut self, factors: Vec3) -> TransformId {
        self.insert(Transform::Scale { factors })
    }

    /// Insert a uniform scale.
    pub fn uniform_scale(&mut self, factor: f32) -> TransformId {
        self.scale(Vec3::splat(factor))
    }

    /// Insert a fixed caller-supplied matrix.
    pub fn matrix_node(&mut self, matrix: Mat4) -> TransformId {
        self.insert(Transform::Matrix { matrix })
    }

    /// Insert a Bézier curve transform.
    pub fn bezier(&mut self, curve: BezierCurve) -> TransformId {
        self.insert(Transform::Bezier(curve))
    }

    /// Insert a linear path transform.
    pub fn linear(&mut self, path: LinearPath) -> TransformId {
        self.insert(Transform::Linear(path))
    }

    /// Insert a composite over existing nodes.
    pub fn compose(&mut self, children: &[TransformId]) -> TransformId {
        debug_assert!(
            children.iter().all(|c| c.0 < self.nodes.len()),
            "composite children must be inserted before the composite"
        );
        self.insert(Transform::Composite {
            children: children.to_vec(),
        })
    }

    /// Append a child to an existing composite. No-op on other node kinds.
    pub fn add_child(&mut self, composite: TransformId, child: TransformId) {
        debug_assert!(
            child.0 < composite.0,
            "a composite may only reference earlier nodes"
        );
        if let Some(Transform::Composite { children }) = self.nodes.get_mut(composite.0) {
            children.push(child);
        }
    }

    pub fn get(&self, id: TransformId) -> Option<&Transform> {
        self.nodes.get(id.0)
    }

    pub fn get_mut(&mut self, id: TransformId) -> Option<&mut Transform> {
        self.nodes.get_mut(id.0)
    }

    /// Number of nodes, usable as a watermark for [`TransformGraph::truncate`].
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Discard all nodes inserted after the given watermark.
    pub fn truncate(&mut self, len: usize) {
        self.nodes.truncate(len);
    }

    /// Set the angle of a rotation node. No-op on other node kinds.
    pub fn set_angle(&mut self, id: TransformId, value: f32) {
        if let Some(Transform::Rotation { degrees, .. }) = self.nodes.get_mut(id.0) {
            *degrees = value;
        }
    }

    /// Set the offset of a translation node. No-op on other node kinds.
    pub fn set_offset(&mut self, id: TransformId, value: Vec3) {
        if let Some(Transform::Translation { offset }) = self.nodes.get_mut(id.0) {
            *offset = value;
        }
    }

    /// Set the parameter of a curve node (Bézier or linear). No-op on other
    /// node kinds.
    pub fn set_param(&mut self, id: TransformId, t: f32) {
        match self.nodes.get_mut(id.0) {
            Some(Transform::Bezier(curve)) => curve.set_param(t),
            Some(Transform::Linear(path)) => path.set_param(t),
            _ => {}
        }
    }

    /// Evaluate the matrix of a node.
    ///
    /// Composites multiply their children left to right starting from
    /// identity. A handle minted by a different graph degrades to identity;
    /// matrices are visual and a bad handle should not take down the render
    /// loop.
    pub fn matrix(&self, id: TransformId) -> Mat4 {
        match self.nodes.get(id.0) {
            None => {
                debug_assert!(false, "transform id {} out of range", id.0);
                Mat4::IDENTITY
            }
            Some(Transform::Composite { children }) => children
                .iter()
                .fold(Mat4::IDENTITY, |acc, child| acc * self.matrix(*child)),
            Some(leaf) => leaf.leaf_matrix().unwrap_or(Mat4::IDENTITY),
        }
    }
}
