//! Arena-backed hierarchical transform graph.
//!
//! Nodes hold local TRS state; every global quantity is derived on demand by
//! walking the parent chain. The graph is written from the update thread
//! only and is read-only during frame resolution, so it carries no internal
//! locking.

use generational_arena::{Arena, Index};

use crate::math::matrix::Matrix4x4;
use crate::math::quaternion::Quaternion;
use crate::math::vector::Vector3d;

#[derive(Hash, Eq, PartialEq, Clone, Copy, Debug)]
pub struct TransformId(pub Index);

impl From<TransformId> for Index {
    fn from(id: TransformId) -> Index {
        id.0
    }
}

#[derive(Debug)]
struct TransformNode {
    parent: Option<TransformId>,
    children: Vec<TransformId>,
    position: Vector3d,
    rotation: Quaternion,
    scale: Vector3d,
}

impl TransformNode {
    fn new(parent: Option<TransformId>) -> Self {
        Self {
            parent,
            children: Vec::new(),
            position: Vector3d::ZERO,
            rotation: Quaternion::identity(),
            scale: Vector3d::ONE,
        }
    }
}

#[derive(Debug, Default)]
pub struct TransformGraph {
    nodes: Arena<TransformNode>,
}

impl TransformGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: TransformId) -> bool {
        self.nodes.contains(id.0)
    }

    /// Creates a node with identity local state, optionally under a parent.
    pub fn spawn(&mut self, parent: Option<TransformId>) -> TransformId {
        let id = TransformId(self.nodes.insert(TransformNode::new(parent)));
        if let Some(pid) = parent {
            self.nodes[pid.0].children.push(id);
        }
        id
    }

    /// Removes a node. Its children are reparented to the removed node's
    /// parent (or become roots), keeping the child lists consistent with the
    /// parent pointers. Returns false for a stale id.
    pub fn despawn(&mut self, id: TransformId) -> bool {
        let node = match self.nodes.remove(id.0) {
            Some(node) => node,
            None => return false,
        };

        if let Some(pid) = node.parent {
            self.nodes[pid.0].children.retain(|c| *c != id);
        }
        for child in node.children {
            self.nodes[child.0].parent = node.parent;
            if let Some(pid) = node.parent {
                self.nodes[pid.0].children.push(child);
            }
        }
        true
    }

    /// Moves `id` under `new_parent` (or to the root set for `None`).
    ///
    /// A request that would create a cycle, including `new_parent == id`, is
    /// ignored. Local values are not adjusted; the node's global pose changes
    /// unless the caller re-applies it through the `set_global_*` setters.
    pub fn set_parent(&mut self, id: TransformId, new_parent: Option<TransformId>) {
        let mut it = new_parent;
        while let Some(ancestor) = it {
            if ancestor == id {
                log::warn!("rejected reparenting that would create a cycle");
                return;
            }
            it = self.nodes[ancestor.0].parent;
        }

        if let Some(old) = self.nodes[id.0].parent {
            self.nodes[old.0].children.retain(|c| *c != id);
        }
        self.nodes[id.0].parent = new_parent;
        if let Some(pid) = new_parent {
            self.nodes[pid.0].children.push(id);
        }
    }

    pub fn parent(&self, id: TransformId) -> Option<TransformId> {
        self.nodes[id.0].parent
    }

    pub fn child_count(&self, id: TransformId) -> usize {
        self.nodes[id.0].children.len()
    }

    pub fn child_at(&self, id: TransformId, i: usize) -> Option<TransformId> {
        self.nodes[id.0].children.get(i).copied()
    }

    pub fn children(&self, id: TransformId) -> impl Iterator<Item = TransformId> + '_ {
        self.nodes[id.0].children.iter().copied()
    }

    pub fn position(&self, id: TransformId) -> Vector3d {
        self.nodes[id.0].position
    }

    pub fn set_position(&mut self, id: TransformId, position: Vector3d) {
        self.nodes[id.0].position = position;
    }

    pub fn rotation(&self, id: TransformId) -> Quaternion {
        self.nodes[id.0].rotation.clone()
    }

    pub fn set_rotation(&mut self, id: TransformId, rotation: Quaternion) {
        self.nodes[id.0].rotation = rotation;
    }

    pub fn scale(&self, id: TransformId) -> Vector3d {
        self.nodes[id.0].scale
    }

    pub fn set_scale(&mut self, id: TransformId, scale: Vector3d) {
        self.nodes[id.0].scale = scale;
    }

    /// Relative translation in the parent's space.
    pub fn translate(&mut self, id: TransformId, delta: Vector3d) {
        let node = &mut self.nodes[id.0];
        node.position += delta;
    }

    /// Appends a rotation to the local rotation.
    pub fn rotate(&mut self, id: TransformId, delta: Quaternion) {
        let node = &mut self.nodes[id.0];
        node.rotation *= delta;
    }

    /// Component-wise multiplication of the local scale.
    pub fn scale_by(&mut self, id: TransformId, factor: Vector3d) {
        let node = &mut self.nodes[id.0];
        node.scale = node.scale.vector_scale(factor);
    }

    /// Resets the local state to identity.
    pub fn reset(&mut self, id: TransformId) {
        let node = &mut self.nodes[id.0];
        node.position = Vector3d::ZERO;
        node.rotation = Quaternion::identity();
        node.scale = Vector3d::ONE;
    }

    /// Scale, then rotation, then translation, composed with the affine `*`.
    pub fn local_transformation_matrix(&self, id: TransformId) -> Matrix4x4 {
        let node = &self.nodes[id.0];
        Matrix4x4::from_scale(node.scale)
            * node.rotation.to_rotation_matrix()
            * Matrix4x4::from_translation(node.position)
    }

    /// Bottom-up fold over the ancestor chain: the accumulated translation
    /// is pushed through each ancestor's scale and rotation, then the
    /// ancestor's local matrix is affine-composed on the left.
    pub fn global_transformation_matrix(&self, id: TransformId) -> Matrix4x4 {
        let mut m = self.local_transformation_matrix(id);
        let mut it = self.nodes[id.0].parent;
        while let Some(pid) = it {
            let node = &self.nodes[pid.0];

            let mut pos = m.get_translation_component();
            pos *= Matrix4x4::from_scale(node.scale) * node.rotation.to_rotation_matrix();
            m.set_translation_component(pos);

            m = self.local_transformation_matrix(pid) * m;
            it = node.parent;
        }
        m
    }

    pub fn global_position(&self, id: TransformId) -> Vector3d {
        self.global_transformation_matrix(id).get_translation_component()
    }

    /// Hamilton chain from the node to the root; the node's own rotation is
    /// the left-most factor. Walking the other direction breaks nested
    /// pivot setups.
    pub fn global_rotation(&self, id: TransformId) -> Quaternion {
        let mut acc = Quaternion::identity();
        let mut it = Some(id);
        while let Some(cur) = it {
            let node = &self.nodes[cur.0];
            acc *= node.rotation.clone();
            it = node.parent;
        }
        acc
    }

    /// Component-wise product of the scales from the node to the root.
    pub fn global_scale(&self, id: TransformId) -> Vector3d {
        let mut acc = Vector3d::ONE;
        let mut it = Some(id);
        while let Some(cur) = it {
            let node = &self.nodes[cur.0];
            acc = acc.vector_scale(node.scale);
            it = node.parent;
        }
        acc
    }

    /// Sets the local position such that the global position becomes `pos`:
    /// subtract the parent's global position, undo its scale, then push
    /// through its global rotation matrix.
    pub fn set_global_position(&mut self, id: TransformId, pos: Vector3d) {
        let (p_pos, p_scale, p_rot) = self.parent_globals(id);

        let mut local = pos - p_pos;

        let mut invscale = Matrix4x4::new();
        *invscale.a_mut() = 1.0 / p_scale.x;
        *invscale.f_mut() = 1.0 / p_scale.y;
        *invscale.k_mut() = 1.0 / p_scale.z;
        local *= invscale;

        local *= p_rot.to_rotation_matrix();

        self.set_position(id, local);
    }

    /// Component-wise division by the parent's global scale.
    pub fn set_global_scale(&mut self, id: TransformId, scale: Vector3d) {
        let (_, p_scale, _) = self.parent_globals(id);
        self.set_scale(
            id,
            Vector3d::new(
                scale.x / p_scale.x,
                scale.y / p_scale.y,
                scale.z / p_scale.z,
            ),
        );
    }

    /// Multiplies by the inverse of the parent's global rotation.
    pub fn set_global_rotation(&mut self, id: TransformId, rot: Quaternion) {
        let (_, _, p_rot) = self.parent_globals(id);
        self.set_rotation(id, rot * p_rot.inverse());
    }

    fn parent_globals(&self, id: TransformId) -> (Vector3d, Vector3d, Quaternion) {
        match self.nodes[id.0].parent {
            Some(pid) => (
                self.global_position(pid),
                self.global_scale(pid),
                self.global_rotation(pid),
            ),
            None => (Vector3d::ZERO, Vector3d::ONE, Quaternion::identity()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::scalar::DEFAULT_EPSILON;

    const EPS: f64 = DEFAULT_EPSILON;

    #[test]
    fn spawn_defaults_to_identity() {
        let mut graph = TransformGraph::new();
        let id = graph.spawn(None);
        assert_eq!(graph.position(id), Vector3d::ZERO);
        assert_eq!(graph.scale(id), Vector3d::ONE);
        assert_eq!(graph.rotation(id), Quaternion::identity());
        assert!(graph
            .local_transformation_matrix(id)
            .similar(&Matrix4x4::IDENTITY, EPS));
    }

    #[test]
    fn parent_child_links() {
        let mut graph = TransformGraph::new();
        let root = graph.spawn(None);
        let a = graph.spawn(Some(root));
        let b = graph.spawn(Some(root));
        assert_eq!(graph.child_count(root), 2);
        assert_eq!(graph.child_at(root, 0), Some(a));
        assert_eq!(graph.child_at(root, 1), Some(b));
        assert_eq!(graph.child_at(root, 2), None);
        assert_eq!(graph.parent(a), Some(root));
        assert_eq!(graph.parent(root), None);
    }

    #[test]
    fn reparenting_moves_child_links() {
        let mut graph = TransformGraph::new();
        let a = graph.spawn(None);
        let b = graph.spawn(None);
        let c = graph.spawn(Some(a));
        graph.set_parent(c, Some(b));
        assert_eq!(graph.child_count(a), 0);
        assert_eq!(graph.child_count(b), 1);
        assert_eq!(graph.parent(c), Some(b));
    }

    #[test]
    fn cycle_requests_are_ignored() {
        let mut graph = TransformGraph::new();
        let a = graph.spawn(None);
        let b = graph.spawn(Some(a));
        let c = graph.spawn(Some(b));

        // would make a its own descendant
        graph.set_parent(a, Some(c));
        assert_eq!(graph.parent(a), None);
        assert_eq!(graph.child_count(c), 0);

        // self-parenting
        graph.set_parent(b, Some(b));
        assert_eq!(graph.parent(b), Some(a));
    }

    #[test]
    fn despawn_reparents_children() {
        let mut graph = TransformGraph::new();
        let root = graph.spawn(None);
        let mid = graph.spawn(Some(root));
        let leaf = graph.spawn(Some(mid));

        assert!(graph.despawn(mid));
        assert!(!graph.contains(mid));
        assert_eq!(graph.parent(leaf), Some(root));
        assert_eq!(graph.child_count(root), 1);
        assert!(!graph.despawn(mid));
    }

    #[test]
    fn reparenting_does_not_preserve_global_pose() {
        let mut graph = TransformGraph::new();
        let a = graph.spawn(None);
        graph.set_position(a, Vector3d::new(10.0, 0.0, 0.0));
        let child = graph.spawn(None);
        graph.set_position(child, Vector3d::new(1.0, 2.0, 3.0));

        graph.set_parent(child, Some(a));
        // local stays put, global shifts by the parent's offset
        assert_eq!(graph.position(child), Vector3d::new(1.0, 2.0, 3.0));
        assert!(graph
            .global_position(child)
            .similar(Vector3d::new(11.0, 2.0, 3.0), EPS));
    }

    #[test]
    fn global_scale_is_componentwise_product() {
        let mut graph = TransformGraph::new();
        let root = graph.spawn(None);
        graph.set_scale(root, Vector3d::new(2.0, -3.0, 0.5));
        let child = graph.spawn(Some(root));
        graph.set_scale(child, Vector3d::new(4.0, 2.0, 2.0));
        assert!(graph
            .global_scale(child)
            .similar(Vector3d::new(8.0, -6.0, 1.0), EPS));
    }

    #[test]
    fn global_rotation_applies_child_first() {
        let mut graph = TransformGraph::new();
        let root = graph.spawn(None);
        graph.set_rotation(root, Quaternion::from_euler_angles(Vector3d::new(0.0, 90.0, 0.0)));
        let child = graph.spawn(Some(root));
        graph.set_rotation(child, Quaternion::from_euler_angles(Vector3d::new(0.0, 0.0, 90.0)));

        let expected = graph.rotation(child) * graph.rotation(root);
        assert_eq!(graph.global_rotation(child), expected);
    }

    #[test]
    fn global_position_under_rotated_parent() {
        let mut graph = TransformGraph::new();
        let parent = graph.spawn(None);
        graph.set_rotation(
            parent,
            Quaternion::from_euler_angles(Vector3d::new(0.0, 90.0, 0.0)),
        );
        let child = graph.spawn(Some(parent));
        graph.set_position(child, Vector3d::RIGHT);

        let expected = graph.rotation(parent).rotate_vector(Vector3d::RIGHT);
        assert!(graph.global_position(child).similar(expected, EPS));
    }

    #[test]
    fn global_position_under_translated_scaled_parent() {
        let mut graph = TransformGraph::new();
        let parent = graph.spawn(None);
        graph.set_position(parent, Vector3d::new(10.0, 20.0, 30.0));
        graph.set_scale(parent, Vector3d::new(2.0, 2.0, 2.0));
        let child = graph.spawn(Some(parent));
        graph.set_position(child, Vector3d::new(1.0, 2.0, 3.0));

        assert!(graph
            .global_position(child)
            .similar(Vector3d::new(12.0, 24.0, 36.0), EPS));
    }

    #[test]
    fn set_global_position_round_trips_under_scaled_parent() {
        let mut graph = TransformGraph::new();
        let parent = graph.spawn(None);
        graph.set_position(parent, Vector3d::new(5.0, -3.0, 1.0));
        graph.set_scale(parent, Vector3d::new(-2.0, 4.0, 0.5));
        let child = graph.spawn(Some(parent));

        let target = Vector3d::new(7.0, 3.0, -1.0);
        graph.set_global_position(child, target);
        assert!(graph.global_position(child).similar(target, EPS));
    }

    #[test]
    fn set_global_scale_round_trips() {
        let mut graph = TransformGraph::new();
        let parent = graph.spawn(None);
        graph.set_scale(parent, Vector3d::new(-2.0, 4.0, 0.5));
        let child = graph.spawn(Some(parent));

        graph.set_global_scale(child, Vector3d::new(3.0, 3.0, 3.0));
        assert!(graph
            .global_scale(child)
            .similar(Vector3d::new(3.0, 3.0, 3.0), EPS));
    }

    #[test]
    fn set_global_rotation_round_trips() {
        let mut graph = TransformGraph::new();
        let parent = graph.spawn(None);
        graph.set_rotation(
            parent,
            Quaternion::from_euler_angles(Vector3d::new(10.0, 20.0, 30.0)),
        );
        let child = graph.spawn(Some(parent));

        let target = Quaternion::from_euler_angles(Vector3d::new(45.0, -60.0, 15.0));
        graph.set_global_rotation(child, target.clone());
        assert_eq!(graph.global_rotation(child), target);
    }

    #[test]
    fn deep_chain_position() {
        let mut graph = TransformGraph::new();
        let mut parent = None;
        for _ in 0..4 {
            let id = graph.spawn(parent);
            graph.set_position(id, Vector3d::new(1.0, 0.0, 0.0));
            parent = Some(id);
        }
        let leaf = parent.unwrap();
        assert!(graph
            .global_position(leaf)
            .similar(Vector3d::new(4.0, 0.0, 0.0), EPS));
    }
}
