use bevy::math::Affine3A;
use bevy::prelude::Transform;

use crate::bounds::Bounds3;

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Group,
    Bone,
    Mesh {
        /// Local-space bounds of the node's own geometry, if it has any.
        bounds: Option<Bounds3>,
    },
    SkinnedMesh {
        bounds: Option<Bounds3>,
    },
}

impl NodeKind {
    pub fn is_skinned_mesh(&self) -> bool {
        matches!(self, NodeKind::SkinnedMesh { .. })
    }

    /// True for plain and skinned meshes alike.
    pub fn is_mesh(&self) -> bool {
        matches!(self, NodeKind::Mesh { .. } | NodeKind::SkinnedMesh { .. })
    }

    pub fn local_bounds(&self) -> Option<&Bounds3> {
        match self {
            NodeKind::Mesh { bounds } | NodeKind::SkinnedMesh { bounds } => bounds.as_ref(),
            NodeKind::Group | NodeKind::Bone => None,
        }
    }
}

/// One node of a loaded asset's hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub name: Option<String>,
    pub kind: NodeKind,
    pub transform: Transform,
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            name: None,
            kind,
            transform: Transform::IDENTITY,
            children: Vec::new(),
        }
    }

    pub fn group() -> Self {
        Self::new(NodeKind::Group)
    }

    pub fn bone(name: impl Into<String>) -> Self {
        Self::new(NodeKind::Bone).named(name)
    }

    pub fn mesh(bounds: Bounds3) -> Self {
        Self::new(NodeKind::Mesh {
            bounds: Some(bounds),
        })
    }

    pub fn skinned_mesh(bounds: Bounds3) -> Self {
        Self::new(NodeKind::SkinnedMesh {
            bounds: Some(bounds),
        })
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.name.as_deref() == Some(name)
    }

    /// First node, in pre-order depth-first order starting at `self`, that
    /// matches `pred`.
    ///
    /// The returned affine maps the found node's local space into `self`'s
    /// local space; `self`'s own transform is not part of it.
    pub fn find_first<F>(&self, pred: F) -> Option<Located<'_>>
    where
        F: Fn(&SceneNode) -> bool,
    {
        find_in(self, Affine3A::IDENTITY, &pred)
    }

    /// Bounds of this node and all of its descendants, expressed in the frame
    /// `to_frame` maps this node's local space into.
    pub fn subtree_bounds(&self, to_frame: Affine3A) -> Bounds3 {
        let mut bounds = Bounds3::EMPTY;
        accumulate_bounds(self, to_frame, &mut bounds);
        bounds
    }

    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(SceneNode::node_count).sum::<usize>()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Located<'a> {
    pub node: &'a SceneNode,
    pub to_root: Affine3A,
}

impl Located<'_> {
    pub fn bounds(&self) -> Bounds3 {
        self.node.subtree_bounds(self.to_root)
    }
}

fn find_in<'a, F>(node: &'a SceneNode, to_root: Affine3A, pred: &F) -> Option<Located<'a>>
where
    F: Fn(&SceneNode) -> bool,
{
    if pred(node) {
        return Some(Located { node, to_root });
    }
    node.children.iter().find_map(|child| {
        let child_to_root = to_root * child.transform.compute_affine();
        find_in(child, child_to_root, pred)
    })
}

fn accumulate_bounds(node: &SceneNode, to_frame: Affine3A, out: &mut Bounds3) {
    if let Some(local) = node.kind.local_bounds() {
        out.union(&local.transformed(&to_frame));
    }
    for child in &node.children {
        accumulate_bounds(child, to_frame * child.transform.compute_affine(), out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::Vec3;

    fn unit_box() -> Bounds3 {
        Bounds3::new(Vec3::ZERO, Vec3::ONE)
    }

    #[test]
    fn capability_queries() {
        assert!(NodeKind::SkinnedMesh { bounds: None }.is_skinned_mesh());
        assert!(NodeKind::SkinnedMesh { bounds: None }.is_mesh());
        assert!(NodeKind::Mesh { bounds: None }.is_mesh());
        assert!(!NodeKind::Mesh { bounds: None }.is_skinned_mesh());
        assert!(!NodeKind::Bone.is_mesh());
        assert!(NodeKind::Group.local_bounds().is_none());
    }

    #[test]
    fn find_first_is_preorder_and_includes_self() {
        let scene = SceneNode::group()
            .named("root")
            .with_child(
                SceneNode::group()
                    .named("a")
                    .with_child(SceneNode::mesh(unit_box()).named("a_mesh")),
            )
            .with_child(SceneNode::mesh(unit_box()).named("b_mesh"));

        let found = scene.find_first(|n| n.kind.is_mesh()).unwrap();
        assert!(found.node.is_named("a_mesh"));
        assert!(scene.find_first(|n| n.is_named("root")).is_some());
        assert!(scene.find_first(|n| n.is_named("missing")).is_none());
    }

    #[test]
    fn located_transform_composes_ancestors_but_not_root() {
        let scene = SceneNode::group()
            .with_transform(Transform::from_xyz(100.0, 0.0, 0.0))
            .with_child(
                SceneNode::group()
                    .with_transform(Transform::from_xyz(0.0, 2.0, 0.0))
                    .with_child(
                        SceneNode::mesh(unit_box())
                            .named("leaf")
                            .with_transform(Transform::from_xyz(0.0, 0.0, 3.0)),
                    ),
            );
        let found = scene.find_first(|n| n.is_named("leaf")).unwrap();
        let b = found.bounds();
        assert_eq!(b.min, Vec3::new(0.0, 2.0, 3.0));
        assert_eq!(b.max, Vec3::new(1.0, 3.0, 4.0));
    }

    #[test]
    fn subtree_bounds_cover_all_descendants() {
        let scene = SceneNode::group()
            .with_child(SceneNode::mesh(unit_box()))
            .with_child(
                SceneNode::mesh(unit_box()).with_transform(Transform::from_xyz(0.0, 5.0, 0.0)),
            );
        let b = scene.subtree_bounds(Affine3A::IDENTITY);
        assert_eq!(b.min, Vec3::ZERO);
        assert_eq!(b.max, Vec3::new(1.0, 6.0, 1.0));
        assert_eq!(scene.node_count(), 3);
    }

    #[test]
    fn bone_without_geometry_has_empty_bounds() {
        let scene = SceneNode::group().with_child(SceneNode::bone("hips"));
        let found = scene.find_first(|n| n.is_named("hips")).unwrap();
        assert!(found.bounds().is_empty());
    }
}
