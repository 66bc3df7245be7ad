use crate::resources::MeshKey;
use crate::scene::NodeKey;
use crate::scene::role::NodeRole;
use crate::scene::transform::Transform;
use glam::Affine3A;

/// A scene node: hierarchy, transform, and the per-node state the patching
/// pipeline and the per-frame logic read.
///
/// The graph owns its nodes; processors only mutate materials and behaviours
/// on nodes they are handed, never restructure the hierarchy (the one
/// exception being the invisible collider children the link extractor
/// parents under its matches).
#[derive(Debug, Clone)]
pub struct Node {
    /// Authored name from the source asset; reserved markers in it decide
    /// the [`NodeRole`].
    pub name: String,

    // === Core Hierarchy ===
    pub(crate) parent: Option<NodeKey>,
    pub(crate) children: Vec<NodeKey>,

    // === Core Spatial Data ===
    pub transform: Transform,

    // === Core State ===
    pub visible: bool,
    /// Draw-order hint consumed by the embedding render layer.
    pub render_order: i32,
    /// Role extracted once from the name markers, ahead of the pipeline.
    pub role: NodeRole,

    pub mesh: Option<MeshKey>,
}

impl Node {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            parent: None,
            children: Vec::new(),
            transform: Transform::new(),
            visible: true,
            render_order: 0,
            role: crate::scene::role::classify(name),
            mesh: None,
        }
    }

    /// Returns the parent node handle, if any.
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    /// Returns a read-only slice of child node handles.
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }

    /// Returns a reference to the world transformation matrix.
    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Affine3A {
        &self.transform.world_matrix
    }
}
