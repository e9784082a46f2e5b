//! The seam between the evaluation loop and whatever renders it

use crate::scene::mesh::{DerivedMesh, MeshId, RenderGeometry};
use hashbrown::HashMap;
use std::sync::Arc;

/// What the orchestrator needs from the surrounding scene graph.
///
/// All of the loop's output happens through this pair: `publish` attaches a
/// freshly evaluated mesh to the scene, `retract` detaches one that is being
/// released. A host holding render-side references should clone the mesh's
/// geometry `Arc` in `publish` and drop it in `retract`; the orchestrator
/// drops its own reference right after retracting, which is what frees the
/// buffers.
pub trait SceneHost {
    fn publish(&mut self, mesh: &DerivedMesh);
    fn retract(&mut self, mesh: &DerivedMesh);
}

/// An in-memory host that records attachments, for headless runs and tests.
#[derive(Debug, Default)]
pub struct RecordingHost {
    attached: HashMap<MeshId, Arc<RenderGeometry>>,
    published_total: usize,
    retracted_total: usize,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of meshes currently attached to the scene.
    pub fn attached_count(&self) -> usize {
        self.attached.len()
    }

    pub fn is_attached(&self, id: MeshId) -> bool {
        self.attached.contains_key(&id)
    }

    /// The geometry the host retains for an attached mesh.
    pub fn geometry_of(&self, id: MeshId) -> Option<&Arc<RenderGeometry>> {
        self.attached.get(&id)
    }

    /// How many publishes this host has ever seen.
    pub fn published_total(&self) -> usize {
        self.published_total
    }

    /// How many retractions this host has ever seen.
    pub fn retracted_total(&self) -> usize {
        self.retracted_total
    }
}

impl SceneHost for RecordingHost {
    fn publish(&mut self, mesh: &DerivedMesh) {
        self.attached.insert(mesh.id(), mesh.geometry().clone());
        self.published_total += 1;
    }

    fn retract(&mut self, mesh: &DerivedMesh) {
        self.attached.remove(&mesh.id());
        self.retracted_total += 1;
    }
}
