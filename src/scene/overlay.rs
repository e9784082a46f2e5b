//! The long-lived wireframe overlay node

use crate::scene::material::Material;
use crate::scene::mesh::RenderGeometry;
use std::sync::{Arc, Weak};

/// A single scene node that re-renders the current derived mesh's geometry
/// as a wireframe.
///
/// The overlay never owns geometry: it holds a `Weak` alias that is
/// retargeted at the live derived mesh every frame. Once that mesh is
/// released the alias stops upgrading, so a stale predecessor can never be
/// reached through the overlay.
#[derive(Debug, Clone)]
pub struct WireframeOverlay {
    geometry: Weak<RenderGeometry>,
    /// The overlay's own render surface, owned for the whole session.
    pub material: Material,
    visible: bool,
}

impl WireframeOverlay {
    pub fn new(material: Material) -> Self {
        WireframeOverlay {
            geometry: Weak::new(),
            material,
            visible: false,
        }
    }

    /// Point the overlay at the given live geometry.
    pub fn retarget(&mut self, geometry: &Arc<RenderGeometry>) {
        self.geometry = Arc::downgrade(geometry);
    }

    /// Drop the alias entirely (used when the scene retires its mesh).
    pub fn clear(&mut self) {
        self.geometry = Weak::new();
    }

    /// The aliased geometry, if it is still alive.
    pub fn geometry(&self) -> Option<Arc<RenderGeometry>> {
        self.geometry.upgrade()
    }

    /// Whether the overlay aliases exactly this geometry.
    pub fn aliases(&self, geometry: &Arc<RenderGeometry>) -> bool {
        self.geometry
            .upgrade()
            .is_some_and(|current| Arc::ptr_eq(&current, geometry))
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub const fn is_visible(&self) -> bool {
        self.visible
    }
}
