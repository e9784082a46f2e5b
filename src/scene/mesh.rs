//! Render-ready form of a boolean result

use crate::float_types::Real;
use crate::scene::material::MaterialId;
use crate::solid::Solid;
use crate::solid::polygon::Polygon;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identity of one published derived mesh, unique per process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshId(u64);

static NEXT_MESH_ID: AtomicU64 = AtomicU64::new(0);

impl MeshId {
    fn fresh() -> Self {
        MeshId(NEXT_MESH_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A contiguous run of triangles sharing one material.
///
/// `start` and `count` index into [`RenderGeometry::indices`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeometryGroup {
    pub material: MaterialId,
    pub start: u32,
    pub count: u32,
}

/// Flat triangle buffers extracted from a solid, grouped by material.
///
/// Vertices are duplicated per triangle (flat shading); indices are
/// sequential but kept explicit so hosts can upload them unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderGeometry {
    pub positions: Vec<[Real; 3]>,
    pub normals: Vec<[Real; 3]>,
    pub indices: Vec<u32>,
    pub groups: Vec<GeometryGroup>,
}

impl RenderGeometry {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// The per-frame output of the evaluator: freshly built geometry plus the
/// ordered materials of its groups and the render flags the orchestrator
/// maintains.
///
/// Exactly one derived mesh is live (published to the scene) at a time; the
/// geometry is reference counted so a wireframe overlay can alias it without
/// owning it, and dropping the mesh after retraction releases everything.
#[derive(Debug, Clone)]
pub struct DerivedMesh {
    id: MeshId,
    geometry: Arc<RenderGeometry>,
    materials: Vec<MaterialId>,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl DerivedMesh {
    /// Extract render buffers from a combined solid.
    ///
    /// With `use_groups`, triangles are bucketed by the material id carried
    /// on each polygon (fragments that lost their metadata fall back to
    /// `fallback`), one group per distinct material in first-appearance
    /// order. Without it, the whole result becomes a single group carrying
    /// `fallback`. Empty solids produce an empty but valid mesh.
    pub fn from_solid(
        solid: &Solid<MaterialId>,
        fallback: MaterialId,
        use_groups: bool,
    ) -> Self {
        let triangulated = solid.triangulate();

        let mut buckets: Vec<(MaterialId, Vec<&Polygon<MaterialId>>)> = Vec::new();
        for poly in &triangulated.polygons {
            let material = if use_groups {
                poly.metadata().copied().unwrap_or(fallback)
            } else {
                fallback
            };
            match buckets.iter_mut().find(|(m, _)| *m == material) {
                Some((_, list)) => list.push(poly),
                None => buckets.push((material, vec![poly])),
            }
        }

        let triangle_total: usize = buckets.iter().map(|(_, list)| list.len()).sum();
        let mut positions = Vec::with_capacity(triangle_total * 3);
        let mut normals = Vec::with_capacity(triangle_total * 3);
        let mut indices = Vec::with_capacity(triangle_total * 3);
        let mut groups = Vec::with_capacity(buckets.len());
        let mut materials = Vec::with_capacity(buckets.len());

        for (material, list) in &buckets {
            let start = indices.len() as u32;
            for poly in list {
                for v in &poly.vertices {
                    positions.push([v.pos.x, v.pos.y, v.pos.z]);
                    normals.push([v.normal.x, v.normal.y, v.normal.z]);
                    indices.push(indices.len() as u32);
                }
            }
            groups.push(GeometryGroup {
                material: *material,
                start,
                count: indices.len() as u32 - start,
            });
            materials.push(*material);
        }

        DerivedMesh {
            id: MeshId::fresh(),
            geometry: Arc::new(RenderGeometry {
                positions,
                normals,
                indices,
                groups,
            }),
            materials,
            cast_shadow: false,
            receive_shadow: false,
        }
    }

    pub fn id(&self) -> MeshId {
        self.id
    }

    /// The shared geometry buffers. Cloning the `Arc` is how a host or an
    /// overlay references the geometry without taking ownership.
    pub fn geometry(&self) -> &Arc<RenderGeometry> {
        &self.geometry
    }

    /// Materials of the geometry's groups, in group order.
    pub fn materials(&self) -> &[MaterialId] {
        &self.materials
    }

    pub fn triangle_count(&self) -> usize {
        self.geometry.triangle_count()
    }

    pub fn is_empty(&self) -> bool {
        self.geometry.is_empty()
    }
}
