//! Struct and functions for working with planar `Polygon`s without holes

use crate::float_types::Real;
use crate::solid::plane::Plane;
use crate::solid::vertex::Vertex;
use geo::{LineString, Polygon as GeoPolygon, coord};
use nalgebra::{Point3, Vector3};
use parry3d_f64::bounding_volume::Aabb;
use std::sync::OnceLock;

/// A polygon, defined by a list of vertices.
/// - `S` is the generic metadata type, stored as `Option<S>`; boolean
///   splitting carries it onto every fragment, which is what lets a combined
///   solid remember which input each face came from.
#[derive(Debug, Clone)]
pub struct Polygon<S: Clone> {
    /// Vertices defining the Polygon's shape
    pub vertices: Vec<Vertex>,

    /// The plane on which this Polygon lies, used for splitting
    pub plane: Plane,

    /// Lazily computed axis-aligned bounding box of the Polygon
    pub bounding_box: OnceLock<Aabb>,

    /// Generic metadata associated with the Polygon
    pub metadata: Option<S>,
}

impl<S: Clone + Send + Sync> Polygon<S> {
    /// Create a polygon from vertices
    pub fn new(vertices: Vec<Vertex>, metadata: Option<S>) -> Self {
        assert!(vertices.len() >= 3, "degenerate polygon");

        let plane = Plane::from_vertices(&vertices);

        Polygon {
            vertices,
            plane,
            bounding_box: OnceLock::new(),
            metadata,
        }
    }

    /// Axis aligned bounding box of this Polygon (cached after first call)
    pub fn bounding_box(&self) -> Aabb {
        *self.bounding_box.get_or_init(|| {
            let mut mins = Point3::new(Real::MAX, Real::MAX, Real::MAX);
            let mut maxs = Point3::new(-Real::MAX, -Real::MAX, -Real::MAX);
            for v in &self.vertices {
                mins.x = mins.x.min(v.pos.x);
                mins.y = mins.y.min(v.pos.y);
                mins.z = mins.z.min(v.pos.z);
                maxs.x = maxs.x.max(v.pos.x);
                maxs.y = maxs.y.max(v.pos.y);
                maxs.z = maxs.z.max(v.pos.z);
            }
            Aabb::new(mins, maxs)
        })
    }

    /// Reverses winding order, flips vertex normals, and flips the plane normal
    pub fn flip(&mut self) {
        self.vertices.reverse();
        for v in &mut self.vertices {
            v.flip();
        }
        self.plane.flip();
    }

    /// Triangulate this polygon into a list of triangles, each `[v0, v1, v2]`.
    ///
    /// The 3D loop is projected onto an orthonormal basis of its plane,
    /// ear-cut in 2D (geo/earcutr), and lifted back. Every output triangle
    /// carries the polygon's plane normal, so downstream render buffers stay
    /// flat-shaded per face.
    pub fn triangulate(&self) -> Vec<[Vertex; 3]> {
        if self.vertices.len() < 3 {
            return Vec::new();
        }

        // A polygon that is already a triangle: skip the earcut round-trip.
        // This is the common case after boolean splitting and avoids
        // robustness problems with very thin fragments.
        if self.vertices.len() == 3 {
            return vec![[self.vertices[0], self.vertices[1], self.vertices[2]]];
        }

        let normal_3d = self.plane.normal();
        if normal_3d.norm_squared() == 0.0 {
            return Vec::new(); // collapsed polygon, nothing to emit
        }
        let (u, v) = build_orthonormal_basis(normal_3d);
        let origin_3d = self.vertices[0].pos;

        let mut all_vertices_2d = Vec::with_capacity(self.vertices.len());
        for vert in &self.vertices {
            let offset = vert.pos.coords - origin_3d.coords;
            let x = offset.dot(&u);
            let y = offset.dot(&v);
            all_vertices_2d.push(coord! {x: x, y: y});
        }

        use geo::TriangulateEarcut;
        let triangulation = GeoPolygon::new(LineString::new(all_vertices_2d), Vec::new())
            .earcut_triangles_raw();
        let triangle_indices = triangulation.triangle_indices;
        let vertices = triangulation.vertices;

        // Lift the 2D result back into 3D
        let mut triangles = Vec::with_capacity(triangle_indices.len() / 3);
        for tri_chunk in triangle_indices.chunks_exact(3) {
            let mut tri_vertices =
                [Vertex::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 0.0)); 3];
            for (k, &idx) in tri_chunk.iter().enumerate() {
                let base = idx * 2;
                let x = vertices[base];
                let y = vertices[base + 1];
                let pos_3d = origin_3d.coords + (x * u) + (y * v);
                tri_vertices[k] = Vertex::new(Point3::from(pos_3d), normal_3d);
            }
            triangles.push(tri_vertices);
        }
        triangles
    }

    /// Returns a reference to the metadata, if any.
    pub const fn metadata(&self) -> Option<&S> {
        self.metadata.as_ref()
    }

    /// Sets the metadata to the given value.
    pub fn set_metadata(&mut self, data: S) {
        self.metadata = Some(data);
    }
}

/// Given a normal vector `n`, build two perpendicular unit vectors `u` and `v`
/// so that `{u, v, n}` forms an orthonormal basis. `n` is assumed non-zero.
pub fn build_orthonormal_basis(n: Vector3<Real>) -> (Vector3<Real>, Vector3<Real>) {
    let n = n.normalize();

    // Pick the axis with the smallest component in `n` to cross against;
    // crossing with that axis is least likely to cause numeric trouble.
    let other = if n.x.abs() < n.y.abs() && n.x.abs() < n.z.abs() {
        Vector3::x()
    } else if n.y.abs() < n.z.abs() {
        Vector3::y()
    } else {
        Vector3::z()
    };

    let v = n.cross(&other).normalize();
    let u = v.cross(&n).normalize();

    (u, v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_triangulates_into_two_triangles() {
        let quad: Polygon<()> = Polygon::new(
            vec![
                Vertex::new(Point3::new(0.0, 0.0, 0.0), Vector3::z()),
                Vertex::new(Point3::new(2.0, 0.0, 0.0), Vector3::z()),
                Vertex::new(Point3::new(2.0, 2.0, 0.0), Vector3::z()),
                Vertex::new(Point3::new(0.0, 2.0, 0.0), Vector3::z()),
            ],
            None,
        );
        assert_eq!(quad.triangulate().len(), 2);
    }

    #[test]
    fn flip_reverses_plane_and_vertex_normals() {
        let mut tri: Polygon<()> = Polygon::new(
            vec![
                Vertex::new(Point3::new(0.0, 0.0, 0.0), Vector3::z()),
                Vertex::new(Point3::new(1.0, 0.0, 0.0), Vector3::z()),
                Vertex::new(Point3::new(0.0, 1.0, 0.0), Vector3::z()),
            ],
            None,
        );
        let normal_before = tri.plane.normal();
        tri.flip();
        assert_eq!(tri.plane.normal(), -normal_before);
        assert_eq!(tri.vertices[0].normal, -Vector3::z());
    }
}
