//! ASCII STL export, for inspecting frames in any mesh viewer

use crate::float_types::Real;
use crate::scene::mesh::RenderGeometry;
use crate::solid::Solid;
use nalgebra::{Point3, Vector3};
use std::fmt::Debug;
use std::fmt::Write as _;

fn push_facet(out: &mut String, normal: Vector3<Real>, triangle: [Point3<Real>; 3]) {
    let _ = writeln!(
        out,
        "  facet normal {:.6} {:.6} {:.6}",
        normal.x, normal.y, normal.z
    );
    out.push_str("    outer loop\n");
    for vertex in &triangle {
        let _ = writeln!(
            out,
            "      vertex {:.6} {:.6} {:.6}",
            vertex.x, vertex.y, vertex.z
        );
    }
    out.push_str("    endloop\n");
    out.push_str("  endfacet\n");
}

impl<S: Clone + Debug + Send + Sync> Solid<S> {
    /// Convert this Solid to an **ASCII STL** string with the given `name`.
    ///
    /// ```rust
    /// # use csgframe::solid::Solid;
    /// let cube = Solid::<()>::cube(1.0, None);
    /// let stl = cube.to_stl_ascii("cube");
    /// assert!(stl.starts_with("solid cube"));
    /// ```
    pub fn to_stl_ascii(&self, name: &str) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "solid {name}");

        for poly in &self.polygons {
            // STL is triangle-based; use the polygon's plane normal for all
            // of its facets.
            let normal = poly.plane.normal();
            for tri in poly.triangulate() {
                push_facet(&mut out, normal, [tri[0].pos, tri[1].pos, tri[2].pos]);
            }
        }

        let _ = writeln!(out, "endsolid {name}");
        out
    }
}

impl RenderGeometry {
    /// Convert these buffers to an **ASCII STL** string with the given `name`.
    ///
    /// Facet normals are recomputed per triangle; the per-vertex normals in
    /// the buffers belong to shading, not to STL.
    pub fn to_stl_ascii(&self, name: &str) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "solid {name}");

        for tri in self.indices.chunks_exact(3) {
            let point = |idx: u32| {
                let [x, y, z] = self.positions[idx as usize];
                Point3::new(x, y, z)
            };
            let (a, b, c) = (point(tri[0]), point(tri[1]), point(tri[2]));
            let cross = (b - a).cross(&(c - a));
            let normal = if cross.norm() > 0.0 {
                cross / cross.norm()
            } else {
                Vector3::zeros()
            };
            push_facet(&mut out, normal, [a, b, c]);
        }

        let _ = writeln!(out, "endsolid {name}");
        out
    }
}

#[cfg(test)]
mod tests {
    use crate::solid::Solid;

    #[test]
    fn ascii_stl_has_a_facet_per_triangle() {
        let cube: Solid<()> = Solid::cube(2.0, None);
        let stl = cube.to_stl_ascii("cube");
        // 6 quad faces, 2 triangles each
        assert_eq!(stl.matches("facet normal").count(), 12);
        assert!(stl.trim_end().ends_with("endsolid cube"));
    }
}
