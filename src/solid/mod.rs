//! `Solid` struct and implementations of the `BooleanOps` trait for `Solid`

use crate::errors::GeometryError;
use crate::float_types::Real;
use crate::solid::{bsp::Node, polygon::Polygon};
use crate::traits::BooleanOps;
use nalgebra::{Matrix4, Point3};
use parry3d_f64::bounding_volume::{Aabb, BoundingVolume};
use parry3d_f64::mass_properties::MassProperties;
use std::{fmt::Debug, sync::OnceLock};

pub mod bsp;
pub mod plane;
pub mod polygon;
pub mod shapes;
pub mod vertex;

/// A solid region of space bounded by a closed polygon soup.
///
/// `S` is the per-polygon metadata channel; the scene layer binds it to a
/// material id so boolean results remember which input contributed each face.
#[derive(Clone, Debug)]
pub struct Solid<S: Clone + Send + Sync + Debug> {
    /// Boundary polygons of the solid
    pub polygons: Vec<Polygon<S>>,

    /// Lazily calculated AABB that spans `polygons`.
    pub bounding_box: OnceLock<Aabb>,

    /// Metadata
    pub metadata: Option<S>,
}

impl<S: Clone + Send + Sync + Debug> Solid<S> {
    /// Build a Solid from an existing polygon list
    pub fn from_polygons(polygons: &[Polygon<S>], metadata: Option<S>) -> Self {
        Solid {
            polygons: polygons.to_vec(),
            bounding_box: OnceLock::new(),
            metadata,
        }
    }

    /// Whether this solid has no boundary polygons at all.
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Split polygons into (may_touch, cannot_touch) using bounding-box tests
    fn partition_polygons(
        polygons: &[Polygon<S>],
        other_bb: &Aabb,
    ) -> (Vec<Polygon<S>>, Vec<Polygon<S>>) {
        let mut maybe = Vec::new();
        let mut never = Vec::new();
        for p in polygons {
            if p.bounding_box().intersects(other_bb) {
                maybe.push(p.clone());
            } else {
                never.push(p.clone());
            }
        }
        (maybe, never)
    }

    /// Triangulate each polygon in the Solid returning a Solid containing triangles
    pub fn triangulate(&self) -> Solid<S> {
        let triangles = self
            .polygons
            .iter()
            .flat_map(|poly| {
                poly.triangulate()
                    .into_iter()
                    .map(move |triangle| Polygon::new(triangle.to_vec(), poly.metadata.clone()))
            })
            .collect::<Vec<_>>();

        Solid::from_polygons(&triangles, self.metadata.clone())
    }

    /// Mass, then center of mass, of the solid at the given `density`,
    /// integrated over its triangulated boundary.
    ///
    /// ## Errors
    /// [`GeometryError::EmptySolid`] when there is nothing to measure, and
    /// [`GeometryError::NonFiniteVertex`] when a vertex coordinate is NaN or
    /// infinite (e.g. after a degenerate transform).
    pub fn mass_properties(
        &self,
        density: Real,
    ) -> Result<(Real, Point3<Real>), GeometryError> {
        let triangulated = self.triangulate();
        if triangulated.polygons.is_empty() {
            return Err(GeometryError::EmptySolid);
        }

        let mut vertices = Vec::with_capacity(triangulated.polygons.len() * 3);
        let mut indices = Vec::with_capacity(triangulated.polygons.len());
        for poly in &triangulated.polygons {
            let offset = vertices.len() as u32;
            for v in &poly.vertices {
                if !(v.pos.x.is_finite() && v.pos.y.is_finite() && v.pos.z.is_finite()) {
                    return Err(GeometryError::NonFiniteVertex(v.pos));
                }
                vertices.push(v.pos);
            }
            indices.push([offset, offset + 1, offset + 2]);
        }

        let mp = MassProperties::from_trimesh(density, &vertices, &indices);
        Ok((mp.mass(), mp.local_com))
    }

    /// Enclosed volume of the solid, `0.0` when empty or unmeasurable.
    ///
    /// Signed contributions cancel correctly for inner cavities (their faces
    /// wind inward), so a carved solid reports the material left over.
    pub fn volume(&self) -> Real {
        self.mass_properties(1.0).map(|(mass, _)| mass).unwrap_or(0.0)
    }
}

impl<S: Clone + Send + Sync + Debug> BooleanOps for Solid<S> {
    /// Returns a new empty Solid
    fn new() -> Self {
        Solid {
            polygons: Vec::new(),
            bounding_box: OnceLock::new(),
            metadata: None,
        }
    }

    /// Return a new Solid representing the union of the two solids.
    ///
    /// ```text
    ///     +-------+            +-------+
    ///     |       |            |       |
    ///     |   a   |            |   c   |
    ///     |    +--+----+   =   |       +----+
    ///     +----+--+    |       +----+       |
    ///          |   b   |            |   c   |
    ///          |       |            |       |
    ///          +-------+            +-------+
    /// ```
    fn union(&self, other: &Solid<S>) -> Solid<S> {
        // Both trees must be complete: when one solid swallows the other,
        // every face of the inner one is removed by planes of faces whose
        // bounds it never touches.
        let mut a = Node::from_polygons(&self.polygons);
        let mut b = Node::from_polygons(&other.polygons);

        a.clip_to(&b);
        b.clip_to(&a);
        b.invert();
        b.clip_to(&a);
        b.invert();
        a.build(&b.all_polygons());

        Solid {
            polygons: a.all_polygons(),
            bounding_box: OnceLock::new(),
            metadata: self.metadata.clone(),
        }
    }

    /// Return a new Solid representing the difference of the two solids.
    ///
    /// ```text
    ///     +-------+            +-------+
    ///     |       |            |       |
    ///     |   a   |            |   c   |
    ///     |    +--+----+   =   |    +--+
    ///     +----+--+    |       +----+
    ///          |   b   |
    ///          |       |
    ///          +-------+
    /// ```
    fn difference(&self, other: &Solid<S>) -> Solid<S> {
        // solids whose bounds never meet cannot interact
        if !self.bounding_box().intersects(&other.bounding_box()) {
            return self.clone();
        }

        // Base faces whose bounds never touch the tool pass through unsplit.
        // The tool tree stays complete: its planes classify base faces even
        // where the tool's own bounds are far away.
        let (a_clip, a_passthru) =
            Self::partition_polygons(&self.polygons, &other.bounding_box());

        let mut a = Node::from_polygons(&a_clip);
        let mut b = Node::from_polygons(&other.polygons);

        a.invert();
        a.clip_to(&b);
        b.clip_to(&a);
        b.invert();
        b.clip_to(&a);
        b.invert();
        a.build(&b.all_polygons());
        a.invert();

        // combine results and untouched faces
        let mut final_polygons = a.all_polygons();
        final_polygons.extend(a_passthru);

        Solid {
            polygons: final_polygons,
            bounding_box: OnceLock::new(),
            metadata: self.metadata.clone(),
        }
    }

    /// Return a new Solid representing the intersection of the two solids.
    ///
    /// ```text
    ///     +-------+
    ///     |       |
    ///     |   a   |
    ///     |    +--+----+   =   +--+
    ///     +----+--+    |       +--+
    ///          |   b   |
    ///          |       |
    ///          +-------+
    /// ```
    fn intersection(&self, other: &Solid<S>) -> Solid<S> {
        let mut a = Node::from_polygons(&self.polygons);
        let mut b = Node::from_polygons(&other.polygons);

        a.invert();
        b.clip_to(&a);
        b.invert();
        a.clip_to(&b);
        b.clip_to(&a);
        a.build(&b.all_polygons());
        a.invert();

        Solid {
            polygons: a.all_polygons(),
            bounding_box: OnceLock::new(),
            metadata: self.metadata.clone(),
        }
    }

    /// Apply an arbitrary 3D transform (as a 4x4 matrix) to the solid.
    ///
    /// Positions go through the matrix directly; normals through its
    /// inverse-transpose so they stay perpendicular under non-uniform scale.
    fn transform(&self, mat: &Matrix4<Real>) -> Solid<S> {
        let normal_mat = mat
            .try_inverse()
            .map(|inv| inv.transpose())
            .unwrap_or_else(Matrix4::identity);

        let polygons = self
            .polygons
            .iter()
            .map(|poly| {
                let vertices = poly
                    .vertices
                    .iter()
                    .map(|vert| {
                        let mut vert = *vert;
                        vert.pos = mat.transform_point(&vert.pos);
                        vert.normal = normal_mat.transform_vector(&vert.normal).normalize();
                        vert
                    })
                    .collect();
                // rebuilding re-derives the plane and drops the cached AABB,
                // both of which are stale after the transform
                Polygon::new(vertices, poly.metadata.clone())
            })
            .collect::<Vec<_>>();

        Solid::from_polygons(&polygons, self.metadata.clone())
    }

    /// Returns an [`Aabb`] indicating the 3D bounds of all polygons.
    fn bounding_box(&self) -> Aabb {
        *self.bounding_box.get_or_init(|| {
            let mut mins = Point3::new(Real::MAX, Real::MAX, Real::MAX);
            let mut maxs = Point3::new(-Real::MAX, -Real::MAX, -Real::MAX);

            for poly in &self.polygons {
                for v in &poly.vertices {
                    mins.x = mins.x.min(v.pos.x);
                    mins.y = mins.y.min(v.pos.y);
                    mins.z = mins.z.min(v.pos.z);
                    maxs.x = maxs.x.max(v.pos.x);
                    maxs.y = maxs.y.max(v.pos.y);
                    maxs.z = maxs.z.max(v.pos.z);
                }
            }

            // no polygons: a trivial AABB at the origin
            if mins.x > maxs.x {
                return Aabb::new(Point3::origin(), Point3::origin());
            }

            Aabb::new(mins, maxs)
        })
    }

    /// Invalidates the cached bounding box.
    fn invalidate_bounding_box(&mut self) {
        self.bounding_box = OnceLock::new();
    }

    /// Invert this Solid (flip inside vs. outside)
    fn inverse(&self) -> Solid<S> {
        let mut solid = self.clone();
        for p in &mut solid.polygons {
            p.flip();
        }
        solid
    }
}
