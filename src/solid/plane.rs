//! Planes in 3-space and polygon splitting against them.
//!
//! A plane is stored as three non-collinear points rather than
//! normal-plus-offset, so orientation tests can use the `robust` crate's
//! `orient3d` predicate (Shewchuk's exact arithmetic) instead of a computed
//! normal whose error grows with coordinate magnitude. Polygon splitting is
//! the classic Sutherland–Hodgman sweep generalized to 3D: classify every
//! vertex, pass through the easy whole-polygon cases, and interpolate new
//! vertices on spanning edges. All tolerances are governed by
//! [`float_types::EPSILON`](crate::float_types::EPSILON).

use crate::float_types::{EPSILON, Real};
use crate::solid::polygon::Polygon;
use crate::solid::vertex::Vertex;
use nalgebra::{Point3, Vector3};
use robust::{Coord3D, orient3d};

/// Classification of a polygon or point that lies exactly in the plane
/// (i.e. within `±EPSILON` of the plane).
pub const COPLANAR: i8 = 0;

/// Classification of a polygon or point that lies strictly on the
/// *front* side of the plane (the side the normal points toward).
pub const FRONT: i8 = 1;

/// Classification of a polygon or point that lies strictly on the
/// *back* side of the plane (opposite the normal direction).
pub const BACK: i8 = 2;

/// A polygon or edge that straddles the plane, producing pieces
/// on both the front **and** the back.
pub const SPANNING: i8 = 3;

/// A plane in 3D space defined by three points
#[derive(Debug, Clone)]
pub struct Plane {
    pub point_a: Point3<Real>,
    pub point_b: Point3<Real>,
    pub point_c: Point3<Real>,
}

fn coord3d(point: Point3<Real>) -> Coord3D<Real> {
    Coord3D {
        x: point.coords.x,
        y: point.coords.y,
        z: point.coords.z,
    }
}

impl Plane {
    /// Tries to pick three vertices that span the largest-area triangle
    /// (maximally well-spaced) and returns a plane defined by them.
    /// Care is taken to preserve the original winding of the vertices.
    ///
    /// Cost: O(n²) over the vertex count, which stays tiny for the quads and
    /// split fragments this crate produces.
    pub fn from_vertices(vertices: &[Vertex]) -> Plane {
        let n = vertices.len();
        let reference_plane = Plane {
            point_a: vertices[0].pos,
            point_b: vertices[1].pos,
            point_c: vertices[2].pos,
        };
        if n == 3 {
            return reference_plane; // already optimal
        }

        // longest chord (i0, i1)
        let Some((i0, i1, _)) = (0..n)
            .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
            .map(|(i, j)| {
                let d2 = (vertices[i].pos - vertices[j].pos).norm_squared();
                (i, j, d2)
            })
            .max_by(|a, b| a.2.total_cmp(&b.2))
        else {
            return reference_plane;
        };

        let p0 = vertices[i0].pos;
        let p1 = vertices[i1].pos;
        let dir = p1 - p0;
        if dir.norm_squared() < EPSILON * EPSILON {
            return reference_plane; // everything almost coincident
        }

        // vertex farthest from the line p0-p1 → i2
        let Some((i2, max_area2)) = vertices
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != i0 && *idx != i1)
            .map(|(idx, v)| {
                let a2 = (v.pos - p0).cross(&dir).norm_squared(); // ∝ area²
                (idx, a2)
            })
            .max_by(|a, b| a.1.total_cmp(&b.1))
        else {
            return reference_plane;
        };

        if max_area2 <= EPSILON * EPSILON {
            return reference_plane; // all vertices collinear
        }
        let p2 = vertices[i2].pos;

        // build the plane, then orient it to match the original winding
        let mut plane = Plane {
            point_a: p0,
            point_b: p1,
            point_c: p2,
        };

        // Reference normal for the original polygon via Newell's method.
        let reference_normal = vertices.iter().zip(vertices.iter().cycle().skip(1)).fold(
            Vector3::zeros(),
            |acc, (curr, next)| {
                acc + (curr.pos - Point3::origin()).cross(&(next.pos - Point3::origin()))
            },
        );

        if plane.normal().dot(&reference_normal) < 0.0 {
            plane.flip(); // flip in place to agree with winding
        }
        plane
    }

    /// Orient a coplanar polygon's plane against this one by testing a point
    /// nudged along its normal.
    #[inline]
    pub fn orient_plane(&self, other: &Plane) -> i8 {
        let test_point = other.point_a + other.normal();
        self.orient_point(&test_point)
    }

    /// Classify `point` against the plane as [`FRONT`], [`BACK`] or
    /// [`COPLANAR`] (within the `EPSILON` band).
    #[inline]
    pub fn orient_point(&self, point: &Point3<Real>) -> i8 {
        // orient3d is positive when `point` lies below the plane through
        // (a, b, c) viewed so a, b, c wind counterclockwise from above.
        let sign = orient3d(
            coord3d(self.point_a),
            coord3d(self.point_b),
            coord3d(self.point_c),
            coord3d(*point),
        );
        if sign > EPSILON {
            BACK
        } else if sign < -EPSILON {
            FRONT
        } else {
            COPLANAR
        }
    }

    /// The (right-handed) unit normal `((b-a) × (c-a)).normalize()`,
    /// or zero for a degenerate plane.
    #[inline]
    pub fn normal(&self) -> Vector3<Real> {
        let n = (self.point_b - self.point_a).cross(&(self.point_c - self.point_a));
        let len = n.norm();
        if len < EPSILON { Vector3::zeros() } else { n / len }
    }

    /// Signed offset of the plane from the origin: `d = n · a`.
    #[inline]
    pub fn offset(&self) -> Real {
        self.normal().dot(&self.point_a.coords)
    }

    /// Reverse the plane's facing by swapping two defining points.
    pub fn flip(&mut self) {
        std::mem::swap(&mut self.point_a, &mut self.point_b);
    }

    /// Classify a polygon with respect to the plane.
    /// Returns a bitmask of [`COPLANAR`], [`FRONT`] and [`BACK`].
    pub fn classify_polygon<S: Clone + Send + Sync>(&self, polygon: &Polygon<S>) -> i8 {
        let mut polygon_type: i8 = 0;
        for vertex in &polygon.vertices {
            polygon_type |= self.orient_point(&vertex.pos);
        }
        polygon_type
    }

    /// Splits a polygon by this plane, returning four buckets:
    /// `(coplanar_front, coplanar_back, front, back)`.
    #[allow(clippy::type_complexity)]
    pub fn split_polygon<S: Clone + Send + Sync>(
        &self,
        polygon: &Polygon<S>,
    ) -> (
        Vec<Polygon<S>>,
        Vec<Polygon<S>>,
        Vec<Polygon<S>>,
        Vec<Polygon<S>>,
    ) {
        let mut coplanar_front = Vec::new();
        let mut coplanar_back = Vec::new();
        let mut front = Vec::new();
        let mut back = Vec::new();

        let normal = self.normal();

        let types: Vec<i8> = polygon
            .vertices
            .iter()
            .map(|v| self.orient_point(&v.pos))
            .collect();
        let polygon_type = types.iter().fold(0, |acc, &t| acc | t);

        match polygon_type {
            COPLANAR => {
                if normal.dot(&polygon.plane.normal()) > 0.0 {
                    coplanar_front.push(polygon.clone());
                } else {
                    coplanar_back.push(polygon.clone());
                }
            },
            FRONT => front.push(polygon.clone()),
            BACK => back.push(polygon.clone()),

            // true spanning – do the split
            _ => {
                let mut split_front = Vec::<Vertex>::new();
                let mut split_back = Vec::<Vertex>::new();

                for i in 0..polygon.vertices.len() {
                    // j wraps around to the first vertex after the last
                    let j = (i + 1) % polygon.vertices.len();
                    let type_i = types[i];
                    let type_j = types[j];
                    let vertex_i = &polygon.vertices[i];
                    let vertex_j = &polygon.vertices[j];

                    // A vertex not strictly behind the plane belongs to the
                    // front piece, one not strictly in front to the back
                    // piece; coplanar vertices join both.
                    if type_i != BACK {
                        split_front.push(*vertex_i);
                    }
                    if type_i != FRONT {
                        split_back.push(*vertex_i);
                    }

                    // Edge crosses the plane: interpolate the crossing vertex
                    // and add it to both pieces.
                    if (type_i | type_j) == SPANNING {
                        let denom = normal.dot(&(vertex_j.pos - vertex_i.pos));
                        if denom.abs() > EPSILON {
                            let intersection =
                                (self.offset() - normal.dot(&vertex_i.pos.coords)) / denom;
                            let vertex_new = vertex_i.interpolate(vertex_j, intersection);
                            split_front.push(vertex_new);
                            split_back.push(vertex_new);
                        }
                    }
                }

                // Only pieces that still form a polygon survive
                if split_front.len() >= 3 {
                    front.push(Polygon::new(split_front, polygon.metadata.clone()));
                }
                if split_back.len() >= 3 {
                    back.push(Polygon::new(split_back, polygon.metadata.clone()));
                }
            },
        }

        (coplanar_front, coplanar_back, front, back)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plane_normal_is_stable_under_vertex_rotation() {
        let vertices = [
            Vertex::new(Point3::new(4.5, 1.0, 2.0), Vector3::y()),
            Vertex::new(Point3::new(4.5, 1.0, 1.0), Vector3::y()),
            Vertex::new(Point3::new(3.0, 1.0, 1.0), Vector3::y()),
            Vertex::new(Point3::new(3.0, 1.0, 2.0), Vector3::y()),
            Vertex::new(Point3::new(3.5, 1.0, 2.0), Vector3::y()),
            Vertex::new(Point3::new(3.5, 1.0, 1.5), Vector3::y()),
            Vertex::new(Point3::new(4.0, 1.0, 1.5), Vector3::y()),
            Vertex::new(Point3::new(4.0, 1.0, 2.0), Vector3::y()),
        ];

        // Cycling the vertex list does not change the winding order, so it
        // must not change the resulting plane's normal.
        for cycle_rotation in 0..vertices.len() {
            let mut vertices = vertices;
            vertices.rotate_right(cycle_rotation);
            let plane = Plane::from_vertices(&vertices);

            assert!(
                plane.normal() == Vector3::new(0.0, 1.0, 0.0),
                "unexpected normal {} after rotating the vertex list {} times",
                plane.normal(),
                cycle_rotation,
            );
        }
    }

    #[test]
    fn split_quad_across_plane_yields_front_and_back() {
        let quad: Polygon<()> = Polygon::new(
            vec![
                Vertex::new(Point3::new(-1.0, 0.0, -1.0), Vector3::y()),
                Vertex::new(Point3::new(1.0, 0.0, -1.0), Vector3::y()),
                Vertex::new(Point3::new(1.0, 0.0, 1.0), Vector3::y()),
                Vertex::new(Point3::new(-1.0, 0.0, 1.0), Vector3::y()),
            ],
            None,
        );
        // x = 0 plane
        let splitter = Plane {
            point_a: Point3::origin(),
            point_b: Point3::new(0.0, 0.0, 1.0),
            point_c: Point3::new(0.0, 1.0, 0.0),
        };

        let (coplanar_front, coplanar_back, front, back) = splitter.split_polygon(&quad);
        assert!(coplanar_front.is_empty() && coplanar_back.is_empty());
        assert_eq!(front.len(), 1);
        assert_eq!(back.len(), 1);
        // two original corners plus two interpolated crossings per piece
        assert_eq!(front[0].vertices.len(), 4);
        assert_eq!(back[0].vertices.len(), 4);
    }

    #[test]
    fn orient_point_classifies_both_sides() {
        let plane = Plane {
            point_a: Point3::new(0.0, 0.0, 0.0),
            point_b: Point3::new(1.0, 0.0, 0.0),
            point_c: Point3::new(0.0, 1.0, 0.0),
        };
        assert_eq!(plane.orient_point(&Point3::new(0.3, 0.3, 1.0)), FRONT);
        assert_eq!(plane.orient_point(&Point3::new(0.3, 0.3, -1.0)), BACK);
        assert_eq!(plane.orient_point(&Point3::new(0.3, 0.3, 0.0)), COPLANAR);
    }
}
