//! Long-lived boolean operands: shape + transform + material

use crate::float_types::Real;
use crate::scene::material::MaterialId;
use crate::solid::Solid;
use crate::traits::BooleanOps;
use nalgebra::{Matrix4, Rotation3, Translation3, Vector3};
use std::sync::OnceLock;

/// A world axis a driver can displace a brush along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// One named operand of a boolean operation.
///
/// A brush owns an immutable local-space solid, a material, and a decomposed
/// transform. Brushes live for the whole session; only the transform mutates
/// (once per frame, by the transform driver).
///
/// The world-space solid is cached in a `OnceLock` and rebuilt on first read
/// after any transform mutation, so evaluation can never observe geometry
/// that lags behind the transform; the classic stale-matrix bug is
/// unrepresentable.
#[derive(Debug, Clone)]
pub struct Brush {
    name: String,
    solid: Solid<MaterialId>,
    material: MaterialId,
    translation: Vector3<Real>,
    rotation: Rotation3<Real>,
    scale: Vector3<Real>,
    world: OnceLock<Solid<MaterialId>>,
}

impl Brush {
    /// Create a brush from a local-space solid.
    ///
    /// Every polygon is stamped with the brush's material id so boolean
    /// results can be regrouped by originating brush.
    pub fn new(name: impl Into<String>, solid: Solid<MaterialId>, material: MaterialId) -> Self {
        let mut solid = solid;
        for poly in &mut solid.polygons {
            poly.set_metadata(material);
        }
        solid.metadata = Some(material);

        Brush {
            name: name.into(),
            solid,
            material,
            translation: Vector3::zeros(),
            rotation: Rotation3::identity(),
            scale: Vector3::new(1.0, 1.0, 1.0),
            world: OnceLock::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn material(&self) -> MaterialId {
        self.material
    }

    pub const fn position(&self) -> Vector3<Real> {
        self.translation
    }

    pub fn set_position(&mut self, position: Vector3<Real>) {
        self.translation = position;
        self.invalidate_world();
    }

    /// Move the brush along one world axis, keeping the other components.
    pub fn set_axis_position(&mut self, axis: Axis, value: Real) {
        match axis {
            Axis::X => self.translation.x = value,
            Axis::Y => self.translation.y = value,
            Axis::Z => self.translation.z = value,
        }
        self.invalidate_world();
    }

    pub fn set_rotation(&mut self, rotation: Rotation3<Real>) {
        self.rotation = rotation;
        self.invalidate_world();
    }

    pub fn set_scale(&mut self, scale: Vector3<Real>) {
        self.scale = scale;
        self.invalidate_world();
    }

    /// The local→world matrix, translation ∘ rotation ∘ scale.
    pub fn local_matrix(&self) -> Matrix4<Real> {
        Translation3::from(self.translation).to_homogeneous()
            * self.rotation.to_homogeneous()
            * Matrix4::new_nonuniform_scaling(&self.scale)
    }

    /// The brush's solid in world space, rebuilt lazily after a transform
    /// change.
    pub fn world_solid(&self) -> &Solid<MaterialId> {
        self.world
            .get_or_init(|| self.solid.transform(&self.local_matrix()))
    }

    fn invalidate_world(&mut self) {
        self.world = OnceLock::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::material::MaterialId;

    fn sphere_brush() -> Brush {
        Brush::new(
            "tool",
            Solid::sphere(1.2, 8, 4, None),
            MaterialId(0),
        )
    }

    #[test]
    fn world_solid_follows_position_changes() {
        let mut brush = sphere_brush();
        assert!((brush.world_solid().bounding_box().maxs.x - 1.2).abs() < 1e-9);

        brush.set_axis_position(Axis::X, 3.0);
        let aabb = brush.world_solid().bounding_box();
        assert!(
            (aabb.maxs.x - 4.2).abs() < 1e-9,
            "world cache must be rebuilt after a move, got max x {}",
            aabb.maxs.x
        );
    }

    #[test]
    fn polygons_are_stamped_with_the_brush_material() {
        let brush = sphere_brush();
        assert!(
            brush
                .world_solid()
                .polygons
                .iter()
                .all(|p| p.metadata() == Some(&MaterialId(0)))
        );
    }
}
