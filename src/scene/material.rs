//! Render-surface descriptors and the scene material table

/// Index of a [`Material`] in a scene's [`MaterialTable`].
///
/// This is what travels through the solid kernel as polygon metadata, so
/// boolean results can be regrouped by originating surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialId(pub u32);

/// A render-surface descriptor.
///
/// The crate does not render; these fields describe the surface to whatever
/// host does, mirroring the knobs the scene actually uses.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Linear RGBA; alpha below 1.0 means the surface renders translucent.
    pub color: [f32; 4],
    /// Per-face normals instead of smooth shading.
    pub flat_shading: bool,
    /// Render edges only.
    pub wireframe: bool,
}

impl Material {
    /// An opaque smooth-shaded surface of the given color.
    pub const fn solid_color(r: f32, g: f32, b: f32) -> Self {
        Material {
            color: [r, g, b, 1.0],
            flat_shading: false,
            wireframe: false,
        }
    }

    /// A wireframe surface of the given color.
    pub const fn wireframe(r: f32, g: f32, b: f32) -> Self {
        Material {
            color: [r, g, b, 1.0],
            flat_shading: false,
            wireframe: true,
        }
    }

    pub const fn with_opacity(mut self, opacity: f32) -> Self {
        self.color[3] = opacity;
        self
    }

    pub const fn with_flat_shading(mut self) -> Self {
        self.flat_shading = true;
        self
    }
}

/// Scene-owned table of materials, indexed by [`MaterialId`].
#[derive(Debug, Clone, Default)]
pub struct MaterialTable {
    materials: Vec<Material>,
}

impl MaterialTable {
    pub const fn new() -> Self {
        MaterialTable {
            materials: Vec::new(),
        }
    }

    /// Register a material and return its id.
    pub fn insert(&mut self, material: Material) -> MaterialId {
        let id = MaterialId(self.materials.len() as u32);
        self.materials.push(material);
        id
    }

    pub fn get(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}
