use crate::error::Result;
use gfx_maths::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Index of a [`Material`] inside [`Shapes::materials`].
pub type MaterialIndex = usize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub positions: [Vec3; 3],
    pub normals: Option<[Vec3; 3]>,
    pub texcoords: Option<[Vec2; 3]>,
    pub material: Option<MaterialIndex>,
}

impl Triangle {
    pub fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self {
            positions: [a, b, c],
            normals: None,
            texcoords: None,
            material: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub emissive: Vec3,
    pub shininess: f32,
    pub opacity: f32,
}

impl Material {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::new(),
            ambient: Vec3::zero(),
            diffuse: Vec3::new(1.0, 1.0, 1.0),
            specular: Vec3::zero(),
            emissive: Vec3::zero(),
            shininess: 0.0,
            opacity: 1.0,
        }
    }
}

/// Triangles ready to be rendered, together with the materials they reference by index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Shapes {
    pub triangles: Vec<Triangle>,
    pub materials: Vec<Material>,
}

impl Shapes {
    /// Moves everything from `other` to the end of `self`.
    ///
    /// Material indices of the appended triangles are shifted past the materials already stored,
    /// so they keep pointing at their own material.
    pub fn append(&mut self, other: Shapes) {
        let offset = self.materials.len();
        self.materials.extend(other.materials);
        self.triangles
            .extend(other.triangles.into_iter().map(|mut triangle| {
                triangle.material = triangle.material.map(|index| index + offset);
                triangle
            }));
    }

    pub fn material(&self, triangle: &Triangle) -> Option<&Material> {
        triangle
            .material
            .and_then(|index| self.materials.get(index))
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        Ok(bincode::deserialize::<Shapes>(&bytes)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        Shapes::from_bytes(data)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(&self)?)
    }
}
