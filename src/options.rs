use gfx_maths::Vec3;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ImportOptions {
    /// Negates the x, y or z component of every position and normal.
    pub flip_axis: [bool; 3],
    pub load_materials: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            flip_axis: [false; 3],
            load_materials: true,
        }
    }
}

impl ImportOptions {
    pub(crate) fn apply(&self, mut vector: Vec3) -> Vec3 {
        if self.flip_axis[0] {
            vector.x = -vector.x;
        }
        if self.flip_axis[1] {
            vector.y = -vector.y;
        }
        if self.flip_axis[2] {
            vector.z = -vector.z;
        }
        vector
    }
}
