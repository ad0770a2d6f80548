use std::iter;

use gfx_maths::*;
use log::debug;
use rt_format::shapes::{MaterialIndex, Shapes, Triangle};

use crate::error::{ImportError, ImportResult};
use crate::index;
use crate::material::MaterialTable;
use crate::options::ImportOptions;

/// Which attributes the corners of a face reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CornerLayout {
    /// `v`
    Position,
    /// `v/vt`
    PositionTexcoord,
    /// `v//vn`
    PositionNormal,
    /// `v/vt/vn`
    PositionTexcoordNormal,
}

/// Raw indices of one face corner as written in the file, `0` marks an absent attribute.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub(crate) struct ObjCorner {
    pub(crate) position: i64,
    pub(crate) texcoord: i64,
    pub(crate) normal: i64,
}

#[derive(Debug, PartialEq)]
pub(crate) struct ObjFace {
    pub(crate) layout: CornerLayout,
    pub(crate) corners: Vec<ObjCorner>,
}

impl ObjFace {
    /// Splits the face into triangles around its first corner.
    ///
    /// Quads yield the far triangle (0, 2, 3) before the near one (0, 1, 2).
    pub(crate) fn triangles(&self) -> impl Iterator<Item = [ObjCorner; 3]> + '_ {
        let far = match self.corners[..] {
            [a, _, c, d] => Some([a, c, d]),
            _ => None,
        };
        let near = [self.corners[0], self.corners[1], self.corners[2]];

        far.into_iter().chain(iter::once(near))
    }
}

/// Index triples of one submesh; the three vectors always have the same length, a multiple of 3.
#[derive(Debug, Default)]
pub(crate) struct ObjSubmesh {
    pub(crate) position_indices: Vec<i64>,
    pub(crate) texcoord_indices: Vec<i64>,
    pub(crate) normal_indices: Vec<i64>,
    pub(crate) material: Option<MaterialIndex>,
}

impl ObjSubmesh {
    fn push_triangle(&mut self, corners: [ObjCorner; 3]) {
        for corner in corners {
            self.position_indices.push(corner.position);
            self.texcoord_indices.push(corner.texcoord);
            self.normal_indices.push(corner.normal);
        }
    }

    fn is_empty(&self) -> bool {
        self.position_indices.is_empty()
    }
}

#[derive(Debug)]
pub(crate) struct ObjMeshBuilder {
    pub(crate) positions: Vec<Vec3>,
    pub(crate) texcoords: Vec<Vec2>,
    pub(crate) normals: Vec<Vec3>,
    // never empty, the last one receives new faces
    pub(crate) submeshes: Vec<ObjSubmesh>,
    pub(crate) materials: MaterialTable,
    pub(crate) options: ImportOptions,
}

impl Default for ObjMeshBuilder {
    fn default() -> Self {
        Self::new(ImportOptions::default())
    }
}

impl ObjMeshBuilder {
    pub(crate) fn new(options: ImportOptions) -> Self {
        Self {
            positions: Vec::new(),
            texcoords: Vec::new(),
            normals: Vec::new(),
            submeshes: vec![ObjSubmesh::default()],
            materials: MaterialTable::default(),
            options,
        }
    }

    fn current_submesh(&mut self) -> &mut ObjSubmesh {
        if self.submeshes.is_empty() {
            self.submeshes.push(ObjSubmesh::default());
        }
        let last = self.submeshes.len() - 1;
        &mut self.submeshes[last]
    }

    pub(crate) fn push_position(&mut self, position: Vec3) {
        let position = self.options.apply(position);
        self.positions.push(position);
    }

    pub(crate) fn push_texcoord(&mut self, texcoord: Vec2) {
        self.texcoords.push(texcoord);
    }

    pub(crate) fn push_normal(&mut self, normal: Vec3) {
        let normal = self.options.apply(normal);
        self.normals.push(normal);
    }

    pub(crate) fn push_face(&mut self, face: &ObjFace) {
        let submesh = self.current_submesh();
        for triangle in face.triangles() {
            submesh.push_triangle(triangle);
        }
    }

    /// Starts a new submesh for an `o` or `g` directive, unless the current one has no faces yet.
    pub(crate) fn begin_group(&mut self) {
        if !self.current_submesh().is_empty() {
            self.submeshes.push(ObjSubmesh::default());
        }
    }

    /// Binds the material named `name` to the faces that follow.
    pub(crate) fn use_material(&mut self, name: &str) -> ImportResult<()> {
        let index = self
            .materials
            .index_of(name)
            .ok_or_else(|| ImportError::UnknownMaterial(name.into()))?;

        // faces already in the submesh keep their material
        if !self.current_submesh().is_empty() {
            self.submeshes.push(ObjSubmesh::default());
        }
        self.current_submesh().material = Some(index);
        Ok(())
    }

    /// Resolves the collected indices into triangles, submesh by submesh in file order.
    pub(crate) fn build(self) -> ImportResult<Shapes> {
        let bind_materials = !self.materials.is_empty();
        let mut triangles = Vec::new();

        for (submesh_index, submesh) in self.submeshes.iter().enumerate() {
            debug_assert_eq!(submesh.position_indices.len(), submesh.texcoord_indices.len());
            debug_assert_eq!(submesh.position_indices.len(), submesh.normal_indices.len());

            let material = if bind_materials {
                submesh.material
            } else {
                None
            };

            let corners = submesh
                .position_indices
                .chunks_exact(3)
                .zip(submesh.texcoord_indices.chunks_exact(3))
                .zip(submesh.normal_indices.chunks_exact(3));

            for ((positions, texcoords), normals) in corners {
                triangles.push(Triangle {
                    positions: fetch(positions, &self.positions)?,
                    normals: fetch_attribute(normals, &self.normals)?,
                    texcoords: fetch_attribute(texcoords, &self.texcoords)?,
                    material,
                });
            }

            debug!(
                "Submesh {} resolved into {} triangles",
                submesh_index,
                submesh.position_indices.len() / 3
            );
        }

        Ok(Shapes {
            triangles,
            materials: self.materials.into_materials(),
        })
    }
}

fn fetch<T: Copy>(indices: &[i64], values: &[T]) -> ImportResult<[T; 3]> {
    Ok([
        values[index::resolve(indices[0], values.len())?],
        values[index::resolve(indices[1], values.len())?],
        values[index::resolve(indices[2], values.len())?],
    ])
}

// attributes a face does not reference are left out
fn fetch_attribute<T: Copy>(indices: &[i64], values: &[T]) -> ImportResult<Option<[T; 3]>> {
    if indices.contains(&0) {
        return Ok(None);
    }
    fetch(indices, values).map(Some)
}
