mod builder;
mod parser;

use std::io::BufRead;

use rt_format::shapes::Shapes;

use crate::error::ImportResult;
use crate::material::MaterialLoader;
use crate::options::ImportOptions;

pub use builder::CornerLayout;

/// Reads a Wavefront `.obj` model and resolves its faces into triangles.
///
/// `mtllib` directives are handed to `loader`, `usemtl` binds the named material to the faces
/// that follow it.
pub fn read_obj<R: BufRead>(
    reader: R,
    options: &ImportOptions,
    loader: &mut dyn MaterialLoader,
) -> ImportResult<Shapes> {
    parser::parse(reader, options, loader)?.build()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::ImportError;
    use crate::material::MaterialTable;
    use gfx_maths::Vec3;
    use rt_format::shapes::{Material, Triangle};

    fn no_materials(_: &str, _: &mut MaterialTable) -> ImportResult<()> {
        Ok(())
    }

    fn read_str(source: &str) -> ImportResult<Shapes> {
        read_obj(source.as_bytes(), &ImportOptions::default(), &mut no_materials)
    }

    const SQUARE: &str = "v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
";

    #[test]
    fn test_single_triangle() -> ImportResult<()> {
        let shapes = read_str("v 0 0 0\nv 1 0 0\nv 1 1 0\nf 1 2 3\n")?;

        assert_eq!(
            shapes.triangles,
            vec![Triangle::new(
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0)
            )]
        );
        Ok(())
    }

    #[test]
    fn test_triangle_count() -> ImportResult<()> {
        let source = format!("{}f 1 2 3\nf 1 3 4\nf 2 3 4\nf -4 -3 -2\n", SQUARE);
        assert_eq!(read_str(&source)?.triangles.len(), 4);
        Ok(())
    }

    #[test]
    fn test_quad() -> ImportResult<()> {
        let shapes = read_str(&format!("{}f 1 2 3 4\n", SQUARE))?;
        let (a, b, c, d) = (
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        );

        assert_eq!(
            shapes.triangles,
            vec![Triangle::new(a, c, d), Triangle::new(a, b, c)]
        );
        Ok(())
    }

    #[test]
    fn test_negative_indices() -> ImportResult<()> {
        let relative = read_str(&format!("{}f -4 -3 -1\n", SQUARE))?;
        let absolute = read_str(&format!("{}f 1 2 4\n", SQUARE))?;

        assert_eq!(relative, absolute);
        Ok(())
    }

    #[test]
    fn test_attributes() -> ImportResult<()> {
        let shapes = read_str(&format!(
            "{}vt 0 0\nvn 0 0 1\nf 1/1/1 2/1/1 3/1/1\nf 1//1 3//1 4//1\nf 1/1 2/1 3/1\n",
            SQUARE
        ))?;

        let up = Vec3::new(0.0, 0.0, 1.0);
        assert_eq!(shapes.triangles[0].normals, Some([up; 3]));
        assert!(shapes.triangles[0].texcoords.is_some());
        assert_eq!(shapes.triangles[1].normals, Some([up; 3]));
        assert_eq!(shapes.triangles[1].texcoords, None);
        assert_eq!(shapes.triangles[2].normals, None);
        assert!(shapes.triangles[2].texcoords.is_some());

        let trailing = read_str(&format!("{}vt 0 0\nf 1/1/ 2/1/ 3/1/\n", SQUARE))?;
        assert!(trailing.triangles[0].texcoords.is_some());
        assert_eq!(trailing.triangles[0].normals, None);

        assert!(matches!(
            read_str(&format!("{}vn 0 0 1\nf 1//1 2//2 3//1\n", SQUARE)),
            Err(ImportError::IndexOutOfRange { index: 2, len: 1 })
        ));
        Ok(())
    }

    #[test]
    fn test_materials() -> ImportResult<()> {
        let mut loader = |_: &str, table: &mut MaterialTable| -> ImportResult<()> {
            table.register(Material::named("white"));
            table.register(Material::named("red"));
            Ok(())
        };
        let source = format!(
            "mtllib cornell.mtl\n{}f 1 2 3\nusemtl red\nf 1 3 4\nf 2 3 4\ng box\nf 1 2 4\nusemtl white\nf 1 2 3 4\n",
            SQUARE
        );

        let shapes = read_obj(source.as_bytes(), &ImportOptions::default(), &mut loader)?;
        let materials: Vec<_> = shapes
            .triangles
            .iter()
            .map(|triangle| triangle.material)
            .collect();

        assert_eq!(
            materials,
            vec![None, Some(1), Some(1), None, Some(0), Some(0)]
        );
        assert_eq!(shapes.materials.len(), 2);
        assert_eq!(
            shapes.material(&shapes.triangles[1]).map(|m| m.name.as_str()),
            Some("red")
        );
        Ok(())
    }
}
