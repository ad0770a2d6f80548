use std::io::BufRead;

use gfx_maths::Vec3;
use log::debug;
use rt_format::shapes::{Shapes, Triangle};

use crate::error::{ImportError, ImportResult, RecordError};
use crate::options::ImportOptions;
use crate::tokenizer::Tokenizer;

// header counts are untrusted, larger models grow past this while reading
const MAX_PREALLOCATED: usize = 1 << 16;

/// Reads an Object File Format (`.off`) model.
///
/// The file starts with a 3 character `OFF` header, followed by the vertex, face and edge counts.
/// Faces index the vertex block directly, starting at 0. A face with 4 or more corners becomes the
/// triangles (0, 1, 2) and (0, 2, 3); further corners and trailing values on the line are ignored.
pub fn read_off<R: BufRead>(reader: R, options: &ImportOptions) -> ImportResult<Shapes> {
    let mut tokenizer = Tokenizer::new(reader);

    tokenizer.skip_bytes(3)?;
    let vertex_count: usize = tokenizer.parse_next("vertex count")?;
    let face_count: usize = tokenizer.parse_next("face count")?;
    // edge count
    tokenizer.skip_line();
    debug!("Reading {} vertices and {} faces", vertex_count, face_count);

    let mut positions = Vec::with_capacity(vertex_count.min(MAX_PREALLOCATED));
    for _ in 0..vertex_count {
        let x = tokenizer.parse_next("x")?;
        let y = tokenizer.parse_next("y")?;
        let z = tokenizer.parse_next("z")?;
        positions.push(options.apply(Vec3::new(x, y, z)));
    }

    let mut triangles = Vec::with_capacity(face_count.min(MAX_PREALLOCATED));
    for _ in 0..face_count {
        let corner_count: usize = tokenizer.parse_next("corner count")?;
        if corner_count < 3 {
            return Err(tokenizer.malformed(RecordError::CornerCount(corner_count)));
        }

        let first = vertex(&mut tokenizer, &positions)?;
        let second = vertex(&mut tokenizer, &positions)?;
        let third = vertex(&mut tokenizer, &positions)?;
        triangles.push(Triangle::new(first, second, third));

        if corner_count >= 4 {
            let fourth = vertex(&mut tokenizer, &positions)?;
            triangles.push(Triangle::new(first, third, fourth));
        }

        tokenizer.skip_line();
    }

    Ok(Shapes {
        triangles,
        materials: Vec::new(),
    })
}

fn vertex<R: BufRead>(tokenizer: &mut Tokenizer<R>, positions: &[Vec3]) -> ImportResult<Vec3> {
    let index: usize = tokenizer.parse_next("vertex index")?;
    positions
        .get(index)
        .copied()
        .ok_or(ImportError::IndexOutOfRange {
            index: index as i64,
            len: positions.len(),
        })
}

#[cfg(test)]
mod test {
    use super::*;

    fn read_str(source: &str) -> ImportResult<Shapes> {
        read_off(source.as_bytes(), &ImportOptions::default())
    }

    #[test]
    fn test_quad() -> ImportResult<()> {
        let shapes = read_str(
            "OFF
4 1 4
0 0 0
1 0 0
1 1 0
0 1 0
4 0 1 2 3
",
        )?;
        let (v0, v1, v2, v3) = (
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        );

        assert_eq!(
            shapes.triangles,
            vec![Triangle::new(v0, v1, v2), Triangle::new(v0, v2, v3)]
        );
        assert!(shapes.materials.is_empty());
        Ok(())
    }

    #[test]
    fn test_header_on_one_line_and_trailing_values() -> ImportResult<()> {
        let shapes = read_str("OFF 3 2 0\n0 0 0  1 0 0\n1 1 0\n3 0 1 2 255 0 0\n3 2 1 0\n")?;

        assert_eq!(shapes.triangles.len(), 2);
        assert_eq!(shapes.triangles[1].positions[0], Vec3::new(1.0, 1.0, 0.0));
        Ok(())
    }

    #[test]
    fn test_flip_axis() -> ImportResult<()> {
        let options = ImportOptions {
            flip_axis: [true, false, false],
            ..ImportOptions::default()
        };
        let shapes = read_off("OFF\n3 1 0\n1 0 0\n0 1 0\n0 0 1\n3 0 1 2\n".as_bytes(), &options)?;

        assert_eq!(shapes.triangles[0].positions[0], Vec3::new(-1.0, 0.0, 0.0));
        Ok(())
    }

    #[test]
    fn test_huge_counts_run_out_of_input() {
        assert!(matches!(
            read_str("OFF\n3 2305843009213693951 0\n0 0 0\n1 0 0\n1 1 0\n3 0 1 2\n"),
            Err(ImportError::MalformedRecord {
                source: RecordError::Missing("corner count"),
                ..
            })
        ));
        assert!(matches!(
            read_str("OFF\n18446744073709551615 1 0\n0 0 0\n"),
            Err(ImportError::MalformedRecord {
                source: RecordError::Missing("x"),
                ..
            })
        ));
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            read_str("OFF\n3 1 0\n0 0 0\n1 0 0\n1 1 0\n3 0 1 3\n"),
            Err(ImportError::IndexOutOfRange { index: 3, len: 3 })
        ));
        assert!(matches!(
            read_str("OFF\n3 1 0\n0 0 0\n1 0 0\n1 1 0\n2 0 1\n"),
            Err(ImportError::MalformedRecord {
                line: 6,
                source: RecordError::CornerCount(2)
            })
        ));
        assert!(matches!(
            read_str("OFF\n3 1 0\n0 0 0\n1 0 0\n"),
            Err(ImportError::MalformedRecord {
                source: RecordError::Missing("x"),
                ..
            })
        ));
    }
}
