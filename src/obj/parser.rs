use std::io::BufRead;

use gfx_maths::*;
use log::{debug, warn};

use super::builder::*;
use crate::error::{ImportError, ImportResult, RecordError};
use crate::material::MaterialLoader;
use crate::options::ImportOptions;
use crate::tokenizer::Tokenizer;

/// Directive selected by the leading characters of a statement.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Directive {
    Position,
    Texcoord,
    Normal,
    Face,
    MaterialLibrary,
    UseMaterial,
    Group,
    Unsupported,
}

impl Directive {
    // a `v` followed by anything but `n` or `t` is skipped instead of read as a position
    fn of(token: &str) -> Self {
        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some('v'), None) => Directive::Position,
            (Some('v'), Some('n')) => Directive::Normal,
            (Some('v'), Some('t')) => Directive::Texcoord,
            // parameter space vertices
            (Some('v'), Some(_)) => Directive::Unsupported,
            (Some('f'), _) => Directive::Face,
            (Some('m'), _) => Directive::MaterialLibrary,
            (Some('u'), _) => Directive::UseMaterial,
            (Some('o'), _) | (Some('g'), _) => Directive::Group,
            _ => Directive::Unsupported,
        }
    }
}

// parses wavefront obj (https://en.wikipedia.org/wiki/Wavefront_.obj_file)
pub(crate) fn parse<R: BufRead>(
    reader: R,
    options: &ImportOptions,
    loader: &mut dyn MaterialLoader,
) -> ImportResult<ObjMeshBuilder> {
    let mut builder = ObjMeshBuilder::new(*options);
    let mut tokenizer = Tokenizer::new(reader);

    while let Some(token) = tokenizer.next_token()? {
        let directive = Directive::of(token);
        if directive == Directive::Unsupported {
            if !token.starts_with('#') {
                debug!("Skipping unsupported statement: \"{}\"", token);
            }
            tokenizer.skip_line();
            continue;
        }

        parse_directive(directive, &mut tokenizer, &mut builder, loader)?;
    }

    Ok(builder)
}

fn parse_directive<R: BufRead>(
    directive: Directive,
    tokenizer: &mut Tokenizer<R>,
    builder: &mut ObjMeshBuilder,
    loader: &mut dyn MaterialLoader,
) -> ImportResult<()> {
    match directive {
        Directive::Position => {
            let position = parse_vec3(tokenizer)?;
            builder.push_position(position);
            tokenizer.skip_line();
        }
        Directive::Texcoord => {
            let u = tokenizer.parse_next("u")?;
            let v = tokenizer.parse_next("v")?;
            builder.push_texcoord(Vec2::new(u, v));
            tokenizer.skip_line();
        }
        Directive::Normal => {
            let normal = parse_vec3(tokenizer)?;
            builder.push_normal(normal);
            tokenizer.skip_line();
        }
        Directive::Face => {
            let line = tokenizer.line_number();
            let face = parse_face(tokenizer.rest_of_line())
                .map_err(|source| ImportError::MalformedRecord { line, source })?;
            debug!("Face on line {}: {:?} {:?}", line, face.layout, face.corners);
            builder.push_face(&face);
        }
        Directive::MaterialLibrary => {
            let library = parse_name(tokenizer, "material library")?;
            if builder.options.load_materials {
                loader.load(&library, &mut builder.materials)?;
            } else {
                warn!("Material loading is disabled, ignoring library `{}`", library);
            }
        }
        Directive::UseMaterial => {
            let name = parse_name(tokenizer, "material name")?;
            if builder.options.load_materials {
                builder.use_material(&name)?;
            }
        }
        Directive::Group => {
            // the name only marks the boundary
            tokenizer.skip_line();
            builder.begin_group();
        }
        Directive::Unsupported => tokenizer.skip_line(),
    }

    Ok(())
}

fn parse_vec3<R: BufRead>(tokenizer: &mut Tokenizer<R>) -> ImportResult<Vec3> {
    let x = tokenizer.parse_next("x")?;
    let y = tokenizer.parse_next("y")?;
    let z = tokenizer.parse_next("z")?;
    Ok(Vec3::new(x, y, z))
}

fn parse_name<R: BufRead>(tokenizer: &mut Tokenizer<R>, what: &'static str) -> ImportResult<String> {
    let line = tokenizer.line_number();
    let name = tokenizer.rest_of_line();
    if name.is_empty() {
        return Err(ImportError::MalformedRecord {
            line,
            source: RecordError::Missing(what),
        });
    }
    Ok(name.to_owned())
}

// parses the corners of a face, seperated by spaces
pub(crate) fn parse_face(value: &str) -> Result<ObjFace, RecordError> {
    let corners: Vec<&str> = value.split_whitespace().collect();
    if !(3..=4).contains(&corners.len()) {
        return Err(RecordError::CornerCount(corners.len()));
    }

    let layout = CornerLayout::of(corners[0])?;
    let corners = corners
        .into_iter()
        .map(|corner| parse_corner(corner, layout))
        .collect::<Result<_, _>>()?;

    Ok(ObjFace { layout, corners })
}

impl CornerLayout {
    /// Reads the layout off a single corner such as `1`, `1/2`, `1//3` or `1/2/3`.
    ///
    /// Empty texcoord or normal fields (`1/`, `1/2/`, `1//`) count as absent.
    pub fn of(corner: &str) -> Result<Self, RecordError> {
        let parts: Vec<&str> = corner.split('/').collect();

        match parts[..] {
            [_] | [_, ""] | [_, "", ""] => Ok(CornerLayout::Position),
            [_, _] | [_, _, ""] => Ok(CornerLayout::PositionTexcoord),
            [_, "", _] => Ok(CornerLayout::PositionNormal),
            [_, _, _] => Ok(CornerLayout::PositionTexcoordNormal),
            _ => Err(RecordError::InvalidCorner(corner.into())),
        }
    }
}

// parses a single corner seperated by slashes, the missing attributes stay 0
fn parse_corner(corner: &str, layout: CornerLayout) -> Result<ObjCorner, RecordError> {
    if CornerLayout::of(corner)? != layout {
        return Err(RecordError::LayoutMismatch {
            corner: corner.into(),
            layout,
        });
    }

    let mut parts = corner.split('/');
    let position = parse_index(parts.next())?;
    let texcoord = match parts.next() {
        Some("") | None => 0,
        texcoord => parse_index(texcoord)?,
    };
    let normal = match parts.next() {
        Some("") | None => 0,
        normal => parse_index(normal)?,
    };

    Ok(ObjCorner {
        position,
        texcoord,
        normal,
    })
}

fn parse_index(value: Option<&str>) -> Result<i64, RecordError> {
    let index = match value {
        Some(value) if !value.is_empty() => value.parse::<i64>()?,
        _ => return Err(RecordError::Missing("index")),
    };
    if index == 0 {
        return Err(RecordError::ZeroIndex);
    }
    Ok(index)
}
