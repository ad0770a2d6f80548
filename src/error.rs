use std::{io, num, path::PathBuf};

use crate::obj::CornerLayout;

#[derive(thiserror::Error, Debug)]
pub enum ImportError {
    #[error("Could not open file `{path}`: {source}")]
    FileOpen { path: PathBuf, source: io::Error },
    #[error("Failed to read model: {0}")]
    Read(#[from] io::Error),
    #[error("Format `{0}` is not supported")]
    UnsupportedFormat(String),
    #[error("Malformed record on line {line}: {source}")]
    MalformedRecord { line: usize, source: RecordError },
    #[error("Unknown material: {0}")]
    UnknownMaterial(String),
    #[error("Index {index} is out of range for {len} elements")]
    IndexOutOfRange { index: i64, len: usize },
}

/// What is wrong with a single record; wrapped into [`ImportError::MalformedRecord`] with its line.
#[derive(thiserror::Error, Debug)]
pub enum RecordError {
    #[error("Missing {0}")]
    Missing(&'static str),
    #[error("Failed to parse float: {0}")]
    ParseFloat(#[from] num::ParseFloatError),
    #[error("Failed to parse integer: {0}")]
    ParseInt(#[from] num::ParseIntError),
    #[error("Faces need 3 or 4 corners, found {0}")]
    CornerCount(usize),
    #[error("Corner `{corner}` does not match the face layout {layout:?}")]
    LayoutMismatch { corner: String, layout: CornerLayout },
    #[error("Corner `{0}` has an invalid layout")]
    InvalidCorner(String),
    #[error("Indices are 1-based, 0 is not allowed")]
    ZeroIndex,
    #[error("Header is too short")]
    Header,
}

pub type ImportResult<T> = ::std::result::Result<T, ImportError>;
