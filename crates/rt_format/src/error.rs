use thiserror::Error;

pub type Result<T> = ::std::result::Result<T, FormatError>;

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("Could not (de)serialize shapes: {0}")]
    Serialization(#[from] Box<bincode::ErrorKind>),
    #[error("Could not read shapes file: {0}")]
    Io(#[from] std::io::Error),
}
