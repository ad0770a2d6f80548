//! Imports Wavefront `.obj` and Object File Format `.off` models into triangle lists.

pub mod error;
pub mod index;
pub mod loader;
pub mod material;
pub mod obj;
pub mod off;
pub mod options;
mod tokenizer;

pub use error::{ImportError, ImportResult, RecordError};
pub use loader::{import_model, import_model_with, ModelFormat};
pub use material::{MaterialLoader, MaterialTable, MtlLoader};
pub use obj::read_obj;
pub use off::read_off;
pub use options::ImportOptions;
