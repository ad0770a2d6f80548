use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::info;
use rt_format::shapes::Shapes;

use crate::error::{ImportError, ImportResult};
use crate::material::{MaterialLoader, MtlLoader};
use crate::obj::read_obj;
use crate::off::read_off;
use crate::options::ImportOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    Obj,
    Off,
}

impl ModelFormat {
    /// Picks the format from the text after the last `.` of the file name, ignoring case.
    ///
    /// A file name without any `.` has no extension and is unsupported.
    pub fn from_path(path: &Path) -> ImportResult<Self> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_default();
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, extension)| extension)
            .unwrap_or_default();

        match extension.to_ascii_lowercase().as_ref() {
            "obj" => Ok(ModelFormat::Obj),
            "off" => Ok(ModelFormat::Off),
            _ => Err(ImportError::UnsupportedFormat(extension.to_owned())),
        }
    }
}

/// Imports the model at `path` and appends its triangles to `shapes`.
///
/// Material libraries are looked up next to the model. Nothing is appended when the import fails.
pub fn import_model(path: &Path, shapes: &mut Shapes) -> ImportResult<()> {
    let mut loader = MtlLoader::for_model(path);
    import_model_with(path, shapes, &ImportOptions::default(), &mut loader)
}

pub fn import_model_with(
    path: &Path,
    shapes: &mut Shapes,
    options: &ImportOptions,
    loader: &mut dyn MaterialLoader,
) -> ImportResult<()> {
    let format = ModelFormat::from_path(path)?;
    let file = File::open(path).map_err(|source| ImportError::FileOpen {
        path: path.to_owned(),
        source,
    })?;
    info!("Loading model: {}", path.display());

    let reader = BufReader::new(file);
    let imported = match format {
        ModelFormat::Obj => read_obj(reader, options, loader)?,
        ModelFormat::Off => read_off(reader, options)?,
    };

    info!(
        "Imported {} triangles and {} materials from {}",
        imported.triangles.len(),
        imported.materials.len(),
        path.display()
    );
    shapes.append(imported);
    Ok(())
}
