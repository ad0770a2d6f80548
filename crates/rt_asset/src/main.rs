pub(crate) mod model;
pub(crate) mod utils;

use anyhow::Result;
use log::{debug, info, warn};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use structopt::StructOpt;
use walkdir::{DirEntry, WalkDir};

/// Converts every `.obj` and `.off` model below a folder into `.rtm` shape files
#[derive(StructOpt, Debug)]
#[structopt(name = "rt_asset")]
struct CliArgs {
    /// Folder containing the models
    input: PathBuf,
    /// Folder receiving the converted models, mirroring the input structure
    #[structopt(short = "o", long = "output")]
    output: PathBuf,
    /// Log every skipped file and statement
    #[structopt(short = "v", long = "verbose")]
    verbose: bool,
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error("Input folder does not exist: {0}")]
    MissingInputFolder(String),
    #[error("Could not create output folder {path}: {source}")]
    CreateOutputFolder { path: String, source: io::Error },
}

fn main() -> Result<()> {
    let args = CliArgs::from_args();

    let level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(level)
        .init();

    let converted = convert_all(&args.input, &args.output)?;
    info!("Converted {} models", converted);
    Ok(())
}

/// Whether the file is one of the model formats the importer reads
fn is_model(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .map(|extension| matches!(extension.to_ascii_lowercase().as_str(), "obj" | "off"))
        .unwrap_or(false)
}

fn model_files(input: &Path) -> impl Iterator<Item = DirEntry> {
    WalkDir::new(input)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!("Could not read directory entry: {}", err);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            let keep = is_model(entry.path());
            if !keep {
                debug!("Skipping non-model file: {}", entry.path().display());
            }
            keep
        })
}

// folder the converted model goes to, created on demand
fn output_folder(input: &Path, output: &Path, model: &Path) -> Result<PathBuf> {
    let relative = model.strip_prefix(input)?;
    let folder = match relative.parent() {
        Some(parent) => output.join(parent),
        None => output.to_owned(),
    };

    fs::create_dir_all(&folder).map_err(|source| CliError::CreateOutputFolder {
        path: folder.display().to_string(),
        source,
    })?;
    Ok(folder)
}

fn convert_all(input: &Path, output: &Path) -> Result<usize> {
    if !input.is_dir() {
        return Err(CliError::MissingInputFolder(input.display().to_string()).into());
    }

    let mut converted = 0;
    for entry in model_files(input) {
        let folder = output_folder(input, output, entry.path())?;
        model::process(entry.path(), &folder)?;
        converted += 1;
    }
    Ok(converted)
}
