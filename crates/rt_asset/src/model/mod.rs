mod meta;

use anyhow::{Context, Result};
use log::info;
use rt_format::shapes::Shapes;
use rt_model::{ImportOptions, MtlLoader};
use std::path::Path;

use crate::utils;

fn import(path: &Path, options: &ImportOptions) -> Result<Shapes> {
    let mut shapes = Shapes::default();
    let mut loader = MtlLoader::for_model(path);
    rt_model::import_model_with(path, &mut shapes, options, &mut loader)
        .with_context(|| format!("Could not import model: {}", path.display()))?;
    Ok(shapes)
}

fn serialize(shapes: &Shapes) -> Result<Vec<u8>> {
    shapes.to_bytes().context("Could not serialize Shapes")
}

fn save(path: &Path, output_dir: &Path, data: Vec<u8>) -> Result<()> {
    let file_name = utils::file_name(path)?;
    let target = utils::combine_path(output_dir, file_name, "rtm");
    utils::write_file(target, data)?;
    Ok(())
}

/// Parse options from `<name>.toml` next to the model, alternatively from the folder scoped `model.toml`, else use the defaults
fn parse_meta(path: &Path) -> Result<ImportOptions> {
    let dir = path
        .parent()
        .with_context(|| format!("Path terminates in root or prefix: {}", path.display()))?;
    let meta_file = utils::file_name(path)?;

    let path = utils::combine_path(dir, meta_file, "toml");
    if path.is_file() {
        return meta::parse(&path);
    }

    // check if folder scoped options exist
    let path = utils::combine_path(dir, "model", "toml");
    if path.is_file() {
        return meta::parse(&path);
    }

    Ok(ImportOptions::default())
}

pub(crate) fn process(path: &Path, output_dir: &Path) -> Result<()> {
    info!("Processing model: `{}`", path.display());
    let options = parse_meta(path)?;
    let shapes = import(path, &options)?;
    info!(
        "`{}`: {} triangles, {} materials",
        path.display(),
        shapes.triangles.len(),
        shapes.materials.len()
    );
    save(path, output_dir, serialize(&shapes)?)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_process() -> Result<()> {
        let input = std::env::temp_dir().join("rt_asset_process_in");
        let output = std::env::temp_dir().join("rt_asset_process_out");
        std::fs::create_dir_all(&input)?;
        std::fs::create_dir_all(&output)?;

        let model = input.join("tri.off");
        std::fs::write(&model, "OFF\n3 1 0\n0 0 0\n1 0 0\n1 1 0\n3 0 1 2\n")?;
        std::fs::write(input.join("tri.toml"), "flip_axis = [true, false, false]\n")?;

        process(&model, &output)?;

        let shapes = Shapes::from_file(&output.join("tri.rtm"))?;
        assert_eq!(shapes.triangles.len(), 1);
        assert_eq!(shapes.triangles[0].positions[1].x, -1.0);
        Ok(())
    }
}
