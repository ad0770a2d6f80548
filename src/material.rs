use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use gfx_maths::Vec3;
use log::{debug, info, warn};
use rt_format::shapes::{Material, MaterialIndex};

use crate::error::{ImportError, ImportResult, RecordError};
use crate::tokenizer::Tokenizer;

/// Materials of one model and the lookup from their names to their indices.
#[derive(Debug, Default)]
pub struct MaterialTable {
    materials: Vec<Material>,
    indices: HashMap<String, MaterialIndex>,
}

impl MaterialTable {
    /// Stores `material` and binds its name to the new index, replacing an earlier binding.
    pub fn register(&mut self, material: Material) -> MaterialIndex {
        let index = self.materials.len();
        self.indices.insert(material.name.clone(), index);
        self.materials.push(material);
        index
    }

    pub fn index_of(&self, name: &str) -> Option<MaterialIndex> {
        self.indices.get(name).copied()
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub(crate) fn into_materials(self) -> Vec<Material> {
        self.materials
    }
}

/// Loads the material library named by a `mtllib` directive into a [`MaterialTable`].
pub trait MaterialLoader {
    fn load(&mut self, library: &str, table: &mut MaterialTable) -> ImportResult<()>;
}

impl<F> MaterialLoader for F
where
    F: FnMut(&str, &mut MaterialTable) -> ImportResult<()>,
{
    fn load(&mut self, library: &str, table: &mut MaterialTable) -> ImportResult<()> {
        self(library, table)
    }
}

/// Reads `.mtl` files relative to a base directory, usually the one holding the model.
#[derive(Debug, Clone)]
pub struct MtlLoader {
    base_dir: PathBuf,
}

impl MtlLoader {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Loader for the libraries referenced by the model at `model_path`.
    pub fn for_model(model_path: &Path) -> Self {
        Self::new(model_path.parent().unwrap_or_else(|| Path::new("")))
    }
}

impl MaterialLoader for MtlLoader {
    fn load(&mut self, library: &str, table: &mut MaterialTable) -> ImportResult<()> {
        let path = self.base_dir.join(library);
        let file = File::open(&path).map_err(|source| ImportError::FileOpen {
            path: path.clone(),
            source,
        })?;
        info!("Loading material library: {}", path.display());

        parse_mtl(BufReader::new(file), table)
    }
}

pub(crate) fn parse_mtl<R: BufRead>(reader: R, table: &mut MaterialTable) -> ImportResult<()> {
    let mut tokenizer = Tokenizer::new(reader);
    let mut current: Option<Material> = None;

    while let Some(token) = tokenizer.next_token()? {
        let statement = token.to_owned();

        if statement == "newmtl" {
            if let Some(material) = current.take() {
                table.register(material);
            }
            current = Some(Material::named(tokenizer.rest_of_line()));
            continue;
        }

        let material = match current.as_mut() {
            Some(material) => material,
            None => {
                if !statement.starts_with('#') {
                    warn!("Ignoring `{}` outside of a material", statement);
                }
                tokenizer.skip_line();
                continue;
            }
        };

        match statement.as_str() {
            "Ka" => material.ambient = parse_color(&mut tokenizer)?,
            "Kd" => material.diffuse = parse_color(&mut tokenizer)?,
            "Ks" => material.specular = parse_color(&mut tokenizer)?,
            "Ke" => material.emissive = parse_color(&mut tokenizer)?,
            "Ns" => material.shininess = tokenizer.parse_next("shininess")?,
            "d" => material.opacity = tokenizer.parse_next("dissolve")?,
            "Tr" => material.opacity = 1.0 - tokenizer.parse_next::<f32>("transparency")?,
            _ => debug!("Skipping material statement: {}", statement),
        }
        tokenizer.skip_line();
    }

    if let Some(material) = current {
        table.register(material);
    }

    Ok(())
}

// a color is either a single grey value or an rgb triple
fn parse_color<R: BufRead>(tokenizer: &mut Tokenizer<R>) -> ImportResult<Vec3> {
    let line = tokenizer.line_number();
    let values = tokenizer
        .rest_of_line()
        .split_whitespace()
        .map(str::parse::<f32>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| ImportError::MalformedRecord {
            line,
            source: err.into(),
        })?;

    match values[..] {
        [grey] => Ok(Vec3::new(grey, grey, grey)),
        [r, g, b, ..] => Ok(Vec3::new(r, g, b)),
        _ => Err(ImportError::MalformedRecord {
            line,
            source: RecordError::Missing("color"),
        }),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const LIBRARY: &str = "# two materials
newmtl red
Kd 1 0 0
Ks 0.5
Ns 10
d 0.25

newmtl light
Ke 4 4 4
Tr 0.0
illum 2
";

    #[test]
    fn test_parse_mtl() -> ImportResult<()> {
        let mut table = MaterialTable::default();
        parse_mtl(LIBRARY.as_bytes(), &mut table)?;

        assert_eq!(table.index_of("red"), Some(0));
        assert_eq!(table.index_of("light"), Some(1));
        assert_eq!(table.index_of("blue"), None);

        let red = &table.materials()[0];
        assert_eq!(red.diffuse, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(red.specular, Vec3::new(0.5, 0.5, 0.5));
        assert_eq!(red.shininess, 10.0);
        assert_eq!(red.opacity, 0.25);

        let light = &table.materials()[1];
        assert_eq!(light.emissive, Vec3::new(4.0, 4.0, 4.0));
        assert_eq!(light.opacity, 1.0);
        assert_eq!(light.diffuse, Material::default().diffuse);

        Ok(())
    }

    #[test]
    fn test_parse_mtl_bad_color() {
        let mut table = MaterialTable::default();
        let result = parse_mtl("newmtl red\nKd 1 0\n".as_bytes(), &mut table);

        assert!(matches!(
            result,
            Err(ImportError::MalformedRecord {
                line: 2,
                source: RecordError::Missing("color")
            })
        ));
    }

    #[test]
    fn test_register_rebinds_name() {
        let mut table = MaterialTable::default();

        assert_eq!(table.register(Material::named("a")), 0);
        assert_eq!(table.register(Material::named("b")), 1);
        assert_eq!(table.register(Material::named("a")), 2);
        assert_eq!(table.index_of("a"), Some(2));
        assert_eq!(table.materials().len(), 3);
    }

    #[test]
    fn test_mtl_loader() -> ImportResult<()> {
        let dir = std::env::temp_dir().join("rt_model_mtl_loader");
        std::fs::create_dir_all(&dir)?;
        std::fs::write(dir.join("scene.mtl"), LIBRARY)?;

        let mut loader = MtlLoader::for_model(&dir.join("scene.obj"));
        let mut table = MaterialTable::default();
        loader.load("scene.mtl", &mut table)?;
        assert_eq!(table.materials().len(), 2);

        assert!(matches!(
            loader.load("missing.mtl", &mut table),
            Err(ImportError::FileOpen { .. })
        ));

        Ok(())
    }
}
