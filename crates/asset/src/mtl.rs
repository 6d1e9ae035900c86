//! MTL material library parser.
//!
//! A record is built up by `Ka`/`Kd`/`Ks`/`Ns`/`Ni`/`d` after a `newmtl` and is
//! only committed once its `illum` directive arrives. Blocks that never reach
//! `illum` are dropped with a warning and listed in
//! [`MaterialLibrary::unterminated`].

use std::{
    collections::HashMap,
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use corelib::{LoadError, LoadResult, Vec3};

use crate::parse::{Record, for_each_record};

/// Fixed-function material parameters for one named material.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaterialRecord {
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub shininess: f32,
    pub optical_density: f32,
    pub dissolve: f32,
    pub illumination_model: i32,
}

impl Default for MaterialRecord {
    fn default() -> Self {
        Self {
            ambient: Vec3::ZERO,
            diffuse: Vec3::ZERO,
            specular: Vec3::ZERO,
            shininess: 0.0,
            optical_density: 1.0,
            dissolve: 1.0,
            illumination_model: 3,
        }
    }
}

/// Committed materials keyed by name.
#[derive(Clone, Debug, Default)]
pub struct MaterialLibrary {
    records: HashMap<String, MaterialRecord>,
    unterminated: Vec<String>,
}

impl MaterialLibrary {
    pub fn get(&self, name: &str) -> Option<&MaterialRecord> {
        self.records.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Names of `newmtl` blocks dropped because no `illum` followed them.
    pub fn unterminated(&self) -> &[String] {
        &self.unterminated
    }

    /// Last write wins for repeated names.
    fn commit(&mut self, name: String, record: MaterialRecord) {
        if self.records.insert(name.clone(), record).is_some() {
            log::debug!("Material '{}' redefined; keeping the later definition", name);
        }
    }

    fn drop_unterminated(&mut self, name: String) {
        log::warn!("Material '{}' has no 'illum' directive and was dropped", name);
        self.unterminated.push(name);
    }
}

/// Forward-only state of the material currently being read.
#[derive(Debug, Default)]
enum MaterialState {
    #[default]
    NoPending,
    Pending {
        name: String,
        fields: MaterialRecord,
    },
}

impl MaterialState {
    fn fields_mut(&mut self, record: &Record<'_>) -> Option<&mut MaterialRecord> {
        match self {
            MaterialState::Pending { fields, .. } => Some(fields),
            MaterialState::NoPending => {
                log::warn!(
                    "Ignoring '{}' on line {}: no open 'newmtl' block",
                    record.keyword,
                    record.line
                );
                None
            }
        }
    }
}

/// Load an MTL library from a file path.
pub fn load_mtl_from_path(path: impl AsRef<Path>) -> LoadResult<MaterialLibrary> {
    let path = path.as_ref();
    let source_name = path.display().to_string();
    log::info!("Loading MTL file {}", source_name);
    let file = File::open(path).map_err(|e| LoadError::unavailable(&source_name, e))?;
    parse_mtl(BufReader::new(file), &source_name)
}

/// Load an MTL library from a [`BufRead`] implementation.
pub fn load_mtl_from_reader<R: BufRead>(reader: R) -> LoadResult<MaterialLibrary> {
    parse_mtl(reader, "<reader>")
}

/// Convenience helper to parse an MTL string literal.
pub fn load_mtl_from_str(contents: &str) -> LoadResult<MaterialLibrary> {
    parse_mtl(io::Cursor::new(contents), "<string>")
}

fn parse_mtl<R: BufRead>(reader: R, source_name: &str) -> LoadResult<MaterialLibrary> {
    let mut library = MaterialLibrary::default();
    let mut state = MaterialState::NoPending;
    let mut ignored = 0usize;

    for_each_record(reader, source_name, |mut record| {
        match record.keyword {
            "newmtl" => {
                let name = record.name()?.to_owned();
                if let MaterialState::Pending { name: open, .. } = std::mem::take(&mut state) {
                    library.drop_unterminated(open);
                }
                state = MaterialState::Pending {
                    name,
                    fields: MaterialRecord::default(),
                };
            }
            "Ka" => {
                let value = record.vec3()?;
                if let Some(fields) = state.fields_mut(&record) {
                    fields.ambient = value;
                }
            }
            "Kd" => {
                let value = record.vec3()?;
                if let Some(fields) = state.fields_mut(&record) {
                    fields.diffuse = value;
                }
            }
            "Ks" => {
                let value = record.vec3()?;
                if let Some(fields) = state.fields_mut(&record) {
                    fields.specular = value;
                }
            }
            "Ns" => {
                let value = record.f32("shininess")?;
                if let Some(fields) = state.fields_mut(&record) {
                    fields.shininess = value;
                }
            }
            "Ni" => {
                let value = record.f32("optical density")?;
                if let Some(fields) = state.fields_mut(&record) {
                    fields.optical_density = value;
                }
            }
            "d" => {
                let value = record.f32("dissolve")?;
                if let Some(fields) = state.fields_mut(&record) {
                    fields.dissolve = value;
                }
            }
            "illum" => {
                let model = record.i32("illumination model")?;
                match std::mem::take(&mut state) {
                    MaterialState::Pending { name, mut fields } => {
                        fields.illumination_model = model;
                        library.commit(name, fields);
                    }
                    MaterialState::NoPending => {
                        log::warn!(
                            "Ignoring 'illum' on line {}: no open 'newmtl' block",
                            record.line
                        );
                    }
                }
            }
            _ => {
                // Texture maps, Tf, Ke and friends are not used.
                ignored += 1;
            }
        }
        Ok(())
    })?;

    if let MaterialState::Pending { name, .. } = state {
        library.drop_unterminated(name);
    }

    log::info!(
        "Loaded {} material(s) from {} ({} dropped, {} ignored directive(s))",
        library.len(),
        source_name,
        library.unterminated.len(),
        ignored
    );
    Ok(library)
}
