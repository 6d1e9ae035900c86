//! One-call loading of an OBJ/MTL pair into a [`MeshModel`].

use std::{
    panic,
    path::{Path, PathBuf},
    thread,
};

use corelib::LoadResult;

use crate::{
    assemble::build_model,
    mesh::MeshModel,
    mtl::{MaterialLibrary, load_mtl_from_path, load_mtl_from_str},
    obj::{load_obj_from_path, load_obj_from_str},
    transform::scale,
};

/// Knobs for [`load_model`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoadOptions {
    /// Store `vt u v` as `(u, -v)`, for V-flipped texture atlases.
    pub flip_texcoord_v: bool,
    /// Uniform scale applied after assembly.
    pub scale: f32,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            flip_texcoord_v: true,
            scale: 1.0,
        }
    }
}

/// Load geometry from `obj_path` and materials from `mtl_path`.
///
/// Without an explicit `mtl_path` the first `mtllib` named by the geometry is
/// used, relative to the geometry's directory; with neither the material
/// table is empty. Both sources are parsed concurrently when known up front.
pub fn load_model(
    obj_path: impl AsRef<Path>,
    mtl_path: Option<&Path>,
    options: &LoadOptions,
) -> LoadResult<MeshModel> {
    let obj_path = obj_path.as_ref();

    let (geometry, materials) = match mtl_path {
        Some(mtl_path) => thread::scope(|s| {
            let materials = s.spawn(|| load_mtl_from_path(mtl_path));
            let geometry = load_obj_from_path(obj_path, options);
            let materials = materials
                .join()
                .unwrap_or_else(|payload| panic::resume_unwind(payload));
            (geometry, materials)
        }),
        None => {
            let geometry = load_obj_from_path(obj_path, options)?;
            let materials = match geometry.material_libraries.first() {
                Some(library) => load_mtl_from_path(sibling_path(obj_path, library))?,
                None => {
                    log::debug!("{} names no material library", obj_path.display());
                    MaterialLibrary::default()
                }
            };
            (Ok(geometry), Ok(materials))
        }
    };

    let mut model = build_model(geometry?, materials?)?;
    scale(&mut model, options.scale);
    Ok(model)
}

/// Same as [`load_model`] for in-memory sources; `mtllib` is not followed.
pub fn load_model_from_str(
    obj: &str,
    mtl: Option<&str>,
    options: &LoadOptions,
) -> LoadResult<MeshModel> {
    let geometry = load_obj_from_str(obj, options)?;
    let materials = match mtl {
        Some(mtl) => load_mtl_from_str(mtl)?,
        None => MaterialLibrary::default(),
    };
    let mut model = build_model(geometry, materials)?;
    scale(&mut model, options.scale);
    Ok(model)
}

fn sibling_path(obj_path: &Path, name: &str) -> PathBuf {
    match obj_path.parent() {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corelib::LoadError;
    use std::fs;

    const OBJ: &str = r#"
        mtllib box.mtl
        v 0 0 0
        v 2 0 0
        v 0 2 0
        v 2 2 0
        vt 0 1
        vn 0 0 1
        usemtl paint
        f 1/1/1 2/1/1 3/1/1
        usemtl trim
        f 2/1/1 4/1/1 3/1/1
    "#;

    const MTL: &str = r#"
        newmtl paint
        Kd 0.8 0.1 0.1
        illum 2
        newmtl trim
        Kd 0.1 0.1 0.1
        Ns 64
        illum 2
    "#;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "asset-loader-{}-{}",
            std::process::id(),
            name
        ));
        fs::create_dir_all(&dir).expect("create scratch dir");
        dir
    }

    #[test]
    fn loads_pair_from_strings() {
        let model = load_model_from_str(OBJ, Some(MTL), &LoadOptions::default()).expect("load");
        assert_eq!(model.triangle_count(), 2);
        assert_eq!(model.materials().len(), 2);
        let batches = model.draw_batches();
        assert_eq!(batches.len(), 2);
        assert_eq!(model.material_for(&batches[1]).map(|m| m.shininess), Some(64.0));
        assert_eq!(model.vertices()[0].uv, [0.0, -1.0]);
    }

    #[test]
    fn applies_scale_option() {
        let options = LoadOptions {
            scale: 0.5,
            ..LoadOptions::default()
        };
        let model = load_model_from_str(OBJ, None, &options).expect("load");
        assert_eq!(model.vertices()[1].position, [1.0, 0.0, 0.0]);
        assert!(model.materials().is_empty());
    }

    #[test]
    fn explicit_paths_load_concurrently() {
        let dir = scratch_dir("explicit");
        let obj = dir.join("mesh.obj");
        let mtl = dir.join("other.mtl");
        fs::write(&obj, OBJ).expect("write obj");
        fs::write(&mtl, MTL).expect("write mtl");

        let model = load_model(&obj, Some(mtl.as_path()), &LoadOptions::default()).expect("load");
        assert_eq!(model.materials().len(), 2);
        assert_eq!(model.vertices().len(), 6);
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn follows_mtllib_next_to_geometry() {
        let dir = scratch_dir("mtllib");
        let obj = dir.join("mesh.obj");
        fs::write(&obj, OBJ).expect("write obj");
        fs::write(dir.join("box.mtl"), MTL).expect("write mtl");

        let model = load_model(&obj, None, &LoadOptions::default()).expect("load");
        assert!(model.materials().contains("paint"));
        assert!(model.materials().contains("trim"));
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn missing_mtllib_fails_the_load() {
        let dir = scratch_dir("missing-mtllib");
        let obj = dir.join("mesh.obj");
        fs::write(&obj, OBJ).expect("write obj");

        let err = load_model(&obj, None, &LoadOptions::default()).expect_err("no box.mtl");
        assert!(matches!(err, LoadError::SourceUnavailable { .. }));
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn malformed_face_produces_no_model() {
        let obj = "v 0 0 0\nvt 0 0\nvn 0 0 1\nf 1/1/1 1/1/1\n";
        let err = load_model_from_str(obj, Some(MTL), &LoadOptions::default())
            .expect_err("bad face");
        assert!(matches!(err, LoadError::MalformedFace { found: 6, .. }));
    }

    #[test]
    fn geometry_error_wins_over_material_error() {
        let dir = scratch_dir("both-missing");
        let mtl = dir.join("nope.mtl");
        let err = load_model(dir.join("nope.obj"), Some(mtl.as_path()), &LoadOptions::default())
            .expect_err("nothing there");
        match err {
            LoadError::SourceUnavailable { source_name, .. } => {
                assert!(source_name.ends_with("nope.obj"))
            }
            other => panic!("unexpected error: {other}"),
        }
        let _ = fs::remove_dir_all(dir);
    }
}
