//! Entry point for wavemesh.
//! Loads an OBJ/MTL pair and logs the draw batches a renderer would issue.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use asset::LoadOptions;

fn parse_path_arg(prefix: &str) -> Option<PathBuf> {
    std::env::args()
        .find_map(|arg| arg.strip_prefix(prefix).map(PathBuf::from))
}

fn parse_scale_arg() -> Result<f32> {
    // --scale=<f32>, по умолчанию 1.0
    for arg in std::env::args() {
        if let Some(val) = arg.strip_prefix("--scale=") {
            return val
                .parse::<f32>()
                .with_context(|| format!("Invalid --scale value '{}'", val));
        }
    }
    Ok(1.0)
}

fn parse_flip_arg() -> bool {
    !std::env::args().any(|arg| arg == "--no-flip-v")
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Some(obj_path) = parse_path_arg("--obj=") else {
        bail!("Usage: wavemesh --obj=<file.obj> [--mtl=<file.mtl>] [--scale=<f32>] [--no-flip-v]");
    };
    let mtl_path = parse_path_arg("--mtl=");
    let options = LoadOptions {
        flip_texcoord_v: parse_flip_arg(),
        scale: parse_scale_arg()?,
    };
    log::info!(
        "Starting wavemesh. obj={}, mtl={:?}, scale={}, flip_v={}",
        obj_path.display(),
        mtl_path,
        options.scale,
        options.flip_texcoord_v
    );

    let model = asset::load_model(&obj_path, mtl_path.as_deref(), &options)
        .with_context(|| format!("Failed to load model {}", obj_path.display()))?;

    if !model.is_valid() {
        log::warn!("{} contains no triangles; nothing to draw", obj_path.display());
    }

    for batch in model.draw_batches() {
        match model.material_for(&batch) {
            Some(material) => log::info!(
                "Batch {:?} ({} triangles): '{}' diffuse={:?} shininess={} illum={}",
                batch.vertices,
                batch.triangle_count(),
                batch.material.unwrap_or_default(),
                material.diffuse,
                material.shininess,
                material.illumination_model
            ),
            None => log::info!(
                "Batch {:?} ({} triangles): default material{}",
                batch.vertices,
                batch.triangle_count(),
                batch
                    .material
                    .map(|name| format!(" (no definition for '{}')", name))
                    .unwrap_or_default()
            ),
        }
    }

    log::info!(
        "Loaded {} triangles, {} bytes of vertex data. Bye!",
        model.triangle_count(),
        model.vertex_bytes().len()
    );
    Ok(())
}
