//! Resolve face indices into a flat, per-corner vertex buffer.

use corelib::{AttributePool, LoadError, LoadResult};

use crate::{
    mesh::{MaterialSegment, MeshModel, Vertex},
    mtl::MaterialLibrary,
    obj::{FaceIndices, GeometryData, RawAttributePools},
};

/// Emit one [`Vertex`] per face corner, in face order.
///
/// Triangle `k` lands in slots `3k..3k + 3`. Every index is bounds-checked
/// against its pool; index 0 or one past the end fails with
/// [`LoadError::IndexOutOfRange`].
pub fn assemble_vertices(
    pools: &RawAttributePools,
    faces: &FaceIndices,
) -> LoadResult<Vec<Vertex>> {
    let mut vertices = Vec::with_capacity(faces.corner_count());

    for (corner, [p, t, n]) in faces.corners().enumerate() {
        let position = resolve(&pools.positions, p, corner, AttributePool::Position)?;
        let uv = resolve(&pools.texcoords, t, corner, AttributePool::Texcoord)?;
        let normal = resolve(&pools.normals, n, corner, AttributePool::Normal)?;
        vertices.push(Vertex::new(position, uv, normal));
    }

    Ok(vertices)
}

fn resolve<T: Copy>(
    pool: &[T],
    index: u32,
    corner: usize,
    which: AttributePool,
) -> LoadResult<T> {
    let out_of_range = || LoadError::IndexOutOfRange {
        corner,
        pool: which,
        index,
        len: pool.len(),
    };
    let slot = (index as usize).checked_sub(1).ok_or_else(out_of_range)?;
    pool.get(slot).copied().ok_or_else(out_of_range)
}

/// Segments must start in non-decreasing order, none past `triangle_count`.
fn check_segments(segments: &[MaterialSegment], triangle_count: usize) -> LoadResult<()> {
    let mut previous = 0;
    for (i, segment) in segments.iter().enumerate() {
        let start = segment.start_triangle;
        let reason = if start > triangle_count {
            format!("the mesh has only {triangle_count} triangles")
        } else if start < previous {
            format!("the previous segment starts at triangle {previous}")
        } else {
            previous = start;
            continue;
        };
        return Err(LoadError::InvalidSegment {
            segment: i,
            material: segment.material.clone(),
            start,
            reason,
        });
    }
    Ok(())
}

/// Assemble parsed geometry and materials into a [`MeshModel`].
///
/// Either the whole model is produced or nothing is.
pub fn build_model(geometry: GeometryData, materials: MaterialLibrary) -> LoadResult<MeshModel> {
    let vertices = assemble_vertices(&geometry.pools, &geometry.faces)?;
    check_segments(&geometry.segments, vertices.len() / 3)?;

    let mut missing: Vec<&str> = geometry
        .segments
        .iter()
        .map(|s| s.material.as_str())
        .filter(|name| !materials.contains(name))
        .collect();
    missing.sort_unstable();
    missing.dedup();
    for name in missing {
        log::warn!(
            "Material '{}' is used but not defined; drawing with the default material",
            name
        );
    }

    let model = MeshModel::new(vertices, geometry.segments, materials);
    log::info!(
        "Assembled {} triangles ({} vertices) across {} draw batch(es)",
        model.triangle_count(),
        model.vertices().len(),
        model.draw_batches().len()
    );
    Ok(model)
}
