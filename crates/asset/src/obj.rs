//! OBJ geometry parser for triangulated meshes with `p/t/n` faces.
//!
//! Produces the raw attribute pools, the face index streams and the
//! `usemtl` segments in file order. Resolving indices into vertices is the
//! job of [`crate::assemble`].

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use corelib::{LoadError, LoadResult, Vec2, Vec3};

use crate::{loader::LoadOptions, mesh::MaterialSegment};

/// Attribute pools in file order. Face indices into them are 1-based.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawAttributePools {
    pub positions: Vec<Vec3>,
    pub texcoords: Vec<Vec2>,
    pub normals: Vec<Vec3>,
}

/// Parallel 1-based index streams, three entries per triangle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FaceIndices {
    positions: Vec<u32>,
    texcoords: Vec<u32>,
    normals: Vec<u32>,
}

impl FaceIndices {
    /// Append one triangle given as `[position, texcoord, normal]` per corner.
    pub fn push_triangle(&mut self, corners: [[u32; 3]; 3]) {
        for [p, t, n] in corners {
            self.positions.push(p);
            self.texcoords.push(t);
            self.normals.push(n);
        }
    }

    pub fn positions(&self) -> &[u32] {
        &self.positions
    }

    pub fn texcoords(&self) -> &[u32] {
        &self.texcoords
    }

    pub fn normals(&self) -> &[u32] {
        &self.normals
    }

    #[inline]
    pub fn corner_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// `[position, texcoord, normal]` indices of every corner, in face order.
    pub fn corners(&self) -> impl Iterator<Item = [u32; 3]> {
        self.positions
            .iter()
            .zip(&self.texcoords)
            .zip(&self.normals)
            .map(|((&p, &t), &n)| [p, t, n])
    }

}

/// Everything one pass over an OBJ source yields.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GeometryData {
    pub pools: RawAttributePools,
    pub faces: FaceIndices,
    pub segments: Vec<MaterialSegment>,
    /// `mtllib` references, in file order.
    pub material_libraries: Vec<String>,
}

impl GeometryData {
    pub fn triangle_count(&self) -> usize {
        self.faces.triangle_count()
    }
}

/// Load OBJ geometry from a file path.
pub fn load_obj_from_path(
    path: impl AsRef<Path>,
    options: &LoadOptions,
) -> LoadResult<GeometryData> {
    let path = path.as_ref();
    let source_name = path.display().to_string();
    log::info!("Loading OBJ file {}", source_name);
    let file = File::open(path).map_err(|e| LoadError::unavailable(&source_name, e))?;
    parse_obj(BufReader::new(file), &source_name, options)
}

/// Load OBJ geometry from a [`BufRead`] implementation.
pub fn load_obj_from_reader<R: BufRead>(
    reader: R,
    options: &LoadOptions,
) -> LoadResult<GeometryData> {
    parse_obj(reader, "<reader>", options)
}

/// Convenience helper to parse an OBJ string literal.
pub fn load_obj_from_str(contents: &str, options: &LoadOptions) -> LoadResult<GeometryData> {
    parse_obj(io::Cursor::new(contents), "<string>", options)
}

fn parse_obj<R: BufRead>(
    reader: R,
    source_name: &str,
    options: &LoadOptions,
) -> LoadResult<GeometryData> {
    let mut data = GeometryData::default();
    let mut ignored = 0usize;

    crate::parse::for_each_record(reader, source_name, |mut record| {
        match record.keyword {
            "v" => {
                let position = record.vec3()?;
                data.pools.positions.push(position);
            }
            "vt" => {
                let u = record.f32("u coordinate")?;
                let v = record.f32("v coordinate")?;
                let v = if options.flip_texcoord_v { -v } else { v };
                data.pools.texcoords.push(Vec2::new(u, v));
            }
            "vn" => {
                let normal = record.vec3()?;
                data.pools.normals.push(normal);
            }
            "f" => {
                let operands = record.operands.take_while(|t| !t.starts_with('#'));
                let corners = parse_face(operands, record.line)?;
                data.faces.push_triangle(corners);
            }
            "usemtl" => {
                let name = record.name()?;
                let start = data.faces.triangle_count();
                log::debug!("Material '{}' starts at triangle {}", name, start);
                data.segments.push(MaterialSegment::new(start, name));
            }
            "mtllib" => {
                data.material_libraries
                    .extend(record.operands.map(str::to_owned));
            }
            _ => {
                // o/g/s and anything else carry nothing we render.
                ignored += 1;
            }
        }
        Ok(())
    })?;

    log::info!(
        "Parsed {} positions, {} texcoords, {} normals, {} triangles, {} material segment(s) from {}",
        data.pools.positions.len(),
        data.pools.texcoords.len(),
        data.pools.normals.len(),
        data.triangle_count(),
        data.segments.len(),
        source_name
    );
    if ignored > 0 {
        log::debug!("Ignored {} unsupported directive(s) in {}", ignored, source_name);
    }

    Ok(data)
}

/// Exactly three `p/t/n` corners of unsigned integers; anything else is malformed.
fn parse_face<'a>(
    corners: impl Iterator<Item = &'a str>,
    line: usize,
) -> LoadResult<[[u32; 3]; 3]> {
    let mut indices: Vec<u32> = Vec::with_capacity(9);
    let mut well_formed = true;

    for corner in corners {
        let mut fields = 0;
        for field in corner.split('/') {
            fields += 1;
            match field.parse::<u32>() {
                Ok(index) => indices.push(index),
                Err(_) => well_formed = false,
            }
        }
        well_formed &= fields == 3;
    }

    if !well_formed || indices.len() != 9 {
        return Err(LoadError::MalformedFace {
            line,
            found: indices.len(),
        });
    }

    Ok([
        [indices[0], indices[1], indices[2]],
        [indices[3], indices[4], indices[5]],
        [indices[6], indices[7], indices[8]],
    ])
}
