//! CPU-side triangle soup with material segments, produced by the loaders.

use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use corelib::{Vec2, Vec3};

use crate::mtl::{MaterialLibrary, MaterialRecord};

/// One triangle corner. Attributes are duplicated per corner, never shared.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
    pub normal: [f32; 3],
}

impl Vertex {
    pub fn new(position: Vec3, uv: Vec2, normal: Vec3) -> Self {
        Self {
            position: position.to_array(),
            uv: uv.to_array(),
            normal: normal.to_array(),
        }
    }
}

/// Material switch recorded by a `usemtl` directive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaterialSegment {
    /// Triangles emitted before the directive was seen.
    pub start_triangle: usize,
    pub material: String,
}

impl MaterialSegment {
    pub fn new(start_triangle: usize, material: impl Into<String>) -> Self {
        Self {
            start_triangle,
            material: material.into(),
        }
    }

    /// First slot of this segment in the flattened vertex buffer.
    #[inline]
    pub fn start_vertex(&self) -> usize {
        self.start_triangle * 3
    }
}

/// Contiguous run of vertices drawn with one material.
///
/// `material: None` means the renderer's default material.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrawBatch<'a> {
    pub vertices: Range<usize>,
    pub material: Option<&'a str>,
}

impl DrawBatch<'_> {
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }
}

/// Fully assembled mesh. Only built through [`crate::assemble::build_model`].
#[derive(Clone, Debug, Default)]
pub struct MeshModel {
    vertices: Vec<Vertex>,
    segments: Vec<MaterialSegment>,
    materials: MaterialLibrary,
}

impl MeshModel {
    pub(crate) fn new(
        vertices: Vec<Vertex>,
        segments: Vec<MaterialSegment>,
        materials: MaterialLibrary,
    ) -> Self {
        debug_assert_eq!(vertices.len() % 3, 0);
        debug_assert!(
            segments
                .windows(2)
                .all(|w| w[0].start_triangle <= w[1].start_triangle)
        );
        debug_assert!(
            segments
                .iter()
                .all(|s| s.start_triangle <= vertices.len() / 3)
        );
        Self {
            vertices,
            segments,
            materials,
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub(crate) fn vertices_mut(&mut self) -> &mut [Vertex] {
        &mut self.vertices
    }

    /// Raw interleaved bytes, ready for a vertex buffer upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn segments(&self) -> &[MaterialSegment] {
        &self.segments
    }

    pub fn materials(&self) -> &MaterialLibrary {
        &self.materials
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Returns `true` if the mesh holds at least one triangle.
    pub fn is_valid(&self) -> bool {
        !self.vertices.is_empty()
    }

    /// Split the vertex buffer into ordered draw ranges.
    ///
    /// The batches cover `0..vertices().len()` exactly once. Triangles before
    /// the first segment (or the whole mesh, when there are no segments) are
    /// drawn with the default material; empty segments are skipped.
    pub fn draw_batches(&self) -> Vec<DrawBatch<'_>> {
        let total = self.vertices.len();
        let mut batches = Vec::with_capacity(self.segments.len() + 1);

        let first = self
            .segments
            .first()
            .map_or(total, MaterialSegment::start_vertex);
        if first > 0 {
            batches.push(DrawBatch {
                vertices: 0..first,
                material: None,
            });
        }

        for (i, segment) in self.segments.iter().enumerate() {
            let start = segment.start_vertex();
            let end = self
                .segments
                .get(i + 1)
                .map_or(total, MaterialSegment::start_vertex);
            if start < end {
                batches.push(DrawBatch {
                    vertices: start..end,
                    material: Some(segment.material.as_str()),
                });
            }
        }

        batches
    }

    /// Material record to bind for `batch`; `None` selects the default material.
    pub fn material_for(&self, batch: &DrawBatch<'_>) -> Option<&MaterialRecord> {
        batch.material.and_then(|name| self.materials.get(name))
    }
}
