//! Asset loading: OBJ geometry, MTL material libraries and the assembled mesh.
//! Geometry and materials parse independently; `assemble` joins them into a
//! [`MeshModel`] triangle soup with material segments.

pub mod assemble;
pub mod loader;
pub mod mesh;
pub mod mtl;
pub mod obj;
pub mod transform;

mod parse;

pub use assemble::{assemble_vertices, build_model};
pub use loader::{LoadOptions, load_model, load_model_from_str};
pub use mesh::{DrawBatch, MaterialSegment, MeshModel, Vertex};
pub use mtl::{MaterialLibrary, MaterialRecord};
pub use obj::{FaceIndices, GeometryData, RawAttributePools};
pub use transform::scale;
