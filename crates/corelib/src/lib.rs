//! Core types: math re-exports, load errors, uniform scaling.

pub use glam::{Vec2, Vec3, vec2, vec3};

pub mod error;
pub mod transform;

pub use error::{AttributePool, LoadError, LoadResult};
pub use transform::UniformScale;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_scale_keeps_vectors() {
        let mut v = vec3(1.5, -2.0, 0.25);
        v.scale_uniform(1.0);
        assert_eq!(v, vec3(1.5, -2.0, 0.25));
    }

    #[test]
    fn index_error_names_pool() {
        let err = LoadError::IndexOutOfRange {
            corner: 4,
            pool: AttributePool::Normal,
            index: 9,
            len: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("Corner 4"));
        assert!(msg.contains("normal"));
        assert!(msg.contains("9"));
    }
}
