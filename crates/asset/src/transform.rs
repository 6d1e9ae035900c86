//! Uniform scaling of an assembled mesh.

use corelib::UniformScale;

use crate::mesh::MeshModel;

/// Multiply every position, normal and texcoord of `model` by `factor`, in place.
///
/// Normals are scaled too, not renormalised; a factor of `0.0` collapses the
/// whole mesh to the origin.
pub fn scale(model: &mut MeshModel, factor: f32) {
    model.scale_uniform(factor);
}

impl UniformScale for MeshModel {
    fn scale_uniform(&mut self, factor: f32) {
        for vertex in self.vertices_mut() {
            vertex.position.scale_uniform(factor);
            vertex.normal.scale_uniform(factor);
            vertex.uv.scale_uniform(factor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        assemble::build_model, loader::LoadOptions, mtl::MaterialLibrary,
        obj::load_obj_from_str,
    };

    fn model() -> MeshModel {
        let src = r#"
            v 0.1 -2.5 3.75
            v 1e-3 7.0 -0.3
            v 12.0 0.0 0.5
            vt 0.3 0.7
            vn 0.267 0.534 0.801
            f 1/1/1 2/1/1 3/1/1
        "#;
        let geometry = load_obj_from_str(src, &LoadOptions::default()).expect("parse");
        build_model(geometry, MaterialLibrary::default()).expect("build")
    }

    fn close(a: &[f32], b: &[f32]) -> bool {
        a.iter().zip(b).all(|(x, y)| (x - y).abs() <= 1e-5 * x.abs().max(1.0))
    }

    #[test]
    fn unit_scale_is_bit_identical() {
        let original = model();
        let mut scaled = original.clone();
        scale(&mut scaled, 1.0);
        for (a, b) in original.vertices().iter().zip(scaled.vertices()) {
            assert_eq!(a.position.map(f32::to_bits), b.position.map(f32::to_bits));
            assert_eq!(a.normal.map(f32::to_bits), b.normal.map(f32::to_bits));
            assert_eq!(a.uv.map(f32::to_bits), b.uv.map(f32::to_bits));
        }
    }

    #[test]
    fn scales_compose() {
        let mut stepwise = model();
        scale(&mut stepwise, 2.5);
        scale(&mut stepwise, -0.4);

        let mut direct = model();
        scale(&mut direct, 2.5 * -0.4);

        for (a, b) in stepwise.vertices().iter().zip(direct.vertices()) {
            assert!(close(&a.position, &b.position));
            assert!(close(&a.normal, &b.normal));
            assert!(close(&a.uv, &b.uv));
        }
    }

    #[test]
    fn zero_collapses_to_origin() {
        let mut m = model();
        scale(&mut m, 0.0);
        assert!(m.vertices().iter().all(|v| {
            v.position.iter().chain(&v.normal).chain(&v.uv).all(|c| *c == 0.0)
        }));
        assert_eq!(m.triangle_count(), 1);
    }

    #[test]
    fn scales_every_attribute() {
        let mut m = model();
        scale(&mut m, 2.0);
        let v = m.vertices()[0];
        assert_eq!(v.position, [0.2, -5.0, 7.5]);
        assert_eq!(v.uv, [0.6, -1.4]);
        assert_eq!(v.normal, [0.534, 1.068, 1.602]);
    }
}
