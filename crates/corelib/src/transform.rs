use crate::{Vec2, Vec3};

/// In-place multiplication of every component by one factor.
///
/// A factor of `0.0` is accepted and collapses the value to the origin.
pub trait UniformScale {
    fn scale_uniform(&mut self, factor: f32);
}

impl UniformScale for Vec3 {
    #[inline]
    fn scale_uniform(&mut self, factor: f32) {
        *self *= factor;
    }
}

impl UniformScale for Vec2 {
    #[inline]
    fn scale_uniform(&mut self, factor: f32) {
        *self *= factor;
    }
}

impl<const N: usize> UniformScale for [f32; N] {
    #[inline]
    fn scale_uniform(&mut self, factor: f32) {
        for c in self.iter_mut() {
            *c *= factor;
        }
    }
}
