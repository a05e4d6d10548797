// 3-component vector
//
// Two operation groups:
// - in place (normalize, scale, plus): mutate and return &mut Self for chaining
// - by value (diff, sum, cross): leave both operands untouched, return a new vector

use bytemuck::{Pod, Zeroable};
use std::ops::{Add, AddAssign, Index, IndexMut, Mul, Neg, Sub};

/// Three `f32` components stored contiguously, ready for upload as-is.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct Vector3 {
    elements: [f32; 3],
}

impl Vector3 {
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { elements: [x, y, z] }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self { elements: [0.0; 3] }
    }

    /// Copy the first three values of `src`.
    ///
    /// A short slice is not rejected: missing components are NaN, so the bad
    /// input shows up downstream instead of here.
    pub fn from_slice(src: &[f32]) -> Self {
        let get = |i: usize| src.get(i).copied().unwrap_or(f32::NAN);
        Self::new(get(0), get(1), get(2))
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.elements[0]
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.elements[1]
    }

    #[inline]
    pub fn z(&self) -> f32 {
        self.elements[2]
    }

    #[inline]
    pub fn elements(&self) -> &[f32; 3] {
        &self.elements
    }

    #[inline]
    pub fn elements_mut(&mut self) -> &mut [f32; 3] {
        &mut self.elements
    }

    // -------------------------------------------------------------------------
    // In place
    // -------------------------------------------------------------------------

    /// Normalize to unit length. See [`Vector3::normalize_to`].
    pub fn normalize(&mut self) -> &mut Self {
        self.normalize_to(1.0)
    }

    /// Rescale this vector so its length is `target_length`.
    ///
    /// A vector of zero or NaN length becomes the zero vector. A vector whose
    /// length already equals `target_length` exactly is returned untouched.
    pub fn normalize_to(&mut self, target_length: f32) -> &mut Self {
        let [x, y, z] = self.elements;
        let g = (x * x + y * y + z * z).sqrt();
        if g == 0.0 || g.is_nan() {
            self.elements = [0.0; 3];
            return self;
        }
        if g == target_length {
            return self;
        }
        let k = target_length / g;
        self.elements = [x * k, y * k, z * k];
        self
    }

    /// Multiply every component by `factor`.
    pub fn scale(&mut self, factor: f32) -> &mut Self {
        for e in &mut self.elements {
            *e *= factor;
        }
        self
    }

    /// Add `other` into this vector.
    pub fn plus(&mut self, other: &Vector3) -> &mut Self {
        self.elements[0] += other.elements[0];
        self.elements[1] += other.elements[1];
        self.elements[2] += other.elements[2];
        self
    }

    // -------------------------------------------------------------------------
    // By value
    // -------------------------------------------------------------------------

    /// `self - other` as a new vector.
    pub fn diff(&self, other: &Vector3) -> Vector3 {
        let (a, b) = (&self.elements, &other.elements);
        Vector3::new(a[0] - b[0], a[1] - b[1], a[2] - b[2])
    }

    /// `self + other` as a new vector.
    pub fn sum(&self, other: &Vector3) -> Vector3 {
        let (a, b) = (&self.elements, &other.elements);
        Vector3::new(a[0] + b[0], a[1] + b[1], a[2] + b[2])
    }

    pub fn length(&self) -> f32 {
        self.dot(self).sqrt()
    }

    pub fn dot(&self, other: &Vector3) -> f32 {
        let (a, b) = (&self.elements, &other.elements);
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    /// `self × other` as a new vector.
    pub fn cross(&self, other: &Vector3) -> Vector3 {
        let (a, b) = (&self.elements, &other.elements);
        Vector3::new(
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        )
    }
}

impl From<[f32; 3]> for Vector3 {
    #[inline]
    fn from(elements: [f32; 3]) -> Self {
        Self { elements }
    }
}

impl From<Vector3> for [f32; 3] {
    #[inline]
    fn from(v: Vector3) -> Self {
        v.elements
    }
}

impl From<glam::Vec3> for Vector3 {
    #[inline]
    fn from(v: glam::Vec3) -> Self {
        Self { elements: v.to_array() }
    }
}

impl From<Vector3> for glam::Vec3 {
    #[inline]
    fn from(v: Vector3) -> Self {
        glam::Vec3::from_array(v.elements)
    }
}

impl Add for Vector3 {
    type Output = Vector3;
    #[inline]
    fn add(self, rhs: Vector3) -> Vector3 {
        self.sum(&rhs)
    }
}

impl Sub for Vector3 {
    type Output = Vector3;
    #[inline]
    fn sub(self, rhs: Vector3) -> Vector3 {
        self.diff(&rhs)
    }
}

impl Mul<f32> for Vector3 {
    type Output = Vector3;
    #[inline]
    fn mul(mut self, rhs: f32) -> Vector3 {
        self.scale(rhs);
        self
    }
}

impl Neg for Vector3 {
    type Output = Vector3;
    #[inline]
    fn neg(self) -> Vector3 {
        self * -1.0
    }
}

impl AddAssign for Vector3 {
    #[inline]
    fn add_assign(&mut self, rhs: Vector3) {
        self.plus(&rhs);
    }
}

impl Index<usize> for Vector3 {
    type Output = f32;
    #[inline]
    fn index(&self, i: usize) -> &f32 {
        &self.elements[i]
    }
}

impl IndexMut<usize> for Vector3 {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut f32 {
        &mut self.elements[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: &Vector3, b: &Vector3) -> bool {
        a.diff(b).length() < 1e-5
    }

    #[test]
    fn construct_defaults_to_zero() {
        assert_eq!(Vector3::default(), Vector3::zero());
        assert_eq!(Vector3::from([1.0, 2.0, 3.0]), Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn short_slice_propagates_nan() {
        let v = Vector3::from_slice(&[1.0, 2.0]);
        assert_eq!(v.x(), 1.0);
        assert_eq!(v.y(), 2.0);
        assert!(v.z().is_nan());
        assert!(v.length().is_nan());
    }

    #[test]
    fn long_slice_uses_first_three() {
        let v = Vector3::from_slice(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(v, Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn normalize_three_four_zero() {
        let mut v = Vector3::new(3.0, 4.0, 0.0);
        assert_eq!(v.length(), 5.0);
        v.normalize();
        assert!(approx(&v, &Vector3::new(0.6, 0.8, 0.0)));
    }

    #[test]
    fn normalize_zero_stays_zero() {
        let mut v = Vector3::zero();
        v.normalize_to(7.0);
        assert_eq!(v, Vector3::zero());
    }

    #[test]
    fn normalize_nan_length_becomes_zero() {
        let mut v = Vector3::from_slice(&[1.0, 2.0]);
        assert!(v.length().is_nan());
        v.normalize();
        assert_eq!(v, Vector3::zero());
    }

    #[test]
    fn normalize_exact_length_is_untouched() {
        let mut v = Vector3::new(0.0, 2.0, 0.0);
        v.normalize_to(2.0);
        assert_eq!(v, Vector3::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn in_place_ops_chain() {
        let mut v = Vector3::new(1.0, 0.0, 0.0);
        v.scale(3.0).plus(&Vector3::new(0.0, 4.0, 0.0)).normalize();
        assert!(approx(&v, &Vector3::new(0.6, 0.8, 0.0)));
    }

    #[test]
    fn operators_match_named_methods() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, a.sum(&b));
        assert_eq!(a - b, a.diff(&b));
        assert_eq!(-a, Vector3::new(-1.0, -2.0, -3.0));
        let mut c = a;
        c += b;
        assert_eq!(c, Vector3::new(5.0, 7.0, 9.0));
        assert_eq!(a[2], 3.0);
    }

    #[test]
    fn glam_round_trip() {
        let v = Vector3::new(1.0, -2.0, 0.5);
        let g: glam::Vec3 = v.into();
        assert_eq!(g, glam::Vec3::new(1.0, -2.0, 0.5));
        assert_eq!(Vector3::from(g), v);
    }

    #[test]
    fn bytes_are_contiguous() {
        let v = Vector3::new(1.0, 2.0, 3.0);
        let bytes: &[u8] = bytemuck::bytes_of(&v);
        assert_eq!(bytes.len(), 12);
        assert_eq!(bytemuck::cast_slice::<u8, f32>(bytes), &[1.0, 2.0, 3.0]);
    }
}
