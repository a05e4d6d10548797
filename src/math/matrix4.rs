// 4x4 transform matrix
//
// Elements are column-major, the layout uniformMatrix4fv expects with
// transpose = false. Arithmetic goes through glam.
//
// Naming follows the vector: set_* overwrite the matrix, translate/rotate/
// scale/concat right-multiply in place, and multiplied/inverse/transposed
// return new values.

use super::Vector3;
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Matrix4 {
    elements: [f32; 16],
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix4 {
    pub const fn identity() -> Self {
        Self {
            elements: [
                1.0, 0.0, 0.0, 0.0, //
                0.0, 1.0, 0.0, 0.0, //
                0.0, 0.0, 1.0, 0.0, //
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    /// Build from 16 column-major values.
    pub const fn from_cols_array(elements: [f32; 16]) -> Self {
        Self { elements }
    }

    #[inline]
    pub fn elements(&self) -> &[f32; 16] {
        &self.elements
    }

    #[inline]
    fn to_glam(self) -> Mat4 {
        Mat4::from_cols_array(&self.elements)
    }

    #[inline]
    fn assign(&mut self, m: Mat4) -> &mut Self {
        self.elements = m.to_cols_array();
        self
    }

    // =========================================================================
    // OVERWRITE
    // =========================================================================

    pub fn set_identity(&mut self) -> &mut Self {
        *self = Self::identity();
        self
    }

    pub fn set(&mut self, other: &Matrix4) -> &mut Self {
        self.elements = other.elements;
        self
    }

    pub fn set_translate(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.assign(Mat4::from_translation(Vec3::new(x, y, z)))
    }

    pub fn set_scale(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.assign(Mat4::from_scale(Vec3::new(x, y, z)))
    }

    /// Rotation of `angle_degrees` around `axis`. A zero axis gives identity.
    pub fn set_rotate(&mut self, angle_degrees: f32, axis: Vector3) -> &mut Self {
        let mut axis = axis;
        axis.normalize();
        if axis == Vector3::zero() {
            return self.set_identity();
        }
        self.assign(Mat4::from_axis_angle(axis.into(), angle_degrees.to_radians()))
    }

    /// Orthographic projection into OpenGL clip space (z in -1..1).
    pub fn set_ortho(
        &mut self,
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> &mut Self {
        self.assign(Mat4::orthographic_rh_gl(left, right, bottom, top, near, far))
    }

    /// Perspective projection into OpenGL clip space (z in -1..1).
    pub fn set_perspective(&mut self, fovy_degrees: f32, aspect: f32, near: f32, far: f32) -> &mut Self {
        self.assign(Mat4::perspective_rh_gl(fovy_degrees.to_radians(), aspect, near, far))
    }

    /// Right-handed view matrix looking from `eye` toward `center`.
    pub fn set_look_at(&mut self, eye: Vector3, center: Vector3, up: Vector3) -> &mut Self {
        self.assign(Mat4::look_at_rh(eye.into(), center.into(), up.into()))
    }

    // =========================================================================
    // IN PLACE (right-multiply)
    // =========================================================================

    /// `self = self * other`.
    pub fn concat(&mut self, other: &Matrix4) -> &mut Self {
        let m = self.to_glam() * other.to_glam();
        self.assign(m)
    }

    /// Alias of [`Matrix4::concat`].
    pub fn multiply(&mut self, other: &Matrix4) -> &mut Self {
        self.concat(other)
    }

    pub fn translate(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        let t = *Matrix4::identity().set_translate(x, y, z);
        self.concat(&t)
    }

    pub fn scale(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        let s = *Matrix4::identity().set_scale(x, y, z);
        self.concat(&s)
    }

    pub fn rotate(&mut self, angle_degrees: f32, axis: Vector3) -> &mut Self {
        let r = *Matrix4::identity().set_rotate(angle_degrees, axis);
        self.concat(&r)
    }

    pub fn transpose(&mut self) -> &mut Self {
        let m = self.to_glam().transpose();
        self.assign(m)
    }

    /// Invert in place. Returns false and leaves the matrix alone when it is
    /// singular.
    pub fn invert(&mut self) -> bool {
        match self.inverse() {
            Some(inv) => {
                *self = inv;
                true
            }
            None => false,
        }
    }

    // =========================================================================
    // BY VALUE
    // =========================================================================

    pub fn multiplied(&self, other: &Matrix4) -> Matrix4 {
        let mut out = *self;
        out.concat(other);
        out
    }

    /// Transform a point (w = 1).
    pub fn multiply_vector3(&self, v: &Vector3) -> Vector3 {
        self.to_glam().transform_point3((*v).into()).into()
    }

    pub fn transposed(&self) -> Matrix4 {
        let mut out = *self;
        out.transpose();
        out
    }

    pub fn inverse(&self) -> Option<Matrix4> {
        let m = self.to_glam();
        let det = m.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        Some(Matrix4::from(m.inverse()))
    }
}

impl From<Mat4> for Matrix4 {
    fn from(m: Mat4) -> Self {
        Self { elements: m.to_cols_array() }
    }
}

impl From<Matrix4> for Mat4 {
    fn from(m: Matrix4) -> Self {
        m.to_glam()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: &Matrix4, b: &Matrix4) -> bool {
        a.elements()
            .iter()
            .zip(b.elements())
            .all(|(x, y)| (x - y).abs() < 1e-5)
    }

    fn approx_v(a: Vector3, b: Vector3) -> bool {
        a.diff(&b).length() < 1e-5
    }

    #[test]
    fn default_is_identity() {
        let m = Matrix4::default();
        let v = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(m.multiply_vector3(&v), v);
    }

    #[test]
    fn translate_moves_points() {
        let mut m = Matrix4::identity();
        m.translate(1.0, 2.0, 3.0);
        let p = m.multiply_vector3(&Vector3::zero());
        assert!(approx_v(p, Vector3::new(1.0, 2.0, 3.0)));
        // column-major: translation lives in elements 12..15
        assert_eq!(&m.elements()[12..15], &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn concat_applies_right_hand_side_first() {
        let mut m = Matrix4::identity();
        m.translate(10.0, 0.0, 0.0).scale(2.0, 2.0, 2.0);
        let p = m.multiply_vector3(&Vector3::new(1.0, 0.0, 0.0));
        assert!(approx_v(p, Vector3::new(12.0, 0.0, 0.0)));
    }

    #[test]
    fn rotate_quarter_turn_about_z() {
        let mut m = Matrix4::identity();
        m.rotate(90.0, Vector3::new(0.0, 0.0, 5.0));
        let p = m.multiply_vector3(&Vector3::new(1.0, 0.0, 0.0));
        assert!(approx_v(p, Vector3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn rotate_about_zero_axis_is_identity() {
        let mut m = Matrix4::identity();
        m.set_rotate(45.0, Vector3::zero());
        assert_eq!(m, Matrix4::identity());
    }

    #[test]
    fn multiplied_leaves_receiver_alone() {
        let a = *Matrix4::identity().set_translate(1.0, 0.0, 0.0);
        let b = *Matrix4::identity().set_scale(3.0, 3.0, 3.0);
        let before = a;
        let c = a.multiplied(&b);
        assert_eq!(a, before);
        assert_ne!(c, a);
    }

    #[test]
    fn invert_round_trip() {
        let mut m = Matrix4::identity();
        m.translate(1.0, -2.0, 3.0).rotate(30.0, Vector3::new(1.0, 1.0, 0.0));
        let inv = m.inverse().expect("invertible");
        assert!(approx(&m.multiplied(&inv), &Matrix4::identity()));
    }

    #[test]
    fn singular_invert_is_rejected() {
        let mut m = *Matrix4::identity().set_scale(0.0, 1.0, 1.0);
        let before = m;
        assert!(!m.invert());
        assert_eq!(m, before);
    }

    #[test]
    fn transpose_twice_is_identity_op() {
        let mut m = Matrix4::identity();
        m.translate(4.0, 5.0, 6.0);
        assert_eq!(m.transposed().transposed(), m);
        assert_eq!(m.transposed().elements()[3], 4.0);
    }

    #[test]
    fn look_at_puts_center_on_negative_z() {
        let mut view = Matrix4::identity();
        view.set_look_at(
            Vector3::new(0.0, 0.0, 5.0),
            Vector3::zero(),
            Vector3::new(0.0, 1.0, 0.0),
        );
        let p = view.multiply_vector3(&Vector3::zero());
        assert!(approx_v(p, Vector3::new(0.0, 0.0, -5.0)));
    }

    #[test]
    fn perspective_is_finite() {
        let mut proj = Matrix4::identity();
        proj.set_perspective(45.0, 16.0 / 9.0, 0.1, 100.0);
        assert!(proj.elements().iter().all(|e| e.is_finite()));
        assert_eq!(proj.elements()[11], -1.0);
    }

    #[test]
    fn ortho_maps_corners_to_ndc() {
        let mut proj = Matrix4::identity();
        proj.set_ortho(0.0, 100.0, 0.0, 50.0, -1.0, 1.0);
        let p = proj.multiply_vector3(&Vector3::new(100.0, 50.0, 0.0));
        assert!(approx_v(p, Vector3::new(1.0, 1.0, 0.0)));
    }
}
