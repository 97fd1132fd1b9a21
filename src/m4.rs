//! 4x4 transform helpers
//!
//! Matrices use the layout the vertex shader expects: column-major storage,
//! translation in elements 12..14. `translate`, `*_rotate` and `scale`
//! post-multiply, so the last call in a chain is the first one applied to a
//! vertex.

use glam::{Mat4, Vec3};

/// Identity matrix
#[inline]
pub fn identity() -> Mat4 {
    Mat4::IDENTITY
}

/// Standard product `a * b`
#[inline]
pub fn multiply(a: Mat4, b: Mat4) -> Mat4 {
    a * b
}

pub fn translation(tx: f32, ty: f32, tz: f32) -> Mat4 {
    Mat4::from_translation(Vec3::new(tx, ty, tz))
}

pub fn x_rotation(radians: f32) -> Mat4 {
    Mat4::from_rotation_x(radians)
}

pub fn y_rotation(radians: f32) -> Mat4 {
    Mat4::from_rotation_y(radians)
}

pub fn z_rotation(radians: f32) -> Mat4 {
    Mat4::from_rotation_z(radians)
}

pub fn scaling(sx: f32, sy: f32, sz: f32) -> Mat4 {
    Mat4::from_scale(Vec3::new(sx, sy, sz))
}

pub fn translate(m: Mat4, tx: f32, ty: f32, tz: f32) -> Mat4 {
    multiply(m, translation(tx, ty, tz))
}

pub fn x_rotate(m: Mat4, radians: f32) -> Mat4 {
    multiply(m, x_rotation(radians))
}

pub fn y_rotate(m: Mat4, radians: f32) -> Mat4 {
    multiply(m, y_rotation(radians))
}

pub fn z_rotate(m: Mat4, radians: f32) -> Mat4 {
    multiply(m, z_rotation(radians))
}

pub fn scale(m: Mat4, sx: f32, sy: f32, sz: f32) -> Mat4 {
    multiply(m, scaling(sx, sy, sz))
}

/// Flatten for uniform upload
#[inline]
pub fn to_array(m: Mat4) -> [f32; 16] {
    m.to_cols_array()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;
    use proptest::prelude::*;
    use std::f32::consts::FRAC_PI_2;

    fn approx(a: Vec4, b: Vec4) -> bool {
        (a - b).abs().max_element() < 1e-5
    }

    #[test]
    fn test_translation_layout() {
        let m = to_array(translation(0.25, -0.5, 2.0));
        assert_eq!(&m[12..15], &[0.25, -0.5, 2.0]);
        assert_eq!(m[15], 1.0);
        assert_eq!(m[0], 1.0);
        assert_eq!(m[3], 0.0);
    }

    #[test]
    fn test_z_rotation_layout() {
        let m = to_array(z_rotation(0.3));
        let (s, c) = 0.3f32.sin_cos();
        assert!((m[0] - c).abs() < 1e-6);
        assert!((m[1] - s).abs() < 1e-6);
        assert!((m[4] + s).abs() < 1e-6);
        assert!((m[5] - c).abs() < 1e-6);
    }

    #[test]
    fn test_quarter_turn_about_z() {
        let p = z_rotation(FRAC_PI_2) * Vec4::new(1.0, 0.0, 0.0, 1.0);
        assert!(approx(p, Vec4::new(0.0, 1.0, 0.0, 1.0)));
    }

    #[test]
    fn test_x_and_y_rotations() {
        let p = x_rotation(FRAC_PI_2) * Vec4::new(0.0, 1.0, 0.0, 1.0);
        assert!(approx(p, Vec4::new(0.0, 0.0, 1.0, 1.0)));

        let p = y_rotation(FRAC_PI_2) * Vec4::new(0.0, 0.0, 1.0, 1.0);
        assert!(approx(p, Vec4::new(1.0, 0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_translate_then_rotate_composition() {
        // Rotation applies to the vertex first, translation second
        let m = z_rotate(translate(identity(), 0.5, 0.0, 0.0), FRAC_PI_2);
        let p = m * Vec4::new(0.1, 0.0, 0.0, 1.0);
        assert!(approx(p, Vec4::new(0.5, 0.1, 0.0, 1.0)));
    }

    #[test]
    fn test_scale() {
        let m = scale(identity(), 0.5, 0.5, 1.0);
        let p = m * Vec4::new(2.0, -4.0, 3.0, 1.0);
        assert!(approx(p, Vec4::new(1.0, -2.0, 3.0, 1.0)));
    }

    proptest! {
        #[test]
        fn identity_is_neutral(tx in -2.0f32..2.0, ty in -2.0f32..2.0, a in -6.3f32..6.3) {
            let m = z_rotate(translation(tx, ty, 0.0), a);
            prop_assert!(multiply(identity(), m).abs_diff_eq(m, 1e-6));
            prop_assert!(multiply(m, identity()).abs_diff_eq(m, 1e-6));
        }

        #[test]
        fn translate_moves_origin(tx in -2.0f32..2.0, ty in -2.0f32..2.0) {
            let p = translate(identity(), tx, ty, 0.0) * Vec4::W;
            prop_assert!((p.x - tx).abs() < 1e-6);
            prop_assert!((p.y - ty).abs() < 1e-6);
        }

        #[test]
        fn rotation_preserves_length(a in -6.3f32..6.3, x in -1.0f32..1.0, y in -1.0f32..1.0) {
            let v = Vec4::new(x, y, 0.0, 0.0);
            let r = z_rotation(a) * v;
            prop_assert!((r.length() - v.length()).abs() < 1e-5);
        }
    }
}
