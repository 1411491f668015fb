//! 4x4 transformation matrix
//!
//! Storage is a flat, column-major `[f32; 16]`. Element `col * 4 + row` holds
//! row `row` of column `col`; translation lives in elements 12, 13 and 14.
//!
//! Translation, Euler rotation and scaling are decomposed lazily and cached.
//! Every mutating method clears the cache before it returns.

use super::{deg_to_rad, rad_to_deg, MathError, Vector3};
use crate::foundation::pool::Recyclable;
use approx::{AbsDiffEq, RelativeEq};
use serde::{Deserialize, Serialize};
use std::cell::Cell;

const IDENTITY: [f32; 16] = [
    1.0, 0.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, 0.0, //
    0.0, 0.0, 1.0, 0.0, //
    0.0, 0.0, 0.0, 1.0,
];

/// Below this the Euler decomposition treats the Y rotation as gimbal locked
const GIMBAL_EPSILON: f32 = 1e-6;

/// Which extent of the viewport a field of view angle spans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FieldOfView {
    /// Angle spans the viewport width
    Horizontal,
    /// Angle spans the viewport height
    Vertical,
    /// Angle spans the viewport diagonal
    #[default]
    Diagonal,
}

/// Column-major 4x4 matrix with cached decomposition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Matrix4x4 {
    data: [f32; 16],
    #[serde(skip)]
    translation_cache: Cell<Option<Vector3>>,
    #[serde(skip)]
    rotation_cache: Cell<Option<Vector3>>,
    #[serde(skip)]
    scaling_cache: Cell<Option<Vector3>>,
}

impl Matrix4x4 {
    /// Matrix from raw column-major data
    pub fn from_array(data: [f32; 16]) -> Self {
        Self {
            data,
            translation_cache: Cell::new(None),
            rotation_cache: Cell::new(None),
            scaling_cache: Cell::new(None),
        }
    }

    /// The identity matrix
    pub fn identity() -> Self {
        Self::from_array(IDENTITY)
    }

    /// Translation by `translate`
    pub fn translation(translate: Vector3) -> Self {
        let mut data = IDENTITY;
        data[12] = translate.x;
        data[13] = translate.y;
        data[14] = translate.z;
        Self::from_array(data)
    }

    /// Rotation around the X axis, in degrees
    pub fn rotation_x(angle_degrees: f32) -> Self {
        let (s, c) = deg_to_rad(angle_degrees).sin_cos();
        Self::from_array([
            1.0, 0.0, 0.0, 0.0, //
            0.0, c, s, 0.0, //
            0.0, -s, c, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Rotation around the Y axis, in degrees
    pub fn rotation_y(angle_degrees: f32) -> Self {
        let (s, c) = deg_to_rad(angle_degrees).sin_cos();
        Self::from_array([
            c, 0.0, -s, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            s, 0.0, c, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Rotation around the Z axis, in degrees
    pub fn rotation_z(angle_degrees: f32) -> Self {
        let (s, c) = deg_to_rad(angle_degrees).sin_cos();
        Self::from_array([
            c, s, 0.0, 0.0, //
            -s, c, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Rotation from Euler angles in degrees, applied X first, then Y, then Z
    ///
    /// Equivalent to `rotation_z(z) × rotation_y(y) × rotation_x(x)`.
    pub fn rotation(euler_degrees: Vector3) -> Self {
        let (sx, cx) = deg_to_rad(euler_degrees.x).sin_cos();
        let (sy, cy) = deg_to_rad(euler_degrees.y).sin_cos();
        let (sz, cz) = deg_to_rad(euler_degrees.z).sin_cos();
        Self::from_array([
            cz * cy,
            sz * cy,
            -sy,
            0.0,
            cz * sy * sx - sz * cx,
            sz * sy * sx + cz * cx,
            cy * sx,
            0.0,
            cz * sy * cx + sz * sx,
            sz * sy * cx - cz * sx,
            cy * cx,
            0.0,
            0.0,
            0.0,
            0.0,
            1.0,
        ])
    }

    /// Scaling by `scale` along each axis
    pub fn scaling(scale: Vector3) -> Self {
        let mut data = IDENTITY;
        data[0] = scale.x;
        data[5] = scale.y;
        data[10] = scale.z;
        Self::from_array(data)
    }

    /// `translation × rotation × scaling`
    pub fn compose(translate: Vector3, rotate_degrees: Vector3, scale: Vector3) -> Self {
        let mut mtx = Self::rotation(rotate_degrees);
        mtx.scale(scale);
        mtx.data[12] = translate.x;
        mtx.data[13] = translate.y;
        mtx.data[14] = translate.z;
        mtx.reset_cache();
        mtx
    }

    /// Perspective projection
    ///
    /// `field_of_view` is in degrees and spans the extent chosen by `direction`.
    /// The camera looks along positive Z.
    pub fn projection_central(
        aspect: f32,
        field_of_view: f32,
        near: f32,
        far: f32,
        direction: FieldOfView,
    ) -> Self {
        let f = (0.5 * (std::f32::consts::PI - deg_to_rad(field_of_view))).tan();
        let range_inv = 1.0 / (near - far);
        let mut mtx = Self::from_array([
            f,
            0.0,
            0.0,
            0.0,
            0.0,
            f,
            0.0,
            0.0,
            0.0,
            0.0,
            (near + far) * range_inv,
            -1.0,
            0.0,
            0.0,
            near * far * range_inv * 2.0,
            0.0,
        ]);

        match direction {
            FieldOfView::Diagonal => {
                let root = aspect.sqrt();
                mtx.data[0] = f / root;
                mtx.data[5] = f * root;
            }
            FieldOfView::Vertical => mtx.data[0] = f / aspect,
            FieldOfView::Horizontal => mtx.data[5] = f * aspect,
        }

        mtx.rotate_y(180.0, false);
        mtx
    }

    /// Orthographic projection of the given box
    ///
    /// Y is flipped so that `top` maps below `bottom`, matching screen space
    /// where Y grows downward.
    pub fn projection_orthographic(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> Self {
        Self::from_array([
            2.0 / (right - left),
            0.0,
            0.0,
            0.0,
            0.0,
            -2.0 / (top - bottom),
            0.0,
            0.0,
            0.0,
            0.0,
            2.0 / (far - near),
            0.0,
            (left + right) / (left - right),
            (bottom + top) / (bottom - top),
            (near + far) / (near - far),
            1.0,
        ])
    }

    /// World matrix placed at `translate` whose Z axis points at `target`
    ///
    /// # Errors
    ///
    /// [`MathError::ZeroLength`] when `target` coincides with `translate` or
    /// `up` is parallel to the viewing direction.
    pub fn look_at(translate: Vector3, target: Vector3, up: Vector3) -> Result<Self, MathError> {
        let z_axis = Vector3::normalization(target - translate, 1.0)?;
        let x_axis = Vector3::normalization(Vector3::cross(up, z_axis), 1.0)?;
        let y_axis = Vector3::normalization(Vector3::cross(z_axis, x_axis), 1.0)?;
        Ok(Self::from_array([
            x_axis.x, x_axis.y, x_axis.z, 0.0, //
            y_axis.x, y_axis.y, y_axis.z, 0.0, //
            z_axis.x, z_axis.y, z_axis.z, 0.0, //
            translate.x, translate.y, translate.z, 1.0,
        ]))
    }

    /// Product `a × b`
    pub fn multiplication(a: &Self, b: &Self) -> Self {
        let mut result = Self::identity();
        Self::multiply_into(&mut result, a, b);
        result
    }

    /// Write `a × b` into `target` without allocating
    pub fn multiply_into(target: &mut Self, a: &Self, b: &Self) {
        let mut out = [0.0_f32; 16];
        for col in 0..4 {
            for row in 0..4 {
                out[col * 4 + row] = (0..4)
                    .map(|k| a.data[k * 4 + row] * b.data[col * 4 + k])
                    .sum();
            }
        }
        target.data = out;
        target.reset_cache();
    }

    /// `parent⁻¹ × mtx`: `mtx` expressed relative to `parent`
    pub fn relative(mtx: &Self, parent: &Self) -> Self {
        Self::multiplication(&Self::inversion(parent), mtx)
    }

    /// Transposed copy
    pub fn transposition(mtx: &Self) -> Self {
        let mut out = [0.0_f32; 16];
        for col in 0..4 {
            for row in 0..4 {
                out[row * 4 + col] = mtx.data[col * 4 + row];
            }
        }
        Self::from_array(out)
    }

    /// Inverse by cofactor expansion
    ///
    /// A singular matrix has no inverse; the result then contains non-finite
    /// values. Check [`determinant`](Self::determinant) first when the input
    /// may be degenerate.
    pub fn inversion(mtx: &Self) -> Self {
        let det = mtx.determinant();
        let mut out = [0.0_f32; 16];
        for col in 0..4 {
            for row in 0..4 {
                // adjugate is the transposed cofactor matrix
                out[col * 4 + row] = cofactor(&mtx.data, col, row) / det;
            }
        }
        Self::from_array(out)
    }

    /// Determinant
    pub fn determinant(&self) -> f32 {
        (0..4)
            .map(|col| self.data[col * 4] * cofactor(&self.data, 0, col))
            .sum()
    }

    /// Transpose in place
    pub fn transpose(&mut self) {
        let transposed = Self::transposition(self);
        self.data = transposed.data;
        self.reset_cache();
    }

    /// Invert in place, see [`inversion`](Self::inversion)
    pub fn invert(&mut self) {
        let inverse = Self::inversion(self);
        self.data = inverse.data;
        self.reset_cache();
    }

    /// Multiply with `mtx`, from the left (`mtx × self`) or right (`self × mtx`)
    pub fn multiply(&mut self, mtx: &Self, from_left: bool) {
        let product = if from_left {
            Self::multiplication(mtx, self)
        } else {
            Self::multiplication(self, mtx)
        };
        self.data = product.data;
        self.reset_cache();
    }

    /// Translate along local axes, or along parent axes when `local` is false
    pub fn translate(&mut self, by: Vector3, local: bool) {
        if local {
            self.multiply(&Self::translation(by), false);
        } else {
            self.data[12] += by.x;
            self.data[13] += by.y;
            self.data[14] += by.z;
            self.reset_cache();
        }
    }

    /// Translate along the local X axis
    pub fn translate_x(&mut self, x: f32, local: bool) {
        self.translate(Vector3::x_axis(x), local);
    }

    /// Translate along the local Y axis
    pub fn translate_y(&mut self, y: f32, local: bool) {
        self.translate(Vector3::y_axis(y), local);
    }

    /// Translate along the local Z axis
    pub fn translate_z(&mut self, z: f32, local: bool) {
        self.translate(Vector3::z_axis(z), local);
    }

    /// Rotate by Euler angles in degrees
    pub fn rotate(&mut self, by_degrees: Vector3, from_left: bool) {
        self.multiply(&Self::rotation(by_degrees), from_left);
    }

    /// Rotate around the X axis, in degrees
    pub fn rotate_x(&mut self, angle_degrees: f32, from_left: bool) {
        self.multiply(&Self::rotation_x(angle_degrees), from_left);
    }

    /// Rotate around the Y axis, in degrees
    pub fn rotate_y(&mut self, angle_degrees: f32, from_left: bool) {
        self.multiply(&Self::rotation_y(angle_degrees), from_left);
    }

    /// Rotate around the Z axis, in degrees
    pub fn rotate_z(&mut self, angle_degrees: f32, from_left: bool) {
        self.multiply(&Self::rotation_z(angle_degrees), from_left);
    }

    /// Scale along local axes
    pub fn scale(&mut self, by: Vector3) {
        self.multiply(&Self::scaling(by), false);
    }

    /// Rebuild from a decomposition, keeping whichever parts are `None`
    pub fn mutate(
        &mut self,
        translate: Option<Vector3>,
        rotate_degrees: Option<Vector3>,
        scale: Option<Vector3>,
    ) {
        let translate = translate.unwrap_or_else(|| self.get_translation());
        let rotate_degrees = rotate_degrees.unwrap_or_else(|| self.get_rotation());
        let scale = scale.unwrap_or_else(|| self.get_scaling());
        self.set(&Self::compose(translate, rotate_degrees, scale));
    }

    /// Replace the translation part
    pub fn set_translation(&mut self, translate: Vector3) {
        self.data[12] = translate.x;
        self.data[13] = translate.y;
        self.data[14] = translate.z;
        self.reset_cache();
    }

    /// Copy `mtx` into this matrix
    pub fn set(&mut self, mtx: &Self) {
        self.data = mtx.data;
        self.reset_cache();
    }

    /// Overwrite the raw data
    pub fn set_array(&mut self, data: [f32; 16]) {
        self.data = data;
        self.reset_cache();
    }

    /// Copy of the raw column-major data
    pub const fn get(&self) -> [f32; 16] {
        self.data
    }

    /// Raw data as bytes for buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    /// Translation part, cached
    pub fn get_translation(&self) -> Vector3 {
        if let Some(cached) = self.translation_cache.get() {
            return cached;
        }
        let translation = Vector3::new(self.data[12], self.data[13], self.data[14]);
        self.translation_cache.set(Some(translation));
        translation
    }

    /// Length of each basis column, cached
    pub fn get_scaling(&self) -> Vector3 {
        if let Some(cached) = self.scaling_cache.get() {
            return cached;
        }
        let d = &self.data;
        let scaling = Vector3::new(
            Vector3::new(d[0], d[1], d[2]).magnitude(),
            Vector3::new(d[4], d[5], d[6]).magnitude(),
            Vector3::new(d[8], d[9], d[10]).magnitude(),
        );
        self.scaling_cache.set(Some(scaling));
        scaling
    }

    /// Euler angles in degrees that [`rotation`](Self::rotation) would rebuild, cached
    ///
    /// When the Y rotation is near ±90 degrees the X and Z rotations are not
    /// separable; the Z angle is then reported as zero. A zero scale axis
    /// yields zero rotation.
    pub fn get_rotation(&self) -> Vector3 {
        if let Some(cached) = self.rotation_cache.get() {
            return cached;
        }
        let rotation = self.extract_euler();
        self.rotation_cache.set(Some(rotation));
        rotation
    }

    fn extract_euler(&self) -> Vector3 {
        let scaling = self.get_scaling();
        if scaling.x == 0.0 || scaling.y == 0.0 || scaling.z == 0.0 {
            return Vector3::ZERO;
        }
        let d = &self.data;
        let s0 = d[0] / scaling.x;
        let s1 = d[1] / scaling.x;
        let s2 = d[2] / scaling.x;
        let s6 = d[6] / scaling.y;
        let s10 = d[10] / scaling.z;

        let sy = s0.hypot(s1);
        if sy < GIMBAL_EPSILON {
            let x = (-d[9] / scaling.z).atan2(d[5] / scaling.y);
            let y = (-s2).atan2(sy);
            return Vector3::new(rad_to_deg(x), rad_to_deg(y), 0.0);
        }

        let first = Vector3::new(s6.atan2(s10), (-s2).atan2(sy), s1.atan2(s0));
        let second = Vector3::new(
            (-s6).atan2(-s10),
            (-s2).atan2(-sy),
            (-s1).atan2(-s0),
        );
        let weight = |v: Vector3| v.x.abs() + v.y.abs() + v.z.abs();
        let chosen = if weight(second) < weight(first) { second } else { first };

        Vector3::new(rad_to_deg(chosen.x), rad_to_deg(chosen.y), rad_to_deg(chosen.z))
    }

    fn reset_cache(&mut self) {
        self.translation_cache.set(None);
        self.rotation_cache.set(None);
        self.scaling_cache.set(None);
    }

    /// Whether every element is finite
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|v| v.is_finite())
    }
}

/// Signed minor of the element at (`row`, `col`)
fn cofactor(data: &[f32; 16], row: usize, col: usize) -> f32 {
    let mut minor = [0.0_f32; 9];
    let mut i = 0;
    for c in (0..4).filter(|&c| c != col) {
        for r in (0..4).filter(|&r| r != row) {
            minor[i] = data[c * 4 + r];
            i += 1;
        }
    }
    let m = &minor;
    let det = m[0] * (m[4] * m[8] - m[7] * m[5]) - m[3] * (m[1] * m[8] - m[7] * m[2])
        + m[6] * (m[1] * m[5] - m[4] * m[2]);
    if (row + col) % 2 == 0 {
        det
    } else {
        -det
    }
}

impl Default for Matrix4x4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl PartialEq for Matrix4x4 {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl Recyclable for Matrix4x4 {
    fn recycle(&mut self) {
        self.data = IDENTITY;
        self.reset_cache();
    }
}

impl std::fmt::Display for Matrix4x4 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..4 {
            writeln!(
                f,
                "[{:8.3} {:8.3} {:8.3} {:8.3}]",
                self.data[row],
                self.data[4 + row],
                self.data[8 + row],
                self.data[12 + row]
            )?;
        }
        Ok(())
    }
}

impl From<&Matrix4x4> for nalgebra::Matrix4<f32> {
    fn from(mtx: &Matrix4x4) -> Self {
        Self::from_column_slice(&mtx.data)
    }
}

impl From<nalgebra::Matrix4<f32>> for Matrix4x4 {
    fn from(mtx: nalgebra::Matrix4<f32>) -> Self {
        let mut data = [0.0_f32; 16];
        data.copy_from_slice(mtx.as_slice());
        Self::from_array(data)
    }
}

impl AbsDiffEq for Matrix4x4 {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl RelativeEq for Matrix4x4 {
    fn default_max_relative() -> f32 {
        f32::EPSILON
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rotation_matches_axis_product() {
        let euler = Vector3::new(30.0, -45.0, 60.0);
        let mut expected = Matrix4x4::rotation_z(euler.z);
        expected.multiply(&Matrix4x4::rotation_y(euler.y), false);
        expected.multiply(&Matrix4x4::rotation_x(euler.x), false);
        assert_relative_eq!(Matrix4x4::rotation(euler), expected, epsilon = 1e-6);
    }

    #[test]
    fn test_multiplication_order_matches_nalgebra() {
        let a = Matrix4x4::compose(
            Vector3::new(1.0, 2.0, 3.0),
            Vector3::new(10.0, 20.0, 30.0),
            Vector3::new(1.0, 2.0, 0.5),
        );
        let b = Matrix4x4::rotation_x(35.0);
        let product = Matrix4x4::multiplication(&a, &b);
        let expected: nalgebra::Matrix4<f32> =
            nalgebra::Matrix4::<f32>::from(&a) * nalgebra::Matrix4::<f32>::from(&b);
        assert_relative_eq!(product, Matrix4x4::from(expected), epsilon = 1e-5);
    }

    #[test]
    fn test_world_is_parent_times_local() {
        let parent = Matrix4x4::translation(Vector3::new(10.0, 0.0, 0.0));
        let local = Matrix4x4::rotation_y(90.0);
        let world = Matrix4x4::multiplication(&parent, &local);
        let point = Vector3::transformation(Vector3::z_axis(1.0), &world, true);
        assert_relative_eq!(point, Vector3::new(11.0, 0.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_inversion_matches_nalgebra() {
        let mtx = Matrix4x4::compose(
            Vector3::new(-3.0, 4.5, 2.0),
            Vector3::new(15.0, 70.0, -20.0),
            Vector3::new(2.0, 0.5, 1.5),
        );
        let inverse = Matrix4x4::inversion(&mtx);
        let expected = nalgebra::Matrix4::<f32>::from(&mtx)
            .try_inverse()
            .expect("matrix is invertible");
        assert_relative_eq!(inverse, Matrix4x4::from(expected), epsilon = 1e-4);

        let round_trip = Matrix4x4::multiplication(&mtx, &inverse);
        assert_relative_eq!(round_trip, Matrix4x4::identity(), epsilon = 1e-5);
    }

    #[test]
    fn test_inversion_of_singular_matrix_is_not_finite() {
        let singular = Matrix4x4::scaling(Vector3::new(1.0, 0.0, 1.0));
        assert_relative_eq!(singular.determinant(), 0.0);
        assert!(!Matrix4x4::inversion(&singular).is_finite());
    }

    #[test]
    fn test_decomposition_round_trip() {
        let translate = Vector3::new(1.0, -2.0, 3.0);
        let rotate = Vector3::new(20.0, -35.0, 50.0);
        let scale = Vector3::new(2.0, 3.0, 0.5);
        let mtx = Matrix4x4::compose(translate, rotate, scale);

        assert_relative_eq!(mtx.get_translation(), translate);
        assert_relative_eq!(mtx.get_scaling(), scale, epsilon = 1e-5);
        assert_relative_eq!(mtx.get_rotation(), rotate, epsilon = 1e-3);
    }

    #[test]
    fn test_gimbal_lock_decomposition_is_finite() {
        let mtx = Matrix4x4::rotation(Vector3::new(30.0, 90.0, 0.0));
        let euler = mtx.get_rotation();
        assert!(euler.is_finite());
        assert_relative_eq!(euler.z, 0.0);
        assert_relative_eq!(euler.y, 90.0, epsilon = 1e-2);
        let rebuilt = Matrix4x4::rotation(euler);
        assert_relative_eq!(rebuilt, mtx, epsilon = 1e-3);
    }

    #[test]
    fn test_cache_invalidated_by_mutation() {
        let mut mtx = Matrix4x4::translation(Vector3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(mtx.get_translation(), Vector3::x_axis(1.0));
        mtx.translate(Vector3::y_axis(2.0), false);
        assert_relative_eq!(mtx.get_translation(), Vector3::new(1.0, 2.0, 0.0));
        mtx.scale(Vector3::new(3.0, 1.0, 1.0));
        assert_relative_eq!(mtx.get_scaling(), Vector3::new(3.0, 1.0, 1.0));
        mtx.recycle();
        assert_eq!(mtx, Matrix4x4::identity());
        assert_relative_eq!(mtx.get_translation(), Vector3::ZERO);
    }

    #[test]
    fn test_local_translation_follows_rotation() {
        let mut mtx = Matrix4x4::rotation_y(90.0);
        mtx.translate_z(1.0, true);
        assert_relative_eq!(mtx.get_translation(), Vector3::x_axis(1.0), epsilon = 1e-6);
    }

    #[test]
    fn test_mutate_keeps_unspecified_parts() {
        let mut mtx = Matrix4x4::compose(
            Vector3::new(5.0, 0.0, 0.0),
            Vector3::new(0.0, 45.0, 0.0),
            Vector3::ONE,
        );
        mtx.mutate(None, None, Some(Vector3::new(2.0, 2.0, 2.0)));
        assert_relative_eq!(mtx.get_translation(), Vector3::x_axis(5.0));
        assert_relative_eq!(mtx.get_scaling(), Vector3::new(2.0, 2.0, 2.0), epsilon = 1e-5);
        assert_relative_eq!(mtx.get_rotation(), Vector3::y_axis(45.0), epsilon = 1e-3);
    }

    #[test]
    fn test_look_at_points_z_axis_at_target() {
        let mtx = Matrix4x4::look_at(Vector3::ZERO, Vector3::new(0.0, 0.0, -5.0), Vector3::y_axis(1.0))
            .unwrap();
        let forward = Vector3::transformation(Vector3::z_axis(1.0), &mtx, false);
        assert_relative_eq!(forward, Vector3::z_axis(-1.0), epsilon = 1e-6);

        assert_eq!(
            Matrix4x4::look_at(Vector3::ONE, Vector3::ONE, Vector3::y_axis(1.0)),
            Err(MathError::ZeroLength)
        );
    }

    #[test]
    fn test_as_bytes_length() {
        assert_eq!(Matrix4x4::identity().as_bytes().len(), 64);
    }
}
