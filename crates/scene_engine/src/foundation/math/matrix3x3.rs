//! 3x3 matrix for 2D transformations
//!
//! Same conventions as [`Matrix4x4`](super::Matrix4x4): column-major, column
//! vectors, translation in elements 6 and 7.

use super::{deg_to_rad, rad_to_deg, Vector2};
use crate::foundation::pool::Recyclable;
use approx::{AbsDiffEq, RelativeEq};
use serde::{Deserialize, Serialize};
use std::cell::Cell;

const IDENTITY: [f32; 9] = [
    1.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, //
    0.0, 0.0, 1.0,
];

/// Column-major 3x3 matrix with cached decomposition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Matrix3x3 {
    data: [f32; 9],
    #[serde(skip)]
    translation_cache: Cell<Option<Vector2>>,
    #[serde(skip)]
    scaling_cache: Cell<Option<Vector2>>,
    #[serde(skip)]
    rotation_cache: Cell<Option<f32>>,
}

impl Matrix3x3 {
    /// Matrix from raw column-major data
    pub fn from_array(data: [f32; 9]) -> Self {
        Self {
            data,
            translation_cache: Cell::new(None),
            scaling_cache: Cell::new(None),
            rotation_cache: Cell::new(None),
        }
    }

    /// The identity matrix
    pub fn identity() -> Self {
        Self::from_array(IDENTITY)
    }

    /// Translation by `translate`
    pub fn translation(translate: Vector2) -> Self {
        let mut data = IDENTITY;
        data[6] = translate.x;
        data[7] = translate.y;
        Self::from_array(data)
    }

    /// Counter-clockwise rotation in degrees
    pub fn rotation(angle_degrees: f32) -> Self {
        let (s, c) = deg_to_rad(angle_degrees).sin_cos();
        Self::from_array([
            c, s, 0.0, //
            -s, c, 0.0, //
            0.0, 0.0, 1.0,
        ])
    }

    /// Scaling along each axis
    pub fn scaling(scale: Vector2) -> Self {
        let mut data = IDENTITY;
        data[0] = scale.x;
        data[4] = scale.y;
        Self::from_array(data)
    }

    /// Product `a × b`
    pub fn multiplication(a: &Self, b: &Self) -> Self {
        let mut out = [0.0_f32; 9];
        for col in 0..3 {
            for row in 0..3 {
                out[col * 3 + row] = (0..3)
                    .map(|k| a.data[k * 3 + row] * b.data[col * 3 + k])
                    .sum();
            }
        }
        Self::from_array(out)
    }

    /// Determinant
    pub fn determinant(&self) -> f32 {
        let m = &self.data;
        m[0] * (m[4] * m[8] - m[7] * m[5]) - m[3] * (m[1] * m[8] - m[7] * m[2])
            + m[6] * (m[1] * m[5] - m[4] * m[2])
    }

    /// Inverse by cofactor expansion
    ///
    /// A singular matrix yields non-finite values.
    pub fn inversion(mtx: &Self) -> Self {
        let m = &mtx.data;
        let det = mtx.determinant();
        Self::from_array([
            (m[4] * m[8] - m[7] * m[5]) / det,
            (m[7] * m[2] - m[1] * m[8]) / det,
            (m[1] * m[5] - m[4] * m[2]) / det,
            (m[6] * m[5] - m[3] * m[8]) / det,
            (m[0] * m[8] - m[6] * m[2]) / det,
            (m[3] * m[2] - m[0] * m[5]) / det,
            (m[3] * m[7] - m[6] * m[4]) / det,
            (m[6] * m[1] - m[0] * m[7]) / det,
            (m[0] * m[4] - m[3] * m[1]) / det,
        ])
    }

    /// Multiply with `mtx`, from the left or from the right
    pub fn multiply(&mut self, mtx: &Self, from_left: bool) {
        let product = if from_left {
            Self::multiplication(mtx, self)
        } else {
            Self::multiplication(self, mtx)
        };
        self.set(&product);
    }

    /// Translate along local axes
    pub fn translate(&mut self, by: Vector2) {
        self.multiply(&Self::translation(by), false);
    }

    /// Rotate by degrees
    pub fn rotate(&mut self, angle_degrees: f32) {
        self.multiply(&Self::rotation(angle_degrees), false);
    }

    /// Scale along local axes
    pub fn scale(&mut self, by: Vector2) {
        self.multiply(&Self::scaling(by), false);
    }

    /// Copy `mtx` into this matrix
    pub fn set(&mut self, mtx: &Self) {
        self.data = mtx.data;
        self.reset_cache();
    }

    /// Copy of the raw data
    pub const fn get(&self) -> [f32; 9] {
        self.data
    }

    /// Translation part, cached
    pub fn get_translation(&self) -> Vector2 {
        if let Some(cached) = self.translation_cache.get() {
            return cached;
        }
        let translation = Vector2::new(self.data[6], self.data[7]);
        self.translation_cache.set(Some(translation));
        translation
    }

    /// Length of each basis column, cached
    pub fn get_scaling(&self) -> Vector2 {
        if let Some(cached) = self.scaling_cache.get() {
            return cached;
        }
        let scaling = Vector2::new(
            self.data[0].hypot(self.data[1]),
            self.data[3].hypot(self.data[4]),
        );
        self.scaling_cache.set(Some(scaling));
        scaling
    }

    /// Rotation in degrees, cached
    pub fn get_rotation(&self) -> f32 {
        if let Some(cached) = self.rotation_cache.get() {
            return cached;
        }
        let rotation = rad_to_deg(self.data[1].atan2(self.data[0]));
        self.rotation_cache.set(Some(rotation));
        rotation
    }

    fn reset_cache(&mut self) {
        self.translation_cache.set(None);
        self.scaling_cache.set(None);
        self.rotation_cache.set(None);
    }
}

impl Default for Matrix3x3 {
    fn default() -> Self {
        Self::identity()
    }
}

impl PartialEq for Matrix3x3 {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl Recyclable for Matrix3x3 {
    fn recycle(&mut self) {
        self.data = IDENTITY;
        self.reset_cache();
    }
}

impl From<&Matrix3x3> for nalgebra::Matrix3<f32> {
    fn from(mtx: &Matrix3x3) -> Self {
        Self::from_column_slice(&mtx.data)
    }
}

impl AbsDiffEq for Matrix3x3 {
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

impl RelativeEq for Matrix3x3 {
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
