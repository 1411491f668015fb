//! Three-component vector

use super::{Matrix4x4, MathError, LENGTH_EPSILON};
use crate::foundation::pool::Recyclable;
use approx::{AbsDiffEq, RelativeEq};
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// Vector with x, y and z components
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
}

impl Vector3 {
    /// The zero vector
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Vector with every component set to one
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);

    /// Create a vector from its components
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Unit X axis scaled by `scale`
    pub const fn x_axis(scale: f32) -> Self {
        Self::new(scale, 0.0, 0.0)
    }

    /// Unit Y axis scaled by `scale`
    pub const fn y_axis(scale: f32) -> Self {
        Self::new(0.0, scale, 0.0)
    }

    /// Unit Z axis scaled by `scale`
    pub const fn z_axis(scale: f32) -> Self {
        Self::new(0.0, 0.0, scale)
    }

    /// Components as an array
    pub const fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Set all components at once
    pub fn set(&mut self, x: f32, y: f32, z: f32) {
        self.x = x;
        self.y = y;
        self.z = z;
    }

    /// Sum of any number of vectors
    pub fn sum(vectors: &[Self]) -> Self {
        vectors.iter().fold(Self::ZERO, |acc, v| acc + *v)
    }

    /// `minuend - subtrahend`
    pub fn difference(minuend: Self, subtrahend: Self) -> Self {
        minuend - subtrahend
    }

    /// Vector scaled by a factor
    pub fn scale(vector: Self, factor: f32) -> Self {
        vector * factor
    }

    /// Dot product
    pub fn dot(a: Self, b: Self) -> f32 {
        a.x.mul_add(b.x, a.y.mul_add(b.y, a.z * b.z))
    }

    /// Cross product `a × b`
    pub fn cross(a: Self, b: Self) -> Self {
        Self::new(
            a.y * b.z - a.z * b.y,
            a.z * b.x - a.x * b.z,
            a.x * b.y - a.y * b.x,
        )
    }

    /// Squared length
    pub fn magnitude_squared(self) -> f32 {
        Self::dot(self, self)
    }

    /// Length
    pub fn magnitude(self) -> f32 {
        self.magnitude_squared().sqrt()
    }

    /// Distance between two points
    pub fn distance(a: Self, b: Self) -> f32 {
        (a - b).magnitude()
    }

    /// Copy of `vector` rescaled to `length`
    ///
    /// # Errors
    ///
    /// Returns [`MathError::ZeroLength`] for a zero vector.
    pub fn normalization(vector: Self, length: f32) -> Result<Self, MathError> {
        let magnitude = vector.magnitude();
        if magnitude <= LENGTH_EPSILON {
            return Err(MathError::ZeroLength);
        }
        Ok(vector * (length / magnitude))
    }

    /// Rescale this vector to `length` in place
    ///
    /// # Errors
    ///
    /// Returns [`MathError::ZeroLength`] for a zero vector, which is left untouched.
    pub fn normalize(&mut self, length: f32) -> Result<(), MathError> {
        *self = Self::normalization(*self, length)?;
        Ok(())
    }

    /// Copy of `vector` transformed by `mtx`
    ///
    /// With `include_translation` the vector is treated as a point, otherwise
    /// as a direction.
    pub fn transformation(vector: Self, mtx: &Matrix4x4, include_translation: bool) -> Self {
        let m = mtx.get();
        let w = if include_translation { 1.0 } else { 0.0 };
        Self::new(
            m[0] * vector.x + m[4] * vector.y + m[8] * vector.z + m[12] * w,
            m[1] * vector.x + m[5] * vector.y + m[9] * vector.z + m[13] * w,
            m[2] * vector.x + m[6] * vector.y + m[10] * vector.z + m[14] * w,
        )
    }

    /// Transform this vector in place
    pub fn transform(&mut self, mtx: &Matrix4x4, include_translation: bool) {
        *self = Self::transformation(*self, mtx, include_translation);
    }

    /// Whether every component is finite
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Recyclable for Vector3 {
    fn recycle(&mut self) {
        *self = Self::ZERO;
    }
}

impl Add for Vector3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vector3 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Vector3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl SubAssign for Vector3 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Mul<f32> for Vector3 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Vector3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl std::fmt::Display for Vector3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}

impl From<nalgebra::Vector3<f32>> for Vector3 {
    fn from(v: nalgebra::Vector3<f32>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Vector3> for nalgebra::Vector3<f32> {
    fn from(v: Vector3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl AbsDiffEq for Vector3 {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
    }
}

impl RelativeEq for Vector3 {
    fn default_max_relative() -> f32 {
        f32::EPSILON
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
            && self.z.relative_eq(&other.z, epsilon, max_relative)
    }
}
