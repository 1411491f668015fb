//! Two-component vector

use super::{Matrix3x3, MathError, LENGTH_EPSILON};
use crate::foundation::pool::Recyclable;
use approx::{AbsDiffEq, RelativeEq};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

/// Vector with x and y components
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
}

impl Vector2 {
    /// The zero vector
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Vector with every component set to one
    pub const ONE: Self = Self::new(1.0, 1.0);

    /// Create a vector from its components
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Set both components
    pub fn set(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    /// Dot product
    pub fn dot(a: Self, b: Self) -> f32 {
        a.x.mul_add(b.x, a.y * b.y)
    }

    /// Z component of the 3D cross product of `a` and `b`
    pub fn cross_product(a: Self, b: Self) -> f32 {
        a.x * b.y - a.y * b.x
    }

    /// Vector rotated 90 degrees counter-clockwise
    pub const fn orthogonal(self) -> Self {
        Self::new(-self.y, self.x)
    }

    /// Length
    pub fn magnitude(self) -> f32 {
        self.x.hypot(self.y)
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

    /// Rescale in place
    ///
    /// # Errors
    ///
    /// Returns [`MathError::ZeroLength`] for a zero vector.
    pub fn normalize(&mut self, length: f32) -> Result<(), MathError> {
        *self = Self::normalization(*self, length)?;
        Ok(())
    }

    /// Copy of `vector` transformed by a 2D matrix
    pub fn transformation(vector: Self, mtx: &Matrix3x3, include_translation: bool) -> Self {
        let m = mtx.get();
        let w = if include_translation { 1.0 } else { 0.0 };
        Self::new(
            m[0] * vector.x + m[3] * vector.y + m[6] * w,
            m[1] * vector.x + m[4] * vector.y + m[7] * w,
        )
    }

    /// Transform in place
    pub fn transform(&mut self, mtx: &Matrix3x3, include_translation: bool) {
        *self = Self::transformation(*self, mtx, include_translation);
    }
}

impl Recyclable for Vector2 {
    fn recycle(&mut self) {
        *self = Self::ZERO;
    }
}

impl Add for Vector2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vector2 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vector2 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl From<nalgebra::Vector2<f32>> for Vector2 {
    fn from(v: nalgebra::Vector2<f32>) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Vector2> for nalgebra::Vector2<f32> {
    fn from(v: Vector2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl AbsDiffEq for Vector2 {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon) && self.y.abs_diff_eq(&other.y, epsilon)
    }
}

impl RelativeEq for Vector2 {
    fn default_max_relative() -> f32 {
        f32::EPSILON
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
    }
}
