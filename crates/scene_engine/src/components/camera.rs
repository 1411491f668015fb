//! Camera component

use crate::foundation::math::{Color, FieldOfView, Matrix4x4};
use serde::{Deserialize, Serialize};

/// Projection used by a camera
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Projection {
    /// Perspective projection
    Central {
        /// Width divided by height
        aspect: f32,
        /// Field of view in degrees
        field_of_view: f32,
        /// Extent the field of view spans
        direction: FieldOfView,
        /// Near clipping distance
        near: f32,
        /// Far clipping distance
        far: f32,
    },
    /// Parallel projection of a box
    Orthographic {
        /// Left edge
        left: f32,
        /// Right edge
        right: f32,
        /// Bottom edge
        bottom: f32,
        /// Top edge
        top: f32,
    },
}

impl Default for Projection {
    fn default() -> Self {
        Self::Central {
            aspect: 1.0,
            field_of_view: 45.0,
            direction: FieldOfView::Diagonal,
            near: 1.0,
            far: 2000.0,
        }
    }
}

impl Projection {
    /// Projection matrix for this setup
    pub fn matrix(&self) -> Matrix4x4 {
        match *self {
            Self::Central {
                aspect,
                field_of_view,
                direction,
                near,
                far,
            } => Matrix4x4::projection_central(aspect, field_of_view, near, far, direction),
            Self::Orthographic {
                left,
                right,
                bottom,
                top,
            } => Matrix4x4::projection_orthographic(left, right, bottom, top, -400.0, 400.0),
        }
    }
}

/// Views the scene from its node
///
/// The camera looks along the positive Z axis of its pivot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentCamera {
    /// Placement relative to the node
    pub mtx_pivot: Matrix4x4,
    /// Projection setup
    pub projection: Projection,
    /// Color the backend clears to
    pub background: Color,
}

impl ComponentCamera {
    /// Camera with a default perspective projection
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch to a perspective projection
    pub fn project_central(
        &mut self,
        aspect: f32,
        field_of_view: f32,
        direction: FieldOfView,
        near: f32,
        far: f32,
    ) {
        self.projection = Projection::Central {
            aspect,
            field_of_view,
            direction,
            near,
            far,
        };
    }

    /// Switch to an orthographic projection
    pub fn project_orthographic(&mut self, left: f32, right: f32, bottom: f32, top: f32) {
        self.projection = Projection::Orthographic {
            left,
            right,
            bottom,
            top,
        };
    }

    /// Current projection matrix
    pub fn mtx_projection(&self) -> Matrix4x4 {
        self.projection.matrix()
    }
}
