//! Light component
//!
//! Lights are the one component kind a node may carry several of. Render
//! preparation collects active lights into one bucket per [`LightType`] and
//! hands the buckets to every lit shader that was used during the frame.

use crate::foundation::math::{Color, Matrix4x4, Vector3};
use serde::{Deserialize, Serialize};

/// Types of lights supported by the lighting system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LightType {
    /// Uniform light from all directions
    Ambient,
    /// Parallel rays, like sunlight
    Directional,
    /// Radiates in all directions from a position
    Point,
    /// Cone of light from a position
    Spot,
}

impl LightType {
    /// All light types, in bucket order
    pub const ALL: [Self; 4] = [Self::Ambient, Self::Directional, Self::Point, Self::Spot];
}

/// Light emitted by a [`ComponentLight`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Light {
    /// The type of light
    pub light_type: LightType,
    /// Emitted color
    pub color: Color,
    /// Intensity multiplier (0.0 = no light)
    pub intensity: f32,
}

/// Attaches a light to a node
///
/// Directional and spot lights shine along the pivot's Z axis; point and spot
/// lights sit at the pivot's origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentLight {
    /// Emitted light
    pub light: Light,
    /// Placement relative to the node
    pub mtx_pivot: Matrix4x4,
}

impl ComponentLight {
    /// Create a light component with an identity pivot
    pub fn new(light_type: LightType, color: Color, intensity: f32) -> Self {
        Self {
            light: Light {
                light_type,
                color,
                intensity,
            },
            mtx_pivot: Matrix4x4::identity(),
        }
    }

    /// Type of the emitted light
    pub const fn light_type(&self) -> LightType {
        self.light.light_type
    }
}

/// Factory functions for creating light components
pub struct LightFactory;

impl LightFactory {
    /// Ambient light
    pub fn ambient(color: Color, intensity: f32) -> ComponentLight {
        ComponentLight::new(LightType::Ambient, color, intensity)
    }

    /// Directional light shining along `direction`
    ///
    /// A zero direction keeps the default +Z orientation.
    pub fn directional(direction: Vector3, color: Color, intensity: f32) -> ComponentLight {
        let mut light = ComponentLight::new(LightType::Directional, color, intensity);
        light.mtx_pivot = orientation(Vector3::ZERO, direction);
        light
    }

    /// Point light at `position`
    pub fn point(position: Vector3, color: Color, intensity: f32) -> ComponentLight {
        let mut light = ComponentLight::new(LightType::Point, color, intensity);
        light.mtx_pivot = Matrix4x4::translation(position);
        light
    }

    /// Spot light at `position` shining along `direction`
    pub fn spot(position: Vector3, direction: Vector3, color: Color, intensity: f32) -> ComponentLight {
        let mut light = ComponentLight::new(LightType::Spot, color, intensity);
        light.mtx_pivot = orientation(position, direction);
        light
    }
}

fn orientation(position: Vector3, direction: Vector3) -> Matrix4x4 {
    let up = if direction.x.abs() < 1e-6 && direction.z.abs() < 1e-6 {
        Vector3::z_axis(1.0)
    } else {
        Vector3::y_axis(1.0)
    };
    Matrix4x4::look_at(position, position + direction, up)
        .unwrap_or_else(|_| Matrix4x4::translation(position))
}
