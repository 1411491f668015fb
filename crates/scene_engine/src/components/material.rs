//! Material component and shader kinds

use crate::foundation::math::Color;
use serde::{Deserialize, Serialize};

/// Closed set of shader programs the backend provides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum ShaderKind {
    /// Single color, no lighting
    #[default]
    UniColor,
    /// Per-face lighting
    Flat,
    /// Per-vertex lighting
    Gouraud,
    /// Per-pixel lighting
    Phong,
    /// Textured, per-pixel lighting
    Textured,
}

impl ShaderKind {
    /// Whether the shader consumes light data
    pub const fn is_lit(self) -> bool {
        !matches!(self, Self::UniColor)
    }
}

/// Surface description used when drawing a mesh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Human readable name
    pub name: String,
    /// Shader used to draw the surface
    pub shader: ShaderKind,
    /// Base color
    pub color: Color,
}

impl Material {
    /// Create a material
    pub fn new(name: impl Into<String>, shader: ShaderKind, color: Color) -> Self {
        Self {
            name: name.into(),
            shader,
            color,
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new("default", ShaderKind::UniColor, Color::WHITE)
    }
}

/// Attaches a material to a node's mesh
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentMaterial {
    /// Material to draw with
    pub material: Material,
    /// Draw after opaque geometry, sorted back to front
    pub sort_for_alpha: bool,
}

impl ComponentMaterial {
    /// Create a material component; translucent colors sort for alpha
    pub fn new(material: Material) -> Self {
        let sort_for_alpha = material.color.is_translucent();
        Self {
            material,
            sort_for_alpha,
        }
    }

    /// Override alpha sorting (builder pattern)
    pub fn with_sort_for_alpha(mut self, sort_for_alpha: bool) -> Self {
        self.sort_for_alpha = sort_for_alpha;
        self
    }
}
