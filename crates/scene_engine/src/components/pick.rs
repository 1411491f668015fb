//! Pick component for pointer selection

use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

bitflags! {
    /// Layers a pickable node belongs to, for broad-phase filtering
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PickLayers: u32 {
        /// World objects
        const WORLD = 0b0001;
        /// UI elements
        const UI = 0b0010;
        /// Gizmos and debug objects
        const GIZMO = 0b0100;
        /// Effects
        const EFFECTS = 0b1000;
    }
}

impl Default for PickLayers {
    fn default() -> Self {
        Self::WORLD
    }
}

impl Serialize for PickLayers {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.bits().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PickLayers {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u32::deserialize(deserializer).map(Self::from_bits_truncate)
    }
}

/// How a pick test is performed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PickType {
    /// Test against the node's bounding radius
    #[default]
    Radius,
    /// Test by rendering ids in camera space
    Camera,
    /// Delegate to the physics backend
    Physics,
}

/// Marks a node as pickable
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ComponentPick {
    /// Pick test used
    pub pick: PickType,
    /// Layers the node is pickable on
    pub layers: PickLayers,
}

impl ComponentPick {
    /// Pickable on the world layer
    pub fn new(pick: PickType) -> Self {
        Self {
            pick,
            layers: PickLayers::default(),
        }
    }

    /// Set the layers (builder pattern)
    pub const fn with_layers(mut self, layers: PickLayers) -> Self {
        self.layers = layers;
        self
    }

    /// Whether the component is on any of the layers in `mask`
    pub const fn is_on(&self, mask: PickLayers) -> bool {
        self.layers.intersects(mask)
    }
}
