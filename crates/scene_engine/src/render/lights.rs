//! Per-frame light collection

use crate::components::{Light, LightType};
use crate::foundation::collections::{ComponentId, NodeId};
use crate::foundation::math::{Matrix4x4, Vector3};
use std::collections::BTreeMap;

/// One active light as seen by render preparation
#[derive(Debug, Clone)]
pub struct LightEntry {
    /// Node the light is attached to
    pub node: NodeId,
    /// The light component
    pub component: ComponentId,
    /// Emitted light
    pub light: Light,
    /// Node world matrix × light pivot
    pub mtx_world: Matrix4x4,
}

impl LightEntry {
    /// World position of the light
    pub fn position(&self) -> Vector3 {
        self.mtx_world.get_translation()
    }

    /// World direction the light shines along, unit length unless degenerate
    pub fn direction(&self) -> Vector3 {
        let forward = Vector3::transformation(Vector3::z_axis(1.0), &self.mtx_world, false);
        Vector3::normalization(forward, 1.0).unwrap_or(forward)
    }
}

/// Active lights of a frame, bucketed by [`LightType`]
#[derive(Debug, Clone, Default)]
pub struct LightBuckets {
    buckets: BTreeMap<LightType, Vec<LightEntry>>,
}

impl LightBuckets {
    /// Create empty buckets
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a light to the bucket of its type
    pub fn push(&mut self, entry: LightEntry) {
        self.buckets.entry(entry.light.light_type).or_default().push(entry);
    }

    /// Lights of one type, in collection order
    pub fn get(&self, light_type: LightType) -> &[LightEntry] {
        self.buckets.get(&light_type).map_or(&[], Vec::as_slice)
    }

    /// Non-empty buckets in [`LightType`] order
    pub fn iter(&self) -> impl Iterator<Item = (LightType, &[LightEntry])> {
        self.buckets.iter().map(|(&light_type, entries)| (light_type, entries.as_slice()))
    }

    /// Total number of lights
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Whether no light was collected
    pub fn is_empty(&self) -> bool {
        self.buckets.values().all(Vec::is_empty)
    }

    /// Forget all lights
    pub fn clear(&mut self) {
        self.buckets.clear();
    }
}
