//! # Render Queue
//!
//! Collects the draw items produced by render preparation, split by
//! blending mode.
//!
//! ## Ordering
//!
//! - **Opaque** items are drawn in collection order, i.e. scene pre-order
//! - **Alpha** items are re-sorted back-to-front against the camera before
//!   every draw

use crate::components::ShaderKind;
use crate::foundation::collections::{ComponentId, NodeId};
use crate::foundation::math::{Matrix4x4, Vector3};
use std::cmp::Ordering;

/// Blending mode of a draw item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    /// Drawn in collection order
    Opaque,
    /// Drawn back-to-front after all opaque items
    Alpha,
}

/// One mesh to draw, as prepared for the frame
#[derive(Debug, Clone)]
pub struct DrawItem {
    /// Node carrying the mesh
    pub node: NodeId,
    /// The mesh component
    pub mesh: ComponentId,
    /// The material component
    pub material: ComponentId,
    /// Shader the material uses
    pub shader: ShaderKind,
    /// Mesh to world matrix, i.e. node world × mesh pivot
    pub mtx_world: Matrix4x4,
    /// Blending mode
    pub command_type: CommandType,
}

impl DrawItem {
    /// Depth of the mesh origin in the space of `mtx_view`
    ///
    /// The camera looks along its positive Z axis, so larger values are
    /// farther away.
    pub fn depth(&self, mtx_view: &Matrix4x4) -> f32 {
        Vector3::transformation(self.mtx_world.get_translation(), mtx_view, true).z
    }
}

/// Draw items of a frame
#[derive(Debug, Clone, Default)]
pub struct RenderQueue {
    opaque: Vec<DrawItem>,
    alpha: Vec<DrawItem>,
}

impl RenderQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a queue with pre-allocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            opaque: Vec::with_capacity(capacity),
            alpha: Vec::with_capacity(capacity / 4),
        }
    }

    /// Add an item to the list matching its blending mode
    pub fn push(&mut self, item: DrawItem) {
        match item.command_type {
            CommandType::Opaque => self.opaque.push(item),
            CommandType::Alpha => self.alpha.push(item),
        }
    }

    /// Sort alpha items far to near as seen through `mtx_view`
    pub fn sort_alpha(&mut self, mtx_view: &Matrix4x4) {
        self.alpha.sort_by(|a, b| {
            b.depth(mtx_view)
                .partial_cmp(&a.depth(mtx_view))
                .unwrap_or(Ordering::Equal)
        });
    }

    /// Opaque items in collection order
    pub fn opaque(&self) -> &[DrawItem] {
        &self.opaque
    }

    /// Alpha items, sorted if [`sort_alpha`](Self::sort_alpha) ran last
    pub fn alpha(&self) -> &[DrawItem] {
        &self.alpha
    }

    /// Total number of items
    pub fn len(&self) -> usize {
        self.opaque.len() + self.alpha.len()
    }

    /// Whether the queue holds no items
    pub fn is_empty(&self) -> bool {
        self.opaque.is_empty() && self.alpha.is_empty()
    }

    /// Clear all items for the next frame
    pub fn clear(&mut self) {
        self.opaque.clear();
        self.alpha.clear();
    }
}
