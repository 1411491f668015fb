//! Render preparation pipeline
//!
//! Turns an active scene branch into per-frame state: world matrices on the
//! nodes, light buckets, pick targets, physics nodes and a queue of draw
//! items. The actual GPU work happens behind [`GraphicsBackend`].
//!
//! A host loop typically runs:
//!
//! ```ignore
//! manager.prepare(&mut graph, root)?;
//! manager.draw(&graph, camera)?;
//! ```

mod backend;
mod lights;
mod manager;
mod render_queue;

#[cfg(test)]
mod tests;

pub use backend::{BodyTransform, GraphicsBackend, PhysicsBackend};
pub use lights::{LightBuckets, LightEntry};
pub use manager::RenderManager;
pub use render_queue::{CommandType, DrawItem, RenderQueue};
