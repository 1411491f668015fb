//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the scene core:
//! - Pooled math types and operations
//! - The recycling pool for transient value objects
//! - Handle types for the scene arena
//! - Logging utilities

pub mod collections;
pub mod logging;
pub mod math;
pub mod pool;
