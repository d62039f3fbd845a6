//! Data exposed across the rendering boundary.

/// Per-frame view state.
pub mod render;
