//! CLI library components for sales OOD screening.

pub mod export;
pub mod logging;
pub mod render;
