//! Domain layer - Pure logic, no process or filesystem access.

pub mod hls;
pub mod jobs;
pub mod ladder;
pub mod metadata;
pub mod probe;
