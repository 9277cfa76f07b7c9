//! Application layer - Services that sequence the pipeline over ports.

pub mod encoder;
pub mod extractor;
pub mod manifest;
pub mod orchestrator;
pub mod video_service;
