//! Local adapters for monolith deployment.

pub mod fs;
pub mod http;
pub mod process;

pub use fs::FsStore;
pub use process::TokioProcessRunner;
