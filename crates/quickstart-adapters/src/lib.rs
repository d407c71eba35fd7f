//! Infrastructure adapters for create-vueless.
//!
//! This crate implements the ports defined in `quickstart-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod fetcher;
pub mod filesystem;
pub mod runner;

// Re-export commonly used adapters
pub use fetcher::{DirectoryFetcher, GitFetcher};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use runner::ProcessRunner;
