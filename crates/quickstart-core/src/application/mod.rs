//! Application layer for create-vueless.
//!
//! This layer contains:
//! - **Services**: The scaffold pipeline (`ScaffoldService`)
//! - **Ports**: Interface definitions (traits) for git, filesystem and processes
//! - **Errors**: Application-specific error types
//!
//! The application layer sequences the domain rules against the ports. The
//! rules themselves (what to delete, which command to run) live in
//! `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    NoopObserver, ScaffoldObserver, ScaffoldPlan, ScaffoldReport, ScaffoldService, ScaffoldStep,
    USER_AGENT_ENV,
};

// Re-export port traits (for adapter implementation)
pub use ports::{CommandRunner, Filesystem, TemplateFetcher};

pub use error::ApplicationError;
