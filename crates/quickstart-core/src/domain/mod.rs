// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for create-vueless.
//!
//! Pure data and rules: what the user selected, which template and commands
//! that selection maps to, and which scaffold-only files must go. All I/O
//! (git, filesystem, child processes) is reached through the ports defined
//! in the application layer.
//!
//! - **No I/O**: No filesystem, network, or process calls
//! - **No tracing**: Observability belongs to the application layer
//! - **Immutable values**: All domain objects are Clone + PartialEq
pub mod catalog;
pub mod entities;
pub mod error;
pub mod value_objects;

pub use catalog::{CommandLine, DEFAULT_BRANCH, ManagerCommands, RemoteTemplate, TemplateCatalog};
pub use entities::{
    cleanup::{CleanupEntry, CleanupPlan, CleanupReason},
    selection::{Selection, SelectionBuilder},
};
pub use error::{DomainError, ErrorCategory};
pub use value_objects::{PackageManager, ProjectName, Variant};
