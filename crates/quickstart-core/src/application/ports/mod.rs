//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `quickstart-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations inside the generated project
//!   - `TemplateFetcher`: History-free clone of a template repository
//!   - `CommandRunner`: Blocking child processes (install, init, version)
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{
    CommandOutput, CommandRunner, CommandSpec, Filesystem, StdioMode, TemplateFetcher,
};
