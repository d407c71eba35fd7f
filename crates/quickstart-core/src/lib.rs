//! create-vueless core - hexagonal architecture implementation
//!
//! This crate provides the domain and application layers for the
//! `create-vueless` scaffolding tool, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │        quickstart-cli (create-vueless)  │
//! │   prompts, config, output, exit codes   │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │            ScaffoldService              │
//! │ guard → fetch → normalize → install →   │
//! │              initialize                 │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Ports (Traits)      │
//! │ TemplateFetcher, Filesystem, Runner     │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   quickstart-adapters (Infrastructure)  │
//! │ GitFetcher, LocalFilesystem, Process..  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use quickstart_core::{
//!     application::{NoopObserver, ScaffoldService},
//!     domain::{PackageManager, Selection, Variant},
//! };
//! # fn adapters() -> (
//! #     Box<dyn quickstart_core::application::TemplateFetcher>,
//! #     Box<dyn quickstart_core::application::Filesystem>,
//! #     Box<dyn quickstart_core::application::CommandRunner>,
//! # ) { unimplemented!() }
//!
//! let (fetcher, filesystem, runner) = adapters();
//! let service = ScaffoldService::new(fetcher, filesystem, runner);
//! let selection = Selection::new("demo", Variant::Ts, PackageManager::Pnpm);
//! let report = service
//!     .scaffold(&selection, Path::new("."), &mut NoopObserver)
//!     .unwrap();
//! println!("{}", report.next_steps());
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        NoopObserver, ScaffoldObserver, ScaffoldReport, ScaffoldService, ScaffoldStep,
        ports::{CommandOutput, CommandRunner, CommandSpec, Filesystem, StdioMode, TemplateFetcher},
    };
    pub use crate::domain::{
        CleanupPlan, ManagerCommands, PackageManager, ProjectName, RemoteTemplate, Selection,
        TemplateCatalog, Variant,
    };
    pub use crate::error::{QuickstartError, QuickstartResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
