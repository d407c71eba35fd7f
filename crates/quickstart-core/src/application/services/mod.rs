//! Application services - orchestrate use cases.
//!
//! The only use case is "create a project": `ScaffoldService` runs the
//! pipeline from directory guard to manifest annotation.

pub mod scaffold_service;

pub use scaffold_service::{
    ENV_EXAMPLE_FILE, ENV_LOCAL_FILE, MANIFEST_FILE, NoopObserver, ScaffoldObserver, ScaffoldPlan,
    ScaffoldReport, ScaffoldService, ScaffoldStep, USER_AGENT_ENV,
};
