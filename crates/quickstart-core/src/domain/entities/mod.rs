pub mod cleanup;
pub mod selection;

pub use crate::domain::DomainError;
pub use cleanup::{CleanupEntry, CleanupPlan, CleanupReason};
pub use selection::{Selection, SelectionBuilder};
