//! Release pipeline stages
//!
//! Run in this order by [crate::cli::orchestration]:
//! [resolver] → version bump → [consistency] → [guard] → [transaction].
//! Each stage either hands its result to the next or stops the run with
//! a [crate::error::ReleaseError].

pub mod consistency;
pub mod guard;
pub mod resolver;
pub mod transaction;

pub use consistency::{ConsistencyReport, Problem, VersionMarker};
pub use guard::RepoState;
pub use resolver::{resolve, ResolvedTag, Resolution};
pub use transaction::Committed;
