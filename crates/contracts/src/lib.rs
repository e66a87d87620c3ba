//! # Contracts
//!
//! Shared interface contracts for the pipeline runners: the stage model, the
//! execution primitive, run summaries and the error taxonomy.
//! All other crates depend on this one, never the reverse.
//!
//! ## Execution Model
//! - A pipeline is an ordered, non-empty list of stages
//! - Exit code 0 is success, any other code is failure
//! - Stages run strictly one after another

mod error;
mod executor;
mod pipeline;
mod run;
mod stage;

pub use error::*;
pub use executor::{LocalStageExecutor, StageExecutor};
pub use pipeline::*;
pub use run::*;
pub use stage::*;
