//! Command implementations.

mod experiment;
mod run;
mod stages;
mod validate;

pub use experiment::run_experiment;
pub use run::run_pipeline;
pub use stages::run_stages;
pub use validate::run_validate;
