//! StageExecutor trait - the single execution primitive
//!
//! Both runners go through this interface; only the `OutputMode` differs.

use crate::{ContractError, OutputMode, StageResult, StageSpec};

/// Launch a stage and wait for it to finish
///
/// Implementations must not return until the child has exited.
#[trait_variant::make(StageExecutor: Send)]
pub trait LocalStageExecutor {
    /// Run one stage to completion
    ///
    /// # Errors
    /// Returns `ContractError::StageSpawn` when the executable cannot be
    /// launched. A stage that runs and exits nonzero is NOT an error; it is
    /// reported through `StageResult::exit_code`.
    async fn execute(
        &self,
        stage: &StageSpec,
        mode: OutputMode,
    ) -> Result<StageResult, ContractError>;
}
