// error.rs — Error types for the compilation pipeline.

use thiserror::Error;

/// Fatal compilation errors.
///
/// Everything fatal happens at load time; per-artifact write failures are
/// not errors but [`OutcomeStatus::Failed`] entries in the outcome list.
///
/// [`OutcomeStatus::Failed`]: crate::apply::OutcomeStatus
#[derive(Debug, Error)]
pub enum CompileError {
    /// Registry loading or validation failed — nothing was written.
    #[error(transparent)]
    Registry(#[from] credo_registry::RegistryError),
}
