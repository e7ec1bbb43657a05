//! engine::step
//!
//! The computation step abstraction.
//!
//! # Invariants
//!
//! - A step either completes or returns an error; partial results are never
//!   committed by a failing step
//! - `StepError::is_fatal` marks programming errors that must not be retried

use thiserror::Error;

use crate::report::ReportError;
use crate::store::StoreError;

/// Errors raised while executing a computation step.
#[derive(Debug, Error)]
pub enum StepError {
    /// A domain event carries a category with no stored code.
    ///
    /// Raised when an upstream stage produced a category this step was never
    /// taught about. Indicates a bug, not bad input.
    #[error("event category not supported: {0}")]
    UnsupportedCategory(String),

    /// The analysis report could not be read.
    #[error(transparent)]
    Report(#[from] ReportError),

    /// The event store rejected an operation.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl StepError {
    /// Whether this error is a programming error rather than an
    /// environmental failure.
    pub fn is_fatal(&self) -> bool {
        matches!(self, StepError::UnsupportedCategory(_))
    }
}

/// One stage of the analysis processing pipeline.
pub trait ComputationStep {
    /// Run the step to completion.
    fn execute(&self) -> Result<(), StepError>;

    /// Human-readable name of the step, for logs.
    fn description(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ComponentRef;

    #[test]
    fn only_unsupported_category_is_fatal() {
        assert!(StepError::UnsupportedCategory("X".into()).is_fatal());
        assert!(!StepError::from(ReportError::ComponentNotFound(ComponentRef::new(2))).is_fatal());
        assert!(!StepError::from(StoreError::Injected("boom".into())).is_fatal());
    }

    #[test]
    fn wrapped_errors_keep_their_message() {
        let err = StepError::from(ReportError::ComponentNotFound(ComponentRef::new(2)));
        assert_eq!(err.to_string(), "component #2 not found in report");
    }
}
