//! Error types for the comparison pipeline

use crate::pipeline::PipelineState;
use devcmp_core::{ListSide, ObjectError};
use thiserror::Error;

/// Result type for comparison operations
pub type CompareResult<T> = Result<T, CompareError>;

/// Error when the pipeline is asked to skip or repeat a step
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Invalid pipeline transition from {from:?} to {to:?}")]
pub struct InvalidTransition {
    pub from: PipelineState,
    pub to: PipelineState,
}

/// Errors that can occur while comparing two lists
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompareError {
    /// An entry cannot take part in the comparison
    #[error(transparent)]
    Object(#[from] ObjectError),

    /// Pipeline step run out of order
    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransition),

    /// Expected render anchor does not exist
    #[error("no render anchor '{anchor}' in list {side}")]
    RenderTargetMissing { side: ListSide, anchor: String },
}
