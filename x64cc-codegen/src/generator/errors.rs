//! Code generation invariant violations
//! 
//! None of these can be triggered by a program that made it through the
//! conversion pass; they guard against malformed trees.

use thiserror::Error;
use x64cc_common::CompilerError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenError {
    #[error("unknown node type: {0}")]
    UnknownNode(String),

    #[error("invalid lvalue: {0}")]
    InvalidLvalue(&'static str),

    #[error("{0} has no resolved type")]
    MissingType(&'static str),

    #[error("unsupported load width: {0} bytes")]
    UnsupportedWidth(u64),

    #[error("variable '{0}' has no frame slot")]
    MissingSlot(String),
}

impl From<GenError> for CompilerError {
    fn from(err: GenError) -> Self {
        CompilerError::codegen_error(err.to_string())
    }
}
