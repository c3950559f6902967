//! Parse error types
//! 
//! This module defines all error types that can occur during parsing.

use crate::lexer::Token;
use thiserror::Error;
use x64cc_common::{CompilerError, SourceLocation};

/// Parse error types specific to the parser
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("Expected {expected}, found {}", .found.token_type)]
    UnexpectedToken {
        expected: String,
        found: Token,
    },
    #[error("Unexpected end of input, expected {expected}")]
    UnexpectedEndOfFile {
        expected: String,
        location: SourceLocation,
    },
    #[error("{message}")]
    InvalidDeclaration {
        message: String,
        location: SourceLocation,
    },
    #[error("{message}")]
    InvalidExpression {
        message: String,
        location: SourceLocation,
    },
}

impl ParseError {
    pub fn location(&self) -> SourceLocation {
        match self {
            ParseError::UnexpectedToken { found, .. } => found.location,
            ParseError::UnexpectedEndOfFile { location, .. }
            | ParseError::InvalidDeclaration { location, .. }
            | ParseError::InvalidExpression { location, .. } => *location,
        }
    }
}

impl From<ParseError> for CompilerError {
    fn from(err: ParseError) -> Self {
        CompilerError::parse_error(err.to_string(), err.location())
    }
}
