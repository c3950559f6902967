//! Error handling for the x64cc compiler
//!
//! Every stage reports failures through [`CompilerError`]. Errors are fatal:
//! the first one aborts the pipeline and is shown to the user as a single
//! diagnostic line.

use crate::source_loc::SourceLocation;
use thiserror::Error;

/// Main compiler error type that encompasses all phases of compilation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompilerError {
    #[error("Lexical error at {location}: {message}")]
    LexError {
        location: SourceLocation,
        message: String,
    },

    #[error("Parse error at {location}: {message}")]
    ParseError {
        location: SourceLocation,
        message: String,
    },

    /// Name resolution failures (undeclared or redeclared identifiers)
    #[error("Semantic error at {location}: {message}")]
    Semantic {
        location: SourceLocation,
        message: String,
    },

    #[error("Type error at {location}: {message}")]
    TypeError {
        location: SourceLocation,
        message: String,
    },

    /// ABI limits and generator invariant violations
    #[error("Code generation error: {message}")]
    CodegenError { message: String },

    #[error("IO error: {message}")]
    IoError { message: String },
}

impl CompilerError {
    /// Create a lexer error
    pub fn lexer_error(message: impl Into<String>, location: SourceLocation) -> Self {
        CompilerError::LexError { location, message: message.into() }
    }

    /// Create a parse error
    pub fn parse_error(message: impl Into<String>, location: SourceLocation) -> Self {
        CompilerError::ParseError { location, message: message.into() }
    }

    /// Create a semantic (name resolution) error
    pub fn semantic_error(message: impl Into<String>, location: SourceLocation) -> Self {
        CompilerError::Semantic { location, message: message.into() }
    }

    /// Create a type error
    pub fn type_error(message: impl Into<String>, location: SourceLocation) -> Self {
        CompilerError::TypeError { location, message: message.into() }
    }

    /// Create a codegen error
    pub fn codegen_error(message: impl Into<String>) -> Self {
        CompilerError::CodegenError { message: message.into() }
    }

    /// Source location of the fault, when the error has one
    pub fn location(&self) -> Option<SourceLocation> {
        match self {
            CompilerError::LexError { location, .. }
            | CompilerError::ParseError { location, .. }
            | CompilerError::Semantic { location, .. }
            | CompilerError::TypeError { location, .. } => Some(*location),
            CompilerError::CodegenError { .. } | CompilerError::IoError { .. } => None,
        }
    }
}

/// Convert from std::io::Error
impl From<std::io::Error> for CompilerError {
    fn from(err: std::io::Error) -> Self {
        CompilerError::IoError {
            message: err.to_string(),
        }
    }
}
