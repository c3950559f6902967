//! Semantic error definitions
//! 
//! Name resolution errors are raised while parsing (scopes exist only
//! then); type errors are raised by the conversion pass.

use crate::types::Type;
use thiserror::Error;
use x64cc_common::{CompilerError, SourceLocation};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SemanticError {
    #[error("Undefined variable '{name}'")]
    UndefinedVariable {
        name: String,
        location: SourceLocation,
    },
    #[error("Redeclaration of '{name}' in the same scope")]
    Redeclaration {
        name: String,
        location: SourceLocation,
    },
    #[error("operand for dereference must be a pointer, found '{found}'")]
    DereferenceNonPointer {
        found: Type,
        location: SourceLocation,
    },
}

impl From<SemanticError> for CompilerError {
    fn from(err: SemanticError) -> Self {
        let message = err.to_string();
        match err {
            SemanticError::UndefinedVariable { location, .. }
            | SemanticError::Redeclaration { location, .. } => {
                CompilerError::semantic_error(message, location)
            }
            SemanticError::DereferenceNonPointer { location, .. } => {
                CompilerError::type_error(message, location)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dereference_error_is_type_error() {
        let err: CompilerError = SemanticError::DereferenceNonPointer {
            found: Type::Int,
            location: SourceLocation::new(2, 4),
        }
        .into();

        assert!(matches!(err, CompilerError::TypeError { .. }));
        assert_eq!(
            err.to_string(),
            "Type error at 2:4: operand for dereference must be a pointer, found 'int'"
        );
    }
}
