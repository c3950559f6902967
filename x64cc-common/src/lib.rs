//! x64cc - Common Types and Utilities
//! 
//! This crate contains shared types, error definitions, and utilities
//! used across all stages of the x64cc compiler.

pub mod error;
pub mod labels;
pub mod source_loc;

pub use error::CompilerError;
pub use labels::{LabelGenerator, LabelId};
pub use source_loc::SourceLocation;
