//! Semantic conversion
//! 
//! Annotates every expression with its type and inserts the implicit nodes
//! the code generator relies on: array-to-pointer decay and the scaling of
//! integer operands in pointer arithmetic.

pub mod conversion;
pub mod errors;

pub use conversion::convert;
pub use errors::SemanticError;
