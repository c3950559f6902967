//! Abstract Syntax Tree definitions
//! 
//! The AST is built by the parser with every `ty` slot unset, annotated and
//! rewritten by the conversion pass, then consumed by the code generator.

pub mod ops;
pub mod expressions;
pub mod statements;

// Re-export commonly used types at module level
pub use ops::{BinaryOp, PostfixOp};
pub use expressions::Expr;
pub use statements::{FunctionDef, Program, Stmt, VarId, Variable};
