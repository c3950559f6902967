//! x64cc - Frontend
//! 
//! This crate provides the frontend components of the compiler:
//! - Lexer: tokenizes source text
//! - Parser: builds the AST, resolving names against lexical scopes
//! - AST: abstract syntax tree definitions
//! - Semantic conversion: type annotation, array decay, pointer scaling

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod semantic;
pub mod types;

pub use ast::{BinaryOp, Expr, FunctionDef, PostfixOp, Program, Stmt, VarId, Variable};
pub use lexer::{Lexer, Token, TokenType};
pub use parser::{ParseError, Parser};
pub use semantic::{convert, SemanticError};
pub use types::Type;

use x64cc_common::CompilerError;

/// High-level frontend interface
pub struct Frontend;

impl Frontend {
    /// Tokenize source code
    pub fn tokenize_source(source: &str) -> Result<Vec<Token>, CompilerError> {
        let mut lexer = Lexer::new(source);
        lexer.tokenize()
    }

    /// Parse source code into an untyped AST
    pub fn parse_source(source: &str) -> Result<Program, CompilerError> {
        let tokens = Self::tokenize_source(source)?;
        let mut parser = Parser::new(tokens);
        parser.parse_program()
    }

    /// Parse and convert source code into a fully typed AST
    pub fn analyze_source(source: &str) -> Result<Program, CompilerError> {
        let program = Self::parse_source(source)?;
        convert(program)
    }

    /// Pretty JSON rendering of any frontend structure
    pub fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, CompilerError> {
        serde_json::to_string_pretty(value)
            .map_err(|e| CompilerError::IoError { message: e.to_string() })
    }
}
