//! x64cc - Code Generation Backend
//! 
//! This crate handles the final phase of compilation: lowering the typed AST
//! to x86-64 assembly text. It includes:
//! 
//! - Assembly instruction model
//! - ABI implementation (calling convention, stack frames)
//! - Stack-machine code generator
//! - Text emission

pub mod abi;
pub mod asm;
pub mod emit;
pub mod generator;
pub mod options;

pub use abi::{AbiError, CallingConvention, Frame};
pub use asm::{AsmInst, Operand, Reg};
pub use emit::emit_instructions;
pub use generator::{CodeGenerator, GenError};
pub use options::{CodegenOptions, ObjectFormat};

use x64cc_common::CompilerError;
use x64cc_frontend::{Frontend, Program};

/// Lower a converted program to assembly text
pub fn generate(program: Program, options: &CodegenOptions) -> Result<String, CompilerError> {
    let instructions = CodeGenerator::new(options).generate(program)?;
    Ok(emit_instructions(&instructions))
}

/// Run the whole pipeline: tokenize, parse, convert, generate
pub fn compile(source: &str, options: &CodegenOptions) -> Result<String, CompilerError> {
    let program = Frontend::analyze_source(source)?;
    generate(program, options)
}
