//! System V x86-64 ABI
//! 
//! This module implements the calling convention subset the compiler uses
//! (integer arguments in registers only), stack frame layout, and function
//! prologue/epilogue generation.

use crate::asm::{AsmInst, Operand, Reg};
use log::trace;
use thiserror::Error;
use x64cc_common::CompilerError;
use x64cc_frontend::types::{align_to, WORD_SIZE};
use x64cc_frontend::Variable;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AbiError {
    #[error("Too many arguments: {0} (maximum: {1})")]
    TooManyArguments(usize, usize),

    #[error("Too many parameters: {0} (maximum: {1})")]
    TooManyParameters(usize, usize),

    #[error("Stack frame too large: '{0}' does not fit in {1} bytes")]
    FrameTooLarge(String, u64),
}

impl From<AbiError> for CompilerError {
    fn from(err: AbiError) -> Self {
        CompilerError::codegen_error(err.to_string())
    }
}

/// Register usage:
/// - RDI, RSI, RDX, RCX, R8, R9: integer arguments, in order
/// - RAX: return value; AL holds the vector-register count for variadic calls
/// - RBP: frame base, RSP: stack pointer
pub struct CallingConvention;

impl CallingConvention {
    /// Maximum number of arguments passed in registers
    pub const MAX_REG_ARGS: usize = 6;

    /// Registers used for passing arguments
    pub const ARG_REGS: [Reg; 6] = [Reg::Rdi, Reg::Rsi, Reg::Rdx, Reg::Rcx, Reg::R8, Reg::R9];

    pub const RETURN_REG: Reg = Reg::Rax;
    pub const FRAME_PTR: Reg = Reg::Rbp;
    pub const STACK_PTR: Reg = Reg::Rsp;

    /// Stack alignment required at a call instruction
    pub const STACK_ALIGN: u64 = 16;

    /// Largest frame whose size and slot offsets fit a signed 32-bit
    /// immediate or displacement
    pub const MAX_FRAME_SIZE: u64 = i32::MAX as u64 & !(Self::STACK_ALIGN - 1);

    /// Get the register for an argument index (0-based)
    pub fn arg_reg(index: usize) -> Result<Reg, AbiError> {
        Self::ARG_REGS
            .get(index)
            .copied()
            .ok_or(AbiError::TooManyArguments(index + 1, Self::MAX_REG_ARGS))
    }

    pub fn check_arguments(count: usize) -> Result<(), AbiError> {
        if count > Self::MAX_REG_ARGS {
            return Err(AbiError::TooManyArguments(count, Self::MAX_REG_ARGS));
        }
        Ok(())
    }

    pub fn check_parameters(count: usize) -> Result<(), AbiError> {
        if count > Self::MAX_REG_ARGS {
            return Err(AbiError::TooManyParameters(count, Self::MAX_REG_ARGS));
        }
        Ok(())
    }
}

/// Stack Frame Layout
/// 
/// Locals live below the saved frame pointer, each addressed as
/// `[rbp-offset]`. The frame grows downward:
/// 1. Return address (pushed by `call`)
/// 2. Saved frame pointer (RBP points here)
/// 3. Local variables and parameter slots, in declaration order
/// 4. Padding up to a 16-byte boundary
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Bytes reserved below RBP (multiple of 16)
    pub size: u64,
}

impl Frame {
    /// Assign a frame offset to every variable and compute the frame size
    ///
    /// Each variable's offset is the running total after adding its own slot,
    /// rounded up to its alignment. Indirect variables only hold a pointer.
    /// Fails once the frame would exceed [`CallingConvention::MAX_FRAME_SIZE`].
    pub fn layout(locals: &mut [Variable]) -> Result<Frame, AbiError> {
        let limit = CallingConvention::MAX_FRAME_SIZE;
        let mut offset: u64 = 0;

        for var in locals.iter_mut() {
            let (size, align) = if var.indirect {
                (WORD_SIZE, WORD_SIZE)
            } else {
                (var.ty.size().max(1), var.ty.align())
            };
            offset = offset
                .checked_add(size)
                .map(|end| align_to(end, align))
                .filter(|&end| end <= limit)
                .ok_or_else(|| AbiError::FrameTooLarge(var.name.clone(), limit))?;
            var.offset = Some(offset);
            trace!("slot '{}': {} bytes at rbp-{}", var.name, size, offset);
        }

        // `limit` is itself a multiple of the alignment
        Ok(Frame {
            size: align_to(offset, CallingConvention::STACK_ALIGN),
        })
    }

    /// Generate function prologue
    ///
    /// The prologue:
    /// 1. Saves the old frame pointer
    /// 2. Sets up the new frame pointer
    /// 3. Allocates space for locals
    /// 4. Spills each incoming argument register into its slot
    pub fn gen_prologue(&self, param_offsets: &[u64]) -> Result<Vec<AsmInst>, AbiError> {
        CallingConvention::check_parameters(param_offsets.len())?;

        let mut code = vec![
            AsmInst::Push(CallingConvention::FRAME_PTR.into()),
            AsmInst::Mov(
                CallingConvention::FRAME_PTR.into(),
                CallingConvention::STACK_PTR.into(),
            ),
            AsmInst::Sub(CallingConvention::STACK_PTR.into(), Operand::Imm(self.size as i64)),
        ];

        for (i, &offset) in param_offsets.iter().enumerate() {
            let reg = CallingConvention::arg_reg(i)?;
            code.push(AsmInst::Mov(Operand::frame_slot(offset), reg.into()));
        }

        Ok(code)
    }

    /// Generate function epilogue
    ///
    /// The epilogue:
    /// 1. Deallocates the frame
    /// 2. Restores old frame pointer
    /// 3. Returns to caller
    pub fn gen_epilogue(&self) -> Vec<AsmInst> {
        vec![
            AsmInst::Mov(
                CallingConvention::STACK_PTR.into(),
                CallingConvention::FRAME_PTR.into(),
            ),
            AsmInst::Pop(CallingConvention::FRAME_PTR),
            AsmInst::Ret,
        ]
    }
}
