//! x86-64 Instruction Definitions
//! 
//! The subset of the instruction set the stack-machine lowering needs,
//! printed in Intel syntax (`.intel_syntax noprefix`).

use std::fmt;

/// General purpose registers used by the generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reg {
    Rax, Rcx, Rdx, Rsi, Rdi, Rbp, Rsp,
    R8, R9,
}

/// Register view width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Width {
    Byte,
    Dword,
    Qword,
}

impl Width {
    /// Width of a value of `size` bytes, if a register view exists for it
    pub fn from_size(size: u64) -> Option<Width> {
        match size {
            1 => Some(Width::Byte),
            4 => Some(Width::Dword),
            8 => Some(Width::Qword),
            _ => None,
        }
    }
}

const REGS64: [&str; 9] = ["rax", "rcx", "rdx", "rsi", "rdi", "rbp", "rsp", "r8", "r9"];
const REGS32: [&str; 9] = ["eax", "ecx", "edx", "esi", "edi", "ebp", "esp", "r8d", "r9d"];
const REGS8: [&str; 9] = ["al", "cl", "dl", "sil", "dil", "bpl", "spl", "r8b", "r9b"];

impl Reg {
    fn index(self) -> usize {
        match self {
            Reg::Rax => 0,
            Reg::Rcx => 1,
            Reg::Rdx => 2,
            Reg::Rsi => 3,
            Reg::Rdi => 4,
            Reg::Rbp => 5,
            Reg::Rsp => 6,
            Reg::R8 => 7,
            Reg::R9 => 8,
        }
    }

    /// Name of the register view of the given width
    pub fn name(self, width: Width) -> &'static str {
        let table = match width {
            Width::Byte => &REGS8,
            Width::Dword => &REGS32,
            Width::Qword => &REGS64,
        };
        table[self.index()]
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name(Width::Qword))
    }
}

/// Instruction operand
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Reg(Reg),
    /// Narrow view of a register, e.g. `al`
    Sized(Reg, Width),
    Imm(i64),
    /// `[base+disp]`
    Mem { base: Reg, disp: i64 },
}

impl Operand {
    pub fn mem(base: Reg) -> Operand {
        Operand::Mem { base, disp: 0 }
    }

    /// Frame slot `offset` bytes below the frame base
    pub fn frame_slot(offset: u64) -> Operand {
        Operand::Mem { base: Reg::Rbp, disp: -(offset as i64) }
    }
}

impl From<Reg> for Operand {
    fn from(reg: Reg) -> Self {
        Operand::Reg(reg)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Reg(reg) => write!(f, "{}", reg),
            Operand::Sized(reg, width) => write!(f, "{}", reg.name(*width)),
            Operand::Imm(value) => write!(f, "{}", value),
            Operand::Mem { base, disp: 0 } => write!(f, "[{}]", base),
            Operand::Mem { base, disp } if *disp < 0 => write!(f, "[{}-{}]", base, disp.unsigned_abs()),
            Operand::Mem { base, disp } => write!(f, "[{}+{}]", base, disp),
        }
    }
}

/// Condition codes (signed comparisons)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cond {
    E, Ne, L, G, Le, Ge,
}

impl fmt::Display for Cond {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = match self {
            Cond::E => "e",
            Cond::Ne => "ne",
            Cond::L => "l",
            Cond::G => "g",
            Cond::Le => "le",
            Cond::Ge => "ge",
        };
        write!(f, "{}", suffix)
    }
}

/// x86-64 Assembly Instructions
#[derive(Debug, Clone, PartialEq)]
pub enum AsmInst {
    // Data movement
    Mov(Operand, Operand),        // dst = src
    Lea(Reg, Operand),            // dst = &mem
    Push(Operand),
    Pop(Reg),

    // Arithmetic
    Add(Operand, Operand),        // dst += src
    Sub(Operand, Operand),        // dst -= src
    Imul(Reg, Reg),               // dst *= src
    Cqo,                          // sign-extend rax into rdx:rax
    Idiv(Reg),                    // rax = rdx:rax / src, rdx = remainder

    // Logical
    And(Reg, Reg),
    Or(Reg, Reg),
    Xor(Reg, Reg),
    Shl(Reg),                     // dst <<= cl
    Sar(Reg),                     // dst >>= cl (arithmetic)

    // Control flow
    Cmp(Operand, Operand),
    Jmp(String),
    Jcc(Cond, String),
    Call(String),
    Ret,

    // Assembly pseudo-instructions
    Directive(String),
    Label(String),
}

impl AsmInst {
    /// Labels and directives start at column zero
    pub fn is_unindented(&self) -> bool {
        matches!(self, AsmInst::Label(_) | AsmInst::Directive(_))
    }
}

impl fmt::Display for AsmInst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AsmInst::Mov(dst, src) => write!(f, "mov {}, {}", dst, src),
            AsmInst::Lea(dst, mem) => write!(f, "lea {}, {}", dst, mem),
            AsmInst::Push(src) => write!(f, "push {}", src),
            AsmInst::Pop(dst) => write!(f, "pop {}", dst),

            AsmInst::Add(dst, src) => write!(f, "add {}, {}", dst, src),
            AsmInst::Sub(dst, src) => write!(f, "sub {}, {}", dst, src),
            AsmInst::Imul(dst, src) => write!(f, "imul {}, {}", dst, src),
            AsmInst::Cqo => write!(f, "cqo"),
            AsmInst::Idiv(src) => write!(f, "idiv {}", src),

            AsmInst::And(dst, src) => write!(f, "and {}, {}", dst, src),
            AsmInst::Or(dst, src) => write!(f, "or {}, {}", dst, src),
            AsmInst::Xor(dst, src) => write!(f, "xor {}, {}", dst, src),
            AsmInst::Shl(dst) => write!(f, "shl {}, cl", dst),
            AsmInst::Sar(dst) => write!(f, "sar {}, cl", dst),

            AsmInst::Cmp(a, b) => write!(f, "cmp {}, {}", a, b),
            AsmInst::Jmp(label) => write!(f, "jmp {}", label),
            AsmInst::Jcc(cond, label) => write!(f, "j{} {}", cond, label),
            AsmInst::Call(label) => write!(f, "call {}", label),
            AsmInst::Ret => write!(f, "ret"),

            AsmInst::Directive(text) => write!(f, "{}", text),
            AsmInst::Label(label) => write!(f, "{}:", label),
        }
    }
}
