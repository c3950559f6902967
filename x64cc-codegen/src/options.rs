//! Target configuration

/// Object file format the assembly is meant for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectFormat {
    Elf,
    MachO,
}

/// Knobs that depend on the target platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodegenOptions {
    pub format: ObjectFormat,
}

impl CodegenOptions {
    /// Options matching the platform the compiler runs on
    pub fn for_host() -> Self {
        if cfg!(target_os = "macos") {
            Self::mach_o()
        } else {
            Self::elf()
        }
    }

    pub fn elf() -> Self {
        Self { format: ObjectFormat::Elf }
    }

    pub fn mach_o() -> Self {
        Self { format: ObjectFormat::MachO }
    }

    /// Prepended to every function symbol
    pub fn symbol_prefix(&self) -> &'static str {
        match self.format {
            ObjectFormat::Elf => "",
            ObjectFormat::MachO => "_",
        }
    }

    /// Assembly-level name of a function
    pub fn symbol(&self, name: &str) -> String {
        format!("{}{}", self.symbol_prefix(), name)
    }

    /// Operand of a `call` to `name`
    ///
    /// ELF calls go through `@PLT` so that a function named like a register
    /// (`rax`, `rdi`) is still a direct call in Intel syntax.
    pub fn call_target(&self, name: &str) -> String {
        match self.format {
            ObjectFormat::Elf => format!("{}@PLT", name),
            ObjectFormat::MachO => self.symbol(name),
        }
    }

    /// Whether to mark the stack non-executable with a `.note.GNU-stack` section
    pub fn needs_stack_note(&self) -> bool {
        self.format == ObjectFormat::Elf
    }
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self::for_host()
    }
}
