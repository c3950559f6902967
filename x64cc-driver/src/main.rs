//! x64cc compiler driver
//!
//! Reads one translation unit (a file or inline text), runs the whole
//! pipeline and prints the assembly. Diagnostics and logs go to stderr only.

use clap::{ArgAction, ArgGroup, Parser};
use log::{debug, LevelFilter};
use std::fs;
use std::path::PathBuf;
use x64cc_codegen::{generate, CodegenOptions};
use x64cc_common::CompilerError;
use x64cc_frontend::Frontend;

#[derive(Parser, Debug)]
#[command(name = "x64cc", version, about = "Compile a small C subset to x86-64 assembly")]
#[command(group(ArgGroup::new("source").required(true).args(["file", "path", "inline"])))]
struct Cli {
    /// Source file to compile
    file: Option<PathBuf>,

    /// Source file to compile (explicit form)
    #[arg(short = 'f', value_name = "PATH")]
    path: Option<PathBuf>,

    /// Compile inline source text
    #[arg(short = 'e', value_name = "SOURCE")]
    inline: Option<String>,

    /// Write the output to a file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Print the token stream as JSON
    #[arg(long, conflicts_with = "dump_ast")]
    dump_tokens: bool,

    /// Print the converted AST as JSON
    #[arg(long)]
    dump_ast: bool,

    /// Log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn read_source(&self) -> Result<String, CompilerError> {
        if let Some(text) = &self.inline {
            return Ok(text.clone());
        }
        let path = self
            .file
            .as_ref()
            .or(self.path.as_ref())
            .ok_or_else(|| CompilerError::IoError { message: "no source given".to_string() })?;

        debug!("reading {}", path.display());
        fs::read_to_string(path).map_err(|e| CompilerError::IoError {
            message: format!("cannot read '{}': {}", path.display(), e),
        })
    }

    /// Build the complete output text in memory
    fn render(&self, source: &str) -> Result<String, CompilerError> {
        if self.dump_tokens {
            let tokens = Frontend::tokenize_source(source)?;
            return Ok(Frontend::to_json(&tokens)? + "\n");
        }

        let program = Frontend::analyze_source(source)?;
        if self.dump_ast {
            return Ok(Frontend::to_json(&program)? + "\n");
        }
        generate(program, &CodegenOptions::for_host())
    }

    fn run(&self) -> Result<(), CompilerError> {
        let source = self.read_source()?;
        let text = self.render(&source)?;

        match &self.output {
            Some(path) => fs::write(path, text).map_err(|e| CompilerError::IoError {
                message: format!("cannot write '{}': {}", path.display(), e),
            }),
            None => {
                print!("{}", text);
                Ok(())
            }
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // RUST_LOG takes precedence over the flag
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = cli.run() {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("x64cc").chain(args.iter().copied()))
    }

    #[test]
    fn test_exactly_one_source() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["-e", "{ return 0; }", "prog.c"]).is_err());
        assert!(parse(&["-f", "a.c", "b.c"]).is_err());
        assert!(parse(&["-e", "{ return 0; }"]).is_ok());
        assert!(parse(&["-f", "a.c"]).is_ok());
        assert!(parse(&["a.c"]).is_ok());
    }

    #[test]
    fn test_dump_flags_conflict() {
        assert!(parse(&["-e", "1;", "--dump-tokens", "--dump-ast"]).is_err());
    }

    #[test]
    fn test_verbosity_counts() {
        let cli = parse(&["-vv", "-e", "1;"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_inline_source_compiles() {
        let cli = parse(&["-e", "{ int a; a = 3; return a; }"]).unwrap();
        let source = cli.read_source().unwrap();
        let asm = cli.render(&source).unwrap();

        assert!(asm.starts_with(".intel_syntax noprefix\n"));
        assert!(asm.contains("ret\n"));
    }

    #[test]
    fn test_dump_tokens_is_json() {
        let cli = parse(&["--dump-tokens", "-e", "return 1;"]).unwrap();
        let json = cli.render("return 1;").unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(4));
    }

    #[test]
    fn test_dump_ast_is_json() {
        let cli = parse(&["--dump-ast", "-e", "{ return 2; }"]).unwrap();
        let json = cli.render("{ return 2; }").unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value.get("functions").is_some(), "{json}");
    }

    #[test]
    fn test_errors_surface_as_single_diagnostic() {
        let cli = parse(&["-e", "{ return x; }"]).unwrap();
        let err = cli.render("{ return x; }").unwrap_err();
        assert_eq!(err.to_string().lines().count(), 1);
        assert!(err.to_string().contains("Undefined variable 'x'"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let cli = parse(&["/nonexistent/x64cc/input.c"]).unwrap();
        assert!(matches!(cli.read_source(), Err(CompilerError::IoError { .. })));
    }
}
