//! MIPS Toy Compiler Driver
//! 
//! Reads a source file (or stdin), compiles it and writes the assembly to
//! `saida.txt` unless told otherwise.

use clap::Parser;
use log::info;
use mcc_common::{CompilerError, Diagnostic};
use mcc_frontend::{CompileOptions, Frontend};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "mcc")]
#[command(about = "MIPS Toy Compiler")]
#[command(version = "0.1.0")]
struct Cli {
    /// Source file; read from stdin when omitted
    input: Option<PathBuf>,

    /// Output assembly file
    #[arg(short, long, default_value = "saida.txt")]
    output: PathBuf,

    /// Write the assembly to stdout instead of the output file
    #[arg(long)]
    stdout: bool,

    /// Run the semantic checks and print their warnings
    #[arg(long)]
    check: bool,

    /// Fail on the first illegal character instead of skipping it
    #[arg(long)]
    strict: bool,

    /// Print the token stream as JSON and exit
    #[arg(long)]
    print_tokens: bool,

    /// Print the AST as JSON and exit
    #[arg(long)]
    print_ast: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let source = read_source(cli.input.as_deref())?;
    let filename = cli
        .input
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "<stdin>".to_string());

    let options = CompileOptions {
        filename,
        strict_lexing: cli.strict,
        run_checks: cli.check,
    };

    if cli.print_tokens {
        let (tokens, diagnostics) = Frontend::lex_source(&source, &options)?;
        print_diagnostics(&diagnostics);
        println!("{}", serde_json::to_string_pretty(&tokens)?);
        return Ok(());
    }

    if cli.print_ast {
        let (program, diagnostics) = Frontend::parse_source(&source, &options)?;
        print_diagnostics(&diagnostics);
        println!("{}", serde_json::to_string_pretty(&program)?);
        return Ok(());
    }

    let compilation = Frontend::compile_with_options(&source, &options)?;
    print_diagnostics(&compilation.diagnostics);

    if cli.stdout {
        println!("{}", compilation.assembly);
    } else {
        fs::write(&cli.output, &compilation.assembly)?;
        info!("{} bytes of assembly", compilation.assembly.len());
        println!("Assembly written to {}", cli.output.display());
    }

    Ok(())
}

fn read_source(input: Option<&Path>) -> Result<String, CompilerError> {
    match input {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            Ok(source)
        }
    }
}

fn print_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        eprintln!("{}", diagnostic);
    }
}
