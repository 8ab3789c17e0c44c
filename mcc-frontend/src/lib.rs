//! MIPS toy compiler - Frontend
//! 
//! This crate turns source text of the toy language into MIPS assembly:
//! - Lexer: characters to tokens, illegal characters reported and skipped
//! - Parser: recursive descent with precedence climbing, builds the AST
//! - AST: programs, functions, statements, expressions
//! - Codegen: stack slots, cyclic temporaries, labels, calling convention
//! - Semantic: optional checks that only warn

pub mod lexer;
pub mod parser;
pub mod ast;
pub mod codegen;
pub mod semantic;

pub use lexer::{Lexer, Token, TokenType};
pub use parser::{Parser, ParseError, MAX_EXPRESSION_DEPTH, MAX_NESTING_DEPTH};
pub use ast::{
    BinaryOp, Condition, Expression, ExpressionKind, FunctionDefinition, Program, Statement,
    StatementKind, TopLevelItem,
};
pub use codegen::CodeGenerator;
pub use semantic::{check_program, SemanticChecker};

use log::debug;
use mcc_codegen::emit_instructions;
use mcc_common::{CompilerError, Diagnostic};

/// Knobs for one compilation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    /// Name used in diagnostic locations
    pub filename: String,
    /// Treat the first lexical diagnostic as a hard error
    pub strict_lexing: bool,
    /// Run the semantic checks and return their warnings
    pub run_checks: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            filename: "<input>".to_string(),
            strict_lexing: false,
            run_checks: false,
        }
    }
}

/// Result of a successful compilation
#[derive(Debug, Clone, PartialEq)]
pub struct Compilation {
    /// Assembly text, instructions joined by newlines
    pub assembly: String,
    /// Lexical diagnostics followed by semantic warnings
    pub diagnostics: Vec<Diagnostic>,
}

/// High-level frontend interface
pub struct Frontend;

impl Frontend {
    /// Tokenize source code, returning the tokens and lexical diagnostics
    pub fn tokenize_source(source: &str, filename: &str) -> (Vec<Token>, Vec<Diagnostic>) {
        let mut lexer = Lexer::with_filename(source, filename);
        let tokens = lexer.tokenize();
        (tokens, lexer.into_diagnostics())
    }

    /// Tokenize under `options`, failing on the first lexical diagnostic
    /// when lexing is strict
    pub fn lex_source(
        source: &str,
        options: &CompileOptions,
    ) -> Result<(Vec<Token>, Vec<Diagnostic>), CompilerError> {
        let (tokens, diagnostics) = Self::tokenize_source(source, &options.filename);
        debug!("{}: {} tokens", options.filename, tokens.len());

        if options.strict_lexing {
            if let Some(first) = diagnostics.first() {
                return Err(CompilerError::lexer_error(
                    first.message.clone(),
                    first.span.start.clone(),
                ));
            }
        }

        Ok((tokens, diagnostics))
    }

    /// Parse source code into an AST, returning the lexical diagnostics too
    pub fn parse_source(
        source: &str,
        options: &CompileOptions,
    ) -> Result<(Program, Vec<Diagnostic>), CompilerError> {
        let (tokens, diagnostics) = Self::lex_source(source, options)?;
        let program = parser::parse(tokens)?;
        debug!("{}: {} top-level items", options.filename, program.items.len());
        Ok((program, diagnostics))
    }

    /// Compile source code to assembly text
    pub fn compile_with_options(
        source: &str,
        options: &CompileOptions,
    ) -> Result<Compilation, CompilerError> {
        let (program, mut diagnostics) = Self::parse_source(source, options)?;

        if options.run_checks {
            diagnostics.extend(check_program(&program));
        }

        let instructions = codegen::generate(&program);
        Ok(Compilation {
            assembly: emit_instructions(&instructions),
            diagnostics,
        })
    }
}

/// Compile source code to assembly text with default options
pub fn compile(source: &str) -> Result<String, CompilerError> {
    Frontend::compile_with_options(source, &CompileOptions::default())
        .map(|compilation| compilation.assembly)
}
