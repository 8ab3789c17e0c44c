//! Parse error types
//! 
//! Any syntax error is fatal. The message names the offending token, or
//! EOF when the input ended early.

use crate::lexer::Token;
use mcc_common::{CompilerError, SourceLocation};

/// Parse error types specific to the parser
#[derive(Debug, Clone)]
pub enum ParseError {
    UnexpectedToken {
        expected: String,
        found: Token,
    },
    UnexpectedEndOfFile {
        expected: String,
        location: SourceLocation,
    },
    NestingTooDeep {
        construct: String,
        limit: usize,
        location: SourceLocation,
    },
}

impl From<ParseError> for CompilerError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::UnexpectedToken { expected, found } => {
                CompilerError::parse_error(
                    format!("Syntax error at '{}': expected {}", found.token_type, expected),
                    found.span.start,
                )
            }
            ParseError::UnexpectedEndOfFile { expected, location } => {
                CompilerError::parse_error(
                    format!("Syntax error at EOF: expected {}", expected),
                    location,
                )
            }
            ParseError::NestingTooDeep { construct, limit, location } => {
                CompilerError::parse_error(
                    format!("Nesting too deep in {}: more than {} levels", construct, limit),
                    location,
                )
            }
        }
    }
}
