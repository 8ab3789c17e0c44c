//! Recursive Descent Parser
//! 
//! Parses the token stream into a [`Program`] with a single token of
//! lookahead. Arithmetic uses precedence climbing; conditions are the fixed
//! `expr > expr` form of `if`/`while`, so `<` never appears in a valid
//! program even though the lexer produces it.
//! 
//! ```text
//! program      := declaration+
//! declaration  := func_def | statement
//! func_def     := 'function' ID '(' params ')' '{' statement* 'return' expr ';' '}'
//! statement    := assign | if_stmt | if_else_stmt | while_stmt
//! assign       := ID '=' expr ';'
//! if_stmt      := 'if' '(' expr '>' expr ')' '{' statement* '}'
//! if_else_stmt := if_stmt 'else' '{' statement* '}'
//! while_stmt   := 'while' '(' expr '>' expr ')' '{' statement* '}'
//! ```

pub mod errors;
pub mod statements;
pub mod expressions;

use crate::ast::*;
use crate::lexer::{Token, TokenType};
use log::debug;
use mcc_common::{CompilerError, SourceLocation, SourceSpan};
use std::collections::VecDeque;

pub use errors::ParseError;

/// Deepest block, parenthesis group or argument list the parser descends into
pub const MAX_NESTING_DEPTH: usize = 64;

/// Tallest expression tree accepted; later passes walk expressions recursively
pub const MAX_EXPRESSION_DEPTH: usize = 512;

/// Parser over one token stream
pub struct Parser {
    tokens: VecDeque<Token>,
    /// End of the most recently consumed token, for node spans
    last_end: SourceLocation,
    /// Recursive constructs currently open
    depth: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        let last_end = tokens
            .first()
            .map(|t| t.span.start.clone())
            .unwrap_or_else(|| SourceLocation::new_simple(1, 1));

        Self {
            tokens: tokens.into(),
            last_end,
            depth: 0,
        }
    }
    
    /// Peek at current token without consuming
    pub(crate) fn peek(&self) -> Option<&Token> {
        self.tokens.front()
    }

    /// Get current token and advance
    pub(crate) fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.pop_front()?;
        self.last_end = token.span.end.clone();
        Some(token)
    }
    
    /// Check if current token matches expected type (payload ignored)
    pub(crate) fn check(&self, token_type: &TokenType) -> bool {
        match self.peek() {
            Some(token) => std::mem::discriminant(&token.token_type) == std::mem::discriminant(token_type),
            None => matches!(token_type, TokenType::EndOfFile),
        }
    }
    
    /// Check if current token is an identifier
    pub(crate) fn check_identifier(&self) -> bool {
        matches!(self.peek().map(|t| &t.token_type), Some(TokenType::Identifier(_)))
    }
    
    /// Consume token if it matches expected type
    pub(crate) fn match_token(&mut self, token_type: &TokenType) -> bool {
        if self.check(token_type) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Error describing the current token as unexpected
    pub(crate) fn error_here(&self, expected: impl Into<String>) -> ParseError {
        let expected = expected.into();
        match self.peek() {
            Some(token) if token.token_type != TokenType::EndOfFile => ParseError::UnexpectedToken {
                expected,
                found: token.clone(),
            },
            Some(token) => ParseError::UnexpectedEndOfFile {
                expected,
                location: token.span.start.clone(),
            },
            None => ParseError::UnexpectedEndOfFile {
                expected,
                location: self.last_end.clone(),
            },
        }
    }
    
    /// Expect and consume a specific token type
    pub(crate) fn expect(&mut self, token_type: TokenType, context: &str) -> Result<Token, ParseError> {
        if self.check(&token_type) && token_type != TokenType::EndOfFile {
            if let Some(token) = self.advance() {
                return Ok(token);
            }
        }
        Err(self.error_here(format!("'{}' in {}", token_type, context)))
    }

    /// Expect and consume an identifier, returning its name
    pub(crate) fn expect_identifier(&mut self, context: &str) -> Result<String, ParseError> {
        if self.check_identifier() {
            if let Some(Token { token_type: TokenType::Identifier(name), .. }) = self.advance() {
                return Ok(name);
            }
        }
        Err(self.error_here(format!("identifier in {}", context)))
    }
    
    /// Open one recursive construct, failing past [`MAX_NESTING_DEPTH`]
    pub(crate) fn enter_nested(&mut self, construct: &str) -> Result<(), ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::NestingTooDeep {
                construct: construct.to_string(),
                limit: MAX_NESTING_DEPTH,
                location: self.current_location(),
            });
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn exit_nested(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Location where the next node starts
    pub(crate) fn current_location(&self) -> SourceLocation {
        match self.peek() {
            Some(token) => token.span.start.clone(),
            None => self.last_end.clone(),
        }
    }

    /// Span from `start` to the end of the last consumed token
    pub(crate) fn span_from(&self, start: SourceLocation) -> SourceSpan {
        SourceSpan::new(start, self.last_end.clone())
    }
    
    /// Parse a complete program
    pub fn parse_program(&mut self) -> Result<Program, CompilerError> {
        let start = self.current_location();
        let mut items = Vec::new();

        loop {
            items.push(self.parse_top_level_item()?);
            if self.check(&TokenType::EndOfFile) {
                break;
            }
        }

        debug!("parsed {} top-level items", items.len());
        Ok(Program {
            items,
            span: self.span_from(start),
        })
    }

    /// declaration := func_def | statement
    fn parse_top_level_item(&mut self) -> Result<TopLevelItem, ParseError> {
        if self.check(&TokenType::Function) {
            Ok(TopLevelItem::Function(self.parse_function_definition()?))
        } else if self.starts_statement() {
            Ok(TopLevelItem::Statement(self.parse_statement()?))
        } else {
            Err(self.error_here("function definition or statement"))
        }
    }
}

/// Parse a token stream into a program
pub fn parse(tokens: Vec<Token>) -> Result<Program, CompilerError> {
    Parser::new(tokens).parse_program()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use pretty_assertions::assert_eq;

    fn parse_str(input: &str) -> Result<Program, CompilerError> {
        parse(tokenize(input))
    }

    fn parse_error_message(input: &str) -> String {
        match parse_str(input) {
            Err(CompilerError::ParseError { message, .. }) => message,
            other => panic!("Expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_assignment_program() {
        let program = parse_str("x = 3 + 4;").unwrap();
        assert_eq!(program.items.len(), 1);

        match &program.items[0] {
            TopLevelItem::Statement(Statement { kind: StatementKind::Assign { target, value }, .. }) => {
                assert_eq!(target, "x");
                assert!(matches!(value.kind, ExpressionKind::Binary { op: BinaryOp::Add, .. }));
            }
            other => panic!("Expected assignment, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_mixed_items_keep_source_order() {
        let program = parse_str("a = 1; function f() { return 2; } b = f();").unwrap();

        assert_eq!(program.items.len(), 3);
        assert!(matches!(program.items[0], TopLevelItem::Statement(_)));
        assert!(matches!(program.items[1], TopLevelItem::Function(_)));
        assert!(matches!(program.items[2], TopLevelItem::Statement(_)));
        assert_eq!(program.functions().count(), 1);
        assert_eq!(program.statements().count(), 2);
    }

    #[test]
    fn test_empty_program_is_rejected() {
        assert_eq!(
            parse_error_message(""),
            "Syntax error at EOF: expected function definition or statement"
        );
    }

    #[test]
    fn test_missing_semicolon_names_token() {
        let err = parse_str("x = 1 y = 2;").unwrap_err();
        match err {
            CompilerError::ParseError { location, message } => {
                assert_eq!(message, "Syntax error at 'y': expected ';' in assignment");
                assert_eq!((location.line, location.column), (1, 7));
            }
            other => panic!("Expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_truncated_input_reports_eof() {
        assert_eq!(
            parse_error_message("while (a > b) { a = a - 1;"),
            "Syntax error at EOF: expected '}' in block"
        );
    }

    #[test]
    fn test_stray_token_at_top_level() {
        assert_eq!(
            parse_error_message("x = 1; }"),
            "Syntax error at '}': expected function definition or statement"
        );
    }

    #[test]
    fn test_program_span() {
        let program = parse_str("x = 1;\ny = 2;").unwrap();
        assert_eq!((program.span.start.line, program.span.start.column), (1, 1));
        assert_eq!((program.span.end.line, program.span.end.column), (2, 7));
    }
}
