//! Lexer
//! 
//! Turns source text into a token stream terminated by `EndOfFile`.
//! Lexing never aborts: an unrecognised character is reported as a
//! diagnostic, exactly that one character is skipped and scanning resumes.

pub mod token;

pub use token::{Token, TokenType};

use log::{debug, warn};
use mcc_common::{Diagnostic, ErrorReporter, SourceLocation, SourceSpan, SourceTracker};

/// Lexer over one source text
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    tracker: SourceTracker,
    reporter: ErrorReporter,
}

impl Lexer {
    /// Create a lexer for anonymous input
    pub fn new(input: &str) -> Self {
        Self::with_filename(input, "<input>")
    }

    /// Create a lexer whose locations name `filename`
    pub fn with_filename(input: &str, filename: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            tracker: SourceTracker::new(filename),
            reporter: ErrorReporter::new(),
        }
    }
    
    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }
    
    fn advance(&mut self) -> Option<char> {
        let ch = self.current_char()?;
        self.position += 1;
        self.tracker.advance(ch);
        Some(ch)
    }
    
    fn current_location(&self) -> SourceLocation {
        self.tracker.location()
    }
    
    /// Skip blanks: space, tab and newline only
    fn skip_whitespace(&mut self) {
        while matches!(self.current_char(), Some(' ' | '\t' | '\n')) {
            self.advance();
        }
    }

    /// Consume characters while `pred` holds and return them
    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let mut text = String::new();
        while let Some(ch) = self.current_char() {
            if !pred(ch) {
                break;
            }
            text.push(ch);
            self.advance();
        }
        text
    }

    fn report(&mut self, message: String, span: SourceSpan) {
        warn!("{}: {}", span.start, message);
        self.reporter.error(message, span);
    }
    
    /// Get next token, skipping (and reporting) anything unrecognised
    pub fn next_token(&mut self) -> Token {
        loop {
            self.skip_whitespace();
            let start = self.current_location();

            let token_type = match self.current_char() {
                None => return Token::eof(start),

                Some(ch) if ch.is_ascii_alphabetic() || ch == '_' => {
                    let text = self.take_while(|c| c.is_ascii_alphanumeric() || c == '_');
                    TokenType::keyword(&text).unwrap_or(TokenType::Identifier(text))
                }

                Some(ch) if ch.is_ascii_digit() => {
                    let digits = self.take_while(|c| c.is_ascii_digit());
                    match digits.parse::<i64>() {
                        Ok(value) => TokenType::IntLiteral(value),
                        Err(err) => {
                            let span = self.tracker.span_from(start);
                            self.report(format!("Integer literal '{digits}' out of range: {err}"), span);
                            continue;
                        }
                    }
                }

                Some(ch) => match TokenType::punctuator(ch) {
                    Some(token_type) => {
                        self.advance();
                        token_type
                    }
                    None => {
                        self.advance();
                        let span = self.tracker.span_from(start);
                        self.report(format!("Illegal character '{}'", ch.escape_default()), span);
                        continue;
                    }
                },
            };

            return Token::new(token_type, self.tracker.span_from(start));
        }
    }
    
    /// Tokenize the entire input; the last token is always `EndOfFile`
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        
        loop {
            let token = self.next_token();
            let is_eof = token.token_type == TokenType::EndOfFile;
            tokens.push(token);
            
            if is_eof {
                break;
            }
        }

        debug!(
            "lexed {} tokens ({})",
            tokens.len(),
            self.reporter.summary()
        );
        tokens
    }

    /// Lex diagnostics reported so far
    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.reporter.diagnostics()
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.reporter.into_diagnostics()
    }
}

/// Tokenize `source`; skipped characters are only logged
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).tokenize()
}
