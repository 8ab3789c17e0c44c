//! Source location tracking for error reporting
//! 
//! Tokens, AST nodes and diagnostics all carry a span so that syntax errors
//! and check warnings can point back at the program text.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A location in a source file (line and column are 1-based)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub filename: String,
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    /// Create a location with filename
    pub fn new(filename: &str, line: u32, column: u32) -> Self {
        Self {
            filename: filename.to_string(),
            line,
            column,
        }
    }

    /// Location inside anonymous input (stdin or an in-memory string)
    pub fn new_simple(line: u32, column: u32) -> Self {
        Self::new("<input>", line, column)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.filename, self.line, self.column)
    }
}

/// A span in a source file (from start to end location)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpan {
    pub start: SourceLocation,
    pub end: SourceLocation,
}

impl SourceSpan {
    pub fn new(start: SourceLocation, end: SourceLocation) -> Self {
        Self { start, end }
    }
    
    /// Create a span from a single location
    pub fn from_location(location: SourceLocation) -> Self {
        Self {
            end: location.clone(),
            start: location,
        }
    }

    /// Extend this span to include another span
    pub fn extend(&self, other: &SourceSpan) -> SourceSpan {
        if self.start.filename != other.start.filename {
            return self.clone();
        }

        let start = if (self.start.line, self.start.column) <= (other.start.line, other.start.column) {
            self.start.clone()
        } else {
            other.start.clone()
        };

        let end = if (self.end.line, self.end.column) >= (other.end.line, other.end.column) {
            self.end.clone()
        } else {
            other.end.clone()
        };

        SourceSpan::new(start, end)
    }
}

impl fmt::Display for SourceSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start.line == self.end.line {
            if self.start.column == self.end.column {
                write!(f, "{}", self.start)
            } else {
                write!(
                    f,
                    "{}:{}:{}-{}",
                    self.start.filename, self.start.line, self.start.column, self.end.column
                )
            }
        } else {
            write!(
                f,
                "{}:{}:{}-{}:{}",
                self.start.filename, self.start.line, self.start.column, self.end.line, self.end.column
            )
        }
    }
}

/// Line/column cursor the lexer advances character by character
#[derive(Debug, Clone)]
pub struct SourceTracker {
    filename: String,
    line: u32,
    column: u32,
}

impl SourceTracker {
    pub fn new(filename: &str) -> Self {
        Self {
            filename: filename.to_string(),
            line: 1,
            column: 1,
        }
    }
    
    /// Get current location
    pub fn location(&self) -> SourceLocation {
        SourceLocation::new(&self.filename, self.line, self.column)
    }
    
    /// Advance by one character
    pub fn advance(&mut self, ch: char) {
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }
    
    /// Create a span from a start location to current location
    pub fn span_from(&self, start: SourceLocation) -> SourceSpan {
        SourceSpan::new(start, self.location())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_source_location_display() {
        let loc = SourceLocation::new("loop.src", 42, 10);
        assert_eq!(format!("{}", loc), "loop.src:42:10");
        assert_eq!(SourceLocation::new_simple(1, 1).to_string(), "<input>:1:1");
    }

    #[test]
    fn test_source_span_display() {
        let same_line = SourceSpan::new(
            SourceLocation::new("a.src", 1, 5),
            SourceLocation::new("a.src", 1, 10),
        );
        assert_eq!(same_line.to_string(), "a.src:1:5-10");

        let multi_line = SourceSpan::new(
            SourceLocation::new("a.src", 1, 5),
            SourceLocation::new("a.src", 3, 10),
        );
        assert_eq!(multi_line.to_string(), "a.src:1:5-3:10");

        let point = SourceSpan::from_location(SourceLocation::new("a.src", 2, 2));
        assert_eq!(point.to_string(), "a.src:2:2");
    }

    #[test]
    fn test_source_span_extend() {
        let span1 = SourceSpan::new(
            SourceLocation::new_simple(1, 5),
            SourceLocation::new_simple(1, 10),
        );
        let span2 = SourceSpan::new(
            SourceLocation::new_simple(1, 8),
            SourceLocation::new_simple(2, 5),
        );
        
        let extended = span1.extend(&span2);
        assert_eq!(extended.start, SourceLocation::new_simple(1, 5));
        assert_eq!(extended.end, SourceLocation::new_simple(2, 5));
    }

    #[test]
    fn test_source_tracker() {
        let mut tracker = SourceTracker::new("t.src");
        let start_loc = tracker.location();

        for ch in "hi\nt".chars() {
            tracker.advance(ch);
        }
        
        let span = tracker.span_from(start_loc);
        assert_eq!((span.start.line, span.start.column), (1, 1));
        assert_eq!((span.end.line, span.end.column), (2, 2));
    }
}
