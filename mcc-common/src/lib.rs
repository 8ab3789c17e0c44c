//! MIPS Toy Compiler - Common Types and Utilities
//! 
//! Source locations, the compiler error type and the diagnostic reporter
//! shared by the frontend, the code generator and the driver.

pub mod error;
pub mod source_loc;

pub use error::{CompilerError, Diagnostic, ErrorReporter, Severity};
pub use source_loc::{SourceLocation, SourceSpan, SourceTracker};
