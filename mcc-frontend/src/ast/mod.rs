//! Abstract Syntax Tree definitions
//! 
//! The AST is built by the parser and consumed by the code generator and
//! the optional check pass. Every construct is a closed enum variant with
//! its own payload, so the generator matches exhaustively and node arity is
//! fixed by the types.

pub mod ops;
pub mod expressions;
pub mod statements;

pub use ops::BinaryOp;
pub use expressions::{Expression, ExpressionKind};
pub use statements::{
    Condition, FunctionDefinition, Program, Statement, StatementKind, TopLevelItem,
};
