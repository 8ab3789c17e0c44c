//! Statement and top-level AST nodes

use super::expressions::Expression;
use mcc_common::SourceSpan;
use serde::{Deserialize, Serialize};

/// `left > right`, the only condition form `if` and `while` accept
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub left: Expression,
    pub right: Expression,
}

/// Statement node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub kind: StatementKind,
    pub span: SourceSpan,
}

/// Statement kinds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StatementKind {
    Assign {
        target: String,
        value: Expression,
    },
    If {
        condition: Condition,
        then_body: Vec<Statement>,
    },
    IfElse {
        condition: Condition,
        then_body: Vec<Statement>,
        else_body: Vec<Statement>,
    },
    While {
        condition: Condition,
        body: Vec<Statement>,
    },
}

impl Statement {
    pub fn new(kind: StatementKind, span: SourceSpan) -> Self {
        Self { kind, span }
    }
}

/// `function name(params) { body return return_expr; }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDefinition {
    pub name: String,
    pub params: Vec<String>,
    pub body: Vec<Statement>,
    pub return_expr: Expression,
    pub span: SourceSpan,
}

/// Top-level items in a program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TopLevelItem {
    Function(FunctionDefinition),
    Statement(Statement),
}

/// A whole program, items in source order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub items: Vec<TopLevelItem>,
    pub span: SourceSpan,
}

impl Program {
    pub fn functions(&self) -> impl Iterator<Item = &FunctionDefinition> + '_ {
        self.items.iter().filter_map(|item| match item {
            TopLevelItem::Function(func) => Some(func),
            TopLevelItem::Statement(_) => None,
        })
    }

    /// Top-level statements, which together form `main`
    pub fn statements(&self) -> impl Iterator<Item = &Statement> + '_ {
        self.items.iter().filter_map(|item| match item {
            TopLevelItem::Statement(stmt) => Some(stmt),
            TopLevelItem::Function(_) => None,
        })
    }
}
