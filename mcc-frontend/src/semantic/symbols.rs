//! Function signatures collected before any body is checked

use crate::ast::FunctionDefinition;
use mcc_common::SourceSpan;
use std::collections::HashMap;

/// What a call site needs to know about a function
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSignature {
    pub name: String,
    pub param_count: usize,
    pub span: SourceSpan,
}

impl FunctionSignature {
    pub fn from_definition(func: &FunctionDefinition) -> Self {
        Self {
            name: func.name.clone(),
            param_count: func.params.len(),
            span: func.span.clone(),
        }
    }
}

/// Program-wide function table. The first definition of a name wins.
#[derive(Debug, Default)]
pub struct FunctionTable {
    functions: HashMap<String, FunctionSignature>,
}

impl FunctionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a definition, returning the earlier one if the name is taken
    pub fn declare(&mut self, func: &FunctionDefinition) -> Result<(), FunctionSignature> {
        if let Some(previous) = self.functions.get(&func.name) {
            return Err(previous.clone());
        }
        self.functions
            .insert(func.name.clone(), FunctionSignature::from_definition(func));
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<&FunctionSignature> {
        self.functions.get(name)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}
