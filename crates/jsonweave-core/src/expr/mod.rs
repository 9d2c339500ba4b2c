//! Expression collaborator: compile and evaluate `=> expression` suffixes
//!
//! A placeholder such as `$.price => $ * 1.2` resolves the query first, then
//! evaluates the expression once per match with these bindings:
//!
//! - `$`: the matched value
//! - `$$`: the root value of the render
//! - `$keys`: the matched path `["$", step, ...]`, indexable from either end
//! - `Object`, `Array`, `Math`: read-only helper namespaces
//!
//! [`ScriptEngine`] implements a small JavaScript-flavoured language over
//! JSON values. Other engines plug in through [`ExpressionEngine`].

mod ast;
mod builtins;
mod eval;
mod lexer;
mod parser;

pub use ast::{BinaryOp, Expr, UnaryOp};

use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpressionError {
    #[error("EXPRESSION_MALFORMED: {message} at offset {offset} in {input:?}")]
    Malformed {
        input: String,
        offset: usize,
        message: String,
    },

    #[error("EXPRESSION_FAILED: {0}")]
    Evaluation(String),
}

impl ExpressionError {
    pub(crate) fn malformed(input: &str, offset: usize, message: impl Into<String>) -> Self {
        ExpressionError::Malformed {
            input: input.to_string(),
            offset,
            message: message.into(),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ExpressionError::Malformed { .. } => "EXPRESSION_MALFORMED",
            ExpressionError::Evaluation(_) => "EXPRESSION_FAILED",
        }
    }
}

/// Values visible to an expression while it evaluates one match
#[derive(Debug, Clone, Copy)]
pub struct Bindings<'a> {
    pub current: &'a Value,
    pub root: &'a Value,
    pub keys: Option<&'a Value>,
}

/// Compiles expression text once and evaluates it many times
pub trait ExpressionEngine: Send + Sync {
    type Program: Send + Sync;

    fn compile(&self, source: &str) -> Result<Self::Program, ExpressionError>;

    fn evaluate(
        &self,
        program: &Self::Program,
        bindings: &Bindings<'_>,
    ) -> Result<Value, ExpressionError>;
}

/// Default expression engine
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptEngine;

impl ExpressionEngine for ScriptEngine {
    type Program = Expr;

    fn compile(&self, source: &str) -> Result<Expr, ExpressionError> {
        tracing::trace!(source, "compiling expression");
        parser::parse(source)
    }

    fn evaluate(&self, program: &Expr, bindings: &Bindings<'_>) -> Result<Value, ExpressionError> {
        eval::Evaluator::new(bindings).eval(program)
    }
}
