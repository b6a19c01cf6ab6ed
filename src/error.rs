//! Error types for every stage of the pipeline.

use thiserror::Error;

/// Failure while evaluating a postfix expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExprError {
    /// An operator found fewer than two operands on the stack.
    #[error("stack underflow at operator `{op}` in `{expr}`")]
    StackUnderflow { op: String, expr: String },

    /// An arithmetic expression finished with nothing on the stack.
    #[error("expression `{expr}` produced no value")]
    EmptyStack { expr: String },

    /// A relational operator appeared in an arithmetic expression.
    #[error("unexpected relational operator `{op}` in arithmetic expression `{expr}`")]
    UnexpectedRelational { op: String, expr: String },

    /// A condition finished without reaching a relational operator.
    #[error("unexpected conditional `{expr}`: no relational operator")]
    MissingRelational { expr: String },
}

/// Failure while building or rewriting a sentence.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GrammarError {
    #[error("no symbol definition for letter `{0}`")]
    UnknownSymbol(char),

    #[error("symbol id {0:?} is not in the registry")]
    UnknownSymbolId(crate::symbol::SymbolId),

    #[error("symbol `{letter}` takes {expected} parameter(s), got {found}")]
    ArityMismatch {
        letter: char,
        expected: usize,
        found: usize,
    },

    #[error("production for `{letter}` failed: {source}")]
    Expression {
        letter: char,
        #[source]
        source: ExprError,
    },
}

/// Failure while walking a sentence with the turtle.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TurtleError {
    #[error("pop with empty turtle stack at symbol {index}")]
    StackUnderflow { index: usize },
}

/// Failure anywhere between the axiom and the final segments.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Grammar(#[from] GrammarError),

    #[error(transparent)]
    Turtle(#[from] TurtleError),
}

/// Failure while loading an input document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("empty string in `{0}`")]
    EmptyField(&'static str),

    #[error("`{value}` in `{field}` is not a number")]
    InvalidNumber { field: &'static str, value: String },

    #[error(transparent)]
    Grammar(#[from] GrammarError),
}
