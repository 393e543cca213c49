use smol_str::SmolStr;
use thiserror::Error;

/// Everything that can go wrong while evaluating an expression.
///
/// The first error aborts the whole evaluation, there are no partial results.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    /// A function was called with an argument outside its domain.
    #[error(transparent)]
    Domain(#[from] DomainError),
    /// The right operand of `/` was zero.
    #[error("Division by zero")]
    DivisionByZero,
    /// The tokens don't form a single well-formed expression.
    #[error("Invalid expression: {0}")]
    InvalidExpression(#[from] Malformed),
    /// A number literal couldn't be parsed.
    #[error("Malformed number \"{literal}\"")]
    MalformedNumber { literal: SmolStr },
}

/// An argument outside the range a function is defined for.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{function}: {reason}")]
pub struct DomainError {
    pub function: &'static str,
    pub reason: &'static str,
}

impl DomainError {
    pub(crate) const fn new(
        function: &'static str,
        reason: &'static str,
    ) -> Self {
        DomainError { function, reason }
    }
}

/// The ways a postfix sequence can fail to describe exactly one value.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Malformed {
    #[error("nothing to evaluate")]
    Empty,
    #[error("\"{token}\" is missing an operand")]
    MissingOperand { token: SmolStr },
    #[error("{count} values were left over")]
    LeftoverValues { count: usize },
    #[error("unknown function \"{name}\"")]
    UnknownFunction { name: SmolStr },
    #[error("unexpected \"{token}\"")]
    UnexpectedToken { token: SmolStr },
}
