//! A small expression evaluator for arithmetic and scientific expressions.
//!
//! ```rust
//! let got = numeval::evaluate("2 + 3 * sqrt(16)").unwrap();
//! assert!((got - 14.0).abs() < 1e-9);
//! ```
//!
//! Evaluation happens in three steps:
//!
//! 1. [`tokenize()`] splits the text into [`Token`]s
//! 2. [`to_postfix()`] reorders them using the shunting-yard algorithm
//! 3. [`evaluate_postfix()`] runs the postfix sequence on a value stack
//!
//! The supported operators are `+`, `-`, `*`, `/` and `^` (all
//! left-associative) and the functions are `sqrt`, `sin`, `cos`, `tan`,
//! `log` (natural logarithm) and `exp`. There is no unary minus or implicit
//! multiplication.
//!
//! None of the maths is delegated to the platform. See [`numeric`] for the
//! hand-rolled primitives and their convergence rules.

#[cfg(test)]
#[macro_use]
extern crate pretty_assertions;

mod error;
mod eval;
pub mod numeric;
mod parse;
mod rpn;

pub use error::{DomainError, EvalError, Malformed};
pub use eval::{evaluate_postfix, AngleUnit, Builtins, Context, Function};
pub use parse::{tokenize, Operator, Token};
pub use rpn::to_postfix;

/// Evaluate an expression using the [`Builtins`].
///
/// Trigonometric functions take their argument in **radians**. Callers
/// wanting degrees should use [`evaluate_with()`] and [`Builtins::degrees()`].
pub fn evaluate(expression: &str) -> Result<f64, EvalError> {
    evaluate_with(expression, &Builtins::default())
}

/// Evaluate an expression, looking up functions with a particular
/// [`Context`].
///
/// ```rust
/// use numeval::Builtins;
///
/// let got = numeval::evaluate_with("sin(30) * 4", &Builtins::degrees())
///     .unwrap();
/// assert!((got - 2.0).abs() < 1e-9);
/// ```
pub fn evaluate_with<C>(expression: &str, ctx: &C) -> Result<f64, EvalError>
where
    C: Context,
{
    let postfix = to_postfix(tokenize(expression));
    let result = evaluate_postfix(&postfix, ctx);

    match &result {
        Ok(value) => log::debug!("\"{}\" = {}", expression, value),
        Err(e) => log::debug!("Unable to evaluate \"{}\": {}", expression, e),
    }

    result
}
