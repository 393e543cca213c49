//! Evaluating postfix token sequences.

use crate::{
    error::{EvalError, Malformed},
    numeric,
    parse::{Operator, Token},
};
use smol_str::SmolStr;
use std::fmt::{self, Display, Formatter};

/// The builtin single-argument functions.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Function {
    Sqrt,
    Sine,
    Cosine,
    Tangent,
    /// The natural logarithm, spelled `log`.
    Log,
    Exp,
}

impl Function {
    pub const ALL: [Function; 6] = [
        Function::Sqrt,
        Function::Sine,
        Function::Cosine,
        Function::Tangent,
        Function::Log,
        Function::Exp,
    ];

    /// Look up a function by the name it's called with. Names are
    /// case-sensitive.
    pub fn from_name(name: &str) -> Option<Function> {
        Function::ALL.iter().copied().find(|f| f.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Function::Sqrt => "sqrt",
            Function::Sine => "sin",
            Function::Cosine => "cos",
            Function::Tangent => "tan",
            Function::Log => "log",
            Function::Exp => "exp",
        }
    }

    pub fn arity(self) -> usize { 1 }

    pub fn is_trigonometric(self) -> bool {
        matches!(self, Function::Sine | Function::Cosine | Function::Tangent)
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Contextual information used when evaluating an expression.
pub trait Context {
    fn evaluate_function(
        &self,
        function: Function,
        argument: f64,
    ) -> Result<f64, EvalError>;
}

/// The unit trigonometric functions take their argument in.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AngleUnit {
    Radians,
    Degrees,
}

impl Default for AngleUnit {
    fn default() -> Self { AngleUnit::Radians }
}

/// The set of builtin functions, implemented by [`crate::numeric`].
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Builtins {
    pub angle_unit: AngleUnit,
}

impl Builtins {
    pub fn radians() -> Self {
        Builtins {
            angle_unit: AngleUnit::Radians,
        }
    }

    /// Builtins where `sin`, `cos` and `tan` take their argument in degrees.
    pub fn degrees() -> Self {
        Builtins {
            angle_unit: AngleUnit::Degrees,
        }
    }

    fn angle_in_radians(&self, angle: f64) -> f64 {
        match self.angle_unit {
            AngleUnit::Radians => angle,
            AngleUnit::Degrees => numeric::to_radians(angle),
        }
    }
}

impl Context for Builtins {
    fn evaluate_function(
        &self,
        function: Function,
        argument: f64,
    ) -> Result<f64, EvalError> {
        let argument = if function.is_trigonometric() {
            self.angle_in_radians(argument)
        } else {
            argument
        };

        let value = match function {
            Function::Sqrt => numeric::sqrt(argument)?,
            Function::Sine => numeric::sin(argument),
            Function::Cosine => numeric::cos(argument),
            Function::Tangent => numeric::tan(argument)?,
            Function::Log => numeric::log(argument)?,
            Function::Exp => numeric::exp(argument),
        };

        Ok(value)
    }
}

/// Evaluate a sequence of tokens in postfix (reverse Polish) order.
///
/// Numbers are pushed onto a value stack, functions replace the top value
/// with their result, and binary operators replace the top two values
/// (`a b op`) with `a op b`. Exactly one value must be left at the end.
pub fn evaluate_postfix<C>(postfix: &[Token], ctx: &C) -> Result<f64, EvalError>
where
    C: Context,
{
    let mut values: Vec<f64> = Vec::new();

    for token in postfix {
        match token {
            Token::Number(literal) => values.push(parse_number(literal)?),
            Token::Identifier(name) => {
                let function = Function::from_name(name).ok_or_else(|| {
                    Malformed::UnknownFunction { name: name.clone() }
                })?;
                let operands =
                    take_operands(&mut values, function.arity(), token)?;
                let value = match operands[..] {
                    [argument] => ctx.evaluate_function(function, argument)?,
                    _ => unreachable!("{} takes a single argument", function),
                };
                values.push(value);
            },
            Token::Operator(op) => {
                let operands = take_operands(&mut values, op.arity(), token)?;
                let value = match operands[..] {
                    [left, right] => apply(*op, left, right)?,
                    _ => unreachable!("{} is a binary operator", op),
                };
                values.push(value);
            },
            Token::LeftParen | Token::RightParen | Token::Unknown(_) => {
                return Err(Malformed::UnexpectedToken {
                    token: token.to_string().into(),
                }
                .into());
            },
        }
    }

    match values.as_slice() {
        [value] => Ok(*value),
        [] => Err(Malformed::Empty.into()),
        _ => Err(Malformed::LeftoverValues {
            count: values.len(),
        }
        .into()),
    }
}

fn parse_number(literal: &SmolStr) -> Result<f64, EvalError> {
    literal.parse().map_err(|_| EvalError::MalformedNumber {
        literal: literal.clone(),
    })
}

/// Pop the top `count` values, leaving them in the order they were pushed.
fn take_operands(
    values: &mut Vec<f64>,
    count: usize,
    token: &Token,
) -> Result<Vec<f64>, Malformed> {
    if values.len() < count {
        return Err(Malformed::MissingOperand {
            token: token.to_string().into(),
        });
    }

    Ok(values.split_off(values.len() - count))
}

fn apply(op: Operator, left: f64, right: f64) -> Result<f64, EvalError> {
    match op {
        Operator::Plus => Ok(left + right),
        Operator::Minus => Ok(left - right),
        Operator::Times => Ok(left * right),
        Operator::Divide if right == 0.0 => Err(EvalError::DivisionByZero),
        Operator::Divide => Ok(left / right),
        Operator::Power => Ok(numeric::pow(left, right)?),
    }
}
