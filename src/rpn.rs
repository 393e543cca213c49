use crate::{
    eval::Function,
    parse::{join, Operator, Token},
};
use smol_str::SmolStr;

/// Reorder infix tokens into postfix (reverse Polish) order using the
/// shunting-yard algorithm.
///
/// All operators are left-associative, including `^`, so `2 ^ 3 ^ 2` means
/// `(2 ^ 3) ^ 2`. A function name waits on the operator stack until the
/// parenthesis following it closes, and is then emitted after its argument.
///
/// This never fails. Unbalanced parentheses are dropped, and anything else
/// which doesn't belong (unknown identifiers and characters, missing
/// operands) is left for [`crate::evaluate_postfix()`] to reject.
pub fn to_postfix<I>(tokens: I) -> Vec<Token>
where
    I: IntoIterator<Item = Token>,
{
    let mut output = Vec::new();
    let mut pending: Vec<Pending> = Vec::new();

    for token in tokens {
        match token {
            Token::Identifier(name) => {
                if Function::from_name(&name).is_some() {
                    pending.push(Pending::Function(name));
                } else {
                    output.push(Token::Identifier(name));
                }
            },
            Token::LeftParen => pending.push(Pending::LeftParen),
            Token::RightParen => {
                loop {
                    match pending.pop() {
                        Some(Pending::LeftParen) | None => break,
                        Some(other) => output.extend(other.into_token()),
                    }
                }

                // the function owning these parentheses comes next
                if let Some(Pending::Function(_)) = pending.last() {
                    output.extend(pending.pop().and_then(Pending::into_token));
                }
            },
            Token::Operator(op) => {
                while let Some(&Pending::Operator(top)) = pending.last() {
                    if top.precedence() < op.precedence() {
                        break;
                    }

                    pending.pop();
                    output.push(Token::Operator(top));
                }

                pending.push(Pending::Operator(op));
            },
            Token::Number(_) | Token::Unknown(_) => output.push(token),
        }
    }

    while let Some(item) = pending.pop() {
        match item.into_token() {
            Some(token) => output.push(token),
            None => log::debug!("Dropping an unmatched \"(\""),
        }
    }

    log::trace!("Postfix form: [{}]", join(&output));
    output
}

/// Something waiting on the operator stack.
#[derive(Debug, Clone, PartialEq)]
enum Pending {
    Operator(Operator),
    Function(SmolStr),
    LeftParen,
}

impl Pending {
    /// The token to emit for this item. Parentheses are structural and
    /// never make it into the output.
    fn into_token(self) -> Option<Token> {
        match self {
            Pending::Operator(op) => Some(Token::Operator(op)),
            Pending::Function(name) => Some(Token::Identifier(name)),
            Pending::LeftParen => None,
        }
    }
}
