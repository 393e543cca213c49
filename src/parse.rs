use smol_str::SmolStr;
use std::fmt::{self, Display, Formatter};

/// Split some text into a flat sequence of [`Token`]s.
///
/// This never fails. Characters which mean nothing in an expression come
/// through as [`Token::Unknown`], and number literals aren't checked until
/// they get evaluated.
pub fn tokenize(src: &str) -> Vec<Token> {
    let tokens: Vec<Token> = Tokens::new(src).collect();
    log::trace!("Tokenized \"{}\" as [{}]", src, join(&tokens));
    tokens
}

/// A single lexical item from an expression's text form.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// The literal text of a number (e.g. `"3.14"`), parsed on evaluation.
    Number(SmolStr),
    /// A run of letters, normally the name of a function.
    Identifier(SmolStr),
    Operator(Operator),
    LeftParen,
    RightParen,
    /// A character which has no meaning in an expression.
    Unknown(char),
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(text) | Token::Identifier(text) => {
                write!(f, "{}", text)
            },
            Token::Operator(op) => write!(f, "{}", op),
            Token::LeftParen => write!(f, "("),
            Token::RightParen => write!(f, ")"),
            Token::Unknown(c) => write!(f, "{}", c),
        }
    }
}

impl From<Operator> for Token {
    fn from(op: Operator) -> Token { Token::Operator(op) }
}

/// Render a token sequence as space-separated text.
pub(crate) fn join(tokens: &[Token]) -> String {
    let words: Vec<String> = tokens.iter().map(ToString::to_string).collect();
    words.join(" ")
}

/// A binary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Operator {
    Plus,
    Minus,
    Times,
    Divide,
    Power,
}

impl Operator {
    pub fn from_symbol(symbol: char) -> Option<Operator> {
        match symbol {
            '+' => Some(Operator::Plus),
            '-' => Some(Operator::Minus),
            '*' => Some(Operator::Times),
            '/' => Some(Operator::Divide),
            '^' => Some(Operator::Power),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Operator::Plus => '+',
            Operator::Minus => '-',
            Operator::Times => '*',
            Operator::Divide => '/',
            Operator::Power => '^',
        }
    }

    /// How tightly the operator binds. `^` beats `*` and `/`, which beat
    /// `+` and `-`.
    pub fn precedence(self) -> u8 {
        match self {
            Operator::Plus | Operator::Minus => 1,
            Operator::Times | Operator::Divide => 2,
            Operator::Power => 3,
        }
    }

    pub fn arity(self) -> usize { 2 }
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Tokens<'a> {
    src: &'a str,
    cursor: usize,
}

impl<'a> Tokens<'a> {
    fn new(src: &'a str) -> Self { Tokens { src, cursor: 0 } }

    fn rest(&self) -> &'a str { &self.src[self.cursor..] }

    fn peek(&self) -> Option<char> { self.rest().chars().next() }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.cursor += c.len_utf8();
        Some(c)
    }

    fn take_while<P>(&mut self, mut predicate: P) -> &'a str
    where
        P: FnMut(char) -> bool,
    {
        let start = self.cursor;

        while let Some(c) = self.peek() {
            if !predicate(c) {
                break;
            }

            self.advance();
        }

        &self.src[start..self.cursor]
    }

    /// Digits with at most one decimal point. A second decimal point starts
    /// the next literal.
    fn chomp_number(&mut self) -> Token {
        let mut seen_decimal_point = false;

        let text = self.take_while(|c| match c {
            '0'..='9' => true,
            '.' if !seen_decimal_point => {
                seen_decimal_point = true;
                true
            },
            _ => false,
        });

        Token::Number(text.into())
    }

    fn chomp_identifier(&mut self) -> Token {
        let text = self.take_while(|c| c.is_ascii_alphabetic());
        Token::Identifier(text.into())
    }

    fn chomp_symbol(&mut self) -> Option<Token> {
        let symbol = self.advance()?;

        let token = match symbol {
            '(' => Token::LeftParen,
            ')' => Token::RightParen,
            other => match Operator::from_symbol(other) {
                Some(op) => Token::Operator(op),
                None => Token::Unknown(other),
            },
        };

        Some(token)
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            return match self.peek()? {
                space if space.is_whitespace() => {
                    self.advance();
                    continue;
                },
                '0'..='9' | '.' => Some(self.chomp_number()),
                'a'..='z' | 'A'..='Z' => Some(self.chomp_identifier()),
                _ => self.chomp_symbol(),
            };
        }
    }
}
