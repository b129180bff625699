//! Parsing of expressions in the variable `x` from text.
//!
//! The grammar supports decimal numbers with an optional fraction and
//! exponent, the variable `x`, the constants `e` and `pi`, the binary
//! operators `+ - * / ^`, unary `-` and `+`, parentheses, and the functions
//! `ln(u)`, `log(b, u)`, `exp(u)` and `sqrt(u)`.
//!
//! `^` is right associative and binds more strongly than unary minus, so that
//! `-x^2` is `-(x^2)` and `2^3^2` is `2^9`.

use std::{
    f64::consts::{E, PI},
    fmt::{self, Write},
    iter::Peekable,
    str::{Chars, FromStr},
};

use smallvec::SmallVec;
use smartstring::{LazyCompact, SmartString};

use crate::{
    error::{CalculusError, Result},
    node::{ArithmeticOp, Node, MAX_DEPTH},
};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Add => f.write_char('+'),
            Operator::Sub => f.write_char('-'),
            Operator::Mul => f.write_char('*'),
            Operator::Div => f.write_char('/'),
            Operator::Pow => f.write_char('^'),
        }
    }
}

impl Operator {
    /// The precedence of the binary operator. Unary minus has precedence 3.
    #[inline]
    pub fn get_precedence(&self) -> u8 {
        match self {
            Operator::Add | Operator::Sub => 1,
            Operator::Mul | Operator::Div => 2,
            Operator::Pow => 4,
        }
    }

    #[inline]
    pub fn right_associative(&self) -> bool {
        matches!(self, Operator::Pow)
    }

    fn to_node(self, left: Node, right: Node) -> Node {
        match self {
            Operator::Add => Node::arithmetic(left, right, ArithmeticOp::Add),
            Operator::Sub => Node::arithmetic(left, right, ArithmeticOp::Subtract),
            Operator::Mul => Node::arithmetic(left, right, ArithmeticOp::Multiply),
            Operator::Div => Node::arithmetic(left, right, ArithmeticOp::Divide),
            Operator::Pow => left.pow(right),
        }
    }
}

const UNARY_PRECEDENCE: u8 = 3;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Position {
    pub line_number: usize,
    pub char_pos: usize,
}

impl Position {
    #[inline]
    fn advance(&mut self, c: char) {
        if c == '\n' {
            self.line_number += 1;
            self.char_pos = 1;
        } else {
            self.char_pos += 1;
        }
    }

    fn error(&self, message: impl Into<String>) -> CalculusError {
        CalculusError::Parse {
            line: self.line_number,
            column: self.char_pos,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    Number(SmartString<LazyCompact>),
    ID(SmartString<LazyCompact>),
    Op(Operator),
    OpenParenthesis,
    CloseParenthesis,
    Comma,
    EOF,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => f.write_str(n),
            Token::ID(v) => f.write_str(v),
            Token::Op(o) => fmt::Display::fmt(o, f),
            Token::OpenParenthesis => f.write_char('('),
            Token::CloseParenthesis => f.write_char(')'),
            Token::Comma => f.write_char(','),
            Token::EOF => f.write_str("end of input"),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum LexState {
    Identifier,
    Number,
    Any,
}

/// Split `input` into tokens, each annotated with the position of its first character.
pub fn tokenize(input: &str) -> Result<Vec<(Token, Position)>> {
    let whitespace = [' ', '\t', '\n', '\r'];

    let mut tokens = Vec::with_capacity(input.len() / 2 + 1);
    let mut state = LexState::Any;
    let mut buffer: SmartString<LazyCompact> = SmartString::new();
    let mut start = Position {
        line_number: 1,
        char_pos: 1,
    };

    let mut pos = start;
    let mut chars = input.chars().peekable();

    loop {
        let c = chars.peek().copied().unwrap_or('\0');

        match state {
            LexState::Identifier => {
                if c.is_ascii_alphanumeric() || c == '_' {
                    buffer.push(c);
                } else {
                    tokens.push((Token::ID(std::mem::take(&mut buffer)), start));
                    state = LexState::Any;
                }
            }
            LexState::Number => {
                let has_exponent = buffer.contains(|d: char| d == 'e' || d == 'E');
                let after_exponent = buffer.ends_with(|d: char| d == 'e' || d == 'E');

                if c.is_ascii_digit() || after_exponent && (c == '+' || c == '-') {
                    buffer.push(c);
                } else if c == '.' && !buffer.contains('.') && !has_exponent {
                    buffer.push(c);
                } else if (c == 'e' || c == 'E') && !has_exponent && starts_exponent(&chars) {
                    buffer.push(c);
                } else {
                    tokens.push((Token::Number(std::mem::take(&mut buffer)), start));
                    state = LexState::Any;
                }
            }
            LexState::Any => {}
        }

        if state == LexState::Any {
            if whitespace.contains(&c) {
                chars.next();
                pos.advance(c);
                continue;
            }

            start = pos;
            let token = match c {
                '\0' => {
                    tokens.push((Token::EOF, start));
                    return Ok(tokens);
                }
                '+' => Some(Token::Op(Operator::Add)),
                '-' => Some(Token::Op(Operator::Sub)),
                '*' => Some(Token::Op(Operator::Mul)),
                '/' => Some(Token::Op(Operator::Div)),
                '^' => Some(Token::Op(Operator::Pow)),
                '(' => Some(Token::OpenParenthesis),
                ')' => Some(Token::CloseParenthesis),
                ',' => Some(Token::Comma),
                _ if c.is_ascii_digit() || c == '.' => {
                    state = LexState::Number;
                    buffer.push(c);
                    None
                }
                _ if c.is_ascii_alphabetic() => {
                    state = LexState::Identifier;
                    buffer.push(c);
                    None
                }
                _ => return Err(pos.error(format!("unexpected '{}'", c))),
            };

            if let Some(t) = token {
                tokens.push((t, start));
            }
        }

        chars.next();
        pos.advance(c);
    }
}

/// Check if the upcoming `e` starts the exponent of a number: it must be
/// followed by a digit, optionally after a sign.
fn starts_exponent(chars: &Peekable<Chars>) -> bool {
    let mut rest = chars.clone();
    rest.next();
    match rest.next() {
        Some('+' | '-') => rest.next().is_some_and(|d| d.is_ascii_digit()),
        Some(d) => d.is_ascii_digit(),
        None => false,
    }
}

/// A precedence-climbing parser over a token list.
struct Parser {
    tokens: Vec<(Token, Position)>,
    index: usize,
    depth: usize,
}

impl Parser {
    #[inline]
    fn peek(&self) -> &(Token, Position) {
        // the token list always ends with `EOF`
        &self.tokens[self.index.min(self.tokens.len() - 1)]
    }

    #[inline]
    fn next(&mut self) -> (Token, Position) {
        let t = self.peek().clone();
        if self.index < self.tokens.len() {
            self.index += 1;
        }
        t
    }

    fn expect(&mut self, expected: Token) -> Result<()> {
        let (t, pos) = self.next();
        if t == expected {
            Ok(())
        } else {
            Err(pos.error(format!("expected '{}', but found '{}'", expected, t)))
        }
    }

    /// Parse an expression whose binary operators have at least precedence `min_prec`.
    ///
    /// Every parenthesis, unary sign, function argument and right-hand operand
    /// nests one level deeper, up to [`MAX_DEPTH`] levels.
    fn expression(&mut self, min_prec: u8) -> Result<Node> {
        if self.depth >= MAX_DEPTH {
            return Err(self.peek().1.error("expression nested too deeply"));
        }

        self.depth += 1;
        let res = self.binary(min_prec);
        self.depth -= 1;
        res
    }

    fn binary(&mut self, min_prec: u8) -> Result<Node> {
        let mut lhs = self.prefix()?;

        while let (Token::Op(op), _) = self.peek() {
            let op = *op;
            let prec = op.get_precedence();
            if prec < min_prec {
                break;
            }

            self.next();
            let next_min = if op.right_associative() { prec } else { prec + 1 };
            let rhs = self.expression(next_min)?;
            lhs = op.to_node(lhs, rhs);
        }

        Ok(lhs)
    }

    fn prefix(&mut self) -> Result<Node> {
        let (t, pos) = self.next();
        match t {
            Token::Op(Operator::Sub) => Ok(Node::negate(self.expression(UNARY_PRECEDENCE)?)),
            // unary plus is the identity
            Token::Op(Operator::Add) => self.expression(UNARY_PRECEDENCE),
            Token::Number(n) => n
                .parse::<f64>()
                .map(Node::Constant)
                .map_err(|e| pos.error(format!("could not parse number '{}': {}", n, e))),
            Token::OpenParenthesis => {
                let inner = self.expression(0)?;
                self.expect(Token::CloseParenthesis)?;
                Ok(inner)
            }
            Token::ID(name) => {
                if self.peek().0 == Token::OpenParenthesis {
                    self.next();
                    self.function(&name, pos)
                } else {
                    match name.as_str() {
                        "x" => Ok(Node::Variable),
                        "e" => Ok(Node::Constant(E)),
                        "pi" => Ok(Node::Constant(PI)),
                        _ => Err(pos.error(format!("unknown symbol '{}'", name))),
                    }
                }
            }
            t => Err(pos.error(format!("unexpected '{}'", t))),
        }
    }

    /// Parse the arguments of a function call, after the opening parenthesis.
    fn function(&mut self, name: &str, pos: Position) -> Result<Node> {
        let mut args: SmallVec<[Node; 2]> = SmallVec::new();
        loop {
            args.push(self.expression(0)?);

            let (t, p) = self.next();
            match t {
                Token::Comma => {}
                Token::CloseParenthesis => break,
                t => return Err(p.error(format!("expected ',' or ')', but found '{}'", t))),
            }
        }

        let arity = match name {
            "ln" | "exp" | "sqrt" => 1,
            "log" => 2,
            _ => return Err(pos.error(format!("unknown function '{}'", name))),
        };

        if args.len() != arity {
            return Err(pos.error(format!(
                "function '{}' expects {} argument(s), but got {}",
                name,
                arity,
                args.len()
            )));
        }

        let mut args = args.into_iter();
        let (Some(first), second) = (args.next(), args.next()) else {
            return Err(pos.error("missing argument"));
        };

        match (name, second) {
            ("ln", _) => Ok(first.ln()),
            ("exp", _) => Ok(first.exp()),
            ("sqrt", _) => Ok(first.sqrt()),
            (_, Some(argument)) => Ok(first.log(argument)),
            (_, None) => Err(pos.error("missing argument")),
        }
    }
}

impl Node {
    /// Parse an expression in the variable `x`.
    ///
    /// ```
    /// use symcalc::node::Node;
    ///
    /// let f = Node::parse("2*x + x^2").unwrap();
    /// assert_eq!(f.evaluate(3.).unwrap(), 15.);
    /// ```
    pub fn parse(input: &str) -> Result<Node> {
        let mut parser = Parser {
            tokens: tokenize(input)?,
            index: 0,
            depth: 0,
        };

        let node = parser.expression(0)?;

        match parser.next() {
            (Token::EOF, _) => Ok(node),
            (t, pos) => Err(pos.error(format!("unexpected '{}'", t))),
        }
    }
}

impl FromStr for Node {
    type Err = CalculusError;

    fn from_str(s: &str) -> Result<Node> {
        Node::parse(s)
    }
}
