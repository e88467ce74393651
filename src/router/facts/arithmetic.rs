//! Two-operand integer arithmetic spotted in free text: `5 + 3`,
//! `what is 10 minus 4`, `6 into 7`, `12/4`, `5 cm + 3 cm`, `add 5 and 3`.
//!
//! Operands are the numbers next to the operator, not the first numbers in
//! the message. Integers are arbitrary precision; decimals make the rule
//! decline.

use std::fmt;

use num_bigint::{BigInt, Sign};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

impl Op {
    fn symbol(self) -> char {
        match self {
            Op::Add => '+',
            Op::Sub => '-',
            Op::Mul => '×',
            Op::Div => '÷',
        }
    }
}

/// Operator words, matched as whole words.
const OP_WORDS: &[(&str, Op)] = &[
    ("plus", Op::Add),
    ("add", Op::Add),
    ("added", Op::Add),
    ("minus", Op::Sub),
    ("subtract", Op::Sub),
    ("subtracted", Op::Sub),
    ("less", Op::Sub),
    ("times", Op::Mul),
    ("multiply", Op::Mul),
    ("multiplied", Op::Mul),
    ("into", Op::Mul),
    ("x", Op::Mul),
    ("divided", Op::Div),
    ("divide", Op::Div),
    ("over", Op::Div),
];

/// Words allowed between an operator and its right operand (`divided by 7`).
const LINKS: &[&str] = &["by", "with", "to", "and"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expr {
    pub lhs: BigInt,
    pub op: Op,
    pub rhs: BigInt,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Value(BigInt),
    /// Integer division that leaves a remainder.
    Quotient { quotient: BigInt, remainder: BigInt },
    DivideByZero,
}

impl Expr {
    pub fn eval(&self) -> Outcome {
        let Expr { lhs, op, rhs } = self;
        match op {
            Op::Add => Outcome::Value(lhs + rhs),
            Op::Sub => Outcome::Value(lhs - rhs),
            Op::Mul => Outcome::Value(lhs * rhs),
            Op::Div => {
                if rhs.sign() == Sign::NoSign {
                    return Outcome::DivideByZero;
                }
                let (quotient, remainder) = (lhs / rhs, lhs % rhs);
                if remainder.sign() == Sign::NoSign {
                    Outcome::Value(quotient)
                } else {
                    Outcome::Quotient { quotient, remainder }
                }
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.lhs, self.op.symbol(), self.rhs)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Value(v) => write!(f, "{v}"),
            Outcome::Quotient { quotient, remainder } => {
                write!(f, "{quotient} (remainder {remainder})")
            }
            Outcome::DivideByZero => f.write_str("undefined"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token<'a> {
    /// Signed digit run. `decimal` marks one with a fractional part.
    Num { digits: &'a str, negative: bool, decimal: bool },
    Op(Op),
    Word(&'a str),
}

/// True when `text` mentions an operator at all; the rule's trigger.
pub fn mentions_operator(text: &str) -> bool {
    tokenize(text).iter().any(|t| matches!(t, Token::Op(_)))
}

/// Parse the first operator that has a number on each side.
///
/// A single unit word may sit between the left number and the operator
/// (`5 cm + 3 cm`). A leading operator word takes both numbers after it
/// (`add 5 and 3`). `None` when no operator has two integer operands, or
/// when an operand has a decimal point.
pub fn parse(text: &str) -> Option<Expr> {
    let lower = text.to_lowercase();
    let tokens = tokenize(&lower);
    tokens.iter().enumerate().find_map(|(i, token)| {
        let &Token::Op(op) = token else { return None };
        let (lhs, rhs) = match operand_before(&tokens, i) {
            Some(lhs) => (lhs, operand_after(&tokens, i + 1)?),
            None => {
                let (lhs, next) = number_at(&tokens, i + 1)?;
                (lhs, operand_after(&tokens, next)?)
            }
        };
        Some((lhs, op, rhs))
    })
    .and_then(|(lhs, op, rhs)| Some(Expr { lhs: to_int(lhs)?, op, rhs: to_int(rhs)? }))
}

fn operand_before<'t, 'a>(tokens: &'t [Token<'a>], op_at: usize) -> Option<&'t Token<'a>> {
    let mut j = op_at.checked_sub(1)?;
    if matches!(tokens[j], Token::Word(_)) {
        j = j.checked_sub(1)?;
    }
    matches!(tokens[j], Token::Num { .. }).then(|| &tokens[j])
}

fn operand_after<'t, 'a>(tokens: &'t [Token<'a>], from: usize) -> Option<&'t Token<'a>> {
    number_at(tokens, from).map(|(n, _)| n)
}

/// Number at `at`, skipping one linking word. Returns the index after it.
fn number_at<'t, 'a>(tokens: &'t [Token<'a>], at: usize) -> Option<(&'t Token<'a>, usize)> {
    let mut k = at;
    if let Some(Token::Word(w)) = tokens.get(k)
        && LINKS.contains(w)
    {
        k += 1;
    }
    match tokens.get(k)? {
        n @ Token::Num { .. } => Some((n, k + 1)),
        _ => None,
    }
}

fn to_int(token: &Token<'_>) -> Option<BigInt> {
    let &Token::Num { digits, negative, decimal: false } = token else {
        return None;
    };
    let value: BigInt = digits.parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Split lowercased text into numbers, operators and words. Other
/// punctuation separates tokens and is dropped.
///
/// A `-` glued to a preceding letter is a hyphen (`covid-19`). A `-` glued
/// to the following digit, with no number before it, is a sign (`-5 + 3`).
fn tokenize(text: &str) -> Vec<Token<'_>> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut negative = false;
    let mut i = 0;
    while let Some(c) = text[i..].chars().next() {
        let width = c.len_utf8();
        if c.is_ascii_digit() {
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            let digits = &text[start..i];
            let mut decimal = start > 0 && bytes[start - 1] == b'.';
            if i + 1 < bytes.len() && bytes[i] == b'.' && bytes[i + 1].is_ascii_digit() {
                decimal = true;
                i += 1;
                while i < bytes.len() && bytes[i].is_ascii_digit() {
                    i += 1;
                }
            }
            tokens.push(Token::Num { digits, negative, decimal });
            negative = false;
            continue;
        }
        negative = false;
        if c.is_alphabetic() {
            let start = i;
            while let Some(ch) = text[i..].chars().next().filter(|ch| ch.is_alphabetic()) {
                i += ch.len_utf8();
            }
            let word = &text[start..i];
            match OP_WORDS.iter().find(|(w, _)| *w == word) {
                Some(&(_, op)) => tokens.push(Token::Op(op)),
                None => tokens.push(Token::Word(word)),
            }
            continue;
        }
        let op = match c {
            '+' => Some(Op::Add),
            '*' | '×' => Some(Op::Mul),
            '/' | '÷' => Some(Op::Div),
            '-' | '−' => {
                let glued_to_word = text[..i].chars().next_back().is_some_and(char::is_alphabetic);
                let next_is_digit = text[i + width..].starts_with(|d: char| d.is_ascii_digit());
                if glued_to_word {
                    None
                } else if next_is_digit && !matches!(tokens.last(), Some(Token::Num { .. })) {
                    negative = true;
                    i += width;
                    continue;
                } else {
                    Some(Op::Sub)
                }
            }
            _ => None,
        };
        if let Some(op) = op {
            tokens.push(Token::Op(op));
        }
        i += width;
    }
    tokens
}
