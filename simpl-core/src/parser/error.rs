use crate::parser::lexer::Span;
use crate::parser::token::Token;
use std::io;
use thiserror::Error;

/// Inconsistency in the built-in keyword and operator tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("keyword '{0}' is not an identifier")]
    KeywordNotIdentifier(&'static str),
    #[error("operator '{0}' would lex as an identifier")]
    OperatorIsIdentifier(&'static str),
}

#[derive(Debug, Error)]
pub enum LexError {
    #[error("unexpected character '{ch}' at {span}")]
    UnexpectedCharacter { ch: char, span: Span },

    #[error("malformed exponent in float literal '{literal}' at {span}")]
    MalformedExponent { literal: String, span: Span },

    #[error("not enough tokens: requested {requested}, {available} available")]
    NotEnoughTokens { requested: usize, available: usize },

    #[error("invalid token table: {0}")]
    Table(#[from] TableError),

    #[error("failed to read source: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("expected {expected}, found '{found}' at {span}")]
    Expected {
        expected: &'static str,
        found: Token,
        span: Span,
    },

    #[error("expected {expected}, found end of input")]
    UnexpectedEnd { expected: &'static str },

    #[error("unexpected token '{token}' at {span}")]
    UnexpectedToken { token: Token, span: Span },

    #[error("number literal '{text}' is out of range at {span}")]
    InvalidNumber { text: String, span: Span },

    #[error("nesting deeper than {limit} levels at {span}")]
    TooDeep { limit: usize, span: Span },
}

#[derive(Debug, Error)]
pub enum EvalError {
    #[error("variable '{0}' is not defined")]
    UndefinedVariable(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("integer overflow in '{left} {operator} {right}'")]
    Overflow {
        operator: &'static str,
        left: i64,
        right: i64,
    },

    #[error("operator '{operator}' cannot be applied to {left} and {right}")]
    TypeMismatch {
        operator: &'static str,
        left: &'static str,
        right: &'static str,
    },

    #[error("expected a boolean, found {0}")]
    NotABoolean(&'static str),

    #[error("failed to write program output: {0}")]
    Output(io::Error),
}

/// Any failure of a complete run, tagged by the stage that raised it
#[derive(Debug, Error)]
pub enum Error {
    #[error("lexical error: {0}")]
    Lex(LexError),

    #[error("syntax error: {0}")]
    Parse(ParseError),

    #[error("runtime error: {0}")]
    Eval(EvalError),
}

impl From<EvalError> for Error {
    fn from(err: EvalError) -> Self {
        Error::Eval(err)
    }
}

impl From<LexError> for Error {
    fn from(err: LexError) -> Self {
        Error::Lex(err)
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::Lex(err) => Error::Lex(err),
            other => Error::Parse(other),
        }
    }
}
