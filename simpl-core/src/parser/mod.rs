// simpl-core/src/parser/mod.rs

pub mod ast;
pub mod environment;
pub mod error;
pub mod evaluator;
pub mod interpreter;
pub mod lexer;
pub mod statement_parser;
pub mod token;

#[cfg(test)]
mod evaluator_tests;

pub use ast::{Expression, Program, Statement, Value};
pub use environment::Environment;
pub use error::{Error, EvalError, LexError, ParseError, TableError};
pub use evaluator::Evaluator;
pub use interpreter::Interpreter;
pub use lexer::{Lexer, Span, SpannedToken};
pub use statement_parser::{parse_reader, parse_statements, StatementParser};
pub use token::{Number, Token, TokenKind};
