//! # simpl core
//!
//! Lexer, parser and evaluator for simpl, a tiny imperative language with
//! integer/float arithmetic, booleans, assignment, `print`, single-branch `if`
//! and blocks. Contains no terminal or filesystem code.
//!
//! ## Example
//!
//! ```
//! let output = simpl_core::run_str("x := 5; print x + 2;").unwrap();
//! assert_eq!(output, "7\n");
//! ```

pub mod config;
pub mod parser;

pub use config::{Config, SubtractionMode};
pub use parser::{
    Environment, Error, EvalError, Interpreter, LexError, Lexer, ParseError, Program, Token,
    TokenKind, Value,
};

use std::io::{BufRead, Write};

/// Parse a complete program from a string
pub fn parse_str(source: &str) -> Result<Program, Error> {
    Ok(parser::parse_statements(source)?)
}

/// Parse a complete program from a buffered reader
pub fn parse_reader<R: BufRead>(reader: R) -> Result<Program, Error> {
    Ok(parser::parse_reader(reader)?)
}

/// Parse and run `source` with default options, returning everything it printed
pub fn run_str(source: &str) -> Result<String, Error> {
    run_str_with_config(source, Config::default())
}

/// Like [`run_str`] with explicit evaluation options
pub fn run_str_with_config(source: &str, config: Config) -> Result<String, Error> {
    let mut out = Vec::new();
    run_with_config(source.as_bytes(), &mut out, config)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Parse the whole of `reader`, then execute it in a fresh environment,
/// printing to `out`
///
/// Nothing runs if parsing fails. Output written before an evaluation error
/// is left in `out`.
pub fn run_with_config<R: BufRead, W: Write>(
    reader: R,
    out: W,
    config: Config,
) -> Result<(), Error> {
    let program = parse_reader(reader)?;
    let mut interpreter = Interpreter::with_config(out, config);
    interpreter.execute(&program)?;
    Ok(())
}
