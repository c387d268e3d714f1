//! Statement execution
//!
//! The interpreter owns the run's environment and writes `print` output to a
//! caller-supplied sink. Execution stops at the first error; anything already
//! written stays written.

use crate::config::Config;
use crate::parser::ast::{Program, Statement};
use crate::parser::environment::Environment;
use crate::parser::error::EvalError;
use crate::parser::evaluator::Evaluator;
use std::io::Write;
use tracing::{debug, trace};

/// Executes programs against a single environment
pub struct Interpreter<W> {
    evaluator: Evaluator,
    environment: Environment,
    out: W,
}

impl<W: Write> Interpreter<W> {
    /// Create a new interpreter printing to `out`
    pub fn new(out: W) -> Self {
        Self::with_config(out, Config::default())
    }

    pub fn with_config(out: W, config: Config) -> Self {
        Interpreter {
            evaluator: Evaluator::with_config(config),
            environment: Environment::new(),
            out,
        }
    }

    /// Start from pre-populated bindings instead of an empty environment
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Run every top-level statement in order
    pub fn execute(&mut self, program: &Program) -> Result<(), EvalError> {
        debug!(statements = program.len(), "executing program");
        for stmt in &program.statements {
            self.run_statement(stmt)?;
        }
        self.out.flush().map_err(EvalError::Output)
    }

    /// Execute a single statement
    pub fn run_statement(&mut self, stmt: &Statement) -> Result<(), EvalError> {
        trace!(%stmt, "run statement");

        match stmt {
            Statement::Block(statements) => {
                for inner in statements {
                    self.run_statement(inner)?;
                }
                Ok(())
            }
            Statement::Empty => Ok(()),
            Statement::Assign { name, value } => {
                let value = self.evaluator.eval(value, &self.environment)?;
                self.environment.set(name.as_str(), value);
                Ok(())
            }
            Statement::Print(expr) => {
                let value = self.evaluator.eval(expr, &self.environment)?;
                writeln!(self.out, "{}", value).map_err(EvalError::Output)
            }
            Statement::If { condition, body } => {
                if self.evaluator.eval_bool(condition, &self.environment)? {
                    self.run_statement(body)?;
                }
                Ok(())
            }
        }
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Consume the interpreter, returning the output sink
    pub fn into_output(self) -> W {
        self.out
    }
}
