use crate::config::{Config, SubtractionMode};
use crate::parser::ast::{Expression, Value};
use crate::parser::environment::Environment;
use crate::parser::error::EvalError;

/// Arithmetic operator after operand evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl ArithOp {
    fn symbol(self) -> &'static str {
        match self {
            ArithOp::Add => "+",
            ArithOp::Sub => "-",
            ArithOp::Mul => "*",
            ArithOp::Div => "/",
        }
    }
}

/// Evaluates parsed expressions into values
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator {
    config: Config,
}

impl Evaluator {
    /// Create a new evaluator with default options
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: Config) -> Self {
        Evaluator { config }
    }

    /// Evaluate an expression against the variables bound in `env`
    pub fn eval(&self, expr: &Expression, env: &Environment) -> Result<Value, EvalError> {
        match expr {
            Expression::IntLiteral(n) => Ok(Value::Int(*n)),
            Expression::FloatLiteral(x) => Ok(Value::Float(*x)),
            Expression::BoolLiteral(b) => Ok(Value::Bool(*b)),
            Expression::Var(name) => env
                .get(name)
                .copied()
                .ok_or_else(|| EvalError::UndefinedVariable(name.clone())),

            Expression::Add { left, right } => self.eval_arithmetic(ArithOp::Add, left, right, env),
            Expression::Sub { left, right } => {
                // legacy programs were written against a `-` that added
                let op = match self.config.subtraction {
                    SubtractionMode::Difference => ArithOp::Sub,
                    SubtractionMode::LegacySum => ArithOp::Add,
                };
                self.eval_arithmetic(op, left, right, env)
            }
            Expression::Mul { left, right } => self.eval_arithmetic(ArithOp::Mul, left, right, env),
            Expression::Div { left, right } => self.eval_arithmetic(ArithOp::Div, left, right, env),

            // Both operands are always evaluated; no short-circuit
            Expression::And { left, right } => {
                let l = self.eval_bool(left, env)?;
                let r = self.eval_bool(right, env)?;
                Ok(Value::Bool(l && r))
            }
            Expression::Or { left, right } => {
                let l = self.eval_bool(left, env)?;
                let r = self.eval_bool(right, env)?;
                Ok(Value::Bool(l || r))
            }

            // Kind-sensitive: 1 == 1.0 is False
            Expression::Eq { left, right } => {
                let l = self.eval(left, env)?;
                let r = self.eval(right, env)?;
                Ok(Value::Bool(l == r))
            }
            Expression::NotEq { left, right } => {
                let l = self.eval(left, env)?;
                let r = self.eval(right, env)?;
                Ok(Value::Bool(l != r))
            }
        }
    }

    /// Evaluate an expression that must produce a boolean
    pub fn eval_bool(&self, expr: &Expression, env: &Environment) -> Result<bool, EvalError> {
        match self.eval(expr, env)? {
            Value::Bool(b) => Ok(b),
            other => Err(EvalError::NotABoolean(other.type_name())),
        }
    }

    fn eval_arithmetic(
        &self,
        op: ArithOp,
        left: &Expression,
        right: &Expression,
        env: &Environment,
    ) -> Result<Value, EvalError> {
        let l = self.eval(left, env)?;
        let r = self.eval(right, env)?;
        apply(op, l, r)
    }
}

fn apply(op: ArithOp, left: Value, right: Value) -> Result<Value, EvalError> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => apply_int(op, a, b),
        (Value::Int(a), Value::Float(b)) => apply_float(op, a as f64, b),
        (Value::Float(a), Value::Int(b)) => apply_float(op, a, b as f64),
        (Value::Float(a), Value::Float(b)) => apply_float(op, a, b),
        (l, r) => Err(EvalError::TypeMismatch {
            operator: op.symbol(),
            left: l.type_name(),
            right: r.type_name(),
        }),
    }
}

fn apply_int(op: ArithOp, a: i64, b: i64) -> Result<Value, EvalError> {
    let result = match op {
        ArithOp::Add => a.checked_add(b),
        ArithOp::Sub => a.checked_sub(b),
        ArithOp::Mul => a.checked_mul(b),
        // `/` is true division even between integers
        ArithOp::Div => return apply_float(op, a as f64, b as f64),
    };

    result.map(Value::Int).ok_or(EvalError::Overflow {
        operator: op.symbol(),
        left: a,
        right: b,
    })
}

fn apply_float(op: ArithOp, a: f64, b: f64) -> Result<Value, EvalError> {
    let result = match op {
        ArithOp::Add => a + b,
        ArithOp::Sub => a - b,
        ArithOp::Mul => a * b,
        ArithOp::Div => {
            if b == 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            a / b
        }
    };
    Ok(Value::Float(result))
}
