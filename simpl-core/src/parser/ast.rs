use std::fmt;

/// A complete parsed program (top-level statement list)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Program {
    pub fn new(statements: Vec<Statement>) -> Self {
        Program { statements }
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

/// Statements of the simpl language
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Braced statement list: { x := 1; print x; }
    Block(Vec<Statement>),

    /// A lone semicolon
    Empty,

    /// Variable assignment: x := 1 + 2;
    Assign { name: String, value: Expression },

    /// Output statement: print x * 2;
    Print(Expression),

    /// Single-branch conditional: if (True && False) print 1;
    If {
        condition: Expression,
        body: Box<Statement>,
    },
}

/// Expressions of the simpl language
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Add {
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Sub {
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Mul {
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Div {
        left: Box<Expression>,
        right: Box<Expression>,
    },

    And {
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Or {
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Eq {
        left: Box<Expression>,
        right: Box<Expression>,
    },
    NotEq {
        left: Box<Expression>,
        right: Box<Expression>,
    },

    IntLiteral(i64),
    FloatLiteral(f64),
    BoolLiteral(bool),

    /// Variable reference
    Var(String),
}

impl Expression {
    pub fn add(left: Expression, right: Expression) -> Self {
        Expression::Add {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn sub(left: Expression, right: Expression) -> Self {
        Expression::Sub {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn mul(left: Expression, right: Expression) -> Self {
        Expression::Mul {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn div(left: Expression, right: Expression) -> Self {
        Expression::Div {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn and(left: Expression, right: Expression) -> Self {
        Expression::And {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn or(left: Expression, right: Expression) -> Self {
        Expression::Or {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn eq(left: Expression, right: Expression) -> Self {
        Expression::Eq {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn not_eq(left: Expression, right: Expression) -> Self {
        Expression::NotEq {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn var(name: impl Into<String>) -> Self {
        Expression::Var(name.into())
    }
}

/// Runtime value produced by evaluating an expression
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Value {
    /// Name of the value's kind, used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Bool(_) => "boolean",
        }
    }
}

/// Python-style float text: shortest round-trip digits, always marked as a
/// float, exponent form outside `1e-4 <= |x| < 1e16`
fn format_float(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    if value.is_nan() {
        return f.write_str("nan");
    }
    if value.is_infinite() {
        return f.write_str(if value > 0.0 { "inf" } else { "-inf" });
    }
    if value == 0.0 {
        return f.write_str(if value.is_sign_negative() { "-0.0" } else { "0.0" });
    }

    let scientific = format!("{:e}", value);
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((&scientific, "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if (-4..16).contains(&exponent) {
        let plain = value.to_string();
        if plain.contains('.') {
            f.write_str(&plain)
        } else {
            write!(f, "{}.0", plain)
        }
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        write!(f, "{}e{}{:02}", mantissa, sign, exponent.abs())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(x) => format_float(f, *x),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (op, left, right) = match self {
            Expression::Add { left, right } => ("+", left, right),
            Expression::Sub { left, right } => ("-", left, right),
            Expression::Mul { left, right } => ("*", left, right),
            Expression::Div { left, right } => ("/", left, right),
            Expression::And { left, right } => ("&&", left, right),
            Expression::Or { left, right } => ("||", left, right),
            Expression::Eq { left, right } => ("==", left, right),
            Expression::NotEq { left, right } => ("!=", left, right),

            Expression::IntLiteral(n) => return write!(f, "{}", n),
            // literals too large for f64 parse back to infinity
            Expression::FloatLiteral(x) if *x == f64::INFINITY => return f.write_str("1e999"),
            Expression::FloatLiteral(x) => return write!(f, "{:?}", x),
            Expression::BoolLiteral(true) => return f.write_str("True"),
            Expression::BoolLiteral(false) => return f.write_str("False"),
            Expression::Var(name) => return f.write_str(name),
        };
        write!(f, "({} {} {})", left, op, right)
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Block(statements) => {
                f.write_str("{")?;
                for stmt in statements {
                    write!(f, " {}", stmt)?;
                }
                f.write_str(" }")
            }
            Statement::Empty => f.write_str(";"),
            Statement::Assign { name, value } => write!(f, "{} := {};", name, value),
            // a comparison is only allowed unparenthesized after `print`
            Statement::Print(Expression::Eq { left, right }) => {
                write!(f, "print {} == {};", left, right)
            }
            Statement::Print(Expression::NotEq { left, right }) => {
                write!(f, "print {} != {};", left, right)
            }
            Statement::Print(expr) => write!(f, "print {};", expr),
            Statement::If { condition, body } => write!(f, "if ({}) {}", condition, body),
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, stmt) in self.statements.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Int(7).to_string(), "7");
        assert_eq!(Value::Int(-12).to_string(), "-12");
        assert_eq!(Value::Bool(true).to_string(), "True");
        assert_eq!(Value::Bool(false).to_string(), "False");
    }

    #[test]
    fn test_float_display() {
        assert_eq!(Value::Float(2.5).to_string(), "2.5");
        assert_eq!(Value::Float(5.0).to_string(), "5.0");
        assert_eq!(Value::Float(0.0).to_string(), "0.0");
        assert_eq!(Value::Float(0.1 + 0.2).to_string(), "0.30000000000000004");
        assert_eq!(Value::Float(1e15).to_string(), "1000000000000000.0");
        assert_eq!(Value::Float(1e16).to_string(), "1e+16");
        assert_eq!(Value::Float(1.5e20).to_string(), "1.5e+20");
        assert_eq!(Value::Float(0.0001).to_string(), "0.0001");
        assert_eq!(Value::Float(0.00001).to_string(), "1e-05");
        assert_eq!(Value::Float(-2.5e-7).to_string(), "-2.5e-07");
    }

    #[test]
    fn test_value_equality_is_kind_sensitive() {
        assert_eq!(Value::Int(1), Value::Int(1));
        assert_ne!(Value::Int(1), Value::Float(1.0));
        assert_ne!(Value::Bool(true), Value::Int(1));
    }

    #[test]
    fn test_expression_display() {
        let expr = Expression::add(
            Expression::var("x"),
            Expression::mul(Expression::IntLiteral(2), Expression::FloatLiteral(0.5)),
        );
        assert_eq!(expr.to_string(), "(x + (2 * 0.5))");
    }

    #[test]
    fn test_infinite_float_literal_display() {
        assert_eq!(Expression::FloatLiteral(f64::INFINITY).to_string(), "1e999");
        assert_eq!(Expression::FloatLiteral(1e300).to_string(), "1e300");
    }

    #[test]
    fn test_statement_display() {
        let stmt = Statement::If {
            condition: Expression::and(
                Expression::BoolLiteral(true),
                Expression::BoolLiteral(false),
            ),
            body: Box::new(Statement::Block(vec![
                Statement::Assign {
                    name: "x".to_string(),
                    value: Expression::IntLiteral(1),
                },
                Statement::Print(Expression::eq(Expression::var("x"), Expression::var("y"))),
                Statement::Empty,
            ])),
        };

        assert_eq!(
            stmt.to_string(),
            "if ((True && False)) { x := 1; print x == y; ; }"
        );
    }
}
