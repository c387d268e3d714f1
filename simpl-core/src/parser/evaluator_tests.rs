#[cfg(test)]
mod program_tests {
    use crate::config::Config;
    use crate::parser::{parse_statements, EvalError, Interpreter, Value};

    /// Parse and execute `source`, returning the output and the result
    fn run(source: &str) -> (String, Result<(), EvalError>) {
        run_with(source, Config::default())
    }

    fn run_with(source: &str, config: Config) -> (String, Result<(), EvalError>) {
        let program = parse_statements(source).unwrap();
        let mut interpreter = Interpreter::with_config(Vec::new(), config);
        let result = interpreter.execute(&program);
        let output = String::from_utf8(interpreter.into_output()).unwrap();
        (output, result)
    }

    fn output_of(source: &str) -> String {
        let (output, result) = run(source);
        result.unwrap();
        output
    }

    #[test]
    fn test_assign_and_print() {
        assert_eq!(output_of("x := 5; print x + 2;"), "7\n");
    }

    #[test]
    fn test_division_prints_float() {
        assert_eq!(output_of("print 10 / 4;"), "2.5\n");
        assert_eq!(output_of("print 10 / 5;"), "2.0\n");
    }

    #[test]
    fn test_if_true_runs_body() {
        assert_eq!(output_of("if (True) print 1; print 2;"), "1\n2\n");
    }

    #[test]
    fn test_if_false_skips_body() {
        assert_eq!(output_of("if (False) print 1; print 2;"), "2\n");
    }

    #[test]
    fn test_print_comparison() {
        assert_eq!(output_of("a := 10; b := 20; print a == b;"), "False\n");
        assert_eq!(output_of("a := 10; b := 20; print a != b;"), "True\n");
        assert_eq!(output_of("print 2 * 3 == 6;"), "True\n");
        // an integer never equals a float
        assert_eq!(output_of("print 1 == 1.0;"), "False\n");
    }

    #[test]
    fn test_undefined_variable_prints_nothing() {
        let (output, result) = run("print x;");

        assert!(output.is_empty());
        assert!(matches!(result, Err(EvalError::UndefinedVariable(ref name)) if name == "x"));
    }

    #[test]
    fn test_output_before_error_is_kept() {
        let (output, result) = run("print 1; print 1 / 0; print 2;");

        assert_eq!(output, "1\n");
        assert!(matches!(result, Err(EvalError::DivisionByZero)));
    }

    #[test]
    fn test_runs_are_independent() {
        let source = "x := 1; if (True) { x := x + 1; print x; } print x * 2.5;";

        let first = output_of(source);
        let second = output_of(source);

        assert_eq!(first, "2\n5.0\n");
        assert_eq!(first, second);
    }

    #[test]
    fn test_block_shares_global_scope() {
        assert_eq!(output_of("{ y := 3; } print y;"), "3\n");
    }

    #[test]
    fn test_reassign_changes_kind() {
        assert_eq!(output_of("x := 1; x := x / 2; print x;"), "0.5\n");
    }

    #[test]
    fn test_nested_if() {
        let source = "if (True || False) if ((True && True) == True) { print 7; }";
        assert_eq!(output_of(source), "7\n");

        let source = "if (True && False) { print 1; } if (False != True) print 2;";
        assert_eq!(output_of(source), "2\n");
    }

    #[test]
    fn test_subtraction() {
        assert_eq!(output_of("print 10 - 3;"), "7\n");
        assert_eq!(output_of("print 1 - 2 - 3;"), "-4\n");
    }

    #[test]
    fn test_legacy_subtraction() {
        let config = Config::new().with_legacy_subtraction();
        let (output, result) = run_with("print 10 - 3; print 1.5 - 1;", config);

        result.unwrap();
        assert_eq!(output, "13\n2.5\n");
    }

    #[test]
    fn test_float_formatting() {
        assert_eq!(output_of("print 3e2;"), "300.0\n");
        assert_eq!(output_of("print .5 * 2;"), "1.0\n");
        assert_eq!(output_of("print 1e20;"), "1e+20\n");
        assert_eq!(output_of("print 1 / 100000;"), "1e-05\n");
    }

    #[test]
    fn test_overflow_is_an_error() {
        let (output, result) = run("big := 9223372036854775807; print big; print big + 1;");

        assert_eq!(output, "9223372036854775807\n");
        assert!(matches!(result, Err(EvalError::Overflow { .. })));
    }

    #[test]
    fn test_empty_statements_do_nothing() {
        assert_eq!(output_of(";;; { ; } ;"), "");
    }

    #[test]
    fn test_final_environment() {
        let program = parse_statements("a := 1; b := a * 2.0; c := b - a;").unwrap();
        let mut interpreter = Interpreter::new(Vec::new());
        interpreter.execute(&program).unwrap();

        let env = interpreter.environment();
        assert_eq!(env.get("a"), Some(&Value::Int(1)));
        assert_eq!(env.get("b"), Some(&Value::Float(2.0)));
        assert_eq!(env.get("c"), Some(&Value::Float(1.0)));
    }
}
