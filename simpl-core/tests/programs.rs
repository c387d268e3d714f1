use simpl_core::{parse_reader, parse_str, run_str, run_str_with_config, Config, Error, EvalError};
use std::io::Cursor;

#[test]
fn test_run_str_output() {
    let source = r#"
        total := 0;
        step := 2.5;
        {
            total := total + 1;
            total := total * step;
        }
        print total;
        if ((True || False) == True) print total / 5;
    "#;

    assert_eq!(run_str(source).unwrap(), "2.5\n0.5\n");
}

#[test]
fn test_errors_are_tagged_by_stage() {
    assert!(matches!(run_str("x := #;"), Err(Error::Lex(_))));
    assert!(matches!(run_str("x := ;"), Err(Error::Parse(_))));
    assert!(matches!(
        run_str("print nope;"),
        Err(Error::Eval(EvalError::UndefinedVariable(_)))
    ));
}

#[test]
fn test_error_messages() {
    let err = run_str("x := 1;\ny := x $ 2;").unwrap_err();
    assert_eq!(err.to_string(), "lexical error: unexpected character '$' at 2:8");

    let err = run_str("print (1 + 2;").unwrap_err();
    assert_eq!(err.to_string(), "syntax error: expected ')', found ';' at 1:13");

    let err = run_str("print 1 / 0.0;").unwrap_err();
    assert_eq!(err.to_string(), "runtime error: division by zero");
}

#[test]
fn test_keywords_are_case_sensitive() {
    // `true` is an ordinary identifier
    assert_eq!(run_str("true := 1; print true;").unwrap(), "1\n");
    assert!(run_str("if (true) print 1;").is_err());
}

#[test]
fn test_reader_and_string_parse_agree() {
    let source = "a := 1;\nif (True) {\n  print a * 3;\n}\n";

    let from_str = parse_str(source).unwrap();
    let from_reader = parse_reader(Cursor::new(source)).unwrap();

    assert_eq!(from_str, from_reader);
    assert_eq!(from_str.len(), 2);
}

#[test]
fn test_same_program_twice() {
    let source = "n := 3; n := n * n; print n; print n == 9;";

    assert_eq!(run_str(source).unwrap(), "9\nTrue\n");
    assert_eq!(run_str(source).unwrap(), run_str(source).unwrap());
}

#[test]
fn test_legacy_subtraction_config() {
    let legacy = Config::new().with_legacy_subtraction();

    assert_eq!(run_str_with_config("print 4 - 1;", legacy).unwrap(), "5\n");
    assert_eq!(run_str("print 4 - 1;").unwrap(), "3\n");
}

#[test]
fn test_empty_source() {
    assert_eq!(run_str("").unwrap(), "");
    assert!(parse_str("  ;  ").unwrap().len() == 1);
}

#[test]
fn test_deep_nesting_is_a_syntax_error() {
    let source = format!("print {}1{};", "(".repeat(3000), ")".repeat(3000));
    let err = run_str(&source).unwrap_err();

    assert!(matches!(err, Error::Parse(_)));
    assert!(err.to_string().starts_with("syntax error: nesting deeper than 256 levels"));
}
