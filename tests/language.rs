use keel::{
    format_source,
    interpreter::{lexer::Lexer, object::Object, parser::Parser},
    run_source,
};

fn eval_number(src: &str) -> String {
    match run_source(src) {
        Ok(Some(Object::Number(text))) => text,
        other => panic!("expected a number from {src:?}, got {other:?}"),
    }
}

fn eval_bool(src: &str) -> bool {
    match run_source(src) {
        Ok(Some(Object::Boolean(b))) => b,
        other => panic!("expected a boolean from {src:?}, got {other:?}"),
    }
}

fn eval_err(src: &str) -> String {
    match run_source(src) {
        Err(e) => e.to_string(),
        Ok(v) => panic!("expected {src:?} to fail, got {v:?}"),
    }
}

#[test]
fn precedence_and_grouping() {
    assert_eq!(eval_number("1 + 2 * 3\n"), "7");
    assert_eq!(eval_number("(1 + 2) * 3\n"), "9");
    assert_eq!(eval_number("1 + 6 / 2\n"), "4");
}

#[test]
fn operators_are_left_associative() {
    assert_eq!(eval_number("10 - 2 - 3\n"), "5");
    assert_eq!(eval_number("20 / 2 / 5\n"), "2");
    assert_eq!(eval_number("2 * 3 * 4\n"), "24");
}

#[test]
fn integer_versus_float_per_operation() {
    assert_eq!(eval_number("1 + 1\n"), "2");
    assert_eq!(eval_number("1.5 + 1\n"), "2.5");
    // A float operand with a whole result still prints minimally.
    assert_eq!(eval_number("1.0 + 1\n"), "2");
    assert_eq!(eval_number("2.0 * 1.5\n"), "3");
}

#[test]
fn integer_division_truncates_toward_zero() {
    assert_eq!(eval_number("7 / 2\n"), "3");
    assert_eq!(eval_number("(0 - 7) / 2\n"), "-3");
}

#[test]
fn equality_compares_literal_text() {
    assert!(eval_bool("1 == 1\n"));
    assert!(eval_bool("1 != 2\n"));
    // Numerically equal, textually different: unequal by specification.
    assert!(!eval_bool("1 == 1.0\n"));
    assert!(eval_bool("1 != 1.0\n"));
}

#[test]
fn division_by_zero_fails_on_both_paths() {
    assert!(eval_err("1 / 0\n").contains("division by zero"));
    assert!(eval_err("1.0 / 0\n").contains("division by zero"));
    assert!(eval_err("1 / 0.0\n").contains("division by zero"));
}

#[test]
fn undefined_identifier_fails() {
    let message = eval_err("ghost\n");
    assert!(message.contains("undefined identifier 'ghost'"));
}

#[test]
fn runtime_errors_carry_the_source_line() {
    let message = eval_err("let a = 1\nghost\n");
    assert!(message.contains("line 2"), "{message}");
}

#[test]
fn let_binds_and_rebinding_overwrites() {
    assert_eq!(eval_number("let x = 5\nlet y = x\ny\n"), "5");
    assert_eq!(eval_number("let x = 1\nlet x = 2\nx\n"), "2");
}

#[test]
fn string_values_and_illegal_operands() {
    match run_source("let s = \"hi\"\ns\n") {
        Ok(Some(Object::String(text))) => assert_eq!(text, "hi"),
        other => panic!("expected a string, got {other:?}"),
    }
    assert!(eval_err("\"a\" + \"b\"\n").contains("illegal operands"));
    assert!(eval_err("1 + \"b\"\n").contains("illegal operands"));
}

#[test]
fn null_literal_evaluates_to_null() {
    match run_source("null\n") {
        Ok(Some(Object::Null)) => {},
        other => panic!("expected null, got {other:?}"),
    }
}

#[test]
fn functions_return_explicitly_or_fall_through() {
    let explicit = "func f() {\n    return 40 + 2\n}\nf()\n";
    assert_eq!(eval_number(explicit), "42");

    let implicit = "func f() {\n    40 + 2\n}\nf()\n";
    assert_eq!(eval_number(implicit), "42");
}

#[test]
fn early_return_stops_the_block() {
    let src = "func f() {\n    return 1\n    return 2\n}\nf()\n";
    assert_eq!(eval_number(src), "1");
}

#[test]
fn top_level_return_stops_the_program() {
    // The second statement would fail; the early return must win.
    assert_eq!(eval_number("return 7\nghost\n"), "7");
}

#[test]
fn closures_capture_the_definition_scope() {
    let src = "func make_adder(x) {\n    func add(y) {\n        return x + y\n    }\n    return add\n}\nlet add2 = make_adder(2)\nadd2(40)\n";
    assert_eq!(eval_number(src), "42");
}

#[test]
fn closures_ignore_call_site_bindings() {
    let src = "func outer() {\n    let captured = 1\n    func inner() {\n        return captured\n    }\n    return inner\n}\nlet f = outer()\nlet captured = 99\nf()\n";
    assert_eq!(eval_number(src), "1");
}

#[test]
fn arity_mismatch_is_an_error() {
    let src = "func add(a, b) {\n    return a + b\n}\nadd(1)\n";
    assert!(eval_err(src).contains("expected 2 arguments, got 1"));

    let src = "func add(a, b) {\n    return a + b\n}\nadd(1, 2, 3)\n";
    assert!(eval_err(src).contains("expected 2 arguments, got 3"));
}

#[test]
fn calling_a_non_function_fails() {
    assert!(eval_err("let x = 1\nx()\n").contains("not callable"));
}

#[test]
fn failing_argument_is_reported_by_position() {
    assert!(eval_err("print(1 / 0)\n").contains("argument 0"));
}

#[test]
fn builtin_print_produces_no_value() {
    match run_source("print(1, 2)\n") {
        Ok(None) => {},
        other => panic!("expected no value, got {other:?}"),
    }
}

#[test]
fn builtin_print_accepts_zero_arguments() {
    use keel::interpreter::evaluator::builtin::print;

    // No arguments writes nothing and yields nothing.
    assert!(matches!(print(&[], 1), Ok(None)));
    assert!(matches!(run_source("print()\n"), Ok(None)));
}

#[test]
fn builtins_resolve_after_the_environment() {
    // Bare builtin name resolves to the builtin itself...
    match run_source("print\n") {
        Ok(Some(Object::Builtin { name, .. })) => assert_eq!(name, "print"),
        other => panic!("expected the print builtin, got {other:?}"),
    }
    // ...unless a binding shadows it.
    assert_eq!(eval_number("let print = 3\nprint\n"), "3");
}

#[test]
fn custom_builtin_registries_are_independent() {
    use std::{cell::RefCell, rc::Rc};

    use keel::{
        error::RuntimeError,
        interpreter::{
            environment::Environment,
            evaluator::core::{BuiltinRegistry, Evaluator},
            object::BuiltinFn,
        },
    };

    fn answer(_args: &[Object], _line: usize) -> Result<Option<Object>, RuntimeError> {
        Ok(Some(Object::Number("42".to_string())))
    }

    let mut registry = BuiltinRegistry::new();
    registry.insert("answer".to_string(), answer as BuiltinFn);

    let mut parser = Parser::new(Lexer::new("answer()\n"));
    let program = parser.parse_program();
    assert!(parser.errors().is_empty());

    let env = Rc::new(RefCell::new(Environment::new()));
    let evaluator = Evaluator::with_builtins(registry);
    match evaluator.eval_program(&program, &env) {
        Ok(Some(Object::Number(text))) => assert_eq!(text, "42"),
        other => panic!("expected 42, got {other:?}"),
    }

    // The default registry knows nothing about 'answer'.
    assert!(eval_err("answer()\n").contains("undefined identifier"));
}

#[test]
fn prefix_operator_parses_but_does_not_evaluate() {
    assert!(eval_err("!1\n").contains("unsupported node"));
}

#[test]
fn comparison_operators_parse_but_do_not_evaluate() {
    assert!(eval_err("1 < 2\n").contains("not supported"));
    assert!(eval_err("1 >= 2\n").contains("not supported"));
}

#[test]
fn parser_recovers_after_a_malformed_statement() {
    let mut parser = Parser::new(Lexer::new("let = 5\nlet y = 10\ny\n"));
    let program = parser.parse_program();

    let messages: Vec<String> = parser.errors().iter().map(ToString::to_string).collect();
    assert!(!messages.is_empty());
    assert!(messages[0].contains("expected next token to be IDENT, got ="));

    // The well-formed remainder still parsed completely.
    let formatted = program.to_string();
    assert!(formatted.contains("let y = 10"), "{formatted}");
    assert!(formatted.contains("\ny\n"), "{formatted}");
}

#[test]
fn parse_errors_are_reported_as_a_batch() {
    let message = eval_err("let = 5\n");
    assert!(message.contains("parser errors"), "{message}");
}

#[test]
fn unclosed_block_is_a_diagnostic_not_a_crash() {
    let mut parser = Parser::new(Lexer::new("func f() {\n    let x = 1\n"));
    let _ = parser.parse_program();
    let messages: Vec<String> = parser.errors().iter().map(ToString::to_string).collect();
    assert!(messages.iter().any(|m| m.contains("never closed")), "{messages:?}");
}

#[test]
fn no_prefix_parse_function_is_a_diagnostic() {
    let mut parser = Parser::new(Lexer::new("let x = if\n"));
    let _ = parser.parse_program();
    let messages: Vec<String> = parser.errors().iter().map(ToString::to_string).collect();
    assert!(
        messages.iter().any(|m| m.contains("no prefix parse function for if")),
        "{messages:?}"
    );
}

#[test]
fn formatting_is_canonical_and_idempotent() {
    let src = "func add(a, b) {\n    return a + b\n}\nlet total = add(1, 2 * 3) - 4\nprint(\"total\", total)\n(1 + 2) * 3\n";
    let once = format_source(src).unwrap();
    assert_eq!(once, src);
    let twice = format_source(&once).unwrap();
    assert_eq!(twice, once);
}

#[test]
fn formatting_normalizes_spacing_and_terminators() {
    assert_eq!(format_source("let   x=1+2\n").unwrap(), "let x = 1 + 2\n");
    assert_eq!(format_source("1;2\n").unwrap(), "1\n2\n");
    assert_eq!(format_source("\n\n1\n\n\n").unwrap(), "1\n");
}

#[test]
fn formatting_preserves_necessary_parentheses() {
    let once = format_source("(1 + 2) * 3\n").unwrap();
    assert_eq!(once, "(1 + 2) * 3\n");
    // Redundant grouping disappears; grouping that changes the tree stays.
    assert_eq!(format_source("(1 * 2) + 3\n").unwrap(), "1 * 2 + 3\n");
    assert_eq!(format_source("10 - (2 - 3)\n").unwrap(), "10 - (2 - 3)\n");
}

#[test]
fn call_callees_keep_their_parentheses() {
    // A grouped callee must serialize back with its parentheses; without
    // them the text reparses as a different tree (1 + 2(3)).
    let mut parser = Parser::new(Lexer::new("(1 + 2)(3)\n"));
    let first = parser.parse_program();
    assert!(parser.errors().is_empty());

    let serialized = first.to_string();
    assert_eq!(serialized, "(1 + 2)(3)\n");

    let mut parser = Parser::new(Lexer::new(&serialized));
    let second = parser.parse_program();
    assert!(parser.errors().is_empty());
    assert_eq!(first, second);

    assert_eq!(format_source("(!f)(1)\n").unwrap(), "(!f)(1)\n");
    // Evaluation still rejects the non-function callee.
    assert!(eval_err("(1 + 2)(3)\n").contains("not callable"));
}

#[test]
fn integer_arithmetic_is_checked() {
    assert!(eval_err("9223372036854775807 + 1\n").contains("integer overflow"));
    assert!(eval_err("0 - 9223372036854775807 - 2\n").contains("integer overflow"));
    // A literal too large for 64 bits fails at the operation that reads it.
    assert!(eval_err("99999999999999999999 + 1\n").contains("cannot parse number"));
}

#[test]
fn nested_functions_format_with_nested_indentation() {
    let src = "func outer() {\n    func inner() {\n        return 1\n    }\n    return inner\n}\n";
    assert_eq!(format_source(src).unwrap(), src);
}

#[test]
fn empty_programs_are_fine() {
    assert!(matches!(run_source(""), Ok(None)));
    assert_eq!(format_source("").unwrap(), "");
    assert_eq!(format_source("\n\n").unwrap(), "");
}

#[test]
fn line_comments_are_skipped() {
    assert_eq!(eval_number("let x = 1 // the answer, eventually\nx + 41\n"), "42");
}

#[test]
fn hash_keys_separate_kinds_but_share_the_text_hash() {
    let number = Object::Number("1".to_string());
    let string = Object::String("1".to_string());
    let n = number.hash_key().unwrap();
    let s = string.hash_key().unwrap();
    assert_eq!(n.key, s.key);
    assert_ne!(n, s);
    assert!(Object::Null.hash_key().is_none());
    assert_eq!(n, number.hash_key().unwrap());
}
