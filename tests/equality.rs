mod common;
use common::run;

#[test]
fn different_kinds_compare_unequal_without_erroring() {
    assert_eq!(run(r#"1 "a" == print"#), "false\n");
    assert_eq!(run(r#"1 "a" != print"#), "true\n");
}

#[test]
fn same_kind_same_value_compares_equal() {
    assert_eq!(run("1 1 == print"), "true\n");
}

#[test]
fn deep_equality_ignores_sharing() {
    assert_eq!(run("[1,[2,3]] [1,[2,3]] == print"), "true\n");
}

#[test]
fn typeof_round_trips_through_equality() {
    assert_eq!(run("1 typeof 1 typeof == print"), "true\n");
    assert_eq!(run(r#"1 typeof "a" typeof == print"#), "false\n");
}

#[test]
fn ordering_requires_both_operands_to_be_int() {
    let err = tsh::parser::Parser::new(r#"1 "a" < print"#)
        .parse_program()
        .unwrap();
    let mut out = Vec::new();
    let mut interp = tsh::interpreter::Interpreter::new(&mut out, std::io::empty());
    assert_eq!(
        interp.run(&err),
        Err(tsh::error::EvalError::Type {
            op: "<",
            expected: "int"
        })
    );
}
