mod common;
use common::run;

#[test]
fn import_of_block_only_file_makes_the_block_callable() {
    let out = run(r#"import "tests/fixtures/greet.t" call greet"#);
    assert_eq!(out, "hello from import\n");
}

#[test]
fn importing_a_missing_file_is_fatal() {
    let program = tsh::parser::Parser::new(r#"import "tests/fixtures/does-not-exist.t""#)
        .parse_program()
        .unwrap();
    let mut out = Vec::new();
    let mut interp = tsh::interpreter::Interpreter::new(&mut out, std::io::empty());
    assert!(interp.run(&program).is_err());
}
