//! Shared test helpers. Runs a program through the real lexer, parser and
//! evaluator and captures its stdout, replacing the teacher's
//! subprocess-spawning `test-utils` crate (`H1ghBre4k3r/y-lang`) — there is
//! no compiled executable artifact here to spawn, so the `Interpreter`'s
//! `impl Write`/`impl BufRead` generics are used for in-process capture
//! instead.

use std::io::Cursor;

use tsh::interpreter::Interpreter;
use tsh::parser::Parser;

#[allow(dead_code)]
pub fn run(source: &str) -> String {
    run_with_input(source, "")
}

#[allow(dead_code)]
pub fn run_with_input(source: &str, input: &str) -> String {
    let program = Parser::new(source)
        .parse_program()
        .unwrap_or_else(|err| panic!("unexpected parse failure: {err}"));
    let mut out = Vec::new();
    let mut interpreter = Interpreter::new(&mut out, Cursor::new(input.as_bytes().to_vec()));
    interpreter
        .run(&program)
        .unwrap_or_else(|err| panic!("unexpected runtime failure: {err}"));
    String::from_utf8(out).expect("program output is valid utf-8")
}

#[allow(dead_code)]
pub fn parse_err(source: &str) -> String {
    Parser::new(source)
        .parse_program()
        .expect_err("expected a syntax error")
        .to_string()
}
