mod common;
use common::{run, run_with_input};

#[test]
fn input_reads_one_whitespace_delimited_token() {
    assert_eq!(run_with_input("input print", "hello world\n"), "hello\n");
}

#[test]
fn input_skips_leading_whitespace() {
    assert_eq!(run_with_input("input print", "   first second"), "first\n");
}

#[test]
fn prints_dumps_the_stack_bottom_to_top_with_an_arrow() {
    assert_eq!(run("1 2 printS"), "PrintS <2> 1 2 \u{2190} top\n");
}

#[test]
fn printc_dumps_the_stack_without_a_prefix() {
    assert_eq!(run("1 2 printC"), "1 2  \n");
}
