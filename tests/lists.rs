mod common;
use common::run;

#[test]
fn len_reports_element_count() {
    assert_eq!(run("[1,2,3] len print"), "3\n");
}

#[test]
fn nested_indexing_reads_through_two_levels() {
    assert_eq!(run("[[1,2],[3,4]] -> g g[1][0] print"), "3\n");
}

#[test]
fn append_with_no_index_extends_the_top_level_list() {
    assert_eq!(run("[1,2] 3 append -> l l print"), "[1, 2, 3]\n");
}

#[test]
fn append_with_an_index_mutates_the_nested_list() {
    assert_eq!(
        run("[[1,2],[3]] 9 append[1] -> l l print"),
        "[[1, 2], [3, 9]]\n"
    );
}

#[test]
fn append_index_out_of_range_is_fatal() {
    let program = tsh::parser::Parser::new("[1,2] 9 append[5]").parse_program().unwrap();
    let mut out = Vec::new();
    let mut interp = tsh::interpreter::Interpreter::new(&mut out, std::io::empty());
    assert_eq!(
        interp.run(&program),
        Err(tsh::error::EvalError::IndexOutOfRange)
    );
}

#[test]
fn list_printing_quotes_strings_only_inside_lists() {
    assert_eq!(run(r#"["a", "b"] print"#), "['a', 'b']\n");
}

#[test]
fn index_out_of_range_on_read_is_fatal() {
    let program = tsh::parser::Parser::new("[1,2] -> a a[5] print")
        .parse_program()
        .unwrap();
    let mut out = Vec::new();
    let mut interp = tsh::interpreter::Interpreter::new(&mut out, std::io::empty());
    assert_eq!(
        interp.run(&program),
        Err(tsh::error::EvalError::IndexOutOfRange)
    );
}
