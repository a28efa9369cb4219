//! `tsh`: reads a source file, lexes and parses it, and evaluates the
//! resulting expression sequence.
//!
//! The argc/`help` shortcut and the file-open diagnostic are checked by
//! hand, before `clap` ever gets involved, since both require exact wording
//! and a status-0 exit on every path, not the generic usage text and
//! non-zero exit `clap` would produce on its own.

use std::fs;
use std::io::{stdin, stdout};

use log::debug;

use tsh::cli::{self, Cli};
use tsh::error::EvalError;
use tsh::interpreter::Interpreter;
use tsh::parser::Parser;

fn main() {
    let _ = simple_logger::init_with_level(log::Level::Warn);

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() != 1 || args[0] == "help" {
        cli::print_usage();
        std::process::exit(0);
    }

    let cli = Cli::init();

    let source = match fs::read_to_string(&cli.file) {
        Ok(source) => source,
        Err(_) => {
            println!("Error: file '{}' does not exist", cli.file.display());
            cli::print_help_hint();
            std::process::exit(0);
        }
    };

    debug!("running {}", cli.file.display());

    let program = match Parser::new(&source).parse_program() {
        Ok(program) => program,
        Err(err) => {
            println!("{err}");
            std::process::exit(0);
        }
    };

    let stdin = stdin();
    let mut interpreter = Interpreter::new(stdout(), stdin.lock());
    if let Err(err) = interpreter.run(&program) {
        print_fatal(&err);
        std::process::exit(0);
    }
}

fn print_fatal(err: &EvalError) {
    println!("{err}");
}
