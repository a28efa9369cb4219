//! CLI argument handling. `Cli` only covers the single positional file
//! argument; the argc/`help` shortcut and the file-open diagnostic live in
//! `main.rs` since neither maps onto what `clap` gives you for free (exact
//! wording and a 0 exit status on every path).
//!
//! A thin `clap::Parser` derive struct with an `init` constructor.

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "tsh", about = "Tree-walking interpreter for the tsh stack language.")]
pub struct Cli {
    /// Path to the `.t#` source file to run.
    pub file: std::path::PathBuf,
}

impl Cli {
    pub fn init() -> Self {
        Cli::parse()
    }
}

/// The two-line usage banner printed for `tsh help` or a wrong argument
/// count.
pub fn print_usage() {
    println!("Usage:");
    println!("  tsh <filename>.t#");
}

/// The coloured "run tsh help" hint printed after a file-open failure:
/// white text on a cyan background.
pub fn print_help_hint() {
    use colored::Colorize;
    print!("Run ");
    print!("{}", " tsh help ".white().on_cyan());
    println!(" for usage");
}
