use clap::Parser;
use renamo::cli::{Args, run_cli};
use renamo::output::OutputFormatter;
use std::process;

fn main() {
    let args = Args::parse();

    if let Err(message) = run_cli(args) {
        OutputFormatter::error(&message);
        process::exit(1);
    }
}
