//! TreeForge CLI Binary
//!
//! Command-line interface for browsing and editing a file tree.

use clap::Parser;
use std::process;
use treeforge::tooling::cli::{Cli, CliContext};

fn main() {
    let cli = Cli::parse();

    let context = match CliContext::new(&cli) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error initializing tree: {}", e);
            process::exit(1);
        }
    };

    match context.execute(&cli.command) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
