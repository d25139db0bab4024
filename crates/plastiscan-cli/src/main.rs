//! Plastiscan - plastic grade scanner demo
//!
//! Scans a photo of a plastic item, names its resin code and estimates the
//! environmental impact of the item.

mod cli;
mod commands;
mod output;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = commands::execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
