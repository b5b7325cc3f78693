//! The `impcomb` binary.

#![warn(missing_docs)]

use impcomb::cli::Cli;

fn main() {
    better_panic::install();

    if let Err(err) = argh::from_env::<Cli>().handle() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
