use clap::Parser;
use std::process;
use sustainability_intake::cli::{Args, run};

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    match run(args) {
        Ok(()) => {
            // Per-file problems have already been reported as notices
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}
