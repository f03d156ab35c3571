//! # rfd-render - Debate judge feedback renderer
//!
//! Turns the JSON returned by the debate analysis backend into display-ready
//! HTML: the judge's verbal reason for decision (RFD) and the written,
//! speech-by-speech RFD.
//!
//! ## Features
//! - Section extraction from payloads of any shape
//! - Splitting of combined "Verbal RFD / Written RFD" blobs
//! - Escaped `<p>`/`<h3>` HTML, JSON, or wrapped plain-text output
//! - A stored "last result", and loading from analysis run directories

mod cli;
mod core;
mod run;
mod text;

use clap::Parser;
use dotenv::dotenv;

fn main() {
    // Load environment variables from .env file
    dotenv().ok();

    let args = cli::Args::parse();
    run::init_logger(&args);

    if let Err(e) = run::run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}
