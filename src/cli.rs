//! CLI definitions: argument parsing, subcommands, and help text.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

pub use clap_complete::generate;

const AFTER_HELP: &str = "\
EXAMPLES:
  rfd-render                              Render the stored result as HTML
  rfd-render render result.json           Render a saved analysis response
  curl ... | rfd-render render -          Read the payload from stdin
  rfd-render render result.json -f text   Terminal preview
  rfd-render sections result.json         Show the extracted verbal/written text
  rfd-render workdir /tmp/run/ --store    Load a run directory and keep it as the stored result
  rfd-render config                       Show paths and settings
";

/// Command-line arguments for the application.
#[derive(Parser)]
#[command(
    author,
    version,
    about = "Render debate judge feedback (RFD) into HTML",
    after_help = AFTER_HELP
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Increase log verbosity (use multiple times for debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Reduce log output (errors only)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render feedback sections (default: both, as HTML)
    Render {
        /// Payload file, '-' for stdin, or omit to use the stored result
        input: Option<String>,
        /// Which section to render
        #[arg(short, long, value_enum, default_value_t = Section::Both)]
        section: Section,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Html)]
        format: OutputFormat,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the extracted verbal/written sections as JSON
    Sections {
        /// Payload file, '-' for stdin, or omit to use the stored result
        input: Option<String>,
    },
    /// Summarize status, scores, flow notes, and sections
    Report {
        /// Payload file, '-' for stdin, or omit to use the stored result
        input: Option<String>,
    },
    /// Keep a payload as the stored result
    Store {
        /// Payload file or '-' for stdin
        input: String,
    },
    /// Remove the stored result
    Clear,
    /// Build a payload from an analysis run directory
    Workdir {
        /// Run directory containing judge_feedback.json or judging_feedback.txt
        dir: PathBuf,
        /// Keep the payload as the stored result instead of printing it
        #[arg(long)]
        store: bool,
    },
    /// Show paths and settings
    Config,
    /// Generate shell completion script
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        #[arg(value_parser = clap::value_parser!(Shell))]
        shell: Shell,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Section {
    Verbal,
    Written,
    Both,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `<p>`/`<h3>` fragments
    Html,
    /// Full report as JSON
    Json,
    /// Wrapped plain text
    Text,
}

impl Args {
    /// Log level based on -v/-q flags: error, warn, info, or debug.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose >= 2 {
            "debug"
        } else if self.verbose >= 1 {
            "info"
        } else {
            "warn"
        }
    }
}
