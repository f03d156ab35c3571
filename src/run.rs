//! Application run modes: logger init, payload input, and one runner per subcommand.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use clap::CommandFactory;

use crate::cli::{self, Args, Commands, OutputFormat, Section};
use crate::core::config::{self, Config, ConfigError};
use crate::core::extract::extract_sections;
use crate::core::payload::{FeedbackPayload, PayloadError};
use crate::core::report::{AnalysisStatus, FeedbackReport, render_flow_notes_html};
use crate::core::store::{self, StoreError};
use crate::core::workdir::{self, WorkDirError};
use crate::core::{app, paths};
use crate::text;

/// Errors surfaced to the user by the binary.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// Neither section had content.
    #[error("No formatted feedback found")]
    NoFeedback,
    #[error("Analysis failed: {0}")]
    AnalysisFailed(String),
    #[error("No stored result; pass a payload file or run `rfd-render store <FILE>`")]
    NoStoredResult,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Payload(#[from] PayloadError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    WorkDir(#[from] WorkDirError),
    #[error("Failed to write output: {0}")]
    Output(#[source] io::Error),
}

impl RunError {
    /// Process exit code: 2 when there is nothing to show, 1 for every other failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            RunError::NoFeedback => 2,
            _ => 1,
        }
    }
}

/// Initialize env_logger on stderr. `RUST_LOG` overrides the -v/-q level.
pub fn init_logger(args: &Args) {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(args.log_level()),
    )
    .try_init();
}

/// Run the selected subcommand. No subcommand renders the stored result as HTML.
pub fn run(args: Args) -> Result<(), RunError> {
    let command = args.command.unwrap_or(Commands::Render {
        input: None,
        section: Section::Both,
        format: OutputFormat::Html,
        output: None,
    });

    match command {
        Commands::Config => {
            run_config();
            Ok(())
        }
        Commands::Completions { shell } => {
            let mut cmd = Args::command();
            cli::generate(shell, &mut cmd, app::NAME, &mut io::stdout());
            Ok(())
        }
        Commands::Render {
            input,
            section,
            format,
            output,
        } => run_render(
            &config::load()?,
            input.as_deref(),
            section,
            format,
            output.as_deref(),
        ),
        Commands::Sections { input } => run_sections(&config::load()?, input.as_deref()),
        Commands::Report { input } => run_report(&config::load()?, input.as_deref()),
        Commands::Store { input } => run_store(&config::load()?, &input),
        Commands::Clear => run_clear(&config::load()?),
        Commands::Workdir { dir, store: keep } => run_workdir(&config::load()?, &dir, keep),
    }
}

/// Read a payload from a file, stdin (`-`), or the stored result (`None`).
fn read_payload(input: Option<&str>, config: &Config) -> Result<FeedbackPayload, RunError> {
    match input {
        Some("-") => {
            let content = io::read_to_string(io::stdin()).map_err(PayloadError::from)?;
            Ok(FeedbackPayload::parse(&content)?)
        }
        Some(path) => {
            let content = fs::read_to_string(path).map_err(PayloadError::from)?;
            Ok(FeedbackPayload::parse(&content)?)
        }
        None => {
            let stored = store::load(&config.results_file)?.ok_or(RunError::NoStoredResult)?;
            log::info!("Using stored result saved at {}", stored.saved_at);
            Ok(stored.payload())
        }
    }
}

/// Build the report, refusing payloads with nothing to show.
fn checked_report(payload: &FeedbackPayload) -> Result<FeedbackReport, RunError> {
    let report = FeedbackReport::build(payload);
    if let AnalysisStatus::Failed(message) = &report.status {
        if !report.has_feedback() {
            return Err(RunError::AnalysisFailed(message.clone()));
        }
        log::warn!(
            "Backend reported a failure ({}); rendering the feedback it returned",
            message
        );
    }
    if !report.has_feedback() {
        return Err(RunError::NoFeedback);
    }
    Ok(report)
}

fn run_render(
    config: &Config,
    input: Option<&str>,
    section: Section,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<(), RunError> {
    let payload = read_payload(input, config)?;
    let report = checked_report(&payload)?;
    let rendered = match format {
        OutputFormat::Html => render_html(&report, section),
        OutputFormat::Json => serde_json::to_string_pretty(&report).map_err(PayloadError::from)?,
        OutputFormat::Text => render_text(&report, section, config.wrap_width),
    };
    write_output(&rendered, output)
}

fn render_html(report: &FeedbackReport, section: Section) -> String {
    match section {
        Section::Verbal => report.verbal_html.clone(),
        Section::Written => report.written_html.clone(),
        Section::Both => {
            let mut out = format!(
                "<!-- verbal -->\n{}\n<!-- written -->\n{}",
                report.verbal_html, report.written_html
            );
            if !report.flow_notes.is_empty() {
                out.push_str("\n<!-- flow notes -->\n");
                out.push_str(&render_flow_notes_html(&report.flow_notes));
            }
            out
        }
    }
}

fn render_text(report: &FeedbackReport, section: Section, width: usize) -> String {
    let verbal = text::format_verbal_plain(&report.sections.verbal, width);
    let written = text::format_written_plain(&report.sections.written, width);
    match section {
        Section::Verbal => verbal,
        Section::Written => written,
        Section::Both => format!(
            "{}\n\n{}\n\n{}\n\n{}",
            underlined("VERBAL RFD"),
            verbal,
            underlined("WRITTEN RFD"),
            written
        ),
    }
}

fn underlined(title: &str) -> String {
    format!("{}\n{}", title, "=".repeat(title.len()))
}

fn write_output(rendered: &str, output: Option<&Path>) -> Result<(), RunError> {
    match output {
        Some(path) => {
            fs::write(path, format!("{}\n", rendered)).map_err(RunError::Output)?;
            log::info!("Wrote {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", rendered).map_err(RunError::Output)?;
        }
    }
    Ok(())
}

fn run_sections(config: &Config, input: Option<&str>) -> Result<(), RunError> {
    let payload = read_payload(input, config)?;
    let sections = extract_sections(&payload);
    let json = serde_json::to_string_pretty(&sections).map_err(PayloadError::from)?;
    write_output(&json, None)
}

fn run_report(config: &Config, input: Option<&str>) -> Result<(), RunError> {
    let payload = read_payload(input, config)?;
    let report = FeedbackReport::build(&payload);
    let mut lines = Vec::new();

    lines.push(match &report.status {
        AnalysisStatus::Ok => "Status:     ok".to_string(),
        AnalysisStatus::Failed(message) => format!("Status:     failed ({})", message),
    });
    lines.push(format!("Argument:   {}", score_label(report.scores.argument)));
    lines.push(format!("Delivery:   {}", score_label(report.scores.delivery)));
    lines.push(format!("Verbal:     {}", section_label(&report.sections.verbal)));
    lines.push(format!("Written:    {}", section_label(&report.sections.written)));
    lines.push(format!("Flow notes: {}", report.flow_notes.len()));
    for note in &report.flow_notes {
        let label = [note.speech.as_str(), note.time.as_str()]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" @ ");
        let label = if label.is_empty() { "-".to_string() } else { label };
        lines.push(format!("  {}: {}", label, first_line(&note.notes)));
    }
    if !report.has_feedback() {
        lines.push("No formatted feedback found".to_string());
    }
    write_output(&lines.join("\n"), None)
}

fn score_label(score: Option<i64>) -> String {
    score.map_or_else(|| "—".to_string(), |s| s.to_string())
}

fn section_label(text: &str) -> String {
    if text.is_empty() {
        "not provided".to_string()
    } else {
        format!("{} chars", text.chars().count())
    }
}

fn first_line(s: &str) -> &str {
    s.lines().next().unwrap_or("").trim()
}

fn run_store(config: &Config, input: &str) -> Result<(), RunError> {
    let payload = read_payload(Some(input), config)?;
    if extract_sections(&payload).is_empty() {
        log::warn!("Stored payload has no feedback sections");
    }
    store::save(&config.results_file, &payload)?;
    println!("Stored result saved to {}", config.results_file.display());
    Ok(())
}

fn run_clear(config: &Config) -> Result<(), RunError> {
    if store::clear(&config.results_file)? {
        println!("Removed {}", config.results_file.display());
    } else {
        println!("No stored result");
    }
    Ok(())
}

fn run_workdir(config: &Config, dir: &Path, keep: bool) -> Result<(), RunError> {
    let payload = workdir::load_from_work_dir(dir)?;
    if keep {
        store::save(&config.results_file, &payload)?;
        println!("Stored result saved to {}", config.results_file.display());
        return Ok(());
    }
    let json = serde_json::to_string_pretty(payload.value()).map_err(PayloadError::from)?;
    write_output(&json, None)
}

/// Run the `config` command: display paths and settings.
fn run_config() {
    let data_dir = paths::data_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "—".to_string());
    println!("Data dir:     {}", data_dir);

    match config::load() {
        Ok(c) => {
            let stored = match store::load(&c.results_file) {
                Ok(Some(s)) => format!("saved {}", s.saved_at.to_rfc3339()),
                Ok(None) => "empty".to_string(),
                Err(e) => e.to_string(),
            };
            println!("Results file: {} ({})", c.results_file.display(), stored);
            println!("Wrap width:   {}", c.wrap_width);
        }
        Err(e) => println!("Settings:     {}", e),
    }
}
