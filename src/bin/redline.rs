use clap::{Parser, Subcommand, ValueEnum};
use redline::{
    Document, MatchStrategy, RenderMode, ReplaceConfig, replace_tracked_with,
    text_ends_in_paragraph, text_starts_in_paragraph,
};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replace text as a tracked change
    Replace {
        /// Document JSON file
        #[arg(long)]
        input: PathBuf,
        /// Paragraph to edit; defaults to the first one containing the text
        #[arg(long)]
        paragraph: Option<usize>,
        /// Text to replace
        #[arg(long)]
        find: String,
        /// Replacement text; omit to record a deletion only
        #[arg(long)]
        replace: Option<String>,
        #[arg(long)]
        author: Option<String>,
        #[arg(long)]
        date: Option<String>,
        /// Disable the word-shortening fallback
        #[arg(long)]
        exact: bool,
        /// JSON file with replacement settings
        #[arg(long)]
        config: Option<PathBuf>,
        /// Where to write the document; stdout when omitted
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print each paragraph
    Show {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, value_enum, default_value_t = Mode::Current)]
        mode: Mode,
    },
    /// Report whether text starts or ends within a paragraph
    Probe {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        paragraph: usize,
        #[arg(long)]
        text: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    Current,
    Original,
    Redline,
}

impl From<Mode> for RenderMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Current => RenderMode::Current,
            Mode::Original => RenderMode::Original,
            Mode::Redline => RenderMode::Redline,
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("paragraph {0} does not exist")]
    NoSuchParagraph(usize),
    #[error("no paragraph contains {0:?}")]
    TextNotFound(String),
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Replace {
            input,
            paragraph,
            find,
            replace,
            author,
            date,
            exact,
            config,
            output,
        } => load_config(config.as_deref()).and_then(|mut settings| {
            if exact {
                settings.strategy = MatchStrategy::Exact;
            }
            if let Some(author) = author {
                settings = settings.with_author(author);
            }
            if let Some(date) = date {
                settings = settings.with_date(date);
            }
            replace_command(
                &input,
                paragraph,
                &find,
                replace.as_deref(),
                &settings,
                output.as_deref(),
            )
        }),
        Commands::Show { input, mode } => show_command(&input, mode.into()),
        Commands::Probe {
            input,
            paragraph,
            text,
        } => probe_command(&input, paragraph, &text),
    };

    if let Err(err) = result {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn load_document(path: &Path) -> Result<Document, CliError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn load_config(path: Option<&Path>) -> Result<ReplaceConfig, CliError> {
    match path {
        Some(path) => {
            let raw = fs::read_to_string(path)?;
            Ok(serde_json::from_str(&raw)?)
        }
        None => Ok(ReplaceConfig::default()),
    }
}

fn replace_command(
    input: &Path,
    paragraph: Option<usize>,
    find: &str,
    replacement: Option<&str>,
    config: &ReplaceConfig,
    output: Option<&Path>,
) -> Result<(), CliError> {
    let mut doc = load_document(input)?;

    let outcome = match paragraph {
        Some(index) => {
            let target = doc
                .paragraph_mut(index)
                .ok_or(CliError::NoSuchParagraph(index))?;
            replace_tracked_with(target, find, replacement, config)
        }
        None => {
            doc.replace_tracked(find, replacement, config)
                .ok_or_else(|| CliError::TextNotFound(find.to_string()))?
                .1
        }
    };
    debug!(degenerate = outcome.is_degenerate(), "replacement applied");

    let rendered = serde_json::to_string_pretty(&doc)?;
    match output {
        Some(path) => fs::write(path, rendered)?,
        None => println!("{rendered}"),
    }
    Ok(())
}

fn show_command(input: &Path, mode: RenderMode) -> Result<(), CliError> {
    let doc = load_document(input)?;
    for paragraph in doc.paragraphs() {
        println!("{}", paragraph.render(mode));
    }
    Ok(())
}

fn probe_command(input: &Path, index: usize, text: &str) -> Result<(), CliError> {
    let doc = load_document(input)?;
    let paragraph = doc
        .paragraph(index)
        .ok_or(CliError::NoSuchParagraph(index))?;
    let output = serde_json::json!({
        "starts": text_starts_in_paragraph(paragraph, text),
        "ends": text_ends_in_paragraph(paragraph, text),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
