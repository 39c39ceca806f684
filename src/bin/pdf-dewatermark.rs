//! PDF Dewatermark CLI tool
//!
//! Removes publisher watermark lines from PDFs and renames papers after
//! their metadata.

use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process;

use pdf_dewatermark::agent::{generate_filename, propose_watermarks, ChatClient};
use pdf_dewatermark::clean::clean_pdf;
use pdf_dewatermark::extract::extract_first_page_text;
use pdf_dewatermark::redact::DEFAULT_THRESHOLD;
use pdf_dewatermark::Error;

/// PDF Dewatermark - Remove watermark lines from PDF content streams
#[derive(Parser)]
#[command(name = "pdf-dewatermark")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Clean in place: proposes watermarks via the chat API, retires the
    # original into _retired/ and installs the cleaned file under its name
    pdf-dewatermark clean paper.pdf

    # Clean to an explicit output path (original left untouched)
    pdf-dewatermark clean paper.pdf cleaned.pdf

    # Skip the chat API and supply the watermark text directly
    pdf-dewatermark clean paper.pdf --watermark \"Downloaded via University X on March 3, 2021\"

    # Rename a paper to \"{year}-{authors} ({title}).pdf\"
    pdf-dewatermark rename paper.pdf")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Remove watermark lines from a PDF
    Clean {
        /// Input PDF file
        input: PathBuf,

        /// Output PDF file path. If omitted, "-dry.pdf" is appended to the
        /// input filename and on success the original is retired
        output: Option<PathBuf>,

        /// Watermark text to remove (repeatable). When given, the chat API
        /// is not consulted
        #[arg(long)]
        watermark: Vec<String>,

        /// Similarity threshold (0-100) a line must reach to be blanked
        #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
        threshold: u32,
    },

    /// Rename a scientific paper PDF from its first-page content
    Rename {
        /// Input PDF file
        input: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Clean { input, output, watermark, threshold } => {
            cmd_clean(input, output, watermark, threshold)
        }
        Commands::Rename { input } => cmd_rename(input),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Ensure the input path exists and is a regular file
fn check_input(input: &Path) -> Result<()> {
    if !input.exists() || !input.is_file() {
        return Err(Error::FileNotFound(input.to_path_buf()).into());
    }
    Ok(())
}

/// Remove watermark lines from a PDF
fn cmd_clean(
    input: PathBuf,
    output: Option<PathBuf>,
    watermark: Vec<String>,
    threshold: u32,
) -> Result<()> {
    check_input(&input)?;

    let explicit_output = output.is_some();
    let output = match output {
        Some(path) => path,
        None => default_output_path(&input),
    };

    if output.exists() {
        return Err(Error::OutputExists(output).into());
    }

    // Watermarks from the command line win; otherwise ask the chat API
    let watermarks = if !watermark.is_empty() {
        watermark
    } else {
        eprintln!("Extracting first-page text...");
        let text = extract_first_page_text(&input)?;

        eprintln!("Proposing watermark candidates...");
        let client = ChatClient::from_env()?;
        let proposed = propose_watermarks(&client, &text)?;
        for candidate in &proposed {
            eprintln!("  candidate: {}", candidate);
        }
        proposed
    };

    match clean_pdf(&input, &output, &watermarks, threshold) {
        Ok(records) => {
            eprintln!("Blanked {} content-stream line(s).", records.len());
            println!("Watermark removed. Cleaned file saved as: {}", output.display());

            if !explicit_output {
                retire_original(&input, &output)?;
                eprintln!(
                    "Original retired; cleaned file installed as: {}",
                    input.display()
                );
            }
            Ok(())
        }
        Err(Error::NothingToDo) => {
            println!("No watermarks found in the input file. No changes made.");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Rename a paper PDF to "{year}-{authors} ({title}).pdf"
fn cmd_rename(input: PathBuf) -> Result<()> {
    check_input(&input)?;

    let text = extract_first_page_text(&input)?;
    if text.trim().is_empty() {
        return Err(Error::General("The first page contains no extractable text".to_string()).into());
    }

    eprintln!("Generating filename...");
    let client = ChatClient::from_env()?;
    let mut filename = generate_filename(&client, &text)?
        .ok_or_else(|| Error::General("No filename was generated".to_string()))?;

    if !filename.to_lowercase().ends_with(".pdf") {
        filename.push_str(".pdf");
    }

    let target = input.with_file_name(&filename);
    if target.exists() {
        return Err(Error::OutputExists(target).into());
    }

    std::fs::rename(&input, &target)?;
    println!("Renamed to: {}", target.display());

    Ok(())
}

/// Default output path: the input filename with "-dry.pdf" appended
fn default_output_path(input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{}-dry.pdf", name))
}

/// Move the original into a dated _retired/ entry and install the cleaned
/// file under the original name
fn retire_original(input: &Path, cleaned: &Path) -> Result<()> {
    let parent = input.parent().unwrap_or_else(|| Path::new("."));
    let retirement_dir = parent.join("_retired");
    std::fs::create_dir_all(&retirement_dir)?;

    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stamp = Local::now().format("%Y%m%d-%H%M%S");
    let retired = retirement_dir.join(format!("{}_(retired at {})", name, stamp));

    std::fs::rename(input, &retired)?;
    std::fs::rename(cleaned, input)?;

    Ok(())
}
