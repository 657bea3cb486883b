//! Process command - tag headers and footers of a single document.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use dcr_core::line_type::header_footer::{HeaderFooterCounts, HeaderFooterDetector};
use dcr_core::models::document::{Document, LineType};

use super::{load_config, DetectionArgs};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input document (JSON lines document from the line parser)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Show the number of header and footer lines
    #[arg(long)]
    show_counts: bool,

    #[command(flatten)]
    detection: DetectionArgs,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Annotated document as JSON
    Json,
    /// Plain text listing of header and footer lines
    Text,
}

pub fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let line_type_config = args.detection.apply(config.line_type);

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let mut document = Document::from_file(&args.input)?;
    let counts = HeaderFooterDetector::new(line_type_config).process(&mut document)?;

    let output = match args.format {
        OutputFormat::Json => document.to_json_pretty()?,
        OutputFormat::Text => format_document_text(&document, &counts),
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_counts || args.output.is_some() {
        println!(
            "{} {} header lines, {} footer lines",
            style("ℹ").blue(),
            counts.header_lines,
            counts.footer_lines
        );
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Render the header and footer lines of a document, page by page.
pub fn format_document_text(document: &Document, counts: &HeaderFooterCounts) -> String {
    let mut output = String::new();

    if let Some(file_name) = &document.file_name {
        output.push_str(&format!("Document: {}\n", file_name));
    }
    output.push_str(&format!("Pages: {}\n", document.page_count()));
    output.push_str(&format!("Header lines: {}\n", counts.header_lines));
    output.push_str(&format!("Footer lines: {}\n", counts.footer_lines));

    for page in &document.pages {
        let tagged: Vec<_> = page
            .lines
            .iter()
            .filter(|line| matches!(line.line_type, LineType::Header | LineType::Footer))
            .collect();

        if tagged.is_empty() {
            continue;
        }

        output.push_str(&format!("\nPage {}\n", page.page_no));
        for line in tagged {
            output.push_str(&format!(
                "  {:<6} {:>3}: {}\n",
                line.line_type.as_str(),
                line.line_no_page,
                line.text
            ));
        }
    }

    output
}
