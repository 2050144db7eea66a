//! Extract command - show the fields of a single bill without renaming it.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use serde::Serialize;
use tracing::{debug, info};

use recibo_core::bill::{BillParser, CfeBillParser, ExtractionResult, FieldMatch};
use recibo_core::pdf::{PdfExtractor, PdfProcessor};
use recibo_core::ExtractedRecord;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input PDF bill
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Print the first page text before the extracted fields
    #[arg(long)]
    show_text: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

/// Serialized shape of `extract --format json`.
#[derive(Serialize)]
struct ExtractOutput<'a> {
    source: String,
    file_name: String,
    record: &'a ExtractedRecord,
    matches: &'a [FieldMatch],
    warnings: &'a [String],
}

pub fn run(args: ExtractArgs) -> anyhow::Result<()> {
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let data = fs::read(&args.input)?;
    let mut extractor = PdfExtractor::new();
    extractor.load(&data)?;
    debug!("PDF has {} pages", extractor.page_count());

    let text = extractor.first_page_text()?;

    if args.show_text {
        eprintln!("{}", style("First page text:").blue());
        eprintln!("{}", text.as_deref().unwrap_or("<no text>"));
        eprintln!();
    }

    let result = CfeBillParser::new().parse(text.as_deref())?;

    for warning in &result.warnings {
        eprintln!("{} {}", style("⚠").yellow(), warning);
    }

    let source = args
        .input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let output = format_result(&source, &result, args.format)?;

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

    debug!("Extraction took {}ms", result.processing_time_ms);

    Ok(())
}

fn format_result(source: &str, result: &ExtractionResult, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => {
            let output = ExtractOutput {
                source: source.to_string(),
                file_name: result.record.file_name(),
                record: &result.record,
                matches: &result.matches,
                warnings: &result.warnings,
            };
            Ok(serde_json::to_string_pretty(&output)?)
        }
        OutputFormat::Csv => format_csv(source, &result.record),
        OutputFormat::Text => Ok(format_text(source, result)),
    }
}

fn format_csv(source: &str, record: &ExtractedRecord) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["source", "account_id", "due_date", "billing_period", "file_name"])?;
    let due_date = record.due_date().to_string();
    let period = record.billing_period().to_string();
    let file_name = record.file_name();
    wtr.write_record([
        source,
        record.account_id(),
        due_date.as_str(),
        period.as_str(),
        file_name.as_str(),
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(source: &str, result: &ExtractionResult) -> String {
    let record = &result.record;
    let mut output = String::new();

    output.push_str(&format!("Bill: {}\n", source));
    output.push_str(&format!("  Service number: {}\n", record.account_id()));
    output.push_str(&format!(
        "  Payment due:    {}\n",
        record.due_date().format("%d/%m/%Y")
    ));
    output.push_str(&format!("  Billing period: {}\n", record.billing_period()));
    output.push('\n');
    output.push_str(&format!("Canonical name: {}", record.file_name()));

    output
}
