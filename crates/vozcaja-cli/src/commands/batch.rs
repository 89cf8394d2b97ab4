//! Batch command - interpret transcript files, one movement per line.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use vozcaja_core::{LedgerSummary, ParsedTransaction, RuleInterpreter, TranscriptInterpreter};

use super::config::load_config;
use super::parse::{build_interpreter, format_money, format_transactions, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern of transcript files
    #[arg(required = true)]
    input: String,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (default: from config)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Print totals, balance and per-category amounts
    #[arg(long)]
    summary: bool,

    /// Apply speech-to-text corrections before interpreting
    #[arg(long)]
    enhance: bool,

    /// Reject lines over the length limit instead of truncating them
    #[arg(long)]
    strict: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Outcome of one transcript file.
struct FileResult {
    path: PathBuf,
    transactions: Vec<ParsedTransaction>,
    /// Lines whose amount could not be read.
    skipped_lines: Vec<usize>,
    error: Option<String>,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;
    let format = OutputFormat::resolve(args.format, &config)?;
    let currency = config.output.currency_symbol.as_str();

    let mut files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();
    files.sort();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    eprintln!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let interpreter = build_interpreter(&config, args.enhance, args.strict);
    let mut results = Vec::with_capacity(files.len());

    for path in files {
        match process_file(&path, &interpreter) {
            Ok(result) => results.push(result),
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(FileResult {
                        path,
                        transactions: Vec::new(),
                        skipped_lines: Vec::new(),
                        error: Some(error_msg),
                    });
                } else {
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    pb.abandon();
                    anyhow::bail!("Processing failed for {}: {}", path.display(), error_msg);
                }
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();

    let mut summary = LedgerSummary::default();
    let mut accepted = Vec::new();
    for result in &results {
        for txn in &result.transactions {
            summary.add(txn);
            if txn.has_amount() {
                accepted.push(txn.clone());
            }
        }
    }

    let output = format_transactions(&accepted, format, currency)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else if !accepted.is_empty() || format == OutputFormat::Json {
        println!("{}", output.trim_end());
    }

    if args.summary {
        eprintln!();
        eprint!("{}", format_summary(&summary, currency));
    }

    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    eprintln!();
    eprintln!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    eprintln!(
        "   {} movements, {} without amount, {} failed files",
        style(summary.accepted).green(),
        style(summary.rejected).yellow(),
        style(failed.len()).red()
    );

    for result in results.iter().filter(|r| !r.skipped_lines.is_empty()) {
        debug!(
            "{}: no amount on lines {:?}",
            result.path.display(),
            result.skipped_lines
        );
    }

    if !failed.is_empty() {
        eprintln!();
        eprintln!("{}", style("Failed files:").red());
        for result in &failed {
            eprintln!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn process_file(path: &Path, interpreter: &RuleInterpreter) -> anyhow::Result<FileResult> {
    let content = fs::read(path)?;
    let mut transactions = Vec::new();
    let mut skipped_lines = Vec::new();

    let text = std::str::from_utf8(&content)
        .map_err(|e| anyhow::anyhow!("file is not valid UTF-8: {}", e))?;

    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let result = interpreter
            .interpret(line)
            .map_err(|e| anyhow::anyhow!("line {}: {}", index + 1, e))?;

        if !result.is_complete() {
            warn!("{}:{}: amount not detected", path.display(), index + 1);
            skipped_lines.push(index + 1);
        }
        transactions.push(result.transaction);
    }

    debug!(
        "Interpreted {} lines from {}",
        transactions.len(),
        path.display()
    );

    Ok(FileResult {
        path: path.to_path_buf(),
        transactions,
        skipped_lines,
        error: None,
    })
}

fn format_summary(summary: &LedgerSummary, currency: &str) -> String {
    let mut output = String::new();

    output.push_str("Resumen:\n");
    output.push_str(&format!(
        "  Movimientos: {} aceptados, {} sin monto\n",
        summary.accepted, summary.rejected
    ));
    output.push_str(&format!(
        "  Ingresos:    {}\n",
        format_money(summary.total_inflow, currency)
    ));
    output.push_str(&format!(
        "  Gastos:      {}\n",
        format_money(summary.total_outflow, currency)
    ));
    output.push_str(&format!(
        "  Balance:     {}\n",
        format_money(summary.balance, currency)
    ));

    let top = summary.top_categories();
    if !top.is_empty() {
        output.push_str("  Por categoría:\n");
        for (category, amount) in top {
            output.push_str(&format!(
                "    {}: {}\n",
                category.label(),
                format_money(amount, currency)
            ));
        }
    }

    output
}
