//! Parse command - interpret a single transcript.

use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::time::Instant;

use clap::{Args, ValueEnum};
use console::style;
use rust_decimal::Decimal;
use tracing::{debug, info};

use vozcaja_core::models::config::VozcajaConfig;
use vozcaja_core::{InterpretationResult, ParsedTransaction, RuleInterpreter, TranscriptInterpreter};

use super::config::load_config;

/// Shown when no amount could be read from the transcript.
pub const MISSING_AMOUNT_HINT: &str = "No entendí el monto. Intenta decir: 'Gasté 5000 en comida'";

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Transcript text (read from stdin when omitted)
    text: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (default: from config)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Apply speech-to-text corrections before interpreting
    #[arg(long)]
    enhance: bool,

    /// Reject transcripts over the length limit instead of truncating them
    #[arg(long)]
    strict: bool,

    /// Print strategy, warnings and timing along with the movement
    #[arg(long)]
    details: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    /// Pick the command-line format, falling back to the configured default.
    pub fn resolve(requested: Option<Self>, config: &VozcajaConfig) -> anyhow::Result<Self> {
        match requested {
            Some(format) => Ok(format),
            None => Self::from_str(&config.output.default_format, true).map_err(|_| {
                anyhow::anyhow!(
                    "Unknown output format in config: {}",
                    config.output.default_format
                )
            }),
        }
    }
}

pub fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;
    let format = OutputFormat::resolve(args.format, &config)?;

    let transcript = if args.text.is_empty() {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        args.text.join(" ")
    };

    if transcript.trim().is_empty() {
        anyhow::bail!("No transcript given. Pass it as arguments or on stdin.");
    }

    let interpreter = build_interpreter(&config, args.enhance, args.strict);

    info!("Interpreting transcript");
    let result = interpreter.interpret(&transcript)?;

    if !result.is_complete() {
        anyhow::bail!("{}", MISSING_AMOUNT_HINT);
    }

    let output = if args.details {
        format_details(&result, format, &config.output.currency_symbol)?
    } else if format == OutputFormat::Json {
        serde_json::to_string(&result.transaction)?
    } else {
        format_transactions(
            std::slice::from_ref(&result.transaction),
            format,
            &config.output.currency_symbol,
        )?
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output.trim_end());
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Interpreter from config, with command-line switches layered on top.
pub fn build_interpreter(config: &VozcajaConfig, enhance: bool, strict: bool) -> RuleInterpreter {
    RuleInterpreter::from_config(&config.interpreter)
        .with_transcript_enhancement(enhance || config.interpreter.enhance_transcript)
        .with_strict_length(strict || config.interpreter.strict_length)
}

/// Render movements in the chosen format.
pub fn format_transactions(
    transactions: &[ParsedTransaction],
    format: OutputFormat,
    currency: &str,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(transactions)?),
        OutputFormat::Csv => format_csv(transactions),
        OutputFormat::Text => Ok(transactions
            .iter()
            .map(|t| format_text(t, currency))
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

fn format_details(
    result: &InterpretationResult,
    format: OutputFormat,
    currency: &str,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(result)?),
        OutputFormat::Csv => format_csv(std::slice::from_ref(&result.transaction)),
        OutputFormat::Text => {
            let mut output = format_text(&result.transaction, currency);
            output.push('\n');
            output.push_str(&format!("Texto:       {}\n", result.normalized_text));
            if let Some(strategy) = &result.amount_strategy {
                output.push_str(&format!("Estrategia:  {}\n", strategy));
            }
            if let Some(source) = &result.amount_source {
                output.push_str(&format!("Fragmento:   {}\n", source));
            }
            for warning in &result.warnings {
                output.push_str(&format!("Aviso:       {}\n", warning));
            }
            output.push_str(&format!("Tiempo:      {}µs\n", result.processing_time_us));
            Ok(output)
        }
    }
}

fn format_csv(transactions: &[ParsedTransaction]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["direction", "amount", "description", "category"])?;

    for txn in transactions {
        wtr.write_record([
            txn.direction.key(),
            &txn.amount.to_string(),
            &txn.description,
            txn.category.key(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(txn: &ParsedTransaction, currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{}: {}\n",
        txn.direction.label(),
        format_money(txn.amount, currency)
    ));
    output.push_str(&format!("Categoría:   {}\n", txn.category.label()));
    output.push_str(&format!("Descripción: {}\n", txn.description));

    output
}

/// Format an amount with the currency symbol, sign first.
pub fn format_money(amount: Decimal, currency: &str) -> String {
    if amount.is_sign_negative() && !amount.is_zero() {
        format!("-{}{}", currency, amount.abs())
    } else {
        format!("{}{}", currency, amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vozcaja_core::{Category, Direction};

    fn sample() -> ParsedTransaction {
        ParsedTransaction {
            direction: Direction::Outflow,
            amount: Decimal::from(5000),
            description: "Comida".to_string(),
            category: Category::Food,
        }
    }

    #[test]
    fn test_format_text() {
        let text = format_text(&sample(), "$");
        assert!(text.starts_with("Gasto: $5000\n"));
        assert!(text.contains("Categoría:   Comida"));
    }

    #[test]
    fn test_format_csv() {
        let csv = format_csv(&[sample()]).unwrap();
        assert_eq!(
            csv,
            "direction,amount,description,category\noutflow,5000,Comida,food\n"
        );
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(Decimal::from(-1200), "$"), "-$1200");
        assert_eq!(format_money(Decimal::ZERO, "€"), "€0");
    }

    #[test]
    fn test_resolve_format() {
        let mut config = VozcajaConfig::default();
        assert_eq!(OutputFormat::resolve(None, &config).unwrap(), OutputFormat::Json);
        assert_eq!(
            OutputFormat::resolve(Some(OutputFormat::Csv), &config).unwrap(),
            OutputFormat::Csv
        );

        config.output.default_format = "TEXT".to_string();
        assert_eq!(OutputFormat::resolve(None, &config).unwrap(), OutputFormat::Text);

        config.output.default_format = "xml".to_string();
        assert!(OutputFormat::resolve(None, &config).is_err());
    }
}
