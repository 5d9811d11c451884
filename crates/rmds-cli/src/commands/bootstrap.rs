//! Bootstrap command implementation.
//!
//! Bootstraps discount factor curves from an instrument file and prints the
//! solved pillars with the repricing check of every instrument.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use rmds_curves::bootstrap::{bootstrap_all, BootstrapConfig, BootstrapResult};
use rmds_curves::instruments::StandardPricer;
use rmds_ext_file::load_instruments;

use crate::cli::OutputFormat;
use crate::commands::parse_date;
use crate::error::CliError;
use crate::output::{print_error, print_header, print_output, print_success, print_warning};

/// Arguments for the bootstrap command.
#[derive(Args, Debug)]
pub struct BootstrapArgs {
    /// Instrument file (curve_name,as_of_date,instrument_type,maturity,quote,param)
    #[arg(long)]
    pub file: PathBuf,

    /// As-of date for rows that omit one (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: Option<String>,

    /// Only bootstrap this curve
    #[arg(short, long)]
    pub curve: Option<String>,

    /// Root search tolerance
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Root search iteration cap
    #[arg(long)]
    pub max_iterations: Option<u32>,
}

/// A solved pillar.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct PillarRow {
    #[tabled(rename = "Curve")]
    pub curve: String,
    #[tabled(rename = "Offset")]
    pub offset: i64,
    #[tabled(rename = "DF")]
    pub discount_factor: f64,
}

/// An instrument repriced on its solved curve.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct RepricingRow {
    #[tabled(rename = "Curve")]
    pub curve: String,
    #[tabled(rename = "Instrument")]
    pub instrument: String,
    #[tabled(rename = "Quote")]
    pub quote: f64,
    #[tabled(rename = "Model")]
    pub model: f64,
    #[tabled(rename = "Error")]
    pub error: f64,
    #[tabled(rename = "Status")]
    pub status: &'static str,
}

fn pillar_rows(result: &BootstrapResult) -> impl Iterator<Item = PillarRow> + '_ {
    let name = result.curve.name().to_string();
    result.curve.points().map(move |(offset, discount_factor)| PillarRow {
        curve: name.clone(),
        offset,
        discount_factor,
    })
}

fn repricing_rows(result: &BootstrapResult) -> impl Iterator<Item = RepricingRow> + '_ {
    let name = result.curve.name().to_string();
    result.report.checks().iter().map(move |check| RepricingRow {
        curve: name.clone(),
        instrument: check.description.clone(),
        quote: check.quote,
        model: check.model,
        error: check.error,
        status: if check.passed { "OK" } else { "FAIL" },
    })
}

/// Execute the bootstrap command.
pub fn execute(args: BootstrapArgs, format: OutputFormat, quiet: bool) -> Result<()> {
    let fallback = args.date.as_deref().map(parse_date).transpose()?;

    let mut config = BootstrapConfig::default();
    if let Some(tolerance) = args.tolerance {
        config = config.with_tolerance(tolerance);
    }
    if let Some(max_iterations) = args.max_iterations {
        config = config.with_max_iterations(max_iterations);
    }

    let mut parsed = load_instruments(&args.file, fallback)?;
    if !quiet {
        for skipped in &parsed.summary.skipped {
            print_warning(&format!("{}: {}", skipped.location, skipped.message));
        }
    }
    if let Some(name) = &args.curve {
        parsed.sets.retain(|set| &set.name == name);
    }

    let results = bootstrap_all(&parsed.sets, &StandardPricer, &config);
    let total = results.len();

    let mut built = Vec::new();
    let mut failed = 0;
    for (key, result) in results {
        match result {
            Ok(result) => {
                if !quiet && !result.is_valid() {
                    print_warning(&format!(
                        "{key}: repricing error {:.2e} above tolerance",
                        result.report.max_error()
                    ));
                }
                built.push(result);
            }
            Err(e) => {
                failed += 1;
                print_error(&format!("{key}: {e}"));
            }
        }
    }

    let pillars: Vec<PillarRow> = built.iter().flat_map(pillar_rows).collect();
    let checks: Vec<RepricingRow> = built.iter().flat_map(repricing_rows).collect();

    match format {
        OutputFormat::Table => {
            print_header("Discount Factors");
            print_output(&pillars, format)?;
            print_header("Repricing");
            print_output(&checks, format)?;
        }
        OutputFormat::Json => {
            let doc = serde_json::json!({ "pillars": pillars, "repricing": checks });
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
        OutputFormat::Csv => print_output(&pillars, format)?,
    }

    if failed > 0 {
        return Err(CliError::Bootstrap { failed, total }.into());
    }
    if !quiet && format == OutputFormat::Table {
        print_success(&format!("{total} curve(s) bootstrapped"));
    }
    Ok(())
}
