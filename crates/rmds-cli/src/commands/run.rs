//! Run command implementation.
//!
//! Executes a full valuation run from a run configuration: load curves,
//! bootstrap instrument curves, build scenarios, load securities, run the
//! use case and write the result rows.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::Tabled;
use tracing::{info, warn};

use rmds_core::Date;
use rmds_curves::bootstrap::{bootstrap_all, BootstrapConfig};
use rmds_curves::instruments::StandardPricer;
use rmds_engine::{ResultRecord, RunContext, ValuationReport};
use rmds_ext_file::{
    load_curves, load_instruments, load_scenario_definition, load_securities, write_results,
    LoadSummary, RunConfig,
};

use crate::cli::OutputFormat;
use crate::output::{print_header, print_output, print_success, print_warning, KeyValue};

/// Arguments for the run command.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Run configuration file (JSON)
    pub config: PathBuf,

    /// Write results here instead of the configured output file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// A result row for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct ResultRow {
    #[tabled(rename = "Security ID")]
    #[serde(rename = "Security ID")]
    pub security_id: String,
    #[tabled(rename = "Scenario")]
    #[serde(rename = "Scenario Name")]
    pub scenario_name: String,
    #[tabled(rename = "Date")]
    #[serde(rename = "Scenario Date")]
    pub scenario_date: Date,
    #[tabled(rename = "NPV_BASE")]
    #[serde(rename = "NPV_BASE")]
    pub npv_base: Decimal,
    #[tabled(rename = "NPV_UP")]
    #[serde(rename = "NPV_UP")]
    pub npv_up: Decimal,
    #[tabled(rename = "NPV_DOWN")]
    #[serde(rename = "NPV_DOWN")]
    pub npv_down: Decimal,
}

impl From<&ResultRecord> for ResultRow {
    fn from(record: &ResultRecord) -> Self {
        Self {
            security_id: record.security_id.clone(),
            scenario_name: record.scenario_name.clone(),
            scenario_date: record.scenario_date,
            npv_base: record.npv_base,
            npv_up: record.npv_up,
            npv_down: record.npv_down,
        }
    }
}

fn report_skipped(what: &str, summary: &LoadSummary, quiet: bool) {
    if quiet {
        return;
    }
    for skipped in &summary.skipped {
        print_warning(&format!(
            "{what} skipped at {} ({}): {}",
            skipped.location, skipped.kind, skipped.message
        ));
    }
}

fn bootstrap_curves(ctx: &mut RunContext, config: &RunConfig, quiet: bool) -> Result<usize> {
    let Some(path) = &config.instrument_definition_file else {
        return Ok(0);
    };
    let parsed = load_instruments(path, Some(config.valuation_date))?;
    report_skipped("instrument", &parsed.summary, quiet);

    let mut built = 0;
    for (key, result) in bootstrap_all(&parsed.sets, &StandardPricer, &BootstrapConfig::default()) {
        match result {
            Ok(result) => {
                if !result.is_valid() {
                    warn!(curve = %key, max_error = result.report.max_error(), "repricing above tolerance");
                }
                ctx.curves_mut().add_curve(result.into_curve());
                built += 1;
            }
            Err(e) => {
                if !quiet {
                    print_warning(&format!("curve {key} not built ({}): {e}", e.kind()));
                }
            }
        }
    }
    Ok(built)
}

fn print_report(report: &ValuationReport, format: OutputFormat, quiet: bool) -> Result<()> {
    let rows: Vec<ResultRow> = report.records.iter().map(ResultRow::from).collect();
    match format {
        OutputFormat::Table => {
            if !quiet {
                print_header("Results");
            }
            print_output(&rows, format)?;
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Csv => print_output(&rows, format)?,
    }
    if !quiet {
        for failure in &report.failures {
            print_warning(&format!(
                "{} in {}@{} skipped ({}): {}",
                failure.security_id,
                failure.scenario_name,
                failure.scenario_date,
                failure.kind,
                failure.message
            ));
        }
    }
    Ok(())
}

/// Execute the run command.
pub fn execute(args: RunArgs, format: OutputFormat, quiet: bool) -> Result<()> {
    info!(config = %args.config.display(), "starting run");
    let mut config = RunConfig::from_file(&args.config)?;
    if let Some(output) = args.output {
        config.output_file = output;
    }

    let mut ctx = RunContext::new(config.valuation_date);

    let curves = load_curves(&config.curve_definition_file, ctx.curves_mut())?;
    report_skipped("curve", &curves, quiet);
    let bootstrapped = bootstrap_curves(&mut ctx, &config, quiet)?;

    let definition = load_scenario_definition(&config.scenario_definition_file)?;
    let scenarios = ctx.build_scenarios(&definition)?;

    let securities = load_securities(&config.security_definition_file, ctx.securities_mut())?;
    report_skipped("security", &securities, quiet);

    let report = ctx.execute(config.use_case);
    write_results(&config.output_file, &report.records)?;

    print_report(&report, format, quiet)?;
    if format == OutputFormat::Table && !quiet {
        print_header("Summary");
        let summary = [
            KeyValue::new("Valuation Date", config.valuation_date),
            KeyValue::new("Use Case", config.use_case),
            KeyValue::new("Curves", ctx.curves().len()),
            KeyValue::new("Bootstrapped", bootstrapped),
            KeyValue::new("Scenarios", scenarios),
            KeyValue::new("Securities", ctx.securities().len()),
            KeyValue::new("Rows", report.records.len()),
            KeyValue::new("Skipped Pairs", report.failures.len()),
            KeyValue::new("Output", config.output_file.display()),
        ];
        print_output(&summary, format)?;
        print_success(&format!("results written to {}", config.output_file.display()));
    }
    info!("run complete");
    Ok(())
}
