//! Curve command implementation.
//!
//! Loads a curve definition file and evaluates one curve at day offsets or
//! dates.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use rmds_curves::query::CurveQuery;
use rmds_curves::{Curve, CurveRegistry};
use rmds_ext_file::load_curves;

use crate::cli::OutputFormat;
use crate::commands::parse_date;
use crate::error::CliError;
use crate::output::{print_header, print_output, print_warning};

/// Arguments for the curve command.
#[derive(Args, Debug)]
pub struct CurveArgs {
    /// Curve definition file (blank-line separated CSV blocks)
    #[arg(long)]
    pub file: PathBuf,

    /// Curve name
    #[arg(short, long)]
    pub name: String,

    /// As-of date (YYYY-MM-DD); also used for blocks that omit one
    #[arg(short, long)]
    pub date: String,

    /// Day offsets or dates to evaluate (comma-separated). Shows the stored
    /// points if omitted.
    #[arg(long, num_args = 1.., value_delimiter = ',')]
    pub at: Vec<String>,
}

/// One evaluated point.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct CurvePointRow {
    #[tabled(rename = "Query")]
    pub query: String,
    #[tabled(rename = "Offset")]
    pub offset: i64,
    #[tabled(rename = "Value")]
    pub value: f64,
}

fn evaluate(curve: &Curve, raw: &str) -> Result<CurvePointRow, CliError> {
    let query: CurveQuery = raw.parse()?;
    let offset = match query {
        CurveQuery::Offset(offset) => offset,
        CurveQuery::Date(date) => curve.as_of().day_offset(&date),
    };
    Ok(CurvePointRow {
        query: query.to_string(),
        offset,
        value: curve.value(&query),
    })
}

/// Execute the curve command.
pub fn execute(args: CurveArgs, format: OutputFormat, quiet: bool) -> Result<()> {
    let date = parse_date(&args.date)?;
    let mut registry = CurveRegistry::with_valuation_date(date);
    let summary = load_curves(&args.file, &mut registry)?;
    if !quiet {
        for skipped in &summary.skipped {
            print_warning(&format!("{}: {}", skipped.location, skipped.message));
        }
    }

    let curve = registry
        .get_curve(&args.name, date)
        .ok_or_else(|| CliError::CurveNotFound {
            name: args.name.clone(),
            date,
            file: args.file.display().to_string(),
        })?;

    let rows = if args.at.is_empty() {
        curve
            .points()
            .map(|(offset, value)| CurvePointRow {
                query: offset.to_string(),
                offset,
                value,
            })
            .collect()
    } else {
        args.at
            .iter()
            .map(|raw| evaluate(curve, raw))
            .collect::<Result<Vec<_>, _>>()?
    };

    if format == OutputFormat::Table && !quiet {
        print_header(&format!("Curve {} ({})", curve.key(), curve.kind()));
    }
    print_output(&rows, format)
}
