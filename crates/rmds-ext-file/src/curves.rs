//! Curve definition files.
//!
//! Curves come in blocks separated by blank lines. The first row of a
//! block is the header `name,as_of_date,curve_type`; every following row
//! is `day_offset,value`:
//!
//! ```text
//! OIS.USD,2020-12-30,DF
//! 0,1.0
//! 90,0.999
//! 180,0.997
//!
//! ACME.PX,,GENERIC
//! 0,42.5
//! 30,43.0
//! ```
//!
//! An empty as-of date falls back to the registry's valuation date and an
//! empty curve type means a discount factor curve. A final block without a
//! trailing blank line is still read. A malformed block is logged and
//! skipped; the rest of the file still loads.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, info, warn};

use rmds_core::Date;
use rmds_curves::{Curve, CurveKind, CurveRegistry};

use crate::error::{FileError, FileResult};
use crate::summary::LoadSummary;

/// Curves read from a definition file.
#[derive(Debug, Clone, Default)]
pub struct ParsedCurves {
    /// Curves built, in file order.
    pub curves: Vec<Curve>,
    /// Accepted and skipped blocks.
    pub summary: LoadSummary,
}

struct Block {
    first_line: usize,
    lines: Vec<String>,
}

fn is_separator(line: &str) -> bool {
    line.chars().all(|c| c == ',' || c.is_whitespace())
}

fn field<'a>(record: &'a csv::StringRecord, index: usize) -> Option<&'a str> {
    record.get(index).filter(|s| !s.is_empty())
}

fn parse_block(block: &Block, source: &str, fallback: Option<Date>) -> FileResult<Curve> {
    let text = block.lines.join("\n");
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut records = reader.records();
    let location = |offset: usize| format!("{source}:{}", block.first_line + offset);

    let header = match records.next() {
        Some(record) => record.map_err(|e| FileError::parse(location(0), e.to_string()))?,
        None => return Err(FileError::parse(location(0), "empty curve block")),
    };
    let name = field(&header, 0)
        .ok_or_else(|| FileError::parse(location(0), "curve name is empty"))?;
    let as_of = match field(&header, 1) {
        Some(raw) => Date::parse(raw)?,
        None => fallback.ok_or_else(|| {
            FileError::parse(location(0), "no as-of date and no valuation date to fall back on")
        })?,
    };
    let kind = match field(&header, 2) {
        Some(raw) => raw.parse::<CurveKind>()?,
        None => CurveKind::DiscountFactor,
    };

    let mut offsets = Vec::new();
    let mut values = Vec::new();
    for (i, record) in records.enumerate() {
        let row = i + 1;
        let record = record.map_err(|e| FileError::parse(location(row), e.to_string()))?;
        let (Some(offset), Some(value)) = (field(&record, 0), field(&record, 1)) else {
            return Err(FileError::parse(location(row), "expected day_offset,value"));
        };
        offsets.push(
            offset
                .parse::<i64>()
                .map_err(|e| FileError::parse(location(row), format!("day offset '{offset}': {e}")))?,
        );
        values.push(
            value
                .parse::<f64>()
                .map_err(|e| FileError::parse(location(row), format!("value '{value}': {e}")))?,
        );
    }

    Ok(Curve::new(name, as_of, kind, offsets, values)?)
}

/// Parses curve blocks from a reader.
///
/// `source` names the input in log messages and skip locations.
///
/// # Errors
///
/// Only a failure to read the input is fatal; malformed blocks are
/// reported in the summary.
pub fn parse_curves<R: BufRead>(
    reader: R,
    source: &str,
    fallback: Option<Date>,
) -> FileResult<ParsedCurves> {
    let mut blocks = Vec::new();
    let mut current: Option<Block> = None;

    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| FileError::io(source, e))?;
        if is_separator(&line) {
            blocks.extend(current.take());
        } else {
            current
                .get_or_insert_with(|| Block {
                    first_line: i + 1,
                    lines: Vec::new(),
                })
                .lines
                .push(line);
        }
    }
    blocks.extend(current.take());

    let mut parsed = ParsedCurves::default();
    for block in &blocks {
        match parse_block(block, source, fallback) {
            Ok(curve) => {
                debug!(curve = %curve.key(), points = curve.len(), "parsed curve");
                parsed.curves.push(curve);
                parsed.summary.loaded += 1;
            }
            Err(e) => {
                let location = format!("{source}:{}", block.first_line);
                warn!(%location, error = %e, "skipping curve block");
                parsed.summary.skip(location, e.kind(), e.to_string());
            }
        }
    }
    Ok(parsed)
}

/// Loads a curve definition file into a registry.
///
/// Blocks without an as-of date take the registry's valuation date.
///
/// # Errors
///
/// Returns `FileError::Io` if the file cannot be opened or read.
pub fn load_curves(path: impl AsRef<Path>, registry: &mut CurveRegistry) -> FileResult<LoadSummary> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| FileError::io(path, e))?;
    let source = path.display().to_string();

    let parsed = parse_curves(BufReader::new(file), &source, registry.valuation_date())?;
    for curve in parsed.curves {
        registry.add_curve(curve);
    }

    info!(file = %source, summary = %parsed.summary, "curves loaded");
    Ok(parsed.summary)
}
