//! Instrument definition files for bootstrapped curves.
//!
//! A CSV file with the header
//! `curve_name,as_of_date,instrument_type,maturity,quote,param`. Rows for
//! the same curve are grouped into one [`InstrumentSet`]. `maturity` is a
//! day offset or an ISO date; `param` is the face value of a zero-coupon
//! bond (default 100) or the fixed period of a par swap in days (default
//! 365). A bad row rejects the curve it belongs to.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use rmds_core::Date;
use rmds_curves::instruments::{Instrument, InstrumentSet};
use rmds_curves::query::CurveQuery;
use rmds_curves::{CurveError, CurveKey};

use crate::error::{FileError, FileResult};
use crate::summary::LoadSummary;

const DEFAULT_FACE: f64 = 100.0;
const DEFAULT_SWAP_PERIOD_DAYS: i64 = 365;

#[derive(Debug, Deserialize)]
struct InstrumentRow {
    curve_name: String,
    #[serde(default)]
    as_of_date: Option<String>,
    instrument_type: String,
    maturity: String,
    quote: f64,
    #[serde(default)]
    param: Option<f64>,
}

impl InstrumentRow {
    fn key(&self, fallback: Option<Date>) -> FileResult<CurveKey> {
        if self.curve_name.is_empty() {
            return Err(CurveError::invalid_instrument("curve name is empty").into());
        }
        let as_of = match self.as_of_date.as_deref().filter(|s| !s.is_empty()) {
            Some(raw) => Date::parse(raw)?,
            None => fallback.ok_or_else(|| {
                CurveError::invalid_instrument("no as-of date and no valuation date to fall back on")
            })?,
        };
        Ok(CurveKey::new(self.curve_name.clone(), as_of))
    }

    fn instrument(&self, as_of: Date) -> FileResult<Instrument> {
        let maturity = match self.maturity.parse::<CurveQuery>()? {
            CurveQuery::Offset(offset) => offset,
            CurveQuery::Date(date) => as_of.day_offset(&date),
        };

        let instrument = match self.instrument_type.to_ascii_uppercase().as_str() {
            "DEPOSIT" | "DEP" | "CASH" => Instrument::deposit(maturity, self.quote)?,
            "ZCB" | "ZERO" | "ZERO_COUPON" => {
                Instrument::zero_coupon(maturity, self.quote, self.param.unwrap_or(DEFAULT_FACE))?
            }
            "SWAP" | "PAR_SWAP" | "IRS" => {
                let period = match self.param {
                    None => DEFAULT_SWAP_PERIOD_DAYS,
                    Some(p) if p.fract() == 0.0 && p > 0.0 => p as i64,
                    Some(p) => {
                        return Err(CurveError::invalid_instrument(format!(
                            "swap period must be a whole number of days, got {p}"
                        ))
                        .into())
                    }
                };
                Instrument::par_swap(maturity, self.quote, period)?
            }
            other => {
                return Err(
                    CurveError::invalid_instrument(format!("unknown instrument type '{other}'"))
                        .into(),
                )
            }
        };
        Ok(instrument)
    }
}

/// Instrument sets read from a definition file.
#[derive(Debug, Clone, Default)]
pub struct ParsedInstruments {
    /// One set per curve, in curve key order.
    pub sets: Vec<InstrumentSet>,
    /// Accepted curves and skipped rows.
    pub summary: LoadSummary,
}

/// Parses instrument rows from a reader.
///
/// # Errors
///
/// Returns `FileError::Parse` if the header cannot be read.
pub fn parse_instruments<R: Read>(
    reader: R,
    source: &str,
    fallback: Option<Date>,
) -> FileResult<ParsedInstruments> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = reader
        .headers()
        .map_err(|e| FileError::parse(format!("{source}:1"), e.to_string()))?
        .clone();

    let mut sets: BTreeMap<CurveKey, InstrumentSet> = BTreeMap::new();
    let mut rejected: BTreeSet<CurveKey> = BTreeSet::new();
    let mut summary = LoadSummary::default();

    for record in reader.records() {
        let line = record
            .as_ref()
            .ok()
            .and_then(|r| r.position())
            .map_or(0, csv::Position::line);
        let location = format!("{source}:{line}");

        let row = record
            .map_err(|e| FileError::parse(location.clone(), e.to_string()))
            .and_then(|r| {
                r.deserialize::<InstrumentRow>(Some(&headers))
                    .map_err(|e| FileError::parse(location.clone(), e.to_string()))
            });
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                warn!(%location, error = %e, "skipping instrument row");
                summary.skip(location, e.kind(), e.to_string());
                continue;
            }
        };

        let key = match row.key(fallback) {
            Ok(key) => key,
            Err(e) => {
                warn!(%location, error = %e, "skipping instrument row");
                summary.skip(location, e.kind(), e.to_string());
                continue;
            }
        };

        match row.instrument(key.as_of) {
            Ok(instrument) => sets
                .entry(key.clone())
                .or_insert_with(|| InstrumentSet::new(key.name.clone(), key.as_of))
                .instruments
                .push(instrument),
            Err(e) => {
                warn!(%location, curve = %key, error = %e, "rejecting curve instruments");
                summary.skip(location, e.kind(), e.to_string());
                rejected.insert(key);
            }
        }
    }

    let sets: Vec<InstrumentSet> = sets
        .into_iter()
        .filter(|(key, _)| !rejected.contains(key))
        .map(|(_, set)| set)
        .collect();
    summary.loaded = sets.len();
    Ok(ParsedInstruments { sets, summary })
}

/// Loads an instrument definition file.
///
/// # Errors
///
/// Returns `FileError::Io` if the file cannot be opened.
pub fn load_instruments(
    path: impl AsRef<Path>,
    fallback: Option<Date>,
) -> FileResult<ParsedInstruments> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| FileError::io(path, e))?;
    let source = path.display().to_string();
    let parsed = parse_instruments(file, &source, fallback)?;
    info!(file = %source, summary = %parsed.summary, "instruments loaded");
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmds_core::ErrorKind;
    use rmds_curves::instruments::InstrumentKind;

    const HEADER: &str = "curve_name,as_of_date,instrument_type,maturity,quote,param\n";

    fn date() -> Date {
        Date::from_ymd(2020, 12, 30).unwrap()
    }

    fn parse(rows: &str) -> ParsedInstruments {
        let text = format!("{HEADER}{rows}");
        parse_instruments(text.as_bytes(), "inst.csv", Some(date())).unwrap()
    }

    #[test]
    fn test_groups_by_curve() {
        let parsed = parse(
            "SOFR,2020-12-30,DEPOSIT,90,0.01,\n\
             SOFR,,SWAP,730,0.012,182\n\
             ESTR,2020-12-30,ZCB,2021-12-30,98.5,\n\
             SOFR,2020-12-30,swap,1095,0.013,\n",
        );
        assert!(parsed.summary.is_clean());
        assert_eq!(parsed.sets.len(), 2);

        let estr = &parsed.sets[0];
        assert_eq!(estr.name, "ESTR");
        assert_eq!(estr.instruments[0].maturity(), 365);
        assert_eq!(
            estr.instruments[0].kind(),
            InstrumentKind::ZeroCouponBond { face: 100.0 }
        );

        let sofr = &parsed.sets[1];
        assert_eq!(sofr.instruments.len(), 3);
        assert_eq!(sofr.instruments[1].kind(), InstrumentKind::ParSwap { period_days: 182 });
        assert_eq!(sofr.instruments[2].kind(), InstrumentKind::ParSwap { period_days: 365 });
    }

    #[test]
    fn test_bad_row_rejects_its_curve() {
        let parsed = parse(
            "SOFR,2020-12-30,DEPOSIT,90,0.01,\n\
             SOFR,2020-12-30,FRA,180,0.01,\n\
             ESTR,2020-12-30,DEPOSIT,90,0.005,\n",
        );
        assert_eq!(parsed.sets.len(), 1);
        assert_eq!(parsed.sets[0].name, "ESTR");
        assert_eq!(parsed.summary.loaded, 1);
        assert_eq!(parsed.summary.skipped[0].location, "inst.csv:3");
    }

    #[test]
    fn test_bad_maturity_is_type_mismatch() {
        let parsed = parse("SOFR,2020-12-30,DEPOSIT,3M,0.01,\n");
        assert!(parsed.sets.is_empty());
        assert_eq!(parsed.summary.skipped[0].kind, ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_unparseable_quote_skipped() {
        let parsed = parse("SOFR,2020-12-30,DEPOSIT,90,abc,\nSOFR,2020-12-30,DEPOSIT,180,0.01,\n");
        assert_eq!(parsed.sets.len(), 1);
        assert_eq!(parsed.sets[0].instruments.len(), 1);
        assert_eq!(parsed.summary.skipped.len(), 1);
    }
}
