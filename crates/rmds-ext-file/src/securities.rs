//! Security definition files.
//!
//! Tab-separated with a header row. Each row becomes a
//! [`SecurityRecord`] keyed by the header names, so the column order is
//! free and variant-specific columns may be left empty for other variants.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info, warn};

use rmds_securities::{Security, SecurityRecord, SecurityRegistry};

use crate::error::{FileError, FileResult};
use crate::summary::LoadSummary;

/// Securities read from a definition file.
#[derive(Debug, Clone, Default)]
pub struct ParsedSecurities {
    /// Securities built, in file order.
    pub securities: Vec<Security>,
    /// Accepted and skipped rows.
    pub summary: LoadSummary,
}

/// Parses tab-separated security rows from a reader.
///
/// # Errors
///
/// Returns `FileError::Parse` if the header cannot be read. Rows that fail
/// to build a security are reported in the summary.
pub fn parse_securities<R: Read>(reader: R, source: &str) -> FileResult<ParsedSecurities> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .from_reader(reader);
    let headers = reader
        .headers()
        .map_err(|e| FileError::parse(format!("{source}:1"), e.to_string()))?
        .clone();

    let mut parsed = ParsedSecurities::default();
    for record in reader.records() {
        let built = record
            .map_err(|e| {
                let line = e.position().map_or(0, csv::Position::line);
                (line, FileError::parse(format!("{source}:{line}"), e.to_string()))
            })
            .and_then(|record| {
                let line = record.position().map_or(0, csv::Position::line);
                let fields: SecurityRecord = headers.iter().zip(record.iter()).collect();
                fields.to_security().map_err(|e| (line, FileError::from(e)))
            });

        match built {
            Ok(security) => {
                debug!(security = %security, "parsed security");
                parsed.securities.push(security);
                parsed.summary.loaded += 1;
            }
            Err((line, e)) => {
                let location = format!("{source}:{line}");
                warn!(%location, error = %e, "skipping security");
                parsed.summary.skip(location, e.kind(), e.to_string());
            }
        }
    }
    Ok(parsed)
}

/// Loads a security definition file into a registry.
///
/// Securities are scheduled for the registry's valuation date as they are
/// added.
///
/// # Errors
///
/// Returns `FileError::Io` if the file cannot be opened.
pub fn load_securities(
    path: impl AsRef<Path>,
    registry: &mut SecurityRegistry,
) -> FileResult<LoadSummary> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| FileError::io(path, e))?;
    let source = path.display().to_string();

    let ParsedSecurities {
        securities,
        mut summary,
    } = parse_securities(file, &source)?;
    for security in securities {
        let id = security.id().to_string();
        if let Err(e) = registry.add_security(security) {
            warn!(%id, error = %e, "security could not be scheduled");
            summary.loaded -= 1;
            summary.skip(format!("{source}:{id}"), e.kind(), e.to_string());
        }
    }

    info!(file = %source, summary = %summary, "securities loaded");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmds_core::ErrorKind;
    use rmds_securities::SecurityKind;

    const FILE: &str = "SecType\tSecId\tDiscountCurve\tMaturity\tCpnRate\tFrequency\tPriceCurve\tQuantity\n\
Bond\tUST_2025\tOIS.USD\t2025-12-30\t0.05\t2\t\t\n\
Equity\tACME\t\t\t\t\tACME.PX\t1500\n\
Swap\tIRS_1\t\t\t\t\t\t\n\
Bond\tBAD_FREQ\tOIS.USD\t2025-12-30\t0.05\t5\t\t\n";

    #[test]
    fn test_parse_rows() {
        let parsed = parse_securities(FILE.as_bytes(), "sec.tsv").unwrap();
        assert_eq!(parsed.summary.loaded, 2);
        assert_eq!(parsed.securities[0].id(), "UST_2025");
        assert!(matches!(parsed.securities[1].kind(), SecurityKind::Equity(_)));

        let skipped = &parsed.summary.skipped;
        assert_eq!(skipped.len(), 2);
        assert_eq!(skipped[0].location, "sec.tsv:4");
        assert!(skipped[0].message.contains("Swap"));
        assert_eq!(skipped[1].kind, ErrorKind::Construction);
    }

    #[test]
    fn test_short_rows_read_as_empty_fields() {
        let text = "SecType\tSecId\tPriceCurve\tQuantity\tExtra\nEquity\tACME\tACME.PX\t10\n";
        let parsed = parse_securities(text.as_bytes(), "sec.tsv").unwrap();
        assert_eq!(parsed.summary.loaded, 1);
    }
}
