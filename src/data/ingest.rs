//! Permit CSV ingestion
//!
//! The payload is a loosely formatted CSV export: one header line followed by
//! one facility per line. Rows are decoded positionally (see [`Column`]) and
//! filtered; a bad row never stops the rest of the payload from loading.
//!
//! [`Column`]: crate::data::record::Column

use crate::data::record::FacilityRecord;
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

pub use crate::data::record::RowError;

/// A double-quoted run or a bare run without delimiters, followed by the
/// delimiter or the end of the row. A quoted run only ends at a quote that is
/// itself followed by the delimiter or the end of the row.
static TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?:"(?P<quoted>.*?)"|(?P<bare>[^",]+))\s*(?:,|$)"#)
        .expect("token pattern is valid")
});

/// A row that was rejected before the acceptance filter
#[derive(Debug, Clone, PartialEq)]
pub struct RowFailure {
    /// 1-based line number in the payload, the header being line 1
    pub line: usize,
    pub error: RowError,
}

/// Outcome of one ingestion pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngestReport {
    /// Accepted records, in payload order
    pub records: Vec<FacilityRecord>,
    /// Rows that could not be decoded
    pub failures: Vec<RowFailure>,
    /// Rows that decoded but lacked a required attribute
    pub incomplete: usize,
    /// Rows without any token
    pub blank: usize,
}

impl IngestReport {
    /// Number of data rows looked at, header excluded
    pub fn rows_seen(&self) -> usize {
        self.records.len() + self.failures.len() + self.incomplete + self.blank
    }
}

/// Splits one row into trimmed tokens.
///
/// Quoted tokens lose their quotes, may contain the delimiter, and have `""`
/// unescaped to `"`. Empty fields between two delimiters produce no token at
/// all, so they shift every following column.
pub fn tokenize(row: &str) -> Vec<Cow<'_, str>> {
    TOKEN
        .captures_iter(row)
        .filter_map(|caps| {
            if let Some(quoted) = caps.name("quoted") {
                return Some(unescape_quotes(quoted.as_str().trim()));
            }
            // Whitespace-only runs are not fields
            caps.name("bare")
                .map(|bare| bare.as_str().trim())
                .filter(|token| !token.is_empty())
                .map(Cow::Borrowed)
        })
        .collect()
}

fn unescape_quotes(token: &str) -> Cow<'_, str> {
    if token.contains("\"\"") {
        Cow::Owned(token.replace("\"\"", "\""))
    } else {
        Cow::Borrowed(token)
    }
}

/// Parses a permit payload into the records the map can show
pub fn ingest(raw: &str) -> Vec<FacilityRecord> {
    ingest_with_report(raw).records
}

/// Like [`ingest`], also accounting for every dropped row
pub fn ingest_with_report(raw: &str) -> IngestReport {
    let mut report = IngestReport::default();

    // The first line is the header; it is never checked against the schema.
    for (index, row) in raw.split('\n').enumerate().skip(1) {
        let tokens = tokenize(row);
        if tokens.is_empty() {
            report.blank += 1;
            continue;
        }

        let fields: Vec<&str> = tokens.iter().map(|token| token.as_ref()).collect();
        match FacilityRecord::from_tokens(&fields) {
            Ok(record) if record.is_complete() => report.records.push(record),
            Ok(_) => report.incomplete += 1,
            Err(error) => {
                log::warn!("failed to parse row {}: {} {:?}", index + 1, error, tokens);
                report.failures.push(RowFailure {
                    line: index + 1,
                    error,
                });
            }
        }
    }

    log::info!(
        "ingested {} of {} permit rows ({} failed, {} incomplete)",
        report.records.len(),
        report.rows_seen(),
        report.failures.len(),
        report.incomplete
    );
    log::debug!("accepted records: {:?}", report.records);

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "X,Y,OBJECTID,Company,Facility,Permit_Type,VOC_TPY,Methane_75_VOC,Latitude,Longitude";

    #[test]
    fn test_tokenize_plain_row() {
        assert_eq!(tokenize("a,b, c ,d"), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_tokenize_quoted_delimiter() {
        assert_eq!(
            tokenize(r#"1,"Acme, Inc.",x"#),
            vec!["1", "Acme, Inc.", "x"]
        );
    }

    #[test]
    fn test_tokenize_escaped_quotes() {
        assert_eq!(
            tokenize(r#"1,2,7,"Acme ""Big"" Inc",Plant,GCP,5,5,34,-104"#),
            vec!["1", "2", "7", r#"Acme "Big" Inc"#, "Plant", "GCP", "5", "5", "34", "-104"]
        );
        // A stray quote does not end the run unless a delimiter follows it
        assert_eq!(
            tokenize(r#"1,"Acme "Big" Inc",x"#),
            vec!["1", r#"Acme "Big" Inc"#, "x"]
        );
    }

    #[test]
    fn test_ingest_keeps_escaped_company() {
        let payload = format!(
            "{HEADER}\n1,2,7,\"Acme \"\"Big\"\" Inc\",Plant,GCP,5,5,34,-104"
        );
        let records = ingest(&payload);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].company, r#"Acme "Big" Inc"#);
    }

    #[test]
    fn test_tokenize_collapses_empty_fields() {
        assert_eq!(tokenize("a,,b"), vec!["a", "b"]);
    }

    #[test]
    fn test_tokenize_blank_rows() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("\r").is_empty());
        assert!(tokenize(",,,").is_empty());
    }

    #[test]
    fn test_tokenize_strips_carriage_return() {
        assert_eq!(tokenize("a,b\r"), vec!["a", "b"]);
    }

    #[test]
    fn test_header_only_payload() {
        let report = ingest_with_report(HEADER);
        assert!(report.records.is_empty());
        assert_eq!(report.rows_seen(), 0);
    }

    #[test]
    fn test_empty_payload() {
        assert!(ingest("").is_empty());
    }

    #[test]
    fn test_report_counts() {
        let payload = format!(
            "{HEADER}\n\
             1,2,1,A,F1,GCP,5,6,34.0,-104.0\n\
             1,2,2,B,F2,GCP,0,6,34.0,-104.0\n\
             1,2,3,C\n\
             \n\
             1,2,4,D,F4,GCP,5,6,35.0,-105.0\n"
        );
        let report = ingest_with_report(&payload);

        assert_eq!(report.records.len(), 2);
        assert_eq!(report.records[0].object_id, 1);
        assert_eq!(report.records[1].object_id, 4);
        assert_eq!(report.incomplete, 1);
        assert_eq!(report.blank, 2);
        assert_eq!(
            report.failures,
            vec![RowFailure {
                line: 4,
                error: RowError::TooFewColumns {
                    expected: 10,
                    found: 4
                }
            }]
        );
        assert_eq!(report.rows_seen(), 6);
    }
}
