//! CSV loan tapes.
//!
//! A tape lists one tranche per row:
//!
//! ```text
//! name,count,principal,annual_rate,term_years,default_probability,prepay_probability,recovery_rate
//! prime,40,10000,0.10,10,0.02,0.05,0.40
//! near-prime,10,8000,0.14,7,0.05,0.04,0.25
//! ```
//!
//! `recovery_rate` may be omitted and defaults to zero.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use loanmc_core::{LoanTerms, LoanTranche};

use crate::error::{ConfigError, ConfigResult};

/// CSV record for one tranche.
#[derive(Debug, Deserialize)]
struct TapeRecord {
    name: String,
    count: u32,
    principal: f64,
    annual_rate: f64,
    term_years: u32,
    default_probability: f64,
    prepay_probability: f64,
    #[serde(default)]
    recovery_rate: f64,
}

/// Loads a loan tape from a CSV file.
pub fn load_loan_tape(path: impl AsRef<Path>) -> ConfigResult<Vec<LoanTranche>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let tranches = read_loan_tape(file)?;
    info!(
        path = %path.display(),
        tranches = tranches.len(),
        loans = tranches.iter().map(|t| u64::from(t.count)).sum::<u64>(),
        "loaded loan tape"
    );
    Ok(tranches)
}

/// Reads a loan tape from any reader.
///
/// Every row is validated; the first bad row aborts with its line number.
pub fn read_loan_tape<R: Read>(reader: R) -> ConfigResult<Vec<LoanTranche>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut tranches = Vec::new();
    for (i, result) in reader.deserialize().enumerate() {
        // header is line 1
        let line = i as u64 + 2;
        let record: TapeRecord = result.map_err(|e| ConfigError::tape(line, e.to_string()))?;

        if record.name.is_empty() {
            return Err(ConfigError::tape(line, "tranche name is empty"));
        }
        if record.count == 0 {
            return Err(ConfigError::tape(line, "count must be at least 1"));
        }

        let terms = LoanTerms {
            principal: record.principal,
            annual_rate: record.annual_rate,
            term_years: record.term_years,
            default_probability: record.default_probability,
            prepay_probability: record.prepay_probability,
            recovery_rate: record.recovery_rate,
        };
        terms
            .validate()
            .map_err(|e| ConfigError::tape(line, e.to_string()))?;

        tranches.push(LoanTranche::new(record.name, record.count, terms));
    }

    if tranches.is_empty() {
        return Err(ConfigError::tape(1, "loan tape has no rows"));
    }
    Ok(tranches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const HEADER: &str =
        "name,count,principal,annual_rate,term_years,default_probability,prepay_probability";

    #[test]
    fn test_read_tape_without_recovery_column() {
        let csv = format!("{HEADER}\nprime,40,10000,0.10,10,0.02,0.05\nsub, 10 ,8000,0.14,7,0.05,0.04\n");
        let tranches = read_loan_tape(csv.as_bytes()).unwrap();

        assert_eq!(tranches.len(), 2);
        assert_eq!(tranches[0].name, "prime");
        assert_eq!(tranches[0].count, 40);
        assert_eq!(tranches[1].count, 10);
        assert_eq!(tranches[1].terms.term_years, 7);
        assert_relative_eq!(tranches[1].terms.annual_rate, 0.14);
        assert_eq!(tranches[0].terms.recovery_rate, 0.0);
    }

    #[test]
    fn test_read_tape_with_recovery_column() {
        let csv = format!("{HEADER},recovery_rate\nprime,5,10000,0.10,10,0.02,0.05,0.4\n");
        let tranches = read_loan_tape(csv.as_bytes()).unwrap();
        assert_relative_eq!(tranches[0].terms.recovery_rate, 0.4);
    }

    #[test]
    fn test_bad_row_reports_line() {
        let csv = format!("{HEADER}\nprime,40,10000,0.10,10,0.02,0.05\nbad,1,10000,0.10,10,1.5,0.05\n");
        let err = read_loan_tape(csv.as_bytes()).unwrap_err();
        match err {
            ConfigError::Tape { line, reason } => {
                assert_eq!(line, 3);
                assert!(reason.contains("default_probability"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unparseable_row() {
        let csv = format!("{HEADER}\nprime,many,10000,0.10,10,0.02,0.05\n");
        assert!(matches!(
            read_loan_tape(csv.as_bytes()),
            Err(ConfigError::Tape { line: 2, .. })
        ));
    }

    #[test]
    fn test_empty_tape() {
        let csv = format!("{HEADER}\n");
        assert!(read_loan_tape(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_zero_count_rejected() {
        let csv = format!("{HEADER}\nprime,0,10000,0.10,10,0.02,0.05\n");
        assert!(read_loan_tape(csv.as_bytes()).is_err());
    }
}
