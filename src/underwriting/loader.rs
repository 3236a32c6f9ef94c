//! CSV-based underwriting table loader
//!
//! Loads score-band tables from data/underwriting/

use super::rates::ScoreBand;
use crate::error::{EligibilityError, Result};
use std::fs::File;
use std::path::Path;

/// Default path to the underwriting tables directory
pub const DEFAULT_UNDERWRITING_PATH: &str = "data/underwriting";

pub const RATE_BANDS_FILE: &str = "rate_bands.csv";
pub const CREDIT_MULTIPLIERS_FILE: &str = "credit_multipliers.csv";

/// Load a `min_score,value` table from a file in `dir`
pub fn load_score_bands(dir: &Path, file_name: &str) -> Result<Vec<ScoreBand>> {
    let path = dir.join(file_name);
    let file = File::open(&path).map_err(|source| EligibilityError::io(&path, source))?;
    read_score_bands(file, file_name)
}

/// Parse a `min_score,value` table from any reader
pub fn read_score_bands<R: std::io::Read>(reader: R, table: &str) -> Result<Vec<ScoreBand>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut bands = Vec::new();

    for result in csv_reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let invalid = |message: String| EligibilityError::InvalidTable {
            table: table.to_string(),
            line,
            message,
        };

        if record.len() < 2 {
            return Err(invalid(format!("expected 2 columns, found {}", record.len())));
        }

        let min_score: u32 = record[0]
            .trim()
            .parse()
            .map_err(|_| invalid(format!("min_score {:?} is not an integer", &record[0])))?;
        let value: f64 = record[1]
            .trim()
            .parse()
            .map_err(|_| invalid(format!("value {:?} is not a number", &record[1])))?;

        if !value.is_finite() || value < 0.0 {
            return Err(invalid(format!("value {} must be a non-negative number", value)));
        }

        bands.push(ScoreBand::new(min_score, value));
    }

    if bands.is_empty() {
        return Err(EligibilityError::EmptyTable(table.to_string()));
    }

    Ok(bands)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_score_bands() {
        let data = "min_score,annual_rate\n800,9.5\n750,10.5\n";
        let bands = read_score_bands(data.as_bytes(), RATE_BANDS_FILE).expect("table parses");
        assert_eq!(bands, vec![ScoreBand::new(800, 9.5), ScoreBand::new(750, 10.5)]);
    }

    #[test]
    fn test_rejects_malformed_rows() {
        let data = "min_score,annual_rate\n800,cheap\n";
        let err = read_score_bands(data.as_bytes(), RATE_BANDS_FILE).unwrap_err();
        assert!(matches!(err, EligibilityError::InvalidTable { line: 2, .. }), "{err}");

        let data = "min_score,annual_rate\n800,-1\n";
        assert!(read_score_bands(data.as_bytes(), RATE_BANDS_FILE).is_err());
    }

    #[test]
    fn test_rejects_empty_table() {
        let data = "min_score,multiplier\n";
        let err = read_score_bands(data.as_bytes(), CREDIT_MULTIPLIERS_FILE).unwrap_err();
        assert!(matches!(err, EligibilityError::EmptyTable(_)));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_score_bands(Path::new("no/such/dir"), RATE_BANDS_FILE).unwrap_err();
        assert!(err.to_string().contains("rate_bands.csv"));
    }
}
