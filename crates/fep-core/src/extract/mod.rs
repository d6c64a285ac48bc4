//! Window extraction: results file → per-window before/this/after energies.

mod parser;

pub use parser::RecordError;

use crate::domain::{FepError, ParserResult, WindowSet};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

/// Energy column used by the reference results layout (0-based).
pub const DEFAULT_ENERGY_COLUMN: usize = 9;

/// Read `path` and group its sample records by window.
///
/// Any malformed line aborts the whole extraction.
pub fn extract_windows(path: &Path, energy_column: usize) -> ParserResult<WindowSet> {
    let file = File::open(path).map_err(|source| {
        FepError::io_system(
            "IO.RESULTS_READ",
            format!("failed to open results file '{}': {}", path.display(), source),
        )
    })?;

    let windows = extract_from_reader(
        BufReader::new(file),
        &path.display().to_string(),
        energy_column,
    )?;
    info!(
        path = %path.display(),
        windows = windows.len(),
        samples = windows.total_samples(),
        "extracted results file"
    );
    Ok(windows)
}

/// Same as [`extract_windows`] over any buffered source; `source_name` only
/// labels diagnostics.
pub fn extract_from_reader<R: BufRead>(
    reader: R,
    source_name: &str,
    energy_column: usize,
) -> ParserResult<WindowSet> {
    let mut windows = WindowSet::new();

    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line.map_err(|source| match source.kind() {
            io::ErrorKind::InvalidData => FepError::malformed_record(
                source_name,
                line_number,
                "<invalid UTF-8>",
                "line is not valid UTF-8 text",
            ),
            _ => FepError::io_system(
                "IO.RESULTS_READ",
                format!(
                    "failed to read '{}' at line {}: {}",
                    source_name, line_number, source
                ),
            ),
        })?;
        if line.trim().is_empty() {
            continue;
        }

        let record = parser::parse_record(&line, line_number, energy_column).map_err(|reason| {
            FepError::malformed_record(source_name, line_number, &line, reason)
        })?;
        debug!(
            line = record.line_number,
            window = %record.window,
            position = record.position().as_str(),
            "classified sample"
        );
        windows.insert(record);
    }

    Ok(windows)
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_ENERGY_COLUMN, extract_from_reader, extract_windows};
    use crate::domain::FepErrorCategory;
    use bigdecimal::BigDecimal;
    use std::io::Cursor;
    use std::str::FromStr;

    fn line(window: &str, geometry: &str, energy: &str) -> String {
        format!("{window}/md_{window}/sp_{geometry}_1.log 0 0 0 0 0 0 0 0 {energy}\n")
    }

    fn decimals(values: &[&str]) -> Vec<BigDecimal> {
        values
            .iter()
            .map(|value| BigDecimal::from_str(value).unwrap())
            .collect()
    }

    #[test]
    fn every_record_lands_in_exactly_one_sequence() {
        let source = [
            line("0.02", "0.01", "-1.1"),
            line("0.02", "0.02", "-1.2"),
            line("0.02", "0.03", "-1.3"),
            line("0.02", "0.02", "-1.4"),
            line("0.03", "0.03", "-2.0"),
        ]
        .concat();

        let windows =
            extract_from_reader(Cursor::new(source), "memory", DEFAULT_ENERGY_COLUMN).unwrap();

        let first = windows.get("0.02").unwrap();
        assert_eq!(first.before, decimals(&["-1.1"]));
        assert_eq!(first.this, decimals(&["-1.2", "-1.4"]));
        assert_eq!(first.after, decimals(&["-1.3"]));
        assert_eq!(first.total_samples(), 4);
        assert_eq!(windows.get("0.03").unwrap().total_samples(), 1);
        assert_eq!(windows.total_samples(), 5);
    }

    #[test]
    fn blank_lines_are_skipped_but_counted_for_line_numbers() {
        let source = format!("\n{}   \nbroken\n", line("0.1", "0.1", "-3.0"));
        let error = extract_from_reader(Cursor::new(source), "memory", DEFAULT_ENERGY_COLUMN)
            .unwrap_err();
        assert!(error.message().contains("at line 4"), "{}", error.message());
    }

    #[test]
    fn geometry_exactly_one_tolerance_away_is_this() {
        let source = [
            line("0.1", "0.0999", "-1.0"),
            line("0.1", "0.1001", "-2.0"),
            line("0.1", "0.0998", "-3.0"),
        ]
        .concat();

        let windows =
            extract_from_reader(Cursor::new(source), "memory", DEFAULT_ENERGY_COLUMN).unwrap();
        let bucket = windows.get("0.1").unwrap();
        assert_eq!(bucket.this, decimals(&["-1.0", "-2.0"]));
        assert_eq!(bucket.before, decimals(&["-3.0"]));
        assert!(bucket.after.is_empty());
    }

    #[test]
    fn invalid_utf8_is_a_malformed_record() {
        let mut source = line("0.1", "0.1", "-1.0").into_bytes();
        source.extend_from_slice(b"0.1/md_0.1/sp_0.1_1.log \xff\xfe 0 0 0 0 0 0 0 -1.0\n");

        let error =
            extract_from_reader(Cursor::new(source), "memory", DEFAULT_ENERGY_COLUMN).unwrap_err();
        assert_eq!(error.category(), FepErrorCategory::InputValidationError);
        assert_eq!(error.exit_code(), 2);
        assert_eq!(error.placeholder(), "INPUT.MALFORMED_RECORD");
        assert!(error.message().contains("at line 2"), "{}", error.message());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let temp = tempfile::tempdir().unwrap();
        let error = extract_windows(&temp.path().join("absent.dat"), DEFAULT_ENERGY_COLUMN)
            .unwrap_err();
        assert_eq!(error.category(), FepErrorCategory::IoSystemError);
        assert_eq!(error.placeholder(), "IO.RESULTS_READ");
    }
}
