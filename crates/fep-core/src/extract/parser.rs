use crate::domain::{SampleRecord, WindowId};
use bigdecimal::BigDecimal;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("expected at least {expected} whitespace-separated fields, found {found}")]
    MissingFields { expected: usize, found: usize },
    #[error("identifier '{token}' has no '/' separating the window id")]
    MissingWindowSeparator { token: String },
    #[error("identifier '{token}' has no '_'-delimited geometry coordinate")]
    MissingGeometrySegment { token: String },
    #[error("{field} '{token}' is not a valid decimal number")]
    InvalidNumber { field: &'static str, token: String },
}

/// Parse one results-file line into a sample record.
///
/// Field 0 is `<window>/<path>` where the second-to-last `_` segment of
/// `<path>` is the geometry coordinate; `energy_column` holds the energy.
pub(crate) fn parse_record(
    line: &str,
    line_number: usize,
    energy_column: usize,
) -> Result<SampleRecord, RecordError> {
    let fields = line.split_whitespace().collect::<Vec<_>>();
    if fields.len() <= energy_column {
        return Err(RecordError::MissingFields {
            expected: energy_column + 1,
            found: fields.len(),
        });
    }

    let identifier = fields[0];
    let (window_label, remainder) =
        identifier
            .split_once('/')
            .ok_or_else(|| RecordError::MissingWindowSeparator {
                token: identifier.to_string(),
            })?;

    let window = WindowId::parse(window_label).ok_or_else(|| RecordError::InvalidNumber {
        field: "window id",
        token: window_label.to_string(),
    })?;

    let geometry_token = geometry_segment(remainder).ok_or_else(|| {
        RecordError::MissingGeometrySegment {
            token: identifier.to_string(),
        }
    })?;
    let geometry =
        BigDecimal::from_str(geometry_token).map_err(|_| RecordError::InvalidNumber {
            field: "geometry coordinate",
            token: geometry_token.to_string(),
        })?;

    let energy_token = fields[energy_column];
    let energy = BigDecimal::from_str(energy_token).map_err(|_| RecordError::InvalidNumber {
        field: "energy",
        token: energy_token.to_string(),
    })?;

    Ok(SampleRecord {
        line_number,
        window,
        geometry,
        energy,
    })
}

fn geometry_segment(path: &str) -> Option<&str> {
    let mut segments = path.rsplit('_');
    segments.next()?;
    segments.next()
}
