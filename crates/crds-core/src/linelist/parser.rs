//! HITRAN `.par` and JSON line-list readers.
//!
//! `.par` records are the 160-character fixed-width HITRAN2004+ layout. Only
//! the leading fields the synthesizer needs are decoded:
//!
//! | columns | field                        |
//! |---------|------------------------------|
//! | 1-2     | molecule id                  |
//! | 3       | isotopologue (`0` = 10, `A` = 11, ...) |
//! | 4-15    | wavenumber, cm⁻¹             |
//! | 16-25   | line intensity               |
//! | 26-35   | Einstein A (skipped)         |
//! | 36-40   | air-broadened half-width     |

use crate::domain::{CrdsError, SpectralLine};
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::path::Path;

const MOLECULE_COLUMNS: Range<usize> = 0..2;
const ISOTOPOLOGUE_COLUMNS: Range<usize> = 2..3;
const WAVENUMBER_COLUMNS: Range<usize> = 3..15;
const INTENSITY_COLUMNS: Range<usize> = 15..25;
const AIR_WIDTH_COLUMNS: Range<usize> = 35..40;
const MIN_RECORD_WIDTH: usize = 40;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LineListError {
    #[error("line {line_number}: record is {width} characters, expected at least {MIN_RECORD_WIDTH}")]
    TruncatedRecord { line_number: usize, width: usize },
    #[error("line {line_number}: record contains non-ASCII characters")]
    NonAsciiRecord { line_number: usize },
    #[error("line {line_number}: could not parse {field} from '{raw}'")]
    InvalidField {
        line_number: usize,
        field: &'static str,
        raw: String,
    },
    #[error("line {line_number}: {message}")]
    InvalidLine { line_number: usize, message: String },
    #[error("line list JSON is malformed: {message}")]
    Json { message: String },
}

impl From<LineListError> for CrdsError {
    fn from(error: LineListError) -> Self {
        CrdsError::input_validation("INPUT.LINE_LIST", error.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineListFormat {
    HitranPar,
    Json,
}

impl LineListFormat {
    /// `.json` is JSON; everything else is treated as HITRAN `.par`.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|extension| extension.to_str()) {
            Some(extension) if extension.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::HitranPar,
        }
    }
}

/// A decoded `.par` record: the validated line plus its HITRAN identifiers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineRecord {
    pub molecule_id: u16,
    pub isotopologue: u8,
    pub line: SpectralLine,
}

pub fn parse_hitran_par(source: &str) -> Result<Vec<LineRecord>, LineListError> {
    let mut records = Vec::new();
    for (index, raw_line) in source.lines().enumerate() {
        let line_number = index + 1;
        let record = raw_line.trim_end_matches('\r');
        if record.trim().is_empty() {
            continue;
        }
        records.push(parse_par_record(record, line_number)?);
    }
    Ok(records)
}

fn parse_par_record(record: &str, line_number: usize) -> Result<LineRecord, LineListError> {
    if !record.is_ascii() {
        return Err(LineListError::NonAsciiRecord { line_number });
    }
    if record.len() < MIN_RECORD_WIDTH {
        return Err(LineListError::TruncatedRecord {
            line_number,
            width: record.len(),
        });
    }

    let molecule_raw = &record[MOLECULE_COLUMNS];
    let molecule_id = molecule_raw
        .trim()
        .parse::<u16>()
        .map_err(|_| invalid_field(line_number, "molecule id", molecule_raw))?;

    let isotopologue_raw = &record[ISOTOPOLOGUE_COLUMNS];
    let isotopologue = parse_isotopologue(isotopologue_raw)
        .ok_or_else(|| invalid_field(line_number, "isotopologue", isotopologue_raw))?;

    let center_frequency =
        parse_fixed_float(record, WAVENUMBER_COLUMNS, line_number, "wavenumber")?;
    let line_intensity = parse_fixed_float(record, INTENSITY_COLUMNS, line_number, "intensity")?;
    let air_broadening_coefficient =
        parse_fixed_float(record, AIR_WIDTH_COLUMNS, line_number, "air half-width")?;

    let line = SpectralLine::new(center_frequency, line_intensity, air_broadening_coefficient)
        .map_err(|error| LineListError::InvalidLine {
            line_number,
            message: error.message().to_string(),
        })?;

    Ok(LineRecord {
        molecule_id,
        isotopologue,
        line,
    })
}

fn parse_isotopologue(raw: &str) -> Option<u8> {
    let character = raw.chars().next()?;
    match character {
        '1'..='9' => character.to_digit(10).map(|digit| digit as u8),
        '0' => Some(10),
        'A'..='Z' => Some(character as u8 - b'A' + 11),
        _ => None,
    }
}

fn parse_fixed_float(
    record: &str,
    columns: Range<usize>,
    line_number: usize,
    field: &'static str,
) -> Result<f64, LineListError> {
    let raw = &record[columns];
    // Fortran-style exponents (`1.0D-20`) occur in hand-edited files.
    let normalized = raw.trim().replace(['D', 'd'], "E");
    normalized
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| invalid_field(line_number, field, raw))
}

fn invalid_field(line_number: usize, field: &'static str, raw: &str) -> LineListError {
    LineListError::InvalidField {
        line_number,
        field,
        raw: raw.to_string(),
    }
}

/// JSON array of line objects keyed either by `center_frequency` /
/// `line_intensity` / `air_broadening_coefficient` or by the line-list
/// service names `nu` / `sw` / `gamma_air`.
pub fn parse_json_lines(source: &str) -> Result<Vec<SpectralLine>, LineListError> {
    let lines: Vec<SpectralLine> =
        serde_json::from_str(source).map_err(|error| LineListError::Json {
            message: error.to_string(),
        })?;

    for (index, line) in lines.iter().enumerate() {
        line.validate().map_err(|error| LineListError::InvalidLine {
            line_number: index + 1,
            message: error.message().to_string(),
        })?;
    }
    Ok(lines)
}
