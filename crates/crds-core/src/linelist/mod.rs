//! Line lists as handed to the synthesizer: file readers for HITRAN `.par`
//! and JSON exports, and caller-side selection helpers.

pub mod parser;
pub mod selection;

pub use parser::{LineListError, LineListFormat, LineRecord, parse_hitran_par, parse_json_lines};
pub use selection::{lines_in_window, strongest_lines};

use crate::domain::{CrdsError, CrdsResult, SpectralLine};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// HITRAN identifier filter for `.par` files. JSON lists carry no
/// identifiers and ignore it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineListQuery {
    #[serde(default)]
    pub molecule_id: Option<u16>,
    #[serde(default)]
    pub isotopologue: Option<u8>,
}

impl LineListQuery {
    pub fn matches(&self, record: &LineRecord) -> bool {
        self.molecule_id.is_none_or(|id| id == record.molecule_id)
            && self
                .isotopologue
                .is_none_or(|isotopologue| isotopologue == record.isotopologue)
    }
}

pub fn read_line_list(
    path: &Path,
    format: LineListFormat,
    query: LineListQuery,
) -> CrdsResult<Vec<SpectralLine>> {
    let source = read_line_list_source(path)?;
    let lines = match format {
        LineListFormat::HitranPar => parse_hitran_par(&source)
            .map_err(|error| line_list_error(path, error))?
            .into_iter()
            .filter(|record| query.matches(record))
            .map(|record| record.line)
            .collect(),
        LineListFormat::Json => {
            parse_json_lines(&source).map_err(|error| line_list_error(path, error))?
        }
    };

    debug!(
        path = %path.display(),
        ?format,
        lines = lines.len(),
        "loaded line list"
    );
    Ok(lines)
}

fn read_line_list_source(path: &Path) -> CrdsResult<String> {
    fs::read_to_string(path).map_err(|source| {
        CrdsError::io_system(
            "IO.LINE_LIST_READ",
            format!("failed to read line list '{}': {}", path.display(), source),
        )
    })
}

fn line_list_error(path: &Path, error: LineListError) -> CrdsError {
    CrdsError::input_validation(
        "INPUT.LINE_LIST",
        format!("line list '{}': {}", path.display(), error),
    )
}
