//! JSON-described synthesis runs: load, resolve species and line lists,
//! synthesize the mixture.

pub mod model;

pub use model::{
    DEFAULT_GRID_POINTS, ResolvedConditions, ScenarioReport, SimulationScenario, SpeciesEntry,
    SpectralRange,
};

use crate::common::{MolarMassTable, PhysicalConstants};
use crate::domain::{CrdsError, CrdsResult, SpectralLine};
use crate::linelist::{lines_in_window, read_line_list, strongest_lines};
use crate::numerics::FrequencyGrid;
use crate::synthesis::{GasComponent, SpectrumSynthesizer};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug, thiserror::Error)]
pub enum ScenarioLoadError {
    #[error("failed to read scenario '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse scenario '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl From<ScenarioLoadError> for CrdsError {
    fn from(error: ScenarioLoadError) -> Self {
        match error {
            ScenarioLoadError::Read { .. } => {
                CrdsError::io_system("IO.SCENARIO_READ", error.to_string())
            }
            ScenarioLoadError::Parse { .. } => {
                CrdsError::input_validation("INPUT.SCENARIO_PARSE", error.to_string())
            }
        }
    }
}

pub fn load_scenario(path: impl AsRef<Path>) -> Result<SimulationScenario, ScenarioLoadError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| ScenarioLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&source).map_err(|source| ScenarioLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Species resolved to a mole fraction, a molar mass and a filtered line list.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSpecies {
    pub formula: String,
    pub mole_fraction: f64,
    pub molar_mass: f64,
    pub lines: Vec<SpectralLine>,
}

impl ResolvedSpecies {
    pub fn as_component(&self) -> GasComponent<'_> {
        GasComponent {
            species: &self.formula,
            lines: &self.lines,
            concentration: self.mole_fraction,
            molecular_mass: self.molar_mass,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioRunner {
    constants: PhysicalConstants,
    molar_masses: MolarMassTable,
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new(
            PhysicalConstants::default(),
            MolarMassTable::with_default_species(),
        )
    }
}

impl ScenarioRunner {
    pub fn new(constants: PhysicalConstants, molar_masses: MolarMassTable) -> Self {
        Self {
            constants,
            molar_masses,
        }
    }

    pub fn molar_masses(&self) -> &MolarMassTable {
        &self.molar_masses
    }

    /// Loads `path` and runs it with line-list paths relative to its directory.
    pub fn run_file(&self, path: impl AsRef<Path>) -> CrdsResult<ScenarioReport> {
        let path = path.as_ref();
        let scenario = load_scenario(path)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        self.run(&scenario, base_dir)
    }

    pub fn run(
        &self,
        scenario: &SimulationScenario,
        base_dir: &Path,
    ) -> CrdsResult<ScenarioReport> {
        scenario.validate()?;
        let grid = scenario.frequency_grid()?;
        let shared = scenario.shared_conditions()?;

        let species = scenario
            .species
            .iter()
            .map(|entry| self.resolve_species(entry, &grid, base_dir))
            .collect::<CrdsResult<Vec<_>>>()?;
        let components = species
            .iter()
            .map(ResolvedSpecies::as_component)
            .collect::<Vec<_>>();

        let synthesizer =
            SpectrumSynthesizer::new(self.constants).with_window(scenario.line_window);
        let mixture = synthesizer.synthesize_mixture(&components, &grid, &shared)?;
        let summary = mixture.combined.summary();

        info!(
            species = species.len(),
            points = grid.len(),
            peak_absorbance = summary.peak_absorbance,
            peak_wavelength_nm = summary.peak_wavelength_nm,
            "scenario complete"
        );
        Ok(ScenarioReport {
            conditions: ResolvedConditions {
                temperature: shared.temperature,
                pressure_atm: shared.pressure,
                path_length_m: shared.path_length,
            },
            wavelength_nm: grid.wavelengths_nm(),
            summary,
            mixture,
        })
    }

    pub fn resolve_species(
        &self,
        entry: &SpeciesEntry,
        grid: &FrequencyGrid,
        base_dir: &Path,
    ) -> CrdsResult<ResolvedSpecies> {
        entry.validate()?;
        let molar_mass = match entry.molar_mass {
            Some(molar_mass) => molar_mass,
            None => self.molar_masses.molar_mass(&entry.formula)?,
        };

        let path = resolve_relative(base_dir, &entry.line_list);
        let mut lines = read_line_list(&path, entry.line_list_format(), entry.query)?;
        let loaded = lines.len();
        if let Some(margin) = entry.range_margin {
            let (low, high) = grid.bounds();
            lines = lines_in_window(&lines, low - margin, high + margin);
        }
        if let Some(max_lines) = entry.max_lines {
            lines = strongest_lines(&lines, max_lines);
        }

        if lines.is_empty() {
            warn!(
                species = entry.formula.as_str(),
                path = %path.display(),
                "no lines left for species; it will not absorb"
            );
        } else {
            debug!(
                species = entry.formula.as_str(),
                loaded,
                kept = lines.len(),
                "resolved species line list"
            );
        }

        Ok(ResolvedSpecies {
            formula: entry.formula.trim().to_string(),
            mole_fraction: entry.mole_fraction(),
            molar_mass,
            lines,
        })
    }
}

fn resolve_relative(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}
