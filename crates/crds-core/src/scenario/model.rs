use crate::common::{ConcentrationUnit, LengthUnit, PressureUnit};
use crate::domain::{CrdsError, CrdsResult, require_positive};
use crate::linelist::{LineListFormat, LineListQuery};
use crate::numerics::FrequencyGrid;
use crate::synthesis::{LineWindow, MixtureSpectrum, SharedConditions, SpectrumSummary};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_GRID_POINTS: usize = 1000;

/// Spectral extent of a run, either as a wavelength window or directly in
/// wavenumbers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "unit", rename_all = "snake_case")]
pub enum SpectralRange {
    /// Nanometres; the grid is increasing in wavenumber.
    WavelengthNm { min: f64, max: f64 },
    /// cm⁻¹, sampled from `min` to `max`.
    Wavenumber { min: f64, max: f64 },
}

impl SpectralRange {
    pub fn grid(&self, points: usize) -> CrdsResult<FrequencyGrid> {
        let grid = match *self {
            Self::WavelengthNm { min, max } => {
                FrequencyGrid::from_wavelength_range_nm(min, max, points)?
            }
            Self::Wavenumber { min, max } => {
                if !(min.is_finite() && max.is_finite() && min > 0.0 && min < max) {
                    return Err(CrdsError::input_validation(
                        "INPUT.FREQUENCY_GRID",
                        format!(
                            "wavenumber window must satisfy 0 < min < max, got min={min}, max={max}"
                        ),
                    ));
                }
                FrequencyGrid::linspace(min, max, points)?
            }
        };
        Ok(grid)
    }
}

/// One gas of the sample and where its lines come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesEntry {
    pub formula: String,
    pub concentration: f64,
    #[serde(default)]
    pub concentration_unit: ConcentrationUnit,
    /// g/mol; looked up in the molar-mass table when absent.
    #[serde(default)]
    pub molar_mass: Option<f64>,
    /// Relative paths resolve against the scenario file's directory.
    pub line_list: PathBuf,
    /// Inferred from the file extension when absent.
    #[serde(default)]
    pub format: Option<LineListFormat>,
    #[serde(flatten)]
    pub query: LineListQuery,
    /// Keep only lines whose center is within this many cm⁻¹ of the grid.
    #[serde(default)]
    pub range_margin: Option<f64>,
    /// Keep only the N strongest lines after range filtering.
    #[serde(default)]
    pub max_lines: Option<usize>,
}

impl SpeciesEntry {
    pub fn mole_fraction(&self) -> f64 {
        self.concentration_unit.to_mole_fraction(self.concentration)
    }

    pub fn line_list_format(&self) -> LineListFormat {
        self.format
            .unwrap_or_else(|| LineListFormat::from_path(&self.line_list))
    }

    pub fn validate(&self) -> CrdsResult<()> {
        if self.formula.trim().is_empty() {
            return Err(CrdsError::input_validation(
                "INPUT.SPECIES",
                "species formula must not be empty",
            ));
        }
        if let Some(molar_mass) = self.molar_mass {
            require_positive("INPUT.MOLECULAR_MASS", "molar mass override", molar_mass)?;
        }
        let margin = self.range_margin.unwrap_or(0.0);
        if !margin.is_finite() || margin < 0.0 {
            return Err(CrdsError::input_validation(
                "INPUT.SCENARIO_RANGE_MARGIN",
                format!(
                    "range margin for '{}' must be finite and >= 0, got {margin}",
                    self.formula
                ),
            ));
        }
        Ok(())
    }
}

/// JSON description of one synthesis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationScenario {
    pub range: SpectralRange,
    #[serde(default = "default_grid_points")]
    pub points: usize,
    /// Kelvin.
    pub temperature: f64,
    pub pressure: f64,
    #[serde(default)]
    pub pressure_unit: PressureUnit,
    pub path_length: f64,
    #[serde(default)]
    pub path_length_unit: LengthUnit,
    #[serde(default)]
    pub line_window: Option<LineWindow>,
    pub species: Vec<SpeciesEntry>,
}

fn default_grid_points() -> usize {
    DEFAULT_GRID_POINTS
}

impl SimulationScenario {
    pub fn frequency_grid(&self) -> CrdsResult<FrequencyGrid> {
        self.range.grid(self.points)
    }

    /// Temperature, pressure in atm and path length in metres.
    pub fn shared_conditions(&self) -> CrdsResult<SharedConditions> {
        SharedConditions::new(
            self.temperature,
            self.pressure_unit.to_atm(self.pressure),
            self.path_length_unit.to_metres(self.path_length),
        )
    }

    pub fn validate(&self) -> CrdsResult<()> {
        if self.species.is_empty() {
            return Err(CrdsError::input_validation(
                "INPUT.SPECIES",
                "scenario must list at least one species",
            ));
        }
        self.shared_conditions()?;
        if let Some(window) = &self.line_window {
            window.validate()?;
        }
        for entry in &self.species {
            entry.validate()?;
        }
        Ok(())
    }
}

/// The SI/spectroscopic values a scenario resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResolvedConditions {
    pub temperature: f64,
    pub pressure_atm: f64,
    pub path_length_m: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioReport {
    pub conditions: ResolvedConditions,
    pub wavelength_nm: Vec<f64>,
    pub summary: SpectrumSummary,
    pub mixture: MixtureSpectrum,
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_GRID_POINTS, SimulationScenario, SpectralRange};
    use crate::common::{ConcentrationUnit, PressureUnit};
    use crate::linelist::LineListFormat;

    const SCENARIO_JSON: &str = r#"{
        "range": { "unit": "wavelength_nm", "min": 1503.5, "max": 1504.5 },
        "temperature": 296.15,
        "pressure": 760.0,
        "pressure_unit": "torr",
        "path_length": 1.0,
        "path_length_unit": "km",
        "species": [
            {
                "formula": "H2O",
                "concentration": 1000.0,
                "concentration_unit": "ppm",
                "line_list": "h2o.par",
                "molecule_id": 1,
                "max_lines": 50
            }
        ]
    }"#;

    #[test]
    fn scenario_json_applies_defaults_and_units() {
        let scenario: SimulationScenario = serde_json::from_str(SCENARIO_JSON).expect("scenario");
        scenario.validate().expect("valid scenario");

        assert_eq!(scenario.points, DEFAULT_GRID_POINTS);
        assert_eq!(scenario.pressure_unit, PressureUnit::Torr);
        assert!(scenario.line_window.is_none());

        let shared = scenario.shared_conditions().expect("shared");
        assert_eq!(shared.pressure, 1.0);
        assert_eq!(shared.path_length, 1000.0);

        let species = &scenario.species[0];
        assert_eq!(species.concentration_unit, ConcentrationUnit::Ppm);
        assert!((species.mole_fraction() - 1.0e-3).abs() <= 1.0e-18);
        assert_eq!(species.line_list_format(), LineListFormat::HitranPar);
        assert_eq!(species.query.molecule_id, Some(1));
        assert_eq!(species.query.isotopologue, None);
    }

    #[test]
    fn wavelength_range_produces_increasing_wavenumber_grid() {
        let grid = SpectralRange::WavelengthNm {
            min: 1503.5,
            max: 1504.5,
        }
        .grid(11)
        .expect("grid");
        assert_eq!(grid.len(), 11);
        assert!(grid.first() < grid.last());
        assert!((grid.last() - 1.0e7 / 1503.5).abs() <= 1.0e-9);
    }

    #[test]
    fn inverted_wavenumber_range_is_rejected() {
        let error = SpectralRange::Wavenumber {
            min: 6650.0,
            max: 6648.0,
        }
        .grid(10)
        .expect_err("inverted range");
        assert_eq!(error.placeholder(), "INPUT.FREQUENCY_GRID");
    }

    #[test]
    fn validation_requires_species_and_positive_overrides() {
        let mut scenario: SimulationScenario =
            serde_json::from_str(SCENARIO_JSON).expect("scenario");
        scenario.species[0].molar_mass = Some(-1.0);
        assert_eq!(
            scenario.validate().expect_err("negative mass").placeholder(),
            "INPUT.MOLECULAR_MASS"
        );

        scenario.species.clear();
        assert_eq!(
            scenario.validate().expect_err("no species").placeholder(),
            "INPUT.SPECIES"
        );
    }
}
