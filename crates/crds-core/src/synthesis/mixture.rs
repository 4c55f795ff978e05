use super::{SpectrumResult, SpectrumSynthesizer};
use crate::domain::{CrdsResult, PhysicalConditions, SpectralLine, require_positive};
use crate::lineshape::LineShapeApi;
use crate::numerics::FrequencyGrid;
use serde::Serialize;
use tracing::{debug, info};

/// Conditions common to every species of a gas sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SharedConditions {
    pub temperature: f64,
    pub pressure: f64,
    pub path_length: f64,
}

impl SharedConditions {
    pub fn new(temperature: f64, pressure: f64, path_length: f64) -> CrdsResult<Self> {
        require_positive("INPUT.TEMPERATURE", "temperature", temperature)?;
        require_positive("INPUT.PRESSURE", "pressure", pressure)?;
        require_positive("INPUT.PATH_LENGTH", "path length", path_length)?;
        Ok(Self {
            temperature,
            pressure,
            path_length,
        })
    }

    pub fn for_species(
        &self,
        concentration: f64,
        molecular_mass: f64,
    ) -> CrdsResult<PhysicalConditions> {
        PhysicalConditions::new(
            self.temperature,
            self.pressure,
            concentration,
            self.path_length,
            molecular_mass,
        )
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GasComponent<'a> {
    pub species: &'a str,
    pub lines: &'a [SpectralLine],
    /// Mole fraction.
    pub concentration: f64,
    /// g/mol
    pub molecular_mass: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeciesSpectrum {
    pub species: String,
    pub line_count: usize,
    pub concentration: f64,
    pub spectrum: SpectrumResult,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeciesContribution {
    pub species: String,
    pub max_absorbance: f64,
    /// Species peak absorbance as a percentage of the mixture's peak; 0 when
    /// the mixture does not absorb.
    pub share_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MixtureSpectrum {
    pub species: Vec<SpeciesSpectrum>,
    pub combined: SpectrumResult,
    pub contributions: Vec<SpeciesContribution>,
}

/// Sums per-species absorption coefficients and applies one Beer–Lambert
/// pass to the total.
pub fn combine_absorption<'a, I>(
    grid: &FrequencyGrid,
    absorption_arrays: I,
    path_length: f64,
) -> SpectrumResult
where
    I: IntoIterator<Item = &'a [f64]>,
{
    let mut total = vec![0.0; grid.len()];
    for absorption in absorption_arrays {
        debug_assert_eq!(absorption.len(), total.len());
        for (sum, value) in total.iter_mut().zip(absorption) {
            *sum += value;
        }
    }
    SpectrumResult::from_absorption(grid, total, path_length)
}

impl<S: LineShapeApi> SpectrumSynthesizer<S> {
    pub fn synthesize_mixture(
        &self,
        components: &[GasComponent<'_>],
        grid: &FrequencyGrid,
        shared: &SharedConditions,
    ) -> CrdsResult<MixtureSpectrum> {
        let mut species = Vec::with_capacity(components.len());
        for component in components {
            let conditions = shared.for_species(component.concentration, component.molecular_mass)?;
            debug!(
                species = component.species,
                lines = component.lines.len(),
                concentration = component.concentration,
                "synthesizing species spectrum"
            );
            let spectrum = self.calculate_absorption_spectrum(component.lines, grid, &conditions)?;
            species.push(SpeciesSpectrum {
                species: component.species.to_string(),
                line_count: component.lines.len(),
                concentration: component.concentration,
                spectrum,
            });
        }

        let combined = combine_absorption(
            grid,
            species
                .iter()
                .map(|entry| entry.spectrum.absorption_coefficient()),
            shared.path_length,
        );

        let combined_peak = combined.max_absorbance();
        let contributions = species
            .iter()
            .map(|entry| {
                let max_absorbance = entry.spectrum.max_absorbance();
                let share_percent = if combined_peak > 0.0 {
                    max_absorbance / combined_peak * 100.0
                } else {
                    0.0
                };
                SpeciesContribution {
                    species: entry.species.clone(),
                    max_absorbance,
                    share_percent,
                }
            })
            .collect();

        info!(
            species = species.len(),
            points = grid.len(),
            peak_absorbance = combined_peak,
            "mixture spectrum complete"
        );
        Ok(MixtureSpectrum {
            species,
            combined,
            contributions,
        })
    }
}
