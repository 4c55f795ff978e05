//! Line-by-line accumulation of absorption coefficients and the Beer–Lambert
//! transform.

pub mod mixture;
pub mod model;
pub mod window;

pub use mixture::{
    GasComponent, MixtureSpectrum, SharedConditions, SpeciesContribution, SpeciesSpectrum,
    combine_absorption,
};
pub use model::{SpectrumResult, SpectrumSummary, apply_beer_lambert};
pub use window::LineWindow;

use crate::common::PhysicalConstants;
use crate::domain::{CrdsError, CrdsResult, PhysicalConditions, SpectralLine};
use crate::lineshape::{LineShapeApi, LineShapeEvaluator, validate_widths};
use crate::numerics::FrequencyGrid;
use tracing::{debug, trace};
use window::grid_indices_within;

#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumSynthesizer<S = LineShapeEvaluator> {
    line_shape: S,
    line_intensity_scaling: f64,
    window: Option<LineWindow>,
}

impl SpectrumSynthesizer {
    pub fn new(constants: PhysicalConstants) -> Self {
        Self::with_line_shape(
            LineShapeEvaluator::new(constants),
            constants.line_intensity_scaling,
        )
    }
}

impl Default for SpectrumSynthesizer {
    fn default() -> Self {
        Self::new(PhysicalConstants::default())
    }
}

impl<S: LineShapeApi> SpectrumSynthesizer<S> {
    pub fn with_line_shape(line_shape: S, line_intensity_scaling: f64) -> Self {
        Self {
            line_shape,
            line_intensity_scaling,
            window: None,
        }
    }

    pub fn with_window(mut self, window: Option<LineWindow>) -> Self {
        self.window = window;
        self
    }

    pub fn line_shape(&self) -> &S {
        &self.line_shape
    }

    pub fn window(&self) -> Option<LineWindow> {
        self.window
    }

    /// Sum of `S * c * profile * scaling` over all lines, before any
    /// Beer–Lambert transform. Mixtures add these arrays across species.
    pub fn absorption_coefficient(
        &self,
        lines: &[SpectralLine],
        grid: &FrequencyGrid,
        conditions: &PhysicalConditions,
    ) -> CrdsResult<Vec<f64>> {
        conditions.validate()?;
        if let Some(window) = &self.window {
            window.validate()?;
        }
        lines.iter().try_for_each(SpectralLine::validate)?;

        let frequencies = grid.as_slice();
        let mut absorption = vec![0.0; frequencies.len()];
        if lines.is_empty() || conditions.concentration == 0.0 {
            debug!(
                lines = lines.len(),
                concentration = conditions.concentration,
                "no absorbing lines; absorption stays zero"
            );
            return Ok(absorption);
        }

        let mut skipped = 0usize;
        for line in lines {
            let doppler_width = self.line_shape.doppler_width(
                line.center_frequency,
                conditions.temperature,
                conditions.molecular_mass,
            )?;
            let lorentz_width = self.line_shape.lorentz_width(
                line.air_broadening_coefficient,
                conditions.pressure,
                conditions.temperature,
            )?;
            validate_widths(lorentz_width, doppler_width)?;

            let indices = match &self.window {
                Some(window) => {
                    let half_range = window.half_range(doppler_width, lorentz_width);
                    grid_indices_within(
                        frequencies,
                        line.center_frequency - half_range,
                        line.center_frequency + half_range,
                    )
                }
                None => 0..frequencies.len(),
            };
            if indices.is_empty() {
                skipped += 1;
                trace!(
                    center = line.center_frequency,
                    "line window does not overlap the grid"
                );
                continue;
            }

            let weight = line.line_intensity * conditions.concentration;
            for index in indices {
                let profile = self.line_shape.profile_value(
                    frequencies[index] - line.center_frequency,
                    lorentz_width,
                    doppler_width,
                );
                absorption[index] += weight * profile * self.line_intensity_scaling;
            }
        }

        if let Some(index) = absorption.iter().position(|value| !value.is_finite()) {
            return Err(CrdsError::computation(
                "COMPUTE.ABSORPTION_OVERFLOW",
                format!(
                    "absorption coefficient is not finite at {} cm-1",
                    frequencies[index]
                ),
            ));
        }

        debug!(
            lines = lines.len(),
            skipped,
            points = frequencies.len(),
            "accumulated line contributions"
        );
        Ok(absorption)
    }

    pub fn calculate_absorption_spectrum(
        &self,
        lines: &[SpectralLine],
        grid: &FrequencyGrid,
        conditions: &PhysicalConditions,
    ) -> CrdsResult<SpectrumResult> {
        let absorption = self.absorption_coefficient(lines, grid, conditions)?;
        Ok(SpectrumResult::from_absorption(
            grid,
            absorption,
            conditions.path_length,
        ))
    }
}

/// Single-species synthesis with default constants and no line window.
pub fn calculate_absorption_spectrum(
    lines: &[SpectralLine],
    frequency_grid: &[f64],
    temperature: f64,
    pressure: f64,
    concentration: f64,
    path_length: f64,
    species_molar_mass: f64,
) -> CrdsResult<SpectrumResult> {
    let grid = FrequencyGrid::new(frequency_grid.to_vec())?;
    let conditions = PhysicalConditions::new(
        temperature,
        pressure,
        concentration,
        path_length,
        species_molar_mass,
    )?;
    SpectrumSynthesizer::default().calculate_absorption_spectrum(lines, &grid, &conditions)
}
