use crate::common::units::wavenumber_to_wavelength_nm;
use crate::numerics::{FrequencyGrid, integrate_trapezoid};
use serde::Serialize;
use std::f64::consts::LN_10;

/// Beer–Lambert transform of an absorption-coefficient array.
///
/// Returns `(transmittance, absorbance)` with
/// `transmittance = exp(-alpha * L)` and `absorbance = alpha * L / ln 10`,
/// which equals `-log10(transmittance)` without losing range when the
/// transmittance underflows.
pub fn apply_beer_lambert(
    absorption_coefficient: &[f64],
    path_length: f64,
) -> (Vec<f64>, Vec<f64>) {
    absorption_coefficient
        .iter()
        .map(|alpha| {
            let optical_depth = alpha * path_length;
            ((-optical_depth).exp(), optical_depth / LN_10)
        })
        .unzip()
}

/// Absorption, transmittance and absorbance sampled on one frequency grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpectrumResult {
    frequency: Vec<f64>,
    absorption_coefficient: Vec<f64>,
    transmittance: Vec<f64>,
    absorbance: Vec<f64>,
}

impl SpectrumResult {
    pub(crate) fn from_absorption(
        grid: &FrequencyGrid,
        absorption_coefficient: Vec<f64>,
        path_length: f64,
    ) -> Self {
        debug_assert_eq!(grid.len(), absorption_coefficient.len());
        let (transmittance, absorbance) = apply_beer_lambert(&absorption_coefficient, path_length);
        Self {
            frequency: grid.as_slice().to_vec(),
            absorption_coefficient,
            transmittance,
            absorbance,
        }
    }

    pub fn frequency(&self) -> &[f64] {
        &self.frequency
    }

    pub fn absorption_coefficient(&self) -> &[f64] {
        &self.absorption_coefficient
    }

    pub fn transmittance(&self) -> &[f64] {
        &self.transmittance
    }

    pub fn absorbance(&self) -> &[f64] {
        &self.absorbance
    }

    pub fn len(&self) -> usize {
        self.frequency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequency.is_empty()
    }

    pub fn wavelengths_nm(&self) -> Vec<f64> {
        self.frequency
            .iter()
            .copied()
            .map(wavenumber_to_wavelength_nm)
            .collect()
    }

    pub fn max_absorbance(&self) -> f64 {
        self.absorbance.iter().copied().fold(0.0, f64::max)
    }

    pub fn summary(&self) -> SpectrumSummary {
        let (peak_index, peak_absorbance) = self
            .absorbance
            .iter()
            .copied()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |best, (index, value)| {
                if value > best.1 { (index, value) } else { best }
            });
        let peak_frequency = self.frequency[peak_index];
        let min_transmittance = self.transmittance.iter().copied().fold(1.0, f64::min);

        SpectrumSummary {
            point_count: self.len(),
            peak_absorbance,
            peak_frequency,
            peak_wavelength_nm: wavenumber_to_wavelength_nm(peak_frequency),
            min_transmittance,
            integrated_absorbance: integrate_trapezoid(&self.frequency, &self.absorbance).abs(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpectrumSummary {
    pub point_count: usize,
    pub peak_absorbance: f64,
    /// cm⁻¹
    pub peak_frequency: f64,
    pub peak_wavelength_nm: f64,
    pub min_transmittance: f64,
    /// cm⁻¹
    pub integrated_absorbance: f64,
}
