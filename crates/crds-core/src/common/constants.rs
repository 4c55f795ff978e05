//! Physical constants and unit factors used by the line-shape kernels.
//!
//! Values are the exact SI definitions (2019 redefinition). Kernels receive
//! them through [`PhysicalConstants`] rather than reading these directly.

use serde::{Deserialize, Serialize};

/// Speed of light in vacuum, m/s.
pub const SPEED_OF_LIGHT: f64 = 2.997_924_58e8;
/// Boltzmann constant, J/K.
pub const BOLTZMANN: f64 = 1.380_649e-23;
/// Avogadro constant, 1/mol.
pub const AVOGADRO: f64 = 6.022_140_76e23;
/// HITRAN reference temperature for tabulated half-widths, K.
pub const REFERENCE_TEMPERATURE: f64 = 296.0;
/// Converts database line intensity × mole fraction × profile (cm) into the
/// absorption-coefficient scale the spectra are reported on.
pub const LINE_INTENSITY_SCALING: f64 = 1.0e20;
/// g/mol → kg/mol.
pub const GRAMS_TO_KILOGRAMS: f64 = 1.0e-3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalConstants {
    pub speed_of_light: f64,
    pub boltzmann: f64,
    pub avogadro: f64,
    pub reference_temperature: f64,
    pub line_intensity_scaling: f64,
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self {
            speed_of_light: SPEED_OF_LIGHT,
            boltzmann: BOLTZMANN,
            avogadro: AVOGADRO,
            reference_temperature: REFERENCE_TEMPERATURE,
            line_intensity_scaling: LINE_INTENSITY_SCALING,
        }
    }
}

impl PhysicalConstants {
    pub fn with_line_intensity_scaling(mut self, scaling: f64) -> Self {
        self.line_intensity_scaling = scaling;
        self
    }

    pub fn with_reference_temperature(mut self, reference_temperature: f64) -> Self {
        self.reference_temperature = reference_temperature;
        self
    }
}
