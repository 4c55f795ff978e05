pub mod errors;

pub use errors::{CrdsError, CrdsErrorCategory, CrdsResult};

use serde::{Deserialize, Serialize};

/// One entry of a molecular line list.
///
/// Records are validated at the line-list boundary (see [`SpectralLine::new`])
/// so synthesis code only ever sees finite, physically meaningful values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpectralLine {
    /// Transition wavenumber in cm⁻¹.
    #[serde(alias = "nu")]
    pub center_frequency: f64,
    /// Line strength in the native units of the source database.
    #[serde(alias = "sw")]
    pub line_intensity: f64,
    /// Air-broadened half-width at the reference temperature, cm⁻¹/atm.
    #[serde(alias = "gamma_air")]
    pub air_broadening_coefficient: f64,
}

impl SpectralLine {
    pub fn new(
        center_frequency: f64,
        line_intensity: f64,
        air_broadening_coefficient: f64,
    ) -> CrdsResult<Self> {
        let line = Self {
            center_frequency,
            line_intensity,
            air_broadening_coefficient,
        };
        line.validate()?;
        Ok(line)
    }

    pub fn validate(&self) -> CrdsResult<()> {
        if !self.center_frequency.is_finite() || self.center_frequency <= 0.0 {
            return Err(CrdsError::input_validation(
                "INPUT.LINE_CENTER",
                format!(
                    "line center frequency must be finite and > 0, got {}",
                    self.center_frequency
                ),
            ));
        }
        if !self.line_intensity.is_finite() || self.line_intensity < 0.0 {
            return Err(CrdsError::input_validation(
                "INPUT.LINE_INTENSITY",
                format!(
                    "line intensity must be finite and >= 0, got {}",
                    self.line_intensity
                ),
            ));
        }
        if !self.air_broadening_coefficient.is_finite() || self.air_broadening_coefficient < 0.0 {
            return Err(CrdsError::input_validation(
                "INPUT.LINE_BROADENING",
                format!(
                    "air broadening coefficient must be finite and >= 0, got {}",
                    self.air_broadening_coefficient
                ),
            ));
        }
        Ok(())
    }
}

/// Thermodynamic state and optical setup for one species.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalConditions {
    /// Kelvin.
    pub temperature: f64,
    /// Atmospheres.
    pub pressure: f64,
    /// Mole fraction in `[0, 1]`.
    pub concentration: f64,
    /// Metres.
    pub path_length: f64,
    /// Grams per mole.
    pub molecular_mass: f64,
}

impl PhysicalConditions {
    pub fn new(
        temperature: f64,
        pressure: f64,
        concentration: f64,
        path_length: f64,
        molecular_mass: f64,
    ) -> CrdsResult<Self> {
        let conditions = Self {
            temperature,
            pressure,
            concentration,
            path_length,
            molecular_mass,
        };
        conditions.validate()?;
        Ok(conditions)
    }

    pub fn with_concentration(self, concentration: f64) -> CrdsResult<Self> {
        Self::new(
            self.temperature,
            self.pressure,
            concentration,
            self.path_length,
            self.molecular_mass,
        )
    }

    pub fn with_molecular_mass(self, molecular_mass: f64) -> CrdsResult<Self> {
        Self::new(
            self.temperature,
            self.pressure,
            self.concentration,
            self.path_length,
            molecular_mass,
        )
    }

    pub fn validate(&self) -> CrdsResult<()> {
        require_positive("INPUT.TEMPERATURE", "temperature", self.temperature)?;
        require_positive("INPUT.PRESSURE", "pressure", self.pressure)?;
        require_positive("INPUT.PATH_LENGTH", "path length", self.path_length)?;
        require_positive(
            "INPUT.MOLECULAR_MASS",
            "molecular mass",
            self.molecular_mass,
        )?;
        if !self.concentration.is_finite() || !(0.0..=1.0).contains(&self.concentration) {
            return Err(CrdsError::input_validation(
                "INPUT.CONCENTRATION",
                format!(
                    "concentration must be a mole fraction in [0, 1], got {}",
                    self.concentration
                ),
            ));
        }
        Ok(())
    }
}

pub(crate) fn require_positive(
    placeholder: &'static str,
    label: &str,
    value: f64,
) -> CrdsResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CrdsError::input_validation(
            placeholder,
            format!("{label} must be finite and > 0, got {value}"),
        ))
    }
}
