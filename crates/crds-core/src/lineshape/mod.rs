//! Doppler, pressure and Voigt line-shape kernels.
//!
//! Widths are half-widths in cm⁻¹. The Doppler width is the 1/e half-width
//! `nu0 / c * sqrt(2 k_B T / m)`, which is the scale the Voigt argument
//! `x = (nu - nu0) / gamma_d` expects.

use crate::common::constants::{GRAMS_TO_KILOGRAMS, PhysicalConstants};
use crate::domain::CrdsError;
use crate::numerics::voigt_function;
use std::f64::consts::PI;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LineShapeError {
    #[error("line center frequency must be finite and > 0, got {value}")]
    InvalidCenterFrequency { value: f64 },
    #[error("temperature must be finite and > 0, got {value}")]
    InvalidTemperature { value: f64 },
    #[error("molecular mass must be finite and > 0, got {value}")]
    InvalidMolecularMass { value: f64 },
    #[error("pressure must be finite and >= 0, got {value}")]
    InvalidPressure { value: f64 },
    #[error("air broadening coefficient must be finite and >= 0, got {value}")]
    InvalidBroadeningCoefficient { value: f64 },
    #[error("doppler width must be finite and > 0, got {value}")]
    InvalidDopplerWidth { value: f64 },
    #[error("lorentz width must be finite and >= 0, got {value}")]
    InvalidLorentzWidth { value: f64 },
}

impl LineShapeError {
    pub const fn placeholder(&self) -> &'static str {
        match self {
            Self::InvalidCenterFrequency { .. } => "INPUT.LINE_CENTER",
            Self::InvalidTemperature { .. } => "INPUT.TEMPERATURE",
            Self::InvalidMolecularMass { .. } => "INPUT.MOLECULAR_MASS",
            Self::InvalidPressure { .. } => "INPUT.PRESSURE",
            Self::InvalidBroadeningCoefficient { .. } => "INPUT.LINE_BROADENING",
            Self::InvalidDopplerWidth { .. } => "INPUT.DOPPLER_WIDTH",
            Self::InvalidLorentzWidth { .. } => "INPUT.LORENTZ_WIDTH",
        }
    }
}

impl From<LineShapeError> for CrdsError {
    fn from(error: LineShapeError) -> Self {
        CrdsError::input_validation(error.placeholder(), error.to_string())
    }
}

/// Line-shape seam used by the synthesizer.
pub trait LineShapeApi {
    fn doppler_width(
        &self,
        center_frequency: f64,
        temperature: f64,
        molecular_mass: f64,
    ) -> Result<f64, LineShapeError>;

    fn lorentz_width(
        &self,
        air_broadening_coefficient: f64,
        pressure: f64,
        temperature: f64,
    ) -> Result<f64, LineShapeError>;

    /// Normalized profile value (cm) at `offset = nu - nu0`.
    fn profile_value(&self, offset: f64, lorentz_width: f64, doppler_width: f64) -> f64;

    fn voigt_profile(
        &self,
        frequency_grid: &[f64],
        center_frequency: f64,
        lorentz_width: f64,
        doppler_width: f64,
    ) -> Result<Vec<f64>, LineShapeError> {
        validate_widths(lorentz_width, doppler_width)?;
        Ok(frequency_grid
            .iter()
            .map(|frequency| {
                self.profile_value(frequency - center_frequency, lorentz_width, doppler_width)
            })
            .collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LineShapeEvaluator {
    constants: PhysicalConstants,
}

impl LineShapeEvaluator {
    pub fn new(constants: PhysicalConstants) -> Self {
        Self { constants }
    }

    pub fn constants(&self) -> &PhysicalConstants {
        &self.constants
    }

    /// Pressure half-width with an explicit reference temperature:
    /// `gamma_air * p * sqrt(T_ref / T)`.
    pub fn lorentz_width_with_reference(
        &self,
        air_broadening_coefficient: f64,
        pressure: f64,
        temperature: f64,
        reference_temperature: f64,
    ) -> Result<f64, LineShapeError> {
        if !air_broadening_coefficient.is_finite() || air_broadening_coefficient < 0.0 {
            return Err(LineShapeError::InvalidBroadeningCoefficient {
                value: air_broadening_coefficient,
            });
        }
        if !pressure.is_finite() || pressure < 0.0 {
            return Err(LineShapeError::InvalidPressure { value: pressure });
        }
        require_temperature(temperature)?;
        require_temperature(reference_temperature)?;

        Ok(air_broadening_coefficient * pressure * (reference_temperature / temperature).sqrt())
    }
}

impl LineShapeApi for LineShapeEvaluator {
    fn doppler_width(
        &self,
        center_frequency: f64,
        temperature: f64,
        molecular_mass: f64,
    ) -> Result<f64, LineShapeError> {
        if !center_frequency.is_finite() || center_frequency <= 0.0 {
            return Err(LineShapeError::InvalidCenterFrequency {
                value: center_frequency,
            });
        }
        require_temperature(temperature)?;
        if !molecular_mass.is_finite() || molecular_mass <= 0.0 {
            return Err(LineShapeError::InvalidMolecularMass {
                value: molecular_mass,
            });
        }

        let thermal = 2.0 * self.constants.boltzmann * temperature * self.constants.avogadro
            / (molecular_mass * GRAMS_TO_KILOGRAMS);
        Ok(center_frequency / self.constants.speed_of_light * thermal.sqrt())
    }

    fn lorentz_width(
        &self,
        air_broadening_coefficient: f64,
        pressure: f64,
        temperature: f64,
    ) -> Result<f64, LineShapeError> {
        self.lorentz_width_with_reference(
            air_broadening_coefficient,
            pressure,
            temperature,
            self.constants.reference_temperature,
        )
    }

    fn profile_value(&self, offset: f64, lorentz_width: f64, doppler_width: f64) -> f64 {
        let x = offset / doppler_width;
        let y = lorentz_width / doppler_width;
        // Rounding in the far wings can dip a hair below zero.
        (voigt_function(x, y) / (doppler_width * PI.sqrt())).max(0.0)
    }
}

pub(crate) fn validate_widths(
    lorentz_width: f64,
    doppler_width: f64,
) -> Result<(), LineShapeError> {
    if !doppler_width.is_finite() || doppler_width <= 0.0 {
        return Err(LineShapeError::InvalidDopplerWidth {
            value: doppler_width,
        });
    }
    if !lorentz_width.is_finite() || lorentz_width < 0.0 {
        return Err(LineShapeError::InvalidLorentzWidth {
            value: lorentz_width,
        });
    }
    Ok(())
}

fn require_temperature(temperature: f64) -> Result<(), LineShapeError> {
    if temperature.is_finite() && temperature > 0.0 {
        Ok(())
    } else {
        Err(LineShapeError::InvalidTemperature { value: temperature })
    }
}

#[cfg(test)]
mod tests {
    use super::{LineShapeApi, LineShapeError, LineShapeEvaluator};
    use crate::common::PhysicalConstants;
    use crate::numerics::integrate_trapezoid;
    use std::f64::consts::PI;

    fn evaluator() -> LineShapeEvaluator {
        LineShapeEvaluator::new(PhysicalConstants::default())
    }

    fn assert_close(label: &str, expected: f64, actual: f64, rel_tol: f64) {
        let rel_diff = (actual - expected).abs() / expected.abs().max(1.0e-300);
        assert!(
            rel_diff <= rel_tol,
            "{label} expected={expected:.15e} actual={actual:.15e} rel_diff={rel_diff:.3e}"
        );
    }

    #[test]
    fn doppler_width_matches_water_line_reference() {
        let width = evaluator()
            .doppler_width(6648.88, 296.15, 18.015)
            .expect("doppler width");
        assert_close("H2O 6648.88", 0.011_595_743_964_300_678, width, 1.0e-12);
    }

    #[test]
    fn doppler_width_grows_with_temperature_and_frequency() {
        let evaluator = evaluator();
        let mut previous = 0.0;
        for temperature in [50.0, 150.0, 296.0, 500.0, 1500.0] {
            let width = evaluator
                .doppler_width(6648.88, temperature, 18.015)
                .expect("width");
            assert!(width > previous, "T={temperature} width={width}");
            previous = width;
        }

        let low = evaluator.doppler_width(1000.0, 296.0, 44.01).expect("low");
        let high = evaluator.doppler_width(2000.0, 296.0, 44.01).expect("high");
        assert_close("linear in nu0", 2.0 * low, high, 1.0e-14);
    }

    #[test]
    fn doppler_width_rejects_invalid_inputs() {
        let evaluator = evaluator();
        assert_eq!(
            evaluator.doppler_width(0.0, 296.0, 18.0),
            Err(LineShapeError::InvalidCenterFrequency { value: 0.0 })
        );
        assert_eq!(
            evaluator.doppler_width(6000.0, -1.0, 18.0),
            Err(LineShapeError::InvalidTemperature { value: -1.0 })
        );
        assert_eq!(
            evaluator.doppler_width(6000.0, 296.0, 0.0),
            Err(LineShapeError::InvalidMolecularMass { value: 0.0 })
        );
    }

    #[test]
    fn lorentz_width_scales_with_pressure_and_temperature() {
        let evaluator = evaluator();
        let reference = evaluator.lorentz_width(0.05, 1.0, 296.0).expect("ref");
        assert_close("reference conditions", 0.05, reference, 1.0e-15);

        let mut previous = -1.0;
        for pressure in [0.0, 0.1, 1.0, 2.0, 7.0] {
            let width = evaluator.lorentz_width(0.05, pressure, 296.0).expect("width");
            assert!(width >= previous, "p={pressure} width={width}");
            previous = width;
        }

        let cold = evaluator.lorentz_width(0.05, 1.0, 200.0).expect("cold");
        let hot = evaluator.lorentz_width(0.05, 1.0, 400.0).expect("hot");
        assert!(cold > hot);
        assert_close("sqrt ratio", 0.05 * (296.0_f64 / 400.0).sqrt(), hot, 1.0e-14);

        let custom = evaluator
            .lorentz_width_with_reference(0.05, 1.0, 300.0, 300.0)
            .expect("custom reference");
        assert_close("custom reference", 0.05, custom, 1.0e-15);
    }

    #[test]
    fn lorentz_width_rejects_invalid_inputs() {
        let evaluator = evaluator();
        assert!(matches!(
            evaluator.lorentz_width(0.05, -1.0, 296.0),
            Err(LineShapeError::InvalidPressure { .. })
        ));
        assert!(matches!(
            evaluator.lorentz_width(-0.05, 1.0, 296.0),
            Err(LineShapeError::InvalidBroadeningCoefficient { .. })
        ));
        assert!(matches!(
            evaluator.lorentz_width(0.05, 1.0, 0.0),
            Err(LineShapeError::InvalidTemperature { .. })
        ));
    }

    #[test]
    fn gaussian_limit_peak_matches_doppler_normalization() {
        let doppler = 0.0116;
        let profile = evaluator()
            .voigt_profile(&[6648.88], 6648.88, 0.0, doppler)
            .expect("profile");
        assert_close("gaussian peak", 1.0 / (doppler * PI.sqrt()), profile[0], 1.0e-11);

        // The grid point carries the rounding of 6648.88, so the expected
        // value uses the offset it actually represents.
        let wing = 6648.88 + 0.8 * doppler;
        let x = (wing - 6648.88) / doppler;
        let profile = evaluator()
            .voigt_profile(&[wing], 6648.88, 0.0, doppler)
            .expect("profile");
        let expected = (-(x * x)).exp() / (doppler * PI.sqrt());
        assert_close("gaussian wing", expected, profile[0], 1.0e-12);

        let far_wing = 6648.88 + 9.0 * doppler;
        let x = (far_wing - 6648.88) / doppler;
        let profile = evaluator()
            .voigt_profile(&[far_wing], 6648.88, 0.0, doppler)
            .expect("profile");
        let expected = (-(x * x)).exp() / (doppler * PI.sqrt());
        assert_close("gaussian far wing", expected, profile[0], 1.0e-12);
    }

    #[test]
    fn lorentzian_limit_for_vanishing_doppler_width() {
        let lorentz = 0.05;
        let doppler = lorentz * 1.0e-4;
        let offsets = [0.0, 0.02, 0.05, 0.3];
        let grid: Vec<f64> = offsets.iter().map(|offset| 6000.0 + offset).collect();
        let profile = evaluator()
            .voigt_profile(&grid, 6000.0, lorentz, doppler)
            .expect("profile");

        for (offset, value) in offsets.iter().zip(&profile) {
            let expected = lorentz / (PI * (offset * offset + lorentz * lorentz));
            assert_close(&format!("offset {offset}"), expected, *value, 1.0e-3);
        }
    }

    #[test]
    fn voigt_profile_is_normalized_and_non_negative() {
        let doppler = 0.0116;
        let lorentz = 0.1 * doppler;
        let half_span = 500.0 * doppler;
        let points = 200_001;
        let grid: Vec<f64> = (0..points)
            .map(|index| -half_span + 2.0 * half_span * index as f64 / (points - 1) as f64)
            .collect();
        let profile = evaluator()
            .voigt_profile(&grid, 0.0, lorentz, doppler)
            .expect("profile");

        assert!(profile.iter().all(|value| *value >= 0.0));
        let area = integrate_trapezoid(&grid, &profile);
        assert!((area - 1.0).abs() <= 1.0e-3, "area={area}");
    }

    #[test]
    fn voigt_profile_rejects_zero_doppler_width() {
        let error = evaluator()
            .voigt_profile(&[1.0, 2.0], 1.5, 0.1, 0.0)
            .expect_err("zero doppler width");
        assert_eq!(error, LineShapeError::InvalidDopplerWidth { value: 0.0 });
        let crds: crate::domain::CrdsError = error.into();
        assert_eq!(crds.placeholder(), "INPUT.DOPPLER_WIDTH");
    }
}
