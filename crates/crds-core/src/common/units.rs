//! Unit conversions at the scenario boundary.
//!
//! Kernels work in cm⁻¹, atm, mole fraction and metres; everything else is
//! converted here.

use serde::{Deserialize, Serialize};

/// `nm * cm⁻¹` product for wavelength/wavenumber conversion.
pub const NM_WAVENUMBER_PRODUCT: f64 = 1.0e7;
pub const TORR_PER_ATM: f64 = 760.0;
pub const KPA_PER_ATM: f64 = 101.325;

pub fn wavelength_nm_to_wavenumber(wavelength_nm: f64) -> f64 {
    NM_WAVENUMBER_PRODUCT / wavelength_nm
}

pub fn wavenumber_to_wavelength_nm(wavenumber: f64) -> f64 {
    NM_WAVENUMBER_PRODUCT / wavenumber
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PressureUnit {
    #[default]
    Atm,
    Torr,
    #[serde(rename = "kPa", alias = "kpa")]
    KiloPascal,
}

impl PressureUnit {
    pub fn to_atm(self, value: f64) -> f64 {
        match self {
            Self::Atm => value,
            Self::Torr => value / TORR_PER_ATM,
            Self::KiloPascal => value / KPA_PER_ATM,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConcentrationUnit {
    #[default]
    Fraction,
    Percent,
    Ppm,
    Ppb,
}

impl ConcentrationUnit {
    pub fn to_mole_fraction(self, value: f64) -> f64 {
        match self {
            Self::Fraction => value,
            Self::Percent => value * 1.0e-2,
            Self::Ppm => value * 1.0e-6,
            Self::Ppb => value * 1.0e-9,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    #[default]
    M,
    Km,
    Cm,
}

impl LengthUnit {
    pub fn to_metres(self, value: f64) -> f64 {
        match self {
            Self::M => value,
            Self::Km => value * 1.0e3,
            Self::Cm => value * 1.0e-2,
        }
    }
}
