//! Line-by-line absorption spectrum synthesis for cavity ring-down
//! spectroscopy: Voigt line shapes, absorption accumulation, Beer–Lambert
//! transmittance and absorbance, and multi-species mixtures.

pub mod common;
pub mod domain;
pub mod linelist;
pub mod lineshape;
pub mod numerics;
pub mod scenario;
pub mod synthesis;

pub use domain::{CrdsError, CrdsErrorCategory, CrdsResult, PhysicalConditions, SpectralLine};
pub use synthesis::{SpectrumResult, SpectrumSynthesizer, calculate_absorption_spectrum};
