pub mod config;
pub mod constants;
pub mod units;

pub use config::MolarMassTable;
pub use constants::PhysicalConstants;
pub use units::{
    ConcentrationUnit, LengthUnit, PressureUnit, wavelength_nm_to_wavenumber,
    wavenumber_to_wavelength_nm,
};
