use crate::common::units::{wavelength_nm_to_wavenumber, wavenumber_to_wavelength_nm};
use crate::domain::CrdsError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridError {
    #[error("frequency grid requires at least 1 point")]
    Empty,
    #[error("frequency grid entry must be finite at index {index}, got {value}")]
    NonFinite { index: usize, value: f64 },
    #[error(
        "frequency grid must be strictly monotonic, index {index} has {current} after {previous}"
    )]
    NonMonotonic {
        index: usize,
        previous: f64,
        current: f64,
    },
    #[error("wavelength window must satisfy 0 < min < max, got min={min_nm} nm, max={max_nm} nm")]
    InvalidWavelengthWindow { min_nm: f64, max_nm: f64 },
}

impl From<GridError> for CrdsError {
    fn from(error: GridError) -> Self {
        CrdsError::input_validation("INPUT.FREQUENCY_GRID", error.to_string())
    }
}

/// Strictly monotonic wavenumber samples (cm⁻¹).
///
/// Either direction is accepted; grids built from wavelength windows are
/// increasing in wavenumber.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct FrequencyGrid {
    values: Vec<f64>,
}

impl FrequencyGrid {
    pub fn new(values: Vec<f64>) -> Result<Self, GridError> {
        validate_grid(&values)?;
        Ok(Self { values })
    }

    /// `points` evenly spaced samples from `start` to `stop`, both inclusive.
    pub fn linspace(start: f64, stop: f64, points: usize) -> Result<Self, GridError> {
        if points == 0 {
            return Err(GridError::Empty);
        }
        if points == 1 {
            return Self::new(vec![start]);
        }

        let last = points - 1;
        let step = (stop - start) / last as f64;
        let values = (0..points)
            .map(|index| {
                if index == last {
                    stop
                } else {
                    start + step * index as f64
                }
            })
            .collect();
        Self::new(values)
    }

    pub fn from_wavelength_range_nm(
        min_nm: f64,
        max_nm: f64,
        points: usize,
    ) -> Result<Self, GridError> {
        if !(min_nm.is_finite() && max_nm.is_finite() && min_nm > 0.0 && min_nm < max_nm) {
            return Err(GridError::InvalidWavelengthWindow { min_nm, max_nm });
        }
        Self::linspace(
            wavelength_nm_to_wavenumber(max_nm),
            wavelength_nm_to_wavenumber(min_nm),
            points,
        )
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false; kept for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn first(&self) -> f64 {
        self.values[0]
    }

    pub fn last(&self) -> f64 {
        self.values[self.values.len() - 1]
    }

    pub fn bounds(&self) -> (f64, f64) {
        let (first, last) = (self.first(), self.last());
        (first.min(last), first.max(last))
    }

    pub fn wavelengths_nm(&self) -> Vec<f64> {
        self.values
            .iter()
            .copied()
            .map(wavenumber_to_wavelength_nm)
            .collect()
    }
}

impl TryFrom<Vec<f64>> for FrequencyGrid {
    type Error = GridError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

impl From<FrequencyGrid> for Vec<f64> {
    fn from(grid: FrequencyGrid) -> Self {
        grid.values
    }
}

impl AsRef<[f64]> for FrequencyGrid {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

fn validate_grid(values: &[f64]) -> Result<(), GridError> {
    if values.is_empty() {
        return Err(GridError::Empty);
    }

    for (index, value) in values.iter().copied().enumerate() {
        if !value.is_finite() {
            return Err(GridError::NonFinite { index, value });
        }
    }

    if values.len() < 2 {
        return Ok(());
    }

    let increasing = values[1] > values[0];
    for index in 1..values.len() {
        let previous = values[index - 1];
        let current = values[index];
        let ordered = if increasing {
            current > previous
        } else {
            current < previous
        };
        if !ordered {
            return Err(GridError::NonMonotonic {
                index,
                previous,
                current,
            });
        }
    }

    Ok(())
}
