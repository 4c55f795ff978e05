use crate::domain::{CrdsError, CrdsResult};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Opt-in truncation of each line's profile.
///
/// A line only contributes to grid points within
/// `max(doppler_widths * gamma_d, lorentz_widths * gamma_l)` of its center.
/// The default synthesizer has no window and evaluates every line on the
/// whole grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineWindow {
    pub doppler_widths: f64,
    pub lorentz_widths: f64,
}

impl LineWindow {
    pub fn new(doppler_widths: f64, lorentz_widths: f64) -> CrdsResult<Self> {
        let window = Self {
            doppler_widths,
            lorentz_widths,
        };
        window.validate()?;
        Ok(window)
    }

    /// The Doppler multiple must be positive: a line with zero air
    /// broadening has no Lorentz width, and its half-range then comes from
    /// the Doppler term alone.
    pub fn validate(&self) -> CrdsResult<()> {
        let doppler_ok = self.doppler_widths.is_finite() && self.doppler_widths > 0.0;
        let lorentz_ok = self.lorentz_widths.is_finite() && self.lorentz_widths >= 0.0;
        if !doppler_ok || !lorentz_ok {
            return Err(CrdsError::input_validation(
                "INPUT.LINE_WINDOW",
                format!(
                    "line window needs doppler > 0 and lorentz >= 0 (finite), \
                     got doppler={}, lorentz={}",
                    self.doppler_widths, self.lorentz_widths
                ),
            ));
        }
        Ok(())
    }

    pub fn half_range(&self, doppler_width: f64, lorentz_width: f64) -> f64 {
        (self.doppler_widths * doppler_width).max(self.lorentz_widths * lorentz_width)
    }
}

/// Indices of `grid` whose values lie in `[low, high]`.
///
/// `grid` must be strictly monotonic in either direction.
pub(crate) fn grid_indices_within(grid: &[f64], low: f64, high: f64) -> Range<usize> {
    if grid.len() < 2 || grid[1] > grid[0] {
        let start = grid.partition_point(|value| *value < low);
        let end = grid.partition_point(|value| *value <= high);
        start..end.max(start)
    } else {
        let start = grid.partition_point(|value| *value > high);
        let end = grid.partition_point(|value| *value >= low);
        start..end.max(start)
    }
}
