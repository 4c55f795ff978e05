pub mod faddeeva;
pub mod grid;
pub mod integration;

pub use faddeeva::{faddeeva, voigt_function};
pub use grid::{FrequencyGrid, GridError};
pub use integration::integrate_trapezoid;
