/// Trapezoid rule over a sampled curve.
///
/// The grid may be increasing or decreasing; the sign of the result follows
/// the grid direction. Returns 0 for fewer than two samples.
pub fn integrate_trapezoid(grid: &[f64], values: &[f64]) -> f64 {
    debug_assert_eq!(grid.len(), values.len());
    grid.windows(2)
        .zip(values.windows(2))
        .map(|(x, y)| 0.5 * (x[1] - x[0]) * (y[0] + y[1]))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::integrate_trapezoid;

    #[test]
    fn integrates_linear_function_exactly() {
        let grid = [0.0, 0.5, 1.5, 2.0];
        let values: Vec<f64> = grid.iter().map(|x| 3.0 * x + 1.0).collect();
        let integral = integrate_trapezoid(&grid, &values);
        assert!((integral - 8.0).abs() <= 1.0e-14, "integral={integral}");
    }

    #[test]
    fn reversed_grid_flips_sign() {
        let grid = [2.0, 1.0, 0.0];
        let values = [1.0, 1.0, 1.0];
        assert_eq!(integrate_trapezoid(&grid, &values), -2.0);
    }

    #[test]
    fn short_inputs_integrate_to_zero() {
        assert_eq!(integrate_trapezoid(&[1.0], &[5.0]), 0.0);
        assert_eq!(integrate_trapezoid(&[], &[]), 0.0);
    }
}
