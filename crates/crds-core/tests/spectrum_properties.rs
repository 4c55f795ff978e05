use crds_core::common::PhysicalConstants;
use crds_core::lineshape::{LineShapeApi, LineShapeEvaluator};
use crds_core::numerics::FrequencyGrid;
use crds_core::synthesis::{GasComponent, SharedConditions, SpectrumSynthesizer};
use crds_core::{PhysicalConditions, SpectralLine, calculate_absorption_spectrum};
use std::f64::consts::{LN_10, PI};

const WATER_CENTER: f64 = 6648.88;
const WATER_MASS: f64 = 18.015;

fn assert_close(label: &str, expected: f64, actual: f64, rel_tol: f64, abs_tol: f64) {
    let difference = (actual - expected).abs();
    assert!(
        difference <= abs_tol || difference <= rel_tol * expected.abs(),
        "{label}: expected {expected:.15e}, got {actual:.15e} (diff {difference:.3e})"
    );
}

fn water_line() -> SpectralLine {
    SpectralLine::new(WATER_CENTER, 1.0e-20, 0.05).expect("water line")
}

fn scenario_conditions(concentration: f64) -> PhysicalConditions {
    PhysicalConditions::new(296.15, 1.0, concentration, 1000.0, WATER_MASS)
        .expect("scenario conditions")
}

fn scenario_grid() -> FrequencyGrid {
    FrequencyGrid::linspace(6648.0, 6650.0, 1000).expect("scenario grid")
}

fn several_lines() -> Vec<SpectralLine> {
    vec![
        SpectralLine::new(6647.82, 3.12e-22, 0.0721).expect("line"),
        water_line(),
        SpectralLine::new(6649.7123, 4.47e-21, 0.0831).expect("line"),
        SpectralLine::new(6652.0, 8.0e-21, 0.06).expect("line"),
    ]
}

#[test]
fn outputs_stay_in_physical_ranges() {
    let grid = scenario_grid();
    let result = SpectrumSynthesizer::default()
        .calculate_absorption_spectrum(&several_lines(), &grid, &scenario_conditions(1.0e-2))
        .expect("spectrum");

    assert_eq!(result.len(), grid.len());
    for index in 0..result.len() {
        let alpha = result.absorption_coefficient()[index];
        let transmittance = result.transmittance()[index];
        let absorbance = result.absorbance()[index];
        assert!(alpha >= 0.0 && alpha.is_finite(), "alpha[{index}] = {alpha}");
        assert!(
            (0.0..=1.0).contains(&transmittance),
            "transmittance[{index}] = {transmittance}"
        );
        assert!(absorbance >= 0.0, "absorbance[{index}] = {absorbance}");
    }
}

#[test]
fn empty_line_list_is_transparent() {
    let grid = scenario_grid();
    let result =
        calculate_absorption_spectrum(&[], grid.as_slice(), 296.15, 1.0, 1.0e-3, 1000.0, WATER_MASS)
            .expect("spectrum");
    assert!(result.absorption_coefficient().iter().all(|value| *value == 0.0));
    assert!(result.transmittance().iter().all(|value| *value == 1.0));
    assert!(result.absorbance().iter().all(|value| *value == 0.0));
}

#[test]
fn voigt_reduces_to_gaussian_and_lorentzian_limits() {
    let evaluator = LineShapeEvaluator::new(PhysicalConstants::default());
    let doppler = evaluator
        .doppler_width(WATER_CENTER, 296.15, WATER_MASS)
        .expect("doppler width");

    let gaussian_peak = evaluator.profile_value(0.0, 1.0e-12, doppler);
    assert_close(
        "gaussian peak",
        1.0 / (doppler * PI.sqrt()),
        gaussian_peak,
        1.0e-9,
        0.0,
    );
    assert_close("gaussian peak reference", 48.654_884_523_554_74, gaussian_peak, 1.0e-9, 0.0);

    let lorentz = 0.05;
    for offset in [0.0, 0.05, 0.2] {
        let value = evaluator.profile_value(offset, lorentz, 1.0e-6);
        let expected = lorentz / (PI * (offset * offset + lorentz * lorentz));
        assert_close(&format!("lorentzian at {offset}"), expected, value, 1.0e-4, 0.0);
    }
}

#[test]
fn widths_are_monotonic_in_their_drivers() {
    let evaluator = LineShapeEvaluator::new(PhysicalConstants::default());

    let mut previous = 0.0;
    for pressure in [0.0, 0.1, 0.5, 1.0, 2.0, 10.0] {
        let width = evaluator
            .lorentz_width(0.05, pressure, 296.15)
            .expect("lorentz width");
        assert!(width >= previous, "lorentz width fell at {pressure} atm");
        previous = width;
    }

    let mut previous = 0.0;
    for temperature in [50.0, 150.0, 296.15, 500.0, 1500.0] {
        let width = evaluator
            .doppler_width(WATER_CENTER, temperature, WATER_MASS)
            .expect("doppler width");
        assert!(width >= previous, "doppler width fell at {temperature} K");
        previous = width;
    }
}

#[test]
fn absorption_is_linear_in_concentration() {
    let grid = scenario_grid();
    let synthesizer = SpectrumSynthesizer::default();
    let lines = several_lines();

    let single = synthesizer
        .absorption_coefficient(&lines, &grid, &scenario_conditions(1.0e-3))
        .expect("single");
    let tripled = synthesizer
        .absorption_coefficient(&lines, &grid, &scenario_conditions(3.0e-3))
        .expect("tripled");

    for (index, (one, three)) in single.iter().zip(&tripled).enumerate() {
        assert_close(&format!("alpha[{index}]"), 3.0 * one, *three, 1.0e-12, 1.0e-300);
    }
}

#[test]
fn mixture_sums_absorption_before_beer_lambert() {
    let grid = scenario_grid();
    let synthesizer = SpectrumSynthesizer::default();
    let water = [water_line()];
    let methane = [SpectralLine::new(6649.3, 2.0e-21, 0.07).expect("methane line")];
    let shared = SharedConditions::new(296.15, 1.0, 1000.0).expect("shared");

    let mixture = synthesizer
        .synthesize_mixture(
            &[
                GasComponent {
                    species: "H2O",
                    lines: &water,
                    concentration: 1.0e-3,
                    molecular_mass: WATER_MASS,
                },
                GasComponent {
                    species: "CH4",
                    lines: &methane,
                    concentration: 2.0e-6,
                    molecular_mass: 16.04,
                },
            ],
            &grid,
            &shared,
        )
        .expect("mixture");

    for index in 0..grid.len() {
        let water_alpha = mixture.species[0].spectrum.absorption_coefficient()[index];
        let methane_alpha = mixture.species[1].spectrum.absorption_coefficient()[index];
        let combined_alpha = mixture.combined.absorption_coefficient()[index];
        assert_eq!(combined_alpha, water_alpha + methane_alpha);

        let water_t = mixture.species[0].spectrum.transmittance()[index];
        let methane_t = mixture.species[1].spectrum.transmittance()[index];
        assert_close(
            &format!("transmittance product[{index}]"),
            water_t * methane_t,
            mixture.combined.transmittance()[index],
            1.0e-12,
            0.0,
        );
    }
}

#[test]
fn water_line_peaks_at_its_center() {
    let grid = scenario_grid();
    let step = 2.0 / 999.0;
    let result = SpectrumSynthesizer::default()
        .calculate_absorption_spectrum(&[water_line()], &grid, &scenario_conditions(1.0e-3))
        .expect("spectrum");

    let summary = result.summary();
    assert!(
        (summary.peak_frequency - WATER_CENTER).abs() <= step,
        "peak at {}",
        summary.peak_frequency
    );
    assert_close(
        "peak alpha",
        0.006_207_022_684_406_997,
        result.absorption_coefficient()[440],
        1.0e-9,
        0.0,
    );
    assert_eq!(result.frequency()[440], summary.peak_frequency);
}

#[test]
fn water_line_is_symmetric_about_its_center() {
    let grid = scenario_grid();
    let mirrored = FrequencyGrid::new(
        grid.as_slice()
            .iter()
            .rev()
            .map(|frequency| 2.0 * WATER_CENTER - frequency)
            .collect(),
    )
    .expect("mirrored grid");

    let synthesizer = SpectrumSynthesizer::default();
    let direct = synthesizer
        .absorption_coefficient(&[water_line()], &grid, &scenario_conditions(1.0e-3))
        .expect("direct");
    let reflected = synthesizer
        .absorption_coefficient(&[water_line()], &mirrored, &scenario_conditions(1.0e-3))
        .expect("reflected");

    let count = grid.len();
    for index in 0..count {
        assert_close(
            &format!("alpha[{index}]"),
            direct[index],
            reflected[count - 1 - index],
            1.0e-8,
            1.0e-18,
        );
    }
}

#[test]
fn absorbance_is_optical_depth_in_decades() {
    let result = SpectrumSynthesizer::default()
        .calculate_absorption_spectrum(
            &several_lines(),
            &scenario_grid(),
            &scenario_conditions(1.0e-2),
        )
        .expect("spectrum");

    for (index, (alpha, absorbance)) in result
        .absorption_coefficient()
        .iter()
        .zip(result.absorbance())
        .enumerate()
    {
        assert_close(
            &format!("absorbance[{index}]"),
            alpha * 1000.0 / LN_10,
            *absorbance,
            1.0e-14,
            0.0,
        );
    }
}
