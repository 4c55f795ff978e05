use super::CliError;
use anyhow::Context;
use crds_core::common::MolarMassTable;
use crds_core::scenario::ScenarioReport;
use crds_core::synthesis::{SpectrumResult, SpectrumSummary};
use serde::Serialize;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Single-line `--output` payload: the arrays plus their summary.
#[derive(Serialize)]
pub(super) struct LineReport<'a> {
    summary: SpectrumSummary,
    wavelength_nm: Vec<f64>,
    spectrum: &'a SpectrumResult,
}

impl<'a> LineReport<'a> {
    pub(super) fn new(spectrum: &'a SpectrumResult) -> Self {
        Self {
            summary: spectrum.summary(),
            wavelength_nm: spectrum.wavelengths_nm(),
            spectrum,
        }
    }
}

pub(super) fn write_json_report<T: Serialize>(path: &Path, report: &T) -> Result<(), CliError> {
    let content =
        serde_json::to_string_pretty(report).context("failed to serialize JSON report")?;

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| {
            format!("failed to create report directory '{}'", parent.display())
        })?;
    }
    fs::write(path, content)
        .with_context(|| format!("failed to write report '{}'", path.display()))
        .map_err(CliError::from)
}

pub(super) fn render_spectrum_summary(summary: &SpectrumSummary) -> String {
    format!(
        concat!(
            "Points: {}\n",
            "Peak absorbance: {:.6e} at {:.6} cm-1 ({:.4} nm)\n",
            "Minimum transmittance: {:.6}\n",
            "Integrated absorbance: {:.6e} cm-1",
        ),
        summary.point_count,
        summary.peak_absorbance,
        summary.peak_frequency,
        summary.peak_wavelength_nm,
        summary.min_transmittance,
        summary.integrated_absorbance,
    )
}

pub(super) fn render_scenario_summary(report: &ScenarioReport) -> String {
    let mut rendered = format!(
        "Conditions: T = {} K, p = {} atm, L = {} m\n",
        report.conditions.temperature,
        report.conditions.pressure_atm,
        report.conditions.path_length_m
    );
    for species in &report.mixture.species {
        let _ = writeln!(
            rendered,
            "Species {}: {} lines, mole fraction {:.3e}",
            species.species, species.line_count, species.concentration
        );
    }
    for contribution in &report.mixture.contributions {
        let _ = writeln!(
            rendered,
            "Contribution {}: max absorbance {:.6e} ({:.2}% of mixture peak)",
            contribution.species, contribution.max_absorbance, contribution.share_percent
        );
    }
    rendered.push_str(&render_spectrum_summary(&report.summary));
    rendered
}

pub(super) fn render_species_table(table: &MolarMassTable) -> String {
    let mut rendered = String::new();
    for (formula, molar_mass) in table.iter() {
        let _ = writeln!(rendered, "{formula:<8}{molar_mass:>10.3} g/mol");
    }
    rendered
}
