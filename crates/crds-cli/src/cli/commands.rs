use super::CliError;
use super::helpers::*;
use crds_core::common::{
    ConcentrationUnit, LengthUnit, MolarMassTable, PhysicalConstants, PressureUnit,
};
use crds_core::domain::{CrdsError, PhysicalConditions, SpectralLine};
use crds_core::numerics::FrequencyGrid;
use crds_core::scenario::ScenarioRunner;
use crds_core::synthesis::{LineWindow, SpectrumSynthesizer};
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(clap::Args)]
pub(super) struct SynthesizeArgs {
    /// Scenario JSON path
    #[arg(long)]
    scenario: PathBuf,

    /// JSON report output path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(clap::Args)]
#[command(group(clap::ArgGroup::new("mass").args(["molar_mass", "species"])))]
pub(super) struct LineArgs {
    /// Line center, cm⁻¹
    #[arg(long)]
    center: f64,

    /// Line intensity in line-list units
    #[arg(long)]
    intensity: f64,

    /// Air-broadened half-width at 296 K, cm⁻¹/atm
    #[arg(long, default_value_t = 0.05)]
    gamma_air: f64,

    /// Temperature, K
    #[arg(long, default_value_t = 296.15)]
    temperature: f64,

    #[arg(long, default_value_t = 1.0)]
    pressure: f64,

    #[arg(long, value_enum, default_value_t = PressureArg::Atm)]
    pressure_unit: PressureArg,

    #[arg(long)]
    concentration: f64,

    #[arg(long, value_enum, default_value_t = ConcentrationArg::Fraction)]
    concentration_unit: ConcentrationArg,

    #[arg(long, default_value_t = 1000.0)]
    path_length: f64,

    #[arg(long, value_enum, default_value_t = LengthArg::M)]
    path_length_unit: LengthArg,

    /// Molar mass, g/mol
    #[arg(long)]
    molar_mass: Option<f64>,

    /// Species formula looked up in the built-in molar-mass table (default H2O)
    #[arg(long)]
    species: Option<String>,

    /// Grid start, cm⁻¹ (default: center - 1)
    #[arg(long)]
    start: Option<f64>,

    /// Grid stop, cm⁻¹ (default: center + 1)
    #[arg(long)]
    stop: Option<f64>,

    #[arg(long, default_value_t = 1000)]
    points: usize,

    /// Truncate the profile at this many Doppler and Lorentz widths
    #[arg(long, num_args = 2, value_names = ["DOPPLER", "LORENTZ"])]
    window: Option<Vec<f64>>,

    /// JSON spectrum output path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, clap::ValueEnum)]
pub(super) enum PressureArg {
    Atm,
    Torr,
    #[value(name = "kPa", alias = "kpa")]
    KiloPascal,
}

impl From<PressureArg> for PressureUnit {
    fn from(value: PressureArg) -> Self {
        match value {
            PressureArg::Atm => Self::Atm,
            PressureArg::Torr => Self::Torr,
            PressureArg::KiloPascal => Self::KiloPascal,
        }
    }
}

#[derive(Clone, Copy, clap::ValueEnum)]
pub(super) enum ConcentrationArg {
    Fraction,
    Percent,
    Ppm,
    Ppb,
}

impl From<ConcentrationArg> for ConcentrationUnit {
    fn from(value: ConcentrationArg) -> Self {
        match value {
            ConcentrationArg::Fraction => Self::Fraction,
            ConcentrationArg::Percent => Self::Percent,
            ConcentrationArg::Ppm => Self::Ppm,
            ConcentrationArg::Ppb => Self::Ppb,
        }
    }
}

#[derive(Clone, Copy, clap::ValueEnum)]
pub(super) enum LengthArg {
    M,
    Km,
    Cm,
}

impl From<LengthArg> for LengthUnit {
    fn from(value: LengthArg) -> Self {
        match value {
            LengthArg::M => Self::M,
            LengthArg::Km => Self::Km,
            LengthArg::Cm => Self::Cm,
        }
    }
}

pub(super) fn run_synthesize_command(args: SynthesizeArgs) -> Result<i32, CliError> {
    info!(scenario = %args.scenario.display(), "running scenario");
    let report = ScenarioRunner::default()
        .run_file(&args.scenario)
        .map_err(CliError::Compute)?;
    debug!(
        species = report.mixture.species.len(),
        points = report.summary.point_count,
        "scenario synthesized"
    );

    println!("{}", render_scenario_summary(&report));
    if let Some(output) = &args.output {
        debug!(output = %output.display(), "writing scenario report");
        write_json_report(output, &report)?;
        println!("JSON report: {}", output.display());
    }
    Ok(0)
}

pub(super) fn run_line_command(args: LineArgs) -> Result<i32, CliError> {
    let molar_mass = match (args.molar_mass, args.species.as_deref()) {
        (Some(molar_mass), _) => molar_mass,
        (None, species) => MolarMassTable::with_default_species()
            .molar_mass(species.unwrap_or("H2O"))
            .map_err(CliError::Compute)?,
    };

    let line = SpectralLine::new(args.center, args.intensity, args.gamma_air)
        .map_err(CliError::Compute)?;
    let conditions = PhysicalConditions::new(
        args.temperature,
        PressureUnit::from(args.pressure_unit).to_atm(args.pressure),
        ConcentrationUnit::from(args.concentration_unit).to_mole_fraction(args.concentration),
        LengthUnit::from(args.path_length_unit).to_metres(args.path_length),
        molar_mass,
    )
    .map_err(CliError::Compute)?;

    let start = args.start.unwrap_or(args.center - 1.0);
    let stop = args.stop.unwrap_or(args.center + 1.0);
    let grid = FrequencyGrid::linspace(start, stop, args.points)
        .map_err(|error| CliError::Compute(CrdsError::from(error)))?;

    let window = match args.window.as_deref() {
        Some([doppler_widths, lorentz_widths]) => Some(
            LineWindow::new(*doppler_widths, *lorentz_widths).map_err(CliError::Compute)?,
        ),
        Some(_) => {
            return Err(CliError::Usage(
                "--window expects DOPPLER and LORENTZ width multiples".to_string(),
            ));
        }
        None => None,
    };

    info!(
        center = line.center_frequency,
        molar_mass,
        points = grid.len(),
        windowed = window.is_some(),
        "synthesizing single line"
    );
    let spectrum = SpectrumSynthesizer::new(PhysicalConstants::default())
        .with_window(window)
        .calculate_absorption_spectrum(&[line], &grid, &conditions)
        .map_err(CliError::Compute)?;

    println!("{}", render_spectrum_summary(&spectrum.summary()));
    if let Some(output) = &args.output {
        debug!(output = %output.display(), "writing line report");
        write_json_report(output, &LineReport::new(&spectrum))?;
        println!("JSON report: {}", output.display());
    }
    Ok(0)
}

pub(super) fn run_species_command() -> Result<i32, CliError> {
    print!("{}", render_species_table(&MolarMassTable::with_default_species()));
    Ok(0)
}
