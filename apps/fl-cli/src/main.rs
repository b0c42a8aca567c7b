use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use fl_config::{
    AutopilotConfig, ConfigError, PlantDef, ScenarioDef, build_autopilot, build_plant, load_yaml,
    to_yaml_string,
};
use fl_core::ControlError;
use fl_sim::{AircraftState, IntegratorType, SimError, SimRecord, run_sim};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fl-cli")]
#[command(about = "FlightLaw CLI - autopilot control law configuration and simulation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate an autopilot configuration file
    Validate {
        /// Path to the configuration YAML file
        config_path: PathBuf,
    },
    /// Fly the configured autopilot against the built-in aircraft model
    Run {
        /// Path to the configuration YAML file
        config_path: PathBuf,
        /// Control period in seconds (overrides the scenario)
        #[arg(long)]
        dt: Option<f64>,
        /// End time in seconds (overrides the scenario)
        #[arg(long)]
        t_end: Option<f64>,
        /// Plant integrator: rk4 or euler (overrides the scenario)
        #[arg(long)]
        integrator: Option<IntegratorType>,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print a complete configuration with default values
    Template,
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Control(#[from] ControlError),

    #[error(transparent)]
    Sim(#[from] SimError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

type CliResult<T> = Result<T, CliError>;

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { config_path } => cmd_validate(&config_path),
        Commands::Run {
            config_path,
            dt,
            t_end,
            integrator,
            output,
        } => cmd_run(&config_path, dt, t_end, integrator, output.as_deref()),
        Commands::Template => cmd_template(),
    }
}

fn cmd_validate(config_path: &Path) -> CliResult<()> {
    println!("Validating config: {}", config_path.display());
    let config = load_yaml(config_path)?;
    // Building catches anything the schema checks let through.
    build_autopilot(&config)?;
    println!("✓ Config is valid");
    Ok(())
}

fn cmd_run(
    config_path: &Path,
    dt: Option<f64>,
    t_end: Option<f64>,
    integrator: Option<IntegratorType>,
    output: Option<&Path>,
) -> CliResult<()> {
    let config = load_yaml(config_path)?;
    let autopilot = build_autopilot(&config)?;

    let ScenarioDef { reference, mut sim } = config.scenario.unwrap_or_default();
    if let Some(dt) = dt {
        sim.dt = dt;
    }
    if let Some(t_end) = t_end {
        sim.t_end = t_end;
    }
    if let Some(integrator) = integrator {
        sim.integrator = integrator;
    }

    // Without a plant section, start trimmed at the reference altitude.
    let plant_def = config.plant.unwrap_or_else(|| {
        let params = fl_sim::AircraftParams::default();
        PlantDef {
            initial: AircraftState {
                altitude: reference.desired_altitude,
                airspeed: params.trim_airspeed,
                ..AircraftState::default()
            },
            params,
        }
    });
    let mut plant = build_plant(&plant_def);

    info!(config = %config_path.display(), "running closed loop");
    let record = run_sim(&mut plant, &autopilot, &reference, &sim)?;

    let csv = record_to_csv(&record);
    if let Some(path) = output {
        std::fs::write(path, csv)?;
        println!("✓ Exported {} samples to {}", record.len(), path.display());
    } else {
        print!("{}", csv);
    }
    Ok(())
}

fn cmd_template() -> CliResult<()> {
    let config = AutopilotConfig {
        plant: Some(PlantDef::default()),
        scenario: Some(ScenarioDef::default()),
        ..AutopilotConfig::default()
    };
    print!("{}", to_yaml_string(&config)?);
    Ok(())
}

const CSV_HEADER: &str = "time_s,yaw,yaw_rate,roll,roll_rate,pitch,pitch_rate,altitude,airspeed,\
aileron,rudder,elevator,throttle\n";

fn record_to_csv(record: &SimRecord) -> String {
    let mut csv = String::from(CSV_HEADER);
    for ((t, x), u) in record
        .time
        .iter()
        .zip(&record.states)
        .zip(&record.commands)
    {
        csv.push_str(&format!(
            "{},{},{},{},{},{},{},{},{},{},{},{},{}\n",
            t,
            x.yaw,
            x.yaw_rate,
            x.roll,
            x.roll_rate,
            x.pitch,
            x.pitch_rate,
            x.altitude,
            x.airspeed,
            u.aileron,
            u.rudder,
            u.elevator,
            u.throttle
        ));
    }
    csv
}

#[cfg(test)]
mod tests {
    use super::*;
    use fl_sim::Commands as PlantCommands;

    #[test]
    fn csv_has_one_row_per_sample() {
        let record = SimRecord {
            time: vec![0.0, 0.5],
            states: vec![AircraftState::default(); 2],
            commands: vec![PlantCommands::default(); 2],
        };
        let csv = record_to_csv(&record);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].split(',').count(), 13);
        assert!(lines[2].starts_with("0.5,"));
    }

    #[test]
    fn cli_parses_run_overrides() {
        let cli = Cli::try_parse_from([
            "fl-cli",
            "run",
            "ap.yaml",
            "--dt",
            "0.01",
            "--integrator",
            "euler",
            "-o",
            "out.csv",
        ])
        .unwrap();
        match cli.command {
            Commands::Run {
                dt, integrator, output, ..
            } => {
                assert_eq!(dt, Some(0.01));
                assert_eq!(integrator, Some(IntegratorType::ForwardEuler));
                assert_eq!(output, Some(PathBuf::from("out.csv")));
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn template_is_valid_yaml_config() {
        let config = AutopilotConfig {
            plant: Some(PlantDef::default()),
            scenario: Some(ScenarioDef::default()),
            ..AutopilotConfig::default()
        };
        let yaml = to_yaml_string(&config).unwrap();
        assert_eq!(fl_config::from_yaml_str(&yaml).unwrap(), config);
    }
}
