//! Fixed-rate closed-loop runner and result recording.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{info, trace};

use crate::autopilot::{Autopilot, Reference};
use crate::error::{SimError, SimResult};
use crate::integrator::{ForwardEuler, PlantIntegrator, Rk4};
use crate::model::{Actuated, AircraftState, Commands, PlantModel};

/// Plant integrator selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegratorType {
    /// Fourth-order Runge-Kutta, four rhs calls per step.
    #[default]
    Rk4,
    /// Forward Euler, one rhs call per step.
    ForwardEuler,
}

impl FromStr for IntegratorType {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rk4" => Ok(Self::Rk4),
            "euler" | "forward_euler" | "forward-euler" => Ok(Self::ForwardEuler),
            _ => Err(SimError::InvalidArg {
                what: "integrator must be rk4 or euler",
            }),
        }
    }
}

impl fmt::Display for IntegratorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rk4 => write!(f, "rk4"),
            Self::ForwardEuler => write!(f, "forward_euler"),
        }
    }
}

/// Options for closed-loop runs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimOptions {
    /// Control period and plant step (seconds)
    pub dt: f64,
    /// Final simulation time (seconds)
    pub t_end: f64,
    /// Maximum number of ticks
    pub max_steps: usize,
    /// Record every N-th tick
    pub record_every: usize,
    pub integrator: IntegratorType,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            dt: 0.033,
            t_end: 10.0,
            max_steps: 100_000,
            record_every: 1,
            integrator: IntegratorType::default(),
        }
    }
}

impl SimOptions {
    pub fn validate(&self) -> SimResult<()> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(SimError::InvalidArg {
                what: "dt must be finite and positive",
            });
        }
        if !(self.t_end.is_finite() && self.t_end >= 0.0) {
            return Err(SimError::InvalidArg {
                what: "t_end must be finite and non-negative",
            });
        }
        if self.max_steps == 0 {
            return Err(SimError::InvalidArg {
                what: "max_steps must be positive",
            });
        }
        if self.record_every == 0 {
            return Err(SimError::InvalidArg {
                what: "record_every must be positive",
            });
        }
        Ok(())
    }
}

/// Recorded closed-loop trajectory. `commands[k]` is the command held while
/// integrating from `time[k]`; the final entry carries the last command applied.
#[derive(Clone, Debug, Default)]
pub struct SimRecord {
    pub time: Vec<f64>,
    pub states: Vec<AircraftState>,
    pub commands: Vec<Commands>,
}

impl SimRecord {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    fn push(&mut self, t: f64, x: AircraftState, u: Commands) {
        self.time.push(t);
        self.states.push(x);
        self.commands.push(u);
    }
}

/// Run the autopilot against `plant` at a fixed rate.
///
/// Each tick samples the plant state, steps both laws once, holds the
/// resulting commands and advances the plant by `dt`.
pub fn run_sim<M>(
    plant: &mut M,
    autopilot: &Autopilot,
    reference: &Reference,
    opts: &SimOptions,
) -> SimResult<SimRecord>
where
    M: PlantModel<State = AircraftState> + Actuated,
{
    opts.validate()?;

    let steps = ((opts.t_end / opts.dt).ceil() as usize).min(opts.max_steps);
    info!(
        dt = opts.dt,
        t_end = opts.t_end,
        steps,
        integrator = %opts.integrator,
        "closed-loop run started"
    );

    let mut record = SimRecord::default();
    let mut x = plant.initial_state();
    let mut t = 0.0;

    for step in 0..steps {
        let u = autopilot.step(&x, reference, opts.dt)?;
        plant.apply(u);

        if step % opts.record_every == 0 {
            record.push(t, x, u);
        }

        x = match opts.integrator {
            IntegratorType::Rk4 => Rk4.step(plant, t, &x, opts.dt)?,
            IntegratorType::ForwardEuler => ForwardEuler.step(plant, t, &x, opts.dt)?,
        };
        t = (step + 1) as f64 * opts.dt;
        trace!(
            t,
            aileron = u.aileron,
            rudder = u.rudder,
            elevator = u.elevator,
            throttle = u.throttle,
            "tick"
        );

        if !x.is_finite() {
            return Err(SimError::NonFinite { time: t });
        }
    }

    // Always record the final state
    record.push(t, x, autopilot.commands());

    info!(samples = record.len(), t_final = t, "closed-loop run finished");
    Ok(record)
}
