//! Both control laws behind shared handles.

use std::sync::Arc;

use fl_core::Shared;
use fl_laws::{LateralControl, LateralInputs, LongitudinalControl, LongitudinalInputs};
use serde::{Deserialize, Serialize};

use crate::error::SimResult;
use crate::model::{AircraftState, Commands};

/// Setpoints tracked by the autopilot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reference {
    pub desired_yaw: f64,
    pub desired_altitude: f64,
    pub desired_airspeed: f64,
}

/// Lateral and longitudinal laws stepped together once per tick.
///
/// Each law sits behind its own lock. Handles returned by [`Autopilot::lateral`]
/// and [`Autopilot::longitudinal`] can be moved to another thread to read
/// outputs or retune gains while a run is in progress.
#[derive(Debug, Clone)]
pub struct Autopilot {
    lateral: Arc<Shared<LateralControl<f64>>>,
    longitudinal: Arc<Shared<LongitudinalControl<f64>>>,
}

impl Autopilot {
    pub fn new(lateral: LateralControl<f64>, longitudinal: LongitudinalControl<f64>) -> Self {
        Self {
            lateral: Arc::new(Shared::new(lateral)),
            longitudinal: Arc::new(Shared::new(longitudinal)),
        }
    }

    pub fn lateral(&self) -> Arc<Shared<LateralControl<f64>>> {
        Arc::clone(&self.lateral)
    }

    pub fn longitudinal(&self) -> Arc<Shared<LongitudinalControl<f64>>> {
        Arc::clone(&self.longitudinal)
    }

    /// Run both laws against the measured state.
    pub fn step(
        &self,
        state: &AircraftState,
        reference: &Reference,
        dt: f64,
    ) -> SimResult<Commands> {
        let lateral = self.lateral.with(|law| {
            law.step(
                &LateralInputs {
                    desired_yaw: reference.desired_yaw,
                    yaw: state.yaw,
                    yaw_rate: state.yaw_rate,
                    roll: state.roll,
                    roll_rate: state.roll_rate,
                },
                dt,
            )
        })?;
        let longitudinal = self.longitudinal.with(|law| {
            law.step(
                &LongitudinalInputs {
                    desired_altitude: reference.desired_altitude,
                    desired_airspeed: reference.desired_airspeed,
                    altitude: state.altitude,
                    airspeed: state.airspeed,
                    pitch: state.pitch,
                    pitch_rate: state.pitch_rate,
                },
                dt,
            )
        })?;
        Ok(Commands {
            aileron: lateral.aileron,
            rudder: lateral.rudder,
            elevator: longitudinal.elevator,
            throttle: longitudinal.throttle,
        })
    }

    /// Last commands produced by [`Autopilot::step`].
    pub fn commands(&self) -> Commands {
        let lateral = self.lateral.output();
        let longitudinal = self.longitudinal.output();
        Commands {
            aileron: lateral.aileron,
            rudder: lateral.rudder,
            elevator: longitudinal.elevator,
            throttle: longitudinal.throttle,
        }
    }

    pub fn reset(&self) {
        self.lateral.reset();
        self.longitudinal.reset();
    }
}
