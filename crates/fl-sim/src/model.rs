//! Plant models driven by the autopilot.

use serde::{Deserialize, Serialize};

use crate::error::SimResult;

/// A continuous-time plant: `x_dot = f(t, x)` under the commands last applied.
pub trait PlantModel {
    type State: Clone;

    fn initial_state(&self) -> Self::State;

    /// Compute the state derivative at `(t, x)`.
    fn rhs(&mut self, t: f64, x: &Self::State) -> SimResult<Self::State>;

    /// Element-wise `a + b`.
    fn add(&self, a: &Self::State, b: &Self::State) -> Self::State;

    /// Element-wise `scale * a`.
    fn scale(&self, a: &Self::State, scale: f64) -> Self::State;
}

/// A plant whose inputs are the four autopilot commands.
pub trait Actuated {
    fn apply(&mut self, commands: Commands);
}

/// Attitude, rates and energy state of the aircraft. Angles in radians,
/// rates in rad/s, altitude in m, airspeed in m/s.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AircraftState {
    pub yaw: f64,
    pub yaw_rate: f64,
    pub roll: f64,
    pub roll_rate: f64,
    pub pitch: f64,
    pub pitch_rate: f64,
    pub altitude: f64,
    pub airspeed: f64,
}

impl AircraftState {
    fn to_array(self) -> [f64; 8] {
        [
            self.yaw,
            self.yaw_rate,
            self.roll,
            self.roll_rate,
            self.pitch,
            self.pitch_rate,
            self.altitude,
            self.airspeed,
        ]
    }

    fn from_array(v: [f64; 8]) -> Self {
        Self {
            yaw: v[0],
            yaw_rate: v[1],
            roll: v[2],
            roll_rate: v[3],
            pitch: v[4],
            pitch_rate: v[5],
            altitude: v[6],
            airspeed: v[7],
        }
    }

    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|v| v.is_finite())
    }
}

/// Actuator commands held constant across one integration step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Commands {
    pub aileron: f64,
    pub rudder: f64,
    pub elevator: f64,
    pub throttle: f64,
}

/// Coefficients of the decoupled linear aircraft model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AircraftParams {
    pub roll_damping: f64,
    pub aileron_effectiveness: f64,
    pub yaw_damping: f64,
    pub rudder_effectiveness: f64,
    /// Yaw acceleration per radian of bank.
    pub bank_to_yaw: f64,
    pub pitch_damping: f64,
    pub pitch_stiffness: f64,
    pub elevator_effectiveness: f64,
    pub thrust_gain: f64,
    pub drag: f64,
    pub trim_airspeed: f64,
    pub gravity: f64,
}

impl Default for AircraftParams {
    fn default() -> Self {
        Self {
            roll_damping: 2.0,
            aileron_effectiveness: 4.0,
            yaw_damping: 1.0,
            rudder_effectiveness: 1.5,
            bank_to_yaw: 0.4,
            pitch_damping: 2.0,
            pitch_stiffness: 1.0,
            elevator_effectiveness: 3.0,
            thrust_gain: 5.0,
            drag: 0.05,
            trim_airspeed: 50.0,
            gravity: 9.80665,
        }
    }
}

/// Toy aircraft with first-order rate damping on each rotational axis and a
/// point-mass energy model on the longitudinal axis:
///
/// ```text
/// roll_rate'  = La * aileron  - Lp * roll_rate
/// yaw_rate'   = Nr * rudder   - Nd * yaw_rate + Nphi * roll
/// pitch_rate' = Me * elevator - Mq * pitch_rate - Mtheta * pitch
/// airspeed'   = Kt * throttle - D * (airspeed - V_trim) - g * sin(pitch)
/// altitude'   = airspeed * sin(pitch)
/// ```
#[derive(Clone, Debug)]
pub struct RigidBodyAircraft {
    params: AircraftParams,
    initial: AircraftState,
    commands: Commands,
}

impl RigidBodyAircraft {
    pub fn new(params: AircraftParams, initial: AircraftState) -> Self {
        Self {
            params,
            initial,
            commands: Commands::default(),
        }
    }

    pub fn set_commands(&mut self, commands: Commands) {
        self.commands = commands;
    }

    pub fn commands(&self) -> Commands {
        self.commands
    }

    pub fn params(&self) -> &AircraftParams {
        &self.params
    }
}

impl Actuated for RigidBodyAircraft {
    fn apply(&mut self, commands: Commands) {
        self.set_commands(commands);
    }
}

impl PlantModel for RigidBodyAircraft {
    type State = AircraftState;

    fn initial_state(&self) -> AircraftState {
        self.initial
    }

    fn rhs(&mut self, _t: f64, x: &AircraftState) -> SimResult<AircraftState> {
        let p = &self.params;
        let u = &self.commands;
        let sin_pitch = x.pitch.sin();
        Ok(AircraftState {
            yaw: x.yaw_rate,
            yaw_rate: p.rudder_effectiveness * u.rudder - p.yaw_damping * x.yaw_rate
                + p.bank_to_yaw * x.roll,
            roll: x.roll_rate,
            roll_rate: p.aileron_effectiveness * u.aileron - p.roll_damping * x.roll_rate,
            pitch: x.pitch_rate,
            pitch_rate: p.elevator_effectiveness * u.elevator
                - p.pitch_damping * x.pitch_rate
                - p.pitch_stiffness * x.pitch,
            altitude: x.airspeed * sin_pitch,
            airspeed: p.thrust_gain * u.throttle
                - p.drag * (x.airspeed - p.trim_airspeed)
                - p.gravity * sin_pitch,
        })
    }

    fn add(&self, a: &AircraftState, b: &AircraftState) -> AircraftState {
        let (a, b) = (a.to_array(), b.to_array());
        AircraftState::from_array(std::array::from_fn(|i| a[i] + b[i]))
    }

    fn scale(&self, a: &AircraftState, scale: f64) -> AircraftState {
        AircraftState::from_array(a.to_array().map(|v| v * scale))
    }
}
