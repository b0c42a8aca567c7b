//! Autopilot configuration file schema.

use fl_core::DEFAULT_LIMIT;
use fl_sim::{AircraftParams, AircraftState, Reference, SimOptions};
use serde::{Deserialize, Serialize};

pub const LATEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AutopilotConfig {
    #[serde(default = "latest_version")]
    pub version: u32,
    #[serde(default)]
    pub lateral: LateralDef,
    #[serde(default)]
    pub longitudinal: LongitudinalDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plant: Option<PlantDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario: Option<ScenarioDef>,
}

fn latest_version() -> u32 {
    LATEST_VERSION
}

impl Default for AutopilotConfig {
    fn default() -> Self {
        Self {
            version: LATEST_VERSION,
            lateral: LateralDef::default(),
            longitudinal: LongitudinalDef::default(),
            plant: None,
            scenario: None,
        }
    }
}

/// Closed `[min, max]` bounds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LimitsDef {
    pub min: f64,
    pub max: f64,
}

impl LimitsDef {
    pub fn symmetric(limit: f64) -> Self {
        Self {
            min: -limit,
            max: limit,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LateralGainsDef {
    pub k_omega_yaw_rudder: f64,
    pub k_roll_rudder: f64,
    pub k_omega_roll_aileron: f64,
    pub k_roll_aileron: f64,
    pub k_i_roll_aileron: f64,
    pub k_psi_aileron: f64,
    pub k_psi_i_aileron: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LateralLoopsDef {
    pub rudder: bool,
    pub yaw_angle: bool,
    pub roll_angle: bool,
    pub roll_rate: bool,
}

impl Default for LateralLoopsDef {
    fn default() -> Self {
        Self {
            rudder: true,
            yaw_angle: true,
            roll_angle: true,
            roll_rate: true,
        }
    }
}

/// Lateral law settings. Absent saturations are unbounded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LateralDef {
    pub gains: LateralGainsDef,
    pub loops: LateralLoopsDef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roll_saturation: Option<LimitsDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aileron_saturation: Option<LimitsDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rudder_saturation: Option<LimitsDef>,
    pub roll_integrator: LimitsDef,
    pub yaw_integrator: LimitsDef,
}

impl Default for LateralDef {
    fn default() -> Self {
        Self {
            gains: LateralGainsDef::default(),
            loops: LateralLoopsDef::default(),
            roll_saturation: None,
            aileron_saturation: None,
            rudder_saturation: None,
            roll_integrator: LimitsDef::symmetric(1.0),
            yaw_integrator: LimitsDef::symmetric(DEFAULT_LIMIT),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PidDef {
    pub p: f64,
    pub i: f64,
    pub d: f64,
    pub integrator: LimitsDef,
    pub derivative: LimitsDef,
}

impl Default for PidDef {
    fn default() -> Self {
        Self {
            p: 0.0,
            i: 0.0,
            d: 0.0,
            integrator: LimitsDef::symmetric(DEFAULT_LIMIT),
            derivative: LimitsDef::symmetric(DEFAULT_LIMIT),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LongitudinalLoopsDef {
    pub speed: bool,
    pub altitude: bool,
    pub pitch_angle: bool,
    pub pitch_rate: bool,
}

impl Default for LongitudinalLoopsDef {
    fn default() -> Self {
        Self {
            speed: true,
            altitude: true,
            pitch_angle: true,
            pitch_rate: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LongitudinalDef {
    pub speed: PidDef,
    pub altitude: PidDef,
    pub pitch_angle: PidDef,
    pub pitch_rate: PidDef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pitch_saturation: Option<LimitsDef>,
    pub loops: LongitudinalLoopsDef,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlantDef {
    pub params: AircraftParams,
    pub initial: AircraftState,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScenarioDef {
    pub reference: Reference,
    pub sim: SimOptions,
}
