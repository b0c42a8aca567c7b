//! Configuration validation.
//!
//! Runs before any block is built so a bad file is reported with the field
//! that caused it rather than as a bare builder error.

use crate::schema::{
    AutopilotConfig, LATEST_VERSION, LateralDef, LimitsDef, LongitudinalDef, PidDef, PlantDef,
    ScenarioDef,
};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

pub fn validate_config(config: &AutopilotConfig) -> Result<(), ValidationError> {
    if config.version == 0 || config.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: config.version,
        });
    }
    validate_lateral(&config.lateral)?;
    validate_longitudinal(&config.longitudinal)?;
    if let Some(plant) = &config.plant {
        validate_plant(plant)?;
    }
    if let Some(scenario) = &config.scenario {
        validate_scenario(scenario)?;
    }
    Ok(())
}

fn finite(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, value, "must be finite"))
    }
}

// Infinite bounds are allowed; NaN and inverted pairs are not.
fn limits(field: &str, l: &LimitsDef) -> Result<(), ValidationError> {
    if l.min.is_nan() || l.max.is_nan() {
        return Err(invalid(field, format!("[{}, {}]", l.min, l.max), "bound is NaN"));
    }
    if l.min > l.max {
        return Err(invalid(
            field,
            format!("[{}, {}]", l.min, l.max),
            "min exceeds max",
        ));
    }
    Ok(())
}

fn optional_limits(field: &str, l: &Option<LimitsDef>) -> Result<(), ValidationError> {
    match l {
        Some(l) => limits(field, l),
        None => Ok(()),
    }
}

fn validate_lateral(def: &LateralDef) -> Result<(), ValidationError> {
    let g = &def.gains;
    for (field, value) in [
        ("lateral.gains.k_omega_yaw_rudder", g.k_omega_yaw_rudder),
        ("lateral.gains.k_roll_rudder", g.k_roll_rudder),
        ("lateral.gains.k_omega_roll_aileron", g.k_omega_roll_aileron),
        ("lateral.gains.k_roll_aileron", g.k_roll_aileron),
        ("lateral.gains.k_i_roll_aileron", g.k_i_roll_aileron),
        ("lateral.gains.k_psi_aileron", g.k_psi_aileron),
        ("lateral.gains.k_psi_i_aileron", g.k_psi_i_aileron),
    ] {
        finite(field, value)?;
    }
    optional_limits("lateral.roll_saturation", &def.roll_saturation)?;
    optional_limits("lateral.aileron_saturation", &def.aileron_saturation)?;
    optional_limits("lateral.rudder_saturation", &def.rudder_saturation)?;
    limits("lateral.roll_integrator", &def.roll_integrator)?;
    limits("lateral.yaw_integrator", &def.yaw_integrator)?;
    Ok(())
}

fn validate_pid(name: &str, def: &PidDef) -> Result<(), ValidationError> {
    finite(&format!("longitudinal.{name}.p"), def.p)?;
    finite(&format!("longitudinal.{name}.i"), def.i)?;
    finite(&format!("longitudinal.{name}.d"), def.d)?;
    limits(&format!("longitudinal.{name}.integrator"), &def.integrator)?;
    limits(&format!("longitudinal.{name}.derivative"), &def.derivative)?;
    Ok(())
}

fn validate_longitudinal(def: &LongitudinalDef) -> Result<(), ValidationError> {
    validate_pid("speed", &def.speed)?;
    validate_pid("altitude", &def.altitude)?;
    validate_pid("pitch_angle", &def.pitch_angle)?;
    validate_pid("pitch_rate", &def.pitch_rate)?;
    optional_limits("longitudinal.pitch_saturation", &def.pitch_saturation)?;
    Ok(())
}

fn validate_plant(def: &PlantDef) -> Result<(), ValidationError> {
    let p = &def.params;
    for (field, value) in [
        ("plant.params.roll_damping", p.roll_damping),
        ("plant.params.aileron_effectiveness", p.aileron_effectiveness),
        ("plant.params.yaw_damping", p.yaw_damping),
        ("plant.params.rudder_effectiveness", p.rudder_effectiveness),
        ("plant.params.bank_to_yaw", p.bank_to_yaw),
        ("plant.params.pitch_damping", p.pitch_damping),
        ("plant.params.pitch_stiffness", p.pitch_stiffness),
        ("plant.params.elevator_effectiveness", p.elevator_effectiveness),
        ("plant.params.thrust_gain", p.thrust_gain),
        ("plant.params.drag", p.drag),
        ("plant.params.trim_airspeed", p.trim_airspeed),
        ("plant.params.gravity", p.gravity),
    ] {
        finite(field, value)?;
    }
    if !def.initial.is_finite() {
        return Err(invalid(
            "plant.initial",
            format!("{:?}", def.initial),
            "must be finite",
        ));
    }
    Ok(())
}

fn validate_scenario(def: &ScenarioDef) -> Result<(), ValidationError> {
    let r = &def.reference;
    finite("scenario.reference.desired_yaw", r.desired_yaw)?;
    finite("scenario.reference.desired_altitude", r.desired_altitude)?;
    finite("scenario.reference.desired_airspeed", r.desired_airspeed)?;

    let sim = &def.sim;
    if !(sim.dt.is_finite() && sim.dt > 0.0) {
        return Err(invalid("scenario.sim.dt", sim.dt, "must be finite and positive"));
    }
    if !(sim.t_end.is_finite() && sim.t_end >= 0.0) {
        return Err(invalid(
            "scenario.sim.t_end",
            sim.t_end,
            "must be finite and non-negative",
        ));
    }
    if sim.max_steps == 0 {
        return Err(invalid("scenario.sim.max_steps", 0, "must be positive"));
    }
    if sim.record_every == 0 {
        return Err(invalid("scenario.sim.record_every", 0, "must be positive"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&AutopilotConfig::default()).is_ok());
    }

    #[test]
    fn future_version_rejected() {
        let config = AutopilotConfig {
            version: LATEST_VERSION + 1,
            ..AutopilotConfig::default()
        };
        assert_eq!(
            validate_config(&config),
            Err(ValidationError::UnsupportedVersion {
                version: LATEST_VERSION + 1
            })
        );
    }

    #[test]
    fn inverted_saturation_names_field() {
        let mut config = AutopilotConfig::default();
        config.lateral.aileron_saturation = Some(LimitsDef { min: 1.0, max: -1.0 });
        match validate_config(&config) {
            Err(ValidationError::InvalidValue { field, reason, .. }) => {
                assert_eq!(field, "lateral.aileron_saturation");
                assert_eq!(reason, "min exceeds max");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn infinite_bounds_allowed_but_nan_rejected() {
        let mut config = AutopilotConfig::default();
        config.longitudinal.pitch_saturation = Some(LimitsDef {
            min: f64::NEG_INFINITY,
            max: f64::INFINITY,
        });
        assert!(validate_config(&config).is_ok());

        config.longitudinal.pitch_rate.integrator.max = f64::NAN;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn non_finite_gain_rejected() {
        let mut config = AutopilotConfig::default();
        config.longitudinal.altitude.d = f64::INFINITY;
        match validate_config(&config) {
            Err(ValidationError::InvalidValue { field, .. }) => {
                assert_eq!(field, "longitudinal.altitude.d");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn scenario_dt_checked() {
        let mut scenario = ScenarioDef::default();
        scenario.sim.dt = 0.0;
        let config = AutopilotConfig {
            scenario: Some(scenario),
            ..AutopilotConfig::default()
        };
        assert!(validate_config(&config).is_err());
    }
}
