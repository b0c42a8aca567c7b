//! Turn validated definitions into configured control laws and plants.

use fl_blocks::{Pid, PidGains};
use fl_core::ControlResult;
use fl_laws::{LateralControl, LateralGains, LateralLoops, LongitudinalControl, LongitudinalLoops};
use fl_sim::{Autopilot, RigidBodyAircraft};

use crate::schema::{AutopilotConfig, LateralDef, LongitudinalDef, PidDef, PlantDef};

pub fn build_lateral(def: &LateralDef) -> ControlResult<LateralControl<f64>> {
    let g = def.gains;
    let mut law = LateralControl::with_gains(LateralGains {
        k_omega_yaw_rudder: g.k_omega_yaw_rudder,
        k_roll_rudder: g.k_roll_rudder,
        k_omega_roll_aileron: g.k_omega_roll_aileron,
        k_roll_aileron: g.k_roll_aileron,
        k_i_roll_aileron: g.k_i_roll_aileron,
        k_psi_aileron: g.k_psi_aileron,
        k_psi_i_aileron: g.k_psi_i_aileron,
    });
    law.set_loops(LateralLoops {
        rudder: def.loops.rudder,
        yaw_angle: def.loops.yaw_angle,
        roll_angle: def.loops.roll_angle,
        roll_rate: def.loops.roll_rate,
    });
    if let Some(l) = def.roll_saturation {
        law.set_roll_saturation_limits(l.min, l.max)?;
    }
    if let Some(l) = def.aileron_saturation {
        law.set_aileron_saturation_limits(l.min, l.max)?;
    }
    if let Some(l) = def.rudder_saturation {
        law.set_rudder_saturation_limits(l.min, l.max)?;
    }
    law.set_roll_integrator_limits(def.roll_integrator.min, def.roll_integrator.max)?;
    law.set_yaw_integrator_limits(def.yaw_integrator.min, def.yaw_integrator.max)?;
    Ok(law)
}

fn build_pid(def: &PidDef) -> ControlResult<Pid<f64>> {
    Pid::with_limits(
        PidGains::new(def.p, def.i, def.d),
        (def.integrator.min, def.integrator.max),
        (def.derivative.min, def.derivative.max),
    )
}

pub fn build_longitudinal(def: &LongitudinalDef) -> ControlResult<LongitudinalControl<f64>> {
    let mut law = LongitudinalControl::new();
    *law.speed_pid_mut() = build_pid(&def.speed)?;
    *law.altitude_pid_mut() = build_pid(&def.altitude)?;
    *law.pitch_angle_pid_mut() = build_pid(&def.pitch_angle)?;
    *law.pitch_rate_pid_mut() = build_pid(&def.pitch_rate)?;
    if let Some(l) = def.pitch_saturation {
        law.set_pitch_saturation_limits(l.min, l.max)?;
    }
    law.set_loops(LongitudinalLoops {
        speed: def.loops.speed,
        altitude: def.loops.altitude,
        pitch_angle: def.loops.pitch_angle,
        pitch_rate: def.loops.pitch_rate,
    });
    Ok(law)
}

pub fn build_autopilot(config: &AutopilotConfig) -> ControlResult<Autopilot> {
    Ok(Autopilot::new(
        build_lateral(&config.lateral)?,
        build_longitudinal(&config.longitudinal)?,
    ))
}

pub fn build_plant(def: &PlantDef) -> RigidBodyAircraft {
    RigidBodyAircraft::new(def.params.clone(), def.initial)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::LimitsDef;
    use fl_core::Block;

    #[test]
    fn lateral_defaults_match_law_defaults() {
        let built = build_lateral(&LateralDef::default()).unwrap();
        assert_eq!(built, LateralControl::new());
    }

    #[test]
    fn longitudinal_defaults_match_law_defaults() {
        let built = build_longitudinal(&LongitudinalDef::default()).unwrap();
        assert_eq!(built, LongitudinalControl::new());
    }

    #[test]
    fn lateral_settings_applied() {
        let mut def = LateralDef::default();
        def.gains.k_roll_aileron = 0.7;
        def.loops.rudder = false;
        def.aileron_saturation = Some(LimitsDef { min: -0.3, max: 0.3 });
        def.roll_integrator = LimitsDef::symmetric(0.5);

        let law = build_lateral(&def).unwrap();
        assert_eq!(law.gains().k_roll_aileron, 0.7);
        assert!(!law.loops().rudder);
        assert_eq!(law.aileron_saturation().limits(), (-0.3, 0.3));
        assert_eq!(law.roll_integrator().limits(), (-0.5, 0.5));
    }

    #[test]
    fn pid_limits_applied() {
        let mut def = LongitudinalDef::default();
        def.pitch_rate = PidDef {
            p: 1.0,
            i: 0.5,
            d: 0.1,
            integrator: LimitsDef::symmetric(2.0),
            derivative: LimitsDef::symmetric(3.0),
        };
        let law = build_longitudinal(&def).unwrap();
        let pid = law.pitch_rate_pid();
        assert_eq!(pid.gains(), PidGains::new(1.0, 0.5, 0.1));
        assert_eq!(pid.integrator().limits(), (-2.0, 2.0));
        assert_eq!(pid.derivative().limits(), (-3.0, 3.0));
        assert_eq!(pid.output(), 0.0);
    }

    #[test]
    fn inverted_limits_surface_control_error() {
        let mut def = LongitudinalDef::default();
        def.pitch_saturation = Some(LimitsDef { min: 1.0, max: 0.0 });
        let err = build_longitudinal(&def).unwrap_err();
        assert!(err.is_configuration());
    }
}
