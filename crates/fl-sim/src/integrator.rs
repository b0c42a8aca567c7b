//! Fixed-step plant integrators.

use crate::error::SimResult;
use crate::model::PlantModel;

/// Advances a plant by one fixed step.
pub trait PlantIntegrator {
    fn step<M: PlantModel>(
        &self,
        model: &mut M,
        t: f64,
        x: &M::State,
        dt: f64,
    ) -> SimResult<M::State>;
}

/// Classical fourth-order Runge-Kutta.
#[derive(Clone, Copy, Debug, Default)]
pub struct Rk4;

impl PlantIntegrator for Rk4 {
    fn step<M: PlantModel>(
        &self,
        model: &mut M,
        t: f64,
        x: &M::State,
        dt: f64,
    ) -> SimResult<M::State> {
        let k1 = model.rhs(t, x)?;

        let x2 = model.add(x, &model.scale(&k1, 0.5 * dt));
        let k2 = model.rhs(t + 0.5 * dt, &x2)?;

        let x3 = model.add(x, &model.scale(&k2, 0.5 * dt));
        let k3 = model.rhs(t + 0.5 * dt, &x3)?;

        let x4 = model.add(x, &model.scale(&k3, dt));
        let k4 = model.rhs(t + dt, &x4)?;

        // x + dt/6 * (k1 + 2 k2 + 2 k3 + k4)
        let k_sum = model.add(
            &model.add(&k1, &model.scale(&k2, 2.0)),
            &model.add(&model.scale(&k3, 2.0), &k4),
        );

        Ok(model.add(x, &model.scale(&k_sum, dt / 6.0)))
    }
}

/// Explicit first-order Euler. One rhs evaluation per step.
#[derive(Clone, Copy, Debug, Default)]
pub struct ForwardEuler;

impl PlantIntegrator for ForwardEuler {
    fn step<M: PlantModel>(
        &self,
        model: &mut M,
        t: f64,
        x: &M::State,
        dt: f64,
    ) -> SimResult<M::State> {
        let xdot = model.rhs(t, x)?;
        Ok(model.add(x, &model.scale(&xdot, dt)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// x' = -x, x(0) = 1.
    struct Decay;

    impl PlantModel for Decay {
        type State = f64;

        fn initial_state(&self) -> f64 {
            1.0
        }

        fn rhs(&mut self, _t: f64, x: &f64) -> SimResult<f64> {
            Ok(-x)
        }

        fn add(&self, a: &f64, b: &f64) -> f64 {
            a + b
        }

        fn scale(&self, a: &f64, scale: f64) -> f64 {
            a * scale
        }
    }

    fn integrate(integrator: impl PlantIntegrator, dt: f64, steps: usize) -> f64 {
        let mut model = Decay;
        let mut x = model.initial_state();
        for n in 0..steps {
            x = integrator.step(&mut model, n as f64 * dt, &x, dt).unwrap();
        }
        x
    }

    #[test]
    fn forward_euler_single_step() {
        assert_relative_eq!(integrate(ForwardEuler, 0.1, 1), 0.9);
    }

    #[test]
    fn rk4_matches_exponential() {
        let x = integrate(Rk4, 0.1, 10);
        assert_relative_eq!(x, (-1.0_f64).exp(), epsilon = 1e-6);
    }

    #[test]
    fn rk4_is_more_accurate_than_euler() {
        let exact = (-1.0_f64).exp();
        let rk4_err = (integrate(Rk4, 0.1, 10) - exact).abs();
        let euler_err = (integrate(ForwardEuler, 0.1, 10) - exact).abs();
        assert!(rk4_err < euler_err);
    }
}
