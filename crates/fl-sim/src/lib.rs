//! Closed-loop harness for the flight control laws.
//!
//! Provides:
//! - A toy rigid-body aircraft plant with decoupled lateral and longitudinal axes
//! - Fixed-step RK4 and forward Euler plant integrators
//! - An autopilot wrapper holding both laws behind shared locks
//! - A fixed-rate simulation runner that records states and commands

pub mod autopilot;
pub mod error;
pub mod integrator;
pub mod model;
pub mod sim;

pub use autopilot::{Autopilot, Reference};
pub use error::{SimError, SimResult};
pub use integrator::{ForwardEuler, PlantIntegrator, Rk4};
pub use model::{Actuated, AircraftParams, AircraftState, Commands, PlantModel, RigidBodyAircraft};
pub use sim::{IntegratorType, SimOptions, SimRecord, run_sim};
