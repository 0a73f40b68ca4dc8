//! Engagement core for the interceptor simulator.
//!
//! Owns the kill-chain state machine, sensor and guidance models, and the
//! fixed-timestep engine that drives them. Every stochastic call draws from
//! a single seeded generator owned by the engine, so a run is fully
//! reproducible from its seed.

pub mod engagement;
pub mod engine;
pub mod entity;
pub mod error;
pub mod guidance;
pub mod models;
pub mod monte_carlo;
pub mod scenario;
pub mod sensor;
pub mod tracking;

pub use engagement::{EngagementManager, EngagementParams};
pub use engine::{SimConfig, SimulationEngine};
pub use error::ScenarioError;
pub use scenario::ScenarioConfig;

#[cfg(test)]
mod tests;
