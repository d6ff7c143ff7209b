//! Simulated Annealing (SA).
//!
//! A single-solution trajectory metaheuristic inspired by the physical
//! annealing process. Accepts worsening moves with a probability that
//! decreases over time (temperature), allowing the search to escape
//! local optima. Moves that break a hard constraint are never accepted.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Cerny (1985), "Thermodynamical Approach to the Travelling Salesman Problem"

mod config;
mod runner;
mod types;

pub use config::{
    SaConfig, DEFAULT_COOLING_FACTOR, DEFAULT_FROZEN_TEMPERATURE, TEMPERATURE_PER_ELEMENT,
};
pub use runner::{metropolis_accept, Annealer, SaEvent, SaResult, SaRunner};
pub use types::SaProblem;
