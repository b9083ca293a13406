//! Genetic algorithm over rest-day schedules.
//!
//! Individuals are whole schedules. Every generation keeps the top
//! `elite_count` individuals, breeds every unordered pair of them with
//! uniform crossover, mutates and repairs the children, and scores them
//! with the compiled constraints. The best-ever individual is carried
//! separately and re-enters the parent pool whenever it beats the current
//! generation.
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population, elites, rates, presets)
//! - [`ShiftRunner`]: Executes the evolutionary loop
//! - [`ShiftResult`]: Best schedule, score history and quota report
//!
//! # Submodules
//!
//! - [`operators`]: Seeding, quota repair, uniform crossover and flip mutation
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Syswerda (1989), "Uniform Crossover in Genetic Algorithms"

mod config;
pub mod operators;
mod runner;
mod types;

pub use config::GaConfig;
pub use operators::{QuotaStatus, RepairReport};
pub use runner::{ShiftResult, ShiftRunner};
pub use types::{ElitePool, GenerationStats, Individual};
