//! Rest-day roster optimization.
//!
//! Decides, for every employee and every day of a planning horizon, whether
//! the employee works or rests. Each employee's rest-day quota, requested
//! days off and unavailable days are honored exactly; everything else
//! (staffing levels, run lengths, fairness) is a weighted soft rule.
//!
//! - **Model** ([`model`]): cell codes, the employees × days [`Schedule`],
//!   employee records and the immutable [`PlanningInput`].
//! - **Constraints** ([`constraints`]): declarative templates compiled once
//!   into penalty functions; 19 built-in rules, extensible by registering
//!   custom [`ConstraintTemplate`]s.
//! - **Evaluation** ([`evaluation`]): `score = -Σ penalties`, pure.
//! - **GA** ([`ga`]): elitist pairwise breeding with uniform crossover, flip
//!   mutation and quota repair.
//! - **Validation** ([`validation`]): compliance report for a finished or
//!   hand-edited schedule.
//!
//! # Example
//!
//! ```
//! use u_shift::constraints::ConstraintSet;
//! use u_shift::ga::GaConfig;
//! use u_shift::model::{EmployeeInfo, PlanningInput};
//!
//! let employees = vec![
//!     EmployeeInfo::new(0, "Ana", 2).with_requested_off(vec![3]),
//!     EmployeeInfo::new(1, "Ben", 2),
//!     EmployeeInfo::new(2, "Cy", 2),
//! ];
//! let base = PlanningInput::base_from_employees(&employees, 7);
//! let input = PlanningInput::new(employees, base, vec![2; 7]).unwrap();
//!
//! let result = u_shift::optimize(
//!     &input,
//!     &ConstraintSet::default_set(),
//!     &GaConfig::fast().with_seed(1),
//! )
//! .unwrap();
//! assert_eq!(result.best.get(0, 2), u_shift::model::Cell::Requested);
//! ```
//!
//! # Features
//!
//! - `parallel`: score each generation's children with rayon when
//!   [`GaConfig::parallel`](ga::GaConfig::parallel) is set.

pub mod constraints;
pub mod error;
pub mod evaluation;
pub mod ga;
pub mod model;
pub mod validation;

pub use constraints::{ConstraintRegistry, ConstraintSet, ConstraintTemplate};
pub use error::ShiftError;
pub use model::{PlanningInput, Schedule};

/// Compiles `set` against the built-in templates and runs the GA.
///
/// # Errors
/// Any compilation error from [`ConstraintRegistry::compile_set`] or
/// configuration error from [`ga::ShiftRunner::run`].
pub fn optimize(
    input: &PlanningInput,
    set: &ConstraintSet,
    config: &ga::GaConfig,
) -> Result<ga::ShiftResult, ShiftError> {
    let constraints = ConstraintRegistry::with_builtins().compile_set(set)?;
    ga::ShiftRunner::run(input, &constraints, config)
}
