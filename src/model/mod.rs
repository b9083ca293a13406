//! Schedule model.
//!
//! - [`Cell`]: the four cell codes and their mutability rules
//! - [`Schedule`]: the employees × days matrix
//! - [`EmployeeInfo`]: per-employee quota, fixed days and tags
//! - [`PlanningInput`]: the immutable bundle borrowed by a run
//!
//! Invariants the rest of the crate relies on:
//!
//! - Cells holding [`Cell::Requested`] or [`Cell::Unavailable`] are never
//!   written by a genetic operator.
//! - After repair, every employee's non-work count equals their quota
//!   whenever enough free cells exist.

mod cell;
mod employee;
mod input;
mod schedule;

#[cfg(test)]
pub(crate) mod fixtures;

pub use cell::Cell;
pub use employee::{EmployeeInfo, EmploymentType};
pub use input::{PlanningInput, SectionDemand, Weekday};
pub use schedule::Schedule;
