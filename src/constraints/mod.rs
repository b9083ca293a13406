//! Declarative constraint templates.
//!
//! A rule is configured as a [`ConstraintConfig`] (template id, enabled flag,
//! parameter overrides) and compiled by the [`ConstraintRegistry`] into a
//! [`CompiledConstraint`] holding a penalty function. Penalty functions read
//! a [`ScheduleContext`] and return a [`PenaltyResult`]; negative penalties
//! are bonuses.
//!
//! # Built-in families
//!
//! - [`Category::Day`]: headcount per day (`required_workers_match`,
//!   `min_workers_on_date`, `max_workers_on_date`, `min_skilled_workers`,
//!   `section_min_workers`, `closed_day`)
//! - [`Category::Employee`]: per-row limits (`max_consecutive_work`,
//!   `weekend_rest`, `min_days_off_per_week`, `rest_after_consecutive_work`,
//!   `substitute_coverage`, `vacation_days_limit`, `unavailable_day_hard`)
//! - [`Category::Pattern`]: run shapes (`avoid_long_consecutive_work`,
//!   `no_isolated_holidays`, `no_isolated_workdays`,
//!   `consecutive_holiday_bonus`)
//! - [`Category::Fairness`]: spread across employees
//!   (`equal_weekend_distribution`, `equal_holiday_distribution`)
//!
//! Custom templates implement [`ConstraintTemplate`] and are added with
//! [`ConstraintRegistry::register`].

mod context;
pub mod day;
pub mod employee;
pub mod fairness;
mod params;
pub mod pattern;
mod registry;
mod types;

pub use context::ScheduleContext;
pub use params::{parse_day_list, parse_tag_list, Params};
pub use registry::ConstraintRegistry;
pub use types::{
    Category, CompiledConstraint, ConstraintConfig, ConstraintSet, ConstraintTemplate, ParamType,
    ParamValue, ParameterDef, PenaltyFn, PenaltyResult, TemplateInfo,
};
