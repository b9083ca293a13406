//! Per-employee rules: run limits, weekly rest, coverage pairs, leave
//! budgets and the fixed-cell safety net.

use super::context::ScheduleContext;
use super::params::Params;
use super::types::{Category, ConstraintTemplate, ParameterDef, PenaltyFn, PenaltyResult};
use crate::error::ShiftError;
use crate::model::Cell;

/// Linear penalty on work runs longer than `max_days`.
pub struct MaxConsecutiveWork;

impl ConstraintTemplate for MaxConsecutiveWork {
    fn id(&self) -> &'static str {
        "max_consecutive_work"
    }

    fn display_name(&self) -> &'static str {
        "Consecutive work limit"
    }

    fn category(&self) -> Category {
        Category::Employee
    }

    fn description(&self) -> &'static str {
        "Penalizes every day of a work run beyond the limit."
    }

    fn parameters(&self) -> Vec<ParameterDef> {
        vec![
            ParameterDef::int("max_days", "Maximum consecutive work days", 6).range(1.0, 14.0),
            ParameterDef::float("penalty_per_day", "Penalty per excess day", 10.0)
                .range(0.1, 100.0),
        ]
    }

    fn compile(&self, params: &Params) -> Result<PenaltyFn, ShiftError> {
        let max_days = params.count("max_days")?;
        let weight = params.float("penalty_per_day")?;

        Ok(Box::new(move |ctx: &ScheduleContext<'_>| {
            let mut total = 0.0;
            let mut details = Vec::new();
            for emp in 0..ctx.employee_count() {
                for (start, len) in ctx.runs(emp, Cell::Work) {
                    if len > max_days {
                        total += (len - max_days) as f64 * weight;
                        details.push(format!(
                            "{}: {len} consecutive work days from day {} (limit {max_days})",
                            ctx.employee_name(emp),
                            start + 1
                        ));
                    }
                }
            }
            PenaltyResult::new(total, details)
        }))
    }
}

/// Minimum number of rested Saturdays/Sundays per employee.
pub struct WeekendRest;

impl ConstraintTemplate for WeekendRest {
    fn id(&self) -> &'static str {
        "weekend_rest"
    }

    fn display_name(&self) -> &'static str {
        "Weekend rest"
    }

    fn category(&self) -> Category {
        Category::Employee
    }

    fn description(&self) -> &'static str {
        "Guarantees each employee a minimum number of weekend days off."
    }

    fn parameters(&self) -> Vec<ParameterDef> {
        vec![
            ParameterDef::int("min_weekend_offs", "Minimum weekend days off", 2)
                .range(0.0, 10.0)
                .describe("Saturdays and Sundays off per month"),
            ParameterDef::float("penalty_per_missing", "Penalty per missing day", 5.0)
                .range(0.1, 100.0),
        ]
    }

    fn compile(&self, params: &Params) -> Result<PenaltyFn, ShiftError> {
        let min_offs = params.count("min_weekend_offs")?;
        let weight = params.float("penalty_per_missing")?;

        Ok(Box::new(move |ctx: &ScheduleContext<'_>| {
            let weekend = ctx.input().weekend_days();
            if weekend.is_empty() {
                return PenaltyResult::default();
            }
            let mut total = 0.0;
            let mut details = Vec::new();
            for emp in 0..ctx.employee_count() {
                let offs = weekend.iter().filter(|&&d| ctx.is_resting(emp, d)).count();
                if offs < min_offs {
                    total += (min_offs - offs) as f64 * weight;
                    details.push(format!(
                        "{}: {offs} weekend days off (minimum {min_offs})",
                        ctx.employee_name(emp)
                    ));
                }
            }
            PenaltyResult::new(total, details)
        }))
    }
}

/// Minimum days off in every 7-day sliding window.
pub struct MinDaysOffPerWeek;

impl ConstraintTemplate for MinDaysOffPerWeek {
    fn id(&self) -> &'static str {
        "min_days_off_per_week"
    }

    fn display_name(&self) -> &'static str {
        "Weekly days off"
    }

    fn category(&self) -> Category {
        Category::Employee
    }

    fn description(&self) -> &'static str {
        "Requires a minimum number of non-working days in every 7-day window."
    }

    fn parameters(&self) -> Vec<ParameterDef> {
        vec![
            ParameterDef::int("min_off", "Minimum days off per week", 1).range(1.0, 4.0),
            ParameterDef::float("penalty_per_missing", "Penalty per missing day", 8.0)
                .range(0.1, 100.0),
        ]
    }

    fn compile(&self, params: &Params) -> Result<PenaltyFn, ShiftError> {
        let min_off = params.count("min_off")?;
        let weight = params.float("penalty_per_missing")?;

        Ok(Box::new(move |ctx: &ScheduleContext<'_>| {
            let mut total = 0.0;
            let mut details = Vec::new();
            if ctx.days() < 7 {
                return PenaltyResult::default();
            }
            for emp in 0..ctx.employee_count() {
                for start in 0..=ctx.days() - 7 {
                    let off = (start..start + 7)
                        .filter(|&d| !ctx.is_working(emp, d))
                        .count();
                    if off < min_off {
                        total += (min_off - off) as f64 * weight;
                        details.push(format!(
                            "{}: {off} days off in days {}-{}",
                            ctx.employee_name(emp),
                            start + 1,
                            start + 7
                        ));
                    }
                }
            }
            PenaltyResult::new(total, details)
        }))
    }
}

/// A rest day must follow a work run of the threshold length.
pub struct RestAfterConsecutiveWork;

impl ConstraintTemplate for RestAfterConsecutiveWork {
    fn id(&self) -> &'static str {
        "rest_after_consecutive_work"
    }

    fn display_name(&self) -> &'static str {
        "Rest after consecutive work"
    }

    fn category(&self) -> Category {
        Category::Employee
    }

    fn description(&self) -> &'static str {
        "Penalizes working again the day after a run of the threshold length."
    }

    fn parameters(&self) -> Vec<ParameterDef> {
        vec![
            ParameterDef::int("consecutive_threshold", "Run length", 5).range(2.0, 10.0),
            ParameterDef::float("penalty_weight", "Penalty weight", 8.0).range(0.1, 100.0),
        ]
    }

    fn compile(&self, params: &Params) -> Result<PenaltyFn, ShiftError> {
        let threshold = params.count("consecutive_threshold")?;
        let weight = params.float("penalty_weight")?;

        Ok(Box::new(move |ctx: &ScheduleContext<'_>| {
            let mut total = 0.0;
            let mut details = Vec::new();
            for emp in 0..ctx.employee_count() {
                // The day after the threshold is reached is work iff the run is longer.
                for (start, len) in ctx.runs(emp, Cell::Work) {
                    if len > threshold {
                        total += weight;
                        details.push(format!(
                            "{}: no rest on day {} after {threshold} work days",
                            ctx.employee_name(emp),
                            start + threshold + 1
                        ));
                    }
                }
            }
            PenaltyResult::new(total, details)
        }))
    }
}

/// When the primary employee is absent, the substitute must be present.
pub struct SubstituteCoverage;

impl ConstraintTemplate for SubstituteCoverage {
    fn id(&self) -> &'static str {
        "substitute_coverage"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["substitute_constraint"]
    }

    fn display_name(&self) -> &'static str {
        "Substitute coverage"
    }

    fn category(&self) -> Category {
        Category::Employee
    }

    fn description(&self) -> &'static str {
        "Penalizes days on which both the primary employee and their substitute are absent."
    }

    fn parameters(&self) -> Vec<ParameterDef> {
        vec![
            ParameterDef::text("primary_name", "Primary employee", "")
                .describe("Name of the employee who needs cover"),
            ParameterDef::text("substitute_name", "Substitute employee", "")
                .describe("Name of the employee who covers"),
            ParameterDef::float("penalty_weight", "Penalty per uncovered day", 40.0)
                .range(1.0, 200.0),
        ]
    }

    fn compile(&self, params: &Params) -> Result<PenaltyFn, ShiftError> {
        let primary = params.text("primary_name")?.to_owned();
        let substitute = params.text("substitute_name")?.to_owned();
        let weight = params.float("penalty_weight")?;

        Ok(Box::new(move |ctx: &ScheduleContext<'_>| {
            let row_of = |name: &str| ctx.employees().iter().position(|e| e.name == name);
            let (Some(p), Some(s)) = (row_of(&primary), row_of(&substitute)) else {
                return PenaltyResult::note(format!(
                    "coverage pair {primary:?}/{substitute:?} not on the roster"
                ));
            };
            let mut total = 0.0;
            let mut details = Vec::new();
            for day in 0..ctx.days() {
                if !ctx.is_working(p, day) && !ctx.is_working(s, day) {
                    total += weight;
                    details.push(format!(
                        "day {}: {primary} absent and {substitute} also off",
                        day + 1
                    ));
                }
            }
            PenaltyResult::new(total, details)
        }))
    }
}

/// Requested days off may not exceed the employee's leave budget.
pub struct VacationDaysLimit;

impl ConstraintTemplate for VacationDaysLimit {
    fn id(&self) -> &'static str {
        "vacation_days_limit"
    }

    fn display_name(&self) -> &'static str {
        "Leave budget"
    }

    fn category(&self) -> Category {
        Category::Employee
    }

    fn description(&self) -> &'static str {
        "Flags requested days off beyond the available paid-leave days."
    }

    fn parameters(&self) -> Vec<ParameterDef> {
        vec![ParameterDef::float("penalty_per_excess", "Penalty per excess day", 20.0)
            .range(1.0, 100.0)]
    }

    fn compile(&self, params: &Params) -> Result<PenaltyFn, ShiftError> {
        let weight = params.float("penalty_per_excess")?;

        Ok(Box::new(move |ctx: &ScheduleContext<'_>| {
            let mut total = 0.0;
            let mut details = Vec::new();
            for (row, emp) in ctx.employees().iter().enumerate() {
                if emp.leave_budget == 0 {
                    continue;
                }
                let requested = ctx
                    .schedule()
                    .row(row)
                    .iter()
                    .filter(|&&c| c == Cell::Requested)
                    .count();
                if requested > emp.leave_budget {
                    total += (requested - emp.leave_budget) as f64 * weight;
                    details.push(format!(
                        "{}: {requested} requested days off (leave budget {})",
                        emp.name, emp.leave_budget
                    ));
                }
            }
            PenaltyResult::new(total, details)
        }))
    }
}

/// Safety net: a fixed cell overwritten to work.
///
/// Genetic operators never write fixed cells, so this only fires for
/// hand-edited schedules or operator bugs.
pub struct UnavailableDayHard;

impl ConstraintTemplate for UnavailableDayHard {
    fn id(&self) -> &'static str {
        "unavailable_day_hard"
    }

    fn display_name(&self) -> &'static str {
        "Fixed day protection"
    }

    fn category(&self) -> Category {
        Category::Employee
    }

    fn description(&self) -> &'static str {
        "Applies a very large penalty when an unavailable (or requested) day is scheduled as work."
    }

    fn parameters(&self) -> Vec<ParameterDef> {
        vec![
            ParameterDef::float("penalty_per_violation", "Penalty per violation", 1000.0)
                .range(100.0, 10000.0),
            ParameterDef::bool("protect_requested", "Also protect requested days off", true),
        ]
    }

    fn compile(&self, params: &Params) -> Result<PenaltyFn, ShiftError> {
        let weight = params.float("penalty_per_violation")?;
        let protect_requested = params.bool("protect_requested")?;

        Ok(Box::new(move |ctx: &ScheduleContext<'_>| {
            let base = ctx.input().base();
            let mut total = 0.0;
            let mut details = Vec::new();
            for emp in 0..ctx.employee_count() {
                for day in 0..ctx.days() {
                    let protected = match base.get(emp, day) {
                        Cell::Unavailable => true,
                        Cell::Requested => protect_requested,
                        _ => false,
                    };
                    if protected && ctx.schedule().get(emp, day) == Cell::Work {
                        total += weight;
                        details.push(format!(
                            "{}: scheduled to work on fixed day {}",
                            ctx.employee_name(emp),
                            day + 1
                        ));
                    }
                }
            }
            PenaltyResult::new(total, details)
        }))
    }
}
