//! Work/rest run pattern rules.

use super::context::ScheduleContext;
use super::params::Params;
use super::types::{Category, ConstraintTemplate, ParameterDef, PenaltyFn, PenaltyResult};
use crate::error::ShiftError;
use crate::model::Cell;

/// Growing penalty on long work runs.
///
/// A run of `len >= threshold` days has `excess = len - threshold + 1` and
/// costs `excess² × weight` (quadratic) or `excess × weight` (linear).
pub struct AvoidLongConsecutiveWork;

impl ConstraintTemplate for AvoidLongConsecutiveWork {
    fn id(&self) -> &'static str {
        "avoid_long_consecutive_work"
    }

    fn display_name(&self) -> &'static str {
        "Long work run suppression"
    }

    fn category(&self) -> Category {
        Category::Pattern
    }

    fn description(&self) -> &'static str {
        "Penalizes work runs at or above the threshold, growing with run length."
    }

    fn parameters(&self) -> Vec<ParameterDef> {
        vec![
            ParameterDef::int("threshold", "Run length threshold", 5)
                .range(3.0, 10.0)
                .describe("Runs of this many work days or more are penalized"),
            ParameterDef::float("penalty_weight", "Penalty weight", 1.0).range(0.1, 100.0),
            ParameterDef::choice("shape", "Penalty shape", "quadratic", &["quadratic", "linear"]),
        ]
    }

    fn compile(&self, params: &Params) -> Result<PenaltyFn, ShiftError> {
        let threshold = params.count("threshold")?;
        let weight = params.float("penalty_weight")?;
        let quadratic = params.text("shape")? == "quadratic";

        Ok(Box::new(move |ctx: &ScheduleContext<'_>| {
            let mut total = 0.0;
            let mut details = Vec::new();
            for emp in 0..ctx.employee_count() {
                for (_, len) in ctx.runs(emp, Cell::Work) {
                    if len < threshold {
                        continue;
                    }
                    let excess = (len + 1 - threshold) as f64;
                    let p = if quadratic { excess * excess } else { excess } * weight;
                    total += p;
                    details.push(format!(
                        "{}: {len} consecutive work days (penalty={p:.1})",
                        ctx.employee_name(emp)
                    ));
                }
            }
            PenaltyResult::new(total, details)
        }))
    }
}

/// Counts `outer, inner, outer` islands in an employee's binary row.
fn islands(ctx: &ScheduleContext<'_>, emp: usize, inner: Cell, outer: Cell) -> usize {
    ctx.binary_row(emp)
        .windows(3)
        .filter(|w| w[0] == outer && w[1] == inner && w[2] == outer)
        .count()
}

/// A single rest day wedged between work days.
pub struct NoIsolatedHolidays;

impl ConstraintTemplate for NoIsolatedHolidays {
    fn id(&self) -> &'static str {
        "no_isolated_holidays"
    }

    fn display_name(&self) -> &'static str {
        "Isolated rest days"
    }

    fn category(&self) -> Category {
        Category::Pattern
    }

    fn description(&self) -> &'static str {
        "Penalizes single rest days with work on both sides."
    }

    fn parameters(&self) -> Vec<ParameterDef> {
        vec![ParameterDef::float("penalty_weight", "Penalty per occurrence", 10.0)
            .range(0.1, 100.0)]
    }

    fn compile(&self, params: &Params) -> Result<PenaltyFn, ShiftError> {
        let weight = params.float("penalty_weight")?;

        Ok(Box::new(move |ctx: &ScheduleContext<'_>| {
            let mut total = 0.0;
            let mut details = Vec::new();
            for emp in 0..ctx.employee_count() {
                let count = islands(ctx, emp, Cell::Rest, Cell::Work);
                if count > 0 {
                    let p = count as f64 * weight;
                    total += p;
                    details.push(format!(
                        "{}: {count} isolated rest days (penalty={p:.1})",
                        ctx.employee_name(emp)
                    ));
                }
            }
            PenaltyResult::new(total, details)
        }))
    }
}

/// A single work day wedged between rest days.
pub struct NoIsolatedWorkdays;

impl ConstraintTemplate for NoIsolatedWorkdays {
    fn id(&self) -> &'static str {
        "no_isolated_workdays"
    }

    fn display_name(&self) -> &'static str {
        "Isolated work days"
    }

    fn category(&self) -> Category {
        Category::Pattern
    }

    fn description(&self) -> &'static str {
        "Penalizes single work days with rest on both sides (stepping-stone holidays)."
    }

    fn parameters(&self) -> Vec<ParameterDef> {
        vec![ParameterDef::float("penalty_weight", "Penalty per occurrence", 5.0)
            .range(0.1, 100.0)]
    }

    fn compile(&self, params: &Params) -> Result<PenaltyFn, ShiftError> {
        let weight = params.float("penalty_weight")?;

        Ok(Box::new(move |ctx: &ScheduleContext<'_>| {
            let mut total = 0.0;
            let mut details = Vec::new();
            for emp in 0..ctx.employee_count() {
                let count = islands(ctx, emp, Cell::Work, Cell::Rest);
                if count > 0 {
                    let p = count as f64 * weight;
                    total += p;
                    details.push(format!(
                        "{}: {count} isolated work days (penalty={p:.1})",
                        ctx.employee_name(emp)
                    ));
                }
            }
            PenaltyResult::new(total, details)
        }))
    }
}

/// Reward for long rest runs.
pub struct ConsecutiveHolidayBonus;

impl ConstraintTemplate for ConsecutiveHolidayBonus {
    fn id(&self) -> &'static str {
        "consecutive_holiday_bonus"
    }

    fn display_name(&self) -> &'static str {
        "Consecutive rest bonus"
    }

    fn category(&self) -> Category {
        Category::Pattern
    }

    fn description(&self) -> &'static str {
        "Rewards rest runs at or above the threshold with a negative penalty per day."
    }

    fn parameters(&self) -> Vec<ParameterDef> {
        vec![
            ParameterDef::int("threshold", "Minimum run length", 2).range(2.0, 7.0),
            ParameterDef::float("bonus_per_day", "Bonus per day", 2.0)
                .range(0.1, 50.0)
                .describe("Run length × this value is subtracted"),
        ]
    }

    fn compile(&self, params: &Params) -> Result<PenaltyFn, ShiftError> {
        let threshold = params.count("threshold")?;
        let bonus = params.float("bonus_per_day")?;

        Ok(Box::new(move |ctx: &ScheduleContext<'_>| {
            let mut total = 0.0;
            let mut runs = 0;
            for emp in 0..ctx.employee_count() {
                for (_, len) in ctx.runs(emp, Cell::Rest) {
                    if len >= threshold {
                        total += len as f64 * bonus;
                        runs += 1;
                    }
                }
            }
            let details = if runs > 0 {
                vec![format!("{runs} rest runs of {threshold}+ days (bonus={total:.1})")]
            } else {
                Vec::new()
            };
            PenaltyResult::new(-total, details)
        }))
    }
}
