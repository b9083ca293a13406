//! Fairness rules: spread of per-employee aggregates across the roster.

use super::context::ScheduleContext;
use super::params::Params;
use super::types::{Category, ConstraintTemplate, ParameterDef, PenaltyFn, PenaltyResult};
use crate::error::ShiftError;

/// Population standard deviation.
fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n).sqrt()
}

/// Weekend rest should be spread evenly across employees.
pub struct EqualWeekendDistribution;

impl ConstraintTemplate for EqualWeekendDistribution {
    fn id(&self) -> &'static str {
        "equal_weekend_distribution"
    }

    fn display_name(&self) -> &'static str {
        "Fair weekend rest"
    }

    fn category(&self) -> Category {
        Category::Fairness
    }

    fn description(&self) -> &'static str {
        "Penalizes a spread of weekend days off between employees above the tolerance."
    }

    fn parameters(&self) -> Vec<ParameterDef> {
        vec![
            ParameterDef::int("max_diff", "Allowed spread", 2)
                .range(0.0, 10.0)
                .describe("Largest tolerated spread of weekend days off"),
            ParameterDef::float("penalty_per_excess", "Penalty per excess day", 3.0)
                .range(0.1, 50.0),
            ParameterDef::choice("spread", "Spread measure", "range", &["range", "stddev"])
                .describe("max − min, or standard deviation"),
        ]
    }

    fn compile(&self, params: &Params) -> Result<PenaltyFn, ShiftError> {
        let max_diff = params.count("max_diff")? as f64;
        let weight = params.float("penalty_per_excess")?;
        let use_range = params.text("spread")? == "range";

        Ok(Box::new(move |ctx: &ScheduleContext<'_>| {
            let weekend = ctx.input().weekend_days();
            if weekend.is_empty() || ctx.employee_count() == 0 {
                return PenaltyResult::default();
            }
            let offs: Vec<f64> = (0..ctx.employee_count())
                .map(|emp| weekend.iter().filter(|&&d| ctx.is_resting(emp, d)).count() as f64)
                .collect();
            let spread = if use_range {
                let max = offs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                let min = offs.iter().copied().fold(f64::INFINITY, f64::min);
                max - min
            } else {
                std_dev(&offs)
            };
            if spread > max_diff {
                PenaltyResult::new(
                    (spread - max_diff) * weight,
                    vec![format!("weekend days off spread {spread:.2} (allowed {max_diff})")],
                )
            } else {
                PenaltyResult::default()
            }
        }))
    }
}

/// Each employee's rest should not cluster on particular weekdays.
pub struct EqualHolidayDistribution;

impl ConstraintTemplate for EqualHolidayDistribution {
    fn id(&self) -> &'static str {
        "equal_holiday_distribution"
    }

    fn display_name(&self) -> &'static str {
        "Weekday rest balance"
    }

    fn category(&self) -> Category {
        Category::Fairness
    }

    fn description(&self) -> &'static str {
        "Penalizes the standard deviation of each employee's rest days per weekday."
    }

    fn parameters(&self) -> Vec<ParameterDef> {
        vec![ParameterDef::float("penalty_weight", "Penalty weight", 1.0)
            .range(0.1, 50.0)
            .describe("Multiplies the per-weekday standard deviation")]
    }

    fn compile(&self, params: &Params) -> Result<PenaltyFn, ShiftError> {
        let weight = params.float("penalty_weight")?;

        Ok(Box::new(move |ctx: &ScheduleContext<'_>| {
            let weekdays = ctx.input().weekdays();
            if weekdays.iter().all(Option::is_none) {
                return PenaltyResult::default();
            }
            let mut total = 0.0;
            let mut details = Vec::new();
            for emp in 0..ctx.employee_count() {
                let mut counts = [0.0f64; 7];
                for (day, weekday) in weekdays.iter().enumerate() {
                    if let Some(w) = weekday {
                        if ctx.is_resting(emp, day) {
                            counts[w.index()] += 1.0;
                        }
                    }
                }
                if counts.iter().sum::<f64>() > 0.0 {
                    let sd = std_dev(&counts);
                    total += sd * weight;
                    if sd > 0.0 {
                        details.push(format!(
                            "{}: weekday std-dev {sd:.2}",
                            ctx.employee_name(emp)
                        ));
                    }
                }
            }
            PenaltyResult::new(total, details)
        }))
    }
}
