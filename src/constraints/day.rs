//! Per-day headcount rules.

use super::context::ScheduleContext;
use super::params::{parse_day_list, parse_tag_list, Params};
use super::types::{Category, ConstraintTemplate, ParameterDef, PenaltyFn, PenaltyResult};
use crate::error::ShiftError;
use crate::model::Weekday;

/// Daily headcount should equal the required curve.
///
/// With `section` set, only employees carrying that tag are counted and
/// compared against the input's demand curve for the section.
pub struct RequiredWorkersMatch;

impl ConstraintTemplate for RequiredWorkersMatch {
    fn id(&self) -> &'static str {
        "required_workers_match"
    }

    fn display_name(&self) -> &'static str {
        "Required headcount"
    }

    fn category(&self) -> Category {
        Category::Day
    }

    fn description(&self) -> &'static str {
        "Penalizes each worker of difference between the daily headcount and the requirement."
    }

    fn parameters(&self) -> Vec<ParameterDef> {
        vec![
            ParameterDef::float("penalty_per_diff", "Penalty per worker of difference", 4.0)
                .range(0.1, 100.0),
            ParameterDef::text("section", "Section", "")
                .describe("Restrict to one section tag; empty means the whole roster"),
        ]
    }

    fn compile(&self, params: &Params) -> Result<PenaltyFn, ShiftError> {
        let weight = params.float("penalty_per_diff")?;
        let section = params.text("section")?.trim().to_owned();

        Ok(Box::new(move |ctx: &ScheduleContext<'_>| {
            let required = if section.is_empty() {
                ctx.input().required_workers()
            } else {
                match ctx.input().section_demand(&section) {
                    Some(curve) => curve,
                    None => {
                        return PenaltyResult::note(format!(
                            "no demand curve for section {section:?}"
                        ))
                    }
                }
            };
            let mut total = 0.0;
            let mut details = Vec::new();
            for (day, &need) in required.iter().enumerate() {
                let workers = if section.is_empty() {
                    ctx.workers_on(day)
                } else {
                    ctx.workers_where(day, |e| e.has_tag(&section))
                };
                let diff = workers.abs_diff(need);
                if diff > 0 {
                    total += diff as f64 * weight;
                    details.push(format!("day {}: {workers} working (need {need})", day + 1));
                }
            }
            PenaltyResult::new(total, details)
        }))
    }
}

/// Minimum headcount on listed days.
pub struct MinWorkersOnDate;

impl ConstraintTemplate for MinWorkersOnDate {
    fn id(&self) -> &'static str {
        "min_workers_on_date"
    }

    fn display_name(&self) -> &'static str {
        "Minimum headcount on dates"
    }

    fn category(&self) -> Category {
        Category::Day
    }

    fn description(&self) -> &'static str {
        "Guarantees a minimum headcount on specific days."
    }

    fn parameters(&self) -> Vec<ParameterDef> {
        vec![
            ParameterDef::text("target_days", "Days", "")
                .describe("1-indexed day numbers, comma-separated"),
            ParameterDef::int("min_workers", "Minimum workers", 5).range(1.0, 50.0),
            ParameterDef::float("penalty_per_missing", "Penalty per missing worker", 10.0)
                .range(0.1, 100.0),
        ]
    }

    fn compile(&self, params: &Params) -> Result<PenaltyFn, ShiftError> {
        let days = parse_day_list(params.text("target_days")?);
        let min_workers = params.count("min_workers")?;
        let weight = params.float("penalty_per_missing")?;

        Ok(Box::new(move |ctx: &ScheduleContext<'_>| {
            let mut total = 0.0;
            let mut details = Vec::new();
            for &day in days.iter().filter(|&&d| (1..=ctx.days()).contains(&d)) {
                let workers = ctx.workers_on(day - 1);
                if workers < min_workers {
                    total += (min_workers - workers) as f64 * weight;
                    details.push(format!("day {day}: {workers} working (minimum {min_workers})"));
                }
            }
            PenaltyResult::new(total, details)
        }))
    }
}

/// Maximum headcount on listed days.
pub struct MaxWorkersOnDate;

impl ConstraintTemplate for MaxWorkersOnDate {
    fn id(&self) -> &'static str {
        "max_workers_on_date"
    }

    fn display_name(&self) -> &'static str {
        "Maximum headcount on dates"
    }

    fn category(&self) -> Category {
        Category::Day
    }

    fn description(&self) -> &'static str {
        "Caps the headcount on specific days."
    }

    fn parameters(&self) -> Vec<ParameterDef> {
        vec![
            ParameterDef::text("target_days", "Days", "")
                .describe("1-indexed day numbers, comma-separated"),
            ParameterDef::int("max_workers", "Maximum workers", 8).range(1.0, 50.0),
            ParameterDef::float("penalty_per_excess", "Penalty per excess worker", 10.0)
                .range(0.1, 100.0),
        ]
    }

    fn compile(&self, params: &Params) -> Result<PenaltyFn, ShiftError> {
        let days = parse_day_list(params.text("target_days")?);
        let max_workers = params.count("max_workers")?;
        let weight = params.float("penalty_per_excess")?;

        Ok(Box::new(move |ctx: &ScheduleContext<'_>| {
            let mut total = 0.0;
            let mut details = Vec::new();
            for &day in days.iter().filter(|&&d| (1..=ctx.days()).contains(&d)) {
                let workers = ctx.workers_on(day - 1);
                if workers > max_workers {
                    total += (workers - max_workers) as f64 * weight;
                    details.push(format!("day {day}: {workers} working (maximum {max_workers})"));
                }
            }
            PenaltyResult::new(total, details)
        }))
    }
}

/// Minimum working employees carrying one skill tag, every day.
pub struct MinSkilledWorkers;

impl ConstraintTemplate for MinSkilledWorkers {
    fn id(&self) -> &'static str {
        "min_skilled_workers"
    }

    fn display_name(&self) -> &'static str {
        "Skill coverage"
    }

    fn category(&self) -> Category {
        Category::Day
    }

    fn description(&self) -> &'static str {
        "Requires a minimum number of working employees with a given skill every day."
    }

    fn parameters(&self) -> Vec<ParameterDef> {
        vec![
            ParameterDef::text("skill", "Skill tag", ""),
            ParameterDef::int("min_count", "Minimum count", 1).range(1.0, 20.0),
            ParameterDef::float("penalty_per_missing", "Penalty per missing worker", 15.0)
                .range(0.1, 100.0),
        ]
    }

    fn compile(&self, params: &Params) -> Result<PenaltyFn, ShiftError> {
        let skill = params.text("skill")?.trim().to_owned();
        let min_count = params.count("min_count")?;
        let weight = params.float("penalty_per_missing")?;

        Ok(Box::new(move |ctx: &ScheduleContext<'_>| {
            if skill.is_empty() || !ctx.employees().iter().any(|e| e.has_tag(&skill)) {
                return PenaltyResult::default();
            }
            let mut total = 0.0;
            let mut details = Vec::new();
            for day in 0..ctx.days() {
                let working = ctx.workers_where(day, |e| e.has_tag(&skill));
                if working < min_count {
                    total += (min_count - working) as f64 * weight;
                    details.push(format!(
                        "day {}: {working} {skill} working (minimum {min_count})",
                        day + 1
                    ));
                }
            }
            PenaltyResult::new(total, details)
        }))
    }
}

/// Minimum working employees across a group of section tags, every day.
pub struct SectionMinWorkers;

impl ConstraintTemplate for SectionMinWorkers {
    fn id(&self) -> &'static str {
        "section_min_workers"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["kitchen_min_workers"]
    }

    fn display_name(&self) -> &'static str {
        "Section minimum headcount"
    }

    fn category(&self) -> Category {
        Category::Day
    }

    fn description(&self) -> &'static str {
        "Requires a minimum combined headcount of employees in any of the listed sections."
    }

    fn parameters(&self) -> Vec<ParameterDef> {
        vec![
            ParameterDef::text("sections", "Sections", "prep,lunch,prep_lunch")
                .describe("Section tags, comma-separated"),
            ParameterDef::int("min_workers", "Minimum workers", 3).range(1.0, 10.0),
            ParameterDef::float("penalty_per_missing", "Penalty per missing worker", 50.0)
                .range(1.0, 500.0),
        ]
    }

    fn compile(&self, params: &Params) -> Result<PenaltyFn, ShiftError> {
        let sections = parse_tag_list(params.text("sections")?);
        let min_workers = params.count("min_workers")?;
        let weight = params.float("penalty_per_missing")?;

        Ok(Box::new(move |ctx: &ScheduleContext<'_>| {
            let in_sections =
                |e: &crate::model::EmployeeInfo| sections.iter().any(|s| e.has_tag(s));
            if !ctx.employees().iter().any(in_sections) {
                return PenaltyResult::default();
            }
            let mut total = 0.0;
            let mut details = Vec::new();
            for day in 0..ctx.days() {
                let working = ctx.workers_where(day, in_sections);
                if working < min_workers {
                    total += (min_workers - working) as f64 * weight;
                    details.push(format!(
                        "day {}: {working} in {} (minimum {min_workers})",
                        day + 1,
                        sections.join("+")
                    ));
                }
            }
            PenaltyResult::new(total, details)
        }))
    }
}

/// Nobody works on closed weekdays, except on days opened by override where
/// only full-time staff should work.
pub struct ClosedDay;

impl ConstraintTemplate for ClosedDay {
    fn id(&self) -> &'static str {
        "closed_day"
    }

    fn display_name(&self) -> &'static str {
        "Closed days"
    }

    fn category(&self) -> Category {
        Category::Day
    }

    fn description(&self) -> &'static str {
        "Hard penalty for working on a closed weekday; soft penalty for part-timers on an override opening."
    }

    fn parameters(&self) -> Vec<ParameterDef> {
        vec![
            ParameterDef::text("closed_weekdays", "Closed weekdays", "5,6")
                .describe("Weekday numbers, 0 = Monday, comma-separated"),
            ParameterDef::text("override_open_days", "Override openings", "")
                .describe("1-indexed days open despite falling on a closed weekday"),
            ParameterDef::float("penalty_closed_day", "Penalty per worker on a closed day", 500.0)
                .range(1.0, 10000.0),
            ParameterDef::float(
                "penalty_parttime_override",
                "Penalty per part-timer on an override day",
                100.0,
            )
            .range(0.0, 10000.0),
        ]
    }

    fn compile(&self, params: &Params) -> Result<PenaltyFn, ShiftError> {
        let closed: Vec<Weekday> = parse_day_list(params.text("closed_weekdays")?)
            .into_iter()
            .filter_map(Weekday::from_index)
            .collect();
        let overrides = parse_day_list(params.text("override_open_days")?);
        let hard = params.float("penalty_closed_day")?;
        let soft = params.float("penalty_parttime_override")?;

        Ok(Box::new(move |ctx: &ScheduleContext<'_>| {
            let mut total = 0.0;
            let mut details = Vec::new();
            for (day, weekday) in ctx.input().weekdays().iter().enumerate() {
                if !weekday.is_some_and(|w| closed.contains(&w)) {
                    continue;
                }
                let opened = overrides.contains(&(day + 1));
                for (row, emp) in ctx.employees().iter().enumerate() {
                    if !ctx.is_working(row, day) {
                        continue;
                    }
                    if !opened {
                        total += hard;
                        details.push(format!(
                            "day {}: {} working on a closed day",
                            day + 1,
                            emp.name
                        ));
                    } else if emp.is_part_time() {
                        total += soft;
                        details.push(format!(
                            "day {}: part-timer {} working on an override opening",
                            day + 1,
                            emp.name
                        ));
                    }
                }
            }
            PenaltyResult::new(total, details)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::test_support::{compile, eval};
    use crate::constraints::ParamValue;
    use crate::model::{fixtures, Cell, Schedule};

    fn one_rest_per_day() -> Schedule {
        // Alice keeps her requested day (index 2); each day has exactly one absentee.
        Schedule::from_codes(&[
            vec![1, 0, 2, 0, 0, 0, 0],
            vec![0, 1, 0, 1, 0, 0, 1],
            vec![0, 0, 0, 0, 1, 1, 0],
        ])
        .unwrap()
    }

    #[test]
    fn test_required_workers_exact_match_is_free() {
        let input = fixtures::small_input();
        let f = compile(&RequiredWorkersMatch, &[("penalty_per_diff", ParamValue::Float(4.0))]);
        let r = eval(&f, &one_rest_per_day(), &input);
        assert_eq!(r.penalty, 0.0);
        assert!(r.details.is_empty());
    }

    #[test]
    fn test_required_workers_all_working() {
        let input = fixtures::small_input();
        let f = compile(&RequiredWorkersMatch, &[("penalty_per_diff", ParamValue::Float(4.0))]);
        let r = eval(&f, &Schedule::new(3, 7), &input);
        // 7 days × |3 − 2| × 4.0
        assert!((r.penalty - 28.0).abs() < 1e-9);
        assert_eq!(r.details.matches("working").count(), 7);
    }

    #[test]
    fn test_required_workers_unavailable_is_absent() {
        let input = fixtures::kitchen_input();
        let f = compile(&RequiredWorkersMatch, &[]);
        let mut schedule = Schedule::new(5, 14);
        for day in 0..14 {
            schedule.set(0, day, Cell::Rest);
            schedule.set(1, day, Cell::Rest);
        }
        assert_eq!(eval(&f, &schedule, &input).penalty, 0.0);
        schedule.set(4, 2, Cell::Unavailable);
        let r = eval(&f, &schedule, &input);
        assert!((r.penalty - 4.0).abs() < 1e-9);
        assert!(r.details.contains("day 3: 2 working"));
    }

    #[test]
    fn test_required_workers_section_scoped() {
        let input = fixtures::kitchen_input();
        let f = compile(&RequiredWorkersMatch, &[("section", "prep".into())]);
        // prep: Kawasaki, Saito, Hirata; all working on every day but Saito's request.
        let r = eval(&f, &Schedule::new(5, 14), &input);
        assert!((r.penalty - 14.0 * 4.0).abs() < 1e-9);
        let r = eval(&f, input.base(), &input);
        assert!((r.penalty - 13.0 * 4.0).abs() < 1e-9);

        let f = compile(&RequiredWorkersMatch, &[("section", "hall".into())]);
        let r = eval(&f, input.base(), &input);
        assert_eq!(r.penalty, 0.0);
        assert!(r.details.contains("no demand curve"));
    }

    #[test]
    fn test_min_and_max_workers_on_date() {
        let input = fixtures::small_input();
        let schedule = one_rest_per_day();
        let f = compile(
            &MinWorkersOnDate,
            &[("target_days", "1,2,40".into()), ("min_workers", ParamValue::Int(3))],
        );
        let r = eval(&f, &schedule, &input);
        assert!((r.penalty - 20.0).abs() < 1e-9);

        let f = compile(
            &MaxWorkersOnDate,
            &[("target_days", "3".into()), ("max_workers", ParamValue::Int(1))],
        );
        let r = eval(&f, &schedule, &input);
        assert!((r.penalty - 10.0).abs() < 1e-9);

        let f = compile(&MinWorkersOnDate, &[]);
        assert_eq!(eval(&f, &schedule, &input).penalty, 0.0);
    }

    #[test]
    fn test_min_skilled_workers() {
        let input = fixtures::kitchen_input();
        let mut schedule = Schedule::new(5, 14);
        schedule.set(1, 0, Cell::Rest);
        schedule.set(3, 0, Cell::Rest);
        let f = compile(
            &MinSkilledWorkers,
            &[("skill", "lunch".into()), ("min_count", ParamValue::Int(2))],
        );
        let r = eval(&f, &schedule, &input);
        assert!((r.penalty - 15.0).abs() < 1e-9);
        assert!(r.details.contains("day 1: 1 lunch"));

        let f = compile(&MinSkilledWorkers, &[("skill", "sommelier".into())]);
        assert_eq!(eval(&f, &schedule, &input).penalty, 0.0);
    }

    #[test]
    fn test_section_min_workers_counts_any_tag() {
        let input = fixtures::kitchen_input();
        let mut schedule = Schedule::new(5, 14);
        // Day 0: only Hashimoto (lunch) and Hirata (prep) work.
        schedule.set(0, 0, Cell::Rest);
        schedule.set(1, 0, Cell::Rest);
        schedule.set(3, 0, Cell::Rest);
        let f = compile(&SectionMinWorkers, &[("sections", "prep, lunch".into())]);
        let r = eval(&f, &schedule, &input);
        assert!((r.penalty - 50.0).abs() < 1e-9);
        // Unavailable counts as absent.
        schedule.set(3, 4, Cell::Unavailable);
        schedule.set(0, 4, Cell::Rest);
        schedule.set(2, 4, Cell::Rest);
        let r = eval(&f, &schedule, &input);
        assert!((r.penalty - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_section_min_workers_defaults_to_kitchen_sections() {
        let input = fixtures::kitchen_input();
        let mut schedule = Schedule::new(5, 14);
        // Day 0: Hashimoto (lunch) and Hirata (prep) only.
        schedule.set(0, 0, Cell::Rest);
        schedule.set(1, 0, Cell::Rest);
        schedule.set(3, 0, Cell::Rest);
        let f = compile(&SectionMinWorkers, &[]);
        let r = eval(&f, &schedule, &input);
        assert!((r.penalty - 50.0).abs() < 1e-9);
    }

    fn weekdays_only(input: &crate::model::PlanningInput) -> Schedule {
        let mut s = Schedule::new(5, 14);
        for day in input.weekend_days() {
            for emp in 0..5 {
                s.set(emp, day, Cell::Rest);
            }
        }
        s
    }

    #[test]
    fn test_closed_day_all_off() {
        let input = fixtures::kitchen_input();
        let f = compile(&ClosedDay, &[]);
        assert_eq!(eval(&f, &weekdays_only(&input), &input).penalty, 0.0);
    }

    #[test]
    fn test_closed_day_workers_penalized() {
        let input = fixtures::kitchen_input();
        let mut schedule = weekdays_only(&input);
        schedule.set(0, 6, Cell::Work);
        schedule.set(1, 6, Cell::Work);
        let f = compile(&ClosedDay, &[]);
        let r = eval(&f, &schedule, &input);
        assert!((r.penalty - 1000.0).abs() < 1e-9);
        assert!(r.details.contains("Kawasaki"));
    }

    #[test]
    fn test_closed_day_override() {
        let input = fixtures::kitchen_input();
        let mut schedule = weekdays_only(&input);
        // Saturday of week one is day 6 (index 5).
        schedule.set(0, 5, Cell::Work);
        schedule.set(2, 5, Cell::Work);
        schedule.set(0, 6, Cell::Work);
        let f = compile(&ClosedDay, &[("override_open_days", "6".into())]);
        let r = eval(&f, &schedule, &input);
        // Full-timer on the override: free; part-timer: 100; Sunday still closed: 500.
        assert!((r.penalty - 600.0).abs() < 1e-9);
        assert!(r.details.contains("part-timer Hirata"));

        let f = compile(&ClosedDay, &[("closed_weekdays", "".into())]);
        assert_eq!(eval(&f, &Schedule::new(5, 14), &input).penalty, 0.0);
    }
}
