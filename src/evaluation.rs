//! Schedule scoring.
//!
//! [`evaluate`] is the fitness function of the optimizer and the entry point
//! for re-checking a finished or hand-edited schedule. It is pure: the same
//! schedule, input and constraints always yield the same [`Evaluation`].

use crate::constraints::{CompiledConstraint, ScheduleContext};
use crate::model::{PlanningInput, Schedule};
use serde::Serialize;

/// Penalty contributed by one compiled constraint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstraintOutcome {
    pub template_id: String,
    pub display_name: String,
    pub penalty: f64,
    pub details: String,
}

/// Full breakdown of one schedule's score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    /// `-total_penalty`; higher is better.
    pub score: f64,
    pub total_penalty: f64,
    /// One entry per constraint, in input order.
    pub outcomes: Vec<ConstraintOutcome>,
}

/// Applies every constraint once and sums the penalties.
///
/// # Examples
///
/// ```
/// use u_shift::constraints::{ConstraintConfig, ConstraintRegistry, ConstraintSet};
/// use u_shift::evaluation::evaluate;
/// use u_shift::model::{EmployeeInfo, PlanningInput, Schedule};
///
/// let employees = vec![EmployeeInfo::new(0, "A", 0), EmployeeInfo::new(1, "B", 0)];
/// let base = PlanningInput::base_from_employees(&employees, 3);
/// let input = PlanningInput::new(employees, base, vec![1; 3]).unwrap();
/// let set = ConstraintSet::new("s").with(ConstraintConfig::new("required_workers_match"));
/// let constraints = ConstraintRegistry::with_builtins().compile_set(&set).unwrap();
///
/// let eval = evaluate(&Schedule::new(2, 3), &input, &constraints);
/// assert_eq!(eval.total_penalty, 12.0);
/// assert_eq!(eval.score, -12.0);
/// ```
///
/// # Panics
/// Panics if the schedule's shape differs from `input`. Use
/// [`validation::validate`](crate::validation::validate) for schedules of
/// unknown shape.
pub fn evaluate(
    schedule: &Schedule,
    input: &PlanningInput,
    constraints: &[CompiledConstraint],
) -> Evaluation {
    let ctx = ScheduleContext::new(schedule, input);
    let outcomes: Vec<ConstraintOutcome> = constraints
        .iter()
        .map(|c| {
            let r = c.evaluate(&ctx);
            ConstraintOutcome {
                template_id: c.template_id.clone(),
                display_name: c.display_name.clone(),
                penalty: r.penalty,
                details: r.details,
            }
        })
        .collect();
    let total_penalty = outcomes.iter().map(|o| o.penalty).sum::<f64>();
    Evaluation {
        score: -total_penalty,
        total_penalty,
        outcomes,
    }
}

/// Score only: `-Σ penalties`.
///
/// # Panics
/// Panics if the schedule's shape differs from `input`.
pub fn score(
    schedule: &Schedule,
    input: &PlanningInput,
    constraints: &[CompiledConstraint],
) -> f64 {
    let ctx = ScheduleContext::new(schedule, input);
    -constraints
        .iter()
        .map(|c| c.evaluate(&ctx).penalty)
        .sum::<f64>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::{ConstraintConfig, ConstraintRegistry, ConstraintSet};
    use crate::model::{fixtures, Cell};

    fn staffing_only() -> Vec<CompiledConstraint> {
        let set = ConstraintSet::new("staffing").with(
            ConstraintConfig::new("required_workers_match").with_param("penalty_per_diff", 4.0),
        );
        ConstraintRegistry::with_builtins().compile_set(&set).unwrap()
    }

    #[test]
    fn test_staffing_exact() {
        let input = fixtures::small_input();
        let schedule = Schedule::from_codes(&[
            vec![1, 0, 2, 0, 0, 0, 0],
            vec![0, 1, 0, 1, 0, 0, 1],
            vec![0, 0, 0, 0, 1, 1, 0],
        ])
        .unwrap();
        let eval = evaluate(&schedule, &input, &staffing_only());
        assert_eq!(eval.total_penalty, 0.0);
        assert_eq!(eval.score, 0.0);
    }

    #[test]
    fn test_staffing_everyone_working() {
        let input = fixtures::small_input();
        let eval = evaluate(&Schedule::new(3, 7), &input, &staffing_only());
        assert!((eval.total_penalty - 28.0).abs() < 1e-9);
        assert!((eval.score + 28.0).abs() < 1e-9);
        assert_eq!(eval.outcomes.len(), 1);
        assert_eq!(eval.outcomes[0].template_id, "required_workers_match");
    }

    #[test]
    fn test_unavailable_overwrite() {
        let input = fixtures::kitchen_input();
        let set = ConstraintSet::new("hard").with(ConstraintConfig::new("unavailable_day_hard"));
        let constraints = ConstraintRegistry::with_builtins().compile_set(&set).unwrap();

        let clean = input.base().clone();
        assert_eq!(evaluate(&clean, &input, &constraints).total_penalty, 0.0);

        let broken = fixtures::with_cells(input.base(), &[(3, 2, Cell::Work), (3, 9, Cell::Work)]);
        let eval = evaluate(&broken, &input, &constraints);
        assert!((eval.total_penalty - 2000.0).abs() < 1e-9);
    }

    #[test]
    fn test_evaluation_is_pure() {
        let input = fixtures::kitchen_input();
        let constraints = ConstraintRegistry::with_builtins()
            .compile_set(&ConstraintSet::default_set())
            .unwrap();
        let schedule = input.base().clone();
        let first = evaluate(&schedule, &input, &constraints);
        let second = evaluate(&schedule, &input, &constraints);
        assert_eq!(first, second);
        assert_eq!(schedule, *input.base());
        assert_eq!(score(&schedule, &input, &constraints), first.score);
    }

    #[test]
    fn test_bonus_lowers_total() {
        let input = fixtures::small_input();
        let set =
            ConstraintSet::new("bonus").with(ConstraintConfig::new("consecutive_holiday_bonus"));
        let constraints = ConstraintRegistry::with_builtins().compile_set(&set).unwrap();
        let schedule = Schedule::from_codes(&[
            vec![0, 1, 2, 0, 0, 0, 0],
            vec![0, 0, 0, 0, 0, 0, 0],
            vec![0, 0, 0, 0, 0, 0, 0],
        ])
        .unwrap();
        let eval = evaluate(&schedule, &input, &constraints);
        assert!(eval.total_penalty < 0.0);
        assert!(eval.score > 0.0);
    }

    #[test]
    #[should_panic(expected = "schedule shape must match")]
    fn test_mismatched_shape_panics() {
        let input = fixtures::small_input();
        score(&Schedule::new(2, 7), &input, &staffing_only());
    }

    #[test]
    fn test_empty_constraint_list() {
        let input = fixtures::small_input();
        let eval = evaluate(input.base(), &input, &[]);
        assert_eq!(eval.score, 0.0);
        assert!(eval.outcomes.is_empty());
    }
}
