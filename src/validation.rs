//! Compliance report for a finished schedule.
//!
//! [`validate`] re-runs the compiled constraints against a schedule (for
//! example one edited by hand after optimization) and adds structural
//! checks that hold for every valid roster:
//!
//! - each employee's non-work count equals their rest quota
//! - every requested or unavailable day of the base schedule is preserved

use crate::constraints::CompiledConstraint;
use crate::error::ShiftError;
use crate::evaluation::evaluate;
use crate::model::{PlanningInput, Schedule};
use serde::Serialize;

/// Penalty at or above which a constraint violation is an error.
pub const ERROR_THRESHOLD: f64 = 10.0;

/// `Error` for penalties of at least [`ERROR_THRESHOLD`] and structural
/// breaches, `Warning` for smaller penalties, `Info` for bonuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// One finding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    /// Template id, or `structural_*` for built-in checks.
    pub constraint_id: String,
    pub message: String,
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<usize>,
    pub penalty: f64,
}

/// Penalty breakdown for one constraint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstraintScore {
    pub constraint_id: String,
    pub display_name: String,
    pub penalty: f64,
    pub violations: Vec<Violation>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ValidationReport {
    pub total_penalty: f64,
    pub constraint_scores: Vec<ConstraintScore>,
    /// Constraint violations followed by structural ones.
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// True when no error-level violation exists.
    pub fn is_compliant(&self) -> bool {
        self.error_count() == 0
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    fn count(&self, severity: Severity) -> usize {
        self.violations.iter().filter(|v| v.severity == severity).count()
    }
}

/// Builds a [`ValidationReport`] for `schedule`.
///
/// # Errors
/// [`ShiftError::InvalidInput`] if the schedule's shape differs from the
/// input's base schedule.
pub fn validate(
    schedule: &Schedule,
    input: &PlanningInput,
    constraints: &[CompiledConstraint],
) -> Result<ValidationReport, ShiftError> {
    let base = input.base();
    if (schedule.employees(), schedule.days()) != (base.employees(), base.days()) {
        return Err(ShiftError::InvalidInput(format!(
            "schedule is {}×{}, planning input is {}×{}",
            schedule.employees(),
            schedule.days(),
            base.employees(),
            base.days()
        )));
    }

    let evaluation = evaluate(schedule, input, constraints);
    let mut report = ValidationReport {
        total_penalty: evaluation.total_penalty,
        ..ValidationReport::default()
    };

    for outcome in evaluation.outcomes {
        let mut violations = Vec::new();
        if outcome.penalty != 0.0 {
            // Negative penalties are bonuses and only reported.
            let severity = if outcome.penalty >= ERROR_THRESHOLD {
                Severity::Error
            } else if outcome.penalty > 0.0 {
                Severity::Warning
            } else {
                Severity::Info
            };
            let message = if outcome.details.is_empty() {
                format!("penalty {:.1}", outcome.penalty)
            } else {
                outcome.details
            };
            violations.push(Violation {
                constraint_id: outcome.template_id.clone(),
                message,
                severity,
                employee: None,
                day: None,
                penalty: outcome.penalty,
            });
        }
        report.violations.extend(violations.iter().cloned());
        report.constraint_scores.push(ConstraintScore {
            constraint_id: outcome.template_id,
            display_name: outcome.display_name,
            penalty: outcome.penalty,
            violations,
        });
    }

    report.violations.extend(structural_violations(schedule, input));
    Ok(report)
}

fn structural_violations(schedule: &Schedule, input: &PlanningInput) -> Vec<Violation> {
    let base = input.base();
    let mut violations = Vec::new();
    for (row, emp) in input.employees().iter().enumerate() {
        let off = schedule.rest_count(row);
        if off != emp.rest_quota {
            violations.push(Violation {
                constraint_id: "structural_rest_quota".into(),
                message: format!("{}: {off} days off (quota {})", emp.name, emp.rest_quota),
                severity: Severity::Error,
                employee: Some(row),
                day: None,
                penalty: 0.0,
            });
        }
        for day in 0..schedule.days() {
            let expected = base.get(row, day);
            if expected.is_fixed() && schedule.get(row, day) != expected {
                violations.push(Violation {
                    constraint_id: "structural_fixed_day".into(),
                    message: format!("{}: fixed day {} was changed", emp.name, day + 1),
                    severity: Severity::Error,
                    employee: Some(row),
                    day: Some(day),
                    penalty: 0.0,
                });
            }
        }
    }
    violations
}
