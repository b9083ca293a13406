//! The immutable per-run planning bundle.

use super::cell::Cell;
use super::employee::EmployeeInfo;
use super::schedule::Schedule;
use crate::error::ShiftError;
use serde::{Deserialize, Serialize};

/// Day of the week, Monday first (index 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Weekday {
    const ALL: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    /// Zero-based index, Monday = 0.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`index`](Self::index); `None` above 6.
    pub fn from_index(index: usize) -> Option<Weekday> {
        Self::ALL.get(index).copied()
    }

    pub fn is_weekend(self) -> bool {
        matches!(self, Weekday::Sat | Weekday::Sun)
    }

    /// Builds a weekday curve for `days` consecutive days starting on `first`.
    pub fn sequence(first: Weekday, days: usize) -> Vec<Option<Weekday>> {
        (0..days)
            .map(|d| Self::from_index((first.index() + d) % 7))
            .collect()
    }
}

/// Required headcount curve for one section tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionDemand {
    pub tag: String,
    pub required: Vec<usize>,
}

/// Everything the optimizer needs to know about one planning month.
///
/// Built once by the caller and borrowed by the optimizer for the duration
/// of a run. The base schedule carries the fixed codes
/// ([`Cell::Requested`], [`Cell::Unavailable`]) and [`Cell::Work`] elsewhere.
#[derive(Debug, Clone)]
pub struct PlanningInput {
    employees: Vec<EmployeeInfo>,
    base: Schedule,
    required_workers: Vec<usize>,
    section_demands: Vec<SectionDemand>,
    weekdays: Vec<Option<Weekday>>,
}

impl PlanningInput {
    /// Creates a planning input with unknown weekdays and no section demand.
    ///
    /// # Errors
    /// Returns [`ShiftError::InvalidInput`] when the base schedule does not
    /// have one row per employee, an employee's `index` differs from its
    /// position, or the required-workers curve does not cover every day.
    pub fn new(
        employees: Vec<EmployeeInfo>,
        base: Schedule,
        required_workers: Vec<usize>,
    ) -> Result<Self, ShiftError> {
        if base.employees() != employees.len() {
            return Err(ShiftError::InvalidInput(format!(
                "base schedule has {} rows for {} employees",
                base.employees(),
                employees.len()
            )));
        }
        if let Some((pos, emp)) = employees.iter().enumerate().find(|(i, e)| e.index != *i) {
            return Err(ShiftError::InvalidInput(format!(
                "employee `{}` at position {pos} has index {}",
                emp.name, emp.index
            )));
        }
        check_curve("required workers", &required_workers, base.days())?;
        let days = base.days();
        Ok(Self {
            employees,
            base,
            required_workers,
            section_demands: Vec::new(),
            weekdays: vec![None; days],
        })
    }

    /// Sets the weekday of every day.
    pub fn with_weekdays(mut self, weekdays: Vec<Option<Weekday>>) -> Result<Self, ShiftError> {
        check_curve("weekdays", &weekdays, self.days())?;
        self.weekdays = weekdays;
        Ok(self)
    }

    /// Adds a section-specific required headcount curve.
    pub fn with_section_demand(
        mut self,
        tag: impl Into<String>,
        required: Vec<usize>,
    ) -> Result<Self, ShiftError> {
        check_curve("section demand", &required, self.days())?;
        self.section_demands.push(SectionDemand {
            tag: tag.into(),
            required,
        });
        Ok(self)
    }

    /// Builds a base schedule from each employee's fixed-day lists.
    ///
    /// Day numbers are 1-indexed; days outside the horizon are ignored.
    /// A day listed both as requested and unavailable is unavailable.
    pub fn base_from_employees(employees: &[EmployeeInfo], days: usize) -> Schedule {
        let mut base = Schedule::new(employees.len(), days);
        for (row, emp) in employees.iter().enumerate() {
            for &day in &emp.requested_off {
                if (1..=days).contains(&day) {
                    base.set(row, day - 1, Cell::Requested);
                }
            }
            for &day in &emp.unavailable {
                if (1..=days).contains(&day) {
                    base.set(row, day - 1, Cell::Unavailable);
                }
            }
        }
        base
    }

    pub fn employees(&self) -> &[EmployeeInfo] {
        &self.employees
    }

    pub fn employee_count(&self) -> usize {
        self.employees.len()
    }

    pub fn days(&self) -> usize {
        self.base.days()
    }

    pub fn base(&self) -> &Schedule {
        &self.base
    }

    pub fn required_workers(&self) -> &[usize] {
        &self.required_workers
    }

    /// The headcount curve registered for `tag`, if any.
    pub fn section_demand(&self, tag: &str) -> Option<&[usize]> {
        self.section_demands
            .iter()
            .find(|d| d.tag == tag)
            .map(|d| d.required.as_slice())
    }

    pub fn weekdays(&self) -> &[Option<Weekday>] {
        &self.weekdays
    }

    /// Zero-based indices of Saturdays and Sundays.
    pub fn weekend_days(&self) -> Vec<usize> {
        self.weekdays
            .iter()
            .enumerate()
            .filter(|(_, w)| w.is_some_and(Weekday::is_weekend))
            .map(|(d, _)| d)
            .collect()
    }

    /// Employees whose quota cannot be met exactly from the base schedule.
    ///
    /// Returns `(row, quota, fixed, free)` for each: either the fixed days
    /// already exceed the quota, or too few work cells remain to reach it.
    pub fn infeasible_quotas(&self) -> Vec<(usize, usize, usize, usize)> {
        self.employees
            .iter()
            .enumerate()
            .filter_map(|(row, emp)| {
                let fixed = self.base.rest_count(row);
                let free = self.days() - fixed;
                let ok = fixed <= emp.rest_quota && fixed + free >= emp.rest_quota;
                (!ok).then_some((row, emp.rest_quota, fixed, free))
            })
            .collect()
    }
}

fn check_curve<T>(what: &str, curve: &[T], days: usize) -> Result<(), ShiftError> {
    if curve.len() != days {
        return Err(ShiftError::InvalidInput(format!(
            "{what} has {} entries for {days} days",
            curve.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures;

    #[test]
    fn test_weekday_sequence_wraps() {
        let seq = Weekday::sequence(Weekday::Sat, 3);
        assert_eq!(seq, vec![Some(Weekday::Sat), Some(Weekday::Sun), Some(Weekday::Mon)]);
    }

    #[test]
    fn test_base_from_employees() {
        let emps = vec![
            EmployeeInfo::new(0, "A", 2)
                .with_requested_off(vec![1, 3, 99])
                .with_unavailable(vec![3]),
        ];
        let base = PlanningInput::base_from_employees(&emps, 4);
        assert_eq!(base.to_codes(), vec![vec![2, 0, 3, 0]]);
    }

    #[test]
    fn test_dimension_checks() {
        let emps = vec![EmployeeInfo::new(0, "A", 2)];
        assert!(PlanningInput::new(emps.clone(), Schedule::new(2, 7), vec![1; 7]).is_err());
        assert!(PlanningInput::new(emps.clone(), Schedule::new(1, 7), vec![1; 6]).is_err());
        let ok = PlanningInput::new(emps, Schedule::new(1, 7), vec![1; 7]).unwrap();
        assert!(ok.clone().with_weekdays(vec![None; 3]).is_err());
        assert!(ok.with_section_demand("x", vec![1; 7]).is_ok());
    }

    #[test]
    fn test_index_must_match_row() {
        let emps = vec![EmployeeInfo::new(1, "A", 2)];
        let err = PlanningInput::new(emps, Schedule::new(1, 3), vec![1; 3]).unwrap_err();
        assert!(err.to_string().contains("index 1"));
    }

    #[test]
    fn test_weekend_days() {
        let input = fixtures::small_input();
        assert_eq!(input.weekend_days(), vec![5, 6]);
    }

    #[test]
    fn test_infeasible_quotas() {
        let emps = vec![
            EmployeeInfo::new(0, "A", 1).with_requested_off(vec![1, 2]),
            EmployeeInfo::new(1, "B", 5),
            EmployeeInfo::new(2, "C", 2),
        ];
        let base = PlanningInput::base_from_employees(&emps, 3);
        let input = PlanningInput::new(emps, base, vec![1; 3]).unwrap();
        assert_eq!(input.infeasible_quotas(), vec![(0, 1, 2, 1), (1, 5, 0, 3)]);
    }
}
