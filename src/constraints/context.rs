//! Read view handed to penalty functions.

use crate::model::{Cell, EmployeeInfo, PlanningInput, Schedule};

/// A candidate schedule together with its planning input.
///
/// Besides the raw schedule, the context carries a *binary* view in which
/// [`Cell::Requested`] is folded into [`Cell::Rest`]. Rules that do not care
/// whether a rest day was requested or assigned read the binary view through
/// [`is_working`](Self::is_working) and [`is_resting`](Self::is_resting).
/// [`Cell::Unavailable`] stays distinct: it counts as absent for headcount
/// but is neither work nor rest for pattern rules.
///
/// The same context can be built for a hand-edited schedule to re-run the
/// compiled constraints for reporting.
#[derive(Debug, Clone)]
pub struct ScheduleContext<'a> {
    schedule: &'a Schedule,
    input: &'a PlanningInput,
    binary: Schedule,
}

impl<'a> ScheduleContext<'a> {
    /// # Panics
    /// Panics if `schedule` is not `input.employee_count()` × `input.days()`.
    pub fn new(schedule: &'a Schedule, input: &'a PlanningInput) -> Self {
        assert_eq!(
            (schedule.employees(), schedule.days()),
            (input.employee_count(), input.days()),
            "schedule shape must match the planning input"
        );
        let mut binary = schedule.clone();
        for cell in binary.cells_mut() {
            *cell = cell.binary();
        }
        Self {
            schedule,
            input,
            binary,
        }
    }

    pub fn schedule(&self) -> &Schedule {
        self.schedule
    }

    pub fn input(&self) -> &PlanningInput {
        self.input
    }

    pub fn binary(&self) -> &Schedule {
        &self.binary
    }

    pub fn employee_count(&self) -> usize {
        self.schedule.employees()
    }

    pub fn days(&self) -> usize {
        self.schedule.days()
    }

    pub fn employees(&self) -> &[EmployeeInfo] {
        self.input.employees()
    }

    /// Display name for a row, falling back to the row number.
    pub fn employee_name(&self, employee: usize) -> String {
        self.input
            .employees()
            .get(employee)
            .map_or_else(|| format!("#{employee}"), |e| e.name.clone())
    }

    /// One employee's row in the binary view.
    pub fn binary_row(&self, employee: usize) -> &[Cell] {
        self.binary.row(employee)
    }

    pub fn is_working(&self, employee: usize, day: usize) -> bool {
        self.binary.get(employee, day) == Cell::Work
    }

    /// Rest in the binary view: assigned or requested, not unavailable.
    pub fn is_resting(&self, employee: usize, day: usize) -> bool {
        self.binary.get(employee, day) == Cell::Rest
    }

    /// Maximal runs of `state` in an employee's binary row, as
    /// `(start_day, length)`. A run reaching the last day is included.
    pub fn runs(&self, employee: usize, state: Cell) -> Vec<(usize, usize)> {
        let mut runs = Vec::new();
        let mut start = None;
        for (day, &cell) in self.binary_row(employee).iter().enumerate() {
            match (cell == state, start) {
                (true, None) => start = Some(day),
                (false, Some(s)) => {
                    runs.push((s, day - s));
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(s) = start {
            runs.push((s, self.days() - s));
        }
        runs
    }

    /// Headcount of employees working on `day`.
    pub fn workers_on(&self, day: usize) -> usize {
        self.binary.workers_on(day)
    }

    /// Headcount of working employees that satisfy `pred`.
    pub fn workers_where<F>(&self, day: usize, pred: F) -> usize
    where
        F: Fn(&EmployeeInfo) -> bool,
    {
        self.input
            .employees()
            .iter()
            .enumerate()
            .filter(|(row, emp)| pred(emp) && self.is_working(*row, day))
            .count()
    }
}
