//! The employees × days schedule matrix.

use super::cell::Cell;
use crate::error::ShiftError;
use serde::{Deserialize, Serialize};

/// An employees × days matrix of [`Cell`]s, stored row-major.
///
/// Genetic operators work on the flattened [`cells`](Schedule::cells) view;
/// constraint rules read it by row or by day.
///
/// Serialized as a matrix of integer codes (one row per employee).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Cell>>", into = "Vec<Vec<Cell>>")]
pub struct Schedule {
    employees: usize,
    days: usize,
    cells: Vec<Cell>,
}

impl Schedule {
    /// Creates a schedule where everyone works every day.
    pub fn new(employees: usize, days: usize) -> Self {
        Self {
            employees,
            days,
            cells: vec![Cell::Work; employees * days],
        }
    }

    /// Builds a schedule from rows of cells.
    ///
    /// # Errors
    /// Returns [`ShiftError::InvalidInput`] if the rows have different lengths.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, ShiftError> {
        let employees = rows.len();
        let days = rows.first().map_or(0, Vec::len);
        let mut cells = Vec::with_capacity(employees * days);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != days {
                return Err(ShiftError::InvalidInput(format!(
                    "schedule row {i} has {} days, expected {days}",
                    row.len()
                )));
            }
            cells.extend(row);
        }
        Ok(Self {
            employees,
            days,
            cells,
        })
    }

    /// Builds a schedule from rows of integer codes.
    pub fn from_codes(rows: &[Vec<u8>]) -> Result<Self, ShiftError> {
        let rows = rows
            .iter()
            .map(|row| row.iter().map(|&c| Cell::try_from(c)).collect())
            .collect::<Result<Vec<Vec<Cell>>, _>>()?;
        Self::from_rows(rows)
    }

    /// Number of employees (rows).
    pub fn employees(&self) -> usize {
        self.employees
    }

    /// Number of days (columns).
    pub fn days(&self) -> usize {
        self.days
    }

    /// Returns the cell for `employee` on `day` (both zero-based).
    ///
    /// # Panics
    /// Panics if either index is out of range.
    pub fn get(&self, employee: usize, day: usize) -> Cell {
        self.cells[self.offset(employee, day)]
    }

    /// Overwrites one cell.
    pub fn set(&mut self, employee: usize, day: usize, cell: Cell) {
        let i = self.offset(employee, day);
        self.cells[i] = cell;
    }

    /// One employee's row.
    pub fn row(&self, employee: usize) -> &[Cell] {
        let start = employee * self.days;
        &self.cells[start..start + self.days]
    }

    /// Mutable access to one employee's row.
    pub fn row_mut(&mut self, employee: usize) -> &mut [Cell] {
        let start = employee * self.days;
        &mut self.cells[start..start + self.days]
    }

    /// Iterates over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        (0..self.employees).map(move |e| self.row(e))
    }

    /// The flattened, row-major cell sequence.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Mutable flattened cell sequence.
    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Iterates over one day's column.
    pub fn column(&self, day: usize) -> impl Iterator<Item = Cell> + '_ {
        (0..self.employees).map(move |e| self.get(e, day))
    }

    /// Number of non-work cells (codes 1, 2 and 3) for an employee.
    pub fn rest_count(&self, employee: usize) -> usize {
        self.row(employee).iter().filter(|c| c.is_off()).count()
    }

    /// Number of fixed cells (codes 2 and 3) for an employee.
    pub fn fixed_count(&self, employee: usize) -> usize {
        self.row(employee).iter().filter(|c| c.is_fixed()).count()
    }

    /// Number of employees working on `day`.
    pub fn workers_on(&self, day: usize) -> usize {
        self.column(day).filter(|&c| c == Cell::Work).count()
    }

    /// Copies the matrix out as integer codes.
    pub fn to_codes(&self) -> Vec<Vec<u8>> {
        self.rows()
            .map(|row| row.iter().map(|c| c.code()).collect())
            .collect()
    }

    fn offset(&self, employee: usize, day: usize) -> usize {
        assert!(
            employee < self.employees && day < self.days,
            "cell ({employee}, {day}) out of range for {}x{} schedule",
            self.employees,
            self.days
        );
        employee * self.days + day
    }
}

impl TryFrom<Vec<Vec<Cell>>> for Schedule {
    type Error = ShiftError;

    fn try_from(rows: Vec<Vec<Cell>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<Schedule> for Vec<Vec<Cell>> {
    fn from(schedule: Schedule) -> Self {
        schedule.rows().map(<[Cell]>::to_vec).collect()
    }
}
