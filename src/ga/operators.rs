//! Genetic operators on rest-day schedules.
//!
//! All operators take an explicit RNG and never write fixed cells
//! ([`Cell::Requested`], [`Cell::Unavailable`]).
//!
//! - [`seed_individual`]: base schedule plus random rest days up to quota
//! - [`repair`]: pull every employee's non-work count back to their quota
//! - [`uniform_crossover`]: per-cell inheritance between two parents
//! - [`mutate`]: flip a random sample of cells between work and rest

use crate::model::{Cell, PlanningInput, Schedule};
use rand::seq::index;
use rand::Rng;
use serde::Serialize;

/// Residual quota state of one employee after repair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "days", rename_all = "snake_case")]
pub enum QuotaStatus {
    Satisfied,
    /// `k` rest days missing: not enough work cells to convert.
    Short(usize),
    /// `k` days over quota: fixed days alone exceed it.
    Over(usize),
}

/// Per-employee quota status, in row order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RepairReport {
    pub statuses: Vec<QuotaStatus>,
}

impl RepairReport {
    /// Reports quota status without changing anything.
    pub fn inspect(schedule: &Schedule, input: &PlanningInput) -> Self {
        let statuses = input
            .employees()
            .iter()
            .enumerate()
            .map(|(row, emp)| {
                let off = schedule.rest_count(row);
                match off.cmp(&emp.rest_quota) {
                    std::cmp::Ordering::Equal => QuotaStatus::Satisfied,
                    std::cmp::Ordering::Less => QuotaStatus::Short(emp.rest_quota - off),
                    std::cmp::Ordering::Greater => QuotaStatus::Over(off - emp.rest_quota),
                }
            })
            .collect();
        Self { statuses }
    }

    pub fn is_satisfied(&self) -> bool {
        self.statuses.iter().all(|s| *s == QuotaStatus::Satisfied)
    }

    /// Rows whose quota could not be met.
    pub fn unsatisfied(&self) -> impl Iterator<Item = (usize, QuotaStatus)> + '_ {
        self.statuses
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, s)| *s != QuotaStatus::Satisfied)
    }
}

/// Day indices in `row` holding `state`.
fn positions(row: &[Cell], state: Cell) -> Vec<usize> {
    row.iter()
        .enumerate()
        .filter(|&(_, &c)| c == state)
        .map(|(d, _)| d)
        .collect()
}

/// Sets up to `amount` randomly chosen cells of `from` to `to`.
fn convert<R: Rng>(row: &mut [Cell], from: Cell, to: Cell, amount: usize, rng: &mut R) -> usize {
    let candidates = positions(row, from);
    let amount = amount.min(candidates.len());
    for i in index::sample(rng, candidates.len(), amount) {
        row[candidates[i]] = to;
    }
    amount
}

/// Builds one starting schedule.
///
/// Copies the base schedule and, per employee, turns
/// `quota − fixed days` randomly chosen work cells into rest. When fewer
/// work cells are available, all of them become rest.
pub fn seed_individual<R: Rng>(input: &PlanningInput, rng: &mut R) -> Schedule {
    let mut schedule = input.base().clone();
    for (row, emp) in input.employees().iter().enumerate() {
        let need = emp.rest_quota.saturating_sub(schedule.rest_count(row));
        convert(schedule.row_mut(row), Cell::Work, Cell::Rest, need, rng);
    }
    schedule
}

/// Restores every employee's non-work count to their quota.
///
/// Over quota, random [`Cell::Rest`] cells become work; under quota,
/// random [`Cell::Work`] cells become rest. Whatever cannot be fixed is
/// left in place and reported.
pub fn repair<R: Rng>(schedule: &mut Schedule, input: &PlanningInput, rng: &mut R) -> RepairReport {
    for (row, emp) in input.employees().iter().enumerate() {
        let off = schedule.rest_count(row);
        let quota = emp.rest_quota;
        if off > quota {
            convert(schedule.row_mut(row), Cell::Rest, Cell::Work, off - quota, rng);
        } else if off < quota {
            convert(schedule.row_mut(row), Cell::Work, Cell::Rest, quota - off, rng);
        }
    }
    RepairReport::inspect(schedule, input)
}

/// Uniform crossover over the flattened matrix.
///
/// Cells equal in both parents are inherited as-is. For a differing cell,
/// child 1 takes parent `a`'s value with probability `rate` (else `b`'s)
/// and child 2 takes the other one.
///
/// # Panics
/// Panics if the parents have different shapes.
pub fn uniform_crossover<R: Rng>(
    a: &Schedule,
    b: &Schedule,
    rate: f64,
    rng: &mut R,
) -> (Schedule, Schedule) {
    assert_eq!(
        (a.employees(), a.days()),
        (b.employees(), b.days()),
        "parents must have equal shape"
    );
    let mut c1 = a.clone();
    let mut c2 = b.clone();
    let pairs = c1.cells_mut().iter_mut().zip(c2.cells_mut().iter_mut());
    for (x, y) in pairs {
        if x == y {
            continue;
        }
        if rng.random::<f64>() >= rate {
            std::mem::swap(x, y);
        }
    }
    (c1, c2)
}

/// Flips a random sample of cells between work and rest.
///
/// With probability `rate` the schedule is mutated: `max(1, ⌊cells ×
/// gene_ratio⌋)` distinct cells are drawn from the whole matrix and each
/// work/rest cell among them is flipped; fixed cells in the sample are
/// skipped. Returns whether the mutation fired.
pub fn mutate<R: Rng>(schedule: &mut Schedule, rate: f64, gene_ratio: f64, rng: &mut R) -> bool {
    if rng.random::<f64>() >= rate {
        return false;
    }
    let cells = schedule.cells_mut();
    if cells.is_empty() {
        return false;
    }
    let amount = ((cells.len() as f64 * gene_ratio) as usize).clamp(1, cells.len());
    for i in index::sample(rng, cells.len(), amount) {
        if let Some(flipped) = cells[i].flipped() {
            cells[i] = flipped;
        }
    }
    true
}
