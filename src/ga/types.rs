//! Population members and per-generation statistics.

use crate::model::Schedule;
use serde::Serialize;

/// A scored candidate schedule.
///
/// `score = -total_penalty`; higher is better and `0.0` means no rule
/// fired (bonuses can push it above zero).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Individual {
    pub score: f64,
    pub schedule: Schedule,
}

impl Individual {
    pub fn new(score: f64, schedule: Schedule) -> Self {
        Self { score, schedule }
    }
}

/// Snapshot passed to the progress callback after selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerationStats {
    /// 1-based generation number.
    pub generation: usize,
    /// Best score among this generation's population.
    pub generation_best: f64,
    /// Best score seen so far.
    pub best: f64,
    /// Size of the parent pool bred from.
    pub parents: usize,
}

/// The parents of the next generation.
///
/// Holds at most `capacity` individuals: the top `elite_count` of the
/// current population plus the best-ever individual whenever this
/// generation did not improve on it.
#[derive(Debug, Clone)]
pub struct ElitePool {
    capacity: usize,
    members: Vec<Individual>,
}

impl ElitePool {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            members: Vec::with_capacity(capacity),
        }
    }

    /// Adds an individual; returns `false` when the pool is already full.
    pub fn push(&mut self, individual: Individual) -> bool {
        if self.members.len() >= self.capacity {
            return false;
        }
        self.members.push(individual);
        true
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> &[Individual] {
        &self.members
    }

    /// Every unordered pair `(i, j)` with `i < j`.
    pub fn pairs(&self) -> impl Iterator<Item = (&Individual, &Individual)> {
        let m = &self.members;
        (0..m.len()).flat_map(move |i| (i + 1..m.len()).map(move |j| (&m[i], &m[j])))
    }

    pub fn into_members(self) -> Vec<Individual> {
        self.members
    }
}
