//! GA evolutionary loop execution.
//!
//! [`ShiftRunner`] orchestrates the complete run:
//! seeding → evaluation → (elite selection → pairwise breeding → repair →
//! evaluation)* → result.

use super::config::GaConfig;
use super::operators::{mutate, repair, seed_individual, uniform_crossover, RepairReport};
use super::types::{ElitePool, GenerationStats, Individual};
use crate::constraints::CompiledConstraint;
use crate::error::ShiftError;
use crate::evaluation::score;
use crate::model::{PlanningInput, Schedule};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Result of a GA optimization run.
#[derive(Debug, Clone, Serialize)]
pub struct ShiftResult {
    /// The best schedule found during the entire run.
    pub best: Schedule,

    /// Score of `best` (`-total_penalty`).
    pub best_score: f64,

    /// Best-ever score after each generation; non-decreasing.
    pub score_history: Vec<f64>,

    /// Number of generations executed.
    pub generations: usize,

    /// Whether the run was stopped by its cancellation token.
    pub cancelled: bool,

    /// Quota status of `best`.
    pub quotas: RepairReport,
}

/// Executes the GA loop.
///
/// # Usage
///
/// ```
/// use u_shift::constraints::{ConstraintRegistry, ConstraintSet};
/// use u_shift::ga::{GaConfig, ShiftRunner};
/// use u_shift::model::{EmployeeInfo, PlanningInput};
///
/// let employees: Vec<_> = (0..3)
///     .map(|i| EmployeeInfo::new(i, format!("E{i}"), 2))
///     .collect();
/// let base = PlanningInput::base_from_employees(&employees, 7);
/// let input = PlanningInput::new(employees, base, vec![2; 7]).unwrap();
/// let constraints = ConstraintRegistry::with_builtins()
///     .compile_set(&ConstraintSet::default_set())
///     .unwrap();
///
/// let config = GaConfig::fast().with_seed(42);
/// let result = ShiftRunner::run(&input, &constraints, &config).unwrap();
/// assert_eq!(result.score_history.len(), result.generations);
/// assert!(result.quotas.is_satisfied());
/// ```
pub struct ShiftRunner;

impl ShiftRunner {
    /// Runs the GA with an RNG seeded from `config.seed` (or entropy).
    ///
    /// # Errors
    /// [`ShiftError::InvalidConfig`] if `config` fails validation.
    pub fn run(
        input: &PlanningInput,
        constraints: &[CompiledConstraint],
        config: &GaConfig,
    ) -> Result<ShiftResult, ShiftError> {
        let mut rng = seeded_rng(config);
        evolve(input, constraints, config, &mut rng, |_| {}, None)
    }

    /// Runs the GA drawing all randomness from `rng`.
    pub fn run_with_rng<R: Rng>(
        input: &PlanningInput,
        constraints: &[CompiledConstraint],
        config: &GaConfig,
        rng: &mut R,
    ) -> Result<ShiftResult, ShiftError> {
        evolve(input, constraints, config, rng, |_| {}, None)
    }

    /// Runs the GA, calling `progress` once per generation.
    pub fn run_with_progress<F>(
        input: &PlanningInput,
        constraints: &[CompiledConstraint],
        config: &GaConfig,
        progress: F,
    ) -> Result<ShiftResult, ShiftError>
    where
        F: FnMut(&GenerationStats),
    {
        let mut rng = seeded_rng(config);
        evolve(input, constraints, config, &mut rng, progress, None)
    }

    /// Runs the GA with a cancellation token.
    ///
    /// The flag is checked at the start of every generation. Once set, the
    /// run stops and returns the best schedule found so far with
    /// `cancelled = true`.
    pub fn run_with_cancel(
        input: &PlanningInput,
        constraints: &[CompiledConstraint],
        config: &GaConfig,
        cancel: Arc<AtomicBool>,
    ) -> Result<ShiftResult, ShiftError> {
        let mut rng = seeded_rng(config);
        evolve(input, constraints, config, &mut rng, |_| {}, Some(&cancel))
    }
}

fn seeded_rng(config: &GaConfig) -> StdRng {
    StdRng::seed_from_u64(config.seed.unwrap_or_else(rand::random))
}

fn evolve<R, F>(
    input: &PlanningInput,
    constraints: &[CompiledConstraint],
    config: &GaConfig,
    rng: &mut R,
    mut progress: F,
    cancel: Option<&AtomicBool>,
) -> Result<ShiftResult, ShiftError>
where
    R: Rng,
    F: FnMut(&GenerationStats),
{
    config.validate()?;

    for (row, quota, fixed, free) in input.infeasible_quotas() {
        warn!(
            employee = %input.employees()[row].name,
            quota, fixed, free,
            "rest quota cannot be met exactly"
        );
    }
    info!(
        employees = input.employee_count(),
        days = input.days(),
        constraints = constraints.len(),
        population = config.initial_population,
        generations = config.generations,
        "starting shift optimization"
    );

    // 1. Seed and score the initial population
    let seeded: Vec<Schedule> = (0..config.initial_population)
        .map(|_| {
            let mut s = seed_individual(input, rng);
            repair(&mut s, input, rng);
            s
        })
        .collect();
    let mut population = score_batch(seeded, input, constraints, config.parallel);

    let mut top: Option<Individual> = None;
    let mut score_history = Vec::with_capacity(config.generations);
    let mut cancelled = false;

    // 2. Evolutionary loop
    for gen in 0..config.generations {
        if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
            cancelled = true;
            break;
        }

        population.sort_by(|a, b| b.score.total_cmp(&a.score));
        let generation_best = population[0].clone();

        let mut pool = ElitePool::new(config.elite_count + 1);
        for ind in population.drain(..).take(config.elite_count) {
            pool.push(ind);
        }

        let improved = top
            .as_ref()
            .map_or(true, |t| generation_best.score > t.score);
        if improved {
            top = Some(generation_best.clone());
        } else if let Some(t) = top.as_ref() {
            pool.push(t.clone());
        }
        let best = top.as_ref().map_or(generation_best.score, |t| t.score);
        score_history.push(best);

        let stats = GenerationStats {
            generation: gen + 1,
            generation_best: generation_best.score,
            best,
            parents: pool.len(),
        };
        debug!(
            generation = stats.generation,
            generation_best = stats.generation_best,
            best = stats.best,
            parents = stats.parents,
            "generation complete"
        );
        progress(&stats);

        // Every unordered elite pair breeds two children
        let mut offspring = Vec::with_capacity(pool.len() * pool.len().saturating_sub(1));
        for (a, b) in pool.pairs() {
            let (mut c1, mut c2) =
                uniform_crossover(&a.schedule, &b.schedule, config.crossover_rate, rng);
            for child in [&mut c1, &mut c2] {
                mutate(child, config.mutation_rate, config.mutation_gene_ratio, rng);
                repair(child, input, rng);
            }
            offspring.push(c1);
            offspring.push(c2);
        }
        let children = score_batch(offspring, input, constraints, config.parallel);

        population = pool.into_members();
        population.extend(children);
    }

    // 3. Best of the top individual and the final population
    let last_best = population
        .iter()
        .max_by(|a, b| a.score.total_cmp(&b.score))
        .cloned();
    let best = match (top, last_best) {
        (Some(t), Some(l)) if l.score > t.score => l,
        (Some(t), _) => t,
        (None, Some(l)) => l,
        (None, None) => {
            return Err(ShiftError::InvalidConfig("population is empty".into()))
        }
    };

    let quotas = RepairReport::inspect(&best.schedule, input);
    info!(
        best_score = best.score,
        generations = score_history.len(),
        cancelled,
        "shift optimization finished"
    );

    Ok(ShiftResult {
        best_score: best.score,
        best: best.schedule,
        generations: score_history.len(),
        score_history,
        cancelled,
        quotas,
    })
}

/// Scores a batch of schedules, in parallel when enabled.
fn score_batch(
    schedules: Vec<Schedule>,
    input: &PlanningInput,
    constraints: &[CompiledConstraint],
    parallel: bool,
) -> Vec<Individual> {
    #[cfg(feature = "parallel")]
    if parallel {
        return schedules
            .into_par_iter()
            .map(|s| Individual::new(score(&s, input, constraints), s))
            .collect();
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    schedules
        .into_iter()
        .map(|s| Individual::new(score(&s, input, constraints), s))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
