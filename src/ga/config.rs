//! GA configuration.
//!
//! [`GaConfig`] holds every parameter of the evolutionary loop. It
//! deserializes with per-field defaults, so a partial JSON object is a
//! valid configuration.

use crate::error::ShiftError;
use serde::{Deserialize, Serialize};

/// Configuration for the rest-day GA.
///
/// # Defaults
///
/// ```
/// use u_shift::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.initial_population, 100);
/// assert_eq!(config.elite_count, 20);
/// assert_eq!(config.generations, 50);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_shift::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_generations(200)
///     .with_mutation_rate(0.1)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaConfig {
    /// Number of seeded individuals in generation zero.
    pub initial_population: usize,

    /// Number of top individuals kept as parents each generation.
    ///
    /// Every unordered pair of elites breeds two children, so the
    /// population after the first generation is roughly
    /// `elite_count + elite_count × (elite_count − 1)`.
    pub elite_count: usize,

    /// Number of generations to run.
    pub generations: usize,

    /// Probability that a differing cell is taken from the first parent.
    pub crossover_rate: f64,

    /// Probability that a child is mutated at all.
    pub mutation_rate: f64,

    /// Fraction of all cells picked for flipping when a mutation fires.
    pub mutation_gene_ratio: f64,

    /// Random seed for reproducibility. `None` draws one from entropy.
    pub seed: Option<u64>,

    /// Score batches with rayon. Needs the `parallel` feature; ignored
    /// otherwise.
    pub parallel: bool,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            initial_population: 100,
            elite_count: 20,
            generations: 50,
            crossover_rate: 0.5,
            mutation_rate: 0.05,
            mutation_gene_ratio: 0.1,
            seed: None,
            parallel: false,
        }
    }
}

impl GaConfig {
    pub fn with_initial_population(mut self, n: usize) -> Self {
        self.initial_population = n;
        self
    }

    pub fn with_elite_count(mut self, n: usize) -> Self {
        self.elite_count = n;
        self
    }

    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the crossover rate, clamped to `[0, 1]`.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate, clamped to `[0, 1]`.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutated cell fraction, clamped to `[0, 1]`.
    pub fn with_mutation_gene_ratio(mut self, ratio: f64) -> Self {
        self.mutation_gene_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Preset for quick drafts: small population, few generations.
    ///
    /// - Population: 50, Elites: 10, Generations: 20
    pub fn fast() -> Self {
        Self {
            initial_population: 50,
            elite_count: 10,
            generations: 20,
            ..Self::default()
        }
    }

    /// Preset for final rosters: larger population, many generations.
    ///
    /// - Population: 200, Elites: 30, Generations: 150
    pub fn quality() -> Self {
        Self {
            initial_population: 200,
            elite_count: 30,
            generations: 150,
            ..Self::default()
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// [`ShiftError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ShiftError> {
        if self.initial_population < 2 {
            return Err(ShiftError::InvalidConfig(
                "initial_population must be at least 2".into(),
            ));
        }
        if self.elite_count < 2 {
            return Err(ShiftError::InvalidConfig(
                "elite_count must be at least 2".into(),
            ));
        }
        if self.generations == 0 {
            return Err(ShiftError::InvalidConfig(
                "generations must be at least 1".into(),
            ));
        }
        for (name, value) in [
            ("crossover_rate", self.crossover_rate),
            ("mutation_rate", self.mutation_rate),
            ("mutation_gene_ratio", self.mutation_gene_ratio),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ShiftError::InvalidConfig(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GaConfig::default();
        assert_eq!(config.initial_population, 100);
        assert_eq!(config.elite_count, 20);
        assert_eq!(config.generations, 50);
        assert!((config.crossover_rate - 0.5).abs() < 1e-10);
        assert!((config.mutation_rate - 0.05).abs() < 1e-10);
        assert!((config.mutation_gene_ratio - 0.1).abs() < 1e-10);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_clamps_rates() {
        let config = GaConfig::default()
            .with_crossover_rate(1.5)
            .with_mutation_rate(-0.2)
            .with_mutation_gene_ratio(3.0);
        assert_eq!(config.crossover_rate, 1.0);
        assert_eq!(config.mutation_rate, 0.0);
        assert_eq!(config.mutation_gene_ratio, 1.0);
    }

    #[test]
    fn test_validate_rejects_small_sizes() {
        assert!(GaConfig::default().with_initial_population(1).validate().is_err());
        assert!(GaConfig::default().with_elite_count(1).validate().is_err());
        assert!(GaConfig::default().with_generations(0).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_raw_out_of_range_rate() {
        let config = GaConfig {
            mutation_rate: 2.0,
            ..GaConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("mutation_rate"));
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(GaConfig::fast().validate().is_ok());
        assert!(GaConfig::quality().validate().is_ok());
        assert!(GaConfig::fast().generations < GaConfig::quality().generations);
    }

    #[test]
    fn test_partial_json() {
        let config: GaConfig = serde_json::from_str(r#"{"generations": 10, "seed": 3}"#).unwrap();
        assert_eq!(config.generations, 10);
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.elite_count, 20);
    }
}
