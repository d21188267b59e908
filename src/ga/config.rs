//! GA configuration.
//!
//! [`GaConfig`] holds the parameters that control the evolutionary loop.

use crate::error::{Result, TspError};

/// Configuration for the tour search.
///
/// # Defaults
///
/// ```
/// use u_salesman::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.generations, 20_000);
/// assert_eq!(config.elite_count, 2);
/// assert!((config.mutation_probability - 0.05).abs() < 1e-12);
/// assert_eq!(config.top_n, 20);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_salesman::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_generations(500)
///     .with_elite_count(4)
///     .with_mutation_probability(0.1)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GaConfig {
    /// Number of generations to run.
    pub generations: usize,

    /// Number of shortest tours copied unchanged into the next generation.
    ///
    /// Clamped to the population size at run time.
    pub elite_count: usize,

    /// Per-roll probability of applying another swap to a child (0.0–1.0,
    /// exclusive).
    ///
    /// Rolls repeat until one fails, so a child receives a geometrically
    /// distributed number of swaps.
    pub mutation_probability: f64,

    /// Number of tours returned by the final ranking.
    pub top_n: usize,

    /// Upper bound on the population size.
    ///
    /// The size is `ceil(C! / 10)` for `C` cities, capped by this value.
    pub population_limit: usize,

    /// Log progress every this many generations. 0 disables progress logs.
    pub progress_interval: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            generations: 20_000,
            elite_count: 2,
            mutation_probability: 0.05,
            top_n: 20,
            population_limit: u32::MAX as usize,
            progress_interval: 1_000,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the elite count.
    pub fn with_elite_count(mut self, n: usize) -> Self {
        self.elite_count = n;
        self
    }

    /// Sets the mutation trigger probability.
    pub fn with_mutation_probability(mut self, p: f64) -> Self {
        self.mutation_probability = p;
        self
    }

    /// Sets how many ranked tours are reported.
    pub fn with_top_n(mut self, n: usize) -> Self {
        self.top_n = n;
        self
    }

    /// Sets the population size cap.
    pub fn with_population_limit(mut self, limit: usize) -> Self {
        self.population_limit = limit;
        self
    }

    /// Sets the progress logging interval (0 to disable).
    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.mutation_probability) {
            return Err(TspError::InvalidConfig(format!(
                "mutation_probability must be in [0, 1), got {}",
                self.mutation_probability
            )));
        }
        if self.population_limit == 0 {
            return Err(TspError::InvalidConfig(
                "population_limit must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
