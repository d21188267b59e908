//! Fitness-proportionate (roulette wheel) parent selection.
//!
//! Each individual gets a slice of the wheel proportional to its fitness
//! `1 / length`. The wheel is built once per generation as a cumulative table
//! normalized by the total fitness; each spin is then a binary search.
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*, ch. 1
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use rand::Rng;

use super::types::Population;
use crate::error::{Result, TspError};

/// Cumulative, normalized selection table.
///
/// # Examples
///
/// ```
/// use u_salesman::ga::RouletteWheel;
///
/// let wheel = RouletteWheel::from_weights(&[0.1, 0.3, 0.6]).unwrap();
/// assert_eq!(wheel.pick(0.05), 0);
/// assert_eq!(wheel.pick(0.25), 1);
/// assert_eq!(wheel.pick(0.99), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RouletteWheel {
    cumulative: Vec<f64>,
}

impl RouletteWheel {
    /// Builds a wheel from raw non-negative weights.
    ///
    /// Fails if the list is empty, a weight is negative or not finite, or all
    /// weights are zero.
    pub fn from_weights(weights: &[f64]) -> Result<Self> {
        if weights.is_empty() {
            return Err(TspError::EmptyPopulation);
        }

        let mut cumulative = Vec::with_capacity(weights.len());
        let mut running = 0.0;
        for (position, &weight) in weights.iter().enumerate() {
            if !weight.is_finite() || weight < 0.0 {
                return Err(TspError::InvalidWeight { position, weight });
            }
            running += weight;
            cumulative.push(running);
        }

        let total = running;
        if total <= 0.0 || !total.is_finite() {
            return Err(TspError::InvalidWeight {
                position: weights.len() - 1,
                weight: total,
            });
        }
        for c in &mut cumulative {
            *c /= total;
        }

        Ok(Self { cumulative })
    }

    /// Builds a wheel over an evaluated population, weighting by `1 / length`.
    ///
    /// A zero-length tour would take the whole wheel and is rejected as
    /// [`TspError::DegenerateFitness`].
    pub fn from_population(population: &Population) -> Result<Self> {
        let weights = population
            .iter()
            .enumerate()
            .map(|(position, individual)| {
                let length = individual
                    .length()
                    .ok_or(TspError::NotEvaluated { position })?;
                if length > 0.0 && length.is_finite() {
                    Ok(length.recip())
                } else {
                    Err(TspError::DegenerateFitness { length })
                }
            })
            .collect::<Result<Vec<f64>>>()?;

        Self::from_weights(&weights)
    }

    /// Returns the first position whose cumulative weight is `>= sample`.
    ///
    /// Equal cumulative weights resolve to the earliest position. Samples
    /// beyond the last cumulative value (floating-point drift) select the
    /// last position.
    pub fn pick(&self, sample: f64) -> usize {
        let idx = self.cumulative.partition_point(|&c| c < sample);
        idx.min(self.cumulative.len() - 1)
    }

    /// Draws a uniform sample in `[0, 1)` and picks a position.
    pub fn spin<R: Rng>(&self, rng: &mut R) -> usize {
        self.pick(rng.random::<f64>())
    }

    /// Draws two independent parents (possibly the same one).
    pub fn spin_pair<R: Rng>(&self, rng: &mut R) -> (usize, usize) {
        (self.spin(rng), self.spin(rng))
    }

    /// Normalized cumulative weights, ending at (approximately) `1.0`.
    pub fn cumulative(&self) -> &[f64] {
        &self.cumulative
    }

    pub fn len(&self) -> usize {
        self.cumulative.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cumulative.is_empty()
    }
}
