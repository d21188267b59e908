//! GA evolutionary loop execution.
//!
//! [`EvolutionEngine`] orchestrates the complete evolutionary process:
//! initialization → evaluation → elitism → roulette selection → pivot
//! crossover → swap mutation → repeat, followed by a final ranking.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::rngs::StdRng;

use super::config::GaConfig;
use super::fitness::{evaluate_population, tour_length};
use super::operators::{mutate_repeatedly, pivot_crossover};
use super::population::initialize_population;
use super::selection::RouletteWheel;
use super::types::{Individual, Population, Tour};
use crate::distance::DistanceSource;
use crate::error::Result;
use crate::random::rng_from_seed;

/// One entry of the final ranking.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankedTour {
    pub tour: Tour,
    pub length: f64,
}

/// Outcome of the generational loop.
#[derive(Debug, Clone)]
pub struct Evolution {
    /// The last population, evaluated.
    pub population: Population,

    /// Number of generations actually produced.
    pub generations: usize,

    /// Whether the loop stopped because the cancel flag was raised.
    pub cancelled: bool,

    /// Shortest length in each evaluated population, starting with the one
    /// passed in.
    pub best_length_history: Vec<f64>,
}

/// Result of a full run: initialization, evolution and ranking.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Best tours of the final population, shortest first.
    pub ranking: Vec<RankedTour>,

    /// Size of the population used for the run.
    pub population_size: usize,

    /// Number of generations executed.
    pub generations: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Shortest length per generation (initial population first).
    pub best_length_history: Vec<f64>,
}

impl RunReport {
    /// The shortest tour found, if any.
    pub fn best(&self) -> Option<&RankedTour> {
        self.ranking.first()
    }
}

/// Executes the tour search.
///
/// The engine owns a single random generator seeded from
/// [`GaConfig::seed`], so two engines built from the same seeded
/// configuration produce identical runs.
///
/// # Usage
///
/// ```
/// use u_salesman::cities::CityRegistry;
/// use u_salesman::ga::{EvolutionEngine, GaConfig};
///
/// let cities = CityRegistry::reference();
/// let config = GaConfig::default()
///     .with_generations(50)
///     .with_top_n(3)
///     .with_seed(42);
/// let mut engine = EvolutionEngine::new(config).unwrap();
/// let report = engine.run(&cities).unwrap();
/// assert_eq!(report.ranking.len(), 3);
/// ```
#[derive(Debug)]
pub struct EvolutionEngine {
    config: GaConfig,
    rng: StdRng,
}

impl EvolutionEngine {
    /// Creates an engine after validating the configuration.
    pub fn new(config: GaConfig) -> Result<Self> {
        config.validate()?;
        let rng = rng_from_seed(config.seed);
        Ok(Self { config, rng })
    }

    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Builds the evaluated initial population for every city of `distances`.
    pub fn initialize_population<D: DistanceSource + ?Sized>(
        &mut self,
        distances: &D,
    ) -> Result<Population> {
        initialize_population(
            distances.city_count(),
            distances,
            self.config.population_limit,
            &mut self.rng,
        )
    }

    /// Runs initialization, the configured number of generations and the
    /// final ranking.
    pub fn run<D: DistanceSource + ?Sized>(&mut self, distances: &D) -> Result<RunReport> {
        self.run_with_cancel(distances, None)
    }

    /// Like [`run`](Self::run), stopping early once `cancel` is raised.
    pub fn run_with_cancel<D: DistanceSource + ?Sized>(
        &mut self,
        distances: &D,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<RunReport> {
        let population = self.initialize_population(distances)?;
        let population_size = population.len();

        let evolution = self.run_generations_with_cancel(population, distances, cancel)?;
        let ranking = top_n(evolution.population, distances, self.config.top_n)?;

        if let Some(best) = ranking.first() {
            log::info!(
                "finished after {} generations, best length {:.3}: {}",
                evolution.generations,
                best.length,
                best.tour
            );
        }

        Ok(RunReport {
            ranking,
            population_size,
            generations: evolution.generations,
            cancelled: evolution.cancelled,
            best_length_history: evolution.best_length_history,
        })
    }

    /// Evolves `population` for [`GaConfig::generations`] generations.
    pub fn run_generations<D: DistanceSource + ?Sized>(
        &mut self,
        population: Population,
        distances: &D,
    ) -> Result<Population> {
        self.run_generations_with_cancel(population, distances, None)
            .map(|evolution| evolution.population)
    }

    /// Evolves `population`, checking `cancel` between generations.
    ///
    /// Populations whose tours visit at most one city are already optimal
    /// and are returned after evaluation without running any generation.
    pub fn run_generations_with_cancel<D: DistanceSource + ?Sized>(
        &mut self,
        mut population: Population,
        distances: &D,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<Evolution> {
        let total = self.config.generations;
        let mut best_length_history = Vec::new();

        evaluate_population(&mut population, distances)?;
        best_length_history.extend(population.best_length());

        if is_trivial(&population) {
            log::debug!("tours visit at most one city, nothing to evolve");
            return Ok(Evolution {
                population,
                generations: 0,
                cancelled: false,
                best_length_history,
            });
        }

        let mut generations = 0;
        let mut cancelled = false;
        for generation in 0..total {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    log::info!("cancelled before generation {generation}");
                    cancelled = true;
                    break;
                }
            }

            let interval = self.config.progress_interval;
            if interval > 0 && generation % interval == 0 {
                log::info!(
                    "generation {generation}: best length {:.3}",
                    population.best_length().unwrap_or(f64::NAN)
                );
            }

            population = self.breed(&population)?;
            evaluate_population(&mut population, distances)?;
            best_length_history.extend(population.best_length());
            generations += 1;
        }

        Ok(Evolution {
            population,
            generations,
            cancelled,
            best_length_history,
        })
    }

    /// Evaluates `population` and produces the next generation from it.
    ///
    /// The returned population has the same size; its elites keep their
    /// lengths, every other individual is unevaluated.
    pub fn next_generation<D: DistanceSource + ?Sized>(
        &mut self,
        population: &mut Population,
        distances: &D,
    ) -> Result<Population> {
        evaluate_population(population, distances)?;
        if is_trivial(population) {
            return Ok(population.clone());
        }
        self.breed(population)
    }

    /// Elitism followed by roulette → crossover → mutation for every other
    /// slot. `population` must be evaluated.
    fn breed(&mut self, population: &Population) -> Result<Population> {
        let size = population.len();
        let elite_count = self.config.elite_count.min(size);

        let mut next: Vec<Individual> = Vec::with_capacity(size);
        next.extend(
            elite_positions(population, elite_count)
                .into_iter()
                .map(|i| population.individuals()[i].clone()),
        );
        if next.len() == size {
            return Ok(Population::new(next));
        }

        let wheel = RouletteWheel::from_population(population)?;
        let members = population.individuals();
        while next.len() < size {
            let (p, m) = wheel.spin_pair(&mut self.rng);
            let mut child = pivot_crossover(members[p].tour(), members[m].tour(), &mut self.rng)?;
            mutate_repeatedly(&mut child, self.config.mutation_probability, &mut self.rng);
            next.push(Individual::new(child));
        }

        Ok(Population::new(next))
    }
}

/// Ranks `population` by freshly computed tour length and keeps the `n`
/// shortest. Equal lengths keep population order.
pub fn top_n<D: DistanceSource + ?Sized>(
    population: Population,
    distances: &D,
    n: usize,
) -> Result<Vec<RankedTour>> {
    let mut ranked = population
        .into_individuals()
        .into_iter()
        .map(|individual| {
            let tour = individual.into_tour();
            let length = tour_length(&tour, distances)?;
            Ok(RankedTour { tour, length })
        })
        .collect::<Result<Vec<_>>>()?;

    ranked.sort_by(|a, b| a.length.total_cmp(&b.length));
    ranked.truncate(n);
    Ok(ranked)
}

/// Positions of the `k` shortest tours, shortest first. Ties go to the
/// earlier position.
fn elite_positions(population: &Population, k: usize) -> Vec<usize> {
    let lengths: Vec<f64> = population
        .iter()
        .map(|ind| ind.length().unwrap_or(f64::INFINITY))
        .collect();
    let mut positions: Vec<usize> = (0..lengths.len()).collect();
    positions.sort_by(|&a, &b| lengths[a].total_cmp(&lengths[b]));
    positions.truncate(k);
    positions
}

fn is_trivial(population: &Population) -> bool {
    population
        .iter()
        .all(|ind| ind.tour().city_count() <= 1)
}

// ============================================================================
// Tests
// ============================================================================
