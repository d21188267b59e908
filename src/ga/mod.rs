//! Genetic search for short closed tours.
//!
//! Each generation evaluates every tour, carries the shortest few forward
//! unchanged, and fills the rest of the population with children bred by
//! roulette selection, pivot crossover and repeated swap mutation. After the
//! last generation the population is ranked by tour length.
//!
//! # Key Types
//!
//! - [`Tour`], [`Individual`], [`Population`]: candidate solutions
//! - [`GaConfig`]: generations, elites, mutation probability, seed
//! - [`EvolutionEngine`]: executes the evolutionary loop
//! - [`RunReport`]: final ranking with per-generation statistics
//!
//! # Submodules
//!
//! - [`operators`]: pivot crossover and swap mutation
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Larrañaga et al. (1999), "Genetic Algorithms for the Travelling Salesman
//!   Problem: A Review of Representations and Operators"

mod config;
mod fitness;
pub mod operators;
mod population;
mod runner;
mod selection;
mod types;

pub use config::GaConfig;
pub use fitness::{evaluate, evaluate_population, tour_length};
pub use population::{initialize_population, population_size, MAX_POPULATION};
pub use runner::{top_n, Evolution, EvolutionEngine, RankedTour, RunReport};
pub use selection::RouletteWheel;
pub use types::{Individual, Population, Tour};
