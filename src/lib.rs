//! Genetic-algorithm search for short round trips through a set of cities.
//!
//! Solves small-to-moderate travelling-salesman instances approximately:
//!
//! - **Distances**: symmetric distances stored once per pair, behind the
//!   [`DistanceSource`](distance::DistanceSource) trait.
//! - **Cities**: a named, insertion-ordered registry that owns the distance
//!   table.
//! - **Genetic Algorithm (GA)**: factorial-sized random population, roulette
//!   wheel selection, pivot crossover, swap mutation and elitism over a fixed
//!   number of generations.
//!
//! # Example
//!
//! ```
//! use u_salesman::cities::CityRegistry;
//! use u_salesman::ga::{EvolutionEngine, GaConfig};
//!
//! let cities = CityRegistry::from_distance_list(&[10.0, 15.0, 20.0, 12.0, 8.0, 9.0]).unwrap();
//! let config = GaConfig::default().with_generations(200).with_seed(7);
//! let report = EvolutionEngine::new(config).unwrap().run(&cities).unwrap();
//!
//! let best = report.best().unwrap();
//! assert!(best.tour.validate(4).is_ok());
//! ```

pub mod cities;
pub mod distance;
mod error;
pub mod ga;
pub mod random;

pub use error::{Result, TspError};
