//! Initial population construction.

use rand::Rng;

use super::fitness::evaluate;
use super::types::{Individual, Population, Tour};
use crate::distance::DistanceSource;
use crate::error::{Result, TspError};
use crate::random::shuffle;

/// Hard cap on the population size.
pub const MAX_POPULATION: usize = u32::MAX as usize;

/// Population sizes above this trigger a memory warning.
const LARGE_POPULATION: usize = 1_000_000;

/// Population size for `city_count` cities: `ceil(C! / 10)`, capped at
/// [`MAX_POPULATION`].
///
/// Degenerate inputs still give one individual (`0! = 1! = 1`).
///
/// ```
/// use u_salesman::ga::population_size;
///
/// assert_eq!(population_size(4), 3);   // 24 / 10
/// assert_eq!(population_size(5), 12);  // 120 / 10
/// assert_eq!(population_size(0), 1);
/// ```
pub fn population_size(city_count: usize) -> usize {
    let cap = MAX_POPULATION as u64;
    let mut factorial: u64 = 1;
    for k in 2..=city_count as u64 {
        factorial = factorial.saturating_mul(k);
        if factorial / 10 >= cap {
            return MAX_POPULATION;
        }
    }
    factorial.div_ceil(10).min(cap) as usize
}

/// Creates and evaluates `min(population_size(city_count), limit)` random
/// tours.
///
/// Every tour is a uniform shuffle of `0..city_count` closed back to its
/// first city. Lengths are computed against `distances`, so a missing pair
/// surfaces here.
pub fn initialize_population<D, R>(
    city_count: usize,
    distances: &D,
    limit: usize,
    rng: &mut R,
) -> Result<Population>
where
    D: DistanceSource + ?Sized,
    R: Rng,
{
    if city_count > distances.city_count() {
        return Err(TspError::CityIndexOutOfRange {
            index: city_count.saturating_sub(1),
            count: distances.city_count(),
        });
    }

    let size = population_size(city_count).min(limit.max(1));
    log::info!("cities: {city_count}, population size: {size}");
    if size > LARGE_POPULATION {
        log::warn!(
            "population of {size} tours for {city_count} cities; consider a population limit"
        );
    }

    let mut order: Vec<usize> = (0..city_count).collect();
    let mut individuals = Vec::with_capacity(size);
    for _ in 0..size {
        shuffle(&mut order, rng);
        let mut individual = Individual::new(Tour::closed(order.clone()));
        evaluate(&mut individual, distances)?;
        individuals.push(individual);
    }

    Ok(Population::new(individuals))
}
