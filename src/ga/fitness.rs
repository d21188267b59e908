//! Tour length evaluation.

use super::types::{Individual, Population, Tour};
use crate::distance::DistanceSource;
use crate::error::Result;

/// Total length of a closed tour, closing edge included.
///
/// Consecutive repeats of the same city (the single-city tour `[0, 0]`)
/// contribute nothing. A pair without a stored distance aborts with
/// [`TspError::MissingDistance`](crate::TspError::MissingDistance).
///
/// # Examples
///
/// ```
/// use u_salesman::distance::TriangularDistances;
/// use u_salesman::ga::{tour_length, Tour};
///
/// let table = TriangularDistances::from_lower_triangle(&[10.0, 15.0, 20.0]).unwrap();
/// let tour = Tour::closed(vec![0, 1, 2]);
/// assert_eq!(tour_length(&tour, &table).unwrap(), 45.0);
/// ```
pub fn tour_length<D: DistanceSource + ?Sized>(tour: &Tour, distances: &D) -> Result<f64> {
    tour.edges()
        .filter(|(a, b)| a != b)
        .try_fold(0.0, |total, (a, b)| -> Result<f64> {
            Ok(total + distances.distance(a, b)?)
        })
}

/// Computes and caches the length of one individual.
pub fn evaluate<D: DistanceSource + ?Sized>(
    individual: &mut Individual,
    distances: &D,
) -> Result<f64> {
    let length = tour_length(individual.tour(), distances)?;
    individual.set_length(length);
    Ok(length)
}

/// Evaluates every individual of the population in order.
pub fn evaluate_population<D: DistanceSource + ?Sized>(
    population: &mut Population,
    distances: &D,
) -> Result<()> {
    for individual in population.individuals_mut() {
        evaluate(individual, distances)?;
    }
    Ok(())
}
