//! Tour, individual and population types.
//!
//! A [`Tour`] is a closed visiting order: every city appears once, then the
//! first city is repeated to close the cycle. An [`Individual`] pairs a tour
//! with its cached length, and a [`Population`] is the fixed-size collection
//! the evolutionary loop replaces each generation.

use crate::error::{Result, TspError};

/// A closed tour over cities `0..n`.
///
/// The stored sequence has length `n + 1` and its last element equals the
/// first. The empty tour (no cities) is represented by an empty sequence.
///
/// # Examples
///
/// ```
/// use u_salesman::ga::Tour;
///
/// let tour = Tour::closed(vec![2, 0, 1]);
/// assert_eq!(tour.cities(), &[2, 0, 1, 2]);
/// assert_eq!(tour.order(), &[2, 0, 1]);
/// assert_eq!(tour.city_count(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tour(Vec<usize>);

impl Tour {
    /// Closes a visiting order by re-appending its first city.
    pub fn closed(mut order: Vec<usize>) -> Self {
        if let Some(&first) = order.first() {
            order.push(first);
        }
        Self(order)
    }

    /// Wraps an already closed sequence after checking the tour invariant.
    pub fn from_cycle(cities: Vec<usize>) -> Result<Self> {
        let tour = Self(cities);
        tour.validate(tour.city_count())?;
        Ok(tour)
    }

    /// The full closed sequence, including the repeated first city.
    pub fn cities(&self) -> &[usize] {
        &self.0
    }

    /// The visiting order without the closing city.
    pub fn order(&self) -> &[usize] {
        match self.0.len() {
            0 => &self.0,
            len => &self.0[..len - 1],
        }
    }

    /// Number of distinct cities visited.
    pub fn city_count(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    /// Consecutive city pairs, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.0.windows(2).map(|w| (w[0], w[1]))
    }

    /// Swaps the cities at two non-closing positions.
    ///
    /// When position 0 takes part, the closing element follows the new first
    /// city so the cycle stays closed.
    ///
    /// # Panics
    /// Panics if either position is not below [`city_count`](Self::city_count).
    pub fn swap(&mut self, i: usize, j: usize) {
        let n = self.city_count();
        assert!(i < n && j < n, "swap positions {i}, {j} out of range for {n} cities");
        self.0.swap(i, j);
        if i == 0 || j == 0 {
            self.0[n] = self.0[0];
        }
    }

    /// Checks that the tour visits each of `0..expected` exactly once and is
    /// closed.
    pub fn validate(&self, expected: usize) -> Result<()> {
        if self.0.is_empty() {
            return if expected == 0 {
                Ok(())
            } else {
                Err(TspError::invalid_tour(format!(
                    "empty tour, expected {expected} cities"
                )))
            };
        }
        if self.city_count() != expected {
            return Err(TspError::invalid_tour(format!(
                "tour visits {} positions, expected {expected}",
                self.city_count()
            )));
        }
        let first = self.0[0];
        let last = self.0[self.0.len() - 1];
        if first != last {
            return Err(TspError::invalid_tour(format!(
                "tour is not closed: starts at {first}, ends at {last}"
            )));
        }
        let mut seen = vec![false; expected];
        for &city in self.order() {
            match seen.get_mut(city) {
                Some(slot) if !*slot => *slot = true,
                Some(_) => {
                    return Err(TspError::invalid_tour(format!("city {city} visited twice")))
                }
                None => {
                    return Err(TspError::invalid_tour(format!(
                        "city {city} is not below {expected}"
                    )))
                }
            }
        }
        Ok(())
    }

    /// Consumes the tour, returning the closed sequence.
    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }
}

impl std::fmt::Display for Tour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for city in &self.0 {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{city}")?;
            first = false;
        }
        Ok(())
    }
}

/// One candidate solution: a tour and its cached length.
///
/// The length is `None` until the individual has been evaluated. Fitness is
/// the reciprocal of the length, so shorter tours are fitter.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Individual {
    tour: Tour,
    length: Option<f64>,
}

impl Individual {
    /// Creates an unevaluated individual.
    pub fn new(tour: Tour) -> Self {
        Self { tour, length: None }
    }

    pub fn tour(&self) -> &Tour {
        &self.tour
    }

    /// Cached tour length, if evaluated.
    pub fn length(&self) -> Option<f64> {
        self.length
    }

    /// Selection weight `1 / length`, if evaluated.
    ///
    /// A zero length yields `f64::INFINITY`; the roulette wheel rejects it.
    pub fn fitness(&self) -> Option<f64> {
        self.length.map(f64::recip)
    }

    /// Stores a freshly computed tour length.
    pub fn set_length(&mut self, length: f64) {
        self.length = Some(length);
    }

    /// Returns `true` once a length has been computed.
    pub fn is_evaluated(&self) -> bool {
        self.length.is_some()
    }

    pub fn into_tour(self) -> Tour {
        self.tour
    }
}

/// Fixed-size ordered collection of individuals.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    pub fn new(individuals: Vec<Individual>) -> Self {
        Self { individuals }
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    pub(crate) fn individuals_mut(&mut self) -> &mut [Individual] {
        &mut self.individuals
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Individual> {
        self.individuals.iter()
    }

    /// Shortest cached length in the population.
    ///
    /// Unevaluated individuals are ignored; `None` if none are evaluated.
    pub fn best_length(&self) -> Option<f64> {
        self.individuals
            .iter()
            .filter_map(Individual::length)
            .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
    }

    pub fn into_individuals(self) -> Vec<Individual> {
        self.individuals
    }
}

impl From<Vec<Individual>> for Population {
    fn from(individuals: Vec<Individual>) -> Self {
        Self::new(individuals)
    }
}

impl FromIterator<Individual> for Population {
    fn from_iter<T: IntoIterator<Item = Individual>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a Individual;
    type IntoIter = std::slice::Iter<'a, Individual>;

    fn into_iter(self) -> Self::IntoIter {
        self.individuals.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_tour() {
        let tour = Tour::closed(vec![3, 1, 0, 2]);
        assert_eq!(tour.cities(), &[3, 1, 0, 2, 3]);
        assert_eq!(tour.city_count(), 4);
        assert!(tour.validate(4).is_ok());
    }

    #[test]
    fn test_degenerate_tours() {
        let empty = Tour::closed(vec![]);
        assert!(empty.cities().is_empty());
        assert_eq!(empty.city_count(), 0);
        assert!(empty.validate(0).is_ok());

        let single = Tour::closed(vec![0]);
        assert_eq!(single.cities(), &[0, 0]);
        assert_eq!(single.order(), &[0]);
        assert!(single.validate(1).is_ok());
    }

    #[test]
    fn test_edges_include_closing_edge() {
        let tour = Tour::closed(vec![0, 1, 2]);
        let edges: Vec<_> = tour.edges().collect();
        assert_eq!(edges, vec![(0, 1), (1, 2), (2, 0)]);
    }

    #[test]
    fn test_swap_first_position_updates_closure() {
        let mut tour = Tour::closed(vec![0, 1, 2, 3]);
        tour.swap(0, 2);
        assert_eq!(tour.cities(), &[2, 1, 0, 3, 2]);

        let mut tour = Tour::closed(vec![0, 1, 2, 3]);
        tour.swap(3, 0);
        assert_eq!(tour.cities(), &[3, 1, 2, 0, 3]);
    }

    #[test]
    fn test_swap_inner_positions_keeps_closure() {
        let mut tour = Tour::closed(vec![0, 1, 2, 3]);
        tour.swap(1, 3);
        assert_eq!(tour.cities(), &[0, 3, 2, 1, 0]);
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let err = Tour::from_cycle(vec![0, 1, 1, 0]).unwrap_err();
        assert!(matches!(err, TspError::InvalidTour(_)));
    }

    #[test]
    fn test_validate_rejects_open_tour() {
        assert!(Tour::from_cycle(vec![0, 1, 2, 1]).is_err());
    }

    #[test]
    fn test_validate_rejects_wrong_count() {
        let tour = Tour::closed(vec![0, 1, 2]);
        assert!(tour.validate(4).is_err());
    }

    #[test]
    fn test_fitness_is_reciprocal_length() {
        let mut ind = Individual::new(Tour::closed(vec![0, 1]));
        assert!(ind.fitness().is_none());
        ind.set_length(4.0);
        assert_eq!(ind.fitness(), Some(0.25));
    }

    #[test]
    fn test_best_length_skips_unevaluated() {
        let mut a = Individual::new(Tour::closed(vec![0, 1]));
        a.set_length(9.0);
        let b = Individual::new(Tour::closed(vec![1, 0]));
        let mut c = Individual::new(Tour::closed(vec![0, 1]));
        c.set_length(3.0);
        let pop = Population::new(vec![a, b, c]);
        assert_eq!(pop.best_length(), Some(3.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(Tour::closed(vec![1, 0, 2]).to_string(), "1 0 2 1");
    }
}
