//! Tour crossover and mutation operators.
//!
//! # Crossover
//!
//! - [`pivot_crossover`]: keeps the visiting order of one parent and moves a
//!   single pivot city to sit right after its predecessor in the other
//!   parent.
//!
//! # Mutation
//!
//! - [`swap_mutation`]: exchange two distinct positions, O(1)
//! - [`mutate_repeatedly`]: apply swaps while a per-roll trigger fires, so
//!   the number of swaps is geometrically distributed

use rand::Rng;

use super::types::Tour;
use crate::error::{Result, TspError};

// ============================================================================
// Crossover
// ============================================================================

/// Pivot crossover.
///
/// 1. Pick a pivot city uniformly from `parent`'s cities.
/// 2. Find the city that precedes the pivot in `parent`'s closed cycle.
/// 3. Copy `donor`'s visiting order, skipping the pivot, and insert the pivot
///    right after the predecessor.
/// 4. Close the tour.
///
/// The child is checked to visit every city exactly once. Parents over
/// different city sets fail with [`TspError::InvalidTour`]. Tours with fewer
/// than two cities have nothing to recombine and yield a copy of `donor`.
///
/// # Complexity
/// O(n) time, O(n) space
pub fn pivot_crossover<R: Rng>(parent: &Tour, donor: &Tour, rng: &mut R) -> Result<Tour> {
    let n = parent.city_count();
    if n != donor.city_count() {
        return Err(TspError::invalid_tour(format!(
            "parents visit {} and {} cities",
            n,
            donor.city_count()
        )));
    }
    if n < 2 {
        return Ok(donor.clone());
    }

    let pivot = parent.order()[rng.random_range(0..n)];
    let child = insert_after_predecessor(parent, donor, pivot)?;
    child.validate(n)?;
    Ok(child)
}

/// Rebuilds `donor` with `pivot` moved right after its predecessor in
/// `parent`.
fn insert_after_predecessor(parent: &Tour, donor: &Tour, pivot: usize) -> Result<Tour> {
    let order = parent.order();
    let position = order
        .iter()
        .position(|&city| city == pivot)
        .ok_or_else(|| TspError::invalid_tour(format!("pivot city {pivot} not in parent")))?;
    let predecessor = if position == 0 {
        order[order.len() - 1]
    } else {
        order[position - 1]
    };

    let mut child = Vec::with_capacity(order.len() + 1);
    for &city in donor.order() {
        if city == pivot {
            continue;
        }
        child.push(city);
        if city == predecessor {
            child.push(pivot);
        }
    }

    Ok(Tour::closed(child))
}

// ============================================================================
// Mutation
// ============================================================================

/// Swaps the cities at two distinct random positions.
///
/// The closing element is kept in sync when position 0 is involved. Tours
/// with fewer than two cities are left untouched.
pub fn swap_mutation<R: Rng>(tour: &mut Tour, rng: &mut R) {
    let n = tour.city_count();
    if n < 2 {
        return;
    }
    let i = rng.random_range(0..n);
    // Draw from the n - 1 other positions so i != j without rejection.
    let mut j = rng.random_range(0..n - 1);
    if j >= i {
        j += 1;
    }
    tour.swap(i, j);
}

/// Keeps applying [`swap_mutation`] while a fresh draw falls below
/// `probability`. Returns the number of swaps applied.
///
/// `probability` must be below `1.0` or this never returns;
/// [`GaConfig::validate`](super::GaConfig::validate) enforces that.
pub fn mutate_repeatedly<R: Rng>(tour: &mut Tour, probability: f64, rng: &mut R) -> usize {
    let mut applied = 0;
    while rng.random::<f64>() < probability {
        swap_mutation(tour, rng);
        applied += 1;
    }
    applied
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{create_rng, shuffle};
    use proptest::prelude::*;
    use rand::Rng;

    fn random_tour<R: Rng>(n: usize, rng: &mut R) -> Tour {
        let mut order: Vec<usize> = (0..n).collect();
        shuffle(&mut order, rng);
        Tour::closed(order)
    }

    // ---- Pivot crossover ----

    #[test]
    fn test_pivot_moves_after_predecessor() {
        // parent 0 1 2 3 4: predecessor of 3 is 2.
        let parent = Tour::closed(vec![0, 1, 2, 3, 4]);
        let donor = Tour::closed(vec![4, 3, 2, 1, 0]);
        let child = insert_after_predecessor(&parent, &donor, 3).unwrap();
        assert_eq!(child.cities(), &[4, 2, 3, 1, 0, 4]);
    }

    #[test]
    fn test_pivot_at_start_uses_cyclic_predecessor() {
        // parent 2 0 1 3: predecessor of 2 (position 0) is 3.
        let parent = Tour::closed(vec![2, 0, 1, 3]);
        let donor = Tour::closed(vec![0, 1, 2, 3]);
        let child = insert_after_predecessor(&parent, &donor, 2).unwrap();
        assert_eq!(child.cities(), &[0, 1, 3, 2, 0]);
    }

    #[test]
    fn test_pivot_moved_to_donor_front() {
        // donor starts with the pivot; the closing element must follow the
        // new first city.
        let parent = Tour::closed(vec![0, 1, 2]);
        let donor = Tour::closed(vec![1, 0, 2]);
        let child = insert_after_predecessor(&parent, &donor, 1).unwrap();
        assert_eq!(child.cities(), &[0, 1, 2, 0]);
    }

    /// `true` if `a` and `b` visit the same cycle from possibly different
    /// starting cities.
    fn is_rotation(a: &Tour, b: &Tour) -> bool {
        let (a, b) = (a.order(), b.order());
        a.len() == b.len() && (0..a.len()).any(|k| a.iter().cycle().skip(k).take(a.len()).eq(b.iter()))
    }

    #[test]
    fn test_identical_parents_keep_cycle() {
        let mut rng = create_rng(42);
        let parent = Tour::closed(vec![3, 0, 4, 1, 2]);
        for _ in 0..50 {
            let child = pivot_crossover(&parent, &parent, &mut rng).unwrap();
            assert!(is_rotation(&child, &parent), "{child} is not a rotation of {parent}");
        }
    }

    #[test]
    fn test_two_cities() {
        let mut rng = create_rng(42);
        let p = Tour::closed(vec![0, 1]);
        let m = Tour::closed(vec![1, 0]);
        for _ in 0..20 {
            let child = pivot_crossover(&p, &m, &mut rng).unwrap();
            assert!(child.validate(2).is_ok());
        }
    }

    #[test]
    fn test_degenerate_parents_copy_donor() {
        let mut rng = create_rng(42);
        let single = Tour::closed(vec![0]);
        assert_eq!(pivot_crossover(&single, &single, &mut rng).unwrap(), single);
        let empty = Tour::closed(vec![]);
        assert_eq!(pivot_crossover(&empty, &empty, &mut rng).unwrap(), empty);
    }

    #[test]
    fn test_mismatched_parents_rejected() {
        let mut rng = create_rng(42);
        let p = Tour::closed(vec![0, 1, 2]);
        let m = Tour::closed(vec![0, 1, 2, 3]);
        assert!(matches!(
            pivot_crossover(&p, &m, &mut rng),
            Err(TspError::InvalidTour(_))
        ));
    }

    proptest! {
        #[test]
        fn prop_crossover_child_is_valid_tour(n in 3usize..=8, seed in any::<u64>()) {
            let mut rng = create_rng(seed);
            let parent = random_tour(n, &mut rng);
            let donor = random_tour(n, &mut rng);
            let child = pivot_crossover(&parent, &donor, &mut rng).unwrap();
            prop_assert!(child.validate(n).is_ok(), "invalid child {:?}", child);
        }

        #[test]
        fn prop_mutation_keeps_tour_valid(n in 2usize..=12, seed in any::<u64>()) {
            let mut rng = create_rng(seed);
            let mut tour = random_tour(n, &mut rng);
            for _ in 0..10 {
                swap_mutation(&mut tour, &mut rng);
                prop_assert!(tour.validate(n).is_ok(), "invalid tour {:?}", tour);
            }
        }
    }

    // ---- Swap mutation ----

    #[test]
    fn test_swap_changes_exactly_two_positions() {
        let mut rng = create_rng(42);
        for _ in 0..100 {
            let original = Tour::closed(vec![0, 1, 2, 3, 4, 5]);
            let mut tour = original.clone();
            swap_mutation(&mut tour, &mut rng);
            let changed = original
                .order()
                .iter()
                .zip(tour.order())
                .filter(|(a, b)| a != b)
                .count();
            assert_eq!(changed, 2);
            assert_eq!(tour.cities()[0], tour.cities()[6]);
        }
    }

    #[test]
    fn test_swap_single_city_noop() {
        let mut rng = create_rng(42);
        let mut tour = Tour::closed(vec![0]);
        swap_mutation(&mut tour, &mut rng);
        assert_eq!(tour.cities(), &[0, 0]);
    }

    #[test]
    fn test_mutate_repeatedly_zero_probability() {
        let mut rng = create_rng(42);
        let mut tour = Tour::closed(vec![0, 1, 2, 3]);
        assert_eq!(mutate_repeatedly(&mut tour, 0.0, &mut rng), 0);
        assert_eq!(tour.cities(), &[0, 1, 2, 3, 0]);
    }

    #[test]
    fn test_mutate_repeatedly_is_geometric() {
        let mut rng = create_rng(7);
        let trials = 20_000;
        let mut total = 0usize;
        let mut multi = 0usize;
        for _ in 0..trials {
            let mut tour = Tour::closed(vec![0, 1, 2, 3, 4]);
            let applied = mutate_repeatedly(&mut tour, 0.5, &mut rng);
            total += applied;
            if applied > 1 {
                multi += 1;
            }
            assert!(tour.validate(5).is_ok());
        }
        // E[applied] = p / (1 - p) = 1.0 for p = 0.5
        let mean = total as f64 / trials as f64;
        assert!((mean - 1.0).abs() < 0.1, "mean swaps {mean}");
        assert!(multi > 0, "more than one swap should occur sometimes");
    }
}
