//! Pairwise city distances.
//!
//! The search engine only needs two things from whoever owns the city data:
//! how many cities there are and the distance between any two of them. That
//! contract is the [`DistanceSource`] trait. [`TriangularDistances`] is the
//! concrete table used by the city registry; it stores every pair once.

mod triangular;

pub use triangular::TriangularDistances;

use crate::error::Result;

/// Read-only access to symmetric city distances.
///
/// Implementations must answer `distance(a, b)` for any two distinct valid
/// indices regardless of argument order, and must report a missing pair as
/// [`TspError::MissingDistance`](crate::TspError::MissingDistance) rather than
/// returning zero.
pub trait DistanceSource {
    /// Number of cities. Valid indices are `0..city_count()`.
    fn city_count(&self) -> usize;

    /// Distance between cities `a` and `b`.
    fn distance(&self, a: usize, b: usize) -> Result<f64>;
}

impl<T: DistanceSource + ?Sized> DistanceSource for &T {
    fn city_count(&self) -> usize {
        (**self).city_count()
    }

    fn distance(&self, a: usize, b: usize) -> Result<f64> {
        (**self).distance(a, b)
    }
}
