//! Lower-triangular distance table.

use std::collections::BTreeMap;

use super::DistanceSource;
use crate::error::{Result, TspError};

/// Symmetric distances stored once per pair.
///
/// Row `i` holds the distances from city `i` to every lower index `0..i`, so
/// the pair `(a, b)` is always owned by `max(a, b)`. Entries may be absent;
/// looking one up through [`DistanceSource::distance`] is then an error.
///
/// # Examples
///
/// ```
/// use u_salesman::distance::{DistanceSource, TriangularDistances};
///
/// let mut table = TriangularDistances::with_cities(3);
/// table.set(1, 0, 10.0).unwrap();
/// table.set(0, 2, 15.0).unwrap();
/// table.set(2, 1, 20.0).unwrap();
///
/// assert_eq!(table.distance(0, 1).unwrap(), 10.0);
/// assert_eq!(table.distance(2, 0).unwrap(), 15.0);
/// assert_eq!(table.city_count(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TriangularDistances {
    rows: Vec<Vec<Option<f64>>>,
}

impl TriangularDistances {
    /// Creates an empty table with no cities.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table for `count` cities with every pair unset.
    pub fn with_cities(count: usize) -> Self {
        Self {
            rows: (0..count).map(|i| vec![None; i]).collect(),
        }
    }

    /// Builds a table from a flat lower-triangular list.
    ///
    /// City `k` consumes the next `k` values, its distances to cities
    /// `0..k`. The list length must therefore be `n * (n - 1) / 2`.
    pub fn from_lower_triangle(values: &[f64]) -> Result<Self> {
        let count = triangular_root(values.len())
            .ok_or(TspError::InvalidDistanceList { values: values.len() })?;

        let mut table = Self::with_cities(count);
        let mut iter = values.iter().copied();
        for owner in 1..count {
            for lower in 0..owner {
                let d = iter
                    .next()
                    .ok_or(TspError::InvalidDistanceList { values: values.len() })?;
                table.set(owner, lower, d)?;
            }
        }
        Ok(table)
    }

    /// Appends a city and returns its index.
    ///
    /// `to_lower` maps already-present city indices to distances. Pairs left
    /// out stay unset.
    pub fn push_city(&mut self, to_lower: &BTreeMap<usize, f64>) -> Result<usize> {
        let index = self.rows.len();
        let mut row = vec![None; index];
        for (&lower, &d) in to_lower {
            if lower >= index {
                return Err(TspError::CityIndexOutOfRange { index: lower, count: index });
            }
            row[lower] = Some(validate(index, lower, d)?);
        }
        self.rows.push(row);
        Ok(index)
    }

    /// Sets the distance between `a` and `b` (order does not matter).
    pub fn set(&mut self, a: usize, b: usize, distance: f64) -> Result<()> {
        let (owner, lower) = self.owning_pair(a, b)?;
        self.rows[owner][lower] = Some(validate(owner, lower, distance)?);
        Ok(())
    }

    /// Returns the stored distance, or `None` if the pair is unset or invalid.
    pub fn get(&self, a: usize, b: usize) -> Option<f64> {
        let (owner, lower) = self.owning_pair(a, b).ok()?;
        self.rows[owner][lower]
    }

    /// Distances from `index` to each lower city, `None` where unset.
    pub fn row(&self, index: usize) -> Option<&[Option<f64>]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Removes a city and every pair that references it.
    ///
    /// Higher cities shift down by one so indices stay dense.
    pub fn remove_city(&mut self, index: usize) -> Result<()> {
        if index >= self.rows.len() {
            return Err(TspError::CityIndexOutOfRange {
                index,
                count: self.rows.len(),
            });
        }
        self.rows.remove(index);
        for row in self.rows.iter_mut().skip(index) {
            row.remove(index);
        }
        Ok(())
    }

    /// Returns `true` if every pair of distinct cities has a distance.
    pub fn is_complete(&self) -> bool {
        self.rows.iter().all(|row| row.iter().all(Option::is_some))
    }

    /// Resolves `(a, b)` to `(owner, lower)`, the higher index owning the entry.
    fn owning_pair(&self, a: usize, b: usize) -> Result<(usize, usize)> {
        let count = self.rows.len();
        for index in [a, b] {
            if index >= count {
                return Err(TspError::CityIndexOutOfRange { index, count });
            }
        }
        if a == b {
            return Err(TspError::invalid_tour(format!(
                "no distance is defined from city {a} to itself"
            )));
        }
        Ok((a.max(b), a.min(b)))
    }
}

impl DistanceSource for TriangularDistances {
    fn city_count(&self) -> usize {
        self.rows.len()
    }

    /// Distance between `a` and `b`; the same city yields `0.0`.
    fn distance(&self, a: usize, b: usize) -> Result<f64> {
        if a == b && a < self.rows.len() {
            return Ok(0.0);
        }
        let (owner, lower) = self.owning_pair(a, b)?;
        self.rows[owner][lower].ok_or_else(|| TspError::missing_distance(owner, lower))
    }
}

fn validate(owner: usize, lower: usize, distance: f64) -> Result<f64> {
    if distance.is_finite() && distance > 0.0 {
        Ok(distance)
    } else {
        Err(TspError::InvalidDistance {
            from: owner,
            to: lower,
            distance,
        })
    }
}

/// Returns `n` such that `n * (n - 1) / 2 == len`.
///
/// An empty list is treated as a single city with no pairs.
pub(crate) fn triangular_root(len: usize) -> Option<usize> {
    let mut n = 1usize;
    let mut pairs = 0usize;
    while pairs < len {
        pairs = pairs.checked_add(n)?;
        n += 1;
    }
    (pairs == len).then_some(n)
}
