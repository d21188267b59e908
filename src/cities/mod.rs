//! Named cities and their pairwise distances.
//!
//! - [`City`]: a name and its dense index
//! - [`CityRegistry`]: insertion-ordered cities backed by a
//!   [`TriangularDistances`](crate::distance::TriangularDistances) table

mod registry;

pub use registry::{City, CityRegistry};
