//! Error type shared by the distance table, the city registry and the GA.

/// Errors raised while building city data or running the search.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TspError {
    #[error("MissingDistance: no distance stored between city {from} and city {to}")]
    MissingDistance { from: usize, to: usize },

    #[error("InvalidDistance: distance between city {from} and city {to} must be positive and finite, got {distance}")]
    InvalidDistance { from: usize, to: usize, distance: f64 },

    #[error("DegenerateFitness: tour length {length} cannot be weighted for selection")]
    DegenerateFitness { length: f64 },

    #[error("NotEvaluated: individual at position {position} has no computed length")]
    NotEvaluated { position: usize },

    #[error("InvalidWeight: selection weight {weight} at position {position} must be finite and non-negative")]
    InvalidWeight { position: usize, weight: f64 },

    #[error("EmptyPopulation: cannot select from an empty population")]
    EmptyPopulation,

    #[error("CityIndexOutOfRange: index {index} is not below city count {count}")]
    CityIndexOutOfRange { index: usize, count: usize },

    #[error("InvalidTour: {0}")]
    InvalidTour(String),

    #[error("DuplicateCity: city '{0}' already exists")]
    DuplicateCity(String),

    #[error("UnknownCity: city '{0}' does not exist")]
    UnknownCity(String),

    #[error("InvalidDistanceList: {values} values do not form a triangular distance list")]
    InvalidDistanceList { values: usize },

    #[error("InvalidDistanceValue: cannot parse '{0}' as a distance")]
    InvalidDistanceValue(String),

    #[error("InvalidConfig: {0}")]
    InvalidConfig(String),
}

impl TspError {
    pub(crate) fn missing_distance(a: usize, b: usize) -> Self {
        Self::MissingDistance {
            from: a.max(b),
            to: a.min(b),
        }
    }

    pub(crate) fn invalid_tour(reason: impl Into<String>) -> Self {
        Self::InvalidTour(reason.into())
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, TspError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_distance_orders_pair() {
        let err = TspError::missing_distance(1, 4);
        assert_eq!(err, TspError::MissingDistance { from: 4, to: 1 });
    }

    #[test]
    fn test_display_mentions_cities() {
        let msg = TspError::missing_distance(3, 0).to_string();
        assert!(msg.contains("city 3"));
        assert!(msg.contains("city 0"));
    }
}
