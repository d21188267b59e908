//! City registry.

use std::collections::BTreeMap;
use std::fmt;

use crate::distance::{DistanceSource, TriangularDistances};
use crate::error::{Result, TspError};

/// A named city.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct City {
    pub name: String,
    pub index: usize,
}

/// Insertion-ordered set of uniquely named cities with their distances.
///
/// City `k` stores its distances to cities `0..k`. Removing a city shifts
/// every later city down one index, so indices are always `0..len()`.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use u_salesman::cities::CityRegistry;
/// use u_salesman::distance::DistanceSource;
///
/// let mut cities = CityRegistry::new();
/// cities.add_city("A", BTreeMap::new()).unwrap();
/// cities.add_city("B", BTreeMap::from([(0, 12.0)])).unwrap();
///
/// assert_eq!(cities.index_of("B"), Some(1));
/// assert_eq!(cities.distance(1, 0).unwrap(), 12.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CityRegistry {
    names: Vec<String>,
    distances: TriangularDistances,
}

impl CityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The five built-in cities used when no distances are supplied.
    pub fn reference() -> Self {
        const REFERENCE: [(&str, &[(usize, f64)]); 5] = [
            ("Itajai", &[]),
            ("Balneario Camborio", &[(0, 30.0)]),
            ("Blumenau", &[(0, 60.0), (1, 40.0)]),
            ("Itapema", &[(0, 20.0), (1, 10.0), (2, 50.0)]),
            ("Joinville", &[(0, 90.0), (1, 70.0), (2, 30.0), (3, 80.0)]),
        ];

        let mut registry = Self::new();
        for (name, to_lower) in REFERENCE {
            registry.names.push(name.to_string());
            let row: BTreeMap<usize, f64> = to_lower.iter().copied().collect();
            registry
                .distances
                .push_city(&row)
                .expect("reference distances are positive and reference lower cities");
        }
        registry
    }

    /// Builds `City_0..City_{n-1}` from a flat lower-triangular list.
    ///
    /// City `k` takes the next `k` values as its distances to cities `0..k`.
    pub fn from_distance_list(values: &[f64]) -> Result<Self> {
        let distances = TriangularDistances::from_lower_triangle(values)?;
        let names = (0..distances.city_count())
            .map(|i| format!("City_{i}"))
            .collect();
        Ok(Self { names, distances })
    }

    /// Parses textual distances (e.g. command line arguments) and builds the
    /// registry with [`from_distance_list`](Self::from_distance_list).
    pub fn parse_distance_list<S: AsRef<str>>(values: &[S]) -> Result<Self> {
        let parsed = values
            .iter()
            .map(|raw| {
                let raw = raw.as_ref();
                raw.trim()
                    .parse::<f64>()
                    .map_err(|_| TspError::InvalidDistanceValue(raw.to_string()))
            })
            .collect::<Result<Vec<f64>>>()?;
        Self::from_distance_list(&parsed)
    }

    /// Adds a city with its distances to already registered cities.
    ///
    /// `to_lower` maps existing city indices to distances; pairs left out
    /// stay unknown and fail later lookups. Returns the new city's index.
    pub fn add_city(
        &mut self,
        name: impl Into<String>,
        to_lower: BTreeMap<usize, f64>,
    ) -> Result<usize> {
        let name = name.into();
        if self.index_of(&name).is_some() {
            return Err(TspError::DuplicateCity(name));
        }
        let index = self.distances.push_city(&to_lower)?;
        self.names.push(name);
        Ok(index)
    }

    /// Removes a city and every distance that references it.
    pub fn remove_city(&mut self, name: &str) -> Result<City> {
        let index = self
            .index_of(name)
            .ok_or_else(|| TspError::UnknownCity(name.to_string()))?;
        self.distances.remove_city(index)?;
        let name = self.names.remove(index);
        Ok(City { name, index })
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn city(&self, index: usize) -> Option<City> {
        self.names.get(index).map(|name| City {
            name: name.clone(),
            index,
        })
    }

    pub fn cities(&self) -> impl Iterator<Item = City> + '_ {
        self.names.iter().enumerate().map(|(index, name)| City {
            name: name.clone(),
            index,
        })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn distances(&self) -> &TriangularDistances {
        &self.distances
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl DistanceSource for CityRegistry {
    fn city_count(&self) -> usize {
        self.names.len()
    }

    fn distance(&self, a: usize, b: usize) -> Result<f64> {
        self.distances.distance(a, b)
    }
}

/// Index, name and the distances to every lower-index city.
impl fmt::Display for CityRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Index\tCity\tDistances")?;
        for (index, name) in self.names.iter().enumerate() {
            write!(f, "{index}\t{name} -->")?;
            for d in self.distances.row(index).unwrap_or_default() {
                match d {
                    Some(d) => write!(f, " {d}")?,
                    None => f.write_str(" -")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_cities() {
        let cities = CityRegistry::reference();
        assert_eq!(cities.len(), 5);
        assert_eq!(cities.index_of("Itajai"), Some(0));
        assert_eq!(cities.index_of("Joinville"), Some(4));
        assert_eq!(cities.distance(3, 1).unwrap(), 10.0);
        assert_eq!(cities.distance(2, 4).unwrap(), 30.0);
        assert!(cities.distances().is_complete());
    }

    #[test]
    fn test_duplicate_city_rejected() {
        let mut cities = CityRegistry::reference();
        let err = cities.add_city("Blumenau", BTreeMap::new()).unwrap_err();
        assert_eq!(err, TspError::DuplicateCity("Blumenau".into()));
        assert_eq!(cities.len(), 5);
    }

    #[test]
    fn test_add_city_with_partial_distances() {
        let mut cities = CityRegistry::new();
        cities.add_city("A", BTreeMap::new()).unwrap();
        cities.add_city("B", BTreeMap::new()).unwrap();
        assert_eq!(
            cities.distance(0, 1),
            Err(TspError::MissingDistance { from: 1, to: 0 })
        );
    }

    #[test]
    fn test_add_city_rejects_invalid_distance() {
        let mut cities = CityRegistry::new();
        cities.add_city("A", BTreeMap::new()).unwrap();
        let err = cities
            .add_city("B", BTreeMap::from([(0, -1.0)]))
            .unwrap_err();
        assert!(matches!(err, TspError::InvalidDistance { .. }));
        assert_eq!(cities.len(), 1);
    }

    #[test]
    fn test_remove_city_drops_references() {
        let mut cities = CityRegistry::reference();
        let removed = cities.remove_city("Balneario Camborio").unwrap();
        assert_eq!(removed.index, 1);
        assert_eq!(cities.len(), 4);
        assert_eq!(cities.index_of("Blumenau"), Some(1));
        // Blumenau - Itajai
        assert_eq!(cities.distance(1, 0).unwrap(), 60.0);
        // Joinville - Itapema
        assert_eq!(cities.distance(3, 2).unwrap(), 80.0);
        assert!(cities.distances().is_complete());
    }

    #[test]
    fn test_remove_unknown_city() {
        let mut cities = CityRegistry::reference();
        assert_eq!(
            cities.remove_city("Curitiba"),
            Err(TspError::UnknownCity("Curitiba".into()))
        );
    }

    #[test]
    fn test_from_distance_list() {
        let cities = CityRegistry::from_distance_list(&[10.0, 15.0, 20.0]).unwrap();
        assert_eq!(cities.names(), &["City_0", "City_1", "City_2"]);
        assert_eq!(cities.distance(2, 1).unwrap(), 20.0);
    }

    #[test]
    fn test_parse_distance_list() {
        let args = ["281", "338", "61"];
        let cities = CityRegistry::parse_distance_list(&args).unwrap();
        assert_eq!(cities.len(), 3);
        assert_eq!(cities.distance(0, 2).unwrap(), 338.0);

        assert_eq!(
            CityRegistry::parse_distance_list(&["1", "x", "2"]),
            Err(TspError::InvalidDistanceValue("x".into()))
        );
        assert_eq!(
            CityRegistry::parse_distance_list(&["1", "2"]),
            Err(TspError::InvalidDistanceList { values: 2 })
        );
    }

    #[test]
    fn test_display_listing() {
        let cities = CityRegistry::from_distance_list(&[10.0, 15.0, 20.0]).unwrap();
        let listing = cities.to_string();
        assert!(listing.starts_with("Index\tCity\tDistances\n"));
        assert!(listing.contains("0\tCity_0 -->\n"));
        assert!(listing.contains("2\tCity_2 --> 15 20\n"));
    }

    #[test]
    fn test_cities_iterator() {
        let cities = CityRegistry::reference();
        let city = cities.cities().nth(2).unwrap();
        assert_eq!(city, City { name: "Blumenau".into(), index: 2 });
        assert_eq!(cities.city(2), Some(city));
    }
}
