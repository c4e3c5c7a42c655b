//! # Cities
//!
//! The `CityTable` holds the coordinates of every city on the map. It is built
//! once before the search starts and never changes afterwards. Cities have no
//! names: a city is identified by its position in the table.
//!
//! ## Example
//!
//! ```rust
//! use tsp_genalg::cities::{City, CityTable};
//!
//! let table = CityTable::new(vec![City::new(0.0, 0.0), City::new(3.0, 4.0)]).unwrap();
//!
//! assert_eq!(table.size(), 2);
//! assert_eq!(table.distance(0, 1).unwrap(), 5.0);
//! assert!(table.get(2).is_err());
//! ```

use crate::error::{Result, TspError};

/// A point on the plane.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct City {
    pub x: f64,
    pub y: f64,
}

impl City {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(&self, other: &City) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

impl From<(f64, f64)> for City {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// An immutable, indexed set of cities.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<City>", into = "Vec<City>"))]
#[derive(Debug, Clone, PartialEq)]
pub struct CityTable {
    cities: Vec<City>,
}

impl CityTable {
    /// Builds a table from the given cities.
    ///
    /// # Errors
    ///
    /// Returns `TspError::Configuration` if fewer than two cities are given, a
    /// coordinate is NaN or infinite, or the cities are spread so far apart
    /// that a route length would overflow `f64`.
    pub fn new(cities: Vec<City>) -> Result<Self> {
        if cities.len() < 2 {
            return Err(TspError::Configuration(format!(
                "At least 2 cities are required, got {}",
                cities.len()
            )));
        }

        if let Some(idx) = cities
            .iter()
            .position(|c| !c.x.is_finite() || !c.y.is_finite())
        {
            return Err(TspError::Configuration(format!(
                "City {} has a non-finite coordinate",
                idx
            )));
        }

        // Every leg is at most the bounding box diagonal
        let (min_x, max_x, min_y, max_y) = cities.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY),
            |(min_x, max_x, min_y, max_y), c| {
                (min_x.min(c.x), max_x.max(c.x), min_y.min(c.y), max_y.max(c.y))
            },
        );
        let longest_route = (max_x - min_x).hypot(max_y - min_y) * (cities.len() - 1) as f64;
        if !longest_route.is_finite() {
            return Err(TspError::Configuration(
                "City coordinates are too far apart for route lengths to be finite".to_string(),
            ));
        }

        Ok(Self { cities })
    }

    /// Builds a table and checks it against a separately declared city count.
    pub fn with_declared_size(num_cities: usize, cities: Vec<City>) -> Result<Self> {
        if cities.len() != num_cities {
            return Err(TspError::Configuration(format!(
                "Declared {} cities but {} coordinates were supplied",
                num_cities,
                cities.len()
            )));
        }
        Self::new(cities)
    }

    /// Number of cities.
    pub fn size(&self) -> usize {
        self.cities.len()
    }

    /// Returns the city at `index`.
    pub fn get(&self, index: usize) -> Result<City> {
        self.cities
            .get(index)
            .copied()
            .ok_or(TspError::IndexOutOfRange {
                index,
                len: self.cities.len(),
            })
    }

    /// Euclidean distance between the cities at indices `a` and `b`.
    pub fn distance(&self, a: usize, b: usize) -> Result<f64> {
        Ok(self.get(a)?.distance_to(&self.get(b)?))
    }

    pub fn iter(&self) -> impl Iterator<Item = &City> {
        self.cities.iter()
    }
}

impl TryFrom<Vec<City>> for CityTable {
    type Error = TspError;

    fn try_from(cities: Vec<City>) -> Result<Self> {
        Self::new(cities)
    }
}

impl From<CityTable> for Vec<City> {
    fn from(table: CityTable) -> Self {
        table.cities
    }
}
