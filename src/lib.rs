//! # tsp-genalg
//!
//! Approximate Traveling Salesman tours with a genetic algorithm.
//!
//! ```rust
//! use tsp_genalg::{
//!     cities::{City, CityTable},
//!     evolution::{EvolutionOptions, TspLauncher},
//!     rng::RandomNumberGenerator,
//! };
//!
//! let cities = CityTable::new(vec![
//!     City::new(20.0, 80.0),
//!     City::new(120.0, 20.0),
//!     City::new(60.0, 200.0),
//!     City::new(300.0, 180.0),
//!     City::new(160.0, 120.0),
//! ])
//! .unwrap();
//!
//! let options = EvolutionOptions::builder()
//!     .max_generations(50)
//!     .population_size(40)
//!     .build();
//! let launcher = TspLauncher::for_cities(cities);
//!
//! let result = launcher
//!     .evolve(&options, &mut RandomNumberGenerator::from_seed(42))
//!     .unwrap();
//! assert_eq!(result.route.len(), 5);
//! ```

pub mod caching;
pub mod cities;
pub mod error;
pub mod evolution;
pub mod fitness;
pub mod operators;
pub mod rng;
pub mod route;
pub mod selection;
pub mod strategy;

// Re-export commonly used types for convenience
pub use error::{OptionExt, Result, ResultExt, TspError};
