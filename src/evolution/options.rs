//! # EvolutionOptions
//!
//! The `EvolutionOptions` struct holds every tunable parameter of a run. A run
//! reads its parameters from the options value it is given, never from globals,
//! so several runs with different settings can proceed side by side.
//!
//! ## Example
//!
//! ```rust
//! use tsp_genalg::evolution::options::{EvolutionOptions, LogLevel};
//!
//! // Create a new EvolutionOptions instance with custom parameters
//! let custom_options = EvolutionOptions::new(200, 50, 3, 0.8, 0.05);
//!
//! // Or through the builder
//! let built = EvolutionOptions::builder()
//!     .max_generations(200)
//!     .population_size(50)
//!     .log_level(LogLevel::Minimal)
//!     .build();
//!
//! assert_eq!(custom_options.get_max_generations(), built.get_max_generations());
//! assert!(built.validate(10).is_ok());
//! ```
//!
//! ## Defaults
//!
//! | parameter            | default |
//! |----------------------|---------|
//! | `max_generations`    | 100     |
//! | `population_size`    | 100     |
//! | `tournament_size`    | 5       |
//! | `crossover_rate`     | 0.7     |
//! | `mutation_rate`      | 0.02    |
//! | `log_level`          | `None`  |
//! | `parallel_threshold` | 1000    |

use crate::error::{Result, TspError};

/// Controls the per-generation log events of a run.
///
/// Start and end of a run are always reported.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// A summary per generation and every scored route.
    Verbose,
    /// A summary per generation.
    Minimal,
    None,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionOptions {
    /// Number of reproduction steps. The loop scores `max_generations + 1` populations.
    max_generations: usize,
    log_level: LogLevel,
    population_size: usize,
    tournament_size: usize,
    crossover_rate: f64,
    mutation_rate: f64,
    /// Minimum population size scored in parallel
    parallel_threshold: usize,
}

impl EvolutionOptions {
    pub fn new(
        max_generations: usize,
        population_size: usize,
        tournament_size: usize,
        crossover_rate: f64,
        mutation_rate: f64,
    ) -> Self {
        Self {
            max_generations,
            population_size,
            tournament_size,
            crossover_rate,
            mutation_rate,
            ..Self::default()
        }
    }

    pub fn get_max_generations(&self) -> usize {
        self.max_generations
    }

    pub fn get_log_level(&self) -> &LogLevel {
        &self.log_level
    }

    pub fn get_population_size(&self) -> usize {
        self.population_size
    }

    pub fn get_tournament_size(&self) -> usize {
        self.tournament_size
    }

    pub fn get_crossover_rate(&self) -> f64 {
        self.crossover_rate
    }

    pub fn get_mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    /// Returns the minimum population size scored in parallel.
    pub fn get_parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    pub fn set_max_generations(&mut self, max_generations: usize) {
        self.max_generations = max_generations;
    }

    pub fn set_log_level(&mut self, log_level: LogLevel) {
        self.log_level = log_level;
    }

    pub fn set_population_size(&mut self, population_size: usize) {
        self.population_size = population_size;
    }

    pub fn set_tournament_size(&mut self, tournament_size: usize) {
        self.tournament_size = tournament_size;
    }

    pub fn set_crossover_rate(&mut self, crossover_rate: f64) {
        self.crossover_rate = crossover_rate;
    }

    pub fn set_mutation_rate(&mut self, mutation_rate: f64) {
        self.mutation_rate = mutation_rate;
    }

    pub fn set_parallel_threshold(&mut self, threshold: usize) {
        self.parallel_threshold = threshold;
    }

    /// Checks the options against a map of `num_cities` cities.
    ///
    /// # Errors
    ///
    /// Returns `TspError::Configuration` if:
    /// - there are fewer than 2 cities
    /// - the population is empty or odd (parents are bred in pairs)
    /// - the tournament size is 0 or larger than the population
    /// - a rate is NaN or outside `[0, 1]`
    pub fn validate(&self, num_cities: usize) -> Result<()> {
        if num_cities < 2 {
            return Err(TspError::Configuration(format!(
                "At least 2 cities are required, got {}",
                num_cities
            )));
        }

        if self.population_size == 0 {
            return Err(TspError::Configuration(
                "Population size cannot be zero".to_string(),
            ));
        }

        if self.population_size % 2 != 0 {
            return Err(TspError::Configuration(format!(
                "Population size must be even, got {}",
                self.population_size
            )));
        }

        if self.tournament_size == 0 || self.tournament_size > self.population_size {
            return Err(TspError::Configuration(format!(
                "Tournament size must be between 1 and the population size ({}), got {}",
                self.population_size, self.tournament_size
            )));
        }

        check_rate("Crossover rate", self.crossover_rate)?;
        check_rate("Mutation rate", self.mutation_rate)?;

        Ok(())
    }

    /// Returns a builder for creating an `EvolutionOptions` instance.
    pub fn builder() -> EvolutionOptionsBuilder {
        EvolutionOptionsBuilder::default()
    }
}

fn check_rate(name: &str, rate: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&rate) {
        return Err(TspError::Configuration(format!(
            "{} must be within [0, 1], got {}",
            name, rate
        )));
    }
    Ok(())
}

impl Default for EvolutionOptions {
    fn default() -> Self {
        Self {
            max_generations: 100,
            log_level: LogLevel::None,
            population_size: 100,
            tournament_size: 5,
            crossover_rate: 0.7,
            mutation_rate: 0.02,
            parallel_threshold: 1000,
        }
    }
}

/// Builder for `EvolutionOptions`.
///
/// Unset fields fall back to `EvolutionOptions::default()`.
#[derive(Debug, Clone, Default)]
pub struct EvolutionOptionsBuilder {
    max_generations: Option<usize>,
    log_level: Option<LogLevel>,
    population_size: Option<usize>,
    tournament_size: Option<usize>,
    crossover_rate: Option<f64>,
    mutation_rate: Option<f64>,
    parallel_threshold: Option<usize>,
}

impl EvolutionOptionsBuilder {
    pub fn max_generations(mut self, value: usize) -> Self {
        self.max_generations = Some(value);
        self
    }

    pub fn log_level(mut self, value: LogLevel) -> Self {
        self.log_level = Some(value);
        self
    }

    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    pub fn tournament_size(mut self, value: usize) -> Self {
        self.tournament_size = Some(value);
        self
    }

    pub fn crossover_rate(mut self, value: f64) -> Self {
        self.crossover_rate = Some(value);
        self
    }

    pub fn mutation_rate(mut self, value: f64) -> Self {
        self.mutation_rate = Some(value);
        self
    }

    pub fn parallel_threshold(mut self, value: usize) -> Self {
        self.parallel_threshold = Some(value);
        self
    }

    pub fn build(self) -> EvolutionOptions {
        let default = EvolutionOptions::default();
        EvolutionOptions {
            max_generations: self.max_generations.unwrap_or(default.max_generations),
            log_level: self.log_level.unwrap_or(default.log_level),
            population_size: self.population_size.unwrap_or(default.population_size),
            tournament_size: self.tournament_size.unwrap_or(default.tournament_size),
            crossover_rate: self.crossover_rate.unwrap_or(default.crossover_rate),
            mutation_rate: self.mutation_rate.unwrap_or(default.mutation_rate),
            parallel_threshold: self
                .parallel_threshold
                .unwrap_or(default.parallel_threshold),
        }
    }
}
