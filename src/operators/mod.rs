//! # Genetic Operators
//!
//! Recombination and mutation operators over routes. Every operator keeps the
//! permutation invariant: its output visits each city exactly once.

pub mod crossover;
pub mod mutation;

pub use crossover::{pmx_with_cuts, CrossoverOperator, PartiallyMappedCrossover};
pub use mutation::{MutationOperator, SwapMutation};
