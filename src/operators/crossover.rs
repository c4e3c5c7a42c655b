//! # Partially Mapped Crossover
//!
//! PMX copies a segment of the first parent into the child at the same
//! positions, then fills every other position from the second parent. A value
//! from the second parent that is already in the child is remapped: look up
//! where the value sits in the second parent and take the first parent's value
//! at that position, until an unused city turns up.
//!
//! The cut points are drawn independently. When `start > end` no segment is
//! copied and the child is a copy of the second parent.

use std::fmt::Debug;

use crate::error::{Result, TspError};
use crate::rng::RandomNumberGenerator;
use crate::route::Route;

/// Combines two parent routes into one child route.
pub trait CrossoverOperator: Debug + Send + Sync {
    /// Produces a single child. Swap the arguments to get the sibling.
    fn crossover(
        &self,
        parent_a: &Route,
        parent_b: &Route,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Route>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PartiallyMappedCrossover;

impl PartiallyMappedCrossover {
    pub fn new() -> Self {
        Self
    }
}

impl CrossoverOperator for PartiallyMappedCrossover {
    fn crossover(
        &self,
        parent_a: &Route,
        parent_b: &Route,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Route> {
        let n = parent_a.len();
        if n == 0 {
            return Err(TspError::InvariantViolation(
                "Cannot cross over empty routes".to_string(),
            ));
        }

        let start = rng.gen_index(n);
        let end = rng.gen_index(n);
        pmx_with_cuts(parent_a, parent_b, start, end)
    }
}

/// PMX with explicit, inclusive cut points.
///
/// `parent_a[start..=end]` is copied into the child; an empty segment when
/// `start > end`.
///
/// # Errors
///
/// Returns `TspError::InvariantViolation` if the parents are not permutations
/// of the same cities, a cut point is out of range, or remapping fails to find
/// a free city within `n` steps.
pub fn pmx_with_cuts(
    parent_a: &Route,
    parent_b: &Route,
    start: usize,
    end: usize,
) -> Result<Route> {
    let n = parent_a.len();
    parent_a.validate(n)?;
    parent_b.validate(n)?;

    if start >= n || end >= n {
        return Err(TspError::InvariantViolation(format!(
            "Cut points ({}, {}) out of range for {} cities",
            start, end, n
        )));
    }

    let mut position_in_b = vec![0; n];
    for (pos, &city) in parent_b.iter().enumerate() {
        position_in_b[city] = pos;
    }

    let mut child: Vec<Option<usize>> = vec![None; n];
    let mut placed = vec![false; n];

    if start <= end {
        for i in start..=end {
            child[i] = Some(parent_a[i]);
            placed[parent_a[i]] = true;
        }
    }

    for i in 0..n {
        if child[i].is_some() {
            continue;
        }

        let mut candidate = parent_b[i];
        let mut remaps = 0;
        while placed[candidate] {
            if remaps == n {
                return Err(TspError::InvariantViolation(format!(
                    "PMX could not resolve position {} within {} remaps",
                    i, n
                )));
            }
            candidate = parent_a[position_in_b[candidate]];
            remaps += 1;
        }

        child[i] = Some(candidate);
        placed[candidate] = true;
    }

    let indices = child.into_iter().flatten().collect();
    Ok(Route::from_raw(indices))
}
