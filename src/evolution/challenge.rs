use crate::route::Route;

/// Scores a route. Lower scores are better.
pub trait Challenge {
    fn score(&self, route: &Route) -> f64;

    /// The number of cities this challenge can score, when it is bound to a
    /// particular map. The launcher refuses to run with any other city count.
    fn num_cities(&self) -> Option<usize> {
        None
    }
}
