//! # Caching Module
//!
//! Tournament selection and a converging population score the same routes over
//! and over. These wrappers remember the score of every route they have seen
//! so the wrapped challenge runs once per distinct route.
//!
//! - [`CachedChallenge`] shares one cache between all threads behind a mutex.
//! - [`ThreadLocalCachedChallenge`] gives every thread its own cache, which
//!   avoids lock contention when populations are scored in parallel.
//!
//! ```rust
//! use tsp_genalg::caching::CachingChallenge;
//! use tsp_genalg::cities::{City, CityTable};
//! use tsp_genalg::evolution::Challenge;
//! use tsp_genalg::fitness::FitnessEvaluator;
//! use tsp_genalg::route::Route;
//!
//! let cities = CityTable::new(vec![City::new(0.0, 0.0), City::new(0.0, 2.0)]).unwrap();
//! let cached = FitnessEvaluator::new(cities).with_global_cache();
//!
//! let route = Route::identity(2);
//! assert_eq!(cached.score(&route), 2.0);
//! assert_eq!(cached.score(&route), 2.0);
//! assert_eq!(cached.cache_size(), 1);
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::evolution::Challenge;
use crate::route::Route;

/// A wrapper around a challenge that caches scores in a cache shared by all threads.
#[derive(Debug, Clone)]
pub struct CachedChallenge<C>
where
    C: Challenge,
{
    challenge: C,
    cache: Arc<Mutex<HashMap<Route, f64>>>,
}

impl<C> CachedChallenge<C>
where
    C: Challenge,
{
    pub fn new(challenge: C) -> Self {
        Self {
            challenge,
            cache: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Creates a new cached challenge with a pre-populated cache.
    pub fn with_cache(challenge: C, cache: HashMap<Route, f64>) -> Self {
        Self {
            challenge,
            cache: Arc::new(Mutex::new(cache)),
        }
    }

    /// Returns a reference to the wrapped challenge.
    pub fn inner(&self) -> &C {
        &self.challenge
    }

    /// Returns the number of cached scores.
    pub fn cache_size(&self) -> usize {
        self.lock().len()
    }

    pub fn clear_cache(&self) {
        self.lock().clear();
    }

    /// Returns a copy of the cache.
    pub fn get_cache(&self) -> HashMap<Route, f64> {
        self.lock().clone()
    }

    // Scores are plain values, so a cache poisoned by a panicking thread is still usable
    fn lock(&self) -> MutexGuard<'_, HashMap<Route, f64>> {
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<C> Challenge for CachedChallenge<C>
where
    C: Challenge,
{
    fn score(&self, route: &Route) -> f64 {
        if let Some(score) = self.lock().get(route) {
            return *score;
        }

        // Computed outside the lock so other threads are not held up
        let score = self.challenge.score(route);
        self.lock().insert(route.clone(), score);

        score
    }

    fn num_cities(&self) -> Option<usize> {
        self.challenge.num_cities()
    }
}

/// A per-thread score cache.
#[derive(Debug, Default)]
pub struct ThreadLocalCache {
    cache: thread_local::ThreadLocal<RefCell<HashMap<Route, f64>>>,
}

impl ThreadLocalCache {
    pub fn new() -> Self {
        Self {
            cache: thread_local::ThreadLocal::new(),
        }
    }

    /// Gets a cached score for the current thread, if any.
    pub fn get(&self, route: &Route) -> Option<f64> {
        self.cache
            .get()
            .and_then(|cell| cell.try_borrow().ok())
            .and_then(|cache| cache.get(route).copied())
    }

    pub fn insert(&self, route: Route, score: f64) {
        let cell = self.cache.get_or(|| RefCell::new(HashMap::new()));
        if let Ok(mut cache) = cell.try_borrow_mut() {
            cache.insert(route, score);
        }
    }

    /// Clears the cache for the current thread.
    pub fn clear(&self) {
        if let Some(cell) = self.cache.get() {
            if let Ok(mut cache) = cell.try_borrow_mut() {
                cache.clear();
            }
        }
    }

    /// Returns the number of cached scores for the current thread.
    pub fn len(&self) -> usize {
        self.cache
            .get()
            .and_then(|cell| cell.try_borrow().ok())
            .map_or(0, |cache| cache.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A wrapper around a challenge that caches scores per thread.
#[derive(Debug, Clone)]
pub struct ThreadLocalCachedChallenge<C>
where
    C: Challenge,
{
    challenge: C,
    cache: Arc<ThreadLocalCache>,
}

impl<C> ThreadLocalCachedChallenge<C>
where
    C: Challenge,
{
    pub fn new(challenge: C) -> Self {
        Self {
            challenge,
            cache: Arc::new(ThreadLocalCache::new()),
        }
    }

    pub fn inner(&self) -> &C {
        &self.challenge
    }

    /// Clears the cache for the current thread.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Returns the number of cached scores for the current thread.
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

impl<C> Challenge for ThreadLocalCachedChallenge<C>
where
    C: Challenge,
{
    fn score(&self, route: &Route) -> f64 {
        if let Some(score) = self.cache.get(route) {
            return score;
        }

        let score = self.challenge.score(route);
        self.cache.insert(route.clone(), score);

        score
    }

    fn num_cities(&self) -> Option<usize> {
        self.challenge.num_cities()
    }
}

/// Wraps any cloneable challenge in one of the caches above.
pub trait CachingChallenge: Challenge + Sized + Clone {
    fn with_global_cache(&self) -> CachedChallenge<Self> {
        CachedChallenge::new(self.clone())
    }

    fn with_thread_local_cache(&self) -> ThreadLocalCachedChallenge<Self> {
        ThreadLocalCachedChallenge::new(self.clone())
    }
}

impl<C> CachingChallenge for C where C: Challenge + Clone {}
