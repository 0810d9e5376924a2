//! Parallel execution functions for effects.
//!
//! This module provides functions for running effects concurrently on the
//! calling task (no threads are spawned):
//! - `par_all` - Run all effects, collecting results or an aggregate error
//! - `par_try_all` - Run all effects, reporting the first error in order
//! - `race` - Race effects, return the first to succeed (failures in completion order)
//! - `par2` - Run two heterogeneous effects concurrently

use crate::effect::boxed::BoxedEffect;
use crate::effect::trait_def::Effect;
use crate::error::{Error, Fin};

/// Execute effects concurrently, collecting all results or all errors.
///
/// Every effect runs to completion. If any failed, the failures are
/// combined in input order with [`Error::many`].
///
/// # Example
///
/// ```rust
/// use catchwater::effect::prelude::*;
///
/// # tokio_test::block_on(async {
/// let effects: Vec<BoxedEffect<i32>> = vec![
///     pure(1).boxed(),
///     fail("a").boxed(),
///     fail("b").boxed(),
/// ];
///
/// let err = par_all(&effects, &()).await.unwrap_err();
/// assert_eq!(err.to_string(), "a; b");
/// # });
/// ```
pub async fn par_all<T, Env>(effects: &[BoxedEffect<T, Env>], env: &Env) -> Fin<Vec<T>>
where
    T: Send + 'static,
    Env: Send + Sync + 'static,
{
    let futures: Vec<_> = effects.iter().map(|eff| eff.run(env)).collect();

    let results: Vec<Fin<T>> = futures::future::join_all(futures).await;

    let mut successes = Vec::new();
    let mut failures = Vec::new();

    for result in results {
        match result {
            Ok(value) => successes.push(value),
            Err(e) => failures.push(e),
        }
    }

    if failures.is_empty() {
        Ok(successes)
    } else {
        Err(Error::many(failures))
    }
}

/// Execute effects concurrently, reporting the first failure in input order.
pub async fn par_try_all<T, Env>(effects: &[BoxedEffect<T, Env>], env: &Env) -> Fin<Vec<T>>
where
    T: Send + 'static,
    Env: Send + Sync + 'static,
{
    let futures: Vec<_> = effects.iter().map(|eff| eff.run(env)).collect();

    let results: Vec<Fin<T>> = futures::future::join_all(futures).await;

    results.into_iter().collect()
}

/// Race effects, returning the first success.
///
/// If every effect fails, the failures are aggregated in the order the
/// effects finished, not in input order. An empty input fails with a
/// message error rather than panicking.
pub async fn race<T, Env>(effects: &[BoxedEffect<T, Env>], env: &Env) -> Fin<T>
where
    T: Send + 'static,
    Env: Send + Sync + 'static,
{
    if effects.is_empty() {
        return Err(Error::new("race called with no effects"));
    }

    let futures: Vec<_> = effects.iter().map(|eff| Box::pin(eff.run(env))).collect();

    let mut remaining = futures;
    let mut failures = Vec::new();
    while !remaining.is_empty() {
        let (result, _index, rest) = futures::future::select_all(remaining).await;
        match result {
            Ok(value) => return Ok(value),
            Err(e) => failures.push(e),
        }
        remaining = rest;
    }
    Err(Error::many(failures))
}

/// Execute two effects concurrently (heterogeneous).
///
/// # Example
///
/// ```rust
/// use catchwater::effect::prelude::*;
///
/// # tokio_test::block_on(async {
/// let (r1, r2) = par2(pure::<_, ()>(42), pure("hello"), &()).await;
/// assert_eq!(r1, Ok(42));
/// assert_eq!(r2, Ok("hello"));
/// # });
/// ```
pub async fn par2<E1, E2>(e1: E1, e2: E2, env: &E1::Env) -> (Fin<E1::Output>, Fin<E2::Output>)
where
    E1: Effect,
    E2: Effect<Env = E1::Env>,
{
    futures::future::join(e1.run(env), e2.run(env)).await
}
