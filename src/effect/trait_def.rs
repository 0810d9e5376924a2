//! Effect trait definition - the core abstraction.
//!
//! This module defines the `Effect` trait, which represents a deferred
//! computation that:
//! - Produces a value of type `Output` on success
//! - Reports failure through the crate's [`Error`](crate::Error)
//! - Reads an environment of type `Env` (`()` for environment-free effects)
//!
//! # Design Philosophy
//!
//! This trait follows the same pattern as `Future` and `Iterator`:
//! - Combinators return concrete types (zero-cost abstractions)
//! - Use `.boxed()` when you need type erasure
//!
//! An effect is a *recipe*. `run` borrows it, so the same value can be run
//! again and every run re-executes the recipe from scratch.

use std::future::Future;

use crate::error::Fin;

/// The core Effect trait - a re-runnable computation yielding a [`Fin`].
///
/// There is a single effect type for both execution modes. `run` always
/// returns a future; synchronous effects simply complete on the first poll,
/// which [`EffectExt::run_sync`](crate::effect::EffectExt::run_sync) exploits.
///
/// # Type Parameters
///
/// * `Output` - The success type produced by this effect
/// * `Env` - The environment required to run this effect
///
/// # Example
///
/// ```rust
/// use catchwater::effect::prelude::*;
///
/// fn doubled() -> impl Effect<Output = i32, Env = i32> {
///     asks(|env: &i32| *env).map(|x| x * 2)
/// }
///
/// # tokio_test::block_on(async {
/// assert_eq!(doubled().run(&21).await, Ok(42));
/// # });
/// ```
pub trait Effect: Sized + Send + Sync {
    /// The success type produced by this effect.
    type Output: Send;

    /// The environment type required to run this effect.
    type Env: Send + Sync;

    /// Execute this effect with the given environment.
    ///
    /// Every failure path ends up as `Err(Error)`; the returned future never
    /// resolves to anything else.
    fn run(&self, env: &Self::Env) -> impl Future<Output = Fin<Self::Output>> + Send;
}
