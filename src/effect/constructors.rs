//! Constructor functions for creating effects.
//!
//! These functions provide ergonomic ways to create effects without
//! directly constructing the combinator types.

use std::future::Future;

use crate::effect::combinators::{Fail, FromAsync, FromFn, FromResult, Pure};
use crate::effect::reader::{Ask, Asks, Local, Widen};
use crate::effect::trait_def::Effect;
use crate::error::{Error, Fin};

/// Create a pure effect that always succeeds with the given value.
///
/// Never touches the environment.
///
/// # Example
///
/// ```rust
/// use catchwater::effect::prelude::*;
///
/// # tokio_test::block_on(async {
/// let effect = pure::<_, ()>(42);
/// assert_eq!(effect.run(&()).await, Ok(42));
/// # });
/// ```
pub fn pure<T, Env>(value: T) -> Pure<T, Env>
where
    T: Clone + Send + Sync,
    Env: Send + Sync,
{
    Pure::new(value)
}

/// Create an effect that always fails with the given error.
///
/// Never touches the environment.
///
/// # Example
///
/// ```rust
/// use catchwater::effect::prelude::*;
///
/// # tokio_test::block_on(async {
/// let effect = fail::<i32, ()>("error");
/// assert_eq!(effect.run(&()).await, Err(Error::new("error")));
/// # });
/// ```
pub fn fail<T, Env>(error: impl Into<Error>) -> Fail<T, Env>
where
    T: Send,
    Env: Send + Sync,
{
    Fail::new(error.into())
}

/// Create an effect from a synchronous function.
///
/// The function receives a reference to the environment and returns a `Fin`.
pub fn from_fn<T, Env, F>(f: F) -> FromFn<F, Env>
where
    F: Fn(&Env) -> Fin<T> + Send + Sync,
    T: Send,
    Env: Send + Sync,
{
    FromFn::new(f)
}

/// Create an effect from a synchronous fallible function returning a native
/// error type.
///
/// This is the leaf at which native faults are caught and wrapped: any `Err`
/// becomes `Error::Exceptional`, keeping the original fault for diagnostics.
///
/// # Example
///
/// ```rust
/// use catchwater::effect::prelude::*;
///
/// # tokio_test::block_on(async {
/// let effect = from_fallible(|_: &()| "12".parse::<i32>());
/// assert_eq!(effect.run(&()).await, Ok(12));
///
/// let effect = from_fallible(|_: &()| "twelve".parse::<i32>());
/// assert!(effect.run(&()).await.unwrap_err().is_exceptional());
/// # });
/// ```
pub fn from_fallible<T, E, Env, F>(
    f: F,
) -> FromFn<impl Fn(&Env) -> Fin<T> + Send + Sync, Env>
where
    F: Fn(&Env) -> Result<T, E> + Send + Sync,
    E: std::error::Error + Send + Sync + 'static,
    T: Send,
    Env: Send + Sync,
{
    FromFn::new(move |env: &Env| f(env).map_err(Error::from_fault))
}

/// Create an effect from an async function.
///
/// The function receives the environment and returns a future. Any
/// environment data the future needs must be copied out before the `async`
/// block, as the future may not borrow the environment.
pub fn from_async<T, Env, F, Fut>(f: F) -> FromAsync<F, Env>
where
    F: Fn(&Env) -> Fut + Send + Sync,
    Fut: Future<Output = Fin<T>> + Send,
    T: Send,
    Env: Send + Sync,
{
    FromAsync::new(f)
}

/// Create an effect that replays an existing outcome.
pub fn from_result<T, Env>(result: Fin<T>) -> FromResult<T, Env>
where
    T: Clone + Send + Sync,
    Env: Send + Sync,
{
    FromResult::new(result)
}

/// Create an effect from an `Option`, failing with `error` on `None`.
///
/// # Example
///
/// ```rust
/// use catchwater::effect::prelude::*;
///
/// # tokio_test::block_on(async {
/// let effect = from_option::<i32, ()>(None, Error::end_of_stream());
/// assert_eq!(effect.run(&()).await, Err(Error::end_of_stream()));
/// # });
/// ```
pub fn from_option<T, Env>(value: Option<T>, error: Error) -> FromResult<T, Env>
where
    T: Clone + Send + Sync,
    Env: Send + Sync,
{
    FromResult::new(value.ok_or(error))
}

/// Get the entire environment (cloned).
pub fn ask<Env>() -> Ask<Env>
where
    Env: Clone + Send + Sync,
{
    Ask::new()
}

/// Query a value from the environment.
pub fn asks<U, Env, F>(f: F) -> Asks<F, Env>
where
    F: Fn(&Env) -> U + Send + Sync,
    U: Send,
    Env: Send + Sync,
{
    Asks::new(f)
}

/// Run an effect with an environment derived from the outer one.
pub fn local<Inner, F, Env2>(f: F, effect: Inner) -> Local<Inner, F, Env2>
where
    Inner: Effect,
    F: Fn(&Env2) -> Inner::Env + Send + Sync,
    Env2: Send + Sync,
{
    Local::new(effect, f)
}

/// Lift an environment-free effect into an environment it ignores.
pub fn widen<Inner, Env>(effect: Inner) -> Widen<Inner, Env>
where
    Inner: Effect<Env = ()>,
    Env: Send + Sync,
{
    Widen::new(effect)
}
