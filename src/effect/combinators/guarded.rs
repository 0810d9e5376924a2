//! Guarded combinator - turns panics into exceptional errors.

use std::panic::AssertUnwindSafe;

use futures::FutureExt;

use crate::effect::trait_def::Effect;
use crate::error::{Error, Fin};

/// Runs the inner effect and converts a panic into `Error::Exceptional`.
///
/// This is the boundary at which an unchecked fault becomes data. Above it,
/// the failure flows through `Err` like any other error.
///
/// # Example
///
/// ```rust
/// use catchwater::effect::prelude::*;
///
/// # tokio_test::block_on(async {
/// let effect = from_fn(|_: &()| -> Fin<i32> { panic!("invariant broken") }).guarded();
/// let err = effect.run(&()).await.unwrap_err();
/// assert!(err.is_exceptional());
/// # });
/// ```
#[derive(Debug)]
pub struct Guarded<Inner> {
    pub(crate) inner: Inner,
}

impl<Inner> Effect for Guarded<Inner>
where
    Inner: Effect,
{
    type Output = Inner::Output;
    type Env = Inner::Env;

    async fn run(&self, env: &Self::Env) -> Fin<Self::Output> {
        match AssertUnwindSafe(self.inner.run(env)).catch_unwind().await {
            Ok(result) => result,
            Err(payload) => Err(Error::panicked(payload)),
        }
    }
}
