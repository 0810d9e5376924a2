//! OrElse combinator - recovers from errors.

use crate::effect::trait_def::Effect;
use crate::error::{Error, Fin};

/// OrElse combinator - recovers from errors.
///
/// If the inner effect succeeds, the value passes through unchanged.
/// If it fails, the recovery function is called with the error to
/// produce a new effect. This is the unconditional building block the
/// [`Catch`](crate::catch::Catch) algebra refines with predicates.
///
/// # Example
///
/// ```rust
/// use catchwater::effect::prelude::*;
/// use catchwater::Error;
///
/// # tokio_test::block_on(async {
/// let effect = fail::<i32, ()>(Error::new("error")).or_else(|_| pure(42));
/// assert_eq!(effect.run(&()).await, Ok(42));
/// # });
/// ```
pub struct OrElse<Inner, F> {
    pub(crate) inner: Inner,
    pub(crate) f: F,
}

impl<Inner, F> std::fmt::Debug for OrElse<Inner, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrElse")
            .field("inner", &"<effect>")
            .field("f", &"<function>")
            .finish()
    }
}

impl<Inner, F, E2> Effect for OrElse<Inner, F>
where
    Inner: Effect,
    E2: Effect<Output = Inner::Output, Env = Inner::Env>,
    F: Fn(Error) -> E2 + Send + Sync,
{
    type Output = Inner::Output;
    type Env = Inner::Env;

    async fn run(&self, env: &Self::Env) -> Fin<Self::Output> {
        match self.inner.run(env).await {
            Ok(value) => Ok(value),
            Err(e) => (self.f)(e).run(env).await,
        }
    }
}
