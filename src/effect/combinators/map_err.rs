//! MapErr combinator - transforms the error value.

use crate::effect::trait_def::Effect;
use crate::error::{Error, Fin};

/// MapErr combinator - replaces a failure with another failure.
///
/// Success passes through untouched.
///
/// # Example
///
/// ```rust
/// use catchwater::effect::prelude::*;
/// use catchwater::Error;
///
/// # tokio_test::block_on(async {
/// let effect = fail::<i32, ()>(Error::new("io"))
///     .map_err(|e| Error::new(format!("wrapped: {}", e)));
/// assert_eq!(effect.run(&()).await, Err(Error::new("wrapped: io")));
/// # });
/// ```
pub struct MapErr<Inner, F> {
    pub(crate) inner: Inner,
    pub(crate) f: F,
}

impl<Inner, F> std::fmt::Debug for MapErr<Inner, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapErr")
            .field("inner", &"<effect>")
            .field("f", &"<function>")
            .finish()
    }
}

impl<Inner, F> Effect for MapErr<Inner, F>
where
    Inner: Effect,
    F: Fn(Error) -> Error + Send + Sync,
{
    type Output = Inner::Output;
    type Env = Inner::Env;

    async fn run(&self, env: &Self::Env) -> Fin<Self::Output> {
        self.inner.run(env).await.map_err(&self.f)
    }
}
