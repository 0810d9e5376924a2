//! AndThen combinator - chains dependent effects.

use crate::effect::trait_def::Effect;
use crate::error::Fin;

/// AndThen combinator - chains dependent effects.
///
/// Runs the inner effect and, only on success, builds and runs the next
/// effect from its value. On failure the function is never called and the
/// error propagates unchanged. This is the only way values flow between
/// effects.
///
/// # Example
///
/// ```rust
/// use catchwater::effect::prelude::*;
///
/// # tokio_test::block_on(async {
/// let effect = pure::<_, ()>(21).and_then(|x| pure(x * 2));
/// assert_eq!(effect.run(&()).await, Ok(42));
/// # });
/// ```
pub struct AndThen<Inner, F> {
    pub(crate) inner: Inner,
    pub(crate) f: F,
}

impl<Inner, F> std::fmt::Debug for AndThen<Inner, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AndThen")
            .field("inner", &"<effect>")
            .field("f", &"<function>")
            .finish()
    }
}

impl<Inner, F, E2> Effect for AndThen<Inner, F>
where
    Inner: Effect,
    E2: Effect<Env = Inner::Env>,
    F: Fn(Inner::Output) -> E2 + Send + Sync,
{
    type Output = E2::Output;
    type Env = Inner::Env;

    async fn run(&self, env: &Self::Env) -> Fin<Self::Output> {
        let value = self.inner.run(env).await?;
        (self.f)(value).run(env).await
    }
}
