//! Map combinator - transforms the success value.

use crate::effect::trait_def::Effect;
use crate::error::Fin;

/// Map combinator - transforms the success value.
///
/// Zero-cost: the struct stores only the inner effect and the function.
/// A failure of the inner effect passes through untouched.
///
/// # Example
///
/// ```rust
/// use catchwater::effect::prelude::*;
///
/// # tokio_test::block_on(async {
/// let effect = pure::<_, ()>(21).map(|x| x * 2);
/// assert_eq!(effect.run(&()).await, Ok(42));
/// # });
/// ```
pub struct Map<Inner, F> {
    pub(crate) inner: Inner,
    pub(crate) f: F,
}

impl<Inner, F> std::fmt::Debug for Map<Inner, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Map")
            .field("inner", &"<effect>")
            .field("f", &"<function>")
            .finish()
    }
}

impl<Inner, F, U> Effect for Map<Inner, F>
where
    Inner: Effect,
    F: Fn(Inner::Output) -> U + Send + Sync,
    U: Send,
{
    type Output = U;
    type Env = Inner::Env;

    async fn run(&self, env: &Self::Env) -> Fin<U> {
        self.inner.run(env).await.map(&self.f)
    }
}
