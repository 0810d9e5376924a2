//! FromAsync - effect from an async function.

use std::future::Future;
use std::marker::PhantomData;

use crate::effect::trait_def::Effect;
use crate::error::Fin;

/// Effect from an async function.
///
/// The function receives the environment and returns a future. This is the
/// leaf through which I/O and timer primitives introduce suspension points.
///
/// # Example
///
/// ```rust
/// use catchwater::effect::prelude::*;
///
/// # tokio_test::block_on(async {
/// let effect = from_async(|env: &i32| {
///     let value = *env;
///     async move { Ok(value + 1) }
/// });
/// assert_eq!(effect.run(&41).await, Ok(42));
/// # });
/// ```
pub struct FromAsync<F, Env> {
    pub(crate) f: F,
    pub(crate) _phantom: PhantomData<fn() -> Env>,
}

impl<F, Env> std::fmt::Debug for FromAsync<F, Env> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FromAsync").field("f", &"<function>").finish()
    }
}

impl<F, Env> FromAsync<F, Env> {
    /// Create a new FromAsync effect.
    pub fn new(f: F) -> Self {
        FromAsync {
            f,
            _phantom: PhantomData,
        }
    }
}

impl<F, Fut, T, Env> Effect for FromAsync<F, Env>
where
    F: Fn(&Env) -> Fut + Send + Sync,
    Fut: Future<Output = Fin<T>> + Send,
    T: Send,
    Env: Send + Sync,
{
    type Output = T;
    type Env = Env;

    async fn run(&self, env: &Env) -> Fin<T> {
        (self.f)(env).await
    }
}
