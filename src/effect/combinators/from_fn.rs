//! FromFn - effect from a synchronous function.

use std::marker::PhantomData;

use crate::effect::trait_def::Effect;
use crate::error::Fin;

/// Effect from a synchronous function.
///
/// The function is stored directly in the struct and invoked on every run,
/// so it completes on the first poll.
///
/// # Example
///
/// ```rust
/// use catchwater::effect::prelude::*;
///
/// struct Env { value: i32 }
///
/// # tokio_test::block_on(async {
/// let effect = from_fn(|env: &Env| Ok(env.value * 2));
/// assert_eq!(effect.run(&Env { value: 21 }).await, Ok(42));
/// # });
/// ```
pub struct FromFn<F, Env> {
    pub(crate) f: F,
    pub(crate) _phantom: PhantomData<fn() -> Env>,
}

impl<F, Env> std::fmt::Debug for FromFn<F, Env> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FromFn").field("f", &"<function>").finish()
    }
}

impl<F, Env> FromFn<F, Env> {
    /// Create a new FromFn effect.
    pub fn new(f: F) -> Self {
        FromFn {
            f,
            _phantom: PhantomData,
        }
    }
}

impl<F, T, Env> Effect for FromFn<F, Env>
where
    F: Fn(&Env) -> Fin<T> + Send + Sync,
    T: Send,
    Env: Send + Sync,
{
    type Output = T;
    type Env = Env;

    async fn run(&self, env: &Env) -> Fin<T> {
        (self.f)(env)
    }
}
