//! Top-level runners.
//!
//! [`invoke`] and [`invoke_sync`] are the outermost boundary of a program
//! built from effects. They guard against panics so that invoking an effect
//! always yields a [`Fin`] and never unwinds into the caller.

use crate::effect::combinators::Guarded;
use crate::effect::ext::EffectExt;
use crate::effect::trait_def::Effect;
use crate::error::Fin;

/// Run an effect asynchronously with the given environment.
///
/// # Example
///
/// ```rust
/// use catchwater::effect::prelude::*;
///
/// # tokio_test::block_on(async {
/// let effect = asks(|env: &i32| *env + 1);
/// assert_eq!(invoke(&effect, &41).await, Ok(42));
/// # });
/// ```
pub async fn invoke<Eff: Effect>(effect: &Eff, env: &Eff::Env) -> Fin<Eff::Output> {
    Guarded { inner: effect }.run(env).await
}

/// Run an effect on the calling thread with the given environment.
///
/// Synchronous chains complete without an executor; anything that suspends
/// blocks the caller until it finishes.
///
/// # Example
///
/// ```rust
/// use catchwater::effect::prelude::*;
///
/// let effect = from_fn(|_: &()| -> Fin<i32> { panic!("lost invariant") });
/// assert!(invoke_sync(&effect, &()).unwrap_err().is_exceptional());
/// ```
pub fn invoke_sync<Eff: Effect>(effect: &Eff, env: &Eff::Env) -> Fin<Eff::Output> {
    Guarded { inner: effect }.run_sync(env)
}

// Borrowed effects run the same recipe.
impl<Eff: Effect> Effect for &Eff {
    type Output = Eff::Output;
    type Env = Eff::Env;

    fn run(&self, env: &Self::Env) -> impl std::future::Future<Output = Fin<Self::Output>> + Send {
        (**self).run(env)
    }
}
