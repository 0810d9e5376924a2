//! BoxedEffect - type-erased effect for opt-in boxing.
//!
//! Use `BoxedEffect` when you need to:
//! - Store different effect types in a collection
//! - Return different effects from match arms
//! - Create recursive effect functions
//! - Return an effect from a recovery handler or capability method
//!
//! The erased effect is held behind an `Arc`, so cloning a `BoxedEffect`
//! shares the recipe rather than copying it.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::effect::trait_def::Effect;
use crate::error::Fin;

/// A boxed future that is Send
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Object-safe view of [`Effect`].
trait DynEffect<T, Env>: Send + Sync {
    fn run_dyn<'a>(&'a self, env: &'a Env) -> BoxFuture<'a, Fin<T>>;
}

impl<Eff> DynEffect<Eff::Output, Eff::Env> for Eff
where
    Eff: Effect,
{
    fn run_dyn<'a>(&'a self, env: &'a Eff::Env) -> BoxFuture<'a, Fin<Eff::Output>> {
        Box::pin(self.run(env))
    }
}

/// A type-erased effect.
///
/// # Example
///
/// ```rust
/// use catchwater::effect::prelude::*;
///
/// fn countdown(n: i32) -> BoxedEffect<i32> {
///     if n <= 0 {
///         pure(0).boxed()
///     } else {
///         pure(n)
///             .and_then(move |x| countdown(x - 1).map(move |sum| x + sum))
///             .boxed()
///     }
/// }
///
/// # tokio_test::block_on(async {
/// assert_eq!(countdown(3).run(&()).await, Ok(6));
/// # });
/// ```
pub struct BoxedEffect<T, Env = ()> {
    inner: Arc<dyn DynEffect<T, Env>>,
}

impl<T, Env> Clone for BoxedEffect<T, Env> {
    fn clone(&self) -> Self {
        BoxedEffect {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, Env> std::fmt::Debug for BoxedEffect<T, Env> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoxedEffect")
            .field("inner", &"<effect>")
            .finish()
    }
}

impl<T, Env> BoxedEffect<T, Env>
where
    T: Send + 'static,
    Env: Send + Sync + 'static,
{
    /// Create a boxed effect from any effect.
    pub fn new<Eff>(effect: Eff) -> Self
    where
        Eff: Effect<Output = T, Env = Env> + 'static,
    {
        BoxedEffect {
            inner: Arc::new(effect),
        }
    }
}

impl<T, Env> Effect for BoxedEffect<T, Env>
where
    T: Send,
    Env: Send + Sync,
{
    type Output = T;
    type Env = Env;

    async fn run(&self, env: &Env) -> Fin<T> {
        self.inner.run_dyn(env).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::prelude::*;

    async fn run_generic<Eff: Effect>(effect: &Eff, env: &Eff::Env) -> Fin<Eff::Output> {
        effect.run(env).await
    }

    #[tokio::test]
    async fn test_boxed_effect_reads_env_through_generic_runner() {
        let effect: BoxedEffect<usize, String> = asks(|name: &String| name.len()).boxed();

        assert_eq!(run_generic(&effect, &"catch".to_string()).await, Ok(5));
        assert_eq!(run_generic(&effect, &"water".to_string()).await, Ok(5));
    }

    #[tokio::test]
    async fn test_boxed_effect_clones_share_recipe() {
        let effect: BoxedEffect<i32> = fail("down").boxed();
        let copy = effect.clone();

        assert_eq!(copy.run(&()).await, Err(Error::new("down")));
        assert_eq!(effect.run(&()).await, Err(Error::new("down")));
    }
}
