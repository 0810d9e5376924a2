//! Pure effect - wraps a value as an effect with no side effects.

use std::marker::PhantomData;

use crate::effect::trait_def::Effect;
use crate::error::Fin;

/// A pure value wrapped as an Effect.
///
/// Each run yields a clone of the stored value and never reads the
/// environment.
///
/// # Example
///
/// ```rust
/// use catchwater::effect::prelude::*;
///
/// # tokio_test::block_on(async {
/// let effect = pure::<_, ()>(42);
/// assert_eq!(effect.run(&()).await, Ok(42));
/// assert_eq!(effect.run(&()).await, Ok(42));
/// # });
/// ```
pub struct Pure<T, Env> {
    value: T,
    _phantom: PhantomData<fn() -> Env>,
}

impl<T: std::fmt::Debug, Env> std::fmt::Debug for Pure<T, Env> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pure").field("value", &self.value).finish()
    }
}

impl<T: Clone, Env> Clone for Pure<T, Env> {
    fn clone(&self) -> Self {
        Pure::new(self.value.clone())
    }
}

impl<T, Env> Pure<T, Env> {
    /// Create a new Pure effect from a value.
    pub fn new(value: T) -> Self {
        Pure {
            value,
            _phantom: PhantomData,
        }
    }
}

impl<T, Env> Effect for Pure<T, Env>
where
    T: Clone + Send + Sync,
    Env: Send + Sync,
{
    type Output = T;
    type Env = Env;

    async fn run(&self, _env: &Env) -> Fin<T> {
        Ok(self.value.clone())
    }
}
