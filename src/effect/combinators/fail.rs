//! Fail effect - an effect that always fails.

use std::marker::PhantomData;

use crate::effect::trait_def::Effect;
use crate::error::{Error, Fin};

/// An effect that always fails with the given error.
///
/// # Example
///
/// ```rust
/// use catchwater::effect::prelude::*;
/// use catchwater::Error;
///
/// # tokio_test::block_on(async {
/// let effect = fail::<i32, ()>(Error::new("boom"));
/// assert_eq!(effect.run(&()).await, Err(Error::new("boom")));
/// # });
/// ```
pub struct Fail<T, Env> {
    error: Error,
    _phantom: PhantomData<fn() -> (T, Env)>,
}

impl<T, Env> std::fmt::Debug for Fail<T, Env> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fail").field("error", &self.error).finish()
    }
}

impl<T, Env> Clone for Fail<T, Env> {
    fn clone(&self) -> Self {
        Fail::new(self.error.clone())
    }
}

impl<T, Env> Fail<T, Env> {
    /// Create a new Fail effect from an error.
    pub fn new(error: Error) -> Self {
        Fail {
            error,
            _phantom: PhantomData,
        }
    }
}

impl<T, Env> Effect for Fail<T, Env>
where
    T: Send,
    Env: Send + Sync,
{
    type Output = T;
    type Env = Env;

    async fn run(&self, _env: &Env) -> Fin<T> {
        Err(self.error.clone())
    }
}
