//! FromResult - effect from an already computed outcome.

use std::marker::PhantomData;

use crate::effect::trait_def::Effect;
use crate::error::Fin;

/// Effect that replays a stored [`Fin`].
///
/// # Example
///
/// ```rust
/// use catchwater::effect::prelude::*;
///
/// # tokio_test::block_on(async {
/// let effect = from_result::<_, ()>(Ok(42));
/// assert_eq!(effect.run(&()).await, Ok(42));
/// # });
/// ```
pub struct FromResult<T, Env> {
    result: Fin<T>,
    _phantom: PhantomData<fn() -> Env>,
}

impl<T: std::fmt::Debug, Env> std::fmt::Debug for FromResult<T, Env> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FromResult")
            .field("result", &self.result)
            .finish()
    }
}

impl<T, Env> FromResult<T, Env> {
    /// Create a new FromResult effect.
    pub fn new(result: Fin<T>) -> Self {
        FromResult {
            result,
            _phantom: PhantomData,
        }
    }
}

impl<T, Env> Effect for FromResult<T, Env>
where
    T: Clone + Send + Sync,
    Env: Send + Sync,
{
    type Output = T;
    type Env = Env;

    async fn run(&self, _env: &Env) -> Fin<T> {
        self.result.clone()
    }
}
