//! Retry combinator - explicit re-execution of a failing effect.

use crate::effect::trait_def::Effect;
use crate::error::{Error, Fin};

/// Re-runs the inner effect while it fails and `should_retry` accepts the
/// error, up to `max_attempts` runs in total.
///
/// Nothing in the crate retries implicitly; this combinator is the explicit
/// opt-in. The last error is returned unchanged once attempts run out or the
/// predicate rejects it.
///
/// # Example
///
/// ```rust
/// use catchwater::effect::prelude::*;
/// use std::sync::atomic::{AtomicU32, Ordering};
/// use std::sync::Arc;
///
/// # tokio_test::block_on(async {
/// let calls = Arc::new(AtomicU32::new(0));
/// let counter = calls.clone();
/// let effect = from_fn(move |_: &()| {
///     if counter.fetch_add(1, Ordering::SeqCst) < 2 {
///         Err(Error::new("flaky"))
///     } else {
///         Ok("done")
///     }
/// })
/// .retry(5);
///
/// assert_eq!(effect.run(&()).await, Ok("done"));
/// assert_eq!(calls.load(Ordering::SeqCst), 3);
/// # });
/// ```
pub struct Retry<Inner, P> {
    pub(crate) inner: Inner,
    pub(crate) max_attempts: u32,
    pub(crate) should_retry: P,
}

impl<Inner, P> std::fmt::Debug for Retry<Inner, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Retry")
            .field("inner", &"<effect>")
            .field("max_attempts", &self.max_attempts)
            .field("should_retry", &"<predicate>")
            .finish()
    }
}

impl<Inner, P> Effect for Retry<Inner, P>
where
    Inner: Effect,
    P: Fn(&Error) -> bool + Send + Sync,
{
    type Output = Inner::Output;
    type Env = Inner::Env;

    async fn run(&self, env: &Self::Env) -> Fin<Self::Output> {
        let mut attempt = 1;
        loop {
            match self.inner.run(env).await {
                Ok(value) => return Ok(value),
                Err(error) if attempt < self.max_attempts && (self.should_retry)(&error) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(attempt, error = %error, "retrying failed effect");
                    attempt += 1;
                }
                Err(error) => return Err(error),
            }
        }
    }
}
