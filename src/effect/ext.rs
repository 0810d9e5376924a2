//! Extension trait providing combinator methods for all Effects.
//!
//! The `EffectExt` trait is automatically implemented for all types
//! that implement `Effect`. It provides ergonomic combinator methods
//! like `map`, `and_then`, `catch`, and `boxed`.

use futures::FutureExt;

use crate::catch::{Catch, Catching};
use crate::effect::boxed::BoxedEffect;
use crate::effect::combinators::{AndThen, Guarded, Map, MapErr, OrElse, Retry};
use crate::effect::reader::{Local, Widen};
use crate::effect::trait_def::Effect;
use crate::error::{Error, Fin};
use crate::semigroup::Semigroup;

/// Extension trait providing combinator methods for all Effects.
///
/// This trait is automatically implemented for all types that implement `Effect`.
/// You don't need to implement this trait yourself.
///
/// # Example
///
/// ```rust
/// use catchwater::effect::prelude::*;
///
/// # tokio_test::block_on(async {
/// let effect = pure::<_, ()>(21)
///     .map(|x| x * 2)
///     .and_then(|x| pure(x + 1))
///     .map_err(|e| Error::new(format!("Error: {}", e)));
///
/// assert_eq!(effect.execute(&()).await, Ok(43));
/// # });
/// ```
pub trait EffectExt: Effect {
    /// Transform the success value.
    fn map<U, F>(self, f: F) -> Map<Self, F>
    where
        F: Fn(Self::Output) -> U + Send + Sync,
        U: Send,
    {
        Map { inner: self, f }
    }

    /// Replace a failure with another failure.
    fn map_err<F>(self, f: F) -> MapErr<Self, F>
    where
        F: Fn(Error) -> Error + Send + Sync, {
        MapErr { inner: self, f }
    }

    /// Chain a dependent effect.
    ///
    /// If this effect succeeds, apply the function to produce the next effect.
    /// If this effect fails, the function is never called and the error
    /// propagates unchanged.
    ///
    /// Both effects must share an environment. An environment-free effect
    /// is brought into an environment with [`widen`](EffectExt::widen) first.
    fn and_then<E2, F>(self, f: F) -> AndThen<Self, F>
    where
        E2: Effect<Env = Self::Env>,
        F: Fn(Self::Output) -> E2 + Send + Sync, {
        AndThen { inner: self, f }
    }

    /// Recover from any error with another effect.
    ///
    /// For predicate-driven recovery use [`catch`](EffectExt::catch).
    fn or_else<E2, F>(self, f: F) -> OrElse<Self, F>
    where
        E2: Effect<Output = Self::Output, Env = Self::Env>,
        F: Fn(Error) -> E2 + Send + Sync, {
        OrElse { inner: self, f }
    }

    /// Run this effect and hand any failure to a [`Catch`] strategy.
    ///
    /// On success the strategy is never consulted.
    ///
    /// # Example
    ///
    /// ```rust
    /// use catchwater::effect::prelude::*;
    ///
    /// # tokio_test::block_on(async {
    /// let effect = fail::<i32, ()>("x").catch(Catch::value_message("x", |_| 42));
    /// assert_eq!(effect.run(&()).await, Ok(42));
    ///
    /// let effect = fail::<i32, ()>("x").catch(Catch::value_message("y", |_| 42));
    /// assert_eq!(effect.run(&()).await, Err(Error::new("x")));
    /// # });
    /// ```
    fn catch(self, strategy: Catch<Self::Output, Self::Env>) -> Catching<Self> {
        Catching::new(self, strategy)
    }

    /// Lift an environment-free effect into an environment it does not read.
    fn widen<Env>(self) -> Widen<Self, Env>
    where
        Self: Effect<Env = ()>,
        Env: Send + Sync,
    {
        Widen::new(self)
    }

    /// Run this effect with an environment derived from an outer one.
    fn local<F, Env2>(self, f: F) -> Local<Self, F, Env2>
    where
        F: Fn(&Env2) -> Self::Env + Send + Sync,
        Env2: Send + Sync,
    {
        Local::new(self, f)
    }

    /// Convert any panic raised while running into `Error::Exceptional`.
    fn guarded(self) -> Guarded<Self> {
        Guarded { inner: self }
    }

    /// Re-run this effect on failure, at most `max_attempts` runs in total.
    ///
    /// Cancellation errors are never retried.
    fn retry(self, max_attempts: u32) -> Retry<Self, fn(&Error) -> bool> {
        fn retryable(error: &Error) -> bool {
            !error.is_cancelled()
        }
        Retry {
            inner: self,
            max_attempts,
            should_retry: retryable,
        }
    }

    /// Re-run this effect while `predicate` accepts the failure, at most
    /// `max_attempts` runs in total.
    fn retry_while<P>(self, max_attempts: u32, predicate: P) -> Retry<Self, P>
    where
        P: Fn(&Error) -> bool + Send + Sync, {
        Retry {
            inner: self,
            max_attempts,
            should_retry: predicate,
        }
    }

    /// Append a context message to any failure.
    ///
    /// The original error comes first, the context after it, so the
    /// aggregate reads in order of occurrence.
    ///
    /// # Example
    ///
    /// ```rust
    /// use catchwater::effect::prelude::*;
    ///
    /// # tokio_test::block_on(async {
    /// let effect = fail::<i32, ()>("connection refused").context("loading profile");
    /// let err = effect.run(&()).await.unwrap_err();
    /// assert_eq!(err.to_string(), "connection refused; loading profile");
    /// # });
    /// ```
    fn context(
        self,
        msg: impl Into<String>,
    ) -> MapErr<Self, impl Fn(Error) -> Error + Send + Sync> {
        let msg = msg.into();
        self.map_err(move |err| err.combine(Error::new(msg.clone())))
    }

    /// Convert to a boxed effect for type erasure.
    fn boxed(self) -> BoxedEffect<Self::Output, Self::Env>
    where
        Self: 'static,
        Self::Output: 'static,
        Self::Env: 'static,
    {
        BoxedEffect::new(self)
    }

    /// Run and await the effect.
    #[allow(async_fn_in_trait)]
    async fn execute(&self, env: &Self::Env) -> Fin<Self::Output> {
        self.run(env).await
    }

    /// Run the effect on the calling thread.
    ///
    /// The future is polled once first; a chain made only of synchronous
    /// steps completes right there without an executor. Anything that
    /// suspends is then driven to completion by blocking the caller.
    ///
    /// Blocking uses a plain `futures` executor, which drives no tokio
    /// reactor or timer. Leaves that need the host scheduler, such as
    /// [`LiveTime`](crate::sys::time) sleeps and timeouts, should be awaited
    /// with [`run`](Effect::run) instead; called from a current-thread tokio
    /// runtime they would block the only thread able to wake them.
    ///
    /// # Example
    ///
    /// ```rust
    /// use catchwater::effect::prelude::*;
    ///
    /// let effect = pure::<_, ()>(20).map(|x| x + 22);
    /// assert_eq!(effect.run_sync(&()), Ok(42));
    /// ```
    fn run_sync(&self, env: &Self::Env) -> Fin<Self::Output> {
        let mut future = std::pin::pin!(self.run(env));
        match future.as_mut().now_or_never() {
            Some(result) => result,
            None => futures::executor::block_on(future),
        }
    }
}

// Blanket implementation for all Effect types
impl<E: Effect> EffectExt for E {}
