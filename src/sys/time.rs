//! Time capability.

use std::time::{Duration, SystemTime};

use crate::capability::{capability, Has};
use crate::effect::{BoxedEffect, Effect};

/// Clock service.
pub trait TimeIO: Send + Sync {
    /// Current wall-clock time.
    fn now(&self) -> BoxedEffect<SystemTime>;

    /// Suspend for `duration`.
    fn sleep(&self, duration: Duration) -> BoxedEffect<()>;
}

/// Current time from the environment's clock.
pub fn now<Env>() -> impl Effect<Output = SystemTime, Env = Env>
where
    Env: Has<dyn TimeIO> + Send + Sync,
{
    capability::<dyn TimeIO, _, _, Env>(|time| time.now())
}

/// Sleep on the environment's clock.
pub fn sleep<Env>(duration: Duration) -> impl Effect<Output = (), Env = Env>
where
    Env: Has<dyn TimeIO> + Send + Sync,
{
    capability::<dyn TimeIO, _, _, Env>(move |time| time.sleep(duration))
}

#[cfg(feature = "async")]
pub use self::live::{with_timeout, LiveTime, WithTimeout, TIMED_OUT};

#[cfg(feature = "async")]
mod live {
    use std::time::{Duration, SystemTime};

    use super::TimeIO;
    use crate::effect::{from_async, from_fn, BoxedEffect, Effect, EffectExt};
    use crate::error::{Error, Fin};

    /// Message of the error produced when [`with_timeout`] expires.
    pub const TIMED_OUT: &str = "timed out";

    /// [`TimeIO`] over the system clock and the tokio timer.
    ///
    /// `sleep` must be awaited inside a tokio runtime with the time driver
    /// enabled. Run anywhere else it fails with an `Exceptional` error. Do
    /// not drive it with `run_sync` from a current-thread runtime: the
    /// blocked thread is the one that would fire the timer.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct LiveTime;

    impl TimeIO for LiveTime {
        fn now(&self) -> BoxedEffect<SystemTime> {
            from_fn(|_: &()| Ok(SystemTime::now())).boxed()
        }

        fn sleep(&self, duration: Duration) -> BoxedEffect<()> {
            from_async(move |_: &()| async move {
                timer_runtime()?;
                tokio::time::sleep(duration).await;
                Ok(())
            })
            .boxed()
        }
    }

    fn timer_runtime() -> Fin<tokio::runtime::Handle> {
        tokio::runtime::Handle::try_current().map_err(Error::from_fault)
    }

    /// Fail with a [`TIMED_OUT`] message error if `effect` has not finished
    /// within `duration`.
    ///
    /// The deadline is a tokio timer, with the same runtime requirement as
    /// [`LiveTime`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use catchwater::effect::prelude::*;
    /// use catchwater::sys::with_timeout;
    /// use std::time::Duration;
    ///
    /// # tokio_test::block_on(async {
    /// let slow = from_async(|_: &()| async {
    ///     tokio::time::sleep(Duration::from_secs(5)).await;
    ///     Ok(1)
    /// });
    ///
    /// let result = with_timeout(slow, Duration::from_millis(10)).run(&()).await;
    /// assert_eq!(result, Err(Error::new("timed out")));
    /// # });
    /// ```
    pub fn with_timeout<Eff: Effect>(effect: Eff, duration: Duration) -> WithTimeout<Eff> {
        WithTimeout {
            inner: effect,
            duration,
        }
    }

    /// Effect returned by [`with_timeout`].
    #[derive(Debug)]
    pub struct WithTimeout<Inner> {
        inner: Inner,
        duration: Duration,
    }

    impl<Inner: Effect> Effect for WithTimeout<Inner> {
        type Output = Inner::Output;
        type Env = Inner::Env;

        async fn run(&self, env: &Self::Env) -> Fin<Self::Output> {
            timer_runtime()?;
            match tokio::time::timeout(self.duration, self.inner.run(env)).await {
                Ok(result) => result,
                Err(_) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(duration = ?self.duration, "effect timed out");
                    Err(Error::new(TIMED_OUT))
                }
            }
        }
    }
}
