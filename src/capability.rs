//! Capability access for effects.
//!
//! An environment advertises the services it can supply by implementing
//! [`Has<C>`] for each of them. Effects that need a service ask for it through
//! the helpers on [`IO`]; if the environment does not advertise the service,
//! the composition does not type-check.
//!
//! # Environment Pattern
//!
//! ```
//! use catchwater::capability::{Has, IO};
//! use catchwater::effect::prelude::*;
//!
//! struct Database {
//!     users: Vec<String>,
//! }
//!
//! struct AppEnv {
//!     db: Database,
//! }
//!
//! impl Has<Database> for AppEnv {
//!     fn get(&self) -> &Database {
//!         &self.db
//!     }
//! }
//!
//! # tokio_test::block_on(async {
//! let env = AppEnv {
//!     db: Database { users: vec!["Alice".to_string()] },
//! };
//!
//! // Type inference figures out we need Database from AppEnv
//! let effect = IO::read(|db: &Database| db.users.first().cloned());
//! assert_eq!(effect.run(&env).await, Ok(Some("Alice".to_string())));
//! # });
//! ```
//!
//! # Object-Safe Capabilities
//!
//! A capability may be a trait object. Its operations then return
//! environment-free effects, and [`IO::with`] runs the chosen one inside the
//! outer environment. Name the trait object explicitly so the closure sees the
//! `'static` object type the environment advertises:
//!
//! ```
//! use catchwater::capability::{Has, IO};
//! use catchwater::effect::prelude::*;
//!
//! trait Clock: Send + Sync {
//!     fn millis(&self) -> BoxedEffect<u64>;
//! }
//!
//! struct Fixed;
//!
//! impl Clock for Fixed {
//!     fn millis(&self) -> BoxedEffect<u64> {
//!         pure(1_000).boxed()
//!     }
//! }
//!
//! struct Env {
//!     clock: Box<dyn Clock>,
//! }
//!
//! impl Has<dyn Clock> for Env {
//!     fn get(&self) -> &(dyn Clock + 'static) {
//!         self.clock.as_ref()
//!     }
//! }
//!
//! # tokio_test::block_on(async {
//! let env = Env { clock: Box::new(Fixed) };
//! let effect = IO::with::<dyn Clock, _, _, _>(|clock| clock.millis());
//! assert_eq!(effect.run(&env).await, Ok(1_000));
//! # });
//! ```

use std::future::Future;
use std::marker::PhantomData;

use crate::effect::combinators::FromFn;
use crate::effect::{from_async, from_fn, Effect, FromAsync};
use crate::error::Fin;

/// An environment that can supply the capability `C`.
///
/// Extraction is pure and infallible: a capability is either part of the
/// environment's type or the program does not compile.
pub trait Has<C: ?Sized> {
    /// Borrow the capability.
    fn get(&self) -> &C;
}

/// Helper for creating effects that use a capability.
///
/// This is a zero-sized type that acts as a namespace for helper functions.
#[derive(Debug, Clone, Copy)]
pub struct IO;

impl IO {
    /// Create an effect from an infallible query against a capability.
    ///
    /// # Type Parameters
    ///
    /// - `C`: The capability type (inferred from closure parameter)
    /// - `R`: The return type (inferred from closure return)
    /// - `Env`: The environment type (must implement `Has<C>`)
    pub fn read<C, R, F, Env>(f: F) -> FromFn<impl Fn(&Env) -> Fin<R> + Send + Sync, Env>
    where
        C: ?Sized,
        F: Fn(&C) -> R + Send + Sync,
        R: Send,
        Env: Has<C> + Send + Sync,
    {
        from_fn(move |env: &Env| Ok(f(<Env as Has<C>>::get(env))))
    }

    /// Create an effect from a fallible operation against a capability.
    ///
    /// # Examples
    ///
    /// ```
    /// use catchwater::capability::{Has, IO};
    /// use catchwater::effect::prelude::*;
    ///
    /// struct Limits { max: u32 }
    /// struct Env { limits: Limits }
    ///
    /// impl Has<Limits> for Env {
    ///     fn get(&self) -> &Limits { &self.limits }
    /// }
    ///
    /// let check = |n: u32| {
    ///     IO::try_read(move |limits: &Limits| {
    ///         if n <= limits.max { Ok(n) } else { Err(Error::new("over limit")) }
    ///     })
    /// };
    ///
    /// let env = Env { limits: Limits { max: 10 } };
    /// assert_eq!(check(3).run_sync(&env), Ok(3));
    /// assert_eq!(check(30).run_sync(&env), Err(Error::new("over limit")));
    /// ```
    pub fn try_read<C, R, F, Env>(f: F) -> FromFn<impl Fn(&Env) -> Fin<R> + Send + Sync, Env>
    where
        C: ?Sized,
        F: Fn(&C) -> Fin<R> + Send + Sync,
        R: Send,
        Env: Has<C> + Send + Sync,
    {
        from_fn(move |env: &Env| f(<Env as Has<C>>::get(env)))
    }

    /// Create an effect from an async operation against a capability.
    ///
    /// The closure receives the capability and returns a future. The future
    /// may not borrow the capability; copy out what it needs first.
    pub fn read_async<C, R, F, Fut, Env>(
        f: F,
    ) -> FromAsync<impl Fn(&Env) -> Fut + Send + Sync, Env>
    where
        C: ?Sized,
        F: Fn(&C) -> Fut + Send + Sync,
        Fut: Future<Output = Fin<R>> + Send,
        R: Send,
        Env: Has<C> + Send + Sync,
    {
        from_async(move |env: &Env| f(<Env as Has<C>>::get(env)))
    }

    /// Run an environment-free effect chosen by a capability.
    ///
    /// Shorthand for [`capability`].
    pub fn with<C, F, Eff, Env>(f: F) -> Capability<F, C, Env>
    where
        C: ?Sized,
        F: Fn(&C) -> Eff + Send + Sync,
        Eff: Effect<Env = ()>,
        Env: Has<C> + Send + Sync,
    {
        capability(f)
    }
}

/// Create an effect that fetches capability `C` from the environment, asks
/// it for an environment-free effect, and runs that effect.
pub fn capability<C, F, Eff, Env>(f: F) -> Capability<F, C, Env>
where
    C: ?Sized,
    F: Fn(&C) -> Eff + Send + Sync,
    Eff: Effect<Env = ()>,
    Env: Has<C> + Send + Sync,
{
    Capability {
        f,
        _phantom: PhantomData,
    }
}

/// Effect returned by [`capability`] and [`IO::with`].
pub struct Capability<F, C: ?Sized, Env> {
    f: F,
    _phantom: PhantomData<fn(&C, &Env)>,
}

impl<F, C: ?Sized, Env> std::fmt::Debug for Capability<F, C, Env> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Capability")
            .field("f", &"<function>")
            .finish()
    }
}

impl<F, C, Eff, Env> Effect for Capability<F, C, Env>
where
    C: ?Sized,
    F: Fn(&C) -> Eff + Send + Sync,
    Eff: Effect<Env = ()>,
    Env: Has<C> + Send + Sync,
{
    type Output = Eff::Output;
    type Env = Env;

    async fn run(&self, env: &Env) -> Fin<Self::Output> {
        let effect = (self.f)(<Env as Has<C>>::get(env));
        effect.run(&()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::prelude::*;
    use std::sync::{Arc, Mutex};

    struct Logger {
        lines: Arc<Mutex<Vec<String>>>,
    }

    struct Settings {
        greeting: String,
    }

    struct Env {
        logger: Logger,
        settings: Settings,
    }

    impl Has<Logger> for Env {
        fn get(&self) -> &Logger {
            &self.logger
        }
    }

    impl Has<Settings> for Env {
        fn get(&self) -> &Settings {
            &self.settings
        }
    }

    fn env() -> Env {
        Env {
            logger: Logger {
                lines: Arc::new(Mutex::new(Vec::new())),
            },
            settings: Settings {
                greeting: "hello".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn test_read_selects_capability_by_type() {
        let env = env();
        let greeting = IO::read(|s: &Settings| s.greeting.clone());

        assert_eq!(greeting.run(&env).await, Ok("hello".to_string()));
    }

    #[tokio::test]
    async fn test_capabilities_compose() {
        let env = env();
        let effect = IO::read(|s: &Settings| s.greeting.clone()).and_then(|greeting| {
            IO::read(move |logger: &Logger| {
                logger.lines.lock().unwrap().push(greeting.clone());
            })
        });

        assert_eq!(effect.run(&env).await, Ok(()));
        assert_eq!(*env.logger.lines.lock().unwrap(), vec!["hello".to_string()]);
    }

    #[tokio::test]
    async fn test_try_read_propagates_failure() {
        let env = env();
        let effect = IO::try_read(|_: &Settings| -> Fin<()> { Err(Error::new("denied")) });

        assert_eq!(effect.run(&env).await, Err(Error::new("denied")));
    }

    #[tokio::test]
    async fn test_read_async() {
        let env = env();
        let effect = IO::read_async(|s: &Settings| {
            let len = s.greeting.len();
            async move { Ok(len) }
        });

        assert_eq!(effect.run(&env).await, Ok(5));
    }

    #[tokio::test]
    async fn test_with_runs_env_free_effect() {
        let env = env();
        let effect = IO::with(|s: &Settings| pure(s.greeting.to_uppercase()));

        assert_eq!(effect.run(&env).await, Ok("HELLO".to_string()));
    }
}
