//! Effects produced by the catch algebra.

use crate::catch::Catch;
use crate::effect::Effect;
use crate::error::{Error, Fin};

/// The effect returned by [`Catch::attempt`]: resolves one error through a
/// chain of strategies.
pub struct Attempt<A, Env> {
    catch: Catch<A, Env>,
    error: Error,
}

impl<A, Env> std::fmt::Debug for Attempt<A, Env> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attempt")
            .field("catch", &self.catch)
            .field("error", &self.error)
            .finish()
    }
}

impl<A, Env> Attempt<A, Env> {
    pub(crate) fn new(catch: Catch<A, Env>, error: Error) -> Self {
        Attempt { catch, error }
    }
}

impl<A, Env> Effect for Attempt<A, Env>
where
    A: Send,
    Env: Send + Sync,
{
    type Output = A;
    type Env = Env;

    async fn run(&self, env: &Env) -> Fin<A> {
        self.catch.resolve(self.error.clone(), env).await
    }
}

/// An effect whose failures are resolved through a [`Catch`] chain.
///
/// Created by [`EffectExt::catch`](crate::effect::EffectExt::catch).
pub struct Catching<Inner: Effect> {
    inner: Inner,
    catch: Catch<Inner::Output, Inner::Env>,
}

impl<Inner: Effect> std::fmt::Debug for Catching<Inner> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catching")
            .field("inner", &"<effect>")
            .field("catch", &self.catch)
            .finish()
    }
}

impl<Inner: Effect> Catching<Inner> {
    pub(crate) fn new(inner: Inner, catch: Catch<Inner::Output, Inner::Env>) -> Self {
        Catching { inner, catch }
    }

    /// Chain another strategy after the ones already attached.
    pub fn catch(self, next: Catch<Inner::Output, Inner::Env>) -> Self {
        Catching {
            inner: self.inner,
            catch: self.catch.or(next),
        }
    }
}

impl<Inner: Effect> Effect for Catching<Inner> {
    type Output = Inner::Output;
    type Env = Inner::Env;

    async fn run(&self, env: &Self::Env) -> Fin<Self::Output> {
        match self.inner.run(env).await {
            Ok(value) => Ok(value),
            Err(error) => self.catch.resolve(error, env).await,
        }
    }
}
