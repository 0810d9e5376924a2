//! Declarative error recovery.
//!
//! A [`Catch`] is an ordered list of recovery strategies. Each strategy pairs
//! a predicate over [`Error`] with one of four handler shapes:
//!
//! | Kind        | Handler                        | Outcome when matched           |
//! |-------------|--------------------------------|--------------------------------|
//! | `Value`     | `Error -> A`                   | success with the value         |
//! | `Remap`     | `Error -> Error`               | failure with the new error     |
//! | `Effect`    | `Error -> impl Effect<Env=()>` | whatever that effect yields    |
//! | `EnvEffect` | `Error -> impl Effect<Env=RT>` | whatever that effect yields    |
//!
//! # Resolution
//!
//! Strategies are consulted strictly left to right with the *current* error:
//!
//! 1. predicate false: the error passes to the next strategy unchanged
//! 2. predicate true: the handler runs to completion
//! 3. handler success: resolution stops with that value
//! 4. handler failure (including a remapped error): that failure becomes the
//!    current error for the next strategy
//!
//! When every strategy has been consulted the current error is re-raised.
//! Because [`Catch::or`] concatenates the two lists, grouping never changes
//! the outcome: `(a | b) | c` and `a | (b | c)` are the same list.
//!
//! Nothing is retried: every handler runs at most once per failure.
//!
//! # Example
//!
//! ```rust
//! use catchwater::prelude::*;
//!
//! # tokio_test::block_on(async {
//! let recover = Catch::remap_message("timeout", |_| Error::new("unavailable"))
//!     | Catch::value_message("unavailable", |_| "cached".to_string());
//!
//! let effect = fail::<String, ()>("timeout").catch(recover);
//! assert_eq!(effect.run(&()).await, Ok("cached".to_string()));
//! # });
//! ```

mod attempt;

use std::sync::Arc;

pub use attempt::{Attempt, Catching};

use crate::effect::{BoxedEffect, Effect, EffectExt};
use crate::error::{Error, Fin};

/// Shared predicate deciding whether a strategy applies to an error.
pub type Predicate = Arc<dyn Fn(&Error) -> bool + Send + Sync>;

/// The shape of a strategy's handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatchKind {
    /// Replaces the failure with a success value.
    Value,
    /// Replaces the failure with another failure.
    Remap,
    /// Recovers with an environment-free effect.
    Effect,
    /// Recovers with an effect that reads the environment.
    EnvEffect,
}

enum Handler<A, Env> {
    Value(Arc<dyn Fn(Error) -> A + Send + Sync>),
    Remap(Arc<dyn Fn(Error) -> Error + Send + Sync>),
    Effect(Arc<dyn Fn(Error) -> BoxedEffect<A, ()> + Send + Sync>),
    EnvEffect(Arc<dyn Fn(Error) -> BoxedEffect<A, Env> + Send + Sync>),
}

impl<A, Env> Clone for Handler<A, Env> {
    fn clone(&self) -> Self {
        match self {
            Handler::Value(f) => Handler::Value(Arc::clone(f)),
            Handler::Remap(f) => Handler::Remap(Arc::clone(f)),
            Handler::Effect(f) => Handler::Effect(Arc::clone(f)),
            Handler::EnvEffect(f) => Handler::EnvEffect(Arc::clone(f)),
        }
    }
}

/// A single predicate + handler pair.
pub struct Strategy<A, Env = ()> {
    predicate: Predicate,
    handler: Handler<A, Env>,
}

impl<A, Env> Clone for Strategy<A, Env> {
    fn clone(&self) -> Self {
        Strategy {
            predicate: Arc::clone(&self.predicate),
            handler: self.handler.clone(),
        }
    }
}

impl<A, Env> std::fmt::Debug for Strategy<A, Env> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Strategy")
            .field("kind", &self.kind())
            .field("predicate", &"<predicate>")
            .finish()
    }
}

impl<A, Env> Strategy<A, Env> {
    /// The shape of this strategy's handler.
    pub fn kind(&self) -> CatchKind {
        match self.handler {
            Handler::Value(_) => CatchKind::Value,
            Handler::Remap(_) => CatchKind::Remap,
            Handler::Effect(_) => CatchKind::Effect,
            Handler::EnvEffect(_) => CatchKind::EnvEffect,
        }
    }

    /// Whether the predicate accepts `error`.
    pub fn matches(&self, error: &Error) -> bool {
        (self.predicate)(error)
    }
}

impl<A, Env> Strategy<A, Env>
where
    A: Send,
    Env: Send + Sync,
{
    /// Decide the outcome for one error: pass through, or run the handler.
    async fn apply(&self, error: Error, env: &Env) -> Fin<A> {
        if !self.matches(&error) {
            return Err(error);
        }
        match &self.handler {
            Handler::Value(f) => Ok(f(error)),
            Handler::Remap(f) => Err(f(error)),
            Handler::Effect(f) => {
                let effect = f(error);
                effect.run(&()).await
            }
            Handler::EnvEffect(f) => {
                let effect = f(error);
                effect.run(env).await
            }
        }
    }
}

/// An ordered chain of recovery strategies.
///
/// `Env` is `()` for chains that never read an environment. Value, remap and
/// environment-free effect strategies fit any `Env`, so combining them with
/// an [`env_effect`](Catch::env_effect) strategy yields a chain bound to that
/// environment.
pub struct Catch<A, Env = ()> {
    strategies: Vec<Strategy<A, Env>>,
}

impl<A, Env> Clone for Catch<A, Env> {
    fn clone(&self) -> Self {
        Catch {
            strategies: self.strategies.clone(),
        }
    }
}

impl<A, Env> std::fmt::Debug for Catch<A, Env> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catch")
            .field("strategies", &self.kinds())
            .finish()
    }
}

impl<A, Env> Default for Catch<A, Env> {
    fn default() -> Self {
        Self::none()
    }
}

impl<A, Env> Catch<A, Env> {
    /// A chain with no strategies; it re-raises every error.
    ///
    /// This is the identity of [`or`](Catch::or) and the natural seed when
    /// folding a dynamic list of strategies.
    pub fn none() -> Self {
        Catch {
            strategies: Vec::new(),
        }
    }

    fn single(predicate: Predicate, handler: Handler<A, Env>) -> Self {
        Catch {
            strategies: vec![Strategy { predicate, handler }],
        }
    }

    /// Recover with a value when `predicate` matches.
    pub fn value<P, F>(predicate: P, f: F) -> Self
    where
        P: Fn(&Error) -> bool + Send + Sync + 'static,
        F: Fn(Error) -> A + Send + Sync + 'static,
    {
        Self::single(Arc::new(predicate), Handler::Value(Arc::new(f)))
    }

    /// Recover with a value from any error.
    pub fn value_all<F>(f: F) -> Self
    where
        F: Fn(Error) -> A + Send + Sync + 'static,
    {
        Self::value(|_| true, f)
    }

    /// Recover with a value from a message error with exactly `text`.
    pub fn value_message<F>(text: impl Into<String>, f: F) -> Self
    where
        F: Fn(Error) -> A + Send + Sync + 'static,
    {
        Self::value(message_is(text.into()), f)
    }

    /// Replace the error with another one when `predicate` matches.
    ///
    /// The replacement is still a failure, so it is handed on to any
    /// strategy chained after this one.
    pub fn remap<P, F>(predicate: P, f: F) -> Self
    where
        P: Fn(&Error) -> bool + Send + Sync + 'static,
        F: Fn(Error) -> Error + Send + Sync + 'static,
    {
        Self::single(Arc::new(predicate), Handler::Remap(Arc::new(f)))
    }

    /// Replace any error with another one.
    pub fn remap_all<F>(f: F) -> Self
    where
        F: Fn(Error) -> Error + Send + Sync + 'static,
    {
        Self::remap(|_| true, f)
    }

    /// Replace a message error with exactly `text`.
    pub fn remap_message<F>(text: impl Into<String>, f: F) -> Self
    where
        F: Fn(Error) -> Error + Send + Sync + 'static,
    {
        Self::remap(message_is(text.into()), f)
    }

    /// Recover with an environment-free effect when `predicate` matches.
    pub fn effect<P, F, Eff>(predicate: P, f: F) -> Self
    where
        P: Fn(&Error) -> bool + Send + Sync + 'static,
        F: Fn(Error) -> Eff + Send + Sync + 'static,
        Eff: Effect<Output = A, Env = ()> + 'static,
        A: 'static,
    {
        Self::single(
            Arc::new(predicate),
            Handler::Effect(Arc::new(move |error| f(error).boxed())),
        )
    }

    /// Recover from any error with an environment-free effect.
    pub fn effect_all<F, Eff>(f: F) -> Self
    where
        F: Fn(Error) -> Eff + Send + Sync + 'static,
        Eff: Effect<Output = A, Env = ()> + 'static,
        A: 'static,
    {
        Self::effect(|_| true, f)
    }

    /// Recover from a message error with exactly `text` with an
    /// environment-free effect.
    pub fn effect_message<F, Eff>(text: impl Into<String>, f: F) -> Self
    where
        F: Fn(Error) -> Eff + Send + Sync + 'static,
        Eff: Effect<Output = A, Env = ()> + 'static,
        A: 'static,
    {
        Self::effect(message_is(text.into()), f)
    }

    /// Recover with an effect that reads the environment when `predicate`
    /// matches.
    pub fn env_effect<P, F, Eff>(predicate: P, f: F) -> Self
    where
        P: Fn(&Error) -> bool + Send + Sync + 'static,
        F: Fn(Error) -> Eff + Send + Sync + 'static,
        Eff: Effect<Output = A, Env = Env> + 'static,
        A: 'static,
        Env: 'static,
    {
        Self::single(
            Arc::new(predicate),
            Handler::EnvEffect(Arc::new(move |error| f(error).boxed())),
        )
    }

    /// Recover from any error with an effect that reads the environment.
    pub fn env_effect_all<F, Eff>(f: F) -> Self
    where
        F: Fn(Error) -> Eff + Send + Sync + 'static,
        Eff: Effect<Output = A, Env = Env> + 'static,
        A: 'static,
        Env: 'static,
    {
        Self::env_effect(|_| true, f)
    }

    /// Chain `next` after this chain.
    ///
    /// A failure this chain cannot turn into a success, including one its
    /// own handlers produced, is handed to `next`.
    pub fn or(mut self, next: Catch<A, Env>) -> Self {
        self.strategies.extend(next.strategies);
        self
    }

    /// Fold any number of chains, left to right, from [`Catch::none`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use catchwater::prelude::*;
    ///
    /// let handlers: Vec<Catch<i32>> = (0..3)
    ///     .map(|i| Catch::value_message(format!("e{}", i), move |_| i))
    ///     .collect();
    /// let chain = Catch::any(handlers);
    /// assert_eq!(chain.len(), 3);
    /// assert_eq!(chain.attempt(Error::new("e2")).run_sync(&()), Ok(2));
    /// ```
    pub fn any(chains: impl IntoIterator<Item = Catch<A, Env>>) -> Self {
        chains.into_iter().fold(Catch::none(), Catch::or)
    }

    /// Narrow every predicate so that cancellation errors are never
    /// recovered from.
    ///
    /// # Example
    ///
    /// ```rust
    /// use catchwater::prelude::*;
    ///
    /// let chain = Catch::<i32>::value_all(|_| 0).unless_cancelled();
    /// assert_eq!(chain.attempt(Error::new("oops")).run_sync(&()), Ok(0));
    /// assert_eq!(
    ///     chain.attempt(Error::cancelled()).run_sync(&()),
    ///     Err(Error::cancelled())
    /// );
    /// ```
    pub fn unless_cancelled(self) -> Self {
        let strategies = self
            .strategies
            .into_iter()
            .map(|strategy| {
                let predicate = strategy.predicate;
                Strategy {
                    predicate: Arc::new(move |error: &Error| {
                        !error.is_cancelled() && predicate(error)
                    }),
                    handler: strategy.handler,
                }
            })
            .collect();
        Catch { strategies }
    }

    /// The strategies of this chain, in resolution order.
    pub fn strategies(&self) -> &[Strategy<A, Env>] {
        &self.strategies
    }

    /// The handler shapes of this chain, in resolution order.
    pub fn kinds(&self) -> Vec<CatchKind> {
        self.strategies.iter().map(Strategy::kind).collect()
    }

    /// Number of strategies in this chain.
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Whether this chain has no strategies.
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Whether no strategy in this chain reads the environment.
    pub fn is_env_free(&self) -> bool {
        self.strategies
            .iter()
            .all(|strategy| strategy.kind() != CatchKind::EnvEffect)
    }

    /// An effect that resolves `error` through this chain.
    ///
    /// If no strategy matches, the effect fails with exactly `error`.
    pub fn attempt(&self, error: Error) -> Attempt<A, Env> {
        Attempt::new(self.clone(), error)
    }
}

impl<A, Env> Catch<A, Env>
where
    A: Send,
    Env: Send + Sync,
{
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    pub(crate) async fn resolve(&self, error: Error, env: &Env) -> Fin<A> {
        let mut current = error;
        for (index, strategy) in self.strategies.iter().enumerate() {
            #[cfg(feature = "tracing")]
            let kind = strategy.kind();
            match strategy.apply(current, env).await {
                Ok(value) => {
                    #[cfg(feature = "tracing")]
                    tracing::trace!(strategy = index, ?kind, "catch strategy recovered");
                    return Ok(value);
                }
                Err(next) => {
                    #[cfg(feature = "tracing")]
                    tracing::trace!(strategy = index, ?kind, error = %next, "catch strategy passed failure on");
                    current = next;
                }
            }
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(error = %current, strategies = self.strategies.len(), "catch chain exhausted");
        Err(current)
    }
}

impl<A> Catch<A, ()>
where
    A: Send + 'static,
{
    /// Use an environment-free chain inside any environment.
    ///
    /// Handlers written for the unit environment become environment-free
    /// effect handlers, so the chain behaves identically.
    pub fn widen<Env>(self) -> Catch<A, Env> {
        let strategies = self
            .strategies
            .into_iter()
            .map(|strategy| Strategy {
                predicate: strategy.predicate,
                handler: match strategy.handler {
                    Handler::Value(f) => Handler::Value(f),
                    Handler::Remap(f) => Handler::Remap(f),
                    Handler::Effect(f) | Handler::EnvEffect(f) => Handler::Effect(f),
                },
            })
            .collect();
        Catch { strategies }
    }
}

impl<A, Env> std::ops::BitOr for Catch<A, Env> {
    type Output = Catch<A, Env>;

    fn bitor(self, next: Self) -> Self::Output {
        self.or(next)
    }
}

fn message_is(text: String) -> impl Fn(&Error) -> bool + Send + Sync + 'static {
    move |error: &Error| error.is_message(&text)
}

#[cfg(test)]
mod tests;
