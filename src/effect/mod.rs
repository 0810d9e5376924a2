//! Effects: deferred, re-runnable computations with a typed error channel.
//!
//! An effect is a recipe. Nothing happens until it is run with an
//! environment, and every run re-executes the recipe. The outcome is always a
//! [`Fin`](crate::Fin): either a value or an [`Error`](crate::Error), never an
//! unwinding fault (see [`invoke`]).
//!
//! # Zero-Cost by Default
//!
//! Combinators return concrete types, so a chain like the one below performs
//! no heap allocation:
//!
//! ```rust
//! use catchwater::effect::prelude::*;
//!
//! # tokio_test::block_on(async {
//! let effect = pure::<_, ()>(42)
//!     .map(|x| x + 1)
//!     .and_then(|x| pure(x * 2))
//!     .map(|x| x.to_string());
//!
//! assert_eq!(effect.run(&()).await, Ok("86".to_string()));
//! # });
//! ```
//!
//! # Environments
//!
//! Environment-free effects have `Env = ()`. Effects that need services read
//! them from their environment, usually through a
//! [capability](crate::capability). Sequencing requires a shared environment;
//! [`EffectExt::widen`] lifts an environment-free effect into one:
//!
//! ```rust
//! use catchwater::effect::prelude::*;
//!
//! struct AppEnv { base: i32 }
//!
//! # tokio_test::block_on(async {
//! let effect = asks(|env: &AppEnv| env.base)
//!     .and_then(|base| pure::<_, ()>(base * 2).widen());
//! assert_eq!(effect.run(&AppEnv { base: 21 }).await, Ok(42));
//! # });
//! ```
//!
//! # Sync and Async
//!
//! There is one effect type. `run` always returns a future; an effect that
//! never suspends completes on its first poll, and
//! [`EffectExt::run_sync`] uses that fast path before falling back to a
//! blocking executor. Mixing a suspending step into a chain makes the whole
//! chain suspend at that point, and nowhere else.

pub mod boxed;
pub mod combinators;
pub mod constructors;
pub mod ext;
pub mod parallel;
pub mod prelude;
pub mod reader;
pub mod runtime;
#[cfg(feature = "tracing")]
pub mod tracing;
mod trait_def;

// Re-export core trait
pub use trait_def::Effect;

// Re-export extension trait
pub use ext::EffectExt;

// Re-export boxed types
pub use boxed::{BoxFuture, BoxedEffect};

// Re-export all combinator types
pub use combinators::{
    AndThen, Fail, FromAsync, FromFn, FromResult, Guarded, Map, MapErr, OrElse, Pure, Retry,
};

// Re-export reader types
pub use reader::{Ask, Asks, Local, Widen};

// Re-export constructors
pub use constructors::{
    ask, asks, fail, from_async, from_fallible, from_fn, from_option, from_result, local, pure,
    widen,
};

// Re-export parallel functions
pub use parallel::{par2, par_all, par_try_all, race};

// Re-export runners
pub use runtime::{invoke, invoke_sync};

// Re-export tracing (when tracing feature is enabled)
#[cfg(feature = "tracing")]
pub use self::tracing::{EffectTracingExt, Instrument};
