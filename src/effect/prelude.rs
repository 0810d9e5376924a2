//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions
//! from the effect module, allowing users to quickly get started
//! with a single `use` statement.
//!
//! ```rust
//! use catchwater::effect::prelude::*;
//!
//! # tokio_test::block_on(async {
//! let effect = pure::<_, ()>(42)
//!     .map(|x| x * 2)
//!     .and_then(|x| pure(x + 1));
//!
//! assert_eq!(effect.execute(&()).await, Ok(85));
//! # });
//! ```
//!
//! The prelude exports:
//!
//! - **Core traits**: [`Effect`], [`EffectExt`]
//! - **Outcome and failure types**: [`Fin`], [`Error`]
//! - **Recovery**: [`Catch`], [`CatchKind`]
//! - **Free function constructors**: [`pure`], [`fail`], [`from_fn`], etc.
//! - **Reader operations**: [`ask`], [`asks`], [`local`], [`widen`]
//! - **Parallel execution**: [`par2`], [`par_all`], etc.
//! - **Runners**: [`invoke`], [`invoke_sync`]
//! - **Boxing utilities**: [`BoxedEffect`]

// Traits
pub use crate::effect::ext::EffectExt;
pub use crate::effect::trait_def::Effect;

// Outcome types
pub use crate::error::{Error, Fin};

// Recovery
pub use crate::catch::{Catch, CatchKind};

// Boxed Effect
pub use crate::effect::boxed::{BoxFuture, BoxedEffect};

// Combinator Types (for advanced use, usually `impl Effect` suffices)
pub use crate::effect::combinators::{
    AndThen, Fail, FromAsync, FromFn, FromResult, Guarded, Map, MapErr, OrElse, Pure, Retry,
};

// Reader Types
pub use crate::effect::reader::{Ask, Asks, Local, Widen};

// Constructors
pub use crate::effect::constructors::{
    ask, asks, fail, from_async, from_fallible, from_fn, from_option, from_result, local, pure,
    widen,
};

// Parallel
pub use crate::effect::parallel::{par2, par_all, par_try_all, race};

// Runners
pub use crate::effect::runtime::{invoke, invoke_sync};

// Tracing (when tracing feature is enabled)
#[cfg(feature = "tracing")]
pub use crate::effect::tracing::EffectTracingExt;
