//! # Catchwater
//!
//! > *"Catch the error, keep the current"*
//!
//! An effect runtime with declarative, composable error recovery.
//!
//! ## Philosophy
//!
//! **Catchwater** keeps failures in the data path:
//! - **Effects** are re-runnable recipes that end in a [`Fin`]: a value or an [`Error`]
//! - **Catch** chains decide, in order, whether and how to recover from an error
//!
//! Nothing unwinds past [`invoke`](effect::invoke), and nothing is recovered
//! from unless a strategy says so.
//!
//! ## Quick Example
//!
//! ```rust
//! use catchwater::prelude::*;
//!
//! fn fetch(id: u32) -> impl Effect<Output = String, Env = ()> {
//!     from_fn(move |_: &()| match id {
//!         0 => Err(Error::new("not found")),
//!         1 => Err(Error::new("timeout")),
//!         _ => Ok(format!("user-{}", id)),
//!     })
//! }
//!
//! let recover = Catch::value_message("not found", |_| "guest".to_string())
//!     | Catch::remap_message("timeout", |_| Error::new("unavailable"));
//!
//! assert_eq!(fetch(7).catch(recover.clone()).run_sync(&()), Ok("user-7".to_string()));
//! assert_eq!(fetch(0).catch(recover.clone()).run_sync(&()), Ok("guest".to_string()));
//! assert_eq!(fetch(1).catch(recover).run_sync(&()), Err(Error::new("unavailable")));
//! ```
//!
//! ## Capabilities
//!
//! Effects reach external services through their environment. An environment
//! advertises a service by implementing [`Has`](capability::Has); see
//! [`capability`] and the sample services in [`sys`].
//!
//! For more examples, see the `demos` directory.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod capability;
pub mod catch;
pub mod effect;
pub mod error;
pub mod pipe;
pub mod semigroup;
pub mod sys;
pub mod testing;

// Re-exports
pub use capability::{Has, IO};
pub use catch::{Catch, CatchKind};
pub use effect::{Effect, EffectExt};
pub use error::{Error, Fin};
pub use semigroup::Semigroup;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::capability::{Has, IO};
    pub use crate::effect::prelude::*;
    pub use crate::pipe::{produce, Producer};
    pub use crate::semigroup::Semigroup;
}
