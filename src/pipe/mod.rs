//! Producers: streaming values out of a re-runnable effect.
//!
//! A [`Producer`] runs its source effect again and again, forwarding each
//! value downstream as soon as it is produced. It never catches: the first
//! failure of the source ends the stream and is handed to the consumer
//! exactly as the source produced it.
//!
//! ```rust
//! use catchwater::effect::prelude::*;
//! use catchwater::pipe::Producer;
//! use std::sync::atomic::{AtomicU32, Ordering};
//!
//! # tokio_test::block_on(async {
//! let next = AtomicU32::new(0);
//! let counter = Producer::new(from_fn(move |_: &()| {
//!     let n = next.fetch_add(1, Ordering::SeqCst);
//!     if n < 3 { Ok(n) } else { Err(Error::end_of_stream()) }
//! }));
//!
//! let (values, error) = counter.collect(&()).await;
//! assert_eq!(values, vec![0, 1, 2]);
//! assert_eq!(error, Some(Error::end_of_stream()));
//! # });
//! ```
//!
//! Consumers are plain async functions, the same shape a sink takes anywhere
//! else: `Fn(T) -> impl Future<Output = ()>`.

mod producer;

pub use producer::{produce, Producer};

#[cfg(test)]
mod tests;
