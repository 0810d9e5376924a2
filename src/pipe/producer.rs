//! The `Producer` type.

use std::future::Future;

use futures::stream::{self, Stream};

use crate::effect::Effect;
use crate::error::{Error, Fin};

/// Repeatedly runs a source effect and yields each value downstream.
///
/// A producer is unbounded unless limited with [`take`](Producer::take); it
/// then stops cleanly after that many values.
pub struct Producer<Eff> {
    source: Eff,
    limit: Option<usize>,
}

impl<Eff> std::fmt::Debug for Producer<Eff> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Producer")
            .field("source", &"<effect>")
            .field("limit", &self.limit)
            .finish()
    }
}

/// Create a producer from a source effect.
pub fn produce<Eff: Effect>(source: Eff) -> Producer<Eff> {
    Producer::new(source)
}

impl<Eff: Effect> Producer<Eff> {
    /// Create an unbounded producer.
    pub fn new(source: Eff) -> Self {
        Producer {
            source,
            limit: None,
        }
    }

    /// Stop after at most `n` values.
    pub fn take(self, n: usize) -> Self {
        Producer {
            source: self.source,
            limit: Some(self.limit.map_or(n, |limit| limit.min(n))),
        }
    }

    /// The source effect.
    pub fn source(&self) -> &Eff {
        &self.source
    }

    /// Run the source once and forward its value to `sink`.
    pub async fn yield_once<S, Fut>(&self, env: &Eff::Env, sink: S) -> Fin<()>
    where
        S: FnOnce(Eff::Output) -> Fut,
        Fut: Future<Output = ()>,
    {
        let value = self.source.run(env).await?;
        sink(value).await;
        Ok(())
    }

    /// Stream every value into `sink`, in order.
    ///
    /// Returns `Ok(())` once the limit is reached; otherwise the first
    /// failure of the source, unchanged.
    ///
    /// # Example
    ///
    /// ```rust
    /// use catchwater::effect::prelude::*;
    /// use catchwater::pipe::produce;
    /// use std::sync::{Arc, Mutex};
    ///
    /// # tokio_test::block_on(async {
    /// let seen = Arc::new(Mutex::new(Vec::new()));
    /// let sink_seen = seen.clone();
    ///
    /// let result = produce(pure::<_, ()>("tick"))
    ///     .take(3)
    ///     .run_with_sink(&(), |item| {
    ///         let seen = sink_seen.clone();
    ///         async move { seen.lock().unwrap().push(item) }
    ///     })
    ///     .await;
    ///
    /// assert_eq!(result, Ok(()));
    /// assert_eq!(*seen.lock().unwrap(), vec!["tick"; 3]);
    /// # });
    /// ```
    pub async fn run_with_sink<S, Fut>(&self, env: &Eff::Env, sink: S) -> Fin<()>
    where
        S: Fn(Eff::Output) -> Fut,
        Fut: Future<Output = ()>,
    {
        let mut produced = 0;
        while self.limit.is_none_or(|limit| produced < limit) {
            match self.source.run(env).await {
                Ok(value) => {
                    sink(value).await;
                    produced += 1;
                }
                Err(error) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(produced, error = %error, "producer stopped");
                    return Err(error);
                }
            }
        }
        Ok(())
    }

    /// Expose the producer as a [`Stream`].
    ///
    /// Each value arrives as `Ok`. A failure of the source arrives as a final
    /// `Err` item, after which the stream ends.
    pub fn stream<'a>(
        &'a self,
        env: &'a Eff::Env,
    ) -> impl Stream<Item = Fin<Eff::Output>> + Send + 'a {
        stream::unfold((0usize, false), move |(produced, done)| async move {
            if done || self.limit.is_some_and(|limit| produced >= limit) {
                return None;
            }
            match self.source.run(env).await {
                Ok(value) => Some((Ok(value), (produced + 1, false))),
                Err(error) => Some((Err(error), (produced, true))),
            }
        })
    }

    /// Drain the producer into a vector.
    ///
    /// The error that ended the stream, if any, is returned alongside the
    /// values produced before it.
    pub async fn collect(&self, env: &Eff::Env) -> (Vec<Eff::Output>, Option<Error>) {
        let mut values = Vec::new();
        let mut produced = 0;
        while self.limit.is_none_or(|limit| produced < limit) {
            match self.source.run(env).await {
                Ok(value) => {
                    values.push(value);
                    produced += 1;
                }
                Err(error) => return (values, Some(error)),
            }
        }
        (values, None)
    }
}
