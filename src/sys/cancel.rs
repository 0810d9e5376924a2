//! Cooperative cancellation.
//!
//! Cancellation travels through the environment as a [`CancelToken`]
//! capability. Leaf effects observe it with [`check_cancelled`], which turns
//! a signalled token into [`Error::cancelled`]. From there it is an ordinary
//! error; use [`Catch::unless_cancelled`](crate::Catch::unless_cancelled) to
//! keep recovery chains from swallowing it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::capability::{Has, IO};
use crate::effect::Effect;
use crate::error::Error;

/// A shared cancellation flag.
///
/// Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a token that has not been signalled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal cancellation.
    pub fn cancel(&self) {
        #[cfg(feature = "tracing")]
        tracing::debug!("cancellation requested");
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been signalled.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Fail with [`Error::cancelled`] if the environment's token is signalled.
///
/// # Example
///
/// ```rust
/// use catchwater::effect::prelude::*;
/// use catchwater::sys::check_cancelled;
/// use catchwater::testing::TestEnv;
///
/// let env = TestEnv::new();
/// let step = check_cancelled().map(|()| "working");
///
/// assert_eq!(step.run_sync(&env), Ok("working"));
/// env.cancel.cancel();
/// assert!(step.run_sync(&env).unwrap_err().is_cancelled());
/// ```
pub fn check_cancelled<Env>() -> impl Effect<Output = (), Env = Env>
where
    Env: Has<CancelToken> + Send + Sync,
{
    IO::try_read(|token: &CancelToken| {
        if token.is_cancelled() {
            Err(Error::cancelled())
        } else {
            Ok(())
        }
    })
}
