//! Sample system capabilities.
//!
//! Each capability is an object-safe trait whose operations return
//! environment-free effects, plus a set of accessor functions that fetch the
//! capability from any environment advertising it through
//! [`Has`](crate::capability::Has).
//!
//! - [`console`] - keys, characters and lines in; text and colours out
//! - [`time`] - wall clock and sleeping
//! - [`cancel`] - cooperative cancellation signal
//! - `json` - document parsing (feature `json`)
//!
//! Live implementations talk to the real process (the live console needs
//! feature `terminal`); the
//! [`testing`](crate::testing) module carries in-memory ones.

pub mod cancel;
pub mod console;
#[cfg(feature = "json")]
pub mod json;
pub mod time;

pub use cancel::{check_cancelled, CancelToken};
pub use console::{Color, ConsoleIO, KeyEvent};
#[cfg(feature = "terminal")]
pub use console::LiveConsole;
#[cfg(feature = "json")]
pub use json::{JsonIO, LiveJson};
#[cfg(feature = "async")]
pub use time::{with_timeout, LiveTime, WithTimeout};
pub use time::TimeIO;
