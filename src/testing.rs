//! Testing utilities.
//!
//! In-memory capabilities, a ready-made environment that advertises all of
//! them, assertion macros for [`Fin`](crate::Fin) outcomes and (with the
//! `proptest` feature) an `Arbitrary` implementation for [`Error`].
//!
//! # Examples
//!
//! ## Scripted Console
//!
//! ```rust
//! use catchwater::effect::prelude::*;
//! use catchwater::sys::console;
//! use catchwater::testing::{MemoryConsole, TestEnv};
//!
//! let env = TestEnv::with_console(MemoryConsole::new().with_lines(["42"]));
//!
//! let effect = console::read_line()
//!     .and_then(|line| from_result(line.parse::<i32>().map_err(Error::from_fault)))
//!     .and_then(|n| console::write_line(format!("{}", n * 2)));
//!
//! effect.run_sync(&env).unwrap();
//! assert_eq!(env.console.output(), "84\n");
//! ```
//!
//! ## Assertion Macros
//!
//! ```rust
//! use catchwater::{assert_fail, assert_succ, Error, Fin};
//!
//! let ok: Fin<i32> = Ok(42);
//! assert_succ!(ok);
//! assert_succ!(ok, 42);
//!
//! let failed: Fin<i32> = Err(Error::new("boom"));
//! assert_fail!(failed);
//! assert_fail!(failed, Error::new("boom"));
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, SystemTime};

use crate::capability::Has;
use crate::effect::{from_fn, BoxedEffect, EffectExt};
use crate::error::{Error, Fin};
use crate::sys::cancel::CancelToken;
use crate::sys::console::{Color, ConsoleIO, KeyEvent};
#[cfg(feature = "json")]
use crate::sys::json::{JsonIO, LiveJson};
use crate::sys::time::TimeIO;

fn locked<T>(state: &Mutex<T>) -> Fin<MutexGuard<'_, T>> {
    state
        .lock()
        .map_err(|_| Error::new("test capability state poisoned"))
}

#[derive(Debug)]
struct ConsoleState {
    keys: VecDeque<char>,
    lines: VecDeque<String>,
    output: String,
    clears: usize,
    foreground: Color,
    background: Color,
}

/// A [`ConsoleIO`] reading scripted input and recording output in memory.
///
/// Clones share the same state, so a test can keep one handle while the
/// environment owns another.
#[derive(Debug, Clone)]
pub struct MemoryConsole {
    state: Arc<Mutex<ConsoleState>>,
}

impl Default for MemoryConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryConsole {
    /// A console with no input.
    pub fn new() -> Self {
        MemoryConsole {
            state: Arc::new(Mutex::new(ConsoleState {
                keys: VecDeque::new(),
                lines: VecDeque::new(),
                output: String::new(),
                clears: 0,
                foreground: Color::FOREGROUND,
                background: Color::BACKGROUND,
            })),
        }
    }

    /// Queue lines for `read_line`.
    pub fn with_lines<I, S>(self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let Ok(mut state) = self.state.lock() {
            state.lines.extend(lines.into_iter().map(Into::into));
        }
        self
    }

    /// Queue characters for `read` and `read_key`.
    pub fn with_keys(self, keys: &str) -> Self {
        if let Ok(mut state) = self.state.lock() {
            state.keys.extend(keys.chars());
        }
        self
    }

    /// Everything written so far.
    pub fn output(&self) -> String {
        self.inspect(|state| state.output.clone())
    }

    /// Everything written so far, split into lines.
    pub fn output_lines(&self) -> Vec<String> {
        self.output().lines().map(str::to_string).collect()
    }

    /// How many times the console was cleared.
    pub fn clears(&self) -> usize {
        self.inspect(|state| state.clears)
    }

    fn inspect<T: Default>(&self, f: impl FnOnce(&ConsoleState) -> T) -> T {
        self.state.lock().map(|state| f(&*state)).unwrap_or_default()
    }

    fn effect<T, F>(&self, f: F) -> BoxedEffect<T>
    where
        T: Send + 'static,
        F: Fn(&mut ConsoleState) -> T + Send + Sync + 'static,
    {
        let state = Arc::clone(&self.state);
        from_fn(move |_: &()| locked(&state).map(|mut state| f(&mut *state))).boxed()
    }
}

impl ConsoleIO for MemoryConsole {
    fn read_key(&self) -> BoxedEffect<Option<KeyEvent>> {
        self.effect(|state| state.keys.pop_front().map(KeyEvent::from))
    }

    fn read(&self) -> BoxedEffect<Option<char>> {
        self.effect(|state| state.keys.pop_front())
    }

    fn read_line(&self) -> BoxedEffect<Option<String>> {
        self.effect(|state| state.lines.pop_front())
    }

    fn write(&self, text: &str) -> BoxedEffect<()> {
        let text = text.to_string();
        self.effect(move |state| state.output.push_str(&text))
    }

    fn write_line(&self, text: &str) -> BoxedEffect<()> {
        let line = format!("{}\n", text);
        self.effect(move |state| state.output.push_str(&line))
    }

    fn clear(&self) -> BoxedEffect<()> {
        self.effect(|state| {
            state.output.clear();
            state.clears += 1;
        })
    }

    fn set_color(&self, color: Color) -> BoxedEffect<()> {
        self.effect(move |state| state.foreground = color)
    }

    fn set_bg_color(&self, color: Color) -> BoxedEffect<()> {
        self.effect(move |state| state.background = color)
    }

    fn reset_color(&self) -> BoxedEffect<()> {
        self.effect(|state| {
            state.foreground = Color::FOREGROUND;
            state.background = Color::BACKGROUND;
        })
    }

    fn color(&self) -> BoxedEffect<Color> {
        self.effect(|state| state.foreground)
    }

    fn bg_color(&self) -> BoxedEffect<Color> {
        self.effect(|state| state.background)
    }
}

#[derive(Debug)]
struct ClockState {
    now: SystemTime,
    sleeps: Vec<Duration>,
}

/// A [`TimeIO`] whose clock only moves when told to.
///
/// `sleep` returns immediately, advancing the clock and recording the
/// requested duration.
#[derive(Debug, Clone)]
pub struct ManualTime {
    state: Arc<Mutex<ClockState>>,
}

impl Default for ManualTime {
    fn default() -> Self {
        Self::new(SystemTime::UNIX_EPOCH)
    }
}

impl ManualTime {
    /// A clock reading `start`.
    pub fn new(start: SystemTime) -> Self {
        ManualTime {
            state: Arc::new(Mutex::new(ClockState {
                now: start,
                sleeps: Vec::new(),
            })),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        if let Ok(mut state) = self.state.lock() {
            state.now += by;
        }
    }

    /// Durations passed to `sleep`, in order.
    pub fn sleeps(&self) -> Vec<Duration> {
        self.state
            .lock()
            .map(|state| state.sleeps.clone())
            .unwrap_or_default()
    }
}

impl TimeIO for ManualTime {
    fn now(&self) -> BoxedEffect<SystemTime> {
        let state = Arc::clone(&self.state);
        from_fn(move |_: &()| locked(&state).map(|state| state.now)).boxed()
    }

    fn sleep(&self, duration: Duration) -> BoxedEffect<()> {
        let state = Arc::clone(&self.state);
        from_fn(move |_: &()| {
            let mut state = locked(&state)?;
            state.now += duration;
            state.sleeps.push(duration);
            Ok(())
        })
        .boxed()
    }
}

/// An environment advertising every capability in [`sys`](crate::sys),
/// backed by the in-memory implementations.
///
/// # Example
///
/// ```rust
/// use catchwater::testing::{ManualTime, MemoryConsole, TestEnv};
///
/// let env = TestEnv::new()
///     .console(MemoryConsole::new().with_lines(["hi"]))
///     .time(ManualTime::default());
/// assert!(!env.cancel.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TestEnv {
    /// The console capability.
    pub console: MemoryConsole,
    /// The clock capability.
    pub time: ManualTime,
    /// The cancellation signal.
    pub cancel: CancelToken,
}

impl TestEnv {
    /// An environment with an empty console, a clock at the Unix epoch and
    /// an unsignalled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for `TestEnv::new().console(console)`.
    pub fn with_console(console: MemoryConsole) -> Self {
        Self::new().console(console)
    }

    /// Replace the console.
    pub fn console(self, console: MemoryConsole) -> Self {
        TestEnv { console, ..self }
    }

    /// Replace the clock.
    pub fn time(self, time: ManualTime) -> Self {
        TestEnv { time, ..self }
    }

    /// Replace the cancellation token.
    pub fn cancel(self, cancel: CancelToken) -> Self {
        TestEnv { cancel, ..self }
    }
}

impl Has<dyn ConsoleIO> for TestEnv {
    fn get(&self) -> &(dyn ConsoleIO + 'static) {
        &self.console
    }
}

impl Has<dyn TimeIO> for TestEnv {
    fn get(&self) -> &(dyn TimeIO + 'static) {
        &self.time
    }
}

impl Has<CancelToken> for TestEnv {
    fn get(&self) -> &CancelToken {
        &self.cancel
    }
}

#[cfg(feature = "json")]
impl Has<dyn JsonIO> for TestEnv {
    fn get(&self) -> &(dyn JsonIO + 'static) {
        &LiveJson
    }
}

/// Assert that an outcome succeeded, optionally with a given value.
///
/// # Example
///
/// ```rust
/// use catchwater::{assert_succ, Fin};
///
/// let result: Fin<&str> = Ok("done");
/// assert_succ!(result, "done");
/// ```
#[macro_export]
macro_rules! assert_succ {
    ($result:expr) => {
        match &$result {
            ::core::result::Result::Ok(_) => {}
            ::core::result::Result::Err(e) => {
                panic!("Expected Succ, got Fail: {:?}", e);
            }
        }
    };
    ($result:expr, $expected:expr) => {
        match &$result {
            ::core::result::Result::Ok(value) => assert_eq!(*value, $expected),
            ::core::result::Result::Err(e) => {
                panic!("Expected Succ({:?}), got Fail: {:?}", $expected, e);
            }
        }
    };
}

/// Assert that an outcome failed, optionally with a given error.
///
/// # Example
///
/// ```rust
/// use catchwater::{assert_fail, Error, Fin};
///
/// let result: Fin<i32> = Err(Error::end_of_stream());
/// assert_fail!(result, Error::end_of_stream());
/// ```
#[macro_export]
macro_rules! assert_fail {
    ($result:expr) => {
        match &$result {
            ::core::result::Result::Err(_) => {}
            ::core::result::Result::Ok(v) => {
                panic!("Expected Fail, got Succ: {:?}", v);
            }
        }
    };
    ($result:expr, $expected:expr) => {
        match &$result {
            ::core::result::Result::Err(e) => assert_eq!(*e, $expected),
            ::core::result::Result::Ok(v) => {
                panic!("Expected Fail({:?}), got Succ: {:?}", $expected, v);
            }
        }
    };
}

#[cfg(feature = "proptest")]
use proptest::prelude::*;

#[cfg(feature = "proptest")]
impl Arbitrary for Error {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        let leaf = prop_oneof![
            4 => "[a-z ]{1,16}".prop_map(Error::new),
            1 => Just(Error::end_of_stream()),
            1 => Just(Error::cancelled()),
            1 => "[a-z ]{1,16}".prop_map(|text| Error::from_fault(std::io::Error::other(text))),
        ];
        leaf.prop_recursive(3, 16, 4, |inner| {
            prop::collection::vec(inner, 2..4).prop_map(Error::Many)
        })
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_console_clones_share_state() {
        let console = MemoryConsole::new();
        let handle = console.clone();

        console.write_line("shared").run_sync(&()).unwrap();
        assert_eq!(handle.output_lines(), vec!["shared"]);
    }

    #[test]
    fn memory_console_reads_scripted_input() {
        let console = MemoryConsole::new().with_lines(["a"]).with_keys("k");

        assert_eq!(console.read_line().run_sync(&()), Ok(Some("a".to_string())));
        assert_eq!(console.read_line().run_sync(&()), Ok(None));
        assert_eq!(console.read_key().run_sync(&()), Ok(Some(KeyEvent::from('k'))));
        assert_eq!(console.read().run_sync(&()), Ok(None));
    }

    #[test]
    fn manual_time_advances() {
        let clock = ManualTime::default();
        clock.advance(Duration::from_secs(5));

        assert_eq!(
            clock.now().run_sync(&()),
            Ok(SystemTime::UNIX_EPOCH + Duration::from_secs(5))
        );
        assert!(clock.sleeps().is_empty());
    }

    #[test]
    fn test_env_builders_replace_capabilities() {
        let token = CancelToken::new();
        let env = TestEnv::new().cancel(token.clone());

        token.cancel();
        assert!(env.cancel.is_cancelled());
    }

    #[test]
    fn test_env_hands_out_trait_object_capabilities() {
        let env = TestEnv::new();

        let console: &dyn ConsoleIO = <TestEnv as Has<dyn ConsoleIO>>::get(&env);
        console.write_line("via has").run_sync(&()).unwrap();
        assert_eq!(env.console.output_lines(), vec!["via has"]);

        let time: &dyn TimeIO = <TestEnv as Has<dyn TimeIO>>::get(&env);
        time.sleep(Duration::from_secs(2)).run_sync(&()).unwrap();
        assert_eq!(env.time.sleeps(), vec![Duration::from_secs(2)]);
    }

    #[test]
    fn assert_succ_macro() {
        let result: Fin<i32> = Ok(42);
        assert_succ!(result);
        assert_succ!(result, 42);
    }

    #[test]
    fn assert_fail_macro() {
        let result: Fin<i32> = Err(Error::new("x"));
        assert_fail!(result);
        assert_fail!(result, Error::new("x"));
    }

    #[test]
    #[should_panic(expected = "Expected Succ, got Fail")]
    fn assert_succ_panics_on_failure() {
        let result: Fin<i32> = Err(Error::new("x"));
        assert_succ!(result);
    }

    #[test]
    #[should_panic(expected = "Expected Fail, got Succ")]
    fn assert_fail_panics_on_success() {
        let result: Fin<i32> = Ok(1);
        assert_fail!(result);
    }

    #[cfg(feature = "proptest")]
    mod proptest_tests {
        use super::*;

        proptest! {
            #[test]
            fn arbitrary_error_displays(error in any::<Error>()) {
                prop_assert!(!error.errors().is_empty());
                prop_assert!(!error.to_string().is_empty());
            }
        }
    }
}
