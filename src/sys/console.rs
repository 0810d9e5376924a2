//! Console capability.
//!
//! [`ConsoleIO`] is the service; the free functions in this module fetch it
//! from the environment. Reads that find no data report it as `None` at the
//! capability level; the accessors turn that into
//! [`Error::end_of_stream`].
//!
//! ```rust
//! use catchwater::effect::prelude::*;
//! use catchwater::sys::console;
//! use catchwater::testing::{MemoryConsole, TestEnv};
//!
//! let env = TestEnv::with_console(MemoryConsole::new().with_lines(["Ada"]));
//!
//! let greet = console::read_line()
//!     .and_then(|name| console::write_line(format!("Hello, {}!", name)));
//!
//! assert_eq!(greet.run_sync(&env), Ok(()));
//! assert_eq!(env.console.output_lines(), vec!["Hello, Ada!"]);
//!
//! // Nothing left to read
//! assert_eq!(console::read_line().run_sync(&env), Err(Error::end_of_stream()));
//! ```

use crate::capability::{capability, Has};
use crate::effect::{from_option, BoxedEffect, Effect, EffectExt};
use crate::error::Error;
use crate::pipe::{produce, Producer};

/// The sixteen console colours.
///
/// Dark variants map to the standard ANSI palette, the others to its bright
/// counterparts.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    DarkBlue,
    DarkGreen,
    DarkCyan,
    DarkRed,
    DarkMagenta,
    DarkYellow,
    Gray,
    DarkGray,
    Blue,
    Green,
    Cyan,
    Red,
    Magenta,
    Yellow,
    White,
}

impl Color {
    /// Default foreground colour.
    pub const FOREGROUND: Color = Color::Gray;
    /// Default background colour.
    pub const BACKGROUND: Color = Color::Black;
}

/// A key read from the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The character the key produced.
    pub key: char,
}

impl From<char> for KeyEvent {
    fn from(key: char) -> Self {
        KeyEvent { key }
    }
}

/// Console service.
///
/// Every operation returns an environment-free effect, so implementations
/// own whatever state their effects touch. Reads return `None` when there is
/// nothing to read.
pub trait ConsoleIO: Send + Sync {
    /// Read a single key.
    fn read_key(&self) -> BoxedEffect<Option<KeyEvent>>;

    /// Read a single character.
    fn read(&self) -> BoxedEffect<Option<char>>;

    /// Read a line, without its terminator.
    fn read_line(&self) -> BoxedEffect<Option<String>>;

    /// Write text without a line terminator.
    fn write(&self, text: &str) -> BoxedEffect<()>;

    /// Write text followed by a line terminator.
    fn write_line(&self, text: &str) -> BoxedEffect<()>;

    /// Clear the screen.
    fn clear(&self) -> BoxedEffect<()>;

    /// Set the foreground colour.
    fn set_color(&self, color: Color) -> BoxedEffect<()>;

    /// Set the background colour.
    fn set_bg_color(&self, color: Color) -> BoxedEffect<()>;

    /// Restore the default colours.
    fn reset_color(&self) -> BoxedEffect<()>;

    /// Current foreground colour.
    fn color(&self) -> BoxedEffect<Color>;

    /// Current background colour.
    fn bg_color(&self) -> BoxedEffect<Color>;
}

#[cfg(feature = "terminal")]
pub use live::LiveConsole;

#[cfg(feature = "terminal")]
mod live {
    use std::io::{BufRead, Read};
    use std::sync::{Arc, Mutex};

    use crossterm::cursor::MoveTo;
    use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
    use crossterm::execute;
    use crossterm::style::{self, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
    use crossterm::terminal::{self, Clear, ClearType};

    use super::{Color, ConsoleIO, KeyEvent};
    use crate::effect::{from_fn, BoxedEffect, EffectExt};
    use crate::error::{Error, Fin};

    impl From<Color> for style::Color {
        fn from(color: Color) -> Self {
            match color {
                Color::Black => style::Color::Black,
                Color::DarkBlue => style::Color::DarkBlue,
                Color::DarkGreen => style::Color::DarkGreen,
                Color::DarkCyan => style::Color::DarkCyan,
                Color::DarkRed => style::Color::DarkRed,
                Color::DarkMagenta => style::Color::DarkMagenta,
                Color::DarkYellow => style::Color::DarkYellow,
                Color::Gray => style::Color::Grey,
                Color::DarkGray => style::Color::DarkGrey,
                Color::Blue => style::Color::Blue,
                Color::Green => style::Color::Green,
                Color::Cyan => style::Color::Cyan,
                Color::Red => style::Color::Red,
                Color::Magenta => style::Color::Magenta,
                Color::Yellow => style::Color::Yellow,
                Color::White => style::Color::White,
            }
        }
    }

    #[derive(Debug, Clone, Copy)]
    struct Colors {
        foreground: Color,
        background: Color,
    }

    /// [`ConsoleIO`] over the process's terminal.
    ///
    /// `read_key` reads terminal key events in raw mode. Ctrl+D ends the
    /// input and Ctrl+C fails with [`Error::cancelled`]. `read` and
    /// `read_line` consume standard input as UTF-8. Colours and clearing are
    /// crossterm commands written to standard output.
    #[derive(Debug, Clone)]
    pub struct LiveConsole {
        colors: Arc<Mutex<Colors>>,
    }

    impl Default for LiveConsole {
        fn default() -> Self {
            Self::new()
        }
    }

    impl LiveConsole {
        /// Create a console starting from the default colours.
        pub fn new() -> Self {
            LiveConsole {
                colors: Arc::new(Mutex::new(Colors {
                    foreground: Color::FOREGROUND,
                    background: Color::BACKGROUND,
                })),
            }
        }
    }

    fn with_colors<T>(colors: &Mutex<Colors>, f: impl FnOnce(&mut Colors) -> T) -> Fin<T> {
        let mut state = colors
            .lock()
            .map_err(|_| Error::new("console colour state poisoned"))?;
        Ok(f(&mut *state))
    }

    /// Raw mode for the lifetime of the guard.
    struct RawMode;

    impl RawMode {
        fn enable() -> Fin<Self> {
            terminal::enable_raw_mode()?;
            Ok(RawMode)
        }
    }

    impl Drop for RawMode {
        fn drop(&mut self) {
            let _ = terminal::disable_raw_mode();
        }
    }

    #[derive(Debug, PartialEq)]
    enum Keystroke {
        Key(KeyEvent),
        EndOfInput,
        Interrupted,
        Ignored,
    }

    fn keystroke(event: &Event) -> Keystroke {
        let Event::Key(key) = event else {
            return Keystroke::Ignored;
        };
        if key.kind != KeyEventKind::Press {
            return Keystroke::Ignored;
        }
        let control = key.modifiers.contains(KeyModifiers::CONTROL);
        let ch = match key.code {
            KeyCode::Char('d') if control => return Keystroke::EndOfInput,
            KeyCode::Char('c') if control => return Keystroke::Interrupted,
            KeyCode::Char(ch) => ch,
            KeyCode::Enter => '\n',
            KeyCode::Tab => '\t',
            KeyCode::Backspace => '\u{8}',
            KeyCode::Esc => '\u{1b}',
            _ => return Keystroke::Ignored,
        };
        Keystroke::Key(KeyEvent::from(ch))
    }

    /// Read one UTF-8 encoded character.
    fn read_char(input: &mut impl Read) -> Fin<Option<char>> {
        let mut buf = [0u8; 4];
        if input.read(&mut buf[..1])? == 0 {
            return Ok(None);
        }
        let width = match buf[0].leading_ones() {
            0 => 1,
            n @ 2..=4 => n as usize,
            _ => return Err(Error::new("invalid UTF-8 on standard input")),
        };
        input.read_exact(&mut buf[1..width])?;
        let text = std::str::from_utf8(&buf[..width]).map_err(Error::from_fault)?;
        Ok(text.chars().next())
    }

    impl ConsoleIO for LiveConsole {
        fn read_key(&self) -> BoxedEffect<Option<KeyEvent>> {
            from_fn(|_: &()| {
                let _raw = RawMode::enable()?;
                loop {
                    match keystroke(&event::read()?) {
                        Keystroke::Key(key) => return Ok(Some(key)),
                        Keystroke::EndOfInput => return Ok(None),
                        Keystroke::Interrupted => return Err(Error::cancelled()),
                        Keystroke::Ignored => {}
                    }
                }
            })
            .boxed()
        }

        fn read(&self) -> BoxedEffect<Option<char>> {
            from_fn(|_: &()| read_char(&mut std::io::stdin().lock())).boxed()
        }

        fn read_line(&self) -> BoxedEffect<Option<String>> {
            from_fn(|_: &()| {
                let mut line = String::new();
                if std::io::stdin().lock().read_line(&mut line)? == 0 {
                    return Ok(None);
                }
                let trimmed = line.trim_end_matches(['\n', '\r']).len();
                line.truncate(trimmed);
                Ok(Some(line))
            })
            .boxed()
        }

        fn write(&self, text: &str) -> BoxedEffect<()> {
            let text = text.to_string();
            from_fn(move |_: &()| {
                execute!(std::io::stdout(), Print(&text))?;
                Ok(())
            })
            .boxed()
        }

        fn write_line(&self, text: &str) -> BoxedEffect<()> {
            let line = format!("{}\n", text);
            from_fn(move |_: &()| {
                execute!(std::io::stdout(), Print(&line))?;
                Ok(())
            })
            .boxed()
        }

        fn clear(&self) -> BoxedEffect<()> {
            from_fn(|_: &()| {
                execute!(std::io::stdout(), Clear(ClearType::All), MoveTo(0, 0))?;
                Ok(())
            })
            .boxed()
        }

        fn set_color(&self, color: Color) -> BoxedEffect<()> {
            let colors = Arc::clone(&self.colors);
            from_fn(move |_: &()| {
                with_colors(&colors, |state| state.foreground = color)?;
                execute!(std::io::stdout(), SetForegroundColor(color.into()))?;
                Ok(())
            })
            .boxed()
        }

        fn set_bg_color(&self, color: Color) -> BoxedEffect<()> {
            let colors = Arc::clone(&self.colors);
            from_fn(move |_: &()| {
                with_colors(&colors, |state| state.background = color)?;
                execute!(std::io::stdout(), SetBackgroundColor(color.into()))?;
                Ok(())
            })
            .boxed()
        }

        fn reset_color(&self) -> BoxedEffect<()> {
            let colors = Arc::clone(&self.colors);
            from_fn(move |_: &()| {
                with_colors(&colors, |state| {
                    state.foreground = Color::FOREGROUND;
                    state.background = Color::BACKGROUND;
                })?;
                execute!(std::io::stdout(), ResetColor)?;
                Ok(())
            })
            .boxed()
        }

        fn color(&self) -> BoxedEffect<Color> {
            let colors = Arc::clone(&self.colors);
            from_fn(move |_: &()| with_colors(&colors, |state| state.foreground)).boxed()
        }

        fn bg_color(&self) -> BoxedEffect<Color> {
            let colors = Arc::clone(&self.colors);
            from_fn(move |_: &()| with_colors(&colors, |state| state.background)).boxed()
        }
    }

}

/// Read a key, failing with end of stream when there is none.
pub fn read_key<Env>() -> impl Effect<Output = KeyEvent, Env = Env>
where
    Env: Has<dyn ConsoleIO> + Send + Sync,
{
    capability::<dyn ConsoleIO, _, _, Env>(|console| console.read_key())
        .and_then(|key| from_option(key, Error::end_of_stream()))
}

/// Read a character, failing with end of stream when there is none.
pub fn read<Env>() -> impl Effect<Output = char, Env = Env>
where
    Env: Has<dyn ConsoleIO> + Send + Sync,
{
    capability::<dyn ConsoleIO, _, _, Env>(|console| console.read())
        .and_then(|ch| from_option(ch, Error::end_of_stream()))
}

/// Read a line, failing with end of stream when there is none.
pub fn read_line<Env>() -> impl Effect<Output = String, Env = Env>
where
    Env: Has<dyn ConsoleIO> + Send + Sync,
{
    capability::<dyn ConsoleIO, _, _, Env>(|console| console.read_line())
        .and_then(|line| from_option(line, Error::end_of_stream()))
}

/// Keys from the console, pushed downstream until input runs out.
pub fn read_keys<Env>() -> Producer<impl Effect<Output = KeyEvent, Env = Env>>
where
    Env: Has<dyn ConsoleIO> + Send + Sync,
{
    produce(read_key())
}

/// Characters from the console, pushed downstream until input runs out.
pub fn reads<Env>() -> Producer<impl Effect<Output = char, Env = Env>>
where
    Env: Has<dyn ConsoleIO> + Send + Sync,
{
    produce(read())
}

/// Lines from the console, pushed downstream until input runs out.
pub fn read_lines<Env>() -> Producer<impl Effect<Output = String, Env = Env>>
where
    Env: Has<dyn ConsoleIO> + Send + Sync,
{
    produce(read_line())
}

/// Write text without a line terminator.
pub fn write<Env>(text: impl Into<String>) -> impl Effect<Output = (), Env = Env>
where
    Env: Has<dyn ConsoleIO> + Send + Sync,
{
    let text = text.into();
    capability::<dyn ConsoleIO, _, _, Env>(move |console| console.write(&text))
}

/// Write a line.
pub fn write_line<Env>(line: impl Into<String>) -> impl Effect<Output = (), Env = Env>
where
    Env: Has<dyn ConsoleIO> + Send + Sync,
{
    let line = line.into();
    capability::<dyn ConsoleIO, _, _, Env>(move |console| console.write_line(&line))
}

/// Write a line and succeed with it.
pub fn write_line2<Env>(line: impl Into<String>) -> impl Effect<Output = String, Env = Env>
where
    Env: Has<dyn ConsoleIO> + Send + Sync,
{
    let line = line.into();
    let written = line.clone();
    write_line(line).map(move |()| written.clone())
}

/// Write an empty line.
pub fn write_empty_line<Env>() -> impl Effect<Output = (), Env = Env>
where
    Env: Has<dyn ConsoleIO> + Send + Sync,
{
    write_line(String::new())
}

/// Clear the console.
pub fn clear<Env>() -> impl Effect<Output = (), Env = Env>
where
    Env: Has<dyn ConsoleIO> + Send + Sync,
{
    capability::<dyn ConsoleIO, _, _, Env>(|console| console.clear())
}

/// Set the foreground colour.
pub fn set_color<Env>(color: Color) -> impl Effect<Output = (), Env = Env>
where
    Env: Has<dyn ConsoleIO> + Send + Sync,
{
    capability::<dyn ConsoleIO, _, _, Env>(move |console| console.set_color(color))
}

/// Set the background colour.
pub fn set_bg_color<Env>(color: Color) -> impl Effect<Output = (), Env = Env>
where
    Env: Has<dyn ConsoleIO> + Send + Sync,
{
    capability::<dyn ConsoleIO, _, _, Env>(move |console| console.set_bg_color(color))
}

/// Restore the default colours.
pub fn reset_color<Env>() -> impl Effect<Output = (), Env = Env>
where
    Env: Has<dyn ConsoleIO> + Send + Sync,
{
    capability::<dyn ConsoleIO, _, _, Env>(|console| console.reset_color())
}

/// Current foreground colour.
pub fn color<Env>() -> impl Effect<Output = Color, Env = Env>
where
    Env: Has<dyn ConsoleIO> + Send + Sync,
{
    capability::<dyn ConsoleIO, _, _, Env>(|console| console.color())
}

/// Current background colour.
pub fn bg_color<Env>() -> impl Effect<Output = Color, Env = Env>
where
    Env: Has<dyn ConsoleIO> + Send + Sync,
{
    capability::<dyn ConsoleIO, _, _, Env>(|console| console.bg_color())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MemoryConsole, TestEnv};

    fn env_with(console: MemoryConsole) -> TestEnv {
        TestEnv::with_console(console)
    }

    #[test]
    fn test_read_line_consumes_in_order() {
        let env = env_with(MemoryConsole::new().with_lines(["one", "two"]));

        assert_eq!(read_line().run_sync(&env), Ok("one".to_string()));
        assert_eq!(read_line().run_sync(&env), Ok("two".to_string()));
    }

    #[test]
    fn test_read_line_without_input_is_end_of_stream() {
        let env = env_with(MemoryConsole::new());

        let err = read_line().run_sync(&env).unwrap_err();
        assert!(err.is_end_of_stream());
        assert_eq!(err, Error::new("end of stream"));
    }

    #[test]
    fn test_read_and_read_key() {
        let env = env_with(MemoryConsole::new().with_keys("ab"));

        assert_eq!(read().run_sync(&env), Ok('a'));
        assert_eq!(read_key().run_sync(&env), Ok(KeyEvent::from('b')));
        assert_eq!(read().run_sync(&env), Err(Error::end_of_stream()));
    }

    #[test]
    fn test_write_line2_returns_line() {
        let env = env_with(MemoryConsole::new());

        assert_eq!(write_line2("echo").run_sync(&env), Ok("echo".to_string()));
        assert_eq!(env.console.output(), "echo\n");
    }

    #[test]
    fn test_write_and_empty_line() {
        let env = env_with(MemoryConsole::new());
        let effect = write("a")
            .and_then(|()| write("b"))
            .and_then(|()| write_empty_line())
            .and_then(|()| write_line("c"));

        assert_eq!(effect.run_sync(&env), Ok(()));
        assert_eq!(env.console.output(), "ab\nc\n");
    }

    #[test]
    fn test_empty_line_after_full_line_is_blank() {
        let env = env_with(MemoryConsole::new());
        let effect = write_line("a")
            .and_then(|()| write_empty_line())
            .and_then(|()| write_line("c"));

        assert_eq!(effect.run_sync(&env), Ok(()));
        assert_eq!(env.console.output_lines(), vec!["a", "", "c"]);
    }

    #[test]
    fn test_colours_round_trip_and_reset() {
        let env = env_with(MemoryConsole::new());

        set_color(Color::Red)
            .and_then(|()| set_bg_color(Color::White))
            .run_sync(&env)
            .unwrap();
        assert_eq!(color().run_sync(&env), Ok(Color::Red));
        assert_eq!(bg_color().run_sync(&env), Ok(Color::White));

        reset_color().run_sync(&env).unwrap();
        assert_eq!(color().run_sync(&env), Ok(Color::FOREGROUND));
        assert_eq!(bg_color().run_sync(&env), Ok(Color::BACKGROUND));
    }

    #[test]
    fn test_clear_empties_output() {
        let env = env_with(MemoryConsole::new());

        write_line("noise").and_then(|()| clear()).run_sync(&env).unwrap();
        assert_eq!(env.console.output(), "");
        assert_eq!(env.console.clears(), 1);
    }

    #[tokio::test]
    async fn test_read_lines_producer_ends_with_end_of_stream() {
        let env = env_with(MemoryConsole::new().with_lines(["x", "y"]));

        let (lines, error) = read_lines().collect(&env).await;
        assert_eq!(lines, vec!["x".to_string(), "y".to_string()]);
        assert_eq!(error, Some(Error::end_of_stream()));
    }

    #[tokio::test]
    async fn test_reads_and_read_keys_producers() {
        let env = env_with(MemoryConsole::new().with_keys("hi"));
        let (chars, _) = reads().take(1).collect(&env).await;
        let (keys, error) = read_keys().collect(&env).await;

        assert_eq!(chars, vec!['h']);
        assert_eq!(keys, vec![KeyEvent::from('i')]);
        assert!(error.is_some_and(|e| e.is_end_of_stream()));
    }
}
