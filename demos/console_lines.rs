//! Line-oriented console program.
//!
//! Reads lines until input runs out, echoing each one back in upper case.
//! End of input arrives as an ordinary error and ends the stream.
//!
//! Run with: `echo -e "one\ntwo" | cargo run --example console_lines`

use std::sync::atomic::{AtomicUsize, Ordering};

use catchwater::prelude::*;
use catchwater::sys::{console, Color, ConsoleIO, LiveConsole};

struct Live {
    console: LiveConsole,
}

impl Has<dyn ConsoleIO> for Live {
    fn get(&self) -> &(dyn ConsoleIO + 'static) {
        &self.console
    }
}

fn banner() -> impl Effect<Output = (), Env = Live> {
    console::set_color(Color::Cyan)
        .and_then(|()| console::write_line("Type lines; end input to stop."))
        .and_then(|()| console::reset_color())
}

fn main() {
    let env = Live {
        console: LiveConsole::new(),
    };

    if let Err(error) = banner().run_sync(&env) {
        eprintln!("console unavailable: {}", error);
        return;
    }

    let echoed = AtomicUsize::new(0);
    let lines = console::read_lines();
    let echo = lines.run_with_sink(&env, |line| {
        let (env, echoed) = (&env, &echoed);
        async move {
            if console::write_line(line.to_uppercase()).run(env).await.is_ok() {
                echoed.fetch_add(1, Ordering::Relaxed);
            }
        }
    });
    let outcome = futures::executor::block_on(echo);

    match outcome {
        Err(error) if error.is_end_of_stream() => {
            let summary = console::write_empty_line().and_then(|()| {
                console::write_line(format!("{} lines", echoed.load(Ordering::Relaxed)))
            });
            let _ = summary.run_sync(&env);
        }
        Err(error) => eprintln!("stopped: {}", error),
        Ok(()) => {}
    }
}
