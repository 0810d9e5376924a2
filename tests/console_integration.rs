//! End-to-end programs over the in-memory capabilities.

use std::time::{Duration, SystemTime};

use catchwater::prelude::*;
use catchwater::sys::{check_cancelled, console, time};
use catchwater::testing::{ManualTime, MemoryConsole, TestEnv};
use catchwater::{assert_fail, assert_succ};

#[test]
fn read_line_without_input_fails_with_end_of_stream() {
    let env = TestEnv::with_console(MemoryConsole::new());

    let result = console::read_line().run_sync(&env);

    assert_fail!(result, Error::new("end of stream"));
}

#[test]
fn end_of_stream_can_be_recovered_with_a_default() {
    let env = TestEnv::with_console(MemoryConsole::new());

    let name = console::read_line().catch(Catch::value(Error::is_end_of_stream, |_| {
        "stranger".to_string()
    }));

    assert_succ!(name.run_sync(&env), "stranger".to_string());
}

#[tokio::test]
async fn echo_program_streams_every_line_then_reports_end() {
    let env = TestEnv::with_console(MemoryConsole::new().with_lines(["alpha", "beta"]));

    let result = console::read_lines()
        .run_with_sink(&env, |line| {
            let env = &env;
            async move {
                let _ = console::write_line(line.to_uppercase()).run(env).await;
            }
        })
        .await;

    assert_eq!(result, Err(Error::end_of_stream()));
    assert_eq!(env.console.output_lines(), vec!["ALPHA", "BETA"]);
}

#[test]
fn echo_future_built_ahead_of_blocking_driver() {
    use std::sync::atomic::{AtomicUsize, Ordering};

    let env = TestEnv::with_console(MemoryConsole::new().with_lines(["one", "two", "three"]));
    let echoed = AtomicUsize::new(0);

    let lines = console::read_lines();
    let echo = lines.run_with_sink(&env, |line| {
        let (env, echoed) = (&env, &echoed);
        async move {
            if console::write_line(line).run(env).await.is_ok() {
                echoed.fetch_add(1, Ordering::Relaxed);
            }
        }
    });
    let outcome = futures::executor::block_on(echo);

    assert_fail!(outcome, Error::end_of_stream());
    assert_eq!(echoed.load(Ordering::Relaxed), 3);
    assert_eq!(env.console.output_lines(), vec!["one", "two", "three"]);
}

#[test]
fn prompt_validates_and_reprompts_through_catch() {
    let env = TestEnv::with_console(MemoryConsole::new().with_lines(["abc", "17"]));

    let parse = || {
        console::read_line().and_then(|line| {
            from_result(
                line.trim()
                    .parse::<u32>()
                    .map_err(|_| Error::new("not a number")),
            )
        })
    };
    let reprompt = Catch::env_effect_all(move |_| {
        console::write_line("try again").and_then(move |()| parse())
    });

    let age = parse().catch(reprompt);

    assert_eq!(age.run_sync(&env), Ok(17));
    assert_eq!(env.console.output_lines(), vec!["try again"]);
}

#[test]
fn colour_changes_are_visible_to_later_steps() {
    let env = TestEnv::new();

    let effect = console::set_color(console_color())
        .and_then(|()| console::write("warn"))
        .and_then(|()| console::color());

    assert_eq!(effect.run_sync(&env), Ok(console_color()));
    assert_eq!(env.console.output(), "warn");
}

fn console_color() -> catchwater::sys::Color {
    catchwater::sys::Color::Yellow
}

#[test]
fn timed_prompt_uses_the_environment_clock() {
    let start = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000);
    let env = TestEnv::with_console(MemoryConsole::new().with_lines(["ok"]))
        .time(ManualTime::new(start));

    let effect = time::sleep(Duration::from_secs(3))
        .and_then(|()| console::read_line())
        .and_then(|line| time::now().map(move |at| (line.clone(), at)));

    assert_eq!(
        effect.run_sync(&env),
        Ok(("ok".to_string(), start + Duration::from_secs(3)))
    );
    assert_eq!(env.time.sleeps(), vec![Duration::from_secs(3)]);
}

#[tokio::test]
async fn cancellation_stops_a_producer_and_is_not_swallowed() {
    let env = TestEnv::with_console(MemoryConsole::new().with_lines(["1", "2", "3"]));
    env.cancel.cancel();

    let guarded_line = check_cancelled()
        .and_then(|()| console::read_line())
        .catch(Catch::value_all(|_| String::new()).unless_cancelled());

    let (lines, error) = produce(guarded_line).collect(&env).await;

    assert!(lines.is_empty());
    assert!(error.is_some_and(|e| e.is_cancelled()));
    assert_eq!(console::read_line().run_sync(&env), Ok("1".to_string()));
}

#[test]
fn panicking_step_surfaces_as_exceptional() {
    let env = TestEnv::with_console(MemoryConsole::new().with_lines(["x"]));

    let effect = console::read_line().map(|line: String| -> usize {
        if line == "x" {
            panic!("unexpected input");
        }
        line.len()
    });

    let err = invoke_sync(&effect, &env).unwrap_err();
    assert!(err.is_exceptional());
}
