//! Tests for the catch algebra.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use proptest::prelude::*;

use crate::catch::{Catch, CatchKind};
use crate::effect::prelude::*;

fn never<A: Send + 'static>() -> Catch<A> {
    Catch::value(|_| false, |_| unreachable!("predicate is false"))
}

#[test]
fn test_non_matching_strategy_reraises_exactly() {
    let strategy = Catch::<i32>::value_message("y", |_| 42);
    let error = Error::many([Error::new("a"), Error::new("b")]);

    assert_eq!(strategy.attempt(error.clone()).run_sync(&()), Err(error));
}

#[test]
fn test_none_reraises_everything() {
    let error = Error::cancelled();
    assert_eq!(
        Catch::<i32>::none().attempt(error.clone()).run_sync(&()),
        Err(error)
    );
}

#[tokio::test]
async fn test_value_recovery_scenario() {
    let effect = fail::<i32, ()>("x").catch(Catch::value_message("x", |_| 42));
    assert_eq!(effect.run(&()).await, Ok(42));
}

#[tokio::test]
async fn test_unmatched_scenario_leaves_failure_unchanged() {
    let effect = fail::<i32, ()>("x").catch(Catch::value_message("y", |_| 42));
    assert_eq!(effect.run(&()).await, Err(Error::new("x")));
}

#[tokio::test]
async fn test_success_never_consults_strategy() {
    let calls = Arc::new(AtomicU32::new(0));
    let seen = calls.clone();
    let effect = pure::<_, ()>(1).catch(Catch::value(
        move |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            true
        },
        |_| 0,
    ));

    assert_eq!(effect.run(&()).await, Ok(1));
    assert_eq!(seen.load(Ordering::SeqCst), 0);
}

#[test]
fn test_chain_skips_non_matching_left_operand() {
    let s2 = Catch::<i32>::value_message("e", |_| 2);
    let chained = never() | s2.clone();
    let error = Error::new("e");

    assert_eq!(
        chained.attempt(error.clone()).run_sync(&()),
        s2.attempt(error).run_sync(&())
    );
}

#[test]
fn test_failed_handler_effect_falls_through() {
    let s1 = Catch::<i32>::effect_message("e", |_| fail("e2"));
    let s2 = Catch::value_message("e2", |_| 7);

    assert_eq!((s1 | s2).attempt(Error::new("e")).run_sync(&()), Ok(7));
}

#[test]
fn test_remap_is_forwarded_not_terminal() {
    let chain = Catch::<&str>::remap_message("timeout", |_| Error::new("unavailable"))
        | Catch::effect_message("unavailable", |_| pure("cached"));

    assert_eq!(chain.attempt(Error::new("timeout")).run_sync(&()), Ok("cached"));
}

#[test]
fn test_remap_alone_fails_with_new_error() {
    let chain = Catch::<i32>::remap_all(|e| Error::new(format!("wrapped: {}", e)));
    assert_eq!(
        chain.attempt(Error::new("x")).run_sync(&()),
        Err(Error::new("wrapped: x"))
    );
}

#[test]
fn test_first_matching_strategy_fires_first() {
    let chain = Catch::<&str>::value_all(|_| "first") | Catch::value_all(|_| "second");
    assert_eq!(chain.attempt(Error::new("any")).run_sync(&()), Ok("first"));
}

#[test]
fn test_each_predicate_evaluated_once_per_failure() {
    let calls = Arc::new(AtomicU32::new(0));
    let counting = |calls: Arc<AtomicU32>| {
        Catch::<i32>::value(
            move |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                false
            },
            |_| 0,
        )
    };
    let chain = counting(calls.clone()) | counting(calls.clone()) | counting(calls.clone());

    assert!(chain.attempt(Error::new("x")).run_sync(&()).is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[test]
fn test_handler_effect_runs_once() {
    let runs = Arc::new(AtomicU32::new(0));
    let counter = runs.clone();
    let chain = Catch::<i32>::effect_all(move |_| {
        let counter = counter.clone();
        from_fn(move |_: &()| {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(Error::new("still failing"))
        })
    });

    assert_eq!(
        chain.attempt(Error::new("x")).run_sync(&()),
        Err(Error::new("still failing"))
    );
    assert_eq!(runs.load(Ordering::SeqCst), 1);
}

#[derive(Debug)]
struct Fallbacks {
    default_port: u16,
}

#[tokio::test]
async fn test_env_free_and_env_bound_combine_into_env_bound() {
    let chain = Catch::value_message("free", |_| 1u16)
        | port_fallback("bound")
        | Catch::remap_message("other", |_| Error::new("remapped"));

    assert!(!chain.is_env_free());
    assert_eq!(
        chain.kinds(),
        vec![CatchKind::Value, CatchKind::EnvEffect, CatchKind::Remap]
    );

    let env = Fallbacks { default_port: 8080 };
    assert_eq!(chain.attempt(Error::new("free")).run(&env).await, Ok(1));
    assert_eq!(chain.attempt(Error::new("bound")).run(&env).await, Ok(8080));
    assert_eq!(
        chain.attempt(Error::new("other")).run(&env).await,
        Err(Error::new("remapped"))
    );
}

fn port_fallback(text: &'static str) -> Catch<u16, Fallbacks> {
    Catch::env_effect(
        move |e: &Error| e.is_message(text),
        |_| asks(|env: &Fallbacks| env.default_port),
    )
}

#[tokio::test]
async fn test_widen_keeps_behaviour() {
    let free = Catch::<i32>::effect_message("a", |_| pure(1)) | Catch::value_message("b", |_| 2);
    assert!(free.is_env_free());

    let widened: Catch<i32, String> = free.widen();
    let env = "ignored".to_string();

    assert_eq!(widened.kinds(), vec![CatchKind::Effect, CatchKind::Value]);
    assert_eq!(widened.attempt(Error::new("a")).run(&env).await, Ok(1));
    assert_eq!(widened.attempt(Error::new("b")).run(&env).await, Ok(2));
    assert_eq!(
        widened.attempt(Error::new("c")).run(&env).await,
        Err(Error::new("c"))
    );
}

#[tokio::test]
async fn test_catching_appends_strategies() {
    let effect = fail::<i32, ()>("a")
        .catch(Catch::remap_message("a", |_| Error::new("b")))
        .catch(Catch::value_message("b", |_| 3));

    assert_eq!(effect.run(&()).await, Ok(3));
}

#[test]
fn test_unless_cancelled_never_swallows_cancellation() {
    let chain = (Catch::<i32>::value_all(|_| 0) | Catch::effect_all(|_| pure(1))).unless_cancelled();
    let nested = Error::many([Error::new("io"), Error::cancelled()]);

    assert_eq!(chain.attempt(nested.clone()).run_sync(&()), Err(nested));
    assert_eq!(chain.attempt(Error::new("io")).run_sync(&()), Ok(0));
}

#[test]
fn test_any_folds_in_order() {
    let chain = Catch::any(vec![
        Catch::<&str>::value_message("a", |_| "A"),
        Catch::none(),
        Catch::value_all(|_| "rest"),
    ]);

    assert_eq!(chain.len(), 2);
    assert_eq!(chain.attempt(Error::new("a")).run_sync(&()), Ok("A"));
    assert_eq!(chain.attempt(Error::new("z")).run_sync(&()), Ok("rest"));
    assert!(Catch::<i32>::any(Vec::new()).is_empty());
}

#[test]
fn test_debug_lists_kinds() {
    let chain = Catch::<i32>::value_all(|_| 0) | Catch::remap_all(|e| e);
    let rendered = format!("{:?}", chain);

    assert!(rendered.contains("Value"));
    assert!(rendered.contains("Remap"));
}

#[test]
fn test_strategy_matches_reports_predicate() {
    let chain = Catch::<i32>::value_message("x", |_| 0);
    let strategy = &chain.strategies()[0];

    assert!(strategy.matches(&Error::new("x")));
    assert!(!strategy.matches(&Error::new("y")));
    assert_eq!(strategy.kind(), CatchKind::Value);
}

#[cfg(feature = "tracing")]
mod logging {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    #[traced_test]
    fn test_exhausted_chain_is_logged() {
        let chain = Catch::<i32>::value_message("y", |_| 0);
        let _ = chain.attempt(Error::new("x")).run_sync(&());

        assert!(logs_contain("catch chain exhausted"));
    }
}

// Mixed chains of every handler shape: grouping never changes the outcome.

fn strategy_for(kind: u8, trigger: u8, target: u8) -> Catch<u8> {
    let trigger = format!("e{}", trigger);
    let target_error = format!("e{}", target);
    match kind % 4 {
        0 => Catch::value_message(trigger, move |_| target),
        1 => Catch::remap_message(trigger, move |_| Error::new(target_error.clone())),
        2 => Catch::effect_message(trigger, move |_| pure(target)),
        _ => Catch::effect_message(trigger, move |_| fail(target_error.clone())),
    }
}

proptest! {
    #[test]
    fn prop_or_is_associative(
        a in (0u8..4, 0u8..4, 0u8..4),
        b in (0u8..4, 0u8..4, 0u8..4),
        c in (0u8..4, 0u8..4, 0u8..4),
        error in 0u8..4,
    ) {
        let make = |(k, t, g): (u8, u8, u8)| strategy_for(k, t, g);
        let left = (make(a) | make(b)) | make(c);
        let right = make(a) | (make(b) | make(c));
        let error = Error::new(format!("e{}", error));

        prop_assert_eq!(
            left.attempt(error.clone()).run_sync(&()),
            right.attempt(error).run_sync(&())
        );
    }

    #[test]
    fn prop_none_is_identity(k in 0u8..4, t in 0u8..4, g in 0u8..4, error in 0u8..4) {
        let error = Error::new(format!("e{}", error));
        let plain = strategy_for(k, t, g).attempt(error.clone()).run_sync(&());

        prop_assert_eq!(
            (Catch::none() | strategy_for(k, t, g)).attempt(error.clone()).run_sync(&()),
            plain.clone()
        );
        prop_assert_eq!(
            (strategy_for(k, t, g) | Catch::none()).attempt(error).run_sync(&()),
            plain
        );
    }

    #[test]
    fn prop_non_matching_is_pass_through(text in "[a-z]{1,8}") {
        let error = Error::new(text.clone());
        let chain = Catch::<u8>::value(move |e| !e.is_message(&text), |_| 0);

        prop_assert_eq!(chain.attempt(error.clone()).run_sync(&()), Err(error));
    }
}
