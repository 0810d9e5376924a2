//! Property-based tests for the catch algebra.
//!
//! Chains are built from every handler shape, including environment-bound
//! ones, and checked against a direct left-to-right interpretation.

use catchwater::prelude::*;
use proptest::prelude::*;

struct Env {
    base: u32,
}

/// (shape, trigger, target)
type Step = (u8, u8, u8);

fn error(n: u8) -> Error {
    Error::new(format!("e{}", n))
}

fn strategy(step: Step) -> Catch<u32, Env> {
    let (shape, trigger, target) = step;
    let matches = move |e: &Error| *e == error(trigger);
    match shape % 6 {
        0 => Catch::value(matches, move |_| u32::from(target)),
        1 => Catch::remap(matches, move |_| error(target)),
        2 => Catch::effect(matches, move |_| pure(u32::from(target))),
        3 => Catch::effect(matches, move |_| fail(error(target))),
        4 => Catch::env_effect(matches, move |_| asks(move |env: &Env| env.base + u32::from(target))),
        _ => Catch::env_effect(matches, move |_| {
            from_fn(move |env: &Env| -> Fin<u32> {
                Err(Error::new(format!("e{}", (env.base as u8).wrapping_add(target) % 4)))
            })
        }),
    }
}

fn interpret(steps: &[Step], start: u8, env: &Env) -> Fin<u32> {
    let mut current = error(start);
    for &(shape, trigger, target) in steps {
        if current != error(trigger) {
            continue;
        }
        match shape % 6 {
            0 | 2 => return Ok(u32::from(target)),
            1 | 3 => current = error(target),
            4 => return Ok(env.base + u32::from(target)),
            _ => current = error((env.base as u8).wrapping_add(target) % 4),
        }
    }
    Err(current)
}

fn step() -> impl Strategy<Value = Step> {
    (0u8..6, 0u8..4, 0u8..4)
}

proptest! {
    #[test]
    fn prop_chain_matches_left_to_right_interpretation(
        steps in prop::collection::vec(step(), 0..6),
        start in 0u8..4,
        base in 0u32..4,
    ) {
        let env = Env { base };
        let chain = Catch::any(steps.iter().copied().map(strategy));

        prop_assert_eq!(
            chain.attempt(error(start)).run_sync(&env),
            interpret(&steps, start, &env)
        );
    }

    #[test]
    fn prop_grouping_never_changes_outcome(
        a in step(),
        b in step(),
        c in step(),
        start in 0u8..4,
        base in 0u32..4,
    ) {
        let env = Env { base };
        let left = (strategy(a) | strategy(b)) | strategy(c);
        let right = strategy(a) | (strategy(b) | strategy(c));

        prop_assert_eq!(
            left.attempt(error(start)).run_sync(&env),
            right.attempt(error(start)).run_sync(&env)
        );
    }

    #[test]
    fn prop_effect_then_catch_equals_attempt(step in step(), start in 0u8..4) {
        let env = Env { base: 1 };
        let catch = strategy(step);
        let effect = fail::<u32, Env>(error(start)).catch(catch.clone());

        prop_assert_eq!(
            effect.run_sync(&env),
            catch.attempt(error(start)).run_sync(&env)
        );
    }

    #[test]
    fn prop_successful_effect_ignores_chain(
        steps in prop::collection::vec(step(), 0..4),
        value in any::<u32>(),
    ) {
        let env = Env { base: 0 };
        let chain = Catch::any(steps.into_iter().map(strategy));

        prop_assert_eq!(pure::<_, Env>(value).catch(chain).run_sync(&env), Ok(value));
    }

    #[test]
    fn prop_error_combine_is_associative(
        a in "[a-z]{1,4}",
        b in "[a-z]{1,4}",
        c in "[a-z]{1,4}",
    ) {
        let (a, b, c) = (Error::new(a), Error::new(b), Error::new(c));

        prop_assert_eq!(
            a.clone().combine(b.clone()).combine(c.clone()),
            a.combine(b.combine(c))
        );
    }
}

#[test]
fn env_free_only_chain_is_consulted_once_left_to_right() {
    let chain = Catch::<u32>::value_message("a", |_| 1)
        | Catch::remap_message("b", |_| Error::new("a"))
        | Catch::effect_message("c", |_| fail("b"));

    assert!(chain.is_env_free());
    // "b" appears after the strategy that handles it has already been passed
    assert_eq!(chain.attempt(Error::new("c")).run_sync(&()), Err(Error::new("b")));

    let prefixed = Catch::<u32>::remap_message("c", |_| Error::new("b")) | chain;
    assert_eq!(prefixed.attempt(Error::new("c")).run_sync(&()), Err(Error::new("a")));
}
