//! Tracing support for effects.
//!
//! This module provides the `Instrument` combinator and `instrument` method
//! for wrapping effects in tracing spans. Feature-gated behind `#[cfg(feature = "tracing")]`.

use crate::effect::trait_def::Effect;
use crate::error::Fin;

/// An effect wrapped in a tracing span.
///
/// Created by [`EffectTracingExt::instrument`]. Every run enters the span,
/// and a failure leaving the span is recorded as a `debug` event.
#[derive(Debug)]
pub struct Instrument<E> {
    pub(crate) inner: E,
    pub(crate) span: tracing::Span,
}

impl<E> Effect for Instrument<E>
where
    E: Effect,
{
    type Output = E::Output;
    type Env = E::Env;

    async fn run(&self, env: &Self::Env) -> Fin<Self::Output> {
        use tracing::Instrument as _;
        let result = self.inner.run(env).instrument(self.span.clone()).await;
        if let Err(error) = &result {
            tracing::debug!(parent: &self.span, error = %error, "effect failed");
        }
        result
    }
}

/// Extension trait for adding tracing instrumentation to effects.
///
/// This trait is only available when the `tracing` feature is enabled.
pub trait EffectTracingExt: Effect {
    /// Wrap this effect in a tracing span.
    ///
    /// # Example
    ///
    /// ```rust
    /// use catchwater::effect::prelude::*;
    /// use tracing::info_span;
    ///
    /// # tokio_test::block_on(async {
    /// let effect = pure::<_, ()>(42).instrument(info_span!("answer"));
    /// assert_eq!(effect.run(&()).await, Ok(42));
    /// # });
    /// ```
    fn instrument(self, span: tracing::Span) -> Instrument<Self> {
        Instrument { inner: self, span }
    }
}

impl<E: Effect> EffectTracingExt for E {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::constructors::{fail, pure};
    use crate::effect::ext::EffectExt;
    use crate::error::Error;
    use tracing_test::traced_test;

    #[tokio::test]
    async fn test_instrument_returns_value() {
        let effect = pure::<_, ()>(42).instrument(tracing::info_span!("test_span"));

        assert_eq!(effect.run(&()).await, Ok(42));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_error_in_span_propagates_and_is_logged() {
        let effect = fail::<i32, ()>("oops").instrument(tracing::info_span!("failing"));

        assert_eq!(effect.run(&()).await, Err(Error::new("oops")));
        assert!(logs_contain("effect failed"));
    }

    #[tokio::test]
    async fn test_composition_with_instrument() {
        let effect = pure::<_, ()>(5)
            .instrument(tracing::debug_span!("step1"))
            .map(|x| x * 2)
            .instrument(tracing::debug_span!("step2"))
            .and_then(|x| pure(x + 10).instrument(tracing::debug_span!("step3")));

        assert_eq!(effect.run(&()).await, Ok(20));
    }
}
