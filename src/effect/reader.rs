//! Reader pattern types for environment access.
//!
//! This module provides the Reader pattern for accessing and adapting the
//! environment in effects:
//!
//! - `Ask` - Get the entire environment (cloned)
//! - `Asks` - Query a value from the environment
//! - `Local` - Run an effect with a derived environment
//! - `Widen` - Run an environment-free effect inside any environment

use std::marker::PhantomData;

use crate::effect::trait_def::Effect;
use crate::error::Fin;

/// Get the entire environment (cloned).
///
/// # Example
///
/// ```rust
/// use catchwater::effect::prelude::*;
///
/// #[derive(Clone, PartialEq, Debug)]
/// struct Env { value: i32 }
///
/// # tokio_test::block_on(async {
/// let effect = ask::<Env>();
/// assert_eq!(effect.run(&Env { value: 42 }).await, Ok(Env { value: 42 }));
/// # });
/// ```
pub struct Ask<Env> {
    _phantom: PhantomData<fn() -> Env>,
}

impl<Env> std::fmt::Debug for Ask<Env> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ask").finish()
    }
}

impl<Env> Ask<Env> {
    /// Create a new Ask effect.
    pub fn new() -> Self {
        Ask {
            _phantom: PhantomData,
        }
    }
}

impl<Env> Default for Ask<Env> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Env> Effect for Ask<Env>
where
    Env: Clone + Send + Sync,
{
    type Output = Env;
    type Env = Env;

    async fn run(&self, env: &Env) -> Fin<Env> {
        Ok(env.clone())
    }
}

/// Query a value from the environment.
///
/// # Example
///
/// ```rust
/// use catchwater::effect::prelude::*;
///
/// struct Env { value: i32 }
///
/// # tokio_test::block_on(async {
/// let effect = asks(|env: &Env| env.value * 2);
/// assert_eq!(effect.run(&Env { value: 21 }).await, Ok(42));
/// # });
/// ```
pub struct Asks<F, Env> {
    pub(crate) f: F,
    _phantom: PhantomData<fn() -> Env>,
}

impl<F, Env> std::fmt::Debug for Asks<F, Env> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Asks").field("f", &"<function>").finish()
    }
}

impl<F, Env> Asks<F, Env> {
    /// Create a new Asks effect.
    pub fn new(f: F) -> Self {
        Asks {
            f,
            _phantom: PhantomData,
        }
    }
}

impl<F, U, Env> Effect for Asks<F, Env>
where
    F: Fn(&Env) -> U + Send + Sync,
    U: Send,
    Env: Send + Sync,
{
    type Output = U;
    type Env = Env;

    async fn run(&self, env: &Env) -> Fin<U> {
        Ok((self.f)(env))
    }
}

/// Run an effect with a derived environment.
///
/// # Example
///
/// ```rust
/// use catchwater::effect::prelude::*;
///
/// struct OuterEnv { multiplier: i32 }
/// struct InnerEnv { value: i32 }
///
/// # tokio_test::block_on(async {
/// let inner_effect = asks(|env: &InnerEnv| env.value);
/// let effect = local(
///     |outer: &OuterEnv| InnerEnv { value: 21 * outer.multiplier },
///     inner_effect,
/// );
///
/// assert_eq!(effect.run(&OuterEnv { multiplier: 2 }).await, Ok(42));
/// # });
/// ```
pub struct Local<Inner, F, Env2> {
    pub(crate) inner: Inner,
    pub(crate) f: F,
    pub(crate) _phantom: PhantomData<fn() -> Env2>,
}

impl<Inner, F, Env2> std::fmt::Debug for Local<Inner, F, Env2> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Local")
            .field("inner", &"<effect>")
            .field("f", &"<function>")
            .finish()
    }
}

impl<Inner, F, Env2> Local<Inner, F, Env2> {
    /// Create a new Local effect.
    pub fn new(inner: Inner, f: F) -> Self {
        Local {
            inner,
            f,
            _phantom: PhantomData,
        }
    }
}

impl<Inner, F, Env2> Effect for Local<Inner, F, Env2>
where
    Inner: Effect,
    F: Fn(&Env2) -> Inner::Env + Send + Sync,
    Env2: Send + Sync,
{
    type Output = Inner::Output;
    type Env = Env2;

    async fn run(&self, env: &Env2) -> Fin<Self::Output> {
        let inner_env = (self.f)(env);
        self.inner.run(&inner_env).await
    }
}

/// Run an environment-free effect inside an environment it never reads.
///
/// Requirement for an environment is infectious: once an environment-free
/// effect is composed with an environment-bound one, the whole composition
/// needs that environment. `Widen` is the adapter that makes this explicit.
///
/// # Example
///
/// ```rust
/// use catchwater::effect::prelude::*;
///
/// struct AppEnv { bonus: i32 }
///
/// # tokio_test::block_on(async {
/// let effect = pure::<_, ()>(40)
///     .widen::<AppEnv>()
///     .and_then(|x| asks(move |env: &AppEnv| x + env.bonus));
/// assert_eq!(effect.run(&AppEnv { bonus: 2 }).await, Ok(42));
/// # });
/// ```
pub struct Widen<Inner, Env> {
    pub(crate) inner: Inner,
    pub(crate) _phantom: PhantomData<fn() -> Env>,
}

impl<Inner, Env> std::fmt::Debug for Widen<Inner, Env> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Widen")
            .field("inner", &"<effect>")
            .finish()
    }
}

impl<Inner, Env> Widen<Inner, Env> {
    /// Create a new Widen effect.
    pub fn new(inner: Inner) -> Self {
        Widen {
            inner,
            _phantom: PhantomData,
        }
    }
}

impl<Inner, Env> Effect for Widen<Inner, Env>
where
    Inner: Effect<Env = ()>,
    Env: Send + Sync,
{
    type Output = Inner::Output;
    type Env = Env;

    async fn run(&self, _env: &Env) -> Fin<Self::Output> {
        self.inner.run(&()).await
    }
}
