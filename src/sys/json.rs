//! JSON capability.

use serde_json::Value;

use crate::capability::{Has, IO};
use crate::effect::Effect;
use crate::error::{Error, Fin};

/// JSON parsing service.
pub trait JsonIO: Send + Sync {
    /// Parse a document.
    fn parse(&self, text: &str) -> Fin<Value>;
}

/// [`JsonIO`] backed by `serde_json`.
///
/// Parse failures surface as `Error::Exceptional` wrapping the
/// `serde_json::Error`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiveJson;

impl JsonIO for LiveJson {
    fn parse(&self, text: &str) -> Fin<Value> {
        serde_json::from_str(text).map_err(Error::from)
    }
}

/// Parse `text` with the environment's JSON service.
///
/// # Example
///
/// ```rust
/// use catchwater::effect::prelude::*;
/// use catchwater::sys::json;
/// use catchwater::testing::TestEnv;
///
/// let env = TestEnv::new();
///
/// let doc = json::parse(r#"{"id": 7}"#).run_sync(&env).unwrap();
/// assert_eq!(doc["id"], 7);
///
/// let err = json::parse("{").run_sync(&env).unwrap_err();
/// assert!(err.is_exceptional());
/// ```
pub fn parse<Env>(text: impl Into<String>) -> impl Effect<Output = Value, Env = Env>
where
    Env: Has<dyn JsonIO> + Send + Sync,
{
    let text = text.into();
    IO::try_read::<dyn JsonIO, _, _, Env>(move |json| json.parse(&text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catch::Catch;
    use crate::effect::EffectExt;

    #[test]
    fn test_parse_valid_document() {
        let value = LiveJson.parse(r#"{"name": "catchwater", "tags": [1, 2]}"#).unwrap();

        assert_eq!(value["name"], "catchwater");
        assert_eq!(value["tags"][1], 2);
    }

    #[test]
    fn test_parse_failure_keeps_native_fault() {
        let err = LiveJson.parse("[1, 2").unwrap_err();

        assert!(err.is_exceptional());
        assert!(err
            .fault()
            .is_some_and(|fault| fault.downcast_ref::<serde_json::Error>().is_some()));
    }

    #[test]
    fn test_parse_failure_recovers_with_default() {
        let env = crate::testing::TestEnv::new();
        let effect = parse("not json").catch(Catch::value(Error::is_exceptional, |_| Value::Null));

        assert_eq!(effect.run_sync(&env), Ok(Value::Null));
    }
}
