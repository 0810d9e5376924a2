//! Recovery chains in practice.
//!
//! A lookup can fail in several ways. Each failure gets its own strategy,
//! and the strategies are combined into one chain that is consulted left to
//! right.
//!
//! Run with: `cargo run --example recovery_chain`

use catchwater::prelude::*;

#[derive(Debug)]
struct Services {
    cache: Vec<(u32, String)>,
}

fn lookup(id: u32) -> impl Effect<Output = String, Env = Services> {
    from_fn(move |_: &Services| match id {
        0 => Err(Error::new("not found")),
        1 => Err(Error::new("timeout")),
        2 => Err(Error::new("forbidden")),
        _ => Ok(format!("record {}", id)),
    })
}

fn from_cache(id: u32) -> impl Effect<Output = String, Env = Services> {
    asks(move |services: &Services| {
        services
            .cache
            .iter()
            .find(|(key, _)| *key == id)
            .map(|(_, value)| value.clone())
    })
    .and_then(|hit| from_option(hit, Error::new("cache miss")))
}

fn recovery(id: u32) -> Catch<String, Services> {
    Catch::value_message("not found", |_| "<empty>".to_string())
        | Catch::remap_message("timeout", |_| Error::new("unavailable"))
        | Catch::env_effect(|e: &Error| e.is_message("unavailable"), move |_| from_cache(id))
        | Catch::remap(
            |e: &Error| !e.is_cancelled(),
            |e| e.combine(Error::new("lookup failed")),
        )
}

fn main() {
    tracing_subscriber::fmt::init();

    let services = Services {
        cache: vec![(1, "cached record 1".to_string())],
    };

    println!("=== Recovery Chain ===\n");
    for id in 0..4 {
        let effect = lookup(id).catch(recovery(id));
        match invoke_sync(&effect, &services) {
            Ok(value) => println!("lookup({}) -> {}", id, value),
            Err(error) => println!("lookup({}) failed: {}", id, error),
        }
    }

    println!("\n=== Inspecting a Chain ===\n");
    let chain = recovery(0);
    println!("strategies: {:?}", chain.kinds());
    println!("environment-free: {}", chain.is_env_free());
}
