#![allow(unused_crate_dependencies, clippy::panic)]

pub mod mocks;

use std::sync::OnceLock;

use tokio::runtime::Runtime;

pub fn runtime() -> &'static Runtime {
    static RUNTIME: OnceLock<Runtime> = OnceLock::new();
    RUNTIME.get_or_init(|| {
        init_tracing();
        Runtime::new().unwrap()
    })
}

/// Best effort: later calls while a subscriber is installed are fine.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
