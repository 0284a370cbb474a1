//! Helpers shared by the integration tests.

use tracing_subscriber::EnvFilter;

/// Setup logging of events reported by the codec.
///
/// Use the RUST_LOG environment variable to override the defaults.
///
/// E.g. To see every label that is encoded or decoded:
///   RUST_LOG=TRACE
///
/// Or to only see rejected labels:
///   RUST_LOG=idna_encoding::codec=DEBUG
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_thread_ids(true)
        .without_time()
        .try_init()
        .ok();
}
