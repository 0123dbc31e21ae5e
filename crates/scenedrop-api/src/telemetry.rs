//! Tracing initialisation.

use tracing_subscriber::{
    fmt::format::Format, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Console tracing: compact format, controlled by `RUST_LOG`.
///
/// Call once at process start; a second call panics.
pub fn init_tracing() {
    let console_fmt = tracing_subscriber::fmt::layer().event_format(
        Format::default()
            .compact()
            .with_target(false)
            .without_time(),
    );
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "scenedrop_api=debug,scenedrop_storage=debug,scenedrop_core=debug,tower_http=debug"
                .into()
        }))
        .with(console_fmt)
        .init();
}
