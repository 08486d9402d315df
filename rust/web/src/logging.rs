use tracing_subscriber::{fmt, EnvFilter};

/// Initialize logging for the application. `RUST_LOG` overrides the default
/// filter.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,dealer_web=debug"));

    let subscriber = fmt().with_env_filter(filter).with_target(true).finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("failed to set global default subscriber");
}
