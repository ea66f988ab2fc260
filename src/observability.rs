use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "info";

/// Builds the log filter from a directive string such as `"debug"` or
/// `"marquee=debug,reqwest=warn"`. Invalid directives fall back to `info`.
pub fn env_filter(directives: &str) -> EnvFilter {
    let directives = directives.trim();
    if directives.is_empty() {
        return EnvFilter::new(DEFAULT_FILTER);
    }
    EnvFilter::try_new(directives).unwrap_or_else(|e| {
        eprintln!("invalid log filter {:?}: {}", directives, e);
        EnvFilter::new(DEFAULT_FILTER)
    })
}

/// Installs the global subscriber. Only the first call takes effect.
pub fn init_tracing(directives: &str) {
    let _ = tracing_subscriber::registry()
        .with(env_filter(directives))
        .with(fmt::layer().with_target(true))
        .try_init();
}
