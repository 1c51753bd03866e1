#[cfg(feature = "trace")]
use std::sync::Once;

#[cfg(feature = "trace")]
static INIT: Once = Once::new();

const DEFAULT_FILTER: &str = "ryusei_core=debug,ryusei_session=debug";

/// Install a stderr subscriber. `RUST_LOG` overrides the default filter.
#[cfg(feature = "trace")]
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_FILTER)),
            )
            .init();
        tracing::info!(max_level = %tracing::level_filters::STATIC_MAX_LEVEL, "tracing to stderr");
    });
}

#[cfg(not(feature = "trace"))]
pub fn init_tracing() {
    eprintln!("warning: built without the `trace` feature, --trace has no effect (default filter: {DEFAULT_FILTER})");
}

#[cfg(test)]
mod tests {
    use tracing::level_filters::{LevelFilter, STATIC_MAX_LEVEL};

    // A `max_level_*` cap anywhere in the dependency graph applies to every
    // crate, including the engine crates the subscriber listens to.
    #[test]
    fn test_debug_events_are_compiled_in() {
        assert!(
            STATIC_MAX_LEVEL >= LevelFilter::DEBUG,
            "static max level is {STATIC_MAX_LEVEL}"
        );
    }

    #[cfg(feature = "trace")]
    #[test]
    fn test_init_is_repeatable() {
        super::init_tracing();
        super::init_tracing();
        tracing::debug!("still alive");
    }
}
