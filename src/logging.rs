use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt};

static TRACING_INIT: Once = Once::new();

/// Installs the global subscriber once. `RUST_LOG` wins over `default_filter`.
pub fn init(default_filter: &str) {
    TRACING_INIT.call_once(|| {
        let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
        let _ = fmt()
            .with_env_filter(build_filter(env.as_deref(), default_filter))
            .with_writer(std::io::stderr)
            .try_init();
    });
}

/// First valid directive of `env` and `default_filter`, else `info`.
fn build_filter(env: Option<&str>, default_filter: &str) -> EnvFilter {
    env.and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_new(default_filter).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

#[cfg(test)]
mod tests {
    use super::build_filter;

    #[test]
    fn env_directive_wins_over_default() {
        let filter = build_filter(Some("safemate=trace"), "safemate=info");
        assert_eq!(filter.to_string(), "safemate=trace");
    }

    #[test]
    fn invalid_directives_fall_back() {
        assert_eq!(build_filter(Some("safemate=loud"), "safemate=warn").to_string(), "safemate=warn");
        assert_eq!(build_filter(None, "safemate=loud").to_string(), "info");
    }
}
