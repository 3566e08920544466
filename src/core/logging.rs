//! Tracing subscriber setup driven by the persisted log toggles

use tracing_subscriber::EnvFilter;

use crate::core::config::AppSettings;

/// Build the filter for the given settings; `RUST_LOG` wins when set
pub fn build_filter(settings: &AppSettings) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.filter_directive()))
}

/// Install the global fmt subscriber
///
/// Returns false if a subscriber was already installed.
pub fn init_logging(settings: &AppSettings) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(settings))
        .with_target(false)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_noop() {
        let settings = AppSettings::default();
        let _ = init_logging(&settings);
        assert!(!init_logging(&settings));
    }
}
