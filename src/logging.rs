use tracing_subscriber::EnvFilter;

use crate::config::LoggingSettings;

/// Install a global `tracing` subscriber for the embedding service
///
/// `RUST_LOG` takes precedence over the configured level. Formats are
/// `pretty`, `compact` and anything else for the default full format.
/// Returns `false` when a subscriber was already installed.
pub fn init(settings: &LoggingSettings) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    let installed = match settings.format.as_str() {
        "pretty" => subscriber.pretty().try_init(),
        "compact" => subscriber.compact().try_init(),
        _ => subscriber.try_init(),
    };

    installed.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_harmless() {
        let settings = LoggingSettings {
            level: "not a valid directive ===".to_string(),
            format: "compact".to_string(),
        };

        init(&settings);
        assert!(!init(&settings));
    }
}
