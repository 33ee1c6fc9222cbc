//! Logging setup.
//!
//! Logs go to stderr so the display output on stdout stays machine-readable.
//! `RUST_LOG` takes precedence over the config file:
//!
//! ```bash
//! RUST_LOG=zcalc=trace zcalc 3 + 4 =
//! ```

use std::sync::Once;

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

static INIT: Once = Once::new();

/// Install the global subscriber. Only the first call has any effect.
pub fn init_with_config(config: &LoggingConfig) {
    INIT.call_once(|| {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(filter_directives(config))
        };

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .init();
    });
}

/// `EnvFilter` directive string for `config`, e.g. `warn,zcalc=debug`.
fn filter_directives(config: &LoggingConfig) -> String {
    let mut directives = config.default.clone();
    for (module, level) in &config.modules {
        directives.push_str(&format!(",{module}={level}"));
    }
    directives
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directives() {
        let mut config = LoggingConfig::default();
        assert_eq!(filter_directives(&config), "warn");

        config
            .modules
            .insert("zcalc".to_string(), "debug".to_string());
        config
            .modules
            .insert("zcalc::keypad".to_string(), "trace".to_string());
        assert_eq!(
            filter_directives(&config),
            "warn,zcalc=debug,zcalc::keypad=trace"
        );
    }

    #[test]
    fn test_init_twice() {
        init_with_config(&LoggingConfig::default());
        init_with_config(&LoggingConfig::default());
    }
}
