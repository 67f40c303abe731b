use std::sync::Once;

/// How the demos log.
///
/// A `filter` set here wins over `RUST_LOG`; with neither, everything at
/// `info` and above is printed.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub filter: Option<String>,
    pub style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: None,
            style: env_logger::WriteStyle::Auto,
        }
    }
}

static LOGGER: Once = Once::new();

/// Filter directives to apply, `None` for the built-in `info` level.
fn pick_filter(configured: Option<String>, from_env: Option<String>) -> Option<String> {
    configured
        .or(from_env)
        .filter(|directives| !directives.trim().is_empty())
}

/// Sets up `env_logger` on stderr. Repeated calls keep the first setup.
pub fn init_logging(config: LoggingConfig) {
    LOGGER.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match pick_filter(config.filter, std::env::var("RUST_LOG").ok()) {
            Some(directives) => builder.parse_filters(&directives),
            None => builder.filter_level(log::LevelFilter::Info),
        };

        builder.write_style(config.style);

        // another logger may already be installed, e.g. by a test harness
        if builder.try_init().is_ok() {
            log::debug!("logger ready");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_filter_beats_env() {
        assert_eq!(
            pick_filter(Some("gl_wrapper=debug".into()), Some("warn".into())),
            Some("gl_wrapper=debug".to_string())
        );
    }

    #[test]
    fn env_filter_is_fallback() {
        assert_eq!(pick_filter(None, Some("warn".into())), Some("warn".to_string()));
    }

    #[test]
    fn blank_filter_means_default_level() {
        assert_eq!(pick_filter(None, None), None);
        assert_eq!(pick_filter(Some("  ".into()), Some("warn".into())), None);
    }
}
