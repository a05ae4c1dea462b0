use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{
    AnalysisConfig, Config, FinanceDefaults, LoggingConfig, OutputConfig, OutputFormat,
    ServerConfig, UpstreamConfig,
};

/// Prefix for environment overrides, e.g. `SCOUT__UPSTREAM__BEARER_TOKEN`.
pub const ENV_PREFIX: &str = "SCOUT";

/// Loads the application configuration.
///
/// Layers, lowest precedence first: built-in defaults, the TOML file at `path`
/// (skipped when it does not exist), then `SCOUT__SECTION__KEY` environment
/// variables. The merged result is validated before it is returned.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    tracing::debug!(path = %path.display(), "Configuration loaded.");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::OutlierSelection;
    use rust_decimal_macros::dec;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = load_config(Path::new("definitely-not-here.toml")).unwrap();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.analysis.top_picks, 5);
        assert_eq!(
            config.upstream.properties_url(),
            "https://www.microburbs.com.au/report_generator/api/suburb/properties"
        );
    }

    #[test]
    fn file_values_override_defaults() {
        let file = write_config(
            r#"
            [server]
            port = 8080

            [analysis]
            top_picks = 3
            outlier_selection = "most_extreme"

            [finance]
            interest_rate_pct = 5.75
            "#,
        );
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.analysis.top_picks, 3);
        assert_eq!(config.analysis.outlier_selection, OutlierSelection::MostExtreme);
        assert_eq!(config.finance.interest_rate_pct, dec!(5.75));
        assert_eq!(config.finance.term_years, 30);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let file = write_config(
            r#"
            [upstream]
            base_url = "ftp://example.com"
            "#,
        );
        assert!(matches!(
            load_config(file.path()),
            Err(ConfigError::ValidationError(_))
        ));

        let file = write_config("[analysis]\ntop_picks = 0\n");
        assert!(load_config(file.path()).is_err());
    }
}
