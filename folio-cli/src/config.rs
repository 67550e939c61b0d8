use anyhow::Result;
use clap::ArgMatches;
use config::{Config as ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Build settings merged from CLI args, env vars, the `[build]` table of
/// the config file, and defaults. Site content itself is read separately by
/// `folio-core` from the same file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FolioConfig {
    pub build: BuildConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BuildConfig {
    /// Configuration file path
    pub config: String,
    /// Output directory for the generated site
    pub output: String,
    /// Directory of user assets copied into the output
    pub assets: String,
    /// Host for dev server
    pub host: String,
    /// Port for dev server
    pub port: u16,
    /// Open browser automatically
    pub open: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            config: "./folio.toml".to_string(),
            output: "./out".to_string(),
            assets: "./assets".to_string(),
            host: "127.0.0.1".to_string(),
            port: 3000,
            open: false,
        }
    }
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            build: BuildConfig::default(),
        }
    }
}

impl FolioConfig {
    /// Load configuration with cascading precedence:
    /// 1. CLI arguments (highest priority)
    /// 2. Environment variables (FOLIO_*)
    /// 3. Configuration file
    /// 4. Defaults (lowest priority)
    pub fn load(args: &ArgMatches) -> Result<Self> {
        let config_file = args
            .get_one::<String>("config")
            .unwrap_or(&"./folio.toml".to_string())
            .clone();

        let mut builder = ConfigBuilder::builder();

        // 1. Start with defaults
        let defaults = Self::default();
        builder = builder.add_source(config::Config::try_from(&defaults)?);

        // 2. Add configuration file if it exists
        if Path::new(&config_file).exists() {
            builder = builder.add_source(
                File::with_name(&config_file.replace(".toml", "")).required(false),
            );
        }

        // 3. Add environment variables with FOLIO_ prefix
        builder = builder.add_source(
            Environment::with_prefix("FOLIO")
                .prefix_separator("_")
                .separator("__"), // Use double underscore for nested keys
        );

        // 4. Override with CLI arguments (highest priority)
        let mut cli_overrides = std::collections::HashMap::new();

        if let Some(config) = args.get_one::<String>("config") {
            cli_overrides.insert("build.config".to_string(), config.clone());
        }
        if let Some(output) = args.get_one::<String>("output") {
            cli_overrides.insert("build.output".to_string(), output.clone());
        }
        if let Some(assets) = args.get_one::<String>("assets") {
            cli_overrides.insert("build.assets".to_string(), assets.clone());
        }
        // Only override with CLI args that are actually defined for this command
        if let Some(host) = args.try_get_one::<String>("host").unwrap_or(None) {
            cli_overrides.insert("build.host".to_string(), host.clone());
        }
        if let Some(port) = args.try_get_one::<String>("port").unwrap_or(None) {
            if let Ok(port_num) = port.parse::<u16>() {
                cli_overrides.insert("build.port".to_string(), port_num.to_string());
            }
        }
        if args.try_get_one::<bool>("open").unwrap_or(None) == Some(&true) {
            cli_overrides.insert("build.open".to_string(), "true".to_string());
        }

        if !cli_overrides.is_empty() {
            builder = builder.add_source(config::Config::try_from(&cli_overrides)?);
        }

        // Build and deserialize
        let config = builder.build()?;
        let folio_config: FolioConfig = config.try_deserialize()?;

        Ok(folio_config)
    }

    pub fn build_config(&self) -> &BuildConfig {
        &self.build
    }
}

/// Read the site definition (content registries, profile, contact) through
/// folio-core, falling back to the built-in portfolio when the file is
/// missing. A present-but-broken file is an error, not a silent fallback.
pub fn load_site_config(path: &str) -> Result<folio_core::Config> {
    if Path::new(path).exists() {
        Ok(folio_core::Config::read(path)?)
    } else {
        Ok(folio_core::Config::with_defaults())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{Arg, Command};

    #[test]
    fn test_default_config() {
        let config = FolioConfig::default();
        assert_eq!(config.build.config, "./folio.toml");
        assert_eq!(config.build.output, "./out");
        assert_eq!(config.build.assets, "./assets");
        assert_eq!(config.build.port, 3000);
    }

    #[test]
    fn test_cli_args_override() {
        let app = Command::new("test")
            .arg(Arg::new("config").long("config").value_name("FILE"))
            .arg(Arg::new("output").long("output").value_name("DIR"))
            .arg(Arg::new("assets").long("assets").value_name("DIR"));

        let matches = app
            .try_get_matches_from(vec![
                "test",
                "--output",
                "/custom/output",
                "--assets",
                "/custom/assets",
            ])
            .unwrap();

        let config = FolioConfig::load(&matches).unwrap();
        assert_eq!(config.build.output, "/custom/output");
        assert_eq!(config.build.assets, "/custom/assets");
        // Should still have defaults for non-overridden values
        assert_eq!(config.build.host, "127.0.0.1");
    }

    #[test]
    fn missing_site_file_falls_back_to_defaults() {
        let config = load_site_config("./definitely-not-there.toml").unwrap();
        assert!(!config.skills.is_empty());
    }
}
