use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable overriding the configured cache capacity
const MAX_ITEMS_ENV: &str = "CACHE_MAX_ITEMS";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of entries kept in the cache at any one time
    pub max_items: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache: CacheConfig { max_items: 10_000 },
        }
    }
}

impl Config {
    /// Loads configuration from the file named by `CONFIG_FILE` (default
    /// `config.toml`), falling back to defaults when no file exists. A
    /// `CACHE_MAX_ITEMS` environment variable overrides the file value.
    ///
    /// Intended to be read once at process start by the application root.
    pub fn load() -> Result<Self> {
        let config_file =
            std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".to_string());

        let mut config: Config = if std::path::Path::new(&config_file).exists() {
            let contents = std::fs::read_to_string(&config_file)?;
            toml::from_str(&contents)?
        } else {
            Self::default()
        };

        if let Ok(value) = std::env::var(MAX_ITEMS_ENV) {
            config.cache.max_items = value
                .parse()
                .with_context(|| format!("invalid {} value: {}", MAX_ITEMS_ENV, value))?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_max_items() {
        assert_eq!(Config::default().cache.max_items, 10_000);
    }

    #[test]
    fn test_parse_from_toml() {
        let config: Config = toml::from_str("[cache]\nmax_items = 250\n").unwrap();
        assert_eq!(config.cache.max_items, 250);
    }

    #[test]
    fn test_default_round_trips_through_toml() {
        let rendered = toml::to_string_pretty(&Config::default()).unwrap();
        let parsed: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.cache.max_items, 10_000);
    }
}
