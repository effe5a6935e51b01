/// Server configuration parsed from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Server listen port.
    pub port: u16,
    /// Server bind host.
    pub host: String,
    /// Longest accepted game name, in characters.
    pub max_name_length: usize,
    /// Leaderboard page size when `limit` is omitted.
    pub leaderboard_default_limit: u32,
    /// Largest accepted leaderboard `limit`.
    pub leaderboard_max_limit: u32,
}

impl AppConfig {
    /// Load configuration from environment variables with defaults.
    pub fn from_env() -> Self {
        let defaults = AppConfig::default();
        AppConfig {
            port: env_parse("PORT").unwrap_or(defaults.port),
            host: std::env::var("HOST").unwrap_or(defaults.host),
            max_name_length: env_parse("TTT_MAX_NAME_LENGTH").unwrap_or(defaults.max_name_length),
            leaderboard_default_limit: env_parse("TTT_LEADERBOARD_DEFAULT_LIMIT")
                .unwrap_or(defaults.leaderboard_default_limit),
            leaderboard_max_limit: env_parse("TTT_LEADERBOARD_MAX_LIMIT")
                .unwrap_or(defaults.leaderboard_max_limit),
        }
    }

    /// Socket address string for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            port: 8000,
            host: "0.0.0.0".to_string(),
            max_name_length: 100,
            leaderboard_default_limit: 10,
            leaderboard_max_limit: 100,
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = AppConfig::default();
        assert_eq!(config.port, 8000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.max_name_length, 100);
        assert_eq!(config.leaderboard_default_limit, 10);
        assert_eq!(config.leaderboard_max_limit, 100);
        assert_eq!(config.bind_addr(), "0.0.0.0:8000");
    }

    #[test]
    fn from_env_defaults() {
        // Without setting env vars, should fall back to defaults
        let config = AppConfig::from_env();
        assert_eq!(config.max_name_length, 100);
        assert_eq!(config.leaderboard_max_limit, 100);
    }
}
