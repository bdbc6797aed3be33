use anyhow::Context;
use clockpoint_core::attendance::{ReentryPolicy, SessionPolicy, UnknownEventPolicy};

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    /// A single `*` allows any origin.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Upper bound on pooled database connections (default: `10`).
    pub database_max_connections: u32,
    /// Clock-in re-entry and unknown-event handling.
    pub session_policy: SessionPolicy,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default   |
    /// |----------------------------|-----------|
    /// | `HOST`                     | `0.0.0.0` |
    /// | `PORT`                     | `3000`    |
    /// | `CORS_ORIGINS`             | `*`       |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`      |
    /// | `DATABASE_MAX_CONNECTIONS` | `10`      |
    /// | `REENTRY_POLICY`           | `allow`   |
    /// | `UNKNOWN_EVENT_POLICY`     | `out`     |
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any key lookup. Missing keys take the
    /// defaults listed on [`ServerConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.into());

        let host = env_or("HOST", "0.0.0.0");

        let port: u16 = env_or("PORT", "3000")
            .parse()
            .context("PORT must be a valid u16")?;

        let cors_origins: Vec<String> = env_or("CORS_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = env_or("REQUEST_TIMEOUT_SECS", "30")
            .parse()
            .context("REQUEST_TIMEOUT_SECS must be a valid u64")?;

        let database_max_connections: u32 = env_or("DATABASE_MAX_CONNECTIONS", "10")
            .parse()
            .context("DATABASE_MAX_CONNECTIONS must be a valid u32")?;

        let reentry: ReentryPolicy = env_or("REENTRY_POLICY", "allow")
            .parse()
            .context("REENTRY_POLICY")?;

        let unknown_event: UnknownEventPolicy = env_or("UNKNOWN_EVENT_POLICY", "out")
            .parse()
            .context("UNKNOWN_EVENT_POLICY")?;

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database_max_connections,
            session_policy: SessionPolicy {
                reentry,
                unknown_event,
            },
        })
    }

    /// Whether CORS should accept requests from any origin.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.is_empty() || self.cors_origins.iter().any(|o| o == "*")
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> anyhow::Result<ServerConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = load(&[]).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.cors_origins, ["*"]);
        assert!(config.allows_any_origin());
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.database_max_connections, 10);
        assert_eq!(config.session_policy, SessionPolicy::default());
    }

    #[test]
    fn values_are_read_from_the_lookup() {
        let config = load(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("CORS_ORIGINS", " https://a.example.com, ,https://b.example.com "),
            ("REQUEST_TIMEOUT_SECS", "5"),
            ("DATABASE_MAX_CONNECTIONS", "3"),
            ("REENTRY_POLICY", "reject"),
            ("UNKNOWN_EVENT_POLICY", "REJECT"),
        ])
        .unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(
            config.cors_origins,
            ["https://a.example.com", "https://b.example.com"]
        );
        assert!(!config.allows_any_origin());
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.database_max_connections, 3);
        assert_eq!(config.session_policy.reentry, ReentryPolicy::Reject);
        assert_eq!(
            config.session_policy.unknown_event,
            UnknownEventPolicy::Reject
        );
    }

    #[test]
    fn invalid_values_are_errors() {
        assert!(load(&[("PORT", "not-a-port")]).is_err());
        assert!(load(&[("PORT", "70000")]).is_err());
        assert!(load(&[("REQUEST_TIMEOUT_SECS", "-1")]).is_err());
        assert!(load(&[("REENTRY_POLICY", "sometimes")]).is_err());
        assert!(load(&[("UNKNOWN_EVENT_POLICY", "ignore")]).is_err());
    }
}
