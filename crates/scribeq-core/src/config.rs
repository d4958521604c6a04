//! Server endpoint configuration.
//!
//! Resolution order: explicit overrides (CLI flags) win over environment
//! variables, which win over the defaults `localhost:8000`.

use anyhow::{Context, Result};

/// Environment variable naming the transcription server host
pub const HOST_ENV_VAR: &str = "SCRIBEQ_SERVER_HOST";

/// Environment variable naming the transcription server port
pub const PORT_ENV_VAR: &str = "SCRIBEQ_SERVER_PORT";

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 8000;

/// Host and port of the transcription job server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// Resolve the effective configuration from optional overrides and the
    /// process environment.
    pub fn resolve(host_override: Option<String>, port_override: Option<u16>) -> Result<Self> {
        let env_host = std::env::var(HOST_ENV_VAR).ok();
        let env_port = std::env::var(PORT_ENV_VAR).ok();

        let mut config = Self::from_env_parts(env_host, env_port)?;
        if let Some(host) = host_override {
            config.host = host;
        }
        if let Some(port) = port_override {
            config.port = port;
        }
        Ok(config)
    }

    /// Build a configuration from raw environment values. A present but
    /// unparsable port is an error rather than a silent fallback.
    fn from_env_parts(host: Option<String>, port: Option<String>) -> Result<Self> {
        let host = host
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match port.map(|p| p.trim().to_string()).filter(|p| !p.is_empty()) {
            Some(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("invalid {PORT_ENV_VAR} value: {raw}"))?,
            None => DEFAULT_PORT,
        };

        Ok(Self { host, port })
    }

    /// Base URL of the server, without a trailing slash.
    pub fn endpoint(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = ServerConfig::from_env_parts(None, None).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.endpoint(), "http://localhost:8000");
    }

    #[test]
    fn env_values_override_defaults() {
        let config = ServerConfig::from_env_parts(
            Some("transcribe.internal".to_string()),
            Some("9100".to_string()),
        )
        .unwrap();
        assert_eq!(config.host, "transcribe.internal");
        assert_eq!(config.port, 9100);
        assert_eq!(config.endpoint(), "http://transcribe.internal:9100");
    }

    #[test]
    fn blank_env_values_fall_back_to_defaults() {
        let config =
            ServerConfig::from_env_parts(Some("  ".to_string()), Some(String::new())).unwrap();
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn unparsable_port_is_an_error() {
        let result = ServerConfig::from_env_parts(None, Some("eight-thousand".to_string()));
        assert!(result.is_err());
    }
}
