//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use std::env;

const DEFAULT_DATABASE_URL: &str = "sqlite://maintenance.db";
const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub database_url: String,
    pub log_level: tracing::Level,
    pub cors_origins: Vec<String>,
    /// Sin API key las sugerencias de IA quedan deshabilitadas
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_api_url: String,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }
}

impl EnvironmentConfig {
    /// Construir la configuración a partir de una función de búsqueda de variables
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            environment: non_empty("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            port: non_empty("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            host: non_empty("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            database_url: non_empty("DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            log_level: non_empty("LOG_LEVEL")
                .and_then(|l| l.parse().ok())
                .unwrap_or(tracing::Level::INFO),
            cors_origins: non_empty("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            gemini_api_key: non_empty("GEMINI_API_KEY"),
            gemini_model: non_empty("GEMINI_MODEL")
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            gemini_api_url: non_empty("GEMINI_API_URL")
                .unwrap_or_else(|| DEFAULT_GEMINI_API_URL.to_string()),
        }
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si las sugerencias de IA están habilitadas
    pub fn suggestions_enabled(&self) -> bool {
        self.gemini_api_key.is_some()
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> EnvironmentConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EnvironmentConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_without_variables() {
        let config = config_from(&[]);
        assert_eq!(config.port, 3000);
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.gemini_model, DEFAULT_GEMINI_MODEL);
        assert!(config.is_development());
        assert!(!config.suggestions_enabled());
    }

    #[test]
    fn test_blank_api_key_disables_suggestions() {
        let config = config_from(&[("GEMINI_API_KEY", "   ")]);
        assert!(config.gemini_api_key.is_none());

        let config = config_from(&[("GEMINI_API_KEY", "abc123")]);
        assert_eq!(config.gemini_api_key.as_deref(), Some("abc123"));
        assert!(config.suggestions_enabled());
    }

    #[test]
    fn test_parses_port_origins_and_level() {
        let config = config_from(&[
            ("PORT", "8081"),
            ("HOST", "127.0.0.1"),
            ("CORS_ORIGINS", "http://a.test, http://b.test,"),
            ("LOG_LEVEL", "debug"),
        ]);
        assert_eq!(config.server_url(), "127.0.0.1:8081");
        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);
        assert_eq!(config.log_level, tracing::Level::DEBUG);
    }

    #[test]
    fn test_invalid_port_falls_back() {
        let config = config_from(&[("PORT", "not-a-port")]);
        assert_eq!(config.port, 3000);
    }
}
