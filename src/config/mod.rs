use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use url::Url;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub pagination: PaginationConfig,
    pub backends: BackendConfig,
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    pub default_limit: u32,
    pub max_limit: u32,
}

/// Base URLs of the domain backends plus the per-call deadline the gateway
/// propagates downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub identity_url: Url,
    pub plan_url: Url,
    pub survey_url: Url,
    pub content_url: Url,
    pub track_url: Url,
    pub request_timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub enable_audit_logging: bool,
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Pagination overrides
        if let Ok(v) = env::var("PAGINATION_DEFAULT_LIMIT") {
            self.pagination.default_limit = v.parse().unwrap_or(self.pagination.default_limit);
        }
        if let Ok(v) = env::var("PAGINATION_MAX_LIMIT") {
            self.pagination.max_limit = v.parse().unwrap_or(self.pagination.max_limit);
        }

        // Backend overrides
        if let Ok(v) = env::var("BACKEND_IDENTITY_URL") {
            self.backends.identity_url = v.parse().unwrap_or(self.backends.identity_url);
        }
        if let Ok(v) = env::var("BACKEND_PLAN_URL") {
            self.backends.plan_url = v.parse().unwrap_or(self.backends.plan_url);
        }
        if let Ok(v) = env::var("BACKEND_SURVEY_URL") {
            self.backends.survey_url = v.parse().unwrap_or(self.backends.survey_url);
        }
        if let Ok(v) = env::var("BACKEND_CONTENT_URL") {
            self.backends.content_url = v.parse().unwrap_or(self.backends.content_url);
        }
        if let Ok(v) = env::var("BACKEND_TRACK_URL") {
            self.backends.track_url = v.parse().unwrap_or(self.backends.track_url);
        }
        if let Ok(v) = env::var("BACKEND_REQUEST_TIMEOUT_MS") {
            self.backends.request_timeout_ms = v.parse().unwrap_or(self.backends.request_timeout_ms);
        }

        // API overrides
        if let Ok(v) = env::var("API_ENABLE_AUDIT_LOGGING") {
            self.api.enable_audit_logging = v.parse().unwrap_or(self.api.enable_audit_logging);
        }
        if let Ok(v) = env::var("API_ENABLE_CORS") {
            self.api.enable_cors = v.parse().unwrap_or(self.api.enable_cors);
        }
        if let Ok(v) = env::var("API_CORS_ORIGINS") {
            self.api.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }
        if let Ok(v) = env::var("API_REQUEST_TIMEOUT_SECS") {
            self.api.request_timeout_secs = v.parse().unwrap_or(self.api.request_timeout_secs);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            pagination: PaginationConfig { default_limit: 20, max_limit: 1000 },
            backends: BackendConfig {
                identity_url: local_backend(7001),
                plan_url: local_backend(7002),
                survey_url: local_backend(7003),
                content_url: local_backend(7004),
                track_url: local_backend(7005),
                request_timeout_ms: 30_000,
            },
            api: ApiConfig {
                enable_audit_logging: false,
                enable_cors: true,
                cors_origins: vec![
                    "http://localhost:3000".to_string(),
                    "http://localhost:5173".to_string(),
                ],
                request_timeout_secs: 60,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            pagination: PaginationConfig { default_limit: 20, max_limit: 500 },
            backends: BackendConfig {
                identity_url: named_backend("identity", "staging"),
                plan_url: named_backend("plan", "staging"),
                survey_url: named_backend("survey", "staging"),
                content_url: named_backend("content", "staging"),
                track_url: named_backend("track", "staging"),
                request_timeout_ms: 10_000,
            },
            api: ApiConfig {
                enable_audit_logging: true,
                enable_cors: true,
                cors_origins: vec!["https://staging.pulse.example.com".to_string()],
                request_timeout_secs: 30,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            pagination: PaginationConfig { default_limit: 20, max_limit: 100 },
            backends: BackendConfig {
                identity_url: named_backend("identity", "prod"),
                plan_url: named_backend("plan", "prod"),
                survey_url: named_backend("survey", "prod"),
                content_url: named_backend("content", "prod"),
                track_url: named_backend("track", "prod"),
                request_timeout_ms: 5_000,
            },
            api: ApiConfig {
                enable_audit_logging: true,
                enable_cors: true,
                cors_origins: vec!["https://app.pulse.example.com".to_string()],
                request_timeout_secs: 30,
            },
        }
    }
}

fn local_backend(port: u16) -> Url {
    // Infallible for a fixed scheme/host pattern
    Url::parse(&format!("http://127.0.0.1:{}", port)).expect("static url")
}

fn named_backend(service: &str, env: &str) -> Url {
    Url::parse(&format!("http://{}.{}.svc.cluster.local", service, env)).expect("static url")
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.pagination.default_limit, 20);
        assert_eq!(config.pagination.max_limit, 1000);
        assert!(!config.api.enable_audit_logging);
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert_eq!(config.pagination.max_limit, 100);
        assert!(config.api.enable_audit_logging);
        assert_eq!(config.backends.request_timeout_ms, 5_000);
    }
}
