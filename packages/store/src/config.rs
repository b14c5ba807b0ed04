//! # Portal configuration (`portal.toml`)
//!
//! Read-only inputs supplied at build or deploy time: where the backend lives,
//! what the application is called, which optional features are switched on,
//! and which browser storage key holds the session token.
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:5000/api"
//! request_timeout_secs = 30   # native targets only, 0 disables
//!
//! [app]
//! title = "Compliance Portal"
//!
//! [features]
//! analytics = false
//! newsletter = false
//!
//! [session]
//! token_key = "portal_token"  # user record lives under "<token_key>_user"
//! ```
//!
//! ## Types
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`PortalConfig`] | Top-level config with TOML (de)serialisation and build-time environment overrides. |
//! | [`ApiConfig`] | Backend base URL and optional request timeout. |
//! | [`AppConfig`] | Display title. |
//! | [`FeatureToggles`] | Analytics and newsletter switches. |
//! | [`SessionConfig`] | Storage key for the bearer token. |
//!
//! Every struct has a `Default`, so a missing or empty file is equivalent to the
//! default configuration.

use serde::{Deserialize, Serialize};

/// Top-level configuration stored in `portal.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PortalConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub features: FeatureToggles,
    #[serde(default)]
    pub session: SessionConfig,
}

/// Backend connection settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds. 0 disables. Ignored in the browser.
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u32,
}

fn default_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_timeout() -> u32 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_timeout(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_title")]
    pub title: String,
}

fn default_title() -> String {
    "Compliance Portal".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
        }
    }
}

/// Optional features, all off unless switched on.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureToggles {
    #[serde(default)]
    pub analytics: bool,
    #[serde(default)]
    pub newsletter: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Storage key for the bearer token.
    #[serde(default = "default_token_key")]
    pub token_key: String,
}

fn default_token_key() -> String {
    "portal_token".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_key: default_token_key(),
        }
    }
}

impl PortalConfig {
    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "portal.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Defaults overlaid with `PORTAL_*` variables captured at compile time.
    ///
    /// The browser build has no process environment, so deploy-time settings
    /// are baked in when the bundle is built.
    pub fn from_build_env() -> Self {
        Self::default().with_overrides(|name| match name {
            "PORTAL_API_BASE_URL" => option_env!("PORTAL_API_BASE_URL"),
            "PORTAL_APP_TITLE" => option_env!("PORTAL_APP_TITLE"),
            "PORTAL_ENABLE_ANALYTICS" => option_env!("PORTAL_ENABLE_ANALYTICS"),
            "PORTAL_ENABLE_NEWSLETTER" => option_env!("PORTAL_ENABLE_NEWSLETTER"),
            "PORTAL_TOKEN_KEY" => option_env!("PORTAL_TOKEN_KEY"),
            _ => None,
        })
    }

    /// Apply overrides from a variable lookup. Unset or blank values keep the current setting.
    pub fn with_overrides<'a>(mut self, lookup: impl Fn(&str) -> Option<&'a str>) -> Self {
        let get = |name: &str| lookup(name).map(str::trim).filter(|v| !v.is_empty());

        if let Some(url) = get("PORTAL_API_BASE_URL") {
            self.api.base_url = url.to_string();
        }
        if let Some(title) = get("PORTAL_APP_TITLE") {
            self.app.title = title.to_string();
        }
        if let Some(flag) = get("PORTAL_ENABLE_ANALYTICS") {
            self.features.analytics = parse_flag(flag);
        }
        if let Some(flag) = get("PORTAL_ENABLE_NEWSLETTER") {
            self.features.newsletter = parse_flag(flag);
        }
        if let Some(key) = get("PORTAL_TOKEN_KEY") {
            self.session.token_key = key.to_string();
        }
        self
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = PortalConfig::from_toml("").unwrap();
        assert_eq!(config, PortalConfig::default());
        assert_eq!(config.session.token_key, "portal_token");
        assert_eq!(config.api.request_timeout_secs, 30);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config = PortalConfig::from_toml(
            r#"
            [api]
            base_url = "https://portal.example.org/api"

            [features]
            newsletter = true
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://portal.example.org/api");
        assert_eq!(config.api.request_timeout_secs, 30);
        assert!(config.features.newsletter);
        assert!(!config.features.analytics);
        assert_eq!(config.app.title, "Compliance Portal");
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut config = PortalConfig::default();
        config.app.title = "Ethics Office".to_string();
        let text = config.to_toml().unwrap();
        assert_eq!(PortalConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_overrides() {
        let config = PortalConfig::default().with_overrides(|name| match name {
            "PORTAL_API_BASE_URL" => Some("https://api.example.org"),
            "PORTAL_ENABLE_ANALYTICS" => Some("TRUE"),
            "PORTAL_TOKEN_KEY" => Some("   "),
            _ => None,
        });
        assert_eq!(config.api.base_url, "https://api.example.org");
        assert!(config.features.analytics);
        assert_eq!(config.session.token_key, "portal_token");
    }
}
