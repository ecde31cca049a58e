#![forbid(unsafe_code)]

//! Page configuration.
//!
//! Captures every tunable of the page runtime as a single [`PageConfig`]
//! that hosts can load from TOML or JSON at startup.
//!
//! # Loading
//!
//! ```toml
//! # folio.toml
//! scroll_window_ms = 50
//! resize_window_ms = 250
//! activation_bias = 120.0
//!
//! [relay]
//! public_key = "pk_live"
//! service_id = "service_portfolio"
//! template_id = "template_contact"
//! ```
//!
//! ```rust,ignore
//! let config = PageConfig::from_toml_file("folio.toml")?;
//! let config = PageConfig::from_json_str(json)?;
//! ```
//!
//! # Defaults
//!
//! `PageConfig::default()` reproduces the page's stock behavior: 50 ms
//! scroll window, 250 ms resize window, 120 px activation bias, 100 px
//! reveal margin, theme stored under `"theme"`, no email relay.

use core::time::Duration;

#[cfg(feature = "page-config")]
use std::path::Path;

#[cfg(feature = "page-config")]
use serde::{Deserialize, Serialize};

/// Top-level page configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "page-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "page-config", serde(default))]
pub struct PageConfig {
    /// Rate-limit window for scroll-driven highlighting and reveal.
    pub scroll_window_ms: u64,

    /// Rate-limit window for resize-driven geometry refresh.
    pub resize_window_ms: u64,

    /// Added to the scroll offset before picking the active section, so a
    /// section becomes current slightly before its top edge reaches the
    /// viewport top (covers the fixed navbar).
    pub activation_bias: f64,

    /// How far a section's top edge must rise above the viewport bottom
    /// before it is revealed.
    pub reveal_margin: f64,

    /// Storage key of the theme preference.
    pub theme_key: String,

    /// Email relay used by the contact form. `None` leaves form submission
    /// to the browser.
    pub relay: Option<RelayConfig>,

    /// User-facing contact form notices.
    pub notices: NoticeConfig,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            scroll_window_ms: 50,
            resize_window_ms: 250,
            activation_bias: 120.0,
            reveal_margin: 100.0,
            theme_key: "theme".into(),
            relay: None,
            notices: NoticeConfig::default(),
        }
    }
}

impl PageConfig {
    /// Scroll window as a [`Duration`].
    #[must_use]
    pub const fn scroll_window(&self) -> Duration {
        Duration::from_millis(self.scroll_window_ms)
    }

    /// Resize window as a [`Duration`].
    #[must_use]
    pub const fn resize_window(&self) -> Duration {
        Duration::from_millis(self.resize_window_ms)
    }

    /// Attach an email relay.
    #[must_use]
    pub fn with_relay(mut self, relay: RelayConfig) -> Self {
        self.relay = Some(relay);
        self
    }

    /// Load from a TOML string.
    #[cfg(feature = "page-config")]
    pub fn from_toml_str(s: &str) -> Result<Self, PageConfigError> {
        let config: Self = toml::from_str(s).map_err(PageConfigError::Toml)?;
        config.validated()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "page-config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, PageConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(PageConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "page-config")]
    pub fn from_json_str(s: &str) -> Result<Self, PageConfigError> {
        let config: Self = serde_json::from_str(s).map_err(PageConfigError::Json)?;
        config.validated()
    }

    /// Serialize to pretty TOML.
    #[cfg(feature = "page-config")]
    pub fn to_toml_string(&self) -> Result<String, PageConfigError> {
        toml::to_string_pretty(self).map_err(PageConfigError::TomlSerialize)
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.scroll_window_ms == 0 {
            errors.push("scroll_window_ms must be > 0".into());
        }
        if self.resize_window_ms == 0 {
            errors.push("resize_window_ms must be > 0".into());
        }
        if !self.activation_bias.is_finite() || self.activation_bias < 0.0 {
            errors.push(format!(
                "activation_bias must be finite and >= 0, got {}",
                self.activation_bias
            ));
        }
        if !self.reveal_margin.is_finite() || self.reveal_margin < 0.0 {
            errors.push(format!(
                "reveal_margin must be finite and >= 0, got {}",
                self.reveal_margin
            ));
        }
        if self.theme_key.is_empty() {
            errors.push("theme_key must not be empty".into());
        }
        if let Some(relay) = &self.relay {
            for (field, value) in [
                ("relay.public_key", &relay.public_key),
                ("relay.service_id", &relay.service_id),
                ("relay.template_id", &relay.template_id),
            ] {
                if value.trim().is_empty() {
                    errors.push(format!("{field} must not be empty"));
                }
            }
        }

        errors
    }

    /// Return `self` if valid, or the collected validation errors.
    pub fn validated(self) -> Result<Self, PageConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(PageConfigError::Validation(errors))
        }
    }
}

/// Credentials of the third-party email relay.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "page-config", derive(Serialize, Deserialize))]
pub struct RelayConfig {
    /// Passed to the relay's `init` once at load.
    pub public_key: String,
    pub service_id: String,
    pub template_id: String,
}

impl RelayConfig {
    #[must_use]
    pub fn new(
        public_key: impl Into<String>,
        service_id: impl Into<String>,
        template_id: impl Into<String>,
    ) -> Self {
        Self {
            public_key: public_key.into(),
            service_id: service_id.into(),
            template_id: template_id.into(),
        }
    }
}

/// Blocking notices shown after a contact form submission settles.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "page-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "page-config", serde(default))]
pub struct NoticeConfig {
    pub sent: String,
    pub failed: String,
}

impl Default for NoticeConfig {
    fn default() -> Self {
        Self {
            sent: "Thanks! Your message has been sent.".into(),
            failed: "Sorry, your message could not be sent. Please try again later.".into(),
        }
    }
}

/// Errors from loading a page configuration.
#[derive(Debug)]
pub enum PageConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "page-config")]
    Toml(toml::de::Error),
    /// TOML serialization error.
    #[cfg(feature = "page-config")]
    TomlSerialize(toml::ser::Error),
    /// JSON parse error.
    #[cfg(feature = "page-config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for PageConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "page-config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "page-config")]
            Self::TomlSerialize(e) => write!(f, "TOML serialize error: {e}"),
            #[cfg(feature = "page-config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for PageConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "page-config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "page-config")]
            Self::TomlSerialize(e) => Some(e),
            #[cfg(feature = "page-config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}
