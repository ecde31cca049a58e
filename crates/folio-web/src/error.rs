#![forbid(unsafe_code)]

//! Host-side errors.

use folio_runtime::PageConfigError;

/// Errors raised while mounting the page in a browser.
///
/// Missing optional elements are never errors; they only leave a feature
/// unwired. These variants cover the few things the host cannot do without.
#[derive(Debug)]
pub enum WebHostError {
    /// A browser global (`window`, `document`, `body`) is unavailable.
    MissingGlobal(&'static str),
    /// A JavaScript call threw.
    Js(String),
    /// The page configuration passed from JavaScript was rejected.
    Config(PageConfigError),
}

impl core::fmt::Display for WebHostError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingGlobal(name) => write!(f, "missing browser global: {name}"),
            Self::Js(detail) => write!(f, "javascript error: {detail}"),
            Self::Config(e) => write!(f, "invalid page config: {e}"),
        }
    }
}

impl std::error::Error for WebHostError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::MissingGlobal(_) | Self::Js(_) => None,
        }
    }
}

impl From<PageConfigError> for WebHostError {
    fn from(e: PageConfigError) -> Self {
        Self::Config(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn display_names_the_missing_global() {
        let err = WebHostError::MissingGlobal("document");
        assert_eq!(err.to_string(), "missing browser global: document");
        assert!(err.source().is_none());
    }

    #[test]
    fn config_error_is_the_source() {
        let err = WebHostError::from(PageConfigError::Validation(vec!["bad".into()]));
        assert!(err.to_string().starts_with("invalid page config"));
        assert!(err.source().is_some());
    }
}
