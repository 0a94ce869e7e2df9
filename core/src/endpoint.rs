//! Base URL resolution.

/// Base URL of the hosted noteof API.
pub const DEFAULT_ENDPOINT: &str = "https://api.noteof.app";

/// A default base URL plus an optional override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    default: String,
    override_url: Option<String>,
}

impl Endpoint {
    pub fn new(default: &str, override_url: Option<&str>) -> Self {
        Self {
            default: normalize(default),
            override_url: override_url.map(normalize).filter(|url| !url.is_empty()),
        }
    }

    /// Endpoint that always resolves to `url`.
    pub fn fixed(url: &str) -> Self {
        Self::new(url, None)
    }

    /// The override if one is set, otherwise the default.
    pub fn resolve(&self) -> &str {
        self.override_url.as_deref().unwrap_or(&self.default)
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT, None)
    }
}

fn normalize(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
