//! Search view configuration

use busline_model::{PageRequest, PageRequestError, DEFAULT_PAGE_LIMIT};
use serde::{Deserialize, Serialize};

/// Search view configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Records requested for the default result page
    pub page_limit: u32,
}

impl ViewConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With page limit
    #[inline]
    #[must_use]
    pub fn with_page_limit(mut self, limit: u32) -> Self {
        self.page_limit = limit;
        self
    }

    /// Page window used by the default result view
    ///
    /// # Errors
    /// - `PageRequestError::ZeroLimit` if `page_limit` is zero
    pub fn first_page(&self) -> Result<PageRequest, PageRequestError> {
        PageRequest::first(self.page_limit)
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            page_limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_first_page() {
        let config = ViewConfig::new();
        assert_eq!(config.first_page().unwrap(), PageRequest::default());
    }

    #[test]
    fn zero_limit_is_rejected() {
        assert!(ViewConfig::new().with_page_limit(0).first_page().is_err());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: ViewConfig = toml::from_str("page_limit = 5").unwrap();
        assert_eq!(config.page_limit, 5);
        assert_eq!(config, ViewConfig::new().with_page_limit(5));
    }
}
