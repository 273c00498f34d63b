//! Transit-line categories
//!
//! A [`Category`] is an opaque, comparable line name. The empty string is the
//! sentinel for "nothing chosen yet" and is never sent to a provider.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Transit-line identifier used to filter records
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    /// Create category from a line name
    ///
    /// Surrounding whitespace is dropped, so `" 12 "` and `"12"` compare equal
    /// and a blank name becomes the unselected sentinel.
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.len() == name.len() {
            Self(name)
        } else {
            Self(trimmed.to_owned())
        }
    }

    /// The "nothing chosen yet" sentinel
    #[inline]
    #[must_use]
    pub fn unselected() -> Self {
        Self(String::new())
    }

    /// True when this is a real line rather than the sentinel
    #[inline]
    #[must_use]
    pub fn is_selected(&self) -> bool {
        !self.0.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Category {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Category {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl AsRef<str> for Category {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
