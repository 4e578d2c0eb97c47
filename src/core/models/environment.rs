use std::fmt;

use serde::Serialize;

use crate::core::errors::{CreateConfigError, Result};

/// A deployment environment tag (prod, dev, staging) appended to base
/// names to form environment-specific file names.
///
/// Any non-empty string is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EnvTag(String);

impl EnvTag {
    pub fn new(tag: impl Into<String>) -> Result<Self> {
        let tag = tag.into();
        if tag.is_empty() {
            return Err(CreateConfigError::EmptyEnvironment);
        }
        Ok(Self(tag))
    }
}

impl fmt::Display for EnvTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
