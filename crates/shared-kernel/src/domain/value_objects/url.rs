// crates/shared-kernel/src/domain/value_objects/url.rs

use std::fmt;
use serde::{Deserialize, Serialize};
use url::Url as LibUrl;
use crate::domain::value_objects::ValueObject;
use crate::errors::{DomainError, Result};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Url(String);

impl Url {
    /// Constructeur sécurisé (Domaine / API)
    pub fn try_new(value: impl Into<String>) -> Result<Self> {
        let raw_string = value.into();

        // 1. Parsing via la crate 'url' pour normalisation syntaxique
        let parsed = LibUrl::parse(raw_string.trim()).map_err(|_| DomainError::Validation {
            field: "url",
            reason: format!("Invalid URL format: {}", raw_string),
        })?;

        Self(parsed.to_string()).validated()
    }

    /// Reconstruction rapide (Infrastructure / DB)
    pub fn new_unchecked(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Hôte en minuscules, sans port.
    pub fn host(&self) -> Option<String> {
        LibUrl::parse(&self.0)
            .ok()
            .and_then(|u| u.host_str().map(|h| h.to_ascii_lowercase()))
    }
}

impl ValueObject for Url {
    fn validate(&self) -> Result<()> {
        let parsed = LibUrl::parse(&self.0).map_err(|_| DomainError::Validation {
            field: "url",
            reason: "Invalid URL state".into(),
        })?;

        // On restreint les protocoles
        let scheme = parsed.scheme();
        if scheme != "http" && scheme != "https" {
            return Err(DomainError::Validation {
                field: "url",
                reason: "Only http and https protocols are allowed".into(),
            });
        }

        if parsed.host_str().is_none() {
            return Err(DomainError::Validation {
                field: "url",
                reason: "URL must have a host".into(),
            });
        }

        Ok(())
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Url {
    type Error = DomainError;
    fn try_from(value: String) -> Result<Self> {
        Self::try_new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_rejects_non_http_scheme() {
        let result = Url::try_new("ftp://etsy.com/listing/1");
        assert!(matches!(result, Err(DomainError::Validation { field: "url", .. })));
    }

    #[test]
    fn test_url_host_is_lowercased() {
        let url = Url::try_new("https://WWW.Etsy.com/listing/1").unwrap();
        assert_eq!(url.host().as_deref(), Some("www.etsy.com"));
    }

    #[test]
    fn test_url_rejects_garbage() {
        assert!(Url::try_new("not a url").is_err());
    }
}
