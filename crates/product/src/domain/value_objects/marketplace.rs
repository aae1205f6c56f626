// crates/product/src/domain/value_objects/marketplace.rs

use serde::{Deserialize, Serialize};
use shared_kernel::domain::value_objects::Url;
use shared_kernel::errors::{DomainError, Result};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Marketplace {
    Etsy,
    Ebay,
    Aliexpress,
}

impl Marketplace {
    const HOSTS: [(&'static str, Marketplace); 4] = [
        ("etsy.com", Marketplace::Etsy),
        ("ebay.com", Marketplace::Ebay),
        ("aliexpress.com", Marketplace::Aliexpress),
        ("aliexpress.ru", Marketplace::Aliexpress),
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Marketplace::Etsy => "etsy",
            Marketplace::Ebay => "ebay",
            Marketplace::Aliexpress => "aliexpress",
        }
    }

    /// Déduit la place de marché de l'hôte (`etsy.com`, `www.etsy.com`, ...).
    pub fn from_url(url: &Url) -> Result<Self> {
        let host = url.host().ok_or_else(|| DomainError::Validation {
            field: "url",
            reason: "URL must have a host".into(),
        })?;

        Self::HOSTS
            .iter()
            .find(|(domain, _)| {
                host == *domain
                    || host
                        .strip_suffix(*domain)
                        .is_some_and(|prefix| prefix.ends_with('.'))
            })
            .map(|(_, marketplace)| *marketplace)
            .ok_or_else(|| DomainError::Validation {
                field: "marketplace",
                reason: format!("Unsupported marketplace host '{}'", host),
            })
    }
}

impl fmt::Display for Marketplace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Marketplace {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "etsy" => Ok(Marketplace::Etsy),
            "ebay" => Ok(Marketplace::Ebay),
            "aliexpress" => Ok(Marketplace::Aliexpress),
            other => Err(DomainError::Validation {
                field: "marketplace",
                reason: format!("Unknown marketplace '{}'", other),
            }),
        }
    }
}
