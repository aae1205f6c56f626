// crates/product/src/domain/messages/enrichment_result.rs

use serde::{Deserialize, Serialize};
use shared_kernel::errors::{DomainError, Result};

use crate::domain::value_objects::{Price, ProductId};

/// Message entrant du service de scraping :
/// `{"id": 42, "price": 1999, "in_stock": true}`.
/// Pas d'horodatage : `last_checked` est posé à l'application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentResult {
    pub id: ProductId,
    pub price: Price,
    pub in_stock: bool,
}

impl EnrichmentResult {
    pub fn decode(payload: &[u8]) -> Result<Self> {
        serde_json::from_slice(payload).map_err(|e| DomainError::Validation {
            field: "payload",
            reason: format!("Invalid enrichment result: {}", e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_valid_payload() {
        let result = EnrichmentResult::decode(br#"{"id":42,"price":1999,"in_stock":true}"#).unwrap();

        assert_eq!(result.id.as_i64(), 42);
        assert_eq!(result.price.value(), 1999);
        assert!(result.in_stock);
    }

    #[test]
    fn test_decode_rejects_malformed_payloads() {
        for payload in [
            &b"not json"[..],
            br#"{"id":42,"price":1999}"#,
            br#"{"id":42,"price":-1,"in_stock":true}"#,
            br#"{"id":0,"price":10,"in_stock":true}"#,
            br#"{"id":"42","price":10,"in_stock":true}"#,
        ] {
            assert!(
                matches!(EnrichmentResult::decode(payload), Err(DomainError::Validation { field: "payload", .. })),
                "payload should be rejected: {}",
                String::from_utf8_lossy(payload)
            );
        }
    }
}
