// crates/shared-kernel/src/errors/error_code.rs

use serde::Serialize;

/// Codes stables exposés aux appelants du Product Operator et dans les logs.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ValidationFailed,
    NotFound,
    AlreadyExists,
    ConcurrencyConflict,
    /// Le produit est persisté mais la demande d'enrichissement n'est pas partie.
    PublishFailed,
    InfrastructureFailure,
    InternalError,
}

impl ErrorCode {
    /// Panne d'une dépendance : rejouer plus tard peut réussir.
    pub fn is_transient(self) -> bool {
        matches!(self, Self::InfrastructureFailure | Self::ConcurrencyConflict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_serialize_in_screaming_snake_case() {
        let json = serde_json::to_string(&ErrorCode::PublishFailed).unwrap();
        assert_eq!(json, "\"PUBLISH_FAILED\"");
    }

    #[test]
    fn test_business_errors_are_not_transient() {
        assert!(ErrorCode::InfrastructureFailure.is_transient());
        assert!(!ErrorCode::AlreadyExists.is_transient());
        assert!(!ErrorCode::ValidationFailed.is_transient());
    }
}
