// crates/product/src/domain/messages/mod.rs

mod enrichment_request;
mod enrichment_result;

pub use enrichment_request::EnrichmentRequest;
pub use enrichment_result::EnrichmentResult;
