// crates/product/src/application/apply_enrichment_result/mod.rs

mod apply_enrichment_result_use_case;

pub use apply_enrichment_result_use_case::ApplyEnrichmentResultUseCase;
