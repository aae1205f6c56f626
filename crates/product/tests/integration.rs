// crates/product/tests/integration.rs

#![cfg(feature = "integration")]

mod common;
mod infrastructure;
