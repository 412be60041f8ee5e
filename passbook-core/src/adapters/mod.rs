//! Adapters - concrete implementations of external dependencies

pub mod duckdb;
