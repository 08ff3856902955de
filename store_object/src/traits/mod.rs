//! Traits for table access
//!
//! This module contains the traits that describe tables to the generic store.

pub mod table_metadata;

pub use table_metadata::TableMetadata;
