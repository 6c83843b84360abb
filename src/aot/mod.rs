// src/aot/mod.rs
//
// Ahead-of-time query metadata checks
//
// Repository contracts declare their query methods explicitly; the query
// generator records which of them it turned into code. This module compares
// the two and reports methods the generator silently skipped.

pub mod contract;
pub mod metadata;
pub mod signature;
pub mod validator;

pub use contract::{DeclaredMethod, QueryStyle, RepositoryContract, LIST_CRUD_CONTRACT};
pub use metadata::{MetadataError, ProcessedMethod, RepositoryMetadata};
pub use signature::{parameter_types, simple_type_name, SignatureError, SignatureKey};
pub use validator::{coverage_gap, validate, validate_all, validate_in, ValidationError};
