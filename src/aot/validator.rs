// src/aot/validator.rs
//
// Signature coverage validation
//
// Every custom method declared on a contract must have a processed-method
// record in the contract's metadata artifact. A missing artifact and a
// non-empty gap are both hard failures.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::contract::RepositoryContract;
use super::metadata::{MetadataError, RepositoryMetadata};
use super::signature::SignatureKey;

#[derive(Debug, Error)]
pub enum ValidationError {
    /// The generation step never produced an artifact for this contract
    #[error("AOT metadata not found for {contract}: {}", .path.display())]
    MetadataMissing { contract: String, path: PathBuf },

    /// Declared custom methods with no processed-method record
    #[error("AOT skipped methods in {contract}: [{}]", join_keys(.missing))]
    CoverageGap {
        contract: String,
        missing: Vec<SignatureKey>,
    },

    /// The artifact exists but cannot be read or parsed
    #[error("invalid AOT metadata for {contract} at {}: {source}", .path.display())]
    InvalidMetadata {
        contract: String,
        path: PathBuf,
        #[source]
        source: MetadataError,
    },
}

fn join_keys(keys: &[SignatureKey]) -> String {
    keys.iter()
        .map(SignatureKey::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Declared keys that have no processed counterpart, sorted
pub fn coverage_gap(
    declared: &BTreeSet<SignatureKey>,
    processed: &BTreeSet<SignatureKey>,
) -> Vec<SignatureKey> {
    declared.difference(processed).cloned().collect()
}

/// Check `contract` against the artifact at `metadata_location`.
pub fn validate(
    contract: &RepositoryContract,
    metadata_location: &Path,
) -> Result<(), ValidationError> {
    if !metadata_location.is_file() {
        return Err(ValidationError::MetadataMissing {
            contract: contract.name.to_string(),
            path: metadata_location.to_path_buf(),
        });
    }

    let declared = contract.signature_keys();
    if declared.is_empty() {
        tracing::debug!(contract = contract.name, "no custom methods to check");
        return Ok(());
    }

    let invalid = |source| ValidationError::InvalidMetadata {
        contract: contract.name.to_string(),
        path: metadata_location.to_path_buf(),
        source,
    };
    let metadata = RepositoryMetadata::load(metadata_location).map_err(invalid)?;
    let processed = metadata.signature_keys().map_err(invalid)?;

    tracing::debug!(
        contract = contract.name,
        recorded_as = metadata.name.as_deref().unwrap_or("<unnamed>"),
        declared = declared.len(),
        processed = processed.len(),
        "comparing declared methods with processed methods"
    );

    let missing = coverage_gap(&declared, &processed);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::CoverageGap {
            contract: contract.name.to_string(),
            missing,
        })
    }
}

/// Check `contract` against the artifact it owns under `metadata_root`.
pub fn validate_in(
    contract: &RepositoryContract,
    metadata_root: &Path,
) -> Result<(), ValidationError> {
    validate(contract, &contract.metadata_path(metadata_root))
}

/// Check every contract; returns all failures, in contract order.
pub fn validate_all(contracts: &[RepositoryContract], metadata_root: &Path) -> Vec<ValidationError> {
    contracts
        .iter()
        .filter_map(|contract| match validate_in(contract, metadata_root) {
            Ok(()) => {
                tracing::info!(contract = contract.name, "query metadata complete");
                None
            }
            Err(error) => Some(error),
        })
        .collect()
}
