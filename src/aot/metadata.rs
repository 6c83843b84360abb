// src/aot/metadata.rs
//
// Build-time query metadata artifacts
//
// One JSON document per repository contract, written by the query generator.
// Only `methods[].name` and `methods[].signature` are read; everything else
// in the document is ignored.

use std::collections::BTreeSet;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use super::signature::{SignatureError, SignatureKey};

#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryMetadata {
    /// Fully qualified repository name as recorded by the generator
    #[serde(default)]
    pub name: Option<String>,

    pub methods: Vec<ProcessedMethod>,
}

/// One method the generator turned into executable data-access code
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessedMethod {
    pub name: String,

    /// `<modifiers> <ReturnType> <DeclaringType>.<name>(<FQParam>,...)`
    pub signature: String,
}

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("cannot read metadata: {0}")]
    Io(#[from] std::io::Error),

    #[error("metadata is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("method '{method}' has a malformed signature: {source}")]
    Signature {
        method: String,
        #[source]
        source: SignatureError,
    },
}

impl RepositoryMetadata {
    pub fn load(path: &Path) -> Result<Self, MetadataError> {
        let bytes = std::fs::read(path)?;
        Self::from_slice(&bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, MetadataError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Signature keys of every processed method
    pub fn signature_keys(&self) -> Result<BTreeSet<SignatureKey>, MetadataError> {
        self.methods
            .iter()
            .map(|method| {
                SignatureKey::from_record(&method.name, &method.signature).map_err(|source| {
                    MetadataError::Signature {
                        method: method.name.clone(),
                        source,
                    }
                })
            })
            .collect()
    }
}
