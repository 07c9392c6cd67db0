//! # Catalog Error Types
//!
//! Everything that can go wrong while loading game data. Once a catalog is
//! loaded, nothing in the economy fails: lookups return `Option` and callers
//! fall back to a default template.

use thiserror::Error;

/// Errors that can occur while loading or validating a game catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog {path}: {source}")]
    Io {
        /// Path that was being read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The catalog is not valid TOML or doesn't match the schema.
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] toml::de::Error),

    /// A section the simulation can't run without is empty.
    #[error("catalog section `{0}` must not be empty")]
    EmptySection(&'static str),

    /// Two templates in one section share an id.
    #[error("duplicate id `{id}` in section `{section}`")]
    DuplicateId {
        /// Section the duplicate was found in.
        section: &'static str,
        /// The repeated id.
        id: String,
    },

    /// A numeric field is out of its valid range.
    #[error("invalid value for `{field}` on `{id}`: {reason}")]
    InvalidValue {
        /// Template id.
        id: String,
        /// Field name.
        field: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
