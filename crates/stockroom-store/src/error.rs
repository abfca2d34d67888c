//! # Store Error Types
//!
//! Error types for saving and loading inventory files.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error (open/read/write)  ──► StoreError::Io { path }          │
//! │                                                                         │
//! │  Bad document or record (core)     ──► StoreError::Inventory(..)        │
//! │       InvalidProductData                                                │
//! │       DuplicateProduct                                                  │
//! │                                                                         │
//! │  CLI prints the message and keeps the current inventory                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io;
use std::path::{Path, PathBuf};

use stockroom_core::InventoryError;
use thiserror::Error;

/// File persistence errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The file contents could not be turned into an inventory.
    ///
    /// ## When This Occurs
    /// - Malformed JSON or a non-object document
    /// - A record fails to decode (`InvalidProductData`)
    /// - Two records share an ID (`DuplicateProduct`)
    #[error(transparent)]
    Inventory(#[from] InventoryError),

    /// The file could not be opened, read or written.
    ///
    /// ## When This Occurs
    /// - File doesn't exist (load)
    /// - Directory doesn't exist or is not writable (save)
    /// - Permission denied
    #[error("Cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The snapshot could not be rendered as JSON.
    #[error("Failed to serialize inventory: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StoreError {
    /// Creates an Io error tagged with the file it concerns.
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        StoreError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// True when the failure was the file not existing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
