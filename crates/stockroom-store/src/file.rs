//! # Inventory Files
//!
//! Saves an inventory as one JSON document and loads it back.
//!
//! ## Load Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  load_from_file(path)                                                   │
//! │       │                                                                 │
//! │       ├── read file            ──► Io error, inventory untouched        │
//! │       ├── parse snapshot       ──► InvalidProductData, untouched        │
//! │       ├── build new Inventory  ──► first bad record aborts, untouched   │
//! │       │                                                                 │
//! │       └── swap: *self = new    ──► previous contents discarded          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fs;
use std::path::Path;

use stockroom_core::{Inventory, InventorySnapshot};
use tracing::{info, warn};

use crate::error::{StoreError, StoreResult};

/// Save/load support for [`Inventory`].
///
/// ## Usage
/// ```rust,no_run
/// use stockroom_core::Inventory;
/// use stockroom_store::InventoryFile;
///
/// let mut inventory = Inventory::new();
/// inventory.load_from_file("inventory.json")?;
/// inventory.save_to_file("inventory.json")?;
/// # Ok::<(), stockroom_store::StoreError>(())
/// ```
pub trait InventoryFile {
    /// Writes every product to `path`, replacing any existing file.
    fn save_to_file(&self, path: impl AsRef<Path>) -> StoreResult<()>;

    /// Replaces the contents with the products stored at `path`.
    ///
    /// All-or-nothing: on any error the inventory is left exactly as it was.
    /// Returns the number of products loaded.
    fn load_from_file(&mut self, path: impl AsRef<Path>) -> StoreResult<usize>;
}

impl InventoryFile for Inventory {
    fn save_to_file(&self, path: impl AsRef<Path>) -> StoreResult<()> {
        let path = path.as_ref();
        let json = self.to_snapshot().to_json_pretty()?;

        fs::write(path, json).map_err(|source| {
            warn!(path = %path.display(), error = %source, "Failed to write inventory file");
            StoreError::io(path, source)
        })?;

        info!(path = %path.display(), products = self.len(), "Inventory saved");
        Ok(())
    }

    fn load_from_file(&mut self, path: impl AsRef<Path>) -> StoreResult<usize> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| StoreError::io(path, source))?;

        let loaded = InventorySnapshot::from_json(&json)
            .and_then(Inventory::from_snapshot)
            .map_err(|err| {
                warn!(path = %path.display(), error = %err, "Rejected inventory file");
                err
            })?;

        let count = loaded.len();
        *self = loaded;

        info!(path = %path.display(), products = count, "Inventory loaded");
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_core::{InventoryError, Money, Product};

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut inventory = Inventory::new();
        inventory
            .add(Product::clothing("C1", "Scarf", Money::from_cents(500), 2, "One", "Silk").unwrap())
            .unwrap();

        let err = inventory
            .load_from_file(dir.path().join("absent.json"))
            .unwrap_err();

        assert!(err.is_not_found());
        assert!(inventory.contains("C1"));
    }

    #[test]
    fn test_save_into_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no").join("such").join("dir.json");

        let err = Inventory::new().save_to_file(&path).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }

    #[test]
    fn test_malformed_json_is_invalid_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{\"products\": [").unwrap();

        let err = Inventory::new().load_from_file(&path).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Inventory(InventoryError::InvalidProductData(_))
        ));
    }
}
