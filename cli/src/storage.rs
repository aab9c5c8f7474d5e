use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use dappmint_common::sale::SaleState;

/// Persistent document: the contract state plus the simulated chain height
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateDocument {
    /// Height of the last applied call
    #[serde(default)]
    pub block_height: u64,

    /// Unix timestamp of the last save
    #[serde(default)]
    pub last_updated: i64,

    #[serde(default)]
    pub sale: SaleState,
}

/// JSON file backed store for the contract state
///
/// Mutations are only written back through `commit`, so a failed command
/// never touches the file.
pub struct StateStore {
    path: PathBuf,
    document: StateDocument,
}

impl StateStore {
    /// Load the document at `path`, or start empty when the file does not exist
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let document = if path.exists() {
            if log::log_enabled!(log::Level::Debug) {
                debug!("Loading existing state from: {:?}", path);
            }
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read state file '{}'", path.display()))?;
            serde_json::from_str::<StateDocument>(&content)
                .with_context(|| format!("Failed to parse state file '{}'", path.display()))?
        } else {
            if log::log_enabled!(log::Level::Info) {
                info!("No state at {:?}, starting from an empty chain", path);
            }
            StateDocument::default()
        };

        Ok(Self { path, document })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn sale(&self) -> &SaleState {
        &self.document.sale
    }

    pub fn sale_mut(&mut self) -> &mut SaleState {
        &mut self.document.sale
    }

    pub fn block_height(&self) -> u64 {
        self.document.block_height
    }

    /// Height assigned to the next applied call
    pub fn next_block_height(&self) -> u64 {
        self.document.block_height.saturating_add(1)
    }

    /// Seal the pending call into a new block and write the document
    pub fn commit(&mut self) -> Result<()> {
        self.document.block_height = self.next_block_height();
        self.save()
    }

    /// Write the document through a temporary file
    pub fn save(&mut self) -> Result<()> {
        self.document.last_updated = chrono::Utc::now().timestamp();
        let content = serde_json::to_string_pretty(&self.document)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create state directory '{}'", parent.display())
                })?;
            }
        }

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write state file '{}'", tmp_path.display()))?;
        fs::rename(&tmp_path, &self.path)
            .with_context(|| format!("Failed to replace state file '{}'", self.path.display()))?;

        if log::log_enabled!(log::Level::Debug) {
            debug!(
                "Saved state at height {} to: {:?}",
                self.document.block_height, self.path
            );
        }
        Ok(())
    }
}
