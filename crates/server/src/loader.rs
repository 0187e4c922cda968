//! Where the service gets its dataset from.
//!
//! The service doesn't read files itself; it asks a `DatasetLoader`. The
//! production loader reads a data directory, tests plug in their own.

use data_loader::{Dataset, Result};
use std::path::{Path, PathBuf};

/// Produces the catalog and normalization parameters.
///
/// `Send + Sync` so the service holding it can be shared across threads.
pub trait DatasetLoader: Send + Sync {
    /// Human-readable description of the source, for logs
    fn describe(&self) -> String;

    /// Load and validate the dataset
    fn load(&self) -> Result<Dataset>;
}

/// Loads `spotify_data.json` and `scaler_params.json` from a directory
#[derive(Debug, Clone)]
pub struct DirectoryLoader {
    data_dir: PathBuf,
}

impl DirectoryLoader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

impl DatasetLoader for DirectoryLoader {
    fn describe(&self) -> String {
        format!("directory {}", self.data_dir.display())
    }

    fn load(&self) -> Result<Dataset> {
        Dataset::load_from_files(&self.data_dir)
    }
}
