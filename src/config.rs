use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::data::loader::SOURCE_EXTENSIONS;
use crate::data::model::SourceId;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "SDG9_DATA_DIR";

/// Data directory used when [`DATA_DIR_ENV`] is unset.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Countries selected when a session starts.
pub const DEFAULT_COUNTRIES: [&str; 3] = ["Korea, Rep.", "United States", "Kenya"];

/// The seed selection as an owned set.
pub fn default_selection() -> BTreeSet<String> {
    DEFAULT_COUNTRIES.iter().map(|c| c.to_string()).collect()
}

// ---------------------------------------------------------------------------
// DataSources – where the three indicator tables live
// ---------------------------------------------------------------------------

/// Fixed locations of the three indicator tables.
///
/// Only the directory is configurable; the file stems are part of the data
/// contract (see [`SourceId::file_stem`]). Each source may be stored in any
/// format the loader reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSources {
    pub dir: PathBuf,
}

impl Default for DataSources {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}

impl DataSources {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Read the data directory from `SDG9_DATA_DIR`, falling back to `data`.
    pub fn from_env() -> Self {
        match std::env::var_os(DATA_DIR_ENV) {
            Some(dir) if !dir.is_empty() => Self::new(dir),
            _ => Self::default(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The first existing `<stem>.<ext>` in [`SOURCE_EXTENSIONS`] order, or
    /// the CSV path when none exists.
    pub fn path_for(&self, source: SourceId) -> PathBuf {
        SOURCE_EXTENSIONS
            .iter()
            .map(|ext| self.dir.join(format!("{}.{ext}", source.file_stem())))
            .find(|path| path.is_file())
            .unwrap_or_else(|| self.dir.join(source.file_name()))
    }

    /// `(source, path)` pairs in resolution priority order.
    pub fn ordered_paths(&self) -> Vec<(SourceId, PathBuf)> {
        SourceId::PRIORITY
            .iter()
            .map(|&source| (source, self.path_for(source)))
            .collect()
    }
}
