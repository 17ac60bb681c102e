use api::SignEntry;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed sign file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// The sign dictionary, merged from every file under the data directory at
/// startup and read-only afterwards. Entry order is file order within each
/// file, files visited in sorted path order; the matcher reports ties in
/// this order.
#[derive(Debug, Default)]
pub struct SignDictionary {
    entries: Vec<SignEntry>,
}

impl SignDictionary {
    /// Loads and merges every regular file under `dir`, recursively. Each
    /// file holds a JSON array of sign entries. Any unreadable or malformed
    /// file aborts the load; an empty but readable directory loads zero
    /// entries successfully.
    pub fn load_dir(dir: &Path) -> Result<Self, DictionaryError> {
        let mut files = Vec::new();
        collect_files(dir, &mut files)?;
        files.sort();

        let mut entries = Vec::new();
        for path in files {
            let data = fs::read(&path).map_err(|source| DictionaryError::Io {
                path: path.clone(),
                source,
            })?;
            let mut batch: Vec<SignEntry> = serde_json::from_slice(&data)
                .map_err(|source| DictionaryError::Parse {
                    path: path.clone(),
                    source,
                })?;
            info!("{:?} loaded ({} entries)", path, batch.len());
            entries.append(&mut batch);
        }
        Ok(Self { entries })
    }

    /// Builds a dictionary from entries already in memory.
    pub fn from_entries(entries: Vec<SignEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[SignEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn collect_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), DictionaryError> {
    let read_dir = fs::read_dir(dir).map_err(|source| DictionaryError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    for entry in read_dir {
        let entry = entry.map_err(|source| DictionaryError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_dir() {
            collect_files(&path, out)?;
        } else {
            out.push(path);
        }
    }
    Ok(())
}
