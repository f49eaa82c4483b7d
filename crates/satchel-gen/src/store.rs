//! Asset storage.
//!
//! Generated documents are addressed by `/`-separated paths relative to an
//! asset root. [`FsAssetStore`] keeps them on disk, [`MemoryAssetStore`] in a
//! map.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use satchel_spec::is_safe_asset_path;

use crate::error::{GenError, GenResult, StoreError};

/// One document to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetFile {
    /// Asset path relative to the store root.
    pub path: String,
    /// Encoded contents.
    pub bytes: Vec<u8>,
}

/// Where generated and basis documents live.
pub trait AssetStore {
    /// Reads the asset at `path`.
    fn read(&self, path: &str) -> Result<Vec<u8>, StoreError>;

    /// Returns true if an asset exists at `path`.
    fn exists(&self, path: &str) -> bool;

    /// Writes every file, overwriting existing assets at the same paths.
    ///
    /// Nothing is written unless every path is safe.
    fn write_batch(&mut self, files: &[AssetFile]) -> Result<(), StoreError>;
}

/// Decodes the JSON document at `path`.
pub fn load_document<T: DeserializeOwned>(store: &dyn AssetStore, path: &str) -> GenResult<T> {
    let bytes = store.read(path)?;
    serde_json::from_slice(&bytes).map_err(|source| GenError::Decode {
        path: path.to_string(),
        source,
    })
}

/// Encodes a document as pretty JSON with a trailing newline.
pub fn encode_document<T: Serialize + ?Sized>(document: &T) -> GenResult<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(document).map_err(GenError::Serialize)?;
    bytes.push(b'\n');
    Ok(bytes)
}

fn check_path(path: &str) -> Result<(), StoreError> {
    if is_safe_asset_path(path) {
        Ok(())
    } else {
        Err(StoreError::UnsafePath {
            path: path.to_string(),
        })
    }
}

/// Filesystem store rooted at a directory.
///
/// A batch is staged as temporary files in the destination directories. Only
/// once every file is staged are they renamed over their targets, so a failed
/// write leaves the previous documents in place. A failure during the renames
/// themselves can still leave the batch partly applied.
#[derive(Debug, Clone)]
pub struct FsAssetStore {
    root: PathBuf,
}

impl FsAssetStore {
    /// Creates a store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The asset root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Filesystem location of an asset path.
    pub fn resolve(&self, path: &str) -> PathBuf {
        path.split('/')
            .filter(|s| !s.is_empty())
            .fold(self.root.clone(), |acc, segment| acc.join(segment))
    }

    fn stage(&self, file: &AssetFile) -> Result<Staged, StoreError> {
        let target = self.resolve(&file.path);
        let dir = target.parent().unwrap_or(&self.root);
        std::fs::create_dir_all(dir).map_err(|e| StoreError::io(&file.path, e))?;

        let mut temp =
            tempfile::NamedTempFile::new_in(dir).map_err(|e| StoreError::io(&file.path, e))?;
        temp.write_all(&file.bytes)
            .and_then(|()| temp.flush())
            .map_err(|e| StoreError::io(&file.path, e))?;
        Ok(Staged {
            path: file.path.clone(),
            temp,
            target,
        })
    }
}

/// A fully written temporary file waiting to replace its target.
struct Staged {
    path: String,
    temp: tempfile::NamedTempFile,
    target: PathBuf,
}

impl Staged {
    fn persist(self) -> Result<(), StoreError> {
        let path = self.path;
        self.temp
            .persist(&self.target)
            .map(|_| ())
            .map_err(|e| StoreError::io(&path, e.error))
    }
}

impl AssetStore for FsAssetStore {
    fn read(&self, path: &str) -> Result<Vec<u8>, StoreError> {
        check_path(path)?;
        std::fs::read(self.resolve(path)).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StoreError::NotFound {
                    path: path.to_string(),
                }
            } else {
                StoreError::io(path, e)
            }
        })
    }

    fn exists(&self, path: &str) -> bool {
        is_safe_asset_path(path) && self.resolve(path).is_file()
    }

    fn write_batch(&mut self, files: &[AssetFile]) -> Result<(), StoreError> {
        for file in files {
            check_path(&file.path)?;
        }
        let staged = files
            .iter()
            .map(|file| self.stage(file))
            .collect::<Result<Vec<_>, _>>()?;
        for file in staged {
            file.persist()?;
        }
        Ok(())
    }
}

/// In-memory store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryAssetStore {
    files: BTreeMap<String, Vec<u8>>,
}

impl MemoryAssetStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces one asset.
    pub fn insert(&mut self, path: impl Into<String>, bytes: Vec<u8>) {
        self.files.insert(path.into(), bytes);
    }

    /// Stored paths in sorted order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    /// Number of stored assets.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl AssetStore for MemoryAssetStore {
    fn read(&self, path: &str) -> Result<Vec<u8>, StoreError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                path: path.to_string(),
            })
    }

    fn exists(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    fn write_batch(&mut self, files: &[AssetFile]) -> Result<(), StoreError> {
        for file in files {
            check_path(&file.path)?;
        }
        for file in files {
            self.files.insert(file.path.clone(), file.bytes.clone());
        }
        Ok(())
    }
}
