//! Syllabus Storage Layer
//!
//! Implements the `DeadlineStore` trait on top of a directory of JSON files.
//!
//! # Layout
//!
//! - `all_deadlines.json`: the combined collection, a JSON array of records
//! - `<stem>_deadlines.json`: one file per processed document
//!
//! Both are pretty-printed UTF-8 and replaced atomically (temp file + rename),
//! so a reader never observes a half-written collection.
//!
//! # Examples
//!
//! ```no_run
//! use syllabus_domain::DeadlineRecord;
//! use syllabus_domain::traits::DeadlineStore;
//! use syllabus_store::JsonFileStore;
//!
//! let mut store = JsonFileStore::new("extracted_deadlines").unwrap();
//! store.upsert(DeadlineRecord::new("cs101.pdf")).unwrap();
//! assert_eq!(store.load_all().unwrap().len(), 1);
//! ```

#![warn(missing_docs)]

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use syllabus_domain::traits::DeadlineStore;
use syllabus_domain::{DeadlineCollection, DeadlineRecord};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

/// File name of the combined collection
pub const COLLECTION_FILE_NAME: &str = "all_deadlines.json";

/// Suffix appended to a document's base name for its per-document file
pub const RECORD_FILE_SUFFIX: &str = "_deadlines.json";

/// Longest stem kept verbatim in a per-document file name, in bytes
///
/// Longer stems are cut and tagged with a digest of the full stem, keeping the
/// whole name under the usual 255-byte file name limit.
pub const MAX_RECORD_STEM_BYTES: usize = 200;

/// Length of the digest tag appended to a shortened stem
const STEM_DIGEST_LEN: usize = 12;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Record could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored file exists but is not valid JSON for its type
    #[error("Corrupt data in {path}: {source}")]
    Corrupt {
        /// File that failed to parse
        path: PathBuf,
        /// Underlying parse error
        source: serde_json::Error,
    },
}

/// Per-document file name for a source document
///
/// The document's base name without its extension, plus
/// [`RECORD_FILE_SUFFIX`]. Directory components are dropped. A stem longer
/// than [`MAX_RECORD_STEM_BYTES`] is shortened and tagged with a digest, so
/// distinct long names still map to distinct files.
///
/// # Examples
///
/// ```
/// use syllabus_store::record_file_name;
///
/// assert_eq!(record_file_name("cs101.pdf"), "cs101_deadlines.json");
/// assert_eq!(record_file_name("uploads/math 200.pdf"), "math 200_deadlines.json");
/// ```
pub fn record_file_name(source_file: &str) -> String {
    let stem = Path::new(source_file)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "document".to_string());
    format!("{}{}", bounded_stem(&stem), RECORD_FILE_SUFFIX)
}

fn bounded_stem(stem: &str) -> String {
    if stem.len() <= MAX_RECORD_STEM_BYTES {
        return stem.to_string();
    }

    let keep = MAX_RECORD_STEM_BYTES - STEM_DIGEST_LEN - 1;
    let cut = (0..=keep)
        .rev()
        .find(|&i| stem.is_char_boundary(i))
        .unwrap_or(0);
    let digest = Uuid::new_v5(&Uuid::NAMESPACE_OID, stem.as_bytes())
        .simple()
        .to_string();

    format!("{}-{}", &stem[..cut], &digest[..STEM_DIGEST_LEN])
}

/// Replace `path` with `contents` atomically
///
/// Writes to a temporary file in the same directory, syncs it, then renames it
/// over the destination.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), StoreError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| StoreError::Io(e.error))?;

    debug!("Wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}

/// Directory-backed implementation of `DeadlineStore`
///
/// # Thread Safety
///
/// The read-merge-write in `upsert` is not atomic across processes or threads.
/// Share one instance behind a single lock.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open a store rooted at `dir`, creating the directory if needed
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Directory holding the store's files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the combined collection file
    pub fn collection_path(&self) -> PathBuf {
        self.dir.join(COLLECTION_FILE_NAME)
    }

    /// Path of the per-document file for a source document
    pub fn record_path(&self, source_file: &str) -> PathBuf {
        self.dir.join(record_file_name(source_file))
    }

    /// Load the per-document file for a source document, if present
    pub fn load_record(&self, source_file: &str) -> Result<Option<DeadlineRecord>, StoreError> {
        read_json(&self.record_path(source_file))
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    serde_json::from_str(&contents)
        .map(Some)
        .map_err(|source| StoreError::Corrupt {
            path: path.to_path_buf(),
            source,
        })
}

impl DeadlineStore for JsonFileStore {
    type Error = StoreError;

    fn load_existing(&self) -> Result<Option<DeadlineCollection>, Self::Error> {
        read_json(&self.collection_path())
    }

    fn save_all(&mut self, collection: &DeadlineCollection) -> Result<(), Self::Error> {
        let json = serde_json::to_vec_pretty(collection)?;
        write_atomic(&self.collection_path(), &json)
    }

    fn save_record(&mut self, record: &DeadlineRecord) -> Result<(), Self::Error> {
        let json = serde_json::to_vec_pretty(record)?;
        write_atomic(&self.record_path(&record.source_file), &json)
    }
}

/// In-memory implementation of `DeadlineStore` for tests and dry runs
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    collection: Option<DeadlineCollection>,
    records: BTreeMap<String, DeadlineRecord>,
}

impl MemoryStore {
    /// Create an empty store with no collection written yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds a collection
    pub fn with_collection(collection: DeadlineCollection) -> Self {
        Self {
            collection: Some(collection),
            records: BTreeMap::new(),
        }
    }

    /// The per-document record saved for a source document
    pub fn record(&self, source_file: &str) -> Option<&DeadlineRecord> {
        self.records.get(source_file)
    }

    /// Number of per-document records saved
    pub fn record_count(&self) -> usize {
        self.records.len()
    }
}

impl DeadlineStore for MemoryStore {
    type Error = std::convert::Infallible;

    fn load_existing(&self) -> Result<Option<DeadlineCollection>, Self::Error> {
        Ok(self.collection.clone())
    }

    fn save_all(&mut self, collection: &DeadlineCollection) -> Result<(), Self::Error> {
        self.collection = Some(collection.clone());
        Ok(())
    }

    fn save_record(&mut self, record: &DeadlineRecord) -> Result<(), Self::Error> {
        self.records
            .insert(record.source_file.clone(), record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_file_name() {
        assert_eq!(record_file_name("cs101.pdf"), "cs101_deadlines.json");
        assert_eq!(record_file_name("archive.tar.pdf"), "archive.tar_deadlines.json");
        assert_eq!(record_file_name("noext"), "noext_deadlines.json");
        assert_eq!(record_file_name(""), "document_deadlines.json");
    }

    #[test]
    fn test_record_file_name_bounds_long_stems() {
        let long = format!("{}.pdf", "a".repeat(248));
        let name = record_file_name(&long);
        assert!(name.len() <= 255);
        assert!(name.ends_with(RECORD_FILE_SUFFIX));
        assert_eq!(name, record_file_name(&long));

        let other = format!("{}b.pdf", "a".repeat(247));
        assert_ne!(name, record_file_name(&other));
    }

    #[test]
    fn test_record_file_name_cuts_on_char_boundary() {
        let long = format!("{}.pdf", "é".repeat(150));
        let name = record_file_name(&long);
        assert!(name.len() <= MAX_RECORD_STEM_BYTES + RECORD_FILE_SUFFIX.len());
        assert!(name.starts_with("é"));
    }

    #[test]
    fn test_memory_store_with_existing_collection() {
        let collection: DeadlineCollection = vec![DeadlineRecord::new("cs101.pdf")]
            .into_iter()
            .collect();
        let mut store = MemoryStore::with_collection(collection);
        assert_eq!(store.record_count(), 0);

        store.upsert(DeadlineRecord::new("math200.pdf")).unwrap();
        assert_eq!(
            store.load_all().unwrap().source_files(),
            vec!["cs101.pdf", "math200.pdf"]
        );
    }

    #[test]
    fn test_memory_store_starts_without_collection() {
        let store = MemoryStore::new();
        assert!(store.load_existing().unwrap().is_none());
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_memory_store_upsert_saves_both_artifacts() {
        let mut store = MemoryStore::new();
        store.upsert(DeadlineRecord::new("cs101.pdf")).unwrap();

        assert_eq!(store.load_all().unwrap().len(), 1);
        assert!(store.record("cs101.pdf").is_some());
        assert_eq!(store.record_count(), 1);
    }
}
