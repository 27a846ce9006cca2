//! File-persisted bit vector
//!
//! Keeps the bits in a [`BitSet`] while the filter is open and writes them to
//! disk on close. The on-disk format is a zstd stream holding a
//! bincode-encoded [`BitSetSnapshot`].
//!
//! Writes go to `<path>.partial` first and are renamed over the target, so a
//! crash mid-flush leaves the previous snapshot intact.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::{BitSet, BitSetSnapshot, BitVector, BloomFilter, FilterConfig, PersistenceConfig};
use crate::error::{FilterError, StorageError};

/// Bit vector loaded from and flushed to a file
pub struct FileBitVector {
    bits: BitSet,
    path: PathBuf,
    persistence: PersistenceConfig,
}

/// Borrowed view of a snapshot, encoded identically to [`BitSetSnapshot`]
#[derive(Serialize)]
struct SnapshotRef<'a> {
    capacity_bits: u64,
    words: &'a [u64],
}

impl FileBitVector {
    /// Open the snapshot at `path`, or start empty if there is none
    pub fn open<P: AsRef<Path>>(path: P, capacity: u64) -> Result<Self, FilterError> {
        Self::open_with(path, capacity, PersistenceConfig::default())
    }

    pub fn open_with<P: AsRef<Path>>(
        path: P,
        capacity: u64,
        persistence: PersistenceConfig,
    ) -> Result<Self, FilterError> {
        persistence.validate()?;
        let path = path.as_ref().to_path_buf();
        let bits = Self::load(&path, capacity)?;

        Ok(Self {
            bits,
            path,
            persistence,
        })
    }

    /// Target snapshot path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// In-memory bits
    pub fn bits(&self) -> &BitSet {
        &self.bits
    }

    /// Write the current bits to disk, replacing any previous snapshot
    pub fn flush(&self) -> Result<(), FilterError> {
        let tmp = partial_path(&self.path);

        match self.write_snapshot(&tmp) {
            Ok(bytes) => {
                debug!(
                    path = %self.path.display(),
                    bytes,
                    bits_set = self.bits.count_ones(),
                    "Bloom filter snapshot flushed"
                );
                Ok(())
            }
            Err(source) => {
                if let Err(e) = fs::remove_file(&tmp) {
                    if e.kind() != io::ErrorKind::NotFound {
                        warn!(path = %tmp.display(), error = %e, "Failed to remove partial snapshot");
                    }
                }
                Err(FilterError::storage(&self.path, source))
            }
        }
    }

    fn write_snapshot(&self, tmp: &Path) -> Result<u64, StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let snapshot = SnapshotRef {
            capacity_bits: self.bits.capacity(),
            words: self.bits.words(),
        };

        let file = File::create(tmp)?;
        let mut encoder =
            zstd::stream::write::Encoder::new(BufWriter::new(file), self.persistence.compression_level)
                .map_err(StorageError::Compression)?;
        bincode::serialize_into(&mut encoder, &snapshot).map_err(encoding_error)?;
        let writer = encoder.finish().map_err(StorageError::Compression)?;
        let file = writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
        let bytes = file.metadata()?.len();

        fs::rename(tmp, &self.path)?;
        Ok(bytes)
    }

    fn load(path: &Path, capacity: u64) -> Result<BitSet, FilterError> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(path = %path.display(), capacity_bits = capacity, "No snapshot found, starting empty");
                return BitSet::new(capacity);
            }
            Err(e) => return Err(FilterError::storage(path, StorageError::Io(e))),
        };

        // Directories open fine on Unix; reject them before the decoder sees them
        let metadata = file
            .metadata()
            .map_err(|e| FilterError::storage(path, StorageError::Io(e)))?;
        if !metadata.is_file() {
            return Err(FilterError::storage(
                path,
                StorageError::Io(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "snapshot path is not a regular file",
                )),
            ));
        }

        let bits = Self::decode(file, capacity).map_err(|source| FilterError::storage(path, source))?;
        info!(
            path = %path.display(),
            capacity_bits = capacity,
            bits_set = bits.count_ones(),
            "Loaded bloom filter snapshot"
        );
        Ok(bits)
    }

    fn decode(file: File, capacity: u64) -> Result<BitSet, StorageError> {
        let decoder = zstd::stream::read::Decoder::new(BufReader::new(file))
            .map_err(StorageError::Compression)?;
        let snapshot: BitSetSnapshot = bincode::deserialize_from(decoder).map_err(encoding_error)?;

        if snapshot.capacity_bits != capacity {
            return Err(StorageError::CapacityMismatch {
                stored: snapshot.capacity_bits,
                expected: capacity,
            });
        }

        let words = snapshot.words.len();
        BitSet::from_words(capacity, snapshot.words).ok_or_else(|| {
            StorageError::Encoding(format!(
                "{} words cannot hold exactly {} bits",
                words, capacity
            ))
        })
    }
}

impl BitVector for FileBitVector {
    fn capacity(&self) -> u64 {
        self.bits.capacity()
    }

    fn set(&mut self, index: u64) -> Result<(), FilterError> {
        self.bits.set(index)
    }

    fn is_set(&self, index: u64) -> Result<bool, FilterError> {
        self.bits.is_set(index)
    }

    /// Flush, then drop the in-memory bits
    fn close(self) -> Result<(), FilterError> {
        self.flush()
    }
}

impl BloomFilter<FileBitVector> {
    /// Open a filter persisted at `path`
    ///
    /// Loads the existing snapshot, or starts empty if `path` does not exist.
    /// Bits reach disk on [`close`](BloomFilter::close) or
    /// [`flush`](BloomFilter::flush); dropping the filter discards unflushed puts.
    pub fn file<P: AsRef<Path>>(
        path: P,
        capacity_bits: u64,
        hash_count: u32,
    ) -> Result<Self, FilterError> {
        let config = FilterConfig::new(capacity_bits, hash_count)?;
        Self::file_with_config(path, config, PersistenceConfig::default())
    }

    /// Open a file filter with explicit filter and compression settings
    pub fn file_with_config<P: AsRef<Path>>(
        path: P,
        config: FilterConfig,
        persistence: PersistenceConfig,
    ) -> Result<Self, FilterError> {
        config.validate()?;
        let bits = FileBitVector::open_with(path, config.capacity_bits, persistence)?;
        Self::with_backend(config, bits)
    }

    /// Persist the current bits without closing
    pub fn flush(&self) -> Result<(), FilterError> {
        self.backend().flush()
    }
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".partial");
    PathBuf::from(name)
}

fn encoding_error(err: bincode::Error) -> StorageError {
    match *err {
        bincode::ErrorKind::Io(e) => StorageError::Compression(e),
        other => StorageError::Encoding(other.to_string()),
    }
}
