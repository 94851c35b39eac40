//! Content hashing for duplicate confirmation.
//!
//! SHA-256 throughout: collisions are negligible, so hash equality
//! stands in for byte-for-byte comparison. A cheap 4 KB prefix hash
//! prunes same-size files that differ early, before any full read.

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::common::errors::{EngineError, EngineResult};

/// Size of the quick-hash prefix
const QUICK_HASH_SIZE: usize = 4096;

/// SHA-256 of the first 4 KB of a file
pub fn quick_hash(path: &Path) -> EngineResult<String> {
    let file = File::open(path).map_err(|e| EngineError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut reader = BufReader::new(file);
    let mut buffer = vec![0u8; QUICK_HASH_SIZE];
    let bytes_read = reader.read(&mut buffer).map_err(|e| EngineError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    buffer.truncate(bytes_read);

    let mut hasher = Sha256::new();
    hasher.update(&buffer);
    Ok(format!("{:x}", hasher.finalize()))
}

/// Full-content SHA-256 of a file
pub fn full_hash(path: &Path) -> EngineResult<String> {
    let file = File::open(path).map_err(|e| EngineError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut reader = BufReader::with_capacity(1024 * 1024, file);
    let mut hasher = Sha256::new();

    let mut buffer = vec![0u8; 1024 * 1024];
    loop {
        let bytes_read = reader.read(&mut buffer).map_err(|e| EngineError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}
