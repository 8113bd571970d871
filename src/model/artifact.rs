//! Persisted fitted objects shared between the `train` and `verity` binaries.
//!
//! Artifacts are plain bincode encodings of the serde representation. There is
//! no header or version field, so a file is only readable by a build with the
//! same type layout.
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::{DEFAULT_MODEL_PATH, DEFAULT_VECTORIZER_PATH};

#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::error::EncodeError),
    #[error("Deserialization error: {0}")]
    Deserialization(#[from] bincode::error::DecodeError),
}

/// Locations of the vectorizer/model file pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub vectorizer: PathBuf,
    pub model: PathBuf,
}

impl ArtifactPaths {
    pub fn new(vectorizer: impl Into<PathBuf>, model: impl Into<PathBuf>) -> Self {
        Self {
            vectorizer: vectorizer.into(),
            model: model.into(),
        }
    }

    /// Both files under `dir` with their default names.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self::new(
            dir.join(DEFAULT_VECTORIZER_PATH),
            dir.join(DEFAULT_MODEL_PATH),
        )
    }
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self::new(DEFAULT_VECTORIZER_PATH, DEFAULT_MODEL_PATH)
    }
}

/// Encode `value` and write it to `path`, replacing any existing file.
pub fn save_artifact<T: Serialize>(path: impl AsRef<Path>, value: &T) -> Result<(), ArtifactError> {
    let path = path.as_ref();
    let bytes = bincode::serde::encode_to_vec(value, bincode::config::standard())?;
    fs::write(path, &bytes).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("Wrote artifact {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

pub fn load_artifact<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, ArtifactError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let (value, _): (T, usize) =
        bincode::serde::decode_from_slice(&bytes, bincode::config::standard())?;
    Ok(value)
}
