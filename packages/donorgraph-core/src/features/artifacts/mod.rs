//! Persisted projection artifacts
//!
//! ```text
//! {data_dir}/
//! ├── unipartite-matrix/{year}.{metric}.msgpack
//! ├── unipartite-graph/{year}.graph.msgpack
//! ├── unipartite-graph/{year}.{metric}_percent_{p}.msgpack
//! ├── unipartite-graph/{year}.{metric}_threshold_{t}.msgpack
//! ├── unipartite-mapping/{year}.json
//! └── features/{graph-name}.json
//! ```

pub mod store;

pub use store::ArtifactStore;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("artifact I/O on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("artifact not found: {0}")]
    NotFound(PathBuf),

    #[error("msgpack encode: {0}")]
    Encode(#[from] rmp_serde::encode::Error),

    #[error("msgpack decode of {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: rmp_serde::decode::Error,
    },

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

impl ArtifactError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            return ArtifactError::NotFound(path);
        }
        ArtifactError::Io { path, source }
    }
}
