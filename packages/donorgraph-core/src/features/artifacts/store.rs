//! ArtifactStore: file layout + atomic writes
//!
//! Every write goes to a named temp file in the target directory, is synced,
//! then renamed over the final path. Readers never see a partial artifact.

use serde::de::DeserializeOwned;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::features::donor_features::DonorFeatures;
use crate::features::projection::Metric;
use crate::features::pruning::PruneSpec;
use crate::features::sparse::{CooMatrix, IdMap, UnipartiteGraph};
use crate::shared::constants::artifacts::{FEATURES_DIR, GRAPH_DIR, MAPPING_DIR, MATRIX_DIR};

use super::ArtifactError;

type Result<T> = std::result::Result<T, ArtifactError>;

#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn matrix_path(&self, year: i64, metric: Metric) -> PathBuf {
        self.root
            .join(MATRIX_DIR)
            .join(format!("{}.{}.msgpack", year, metric))
    }

    /// Name of the unpruned structural graph of a cycle
    pub fn structure_name(year: i64) -> String {
        format!("{}.graph", year)
    }

    pub fn graph_path(&self, name: &str) -> PathBuf {
        self.root.join(GRAPH_DIR).join(format!("{}.msgpack", name))
    }

    pub fn mapping_path(&self, year: i64) -> PathBuf {
        self.root.join(MAPPING_DIR).join(format!("{}.json", year))
    }

    pub fn features_path(&self, graph_name: &str) -> PathBuf {
        self.root
            .join(FEATURES_DIR)
            .join(format!("{}.json", graph_name))
    }

    pub fn write_matrix(&self, year: i64, metric: Metric, matrix: &CooMatrix) -> Result<PathBuf> {
        let path = self.matrix_path(year, metric);
        write_atomic(&path, &rmp_serde::to_vec_named(matrix)?)?;
        Ok(path)
    }

    pub fn read_matrix(&self, year: i64, metric: Metric) -> Result<CooMatrix> {
        read_msgpack(&self.matrix_path(year, metric))
    }

    pub fn has_matrix(&self, year: i64, metric: Metric) -> bool {
        self.matrix_path(year, metric).is_file()
    }

    pub fn write_structure(&self, year: i64, graph: &UnipartiteGraph) -> Result<PathBuf> {
        self.write_graph(&Self::structure_name(year), graph)
    }

    pub fn read_structure(&self, year: i64) -> Result<UnipartiteGraph> {
        self.read_graph(&Self::structure_name(year))
    }

    pub fn write_pruned(
        &self,
        year: i64,
        metric: Metric,
        spec: PruneSpec,
        graph: &UnipartiteGraph,
    ) -> Result<PathBuf> {
        self.write_graph(&spec.graph_name(year, metric), graph)
    }

    /// Structural or pruned graph by artifact name
    pub fn write_graph(&self, name: &str, graph: &UnipartiteGraph) -> Result<PathBuf> {
        let path = self.graph_path(name);
        write_atomic(&path, &rmp_serde::to_vec_named(graph)?)?;
        Ok(path)
    }

    pub fn read_graph(&self, name: &str) -> Result<UnipartiteGraph> {
        read_msgpack(&self.graph_path(name))
    }

    pub fn write_mapping(&self, year: i64, id_map: &IdMap) -> Result<PathBuf> {
        let path = self.mapping_path(year);
        write_atomic(&path, &serde_json::to_vec_pretty(id_map)?)?;
        Ok(path)
    }

    pub fn read_mapping(&self, year: i64) -> Result<IdMap> {
        let path = self.mapping_path(year);
        let bytes = fs::read(&path).map_err(|e| ArtifactError::io(&path, e))?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub fn write_features(&self, graph_name: &str, features: &[DonorFeatures]) -> Result<PathBuf> {
        let path = self.features_path(graph_name);
        write_atomic(&path, &serde_json::to_vec_pretty(features)?)?;
        Ok(path)
    }

    pub fn read_features(&self, graph_name: &str) -> Result<Vec<DonorFeatures>> {
        let path = self.features_path(graph_name);
        let bytes = fs::read(&path).map_err(|e| ArtifactError::io(&path, e))?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

fn read_msgpack<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = fs::read(path).map_err(|e| ArtifactError::io(path, e))?;
    rmp_serde::from_slice(&bytes).map_err(|source| ArtifactError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir).map_err(|e| ArtifactError::io(dir, e))?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| ArtifactError::io(dir, e))?;
    tmp.write_all(bytes).map_err(|e| ArtifactError::io(tmp.path(), e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| ArtifactError::io(tmp.path(), e))?;
    tmp.persist(path)
        .map_err(|e| ArtifactError::io(path, e.error))?;

    debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}
