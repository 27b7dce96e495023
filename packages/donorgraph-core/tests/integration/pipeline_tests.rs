//! Projection → pruning → analysis over persisted artifacts

#[path = "../common/mod.rs"]
mod common;

use common::store_from;
use donorgraph_core::config::DonorgraphConfig;
use donorgraph_core::features::artifacts::ArtifactStore;
use donorgraph_core::features::projection::Metric;
use donorgraph_core::features::pruning::PruneSpec;
use donorgraph_core::pipeline::{AnalysisPipeline, ProjectionPipeline, PruningPipeline, UnitId};
use donorgraph_storage::InMemoryContributionStore;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn config(dir: &TempDir) -> DonorgraphConfig {
    let mut config = DonorgraphConfig::default();
    config.storage.data_dir = dir.path().join("artifacts");
    config.projection.min_recipients = 1;
    config.parallel.num_workers = 2;
    config
}

fn cycle() -> InMemoryContributionStore {
    store_from(
        1984,
        &[
            (1, "A", 100),
            (1, "B", 100),
            (1, "C", 50),
            (2, "A", 20),
            (2, "B", 10),
            (3, "B", 500),
            (3, "C", 250),
            (4, "D", 40),
            (4, "A", 1),
            (5, "D", 5),
        ],
    )
}

#[test]
fn test_project_then_prune_writes_every_artifact() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir);

    let projection = ProjectionPipeline::new(&config).unwrap();
    let report = projection.run_year(1984, &cycle());
    assert!(report.is_success());
    // the cycle itself plus one unit per metric
    assert_eq!(report.outcomes().len(), 1 + Metric::ALL.len());

    let artifacts = projection.artifacts();
    let structure = artifacts.read_structure(1984).unwrap();
    let id_map = artifacts.read_mapping(1984).unwrap();
    // donor 5 gave to a single recipient
    assert_eq!(id_map.len(), 4);
    assert_eq!(structure.node_count(), 4);
    for metric in Metric::ALL {
        let matrix = artifacts.read_matrix(1984, metric).unwrap();
        assert_eq!(matrix.n(), 4);
        assert_eq!(matrix.nnz(), 2 * structure.edge_count());
    }

    let report = PruningPipeline::new(&config).run_all(&[1984], &[Metric::Cosine, Metric::Affinity]);
    assert!(report.is_success());

    let cosine_specs = config.pruning.specs_for(Metric::Cosine);
    assert_eq!(cosine_specs.len(), 8);
    for spec in cosine_specs {
        let name = spec.graph_name(1984, Metric::Cosine);
        assert!(artifacts.graph_path(&name).exists(), "missing {}", name);
    }
    // affinity has no thresholds
    assert!(!artifacts
        .graph_path(&PruneSpec::Threshold(0.8).graph_name(1984, Metric::Affinity))
        .exists());
    assert!(artifacts
        .graph_path(&PruneSpec::Percent(0.5).graph_name(1984, Metric::Affinity))
        .exists());
}

#[test]
fn test_features_over_pruned_graph() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir);
    ProjectionPipeline::new(&config)
        .unwrap()
        .run_year(1984, &cycle());
    PruningPipeline::new(&config).run(1984, Metric::Jaccard);

    let name = PruneSpec::Percent(0.5).graph_name(1984, Metric::Jaccard);
    let analysis = AnalysisPipeline::new(&config);
    let features = analysis.features(1984, &name, &cycle()).unwrap();

    assert_eq!(features.len(), 5);
    let pruned = analysis.artifacts().read_graph(&name).unwrap();
    let total_degree: u32 = features.iter().map(|f| f.degree).sum();
    assert_eq!(total_degree as usize, 2 * pruned.edge_count());

    let lone = features.iter().find(|f| f.contributor_id == Some(5)).unwrap();
    assert_eq!((lone.degree, lone.component_size, lone.pagerank), (0, 1, 0.0));
    assert_eq!(lone.total_amount, 5);
}

#[test]
fn test_correlation_over_persisted_matrices() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir);
    ProjectionPipeline::new(&config)
        .unwrap()
        .run_year(1984, &cycle());

    let corr = AnalysisPipeline::new(&config)
        .correlate(1984, &[Metric::Jaccard, Metric::Jaccard2, Metric::Cosine])
        .unwrap();

    assert_eq!(corr.metrics.len(), 3);
    for metric in [Metric::Jaccard, Metric::Jaccard2, Metric::Cosine] {
        assert_eq!(corr.get(metric, metric), Some(1.0));
    }
    let jc = corr.get(Metric::Jaccard, Metric::Cosine).unwrap();
    assert_eq!(Some(jc), corr.get(Metric::Cosine, Metric::Jaccard));
    assert!((-1.0..=1.0).contains(&jc));
}

#[test]
fn test_rerun_overwrites_identically() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir);
    let pipeline = ProjectionPipeline::new(&config).unwrap();

    pipeline.run_year(1984, &cycle());
    let first = pipeline.artifacts().read_matrix(1984, Metric::WeightedAdamic).unwrap();
    pipeline.run_year(1984, &cycle());
    let second = ArtifactStore::new(&config.storage.data_dir)
        .read_matrix(1984, Metric::WeightedAdamic)
        .unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_empty_cycle_projects_to_empty_graph() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir);
    let pipeline = ProjectionPipeline::new(&config).unwrap();

    let report = pipeline.run_year(1990, &InMemoryContributionStore::new());
    assert!(report.is_success());
    assert_eq!(pipeline.artifacts().read_mapping(1990).unwrap().len(), 0);
    assert_eq!(pipeline.artifacts().read_matrix(1990, Metric::Cosine).unwrap().nnz(), 0);
}

#[test]
fn test_pruning_unprojected_year_fails_per_unit() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir);
    ProjectionPipeline::new(&config)
        .unwrap()
        .run_year(1984, &cycle());

    let report = PruningPipeline::new(&config).run_all(&[1984, 1986], &[Metric::Adamic]);
    assert_eq!(report.succeeded(), 1);
    let failed: Vec<UnitId> = report.failures().map(|o| o.unit).collect();
    assert_eq!(failed, vec![UnitId::metric(1986, Metric::Adamic)]);
}

#[cfg(feature = "sqlite")]
mod sqlite {
    use super::*;
    use pretty_assertions::assert_eq;
    use donorgraph_storage::{ContributorRow, RecipientRow, SqliteContributionStore, TransactionRow};

    fn seed(path: &std::path::Path, config: &DonorgraphConfig) {
        let mut store = SqliteContributionStore::open(path, config.schema.clone()).unwrap();
        store.init_schema().unwrap();
        store
            .insert_contributors(&[
                ContributorRow::new(1),
                ContributorRow::new(2),
                ContributorRow::new(3),
            ])
            .unwrap();

        let recipient = |rid: &str, party: i64| RecipientRow {
            party: Some(party),
            ..RecipientRow::new(1980, rid, "federal:house")
        };
        store
            .insert_recipients(&[recipient("R1", 1), recipient("R2", 2), recipient("R3", 1)])
            .unwrap();

        let tx = |tid: &str, cid: i64, rid: &str, amount: i64| {
            TransactionRow::new(1980, tid, cid, Some(rid), Some("federal:house"), amount)
        };
        store
            .insert_transactions(&[
                tx("t1", 1, "R1", 100),
                tx("t2", 1, "R2", 100),
                tx("t3", 2, "R1", 60),
                tx("t4", 2, "R2", 20),
                tx("t5", 2, "R3", 20),
                tx("t6", 3, "R3", 50),
            ])
            .unwrap();
    }

    #[test]
    fn test_run_years_reads_cycle_databases() {
        let dir = TempDir::new().unwrap();
        let mut config = config(&dir);
        config.storage.database = format!("{}/{{year}}.sqlite", dir.path().display());
        seed(&config.database_path(1980), &config);

        let pipeline = ProjectionPipeline::new(&config).unwrap();
        // 1982 has no tables
        let report = pipeline.run_years(&[1980, 1982]);

        assert!(report.outcome(UnitId::year(1980)).unwrap().is_ok());
        assert!(!report.outcome(UnitId::year(1982)).unwrap().is_ok());
        assert_eq!(report.failures().count(), 1);
        assert_eq!(pipeline.artifacts().read_structure(1980).unwrap().edge_count(), 1);
    }

    #[test]
    fn test_democratic_share_from_recipient_party() {
        let dir = TempDir::new().unwrap();
        let mut config = config(&dir);
        config.storage.database = format!("{}/{{year}}.sqlite", dir.path().display());
        let path = config.database_path(1980);
        seed(&path, &config);
        let store = SqliteContributionStore::open(&path, config.schema.clone()).unwrap();

        ProjectionPipeline::new(&config).unwrap().run_year(1980, &store);
        let features = AnalysisPipeline::new(&config)
            .features(1980, &ArtifactStore::structure_name(1980), &store)
            .unwrap();

        let share = |cid: i64| {
            features
                .iter()
                .find(|f| f.contributor_id == Some(cid))
                .and_then(|f| f.democratic_share)
        };
        assert_eq!(share(1), Some(0.5));
        assert_eq!(share(2), Some(0.8));
        assert_eq!(share(3), Some(1.0));
    }

    #[test]
    fn test_validation_of_seeded_cycle() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir);
        let path = dir.path().join("1980.sqlite");
        seed(&path, &config);
        let store = SqliteContributionStore::open(&path, config.schema.clone()).unwrap();

        let (report, stats) = AnalysisPipeline::validate(&store).unwrap();
        assert!(report.is_valid());
        assert_eq!(stats.full_donors, 3);
        assert_eq!(stats.full_recipients, 3);
        assert_eq!(stats.partial_donors + stats.partial_recipients, 0);
        assert_eq!(stats.donations, 6);
    }
}
