//! Report Generation Tests
//!
//! End-to-end checks of the three figure renderers and the orchestrator:
//! files appear where expected, are valid PNGs, are replaced on re-run, and
//! nothing is written when a required column is missing.
//!
//! Run: cargo test --test report_test

#![allow(clippy::unwrap_used)]

use std::fs;
use std::path::Path;

use approx::assert_abs_diff_eq;
use proptest::prelude::*;

use detox_viz::dataset::{read_from, Dataset, REQUIRED_COLUMNS};
use detox_viz::report::{
    plot_boxplots, plot_correlations, plot_distributions, visualize_with, ReportConfig,
    BOXPLOTS_FILE, CORRELATIONS_FILE, DISTRIBUTIONS_FILE, CORRELATION_COLUMNS,
};
use detox_viz::stats::CorrelationMatrix;
use detox_viz::Error;

const PNG_MAGIC: &[u8; 8] = b"\x89PNG\r\n\x1a\n";

// ============================================================================
// Fixtures
// ============================================================================

/// Deterministic dataset shaped like the filtered corpus.
fn corpus(rows: usize) -> Dataset {
    let mut ds = Dataset::new();
    for (k, name) in REQUIRED_COLUMNS.iter().enumerate() {
        let values = (0..rows)
            .map(|i| {
                let t = (i * (k + 3)) as f32 * 0.173;
                match *name {
                    "reference_length" | "translation_length" => 20.0 + 15.0 * t.sin().abs(),
                    "length_diff" => t.cos() * 0.4,
                    _ => 0.5 + 0.5 * t.sin(),
                }
            })
            .collect();
        ds.insert_column(*name, values).unwrap();
    }
    ds
}

/// Small figure sizes keep the suite quick without changing layout logic.
fn small_config(dir: &Path) -> ReportConfig {
    ReportConfig::default()
        .output_dir(dir)
        .distributions_size(900, 450)
        .boxplots_size(400, 400)
        .correlations_size(600, 400)
}

fn assert_png(path: &Path) {
    let bytes = fs::read(path).unwrap();
    assert!(bytes.len() > PNG_MAGIC.len(), "{} is empty", path.display());
    assert_eq!(&bytes[..8], PNG_MAGIC, "{} is not a PNG", path.display());
}

// ============================================================================
// Individual renderers
// ============================================================================

#[test]
fn distributions_writes_png() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(DISTRIBUTIONS_FILE);
    plot_distributions(&corpus(300), &path).unwrap();
    assert_png(&path);
}

#[test]
fn boxplots_writes_png() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(BOXPLOTS_FILE);
    plot_boxplots(&corpus(300), &path).unwrap();
    assert_png(&path);
}

#[test]
fn correlations_writes_png() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CORRELATIONS_FILE);
    plot_correlations(&corpus(300), &path).unwrap();
    assert_png(&path);
}

#[test]
fn single_row_dataset_renders() {
    let dir = tempfile::tempdir().unwrap();
    let paths = visualize_with(&corpus(1), &small_config(dir.path())).unwrap();
    for path in paths.iter() {
        assert_png(path);
    }
}

#[test]
fn missing_column_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let mut partial = Dataset::new();
    for name in REQUIRED_COLUMNS.iter().filter(|&&n| n != "trn_tox") {
        partial.insert_column(*name, vec![0.1, 0.2, 0.3]).unwrap();
    }

    let renderers: [(fn(&Dataset, &Path) -> detox_viz::Result<()>, &str); 3] = [
        (plot_distributions, DISTRIBUTIONS_FILE),
        (plot_boxplots, BOXPLOTS_FILE),
        (plot_correlations, CORRELATIONS_FILE),
    ];
    for (render, file) in renderers {
        let path = dir.path().join(file);
        match render(&partial, &path) {
            Err(Error::MissingColumn { name }) => assert_eq!(name, "trn_tox"),
            other => panic!("{file}: unexpected result {other:?}"),
        }
        assert!(!path.exists(), "{file} written despite missing column");
    }
}

// ============================================================================
// Orchestrator
// ============================================================================

#[test]
fn visualize_creates_directory_and_returns_fixed_names() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("reports").join("figures");
    assert!(!out.exists());

    let paths = visualize_with(&corpus(120), &small_config(&out)).unwrap();

    assert!(out.is_dir());
    let names: Vec<_> = paths
        .iter()
        .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec![DISTRIBUTIONS_FILE, BOXPLOTS_FILE, CORRELATIONS_FILE]);
    for path in paths.iter() {
        assert_eq!(path.parent(), Some(out.as_path()));
        assert_png(path);
    }
}

#[test]
fn visualize_overwrites_previous_run() {
    let dir = tempfile::tempdir().unwrap();
    let config = small_config(dir.path());
    let paths = config.paths();
    fs::write(&paths.boxplots, b"stale").unwrap();

    visualize_with(&corpus(50), &config).unwrap();
    let first = fs::read(&paths.boxplots).unwrap();
    assert_eq!(&first[..8], PNG_MAGIC);

    visualize_with(&corpus(80), &config).unwrap();
    assert_png(&paths.boxplots);
}

#[test]
fn visualize_from_loaded_tsv() {
    let dir = tempfile::tempdir().unwrap();
    let tsv = "\treference\ttranslation\tsimilarity\tlength_diff\tref_tox\ttrn_tox\n\
               0\tIf you do not, go away\tIf not, leave\t0.78\t0.31\t0.98\t0.01\n\
               1\tshut up\tbe quiet\t0.65\t0.12\t0.99\t0.02\n\
               2\tyou idiot\tyou\t0.81\t0.55\t0.97\t0.03\n";
    let dataset = read_from(tsv.as_bytes(), b'\t').unwrap();
    dataset.require(&REQUIRED_COLUMNS).unwrap();

    let paths = visualize_with(&dataset, &small_config(dir.path())).unwrap();
    assert_png(&paths.correlations);
}

// ============================================================================
// Correlation invariants
// ============================================================================

#[test]
fn correlation_of_report_columns() {
    let ds = corpus(200);
    let columns: Vec<(&str, &[f32])> = CORRELATION_COLUMNS
        .iter()
        .map(|&name| (name, ds.column(name).unwrap()))
        .collect();
    let matrix = CorrelationMatrix::pearson(&columns).unwrap();

    assert_eq!(matrix.size(), 4);
    for i in 0..4 {
        assert_abs_diff_eq!(matrix.get(i, i).unwrap(), 1.0, epsilon = 1e-12);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_correlation_symmetric_and_bounded(
        rows in prop::collection::vec(
            (-1e3f32..1e3, -1e3f32..1e3, -1e3f32..1e3, -1e3f32..1e3),
            0..60,
        )
    ) {
        let a: Vec<f32> = rows.iter().map(|r| r.0).collect();
        let b: Vec<f32> = rows.iter().map(|r| r.1).collect();
        let c: Vec<f32> = rows.iter().map(|r| r.2).collect();
        let d: Vec<f32> = rows.iter().map(|r| r.3).collect();
        let matrix = CorrelationMatrix::pearson(&[("a", &a[..]), ("b", &b[..]), ("c", &c[..]), ("d", &d[..])]).unwrap();

        for i in 0..4 {
            for j in 0..4 {
                let v = matrix.get(i, j).unwrap();
                let w = matrix.get(j, i).unwrap();
                prop_assert!(v.is_nan() == w.is_nan());
                if !v.is_nan() {
                    prop_assert_eq!(v, w);
                    prop_assert!((-1.0..=1.0).contains(&v), "r = {}", v);
                }
            }
        }
    }

    #[test]
    fn prop_correlation_ignores_missing_cells(
        pairs in prop::collection::vec((-10f32..10.0, -10f32..10.0, any::<bool>()), 3..40)
    ) {
        let x: Vec<f32> = pairs.iter().map(|p| if p.2 { f32::NAN } else { p.0 }).collect();
        let y: Vec<f32> = pairs.iter().map(|p| p.1).collect();
        let matrix = CorrelationMatrix::pearson(&[("x", &x[..]), ("y", &y[..])]).unwrap();
        let r = matrix.get(0, 1).unwrap();
        prop_assert!(r.is_nan() || (-1.0..=1.0).contains(&r));
    }
}
