//! Batch files end to end: YAML loading, path resolution, parallel runs.

mod common;

use common::Workspace;
use pixelsmith::error::{ConfigError, ConvertError};
use pixelsmith::models::BatchConfig;
use pixelsmith::services::{BatchRunner, ImageConverter};
use pretty_assertions::assert_eq;

const BATCH_YAML: &str = r#"
workers: 2
pixel_art:
  target_pixel_width: 16
  color_count: 8
jobs:
  - input: src/one.png
    output: out/one.png
  - input: src/missing.png
    output: out/missing.png
  - input: src/two.jpg
    output: out/two.png
    pixel_art:
      color_count: 4
      interpolation: Lanczos
  - input: src/one.png
    output: out/one_enhanced.jpg
    mode: enhance
    enhance:
      upscale_factor: 1.5
"#;

#[tokio::test]
async fn test_batch_runs_all_jobs_and_isolates_failures() {
    let ws = Workspace::new();
    ws.write_photo("src/one.png", 64, 48);
    ws.write_photo("src/two.jpg", 80, 40);
    ws.mkdir("out");
    let config_path = ws.write_file("batch.yaml", BATCH_YAML);

    let config = BatchConfig::load(&config_path).expect("batch file should load");
    assert_eq!(config.workers, Some(2));

    let runner = BatchRunner::new(ImageConverter::new(config.output), 2);
    let summary = runner.run(config.resolve_jobs()).await;

    assert_eq!(summary.results.len(), 4);
    assert_eq!(summary.succeeded(), 3);
    assert_eq!(summary.failed(), 1);

    let indices: Vec<usize> = summary.results.iter().map(|r| r.index).collect();
    assert_eq!(indices, vec![1, 2, 3, 4]);

    let missing = &summary.results[1];
    assert!(
        matches!(missing.result, Err(ConvertError::Decode { .. })),
        "got {:?}",
        missing.result
    );
    assert!(!ws.path("out/missing.png").exists());

    common::assert_dimensions(&ws.path("out/one.png"), 64, 48);
    common::assert_max_colors(&ws.path("out/one.png"), 8);
    common::assert_max_colors(&ws.path("out/two.png"), 4);

    common::assert_jpeg_file(&ws.path("out/one_enhanced.jpg"));
    common::assert_dimensions(&ws.path("out/one_enhanced.jpg"), 96, 72);
}

#[tokio::test]
async fn test_single_worker_matches_parallel_output() {
    let ws = Workspace::new();
    ws.write_photo("a.png", 50, 50);
    ws.mkdir("serial");
    ws.mkdir("parallel");
    let yaml = r#"
jobs:
  - { input: a.png, output: serial/a.png }
  - { input: a.png, output: parallel/a.png }
"#;
    let config_path = ws.write_file("batch.yaml", yaml);
    let config = BatchConfig::load(&config_path).unwrap();

    let summary = BatchRunner::new(ImageConverter::default(), 1)
        .run(config.resolve_jobs())
        .await;

    assert!(summary.is_success());
    assert_eq!(
        common::load_rgb(&ws.path("serial/a.png")),
        common::load_rgb(&ws.path("parallel/a.png"))
    );
}

#[test]
fn test_relative_paths_resolve_against_config_dir() {
    let ws = Workspace::new();
    let config_path = ws.write_file(
        "nested/batch.yaml",
        "jobs:\n  - input: in.png\n    output: /abs/out.png\n",
    );

    let config = BatchConfig::load(&config_path).unwrap();
    let jobs = config.resolve_jobs();

    assert_eq!(jobs[0].input, ws.path("nested/in.png"));
    assert_eq!(jobs[0].output, std::path::PathBuf::from("/abs/out.png"));
}

#[test]
fn test_invalid_job_settings_fail_at_load() {
    let ws = Workspace::new();
    let config_path = ws.write_file(
        "batch.yaml",
        "jobs:\n  - input: a.png\n    output: b.png\n  - input: c.png\n    output: d.png\n    pixel_art:\n      color_count: 1\n",
    );

    let err = BatchConfig::load(&config_path).unwrap_err();
    assert!(
        matches!(err, ConfigError::InvalidJob { index: 2, .. }),
        "got {err:?}"
    );
}

#[test]
fn test_empty_batch_rejected() {
    let ws = Workspace::new();
    let config_path = ws.write_file("batch.yaml", "workers: 3\n");

    let err = BatchConfig::load(&config_path).unwrap_err();
    assert!(matches!(err, ConfigError::NoJobs), "got {err:?}");
}

#[test]
fn test_missing_batch_file() {
    let ws = Workspace::new();
    let err = BatchConfig::load(&ws.path("nope.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }), "got {err:?}");
}
