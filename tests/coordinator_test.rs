//! End-to-end export tests over a manifest library in a temporary directory
//!
//! These tests verify that:
//! - Assets land in `YYYY/MM` folders under the export root
//! - Assets outside the year range are not exported
//! - A failed asset is recorded in the ledger while others are exported
//! - An incremental re-run keeps every file already present
//! - A shutdown signal stops new assets from starting

use photos_export::config::ExporterConfig;
use photos_export::core::export::ExportCoordinator;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::sync::watch;

const MANIFEST: &str = r#"{
    "version": 1,
    "assets": [
        {
            "id": "LIVE-1",
            "captureDate": "2024-06-15T12:00:00Z",
            "mediaType": "image",
            "mediaSubtypes": 8,
            "pixelWidth": 4032,
            "pixelHeight": 3024,
            "resources": [
                { "type": "photo", "originalFilename": "IMG_0001.HEIC", "uti": "public.heic", "path": "media/IMG_0001.HEIC" },
                { "type": "video", "originalFilename": "IMG_0001.MOV", "uti": "com.apple.quicktime-movie", "path": "media/IMG_0001.MOV" }
            ]
        },
        {
            "id": "MISSING-2",
            "captureDate": "2024-06-16T12:00:00Z",
            "mediaType": "image",
            "resources": [
                { "type": "photo", "originalFilename": "IMG_0002.JPG", "uti": "public.jpeg", "path": "media/IMG_0002.JPG" }
            ]
        },
        {
            "id": "OLD-3",
            "captureDate": "2019-03-01T12:00:00Z",
            "mediaType": "image",
            "resources": [
                { "type": "photo", "originalFilename": "IMG_0003.JPG", "uti": "public.jpeg", "path": "media/IMG_0003.JPG" }
            ]
        }
    ]
}"#;

struct Fixture {
    _temp: TempDir,
    manifest: PathBuf,
    export_root: PathBuf,
}

fn fixture() -> Fixture {
    let temp = TempDir::new().unwrap();
    let media = temp.path().join("library").join("media");
    std::fs::create_dir_all(&media).unwrap();
    std::fs::write(media.join("IMG_0001.HEIC"), b"heic-bytes").unwrap();
    std::fs::write(media.join("IMG_0001.MOV"), b"mov-bytes").unwrap();
    std::fs::write(media.join("IMG_0003.JPG"), b"jpg-bytes").unwrap();

    let manifest = temp.path().join("library").join("library.json");
    std::fs::write(&manifest, MANIFEST).unwrap();

    let export_root = temp.path().join("out");
    Fixture {
        _temp: temp,
        manifest,
        export_root,
    }
}

fn config(fixture: &Fixture, incremental: bool) -> ExporterConfig {
    let mut config = ExporterConfig::default();
    config.library.manifest = fixture.manifest.to_string_lossy().into_owned();
    config.export.directory = Some(fixture.export_root.to_string_lossy().into_owned());
    config.export.start_year = Some(2024);
    config.export.end_year = Some(2024);
    config.export.metadata = true;
    config.export.incremental = incremental;
    config
}

fn files_in(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn test_end_to_end_export() {
    let fixture = fixture();
    let (_tx, rx) = watch::channel(false);

    let coordinator = ExportCoordinator::from_config(&config(&fixture, false), rx)
        .await
        .unwrap();
    let summary = coordinator.execute_export().await.unwrap();

    assert_eq!(summary.total_assets, 2);
    assert_eq!(summary.exported_assets, 1);
    assert_eq!(summary.failed_assets, 1);
    assert_eq!(summary.resources_written, 2);
    assert_eq!(summary.sidecars_written, 1);
    assert!(!summary.interrupted);
    assert_eq!(summary.errors[0].asset_id, "MISSING-2");
    assert_eq!(summary.errors[0].index, "2/2");
    assert_eq!(
        summary.completion_message(),
        format!(
            "Export complete: 1 of 2 assets exported to {}",
            fixture.export_root.display()
        )
    );

    // Only the 2024 folder exists; the 2019 asset was outside the range
    assert_eq!(files_in(&fixture.export_root), vec!["2024", "export_errors.log"]);

    let june = fixture.export_root.join("2024").join("06");
    let names = files_in(&june);
    assert_eq!(names.len(), 3);
    let stem = names[0].split('.').next().unwrap().to_string();
    assert_eq!(stem.len(), 14);
    assert!(names.contains(&format!("{stem}.heic")));
    assert!(names.contains(&format!("{stem}.json")));
    assert!(names.contains(&format!("{stem}.mov")));
    assert_eq!(std::fs::read(june.join(format!("{stem}.heic"))).unwrap(), b"heic-bytes");

    let sidecar: Value =
        serde_json::from_slice(&std::fs::read(june.join(format!("{stem}.json"))).unwrap()).unwrap();
    assert_eq!(sidecar["localIdentifier"], "LIVE-1");
    assert_eq!(sidecar["isLivePhoto"], true);
    assert_eq!(sidecar["exportedFiles"].as_array().unwrap().len(), 2);

    let ledger = std::fs::read_to_string(summary.ledger_path.unwrap()).unwrap();
    assert!(ledger.contains("asset=MISSING-2"));
    assert!(ledger.contains("kind=notFound code=3"));
    assert!(ledger.contains("asset.failed.details asset=MISSING-2 index=2/2"));
}

#[tokio::test]
async fn test_incremental_rerun_keeps_existing_files() {
    let fixture = fixture();

    let (_tx, rx) = watch::channel(false);
    ExportCoordinator::from_config(&config(&fixture, false), rx)
        .await
        .unwrap()
        .execute_export()
        .await
        .unwrap();

    let june = fixture.export_root.join("2024").join("06");
    let before = files_in(&june);

    let (_tx, rx) = watch::channel(false);
    let summary = ExportCoordinator::from_config(&config(&fixture, true), rx)
        .await
        .unwrap()
        .execute_export()
        .await
        .unwrap();

    assert_eq!(summary.resources_written, 0);
    assert_eq!(summary.resources_already_present, 2);
    assert_eq!(summary.exported_assets, 1);
    assert_eq!(files_in(&june), before);
}

#[tokio::test]
async fn test_shutdown_before_run_exports_nothing() {
    let fixture = fixture();
    let (tx, rx) = watch::channel(false);
    tx.send(true).unwrap();

    let summary = ExportCoordinator::from_config(&config(&fixture, false), rx)
        .await
        .unwrap()
        .execute_export()
        .await
        .unwrap();

    assert!(summary.interrupted);
    assert_eq!(summary.skipped_assets, 2);
    assert_eq!(summary.exported_assets, 0);
    assert!(!summary.is_successful());
    assert!(!fixture.export_root.join("2024").exists());
}

#[tokio::test]
async fn test_missing_manifest_is_a_library_error() {
    let temp = TempDir::new().unwrap();
    let mut config = ExporterConfig::default();
    config.library.manifest = temp
        .path()
        .join("absent.json")
        .to_string_lossy()
        .into_owned();
    config.export.directory = Some(temp.path().join("out").to_string_lossy().into_owned());

    let (_tx, rx) = watch::channel(false);
    let result = ExportCoordinator::from_config(&config, rx).await;
    assert!(matches!(
        result,
        Err(photos_export::domain::ExporterError::Library(_))
    ));
}
