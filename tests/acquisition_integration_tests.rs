//! Integration tests for the acquisition pipeline
//!
//! These tests verify:
//! - Downloads are skipped when the archive is already cached
//! - Mods are processed strictly one after another
//! - Archive retention follows the keep setting
//! - Per-mod failures do not stop the run

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use modsync::ModRecord;
use modsync::services::{
    AcquisitionError, AcquisitionEvent, AcquisitionPipeline, Archiver, Downloader, InstallStatus,
};
use std::fs;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Shared log of calls made to the fakes, in order.
type CallLog = Arc<Mutex<Vec<String>>>;

struct FakeDownloader {
    calls: CallLog,
    failing: Vec<&'static str>,
}

#[async_trait]
impl Downloader for FakeDownloader {
    async fn download(&self, url: &str, destination: &Utf8Path) -> Result<(), AcquisitionError> {
        self.calls.lock().unwrap().push(format!("download {}", url));
        if self.failing.iter().any(|f| url.contains(f)) {
            return Err(AcquisitionError::Status(404));
        }
        fs::write(destination, url.as_bytes())?;
        Ok(())
    }
}

struct FakeArchiver {
    calls: CallLog,
}

#[async_trait]
impl Archiver for FakeArchiver {
    async fn extract(&self, archive: &Utf8Path, destination: &Utf8Path) -> Result<(), AcquisitionError> {
        let name = archive.file_name().unwrap_or_default();
        self.calls.lock().unwrap().push(format!("extract {}", name));
        fs::copy(archive, destination.join(name))?;
        Ok(())
    }
}

struct Dirs {
    _cache: TempDir,
    _install: TempDir,
    cache: Utf8PathBuf,
    install: Utf8PathBuf,
}

fn dirs() -> Dirs {
    let cache_dir = TempDir::new().unwrap();
    let install_dir = TempDir::new().unwrap();
    Dirs {
        cache: Utf8PathBuf::try_from(cache_dir.path().join("zipped-mods")).unwrap(),
        install: Utf8PathBuf::try_from(install_dir.path().to_path_buf()).unwrap(),
        _cache: cache_dir,
        _install: install_dir,
    }
}

fn pipeline(
    dirs: &Dirs,
    calls: &CallLog,
    failing: Vec<&'static str>,
    keep: bool,
) -> AcquisitionPipeline<FakeDownloader, FakeArchiver> {
    AcquisitionPipeline::new(
        FakeDownloader {
            calls: calls.clone(),
            failing,
        },
        FakeArchiver {
            calls: calls.clone(),
        },
        dirs.cache.clone(),
        keep,
    )
}

fn record(id: &str, name: &str) -> ModRecord {
    ModRecord::new(id, name).with_download(format!("/uploads/{}/universal/{}.zip", id, name))
}

#[tokio::test]
async fn test_mods_are_processed_sequentially() {
    let dirs = dirs();
    let calls = CallLog::default();
    let pipeline = pipeline(&dirs, &calls, vec![], false);

    let a = record("1", "SongCore");
    let b = record("2", "Chroma");
    let report = pipeline.run(&[&a, &b], &dirs.install, |_| {}).await;

    assert_eq!(report.installed(), 2);
    assert_eq!(
        *calls.lock().unwrap(),
        vec![
            "download /uploads/1/universal/SongCore.zip",
            "extract SongCore.zip",
            "download /uploads/2/universal/Chroma.zip",
            "extract Chroma.zip",
        ]
    );
    // Cache directory created on demand, archives removed afterwards
    assert!(dirs.cache.exists());
    assert!(!dirs.cache.join("SongCore.zip").exists());
    assert!(dirs.install.join("SongCore.zip").exists());
}

#[tokio::test]
async fn test_cached_archive_is_never_refetched() {
    let dirs = dirs();
    fs::create_dir_all(&dirs.cache).unwrap();
    fs::write(dirs.cache.join("SongCore.zip"), b"cached").unwrap();

    let calls = CallLog::default();
    let pipeline = pipeline(&dirs, &calls, vec![], true);

    let song_core = record("1", "SongCore");
    let mut events = Vec::new();
    let report = pipeline
        .run(&[&song_core], &dirs.install, |e| events.push(e.clone()))
        .await;

    assert_eq!(report.installed(), 1);
    assert_eq!(*calls.lock().unwrap(), vec!["extract SongCore.zip"]);
    assert_eq!(fs::read(dirs.cache.join("SongCore.zip")).unwrap(), b"cached");
    assert!(events.iter().any(|e| matches!(e, AcquisitionEvent::UsingCachedArchive { .. })));
}

#[tokio::test]
async fn test_keep_archives_retains_downloads() {
    let dirs = dirs();
    let calls = CallLog::default();
    let pipeline = pipeline(&dirs, &calls, vec![], true);

    let song_core = record("1", "SongCore");
    pipeline.run(&[&song_core], &dirs.install, |_| {}).await;

    assert!(dirs.cache.join("SongCore.zip").exists());
}

#[tokio::test]
async fn test_failed_download_skips_only_that_mod() {
    let dirs = dirs();
    let calls = CallLog::default();
    let pipeline = pipeline(&dirs, &calls, vec!["Broken"], false);

    let broken = record("1", "Broken");
    let fine = record("2", "Fine");
    let mut events = Vec::new();
    let report = pipeline
        .run(&[&broken, &fine], &dirs.install, |e| events.push(e.message()))
        .await;

    assert!(matches!(report.outcomes[0].status, InstallStatus::DownloadFailed(_)));
    assert_eq!(report.outcomes[1].status, InstallStatus::Installed);
    assert_eq!(
        *calls.lock().unwrap(),
        vec![
            "download /uploads/1/universal/Broken.zip",
            "download /uploads/2/universal/Fine.zip",
            "extract Fine.zip",
        ]
    );
    assert!(events.iter().any(|m| m.starts_with("Failed to download mod Broken!")));
    assert_eq!(report.summary(), "Installed 1 of 2 mods (1 failed to download)");
}
