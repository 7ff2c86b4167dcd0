use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::models::ModRecord;

/// Errors that can occur while installing a single mod
#[derive(Error, Debug)]
pub enum AcquisitionError {
    #[error("{0} has no downloads")]
    NoDownload(String),

    #[error("Download URL has no file name: {0}")]
    InvalidUrl(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Download responded with HTTP {0}")]
    Status(u16),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to start archiver: {0}")]
    Spawn(std::io::Error),

    #[error("Archiver exited with code {0:?}")]
    Extraction(Option<i32>),
}

/// Fetches an archive to a local path.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Downloader: Send + Sync {
    async fn download(&self, url: &str, destination: &Utf8Path) -> Result<(), AcquisitionError>;
}

/// Extracts an archive into a directory, overwriting existing files.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Archiver: Send + Sync {
    async fn extract(&self, archive: &Utf8Path, destination: &Utf8Path) -> Result<(), AcquisitionError>;
}

/// Downloads archives over HTTP from the catalog host.
#[derive(Debug, Clone)]
pub struct HttpDownloader {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDownloader {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Turn a catalog download path into an absolute URL.
    ///
    /// Catalog URLs are host-relative and may contain spaces.
    pub fn resolve_url(&self, url: &str) -> String {
        let url = url.replace(' ', "%20");
        if url.starts_with("http://") || url.starts_with("https://") {
            url
        } else if url.starts_with('/') {
            format!("{}{}", self.base_url, url)
        } else {
            format!("{}/{}", self.base_url, url)
        }
    }

    async fn write_response(
        mut response: reqwest::Response,
        destination: &Utf8Path,
    ) -> Result<u64, AcquisitionError> {
        let mut file = tokio::fs::File::create(destination).await?;
        let mut written = 0u64;

        while let Some(chunk) = response.chunk().await? {
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        Ok(written)
    }
}

#[async_trait]
impl Downloader for HttpDownloader {
    async fn download(&self, url: &str, destination: &Utf8Path) -> Result<(), AcquisitionError> {
        let url = self.resolve_url(url);
        tracing::debug!("Downloading {} to {}", url, destination);

        let response = self.client.get(&url).send().await?;
        if response.status() != reqwest::StatusCode::OK {
            return Err(AcquisitionError::Status(response.status().as_u16()));
        }

        if let Some(parent) = destination.parent() {
            if !parent.as_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        match Self::write_response(response, destination).await {
            Ok(bytes) => {
                tracing::debug!("Wrote {} bytes to {}", bytes, destination);
                Ok(())
            }
            Err(e) => {
                // A partial file would be mistaken for a cached archive next run
                if let Err(remove_err) = tokio::fs::remove_file(destination).await {
                    tracing::warn!("Failed to remove partial download {}: {}", destination, remove_err);
                }
                Err(e)
            }
        }
    }
}

/// Extracts archives with the 7-Zip command line tool.
#[derive(Debug, Clone)]
pub struct SevenZipArchiver {
    executable: String,
}

impl SevenZipArchiver {
    pub fn new(executable: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    /// Arguments for `7z x <archive> -o<destination> -y`.
    pub fn build_args(archive: &Utf8Path, destination: &Utf8Path) -> Vec<String> {
        vec![
            "x".to_string(),
            archive.to_string(),
            format!("-o{}", destination),
            "-y".to_string(),
        ]
    }
}

#[async_trait]
impl Archiver for SevenZipArchiver {
    async fn extract(&self, archive: &Utf8Path, destination: &Utf8Path) -> Result<(), AcquisitionError> {
        let args = Self::build_args(archive, destination);
        tracing::info!("Executing: {} {}", self.executable, args.join(" "));

        let start = Instant::now();
        let output = Command::new(&self.executable)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(AcquisitionError::Spawn)?;

        tracing::debug!(
            "Archiver completed in {:.2}s with status {}",
            start.elapsed().as_secs_f32(),
            output.status
        );

        if output.status.success() {
            Ok(())
        } else {
            tracing::warn!(
                "Archiver stderr: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
            Err(AcquisitionError::Extraction(output.status.code()))
        }
    }
}

/// Progress notifications emitted while installing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcquisitionEvent {
    Downloading { name: String },
    UsingCachedArchive { name: String, path: Utf8PathBuf },
    DownloadFailed { name: String, error: String },
    Extracting { name: String },
    ExtractionFailed { name: String, error: String },
    Installed { name: String },
}

impl AcquisitionEvent {
    /// Message shown to the user for this event.
    pub fn message(&self) -> String {
        match self {
            Self::Downloading { name } => format!("Downloading mod {}", name),
            Self::UsingCachedArchive { name, path } => {
                format!("Using cached archive for {} ({})", name, path)
            }
            Self::DownloadFailed { name, error } => {
                format!("Failed to download mod {}! ({})", name, error)
            }
            Self::Extracting { name } => format!("Extracting mod {}", name),
            Self::ExtractionFailed { name, error } => {
                format!("Failed to extract mod {}! ({})", name, error)
            }
            Self::Installed { name } => format!("Installed mod {}", name),
        }
    }
}

/// Final state of one mod after the pipeline ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallStatus {
    Installed,
    DownloadFailed(String),
    ExtractionFailed(String),
}

#[derive(Debug, Clone)]
pub struct ModOutcome {
    pub name: String,
    pub status: InstallStatus,
}

/// Summary of a pipeline run, one outcome per mod in install order.
#[derive(Debug, Clone, Default)]
pub struct AcquisitionReport {
    pub outcomes: Vec<ModOutcome>,
    pub duration: Duration,
}

impl AcquisitionReport {
    pub fn installed(&self) -> usize {
        self.count(|status| matches!(status, InstallStatus::Installed))
    }

    pub fn download_failures(&self) -> usize {
        self.count(|status| matches!(status, InstallStatus::DownloadFailed(_)))
    }

    pub fn extraction_failures(&self) -> usize {
        self.count(|status| matches!(status, InstallStatus::ExtractionFailed(_)))
    }

    pub fn summary(&self) -> String {
        let mut summary = format!("Installed {} of {} mods", self.installed(), self.outcomes.len());

        let mut failures = Vec::new();
        if self.download_failures() > 0 {
            failures.push(format!("{} failed to download", self.download_failures()));
        }
        if self.extraction_failures() > 0 {
            failures.push(format!("{} failed to extract", self.extraction_failures()));
        }
        if !failures.is_empty() {
            summary.push_str(&format!(" ({})", failures.join(", ")));
        }

        summary
    }

    fn count(&self, predicate: impl Fn(&InstallStatus) -> bool) -> usize {
        self.outcomes.iter().filter(|o| predicate(&o.status)).count()
    }
}

/// Local file name for a download URL: its last path segment.
///
/// Empty, `.` and `..` segments name no file and yield `None`.
pub fn archive_file_name(url: &str) -> Option<&str> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.rsplit('/')
        .next()
        .filter(|name| !name.is_empty() && *name != "." && *name != "..")
}

/// Downloads and extracts mods one at a time.
///
/// Each mod is fully processed (download, extraction, cleanup) before the
/// next one starts; the archiver must never run twice against the same
/// install directory. A failure only affects the mod it happened on.
pub struct AcquisitionPipeline<D, A> {
    downloader: D,
    archiver: A,
    cache_dir: Utf8PathBuf,
    keep_archives: bool,
}

impl<D: Downloader, A: Archiver> AcquisitionPipeline<D, A> {
    pub fn new(downloader: D, archiver: A, cache_dir: impl Into<Utf8PathBuf>, keep_archives: bool) -> Self {
        Self {
            downloader,
            archiver,
            cache_dir: cache_dir.into(),
            keep_archives,
        }
    }

    /// Where the archive for `record` is cached.
    pub fn archive_path(&self, record: &ModRecord) -> Result<Utf8PathBuf, AcquisitionError> {
        let download = record
            .primary_download()
            .ok_or_else(|| AcquisitionError::NoDownload(record.name.clone()))?;
        let file_name = archive_file_name(&download.url)
            .ok_or_else(|| AcquisitionError::InvalidUrl(download.url.clone()))?;
        Ok(self.cache_dir.join(file_name))
    }

    /// Install every mod in order, reporting progress through `on_event`.
    pub async fn run<F>(
        &self,
        mods: &[&ModRecord],
        install_dir: &Utf8Path,
        mut on_event: F,
    ) -> AcquisitionReport
    where
        F: FnMut(&AcquisitionEvent),
    {
        let start = Instant::now();
        let mut outcomes = Vec::with_capacity(mods.len());

        tracing::info!("Installing {} mods into {}", mods.len(), install_dir);

        for (index, record) in mods.iter().enumerate() {
            tracing::info!("Processing mod {}/{}: {}", index + 1, mods.len(), record.label());
            let status = self.install_one(record, install_dir, &mut on_event).await;
            outcomes.push(ModOutcome {
                name: record.name.clone(),
                status,
            });
        }

        let report = AcquisitionReport {
            outcomes,
            duration: start.elapsed(),
        };
        tracing::info!(
            "Installation finished in {:.2}s: {}",
            report.duration.as_secs_f32(),
            report.summary()
        );
        report
    }

    async fn install_one<F>(
        &self,
        record: &ModRecord,
        install_dir: &Utf8Path,
        on_event: &mut F,
    ) -> InstallStatus
    where
        F: FnMut(&AcquisitionEvent),
    {
        let name = record.name.clone();

        let archive = match self.fetch_archive(record, on_event).await {
            Ok(archive) => archive,
            Err(e) => {
                tracing::error!("Download of {} failed: {}", name, e);
                let error = e.to_string();
                on_event(&AcquisitionEvent::DownloadFailed {
                    name,
                    error: error.clone(),
                });
                return InstallStatus::DownloadFailed(error);
            }
        };

        on_event(&AcquisitionEvent::Extracting { name: name.clone() });
        let extracted = self.archiver.extract(&archive, install_dir).await;

        if !self.keep_archives {
            if let Err(e) = tokio::fs::remove_file(&archive).await {
                tracing::warn!("Failed to remove archive {}: {}", archive, e);
            } else {
                tracing::debug!("Removed archive {}", archive);
            }
        }

        match extracted {
            Ok(()) => {
                on_event(&AcquisitionEvent::Installed { name });
                InstallStatus::Installed
            }
            Err(e) => {
                tracing::error!("Extraction of {} failed: {}", name, e);
                let error = e.to_string();
                on_event(&AcquisitionEvent::ExtractionFailed {
                    name,
                    error: error.clone(),
                });
                InstallStatus::ExtractionFailed(error)
            }
        }
    }

    async fn fetch_archive<F>(
        &self,
        record: &ModRecord,
        on_event: &mut F,
    ) -> Result<Utf8PathBuf, AcquisitionError>
    where
        F: FnMut(&AcquisitionEvent),
    {
        on_event(&AcquisitionEvent::Downloading {
            name: record.name.clone(),
        });

        let archive = self.archive_path(record)?;
        if archive.exists() {
            tracing::info!("Archive already present, skipping download: {}", archive);
            on_event(&AcquisitionEvent::UsingCachedArchive {
                name: record.name.clone(),
                path: archive.clone(),
            });
            return Ok(archive);
        }

        if !self.cache_dir.exists() {
            tokio::fs::create_dir_all(&self.cache_dir).await?;
        }

        // archive_path() already checked that a download exists
        let url = record
            .primary_download()
            .map(|download| download.url.as_str())
            .unwrap_or_default();
        self.downloader.download(url, &archive).await?;
        Ok(archive)
    }
}
