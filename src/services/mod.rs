//! Services module - the mod selection and installation logic.
//!
//! The services have no knowledge of prompting or terminal output, which
//! keeps them testable on their own. I/O with the outside world sits behind
//! small traits ([`ModCatalog`], [`Downloader`], [`Archiver`]) so tests can
//! substitute mocks.
//!
//! # Components
//!
//! - [`catalog`]: queries the BeatMods index for mods of a game version
//! - [`legacy`]: reads the mods of an old install and the game version file
//! - [`matcher`]: fuzzy name matching used for pre-selection
//! - [`resolver`]: expands a selection with its transitive dependencies and
//!   applies exclusion rules
//! - [`acquisition`]: downloads and extracts mods strictly one after another
//!
//! # Data Flow
//!
//! ```text
//! legacy ──► matcher ──► (user picks) ──► resolver ──► acquisition
//!               ▲                            ▲
//!               └────────── catalog ─────────┘
//! ```
//!
//! # Archiver Integration
//!
//! Extraction is delegated to 7-Zip (`7z x <archive> -o<install> -y`).
//! Only one archiver process runs at a time because every mod is extracted
//! into the same install directory.

pub mod acquisition;
pub mod catalog;
pub mod legacy;
pub mod matcher;
pub mod resolver;

pub use acquisition::{
    AcquisitionError, AcquisitionEvent, AcquisitionPipeline, AcquisitionReport, Archiver,
    Downloader, HttpDownloader, InstallStatus, ModOutcome, SevenZipArchiver,
};
pub use catalog::{BeatModsClient, CatalogError, ModCatalog};
pub use legacy::{LegacyMods, read_game_version, scan_legacy_mods};
pub use matcher::is_legacy_match;
pub use resolver::{Resolution, resolve};
