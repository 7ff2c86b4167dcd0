//! Data models for ModSync.
//!
//! - [`ModRecord`]: a catalog entry with its embedded dependencies and downloads
//! - [`Selection`]: the ordered, id-keyed set of mods chosen for installation
//! - [`Settings`]: process-wide settings loaded from `ModSync Config.yaml`
//!
//! Catalog records are immutable once fetched. A [`Selection`] borrows them,
//! so one dependency reachable through several paths is still one record.

pub mod config;
pub mod mod_record;
pub mod selection;

pub use config::{DEFAULT_CATALOG_URL, Settings};
pub use mod_record::{Author, Download, ModRecord};
pub use selection::Selection;
