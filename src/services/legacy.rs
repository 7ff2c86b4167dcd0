//! Inspection of Beat Saber installs: mods of an old install and the game version.
//!
//! # Examples
//!
//! ```ignore
//! use modsync::services::legacy::{read_game_version, scan_legacy_mods};
//! use camino::Utf8Path;
//!
//! // Names of the plugins an older install had
//! let old = scan_legacy_mods(Some(Utf8Path::new("D:/Beat Saber 1.29")))?;
//!
//! // "1.34.2_6087340" -> "1.34.2"
//! let version = read_game_version(Utf8Path::new("D:/Beat Saber"));
//! ```

use anyhow::{Context, Result};
use camino::Utf8Path;
use std::fs;

/// Subdirectory of an install that holds plugin assemblies
pub const PLUGINS_DIR: &str = "Plugins";

/// Extension of plugin assemblies
pub const PLUGIN_EXTENSION: &str = "dll";

/// File written by the game that carries its version
pub const VERSION_FILE: &str = "BeatSaberVersion.txt";

/// Mod names found in an old install, extension stripped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegacyMods {
    names: Vec<String>,
}

impl LegacyMods {
    pub fn new(mut names: Vec<String>) -> Self {
        names.sort();
        names.dedup();
        Self { names }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Whether a catalog mod looks like one of these, see [`super::matcher`].
    pub fn matches(&self, candidate: &str) -> bool {
        super::matcher::is_legacy_match(&self.names, candidate)
    }
}

/// Collect the mods installed in `install_path`.
///
/// Returns `Ok(None)` when no path was given or when the install has no
/// `Plugins` directory, so callers can skip pre-selection entirely. An
/// existing but empty directory yields an empty set instead.
///
/// # Errors
///
/// Returns an error if the `Plugins` directory exists but cannot be listed.
pub fn scan_legacy_mods(install_path: Option<&Utf8Path>) -> Result<Option<LegacyMods>> {
    let Some(install_path) = install_path else {
        return Ok(None);
    };

    let plugins_dir = install_path.join(PLUGINS_DIR);
    if !plugins_dir.is_dir() {
        tracing::info!("No plugins directory at {}", plugins_dir);
        return Ok(None);
    }

    let entries = plugins_dir
        .read_dir_utf8()
        .with_context(|| format!("Failed to read plugins directory: {}", plugins_dir))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read entry in {}", plugins_dir))?;
        let path = entry.path();

        let is_plugin = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(PLUGIN_EXTENSION));
        if !is_plugin {
            continue;
        }

        if let Some(stem) = path.file_stem() {
            names.push(stem.to_string());
        }
    }

    tracing::info!("Found {} mods in {}", names.len(), plugins_dir);
    Ok(Some(LegacyMods::new(names)))
}

/// Read the game version recorded in an install.
///
/// The file holds something like `1.34.2_6087340`; only the part before the
/// first underscore is returned. Missing or unreadable files yield `None`.
pub fn read_game_version(install_path: &Utf8Path) -> Option<String> {
    let version_file = install_path.join(VERSION_FILE);
    let content = match fs::read_to_string(&version_file) {
        Ok(content) => content,
        Err(e) => {
            tracing::debug!("Could not read {}: {}", version_file, e);
            return None;
        }
    };

    let version = content.split('_').next()?.trim();
    if version.is_empty() {
        None
    } else {
        Some(version.to_string())
    }
}

/// Describe how the new mod count compares to the old install.
///
/// Returns an empty string when the counts are equal.
pub fn describe_install_delta(old_count: usize, new_count: usize) -> String {
    if old_count > new_count {
        format!(
            ", {} mod(s) less than your old install had",
            old_count - new_count
        )
    } else if new_count > old_count {
        format!(
            ", {} mod(s) more than your old install had",
            new_count - old_count
        )
    } else {
        String::new()
    }
}
