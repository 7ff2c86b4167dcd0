use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// Default BeatMods host
pub const DEFAULT_CATALOG_URL: &str = "https://beatmods.com";

/// Settings from ModSync Config.yaml, overridable by `MODSYNC_*` variables.
///
/// Loaded once at startup and never mutated during a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Host serving the mod index and the archives.
    pub catalog_url: String,

    /// Approval status passed to the catalog query.
    pub mod_status: String,

    /// Show descriptions next to names in the selection prompt.
    pub include_mod_descriptions: bool,

    /// Mods removed from the resolved set by exact name, e.g. the BSIPA
    /// loader that the game installation already ships with.
    pub excluded_mods: Vec<String>,

    /// Directory downloaded archives are cached in.
    pub zipped_mods_path: Utf8PathBuf,

    /// Keep archives after extraction instead of deleting them.
    pub keep_zipped_mods: bool,

    /// Path to the 7-Zip executable.
    pub seven_zip_path: String,

    /// Pre-fill prompts with the answers of the previous run.
    pub remember_answers: bool,

    pub debug_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            mod_status: "approved".to_string(),
            include_mod_descriptions: false,
            excluded_mods: vec!["BSIPA".to_string()],
            zipped_mods_path: Utf8PathBuf::from("zipped-mods"),
            keep_zipped_mods: false,
            seven_zip_path: "7z".to_string(),
            remember_answers: true,
            debug_mode: false,
        }
    }
}
