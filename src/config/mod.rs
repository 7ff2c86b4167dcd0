use crate::models::Settings;
use crate::prompt::AnswerStore;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use config::{Config, Environment, File, FileFormat};
use std::fs;

/// Settings file name inside the configuration directory
pub const SETTINGS_FILE: &str = "ModSync Config.yaml";

/// Saved prompt answers inside the configuration directory
pub const ANSWERS_FILE: &str = "ModSync Answers.json";

/// Prefix of environment variables overriding settings, e.g. `MODSYNC_KEEP_ZIPPED_MODS`
pub const ENV_PREFIX: &str = "MODSYNC";

/// Configuration manager for loading and saving ModSync settings.
///
/// Manages two files in the configuration directory:
/// - Settings (`ModSync Config.yaml`): catalog, cache and archiver options
/// - Answers (`ModSync Answers.json`): prompt answers remembered across runs
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: Utf8PathBuf,
    settings_path: Utf8PathBuf,
    answers_path: Utf8PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the specified configuration directory.
    ///
    /// # Arguments
    /// * `config_dir` - Directory containing configuration files (e.g., "ModSync Data")
    pub fn new<P: AsRef<Utf8Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref().to_path_buf();

        // Create config directory if it doesn't exist
        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {}", config_dir))?;
        }

        Ok(Self {
            settings_path: config_dir.join(SETTINGS_FILE),
            answers_path: config_dir.join(ANSWERS_FILE),
            config_dir,
        })
    }

    /// Load settings: defaults, then the YAML file, then `MODSYNC_*` variables.
    pub fn load_settings(&self) -> Result<Settings> {
        self.load_settings_with(Environment::with_prefix(ENV_PREFIX))
    }

    /// Load settings with an explicit environment source.
    pub fn load_settings_with(&self, environment: Environment) -> Result<Settings> {
        if !self.settings_path.exists() {
            tracing::warn!(
                "Settings file not found at {}, using defaults",
                self.settings_path
            );
        }

        let settings: Settings = Config::builder()
            .add_source(
                File::new(self.settings_path.as_str(), FileFormat::Yaml).required(false),
            )
            .add_source(
                environment
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("excluded_mods"),
            )
            .build()
            .with_context(|| format!("Failed to read settings: {}", self.settings_path))?
            .try_deserialize()
            .with_context(|| format!("Failed to parse settings: {}", self.settings_path))?;

        tracing::info!("Loaded settings from {}", self.settings_path);
        Ok(settings)
    }

    /// Save the settings file.
    pub fn save_settings(&self, settings: &Settings) -> Result<()> {
        let yaml_string =
            serde_yaml_ng::to_string(settings).context("Failed to serialize settings to YAML")?;

        fs::write(&self.settings_path, yaml_string)
            .with_context(|| format!("Failed to write settings: {}", self.settings_path))?;

        tracing::info!("Saved settings to {}", self.settings_path);
        Ok(())
    }

    /// Write default settings if no settings file exists yet.
    pub fn ensure_settings_file(&self) -> Result<()> {
        if self.settings_path.exists() {
            return Ok(());
        }
        self.save_settings(&Settings::default())
    }

    /// The answer memo, or `None` when remembering answers is disabled.
    pub fn answer_store(&self, settings: &Settings) -> Result<Option<AnswerStore>> {
        if !settings.remember_answers {
            tracing::debug!("Answer memo disabled");
            return Ok(None);
        }
        AnswerStore::load(&self.answers_path).map(Some)
    }

    /// Get the configuration directory path.
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }

    pub fn settings_path(&self) -> &Utf8Path {
        &self.settings_path
    }
}
