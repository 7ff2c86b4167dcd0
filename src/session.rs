//! The interactive install session.
//!
//! Asks for the old install, the new install and its version, fetches the
//! catalog, lets the user pick mods (pre-selecting look-alikes of the old
//! install), resolves dependencies, confirms, and hands the result to the
//! [`AcquisitionPipeline`]. All domain decisions live in the services; this
//! module only sequences them and turns outcomes into messages.

use camino::Utf8PathBuf;
use std::io;
use thiserror::Error;

use crate::models::Settings;
use crate::prompt::{Choice, Prompter, Prompts, TextPrompt};
use crate::services::acquisition::{AcquisitionPipeline, AcquisitionReport, Archiver, Downloader};
use crate::services::catalog::{CatalogError, ModCatalog};
use crate::services::legacy::{self, LegacyMods};
use crate::services::resolver;

/// Answer memo key for the old install path
pub const OLD_INSTALL_KEY: &str = "oldInstallPath";

/// Answer memo key for the new install path
pub const INSTALL_PATH_KEY: &str = "installPath";

/// Errors that end a session
#[derive(Error, Debug)]
pub enum SessionError {
    /// The user declined or cancelled a required step. Not a failure.
    #[error("Cancelled at: {0}")]
    UserAbort(&'static str),

    #[error("Failed to fetch mods: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Prompt failed: {0}")]
    Prompt(#[from] io::Error),
}

/// How a session that was not aborted ended
#[derive(Debug)]
pub enum SessionOutcome {
    /// The catalog had nothing for the requested version.
    NoModsForVersion(String),

    Completed(AcquisitionReport),
}

pub struct Session<P, C, D, A> {
    settings: Settings,
    prompts: Prompts<P>,
    catalog: C,
    pipeline: AcquisitionPipeline<D, A>,
}

impl<P, C, D, A> Session<P, C, D, A>
where
    P: Prompter,
    C: ModCatalog,
    D: Downloader,
    A: Archiver,
{
    pub fn new(
        settings: Settings,
        prompts: Prompts<P>,
        catalog: C,
        pipeline: AcquisitionPipeline<D, A>,
    ) -> Self {
        Self {
            settings,
            prompts,
            catalog,
            pipeline,
        }
    }

    pub fn prompts(&self) -> &Prompts<P> {
        &self.prompts
    }

    pub async fn run(&mut self) -> Result<SessionOutcome, SessionError> {
        let legacy_mods = self.ask_legacy_mods()?;

        let install_path = self
            .prompts
            .text(
                TextPrompt::new("Enter the path to your new Beat Saber directory")
                    .key(INSTALL_PATH_KEY)
                    .required("You must enter the path to your new Beat Saber directory!"),
            )?
            .ok_or(SessionError::UserAbort("install path"))?;
        let install_path = Utf8PathBuf::from(install_path);

        let version = self
            .prompts
            .text(
                TextPrompt::new("Enter the version of your current Beat Saber install")
                    .required("You must enter the version of your current Beat Saber install!")
                    .initial(legacy::read_game_version(&install_path)),
            )?
            .ok_or(SessionError::UserAbort("game version"))?;

        self.prompts
            .say(&format!("Searching for mods using version {}...", version));
        let catalog = self
            .catalog
            .fetch_mods(&version, &self.settings.mod_status)
            .await?;
        if catalog.is_empty() {
            self.prompts
                .say(&format!("No mods were found for version {}!", version));
            return Ok(SessionOutcome::NoModsForVersion(version));
        }

        let choices: Vec<Choice> = catalog
            .iter()
            .map(|record| Choice {
                title: record.display_title(self.settings.include_mod_descriptions),
                selected: legacy_mods
                    .as_ref()
                    .is_some_and(|legacy| legacy.matches(&record.name)),
            })
            .collect();

        let picked = self
            .prompts
            .multiselect("Select mods to install", &choices)?
            .filter(|picked| !picked.is_empty())
            .ok_or(SessionError::UserAbort("mod selection"))?;

        let resolution = resolver::resolve(
            picked.iter().filter_map(|&index| catalog.get(index)),
            &self.settings.excluded_mods,
        );
        let mods = resolution.selection.to_vec();

        let confirmed = self.prompts.confirm(
            &format!(
                "Ready to install {} mods ({} additional dependencies)?",
                mods.len(),
                resolution.added_dependencies
            ),
            false,
        )?;
        if confirmed != Some(true) {
            return Err(SessionError::UserAbort("confirmation"));
        }

        let delta = legacy_mods
            .as_ref()
            .map(|legacy| legacy::describe_install_delta(legacy.len(), mods.len()))
            .unwrap_or_default();
        self.prompts
            .say(&format!("Downloading {} mods{}", mods.len(), delta));

        let prompts = &mut self.prompts;
        let report = self
            .pipeline
            .run(&mods, &install_path, |event| prompts.say(&event.message()))
            .await;

        self.prompts.say(&report.summary());
        Ok(SessionOutcome::Completed(report))
    }

    /// Ask for an old install and collect its mods.
    ///
    /// `None` means pre-selection is skipped altogether.
    fn ask_legacy_mods(&mut self) -> Result<Option<LegacyMods>, SessionError> {
        let Some(old_install) = self.prompts.text(
            TextPrompt::new("Sync mods from an old install (optional)").key(OLD_INSTALL_KEY),
        )?
        else {
            return Ok(None);
        };

        let old_install = Utf8PathBuf::from(old_install);
        match legacy::scan_legacy_mods(Some(&old_install)) {
            Ok(Some(mods)) => {
                self.prompts.say(&format!("Found {} mods!", mods.len()));
                Ok(Some(mods))
            }
            Ok(None) => {
                self.prompts.say("Found no mods!");
                Ok(None)
            }
            Err(e) => {
                tracing::error!("Failed to scan {}: {:#}", old_install, e);
                self.prompts.say(&format!("Could not read old mods: {:#}", e));
                Ok(None)
            }
        }
    }
}
