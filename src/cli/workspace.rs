//! Shared setup for every command: data file, config, clipboard, rng.

use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::Cli;
use crate::activity::ActivityLog;
use crate::clipboard::{Clipboard, SystemClipboard, UnavailableClipboard};
use crate::config::{self, ConfigDir, FeatureGate};
use crate::coordinator::Coordinator;
use crate::section::catalog;
use crate::source::{self, SourceError};
use crate::store::ColumnStore;
use crate::ui;

pub struct Workspace {
    pub config: ConfigDir,
    pub source: PathBuf,
    pub encoding: String,
    pub seed: Option<u64>,
}

impl Workspace {
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        let config = cli
            .config_dir
            .clone()
            .map_or_else(ConfigDir::locate, ConfigDir::new);

        Self {
            config,
            source: cli.source.clone(),
            encoding: cli.encoding.clone(),
            seed: cli.seed,
        }
    }

    pub fn try_load_store(&self) -> Result<ColumnStore, SourceError> {
        source::load_with_encoding(&self.source, &self.encoding)
    }

    /// Load the data file. On failure the error is shown and every section
    /// stays empty.
    #[must_use]
    pub fn load_store(&self) -> ColumnStore {
        match self.try_load_store() {
            Ok(store) => store,
            Err(e) => {
                tracing::warn!("{e}");
                ui::status::print_error(
                    &e.to_string(),
                    Some("Sections stay empty until the data file can be read."),
                );
                ColumnStore::default()
            }
        }
    }

    #[must_use]
    pub fn rng(&self) -> StdRng {
        self.seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64)
    }

    #[must_use]
    pub fn activity_log(&self) -> ActivityLog {
        ActivityLog::new().with_mirror(config::activity_log_path())
    }

    /// Build the coordinator for the enabled sections.
    #[must_use]
    pub fn coordinator(&self, gate: &FeatureGate) -> Coordinator {
        Coordinator::new(
            Arc::new(self.load_store()),
            catalog(),
            gate,
            clipboard(),
            self.activity_log(),
            self.rng(),
        )
    }
}

/// The system clipboard. Without a tool every copy fails and is logged so.
#[must_use]
pub fn clipboard() -> Rc<dyn Clipboard> {
    match SystemClipboard::detect() {
        Ok(clipboard) => Rc::new(clipboard),
        Err(e) => {
            tracing::warn!("{e}; copies will fail");
            Rc::new(UnavailableClipboard::new(e))
        }
    }
}
