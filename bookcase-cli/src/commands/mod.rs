//! CLI command implementations

mod archive;
mod category;
mod find;
mod set_meta;

pub use archive::archive;
pub use category::{category, top_categories};
pub use find::find;
pub use set_meta::set_meta;

use anyhow::{Context as _, Result};
use bookcase_core::{Engine, MemoryStore, Settings};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Everything a command needs: the loaded catalog and the engine over it
pub struct Context {
    pub store: Arc<MemoryStore>,
    pub engine: Engine,
    pub library_path: PathBuf,
}

impl Context {
    /// Load the library and settings files
    pub async fn open(library: &Path, settings: Option<&Path>) -> Result<Self> {
        let settings = match settings {
            Some(path) => Settings::load(path)
                .await
                .with_context(|| format!("Failed to read settings: {}", path.display()))?,
            None => Settings::default(),
        }
        .with_env_overrides()
        .context("Invalid settings override")?;

        let store = MemoryStore::load(library)
            .await
            .with_context(|| format!("Failed to read library: {}", library.display()))?;
        let store = Arc::new(store);
        tracing::debug!("Loaded library from {}", library.display());

        Ok(Self {
            engine: Engine::over(store.clone(), settings),
            store,
            library_path: library.to_path_buf(),
        })
    }

    pub fn settings(&self) -> &Settings {
        self.engine.settings()
    }
}
