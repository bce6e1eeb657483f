//! Application state

use anyhow::{Context, Result};
use bookcase_core::{Engine, MemoryStore, Settings};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Catalog contents (would be a database in production)
    pub store: Arc<MemoryStore>,

    /// Filter & presentation engine over `store`
    pub engine: Engine,

    /// Directory holding `library.json` and `settings.json`
    pub data_path: PathBuf,

    /// Held while writing the library; saves share one temp file
    save_lock: Arc<Mutex<()>>,
}

impl AppState {
    /// Create new application state
    pub async fn new() -> Result<Self> {
        let data_path =
            std::env::var("BOOKCASE_DATA_PATH").unwrap_or_else(|_| "./bookcase_data".to_string());
        let data_path = PathBuf::from(data_path);

        tokio::fs::create_dir_all(&data_path)
            .await
            .with_context(|| format!("Failed to create {}", data_path.display()))?;

        let settings = Settings::load(&data_path.join("settings.json"))
            .await
            .context("Failed to load settings")?
            .with_env_overrides()
            .context("Invalid settings override")?;

        let store = match MemoryStore::load(&data_path.join("library.json")).await {
            Ok(store) => store,
            Err(e) => {
                tracing::warn!("Failed to load library, starting fresh: {}", e);
                MemoryStore::new()
            }
        };

        Ok(Self::with_store(Arc::new(store), settings, data_path))
    }

    /// Build state around an existing store
    pub fn with_store(store: Arc<MemoryStore>, settings: Settings, data_path: PathBuf) -> Self {
        Self {
            engine: Engine::over(store.clone(), settings),
            store,
            data_path,
            save_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn settings(&self) -> &Settings {
        self.engine.settings()
    }

    /// Get path to library file
    pub fn library_path(&self) -> PathBuf {
        self.data_path.join("library.json")
    }

    /// Persist the library
    pub async fn save_library(&self) -> Result<()> {
        let _guard = self.save_lock.lock().await;
        self.store
            .save(&self.library_path())
            .await
            .context("Failed to save library")
    }
}
