//! Process-wide catalog settings

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Currency used when none is configured
pub const DEFAULT_CURRENCY: &str = "INR";

/// Archive page size used when none is configured
pub const DEFAULT_BOOKS_PER_PAGE: u32 = 5;

/// Catalog settings, passed by value into whatever needs them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Currency code appended to prices
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Books shown per archive page
    #[serde(default = "default_books_per_page")]
    pub books_per_page: u32,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

fn default_books_per_page() -> u32 {
    DEFAULT_BOOKS_PER_PAGE
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            books_per_page: default_books_per_page(),
        }
    }
}

impl Settings {
    /// Set the currency code
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Set the archive page size
    pub fn with_books_per_page(mut self, n: u32) -> Self {
        self.books_per_page = n;
        self
    }

    /// Currency code, falling back to the default when blank
    pub fn currency_code(&self) -> &str {
        let code = self.currency.trim();
        if code.is_empty() {
            DEFAULT_CURRENCY
        } else {
            code
        }
    }

    /// Page size, treating 0 as unset
    pub fn page_size(&self) -> u32 {
        if self.books_per_page == 0 {
            DEFAULT_BOOKS_PER_PAGE
        } else {
            self.books_per_page
        }
    }

    /// Load settings from a JSON file; a missing file yields defaults
    pub async fn load(path: &Path) -> Result<Self> {
        match tokio::fs::read_to_string(path).await {
            Ok(data) => Ok(serde_json::from_str(&data)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Save settings atomically (temp file, then rename)
    pub async fn save(&self, path: &Path) -> Result<()> {
        let data = serde_json::to_string_pretty(self)?;
        let temp_path = path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, &data).await?;
        tokio::fs::rename(&temp_path, path).await?;
        Ok(())
    }

    /// Apply `BOOKCASE_CURRENCY` and `BOOKCASE_BOOKS_PER_PAGE`
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(
            std::env::var("BOOKCASE_CURRENCY").ok(),
            std::env::var("BOOKCASE_BOOKS_PER_PAGE").ok(),
        )
    }

    fn with_overrides(
        mut self,
        currency: Option<String>,
        books_per_page: Option<String>,
    ) -> Result<Self> {
        if let Some(currency) = currency.filter(|c| !c.trim().is_empty()) {
            self.currency = currency.trim().to_string();
        }
        if let Some(raw) = books_per_page {
            self.books_per_page = raw.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "BOOKCASE_BOOKS_PER_PAGE".to_string(),
                value: raw.clone(),
            })?;
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BookcaseError;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.currency_code(), "INR");
        assert_eq!(settings.page_size(), 5);
    }

    #[test]
    fn test_blank_values_fall_back() {
        let settings = Settings::default()
            .with_currency("  ")
            .with_books_per_page(0);
        assert_eq!(settings.currency_code(), "INR");
        assert_eq!(settings.page_size(), 5);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"currency":"USD"}"#).unwrap();
        assert_eq!(settings.currency_code(), "USD");
        assert_eq!(settings.books_per_page, 5);
    }

    #[test]
    fn test_overrides() {
        let settings = Settings::default()
            .with_overrides(Some("EUR".into()), Some("12".into()))
            .unwrap();
        assert_eq!(settings.currency, "EUR");
        assert_eq!(settings.books_per_page, 12);

        let err = Settings::default()
            .with_overrides(None, Some("many".into()))
            .unwrap_err();
        assert!(matches!(err, BookcaseError::Config(_)));
    }

    #[tokio::test]
    async fn test_load_missing_and_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        assert_eq!(Settings::load(&path).await.unwrap(), Settings::default());

        let settings = Settings::default().with_currency("GBP").with_books_per_page(10);
        settings.save(&path).await.unwrap();
        assert_eq!(Settings::load(&path).await.unwrap(), settings);
    }
}
