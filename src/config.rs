use crate::scraping::constants::*;
use anyhow::{Context, Result};
use url::Url;

/// Settings read from the environment (and `.env`, when present)
#[derive(Debug, Clone)]
pub struct Settings {
    pub base_url: Url,
    pub email: Option<String>,
    pub licence_number: Option<String>,
    pub licence_expiry: Option<String>,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let raw_base_url = non_empty(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = Url::parse(&raw_base_url)
            .with_context(|| format!("{BASE_URL_VAR} is not a valid URL: {raw_base_url}"))?;

        Ok(Settings {
            base_url,
            email: non_empty(EMAIL_VAR),
            licence_number: non_empty(LICENCE_NUMBER_VAR),
            licence_expiry: non_empty(LICENCE_EXPIRY_VAR),
        })
    }

    /// Drops the pre-filled login details so they get asked for instead
    pub fn forget_credentials(&mut self) {
        self.email = None;
        self.licence_number = None;
        self.licence_expiry = None;
    }
}
