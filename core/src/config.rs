//! Client configuration.

use crate::error::ApiError;

pub const DEFAULT_BASE_URL: &str = "https://webexapis.com/v1";

/// Connection settings shared by every resource wrapper.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub access_token: String,
    /// Organization applied to admin calls that don't name one explicitly.
    pub org_id: Option<String>,
    /// Default `max` for list calls.
    pub page_size: Option<u32>,
}

impl ClientConfig {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            ..Self::default()
        }
    }

    /// A trailing `/` is dropped when the session is built.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    pub fn with_org_id(mut self, org_id: impl Into<String>) -> Self {
        self.org_id = Some(org_id.into());
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Load configuration from `WEBEX_ACCESS_TOKEN`, `WEBEX_BASE_URL`,
    /// `WEBEX_ORG_ID` and `WEBEX_PAGE_SIZE`.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ApiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let access_token = lookup("WEBEX_ACCESS_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ApiError::Config("WEBEX_ACCESS_TOKEN is not set".to_string()))?;
        let mut config = ClientConfig::new(access_token.trim());
        if let Some(base_url) = lookup("WEBEX_BASE_URL") {
            url::Url::parse(&base_url)
                .map_err(|e| ApiError::InvalidUrl(format!("WEBEX_BASE_URL: {e}")))?;
            config = config.with_base_url(&base_url);
        }
        if let Some(org_id) = lookup("WEBEX_ORG_ID").filter(|o| !o.is_empty()) {
            config = config.with_org_id(org_id);
        }
        if let Some(page_size) = lookup("WEBEX_PAGE_SIZE") {
            let page_size = page_size
                .parse::<u32>()
                .map_err(|e| ApiError::Config(format!("WEBEX_PAGE_SIZE: {e}")))?;
            config = config.with_page_size(page_size);
        }
        Ok(config)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            access_token: String::new(),
            org_id: None,
            page_size: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn missing_token_is_an_error() {
        let err = ClientConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn defaults_to_public_base_url() {
        let config = ClientConfig::from_lookup(lookup(&[("WEBEX_ACCESS_TOKEN", "tok")])).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.access_token, "tok");
        assert!(config.org_id.is_none());
        assert!(config.page_size.is_none());
    }

    #[test]
    fn reads_all_variables() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("WEBEX_ACCESS_TOKEN", "tok"),
            ("WEBEX_BASE_URL", "http://127.0.0.1:3000/"),
            ("WEBEX_ORG_ID", "org-1"),
            ("WEBEX_PAGE_SIZE", "50"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:3000/");
        assert_eq!(config.org_id.as_deref(), Some("org-1"));
        assert_eq!(config.page_size, Some(50));
    }

    #[test]
    fn bad_base_url_is_invalid_url() {
        let err = ClientConfig::from_lookup(lookup(&[
            ("WEBEX_ACCESS_TOKEN", "tok"),
            ("WEBEX_BASE_URL", "not a url"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
    }

    #[test]
    fn bad_page_size_is_an_error() {
        let err = ClientConfig::from_lookup(lookup(&[
            ("WEBEX_ACCESS_TOKEN", "tok"),
            ("WEBEX_PAGE_SIZE", "lots"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }
}
