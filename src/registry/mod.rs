//! @acp:module "Icon Registry"
//! @acp:summary "Fetches raw SVG for an icon identifier from an Iconify-compatible API"
//! @acp:domain registry
//! @acp:layer service
//!
//! Fetches are never retried. A failure only affects the icon being fetched.

use std::collections::HashMap;
use std::time::Duration;

use tracing::debug;

use crate::error::{IconError, Result};
use crate::icon::IconIdentifier;
use crate::svg::SvgDocument;

/// Public Iconify API
pub const DEFAULT_REGISTRY: &str = "https://api.iconify.design";

const USER_AGENT: &str = concat!("iconsmith/", env!("CARGO_PKG_VERSION"));

/// @acp:summary "Anything that can supply SVG markup for an identifier"
pub trait IconSource: Send + Sync {
    fn fetch(&self, identifier: &IconIdentifier) -> Result<SvgDocument>;
}

/// @acp:summary "Blocking HTTP client for `{registry}/{collection}/{name}.svg`"
pub struct IconifyClient {
    base_url: String,
    agent: ureq::Agent,
}

impl IconifyClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(15))
            .user_agent(USER_AGENT)
            .build();

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            agent,
        }
    }

    pub fn url_for(&self, identifier: &IconIdentifier) -> String {
        format!(
            "{}/{}/{}.svg",
            self.base_url,
            identifier.collection(),
            identifier.name()
        )
    }
}

impl Default for IconifyClient {
    fn default() -> Self {
        Self::new(DEFAULT_REGISTRY)
    }
}

impl IconSource for IconifyClient {
    fn fetch(&self, identifier: &IconIdentifier) -> Result<SvgDocument> {
        let url = self.url_for(identifier);
        debug!(%identifier, %url, "fetching icon");

        let failed = |reason: String| IconError::FetchFailed {
            identifier: identifier.to_string(),
            reason,
        };

        let response = match self.agent.get(&url).call() {
            Ok(response) => response,
            Err(ureq::Error::Status(404, _)) => return Err(failed("icon not found".to_string())),
            Err(ureq::Error::Status(code, _)) => {
                return Err(failed(format!("registry responded with HTTP {code}")))
            }
            Err(err) => return Err(failed(err.to_string())),
        };

        let body = response
            .into_string()
            .map_err(|e| failed(format!("failed to read response: {e}")))?;

        // Iconify answers unknown icons with a 200 and a literal `404` body.
        if body.trim() == "404" {
            return Err(failed("icon not found".to_string()));
        }

        debug!(%identifier, bytes = body.len(), "fetched icon");
        Ok(SvgDocument::new(body))
    }
}

/// @acp:summary "Fixed in-memory icon set keyed by identifier string"
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    icons: HashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, identifier: &str, markup: &str) -> Self {
        self.icons.insert(identifier.to_string(), markup.to_string());
        self
    }
}

impl IconSource for MemorySource {
    fn fetch(&self, identifier: &IconIdentifier) -> Result<SvgDocument> {
        self.icons
            .get(&identifier.to_string())
            .map(|markup| SvgDocument::new(markup.as_str()))
            .ok_or_else(|| IconError::FetchFailed {
                identifier: identifier.to_string(),
                reason: "icon not found".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for() {
        let client = IconifyClient::new("https://icons.example.com/");
        let id: IconIdentifier = "lucide:arrow-right".parse().unwrap();
        assert_eq!(
            client.url_for(&id),
            "https://icons.example.com/lucide/arrow-right.svg"
        );
    }

    #[test]
    fn test_memory_source_missing_icon() {
        let source = MemorySource::new().with("lucide:check", "<svg/>");
        let hit: IconIdentifier = "lucide:check".parse().unwrap();
        let miss: IconIdentifier = "lucide:x".parse().unwrap();
        assert_eq!(source.fetch(&hit).unwrap().as_str(), "<svg/>");
        assert!(matches!(
            source.fetch(&miss).unwrap_err(),
            IconError::FetchFailed { .. }
        ));
    }
}
