use std::path::Path;

use secrecy::ExposeSecret;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// The raw text goes through `{{ env.VAR }}` expansion before it is
    /// deserialized and validated.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, expansion or parsing
    /// fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::parse(&raw)
    }

    /// Like [`Config::load`], but a missing file yields the defaults
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file fails to load
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing or validation fails
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Check that the configuration is internally consistent
    ///
    /// A missing provider key is deliberately not an error here: the proxy
    /// reports it per request with a 500.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first inconsistency found
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.body_limit == 0 {
            anyhow::bail!("server.body_limit must be greater than 0");
        }

        if !self.server.health.path.starts_with('/') {
            anyhow::bail!("server.health.path must start with '/'");
        }

        if self.provider.model.trim().is_empty() {
            anyhow::bail!("provider.model must not be empty");
        }

        if self.provider.timeout_secs == 0 {
            anyhow::bail!("provider.timeout_secs must be greater than 0");
        }

        if let Some(ref base_url) = self.provider.base_url
            && !matches!(base_url.scheme(), "http" | "https")
        {
            anyhow::bail!("provider.base_url must be an http(s) URL");
        }

        if !matches!(self.studio.endpoint.scheme(), "http" | "https") {
            anyhow::bail!("studio.endpoint must be an http(s) URL");
        }

        if self.studio.default_prompt.trim().is_empty() {
            anyhow::bail!("studio.default_prompt must not be empty");
        }

        Ok(())
    }

    /// Whether a non-empty provider key is configured
    pub fn has_api_key(&self) -> bool {
        self.provider
            .api_key
            .as_ref()
            .is_some_and(|key| !key.expose_secret().is_empty())
    }
}
