use serde::Deserialize;
use url::Url;

/// Prompt restored on start and on every reset
pub const DEFAULT_PROMPT: &str = "Create a creative variation of this image.";

/// Configuration for the interactive studio
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StudioConfig {
    /// Base URL of the backend proxy
    #[serde(default = "default_endpoint")]
    pub endpoint: Url,
    /// Prompt shown before the user edits it
    #[serde(default = "default_prompt")]
    pub default_prompt: String,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            default_prompt: default_prompt(),
        }
    }
}

fn default_endpoint() -> Url {
    Url::parse("http://127.0.0.1:3000").expect("must be a valid URL")
}

fn default_prompt() -> String {
    DEFAULT_PROMPT.to_string()
}
