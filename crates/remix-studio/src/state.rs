use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use remix_core::ImageResource;

/// Identifies one effect; only the latest token's completion is applied
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where the original image came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    File(PathBuf),
    Url(String),
}

impl fmt::Display for Preview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

/// The image the user supplied, kept for regeneration
#[derive(Debug, Clone)]
pub struct OriginalImage {
    pub resource: Arc<ImageResource>,
    pub preview: Preview,
}

/// Everything the views need to render one session
#[derive(Debug, Clone)]
pub struct SessionState {
    pub(crate) default_prompt: String,
    pub(crate) prompt: String,
    pub(crate) loading: bool,
    pub(crate) error: Option<String>,
    pub(crate) original: Option<OriginalImage>,
    pub(crate) results: Vec<Arc<str>>,
    pub(crate) latest_token: RequestToken,
}

impl SessionState {
    /// Fresh session whose prompt starts as `default_prompt`
    pub fn new(default_prompt: impl Into<String>) -> Self {
        let default_prompt = default_prompt.into();

        Self {
            prompt: default_prompt.clone(),
            default_prompt,
            loading: false,
            error: None,
            original: None,
            results: Vec::new(),
            latest_token: RequestToken::default(),
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn default_prompt(&self) -> &str {
        &self.default_prompt
    }

    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub const fn original(&self) -> Option<&OriginalImage> {
        self.original.as_ref()
    }

    /// Generated data URIs; holds at most one entry
    ///
    /// Shared so cloning a snapshot never copies the image payload.
    pub fn results(&self) -> &[Arc<str>] {
        &self.results
    }

    pub const fn latest_token(&self) -> RequestToken {
        self.latest_token
    }

    /// Hand out a new token, superseding every outstanding effect
    pub(crate) fn issue_token(&mut self) -> RequestToken {
        self.latest_token = self.latest_token.next();
        self.latest_token
    }

    /// Back to a fresh session; outstanding effects become stale
    pub(crate) fn reset(&mut self) {
        self.prompt.clone_from(&self.default_prompt);
        self.loading = false;
        self.error = None;
        self.original = None;
        self.results.clear();
        self.issue_token();
    }
}
