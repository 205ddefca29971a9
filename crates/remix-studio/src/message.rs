use std::path::PathBuf;
use std::sync::Arc;

use remix_core::ImageResource;

use crate::state::{Preview, RequestToken};

/// One user intent
#[derive(Debug, Clone)]
pub enum Command {
    /// Read and encode a local file, then generate
    SelectFile(PathBuf),
    /// Use an already-encoded image, then generate
    SelectImage(Arc<ImageResource>, Preview),
    /// Fetch an image by URL, then generate
    SubmitUrl(String),
    /// Edit the prompt
    SetPrompt(String),
    /// Generate again from the current original and prompt
    Regenerate,
    /// Clear the session
    Reset,
}

/// Input of the transition function
#[derive(Debug)]
pub enum Message {
    Command(Command),

    /// A file read or URL fetch finished
    ImageLoaded {
        token: RequestToken,
        preview: Preview,
        result: Result<ImageResource, String>,
    },

    /// A generation request finished
    Generated {
        token: RequestToken,
        result: Result<String, String>,
    },
}

impl From<Command> for Message {
    fn from(command: Command) -> Self {
        Self::Command(command)
    }
}
