//! Render-ready projections of a [`SessionState`]
//!
//! Each view is derived from the state alone, so any frontend can redraw
//! from a snapshot without consulting the controller.

use std::fmt;
use std::sync::Arc;

use crate::state::{Preview, SessionState};

pub const GENERATE_LABEL: &str = "Generate variation";
pub const GENERATING_LABEL: &str = "Generating...";
pub const RESET_LABEL: &str = "Clear";

/// Image input selector (file picker and URL field)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInputView {
    pub enabled: bool,
}

/// Prompt editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptView {
    pub text: String,
    pub editable: bool,
}

/// Regenerate and reset buttons
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlsView {
    pub generate_label: &'static str,
    pub generate_enabled: bool,
    pub reset_label: &'static str,
    pub reset_enabled: bool,
}

/// What the generated-image slot shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratedSlot {
    /// Nothing supplied yet
    Placeholder,
    /// An original exists but nothing was generated for it
    Waiting,
    Generating,
    Images(Vec<Arc<str>>),
}

/// Results panel: error banner, original preview and generated images
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsView {
    pub error: Option<String>,
    pub original: Option<Preview>,
    pub generated: GeneratedSlot,
}

/// All four views for one snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Views {
    pub image_input: ImageInputView,
    pub prompt: PromptView,
    pub controls: ControlsView,
    pub results: ResultsView,
}

impl Views {
    pub fn from_state(state: &SessionState) -> Self {
        let loading = state.is_loading();
        let has_original = state.original().is_some();

        let generated = if loading {
            GeneratedSlot::Generating
        } else if !state.results().is_empty() {
            GeneratedSlot::Images(state.results().to_vec())
        } else if has_original {
            GeneratedSlot::Waiting
        } else {
            GeneratedSlot::Placeholder
        };

        Self {
            image_input: ImageInputView { enabled: !loading },
            prompt: PromptView {
                text: state.prompt().to_owned(),
                editable: !loading,
            },
            controls: ControlsView {
                generate_label: if loading { GENERATING_LABEL } else { GENERATE_LABEL },
                generate_enabled: has_original && !loading,
                reset_label: RESET_LABEL,
                reset_enabled: !loading,
            },
            results: ResultsView {
                error: state.error().map(str::to_owned),
                original: state.original().map(|original| original.preview.clone()),
                generated,
            },
        }
    }
}

impl fmt::Display for Views {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "prompt: {}", self.prompt.text)?;

        if let Some(original) = &self.results.original {
            writeln!(f, "original: {original}")?;
        }

        if let Some(error) = &self.results.error {
            writeln!(f, "error: {error}")?;
        }

        match &self.results.generated {
            GeneratedSlot::Placeholder => writeln!(f, "the original image and its variations will appear here"),
            GeneratedSlot::Waiting => writeln!(f, "press \"{GENERATE_LABEL}\" to create a variation"),
            GeneratedSlot::Generating => writeln!(f, "{GENERATING_LABEL}"),
            GeneratedSlot::Images(images) => images
                .iter()
                .try_for_each(|image| writeln!(f, "variation: {}", abbreviate(image))),
        }
    }
}

/// Shorten a data URI to its header and payload size
fn abbreviate(image_url: &str) -> String {
    match image_url.split_once(',') {
        Some((header, payload)) => format!("{header},... ({} base64 chars)", payload.len()),
        None => image_url.to_owned(),
    }
}
