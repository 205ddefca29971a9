use std::sync::Arc;

use remix_core::ImageResource;

use crate::effect::Effect;
use crate::message::{Command, Message};
use crate::state::{OriginalImage, Preview, SessionState};

/// Apply `message` to `state` and return the effect to run, if any
///
/// Commands that would start work are ignored while loading. Completions
/// carrying a token other than the latest one are dropped.
pub fn update(state: &mut SessionState, message: Message) -> Option<Effect> {
    match message {
        Message::Command(command) => handle_command(state, command),
        Message::ImageLoaded { token, preview, result } => {
            if token != state.latest_token {
                tracing::debug!(%token, latest = %state.latest_token, "discarding stale image load");
                return None;
            }

            match result {
                Ok(resource) => {
                    let resource = Arc::new(resource);
                    state.original = Some(OriginalImage {
                        resource: Arc::clone(&resource),
                        preview,
                    });

                    Some(start_generation(state, resource))
                }
                Err(message) => {
                    tracing::debug!(%preview, error = %message, "image load failed");

                    state.error = Some(match preview {
                        Preview::Url(_) => format!("could not load the image from the URL: {message}"),
                        Preview::File(_) => format!("could not read the image file: {message}"),
                    });
                    state.loading = false;

                    None
                }
            }
        }
        Message::Generated { token, result } => {
            if token != state.latest_token {
                tracing::debug!(%token, latest = %state.latest_token, "discarding stale generation");
                return None;
            }

            match result {
                Ok(image_url) => state.results = vec![Arc::from(image_url)],
                Err(message) => state.error = Some(message),
            }
            state.loading = false;

            None
        }
    }
}

fn handle_command(state: &mut SessionState, command: Command) -> Option<Effect> {
    match command {
        Command::Reset => {
            state.reset();
            None
        }
        _ if state.loading => {
            tracing::debug!(?command, "ignoring command while loading");
            None
        }
        Command::SelectFile(path) => {
            begin_loading(state);

            Some(Effect::LoadFile {
                token: state.issue_token(),
                path,
            })
        }
        Command::SelectImage(resource, preview) => {
            state.original = Some(OriginalImage {
                resource: Arc::clone(&resource),
                preview,
            });

            Some(start_generation(state, resource))
        }
        Command::SubmitUrl(url) => {
            let url = url.trim();
            if url.is_empty() {
                return None;
            }

            begin_loading(state);

            Some(Effect::FetchUrl {
                token: state.issue_token(),
                url: url.to_owned(),
            })
        }
        Command::SetPrompt(prompt) => {
            state.prompt = prompt;
            None
        }
        Command::Regenerate => {
            let resource = Arc::clone(&state.original.as_ref()?.resource);
            Some(start_generation(state, resource))
        }
    }
}

/// Clear the previous image, result and error and mark the session busy
fn begin_loading(state: &mut SessionState) {
    state.original = None;
    state.results.clear();
    state.error = None;
    state.loading = true;
}

fn start_generation(state: &mut SessionState, resource: Arc<ImageResource>) -> Effect {
    state.loading = true;
    state.error = None;
    state.results.clear();

    Effect::Generate {
        token: state.issue_token(),
        resource,
        prompt: state.prompt.clone(),
    }
}
