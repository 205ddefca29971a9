use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use remix_client::{GenerationClient, RemoteFetcher};
use remix_config::Config;
use remix_core::{ImageFormat, ImageResource};
use remix_studio::views::Views;
use remix_studio::{ClientBackend, Command, StudioRuntime};

use crate::args::VaryArgs;

/// Output name used when `--out` is not given
const DEFAULT_OUTPUT_STEM: &str = "variation";

/// Drive one select-and-generate round through the studio controller
pub async fn run(config: &Config, args: VaryArgs) -> anyhow::Result<()> {
    let client = if args.embedded {
        tracing::debug!(provider = ?config.provider.provider_type, "generating in-process");
        GenerationClient::embedded(remix_proxy::build_proxy(config)?)
    } else {
        let endpoint = args.endpoint.clone().unwrap_or_else(|| config.studio.endpoint.clone());
        tracing::debug!(%endpoint, "generating through proxy");
        GenerationClient::from_url(endpoint)
    };

    let backend = Arc::new(ClientBackend::new(RemoteFetcher::new(), client));
    let (studio, _task) = StudioRuntime::spawn(backend, config.studio.default_prompt.clone());

    if let Some(prompt) = &args.prompt {
        studio.dispatch(Command::SetPrompt(prompt.clone())).await?;
    }

    let command = if args.is_url() {
        Command::SubmitUrl(args.image.clone())
    } else {
        Command::SelectFile(PathBuf::from(&args.image))
    };

    studio.dispatch(command).await?;
    let state = studio.settled().await?;

    print!("{}", Views::from_state(&state));

    if let Some(error) = state.error() {
        anyhow::bail!("{error}");
    }

    let image_url = state
        .results()
        .first()
        .context("no variation was generated")?;

    let image = ImageResource::from_data_uri(DEFAULT_OUTPUT_STEM, image_url)?;
    let out = args.out.unwrap_or_else(|| default_output(&image));

    tokio::fs::write(&out, image.data())
        .await
        .with_context(|| format!("failed to write {}", out.display()))?;

    tracing::info!(path = %out.display(), bytes = image.data().len(), "variation saved");

    Ok(())
}

fn default_output(image: &ImageResource) -> PathBuf {
    let extension = ImageFormat::from_mime_type(image.mime_type()).map_or("png", ImageFormat::extension);
    PathBuf::from(format!("{DEFAULT_OUTPUT_STEM}.{extension}"))
}
