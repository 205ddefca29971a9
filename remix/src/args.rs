use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use url::Url;

/// Remix image variations
#[derive(Debug, Parser)]
#[command(name = "remix", about = "AI image variations behind a credential-holding proxy")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "remix.toml", env = "REMIX_CONFIG", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the backend proxy
    Serve(ServeArgs),
    /// Create a variation of one image
    Vary(VaryArgs),
}

#[derive(Debug, clap::Args)]
pub struct ServeArgs {
    /// Override the listen address
    #[arg(long, env = "REMIX_LISTEN")]
    pub listen: Option<SocketAddr>,
}

#[derive(Debug, clap::Args)]
pub struct VaryArgs {
    /// Local image file or http(s) URL
    pub image: String,

    /// Prompt describing the variation (defaults to the configured prompt)
    #[arg(short, long)]
    pub prompt: Option<String>,

    /// Base URL of the backend proxy
    #[arg(long, env = "REMIX_ENDPOINT")]
    pub endpoint: Option<Url>,

    /// Call the provider in-process instead of through a proxy
    #[arg(long, conflicts_with = "endpoint")]
    pub embedded: bool,

    /// Where to write the generated image
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

impl VaryArgs {
    /// Whether the input names a remote image rather than a file
    pub fn is_url(&self) -> bool {
        let image = self.image.trim_start();
        ["http://", "https://"]
            .iter()
            .any(|scheme| image.get(..scheme.len()).is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme)))
    }
}
