use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use figma_api::style::ImageFormat;
use tracing::Level;
use url::Url;

/// Talks to the Figma REST API, or decodes file contents fetched earlier.
#[derive(Parser, Clone, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// A global log level to use when printing logs.
    /// It's also possible to set `RUST_LOG` according to
    /// `tracing_subscriber::filter::EnvFilter`, which will always have
    /// priority.
    #[arg(long, default_value_t = Level::INFO)]
    pub log_level: Level,

    /// Whether to log in JSON
    #[arg(long)]
    pub json: bool,

    /// Personal access token, sent with every request.
    #[arg(long, env = "FIGMA_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    #[arg(long, env = "FIGMA_BASE_URL", default_value = figma_client::DEFAULT_BASE_URL)]
    pub base_url: Url,

    /// Reject node trees nested deeper than this.
    #[arg(long)]
    pub max_depth: Option<usize>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Command {
    /// Lists the projects of a team.
    Projects { team_id: String },

    /// Lists the files of a project.
    Files { project_id: String },

    /// Fetches a file and prints its node tree.
    File {
        key: String,

        /// Fetch this version instead of the current one.
        #[arg(long)]
        version: Option<String>,

        /// Include vector geometry.
        #[arg(long)]
        geometry_paths: bool,

        /// Print the response body as received instead of the tree.
        #[arg(long)]
        raw: bool,
    },

    /// Decodes a file body stored on disk and prints its node tree.
    Decode {
        #[clap(value_name = "PATH")]
        path: PathBuf,

        /// The input is a JSON array of nodes instead of a whole file.
        #[arg(long)]
        nodes: bool,
    },

    /// Renders nodes of a file and prints one image URL per node.
    Images {
        key: String,

        #[clap(value_name = "NODE_ID", required = true)]
        ids: Vec<String>,

        #[arg(long)]
        scale: Option<f64>,

        #[arg(long, value_enum)]
        format: Option<Format>,

        #[arg(long)]
        svg_include_id: bool,

        #[arg(long)]
        version: Option<String>,
    },

    /// Lists the saved versions of a file.
    Versions { key: String },

    /// Lists the comments on a file.
    Comments { key: String },

    /// Posts a comment on a file.
    Comment {
        key: String,

        message: String,

        /// Pin the comment relative to this frame instead of the canvas.
        #[arg(long)]
        node_id: Option<String>,

        #[arg(long, default_value_t = 0.0)]
        x: f64,

        #[arg(long, default_value_t = 0.0)]
        y: f64,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Jpg,
    Png,
    Svg,
    Pdf,
}

impl From<Format> for ImageFormat {
    fn from(value: Format) -> Self {
        match value {
            Format::Jpg => ImageFormat::Jpg,
            Format::Png => ImageFormat::Png,
            Format::Svg => ImageFormat::Svg,
            Format::Pdf => ImageFormat::Pdf,
        }
    }
}
