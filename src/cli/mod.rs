pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "darkroom")]
#[command(about = "An offline-first photo feed client", long_about = None)]
pub struct Cli {
    /// Path to the SQLite cache database
    #[arg(long, global = true)]
    pub db: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the photo feed
    Feed {
        /// Number of cumulative pages to fetch
        #[arg(short, long, default_value_t = 1)]
        pages: usize,
    },
    /// Download an image
    Image {
        /// URL of the image
        url: url::Url,

        /// Output file (default: the image's file name)
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
    },
    /// Show the comments on an image
    Comments {
        /// Id of the image
        image_id: uuid::Uuid,
    },
    /// Delete the cached feed if it has expired
    Validate,
}
