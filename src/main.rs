use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use darkroom::app::AppContext;
use darkroom::cli::{commands, Cli, Commands};
use darkroom::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let ctx = AppContext::new(&config, cli.db)?;

    let result = match cli.command {
        Commands::Feed { pages } => commands::show_feed(&ctx, pages).await,
        Commands::Image { url, output } => commands::fetch_image(&ctx, &url, output).await,
        Commands::Comments { image_id } => commands::show_comments(&ctx, image_id).await,
        Commands::Validate => commands::validate_cache(&ctx).await,
    };

    // Flush queued output before reporting the command's outcome.
    ctx.shutdown().await;
    Ok(result?)
}
