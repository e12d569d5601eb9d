use std::path::PathBuf;

use url::Url;
use uuid::Uuid;

use crate::app::{AppContext, DarkroomError, Result};
use crate::domain::{FeedImage, Paginated};

/// Fetch and print `pages` cumulative pages of the feed. Ctrl+C while the
/// first page is in flight drops the task, which aborts the load.
pub async fn show_feed(ctx: &AppContext, pages: usize) -> Result<()> {
    let task = ctx.load_feed();

    let mut page = tokio::select! {
        result = task.result() => result.map_err(connectivity_message)?,
        _ = tokio::signal::ctrl_c() => {
            println!("Cancelled");
            return Ok(());
        }
    };

    let mut fetched = 1;
    while fetched < pages {
        let Some(next) = page.load_more() else { break };
        page = next.await.map_err(connectivity_message)?;
        fetched += 1;
    }

    present_feed(ctx, page).await
}

/// The user gets one generic message for any failed load; the real cause
/// only goes to the log.
fn connectivity_message(err: DarkroomError) -> DarkroomError {
    match err {
        DarkroomError::Cancelled => DarkroomError::Cancelled,
        err => {
            tracing::debug!("load failed: {err}");
            DarkroomError::Connectivity
        }
    }
}

async fn present_feed(ctx: &AppContext, page: Paginated<FeedImage>) -> Result<()> {
    ctx.dispatcher
        .run(move || {
            if page.items.is_empty() {
                println!("The feed is empty");
                return;
            }

            for image in &page.items {
                println!("{}  {}", image.id, image.display_description());
                if let Some(location) = &image.location {
                    println!("    {}", location);
                }
                println!("    {}", image.url);
            }

            if page.has_more() {
                println!("({} photos, more available)", page.items.len());
            } else {
                println!("({} photos)", page.items.len());
            }
        })
        .await
}

pub async fn fetch_image(ctx: &AppContext, url: &Url, output: Option<PathBuf>) -> Result<()> {
    let data = ctx
        .load_image(url.clone())
        .result()
        .await
        .map_err(connectivity_message)?;

    let path = output.unwrap_or_else(|| default_image_name(url));
    std::fs::write(&path, &data)?;

    ctx.dispatcher
        .run(move || println!("Wrote {} bytes to {}", data.len(), path.display()))
        .await
}

pub async fn show_comments(ctx: &AppContext, image_id: Uuid) -> Result<()> {
    let comments = ctx
        .load_comments(image_id)
        .result()
        .await
        .map_err(connectivity_message)?;

    ctx.dispatcher
        .run(move || {
            if comments.is_empty() {
                println!("No comments");
                return;
            }

            for comment in &comments {
                println!(
                    "{} ({})",
                    comment.username,
                    comment.created_at.format("%Y-%m-%d %H:%M")
                );
                println!("  {}", comment.message);
            }
        })
        .await
}

pub async fn validate_cache(ctx: &AppContext) -> Result<()> {
    ctx.validate_cache().await?;

    ctx.dispatcher.run(|| println!("Cache validated")).await
}

fn default_image_name(url: &Url) -> PathBuf {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|name| !name.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("image.bin"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_image_name_uses_last_path_segment() {
        let url = Url::parse("https://images.example.com/albums/2024/photo.jpg").unwrap();
        assert_eq!(default_image_name(&url), PathBuf::from("photo.jpg"));
    }

    #[test]
    fn test_default_image_name_falls_back_on_bare_host() {
        let url = Url::parse("https://images.example.com/").unwrap();
        assert_eq!(default_image_name(&url), PathBuf::from("image.bin"));
    }
}
