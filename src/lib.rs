//! # Darkroom
//!
//! An offline-first command-line client for a photo feed API.
//!
//! ## Architecture
//!
//! Darkroom loads everything through composable pipelines:
//!
//! ```text
//! Fetcher → Mapper → Pipeline ⇄ Cache → Store
//! ```
//!
//! - [`fetcher`]: HTTP transport plus a generic remote loader
//! - [`mapper`]: wire-format decoding with per-endpoint status rules
//! - [`pipeline`]: caching and fallback composition, background tasks
//! - [`cache`]: validating local loaders over the store
//! - [`store`]: SQLite persistence
//!
//! The feed loads remote-first and falls back to a seven-day cache when the
//! network is unreachable; images load cache-first and fetch on a miss.
//!
//! ## Quick Start
//!
//! ```bash
//! # Show the feed (cached automatically)
//! darkroom feed
//!
//! # Page deeper into the feed
//! darkroom feed --pages 3
//!
//! # Download an image
//! darkroom image https://images.example.com/photo.jpg
//!
//! # Read the comments on an image
//! darkroom comments e4c3a1f0-9b2d-4f6a-8c5e-7d1b3a9f0e2c
//!
//! # Drop the cached feed if it has expired
//! darkroom validate
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together all components:
/// store, transport, pipelines, and the serial presentation queue.
pub mod app;

/// Local cache loaders.
///
/// - [`LocalFeedLoader`](cache::LocalFeedLoader): feed cache with a seven day
///   lifetime and self-healing validation
/// - [`LocalImageDataLoader`](cache::LocalImageDataLoader): image bytes keyed
///   by URL
pub mod cache;

/// Command-line interface using clap.
///
/// Defines the CLI structure and subcommands:
/// - `feed [--pages N]` - Show the photo feed
/// - `image <url>` - Download an image
/// - `comments <image-id>` - Show an image's comments
/// - `validate` - Delete the cached feed if expired
pub mod cli;

/// Configuration management.
///
/// Loads from `~/.config/darkroom/config.toml`: API base URL, request
/// timeout, and cache database location.
pub mod config;

/// Core domain models.
///
/// - [`FeedImage`](domain::FeedImage): one photo in the feed
/// - [`ImageComment`](domain::ImageComment): one comment on a photo
/// - [`Paginated`](domain::Paginated): cumulative pages with a lazy
///   load-more continuation
pub mod domain;

/// HTTP transport and remote loading.
///
/// - [`HttpClient`](fetcher::HttpClient): async trait delivering responses
///   for every status code
/// - [`ReqwestClient`](fetcher::reqwest_client::ReqwestClient): reqwest-based
///   implementation
/// - [`RemoteLoader`](fetcher::remote::RemoteLoader): transport + mapper with
///   collapsed error semantics
pub mod fetcher;

/// Wire-format decoding.
///
/// One mapper per endpoint; each enforces its own status-code contract
/// (the feed and image endpoints accept exactly 200, comments any 2xx).
pub mod mapper;

/// Load composition.
///
/// - [`caching`](pipeline::caching) / [`fallback`](pipeline::fallback):
///   strategy combinators
/// - [`FeedPipeline`](pipeline::FeedPipeline) /
///   [`ImagePipeline`](pipeline::ImagePipeline): the app's two load paths
/// - [`LoadTask`](pipeline::LoadTask): cancellable background loads
pub mod pipeline;

/// SQLite persistence layer.
///
/// - [`FeedStore`](store::FeedStore) / [`ImageDataStore`](store::ImageDataStore):
///   traits defining storage operations
/// - [`SqliteStore`](store::sqlite::SqliteStore): SQLite implementation of both
pub mod store;
