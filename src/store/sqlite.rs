use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};
use rusqlite_migration::{Migrations, M};
use url::Url;
use uuid::Uuid;

use crate::app::{DarkroomError, Result};
use crate::store::{CachedFeed, FeedStore, ImageDataStore, LocalFeedImage};

/// SQLite-backed implementation of [`FeedStore`] and [`ImageDataStore`].
///
/// The connection sits behind a `Mutex`, so operations are applied in the
/// strict serial order the store contract requires.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.run_migrations()?;
        Ok(store)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.run_migrations()?;
        Ok(store)
    }

    fn run_migrations(&self) -> Result<()> {
        let migrations = Migrations::new(vec![M::up(include_str!(
            "../../migrations/001-initial/up.sql"
        ))]);

        let mut conn = self.conn()?;
        migrations
            .to_latest(&mut conn)
            .map_err(|_| DarkroomError::Database(rusqlite::Error::InvalidQuery))?;

        Ok(())
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|e| {
            DarkroomError::Database(rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error::new(1),
                Some(e.to_string()),
            ))
        })
    }

    fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| s.parse::<DateTime<Utc>>().ok())
    }

    fn image_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<LocalFeedImage> {
        let id: String = row.get(0)?;
        let id = Uuid::parse_str(&id)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)))?;
        let url: String = row.get(3)?;
        let url = Url::parse(&url)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;

        Ok(LocalFeedImage {
            id,
            description: row.get(1)?,
            location: row.get(2)?,
            url,
        })
    }
}

#[async_trait]
impl FeedStore for SqliteStore {
    async fn retrieve(&self) -> Result<Option<CachedFeed>> {
        let conn = self.conn()?;

        let raw_timestamp = conn
            .query_row("SELECT timestamp FROM feed_cache WHERE id = 0", [], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;

        let Some(raw_timestamp) = raw_timestamp else {
            return Ok(None);
        };

        let timestamp = Self::parse_datetime(&raw_timestamp).ok_or_else(|| {
            DarkroomError::Other(format!("corrupt cache timestamp: {raw_timestamp}"))
        })?;

        let mut stmt = conn.prepare(
            "SELECT image_id, description, location, url
             FROM feed_cache_images ORDER BY position",
        )?;
        let feed = stmt
            .query_map([], Self::image_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Some(CachedFeed { feed, timestamp }))
    }

    async fn insert(&self, feed: &[LocalFeedImage], timestamp: DateTime<Utc>) -> Result<()> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        tx.execute("DELETE FROM feed_cache", [])?;
        tx.execute("DELETE FROM feed_cache_images", [])?;
        tx.execute(
            "INSERT INTO feed_cache (id, timestamp) VALUES (0, ?1)",
            params![timestamp.to_rfc3339()],
        )?;

        for (position, image) in feed.iter().enumerate() {
            tx.execute(
                "INSERT INTO feed_cache_images (position, image_id, description, location, url)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    position as i64,
                    image.id.to_string(),
                    image.description,
                    image.location,
                    image.url.as_str()
                ],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    async fn delete_cached_feed(&self) -> Result<()> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        tx.execute("DELETE FROM feed_cache", [])?;
        tx.execute("DELETE FROM feed_cache_images", [])?;

        tx.commit()?;
        Ok(())
    }
}

#[async_trait]
impl ImageDataStore for SqliteStore {
    async fn retrieve(&self, url: &Url) -> Result<Option<Vec<u8>>> {
        let conn = self.conn()?;

        let data = conn
            .query_row(
                "SELECT data FROM image_data WHERE url = ?1",
                params![url.as_str()],
                |row| row.get(0),
            )
            .optional()?;

        Ok(data)
    }

    async fn insert(&self, data: &[u8], url: &Url) -> Result<()> {
        let conn = self.conn()?;

        conn.execute(
            "INSERT OR REPLACE INTO image_data (url, data) VALUES (?1, ?2)",
            params![url.as_str(), data],
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_image(name: &str) -> LocalFeedImage {
        LocalFeedImage {
            id: Uuid::new_v4(),
            description: Some(format!("{name} description")),
            location: None,
            url: Url::parse(&format!("https://images.example.com/{name}.jpg")).unwrap(),
        }
    }

    fn test_url(name: &str) -> Url {
        Url::parse(&format!("https://images.example.com/{name}.jpg")).unwrap()
    }

    #[tokio::test]
    async fn test_retrieve_on_empty_store() {
        let store = SqliteStore::in_memory().unwrap();
        assert_eq!(FeedStore::retrieve(&store).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_insert_and_retrieve_feed() {
        let store = SqliteStore::in_memory().unwrap();
        let feed = vec![local_image("a"), local_image("b")];
        let timestamp = Utc::now();

        FeedStore::insert(&store, &feed, timestamp).await.unwrap();

        let cached = FeedStore::retrieve(&store).await.unwrap().unwrap();
        assert_eq!(cached.feed, feed);
        assert_eq!(cached.timestamp, timestamp);
    }

    #[tokio::test]
    async fn test_insert_replaces_previous_cache_wholesale() {
        let store = SqliteStore::in_memory().unwrap();

        let first = vec![local_image("a"), local_image("b")];
        FeedStore::insert(&store, &first, Utc::now()).await.unwrap();

        let second = vec![local_image("c")];
        let timestamp = Utc::now();
        FeedStore::insert(&store, &second, timestamp).await.unwrap();

        let cached = FeedStore::retrieve(&store).await.unwrap().unwrap();
        assert_eq!(cached.feed, second);
        assert_eq!(cached.timestamp, timestamp);
    }

    #[tokio::test]
    async fn test_delete_empties_cache() {
        let store = SqliteStore::in_memory().unwrap();
        FeedStore::insert(&store, &[local_image("a")], Utc::now())
            .await
            .unwrap();

        FeedStore::delete_cached_feed(&store).await.unwrap();

        assert_eq!(FeedStore::retrieve(&store).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_on_empty_store_succeeds() {
        let store = SqliteStore::in_memory().unwrap();
        FeedStore::delete_cached_feed(&store).await.unwrap();
    }

    #[tokio::test]
    async fn test_duplicate_image_ids_survive_in_order() {
        let store = SqliteStore::in_memory().unwrap();
        let image = local_image("a");
        let other = local_image("b");
        let feed = vec![image.clone(), other.clone(), image.clone()];

        FeedStore::insert(&store, &feed, Utc::now()).await.unwrap();

        let cached = FeedStore::retrieve(&store).await.unwrap().unwrap();
        assert_eq!(cached.feed, vec![image.clone(), other, image]);
    }

    #[tokio::test]
    async fn test_empty_feed_round_trips() {
        let store = SqliteStore::in_memory().unwrap();
        let timestamp = Utc::now();

        FeedStore::insert(&store, &[], timestamp).await.unwrap();

        let cached = FeedStore::retrieve(&store).await.unwrap().unwrap();
        assert!(cached.feed.is_empty());
        assert_eq!(cached.timestamp, timestamp);
    }

    #[tokio::test]
    async fn test_image_data_miss_is_none() {
        let store = SqliteStore::in_memory().unwrap();
        let data = ImageDataStore::retrieve(&store, &test_url("missing"))
            .await
            .unwrap();
        assert_eq!(data, None);
    }

    #[tokio::test]
    async fn test_image_data_round_trip() {
        let store = SqliteStore::in_memory().unwrap();
        let url = test_url("a");

        ImageDataStore::insert(&store, &[1, 2, 3], &url)
            .await
            .unwrap();

        let data = ImageDataStore::retrieve(&store, &url).await.unwrap();
        assert_eq!(data, Some(vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn test_image_data_insert_overwrites() {
        let store = SqliteStore::in_memory().unwrap();
        let url = test_url("a");

        ImageDataStore::insert(&store, &[1], &url).await.unwrap();
        ImageDataStore::insert(&store, &[2, 2], &url).await.unwrap();

        let data = ImageDataStore::retrieve(&store, &url).await.unwrap();
        assert_eq!(data, Some(vec![2, 2]));
    }

    #[tokio::test]
    async fn test_image_data_is_keyed_by_url() {
        let store = SqliteStore::in_memory().unwrap();

        ImageDataStore::insert(&store, &[1], &test_url("a"))
            .await
            .unwrap();

        let other = ImageDataStore::retrieve(&store, &test_url("b"))
            .await
            .unwrap();
        assert_eq!(other, None);
    }

    #[tokio::test]
    async fn test_cache_persists_across_store_instances() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("darkroom.db");
        let feed = vec![local_image("a")];
        let timestamp = Utc::now();

        {
            let store = SqliteStore::new(&path).unwrap();
            FeedStore::insert(&store, &feed, timestamp).await.unwrap();
            ImageDataStore::insert(&store, &[7, 7], &test_url("a"))
                .await
                .unwrap();
        }

        let reopened = SqliteStore::new(&path).unwrap();
        let cached = FeedStore::retrieve(&reopened).await.unwrap().unwrap();
        assert_eq!(cached.feed, feed);
        assert_eq!(cached.timestamp, timestamp);

        let data = ImageDataStore::retrieve(&reopened, &test_url("a"))
            .await
            .unwrap();
        assert_eq!(data, Some(vec![7, 7]));
    }
}
