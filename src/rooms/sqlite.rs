use super::{Room, RoomRepository};
use anyhow::Context;
use async_trait::async_trait;
use sqlx::{sqlite::SqlitePoolOptions, Row, SqlitePool};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct SqliteRoomRepository {
    db: SqlitePool,
}

impl SqliteRoomRepository {
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        ensure_db_dir(database_url)?;

        // an in-memory database lives only as long as its last open connection
        let options = if is_memory_url(database_url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };
        let db = options
            .connect(database_url)
            .await
            .with_context(|| format!("failed to connect to {database_url}"))?;
        sqlx::migrate!("./migrations")
            .run(&db)
            .await
            .context("failed to run room migrations")?;

        Ok(Self { db })
    }
}

#[async_trait]
impl RoomRepository for SqliteRoomRepository {
    async fn create_room(&self, name: &str) -> anyhow::Result<()> {
        let room = Room::new(name);
        sqlx::query("INSERT INTO rooms (id, name, created_at) VALUES (?, ?, ?)")
            .bind(room.id)
            .bind(room.name)
            .bind(room.created_at)
            .execute(&self.db)
            .await
            .context("failed to insert room")?;
        Ok(())
    }

    async fn list_rooms(&self) -> anyhow::Result<Vec<Room>> {
        let rows = sqlx::query(
            "SELECT id, name, created_at FROM rooms ORDER BY rowid ASC",
        )
        .fetch_all(&self.db)
        .await
        .context("failed to load rooms")?;

        rows.into_iter()
            .map(|row| -> anyhow::Result<Room> {
                Ok(Room {
                    id: row.try_get("id")?,
                    name: row.try_get("name")?,
                    created_at: row.try_get("created_at")?,
                })
            })
            .collect()
    }
}

fn is_memory_url(database_url: &str) -> bool {
    database_url.starts_with("sqlite::memory:") || database_url.ends_with(":memory:")
}

fn ensure_db_dir(database_url: &str) -> anyhow::Result<()> {
    if is_memory_url(database_url) {
        return Ok(());
    }
    let path = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"));
    let Some(path) = path else { return Ok(()) };
    let path = path.split('?').next().unwrap_or_default();
    if path.is_empty() {
        return Ok(());
    }
    let db_path = PathBuf::from(path);
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    if !db_path.exists() {
        let _ = std::fs::File::create(&db_path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_repository() -> SqliteRoomRepository {
        SqliteRoomRepository::connect("sqlite::memory:")
            .await
            .expect("in-memory database should open")
    }

    #[tokio::test]
    async fn created_rooms_are_listed() {
        let repository = memory_repository().await;
        repository.create_room("new room").await.expect("create should succeed");

        let rooms = repository.list_rooms().await.expect("list should succeed");
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].name, "new room");
        assert!(!rooms[0].id.is_empty());
    }

    #[tokio::test]
    async fn duplicate_names_create_separate_rooms() {
        let repository = memory_repository().await;
        repository.create_room("general").await.expect("first create");
        repository.create_room("general").await.expect("second create");

        let rooms = repository.list_rooms().await.expect("list should succeed");
        assert_eq!(rooms.len(), 2);
    }

    #[test]
    fn ensure_db_dir_skips_memory_urls() {
        assert!(ensure_db_dir("sqlite::memory:").is_ok());
        assert!(ensure_db_dir("sqlite://:memory:").is_ok());
    }

    #[test]
    fn ensure_db_dir_creates_missing_parent() {
        let base = std::env::temp_dir().join(format!("rooms-{}", uuid::Uuid::new_v4().simple()));
        let db_path = base.join("nested").join("rooms.db");
        let url = format!("sqlite://{}", db_path.display());

        ensure_db_dir(&url).expect("directory should be created");
        assert!(db_path.exists());

        let _ = std::fs::remove_dir_all(&base);
    }

    #[tokio::test]
    async fn list_rooms_keeps_creation_order() {
        let repository = memory_repository().await;
        let created = (0..50).rev().map(|index| format!("room-{index:02}")).collect::<Vec<_>>();
        for name in &created {
            repository.create_room(name).await.expect("create should succeed");
        }

        let names = repository
            .list_rooms()
            .await
            .expect("list should succeed")
            .into_iter()
            .map(|room| room.name)
            .collect::<Vec<_>>();
        assert_eq!(names, created);
    }
}
