use super::Room;
use async_trait::async_trait;

/// Storage for rooms.
///
/// `create_room` is not idempotent: two calls with the same name store two
/// rooms. Callers validate the name before calling it.
#[async_trait]
pub trait RoomRepository: Send + Sync {
    async fn create_room(&self, name: &str) -> anyhow::Result<()>;

    /// All rooms, oldest first.
    async fn list_rooms(&self) -> anyhow::Result<Vec<Room>>;
}
