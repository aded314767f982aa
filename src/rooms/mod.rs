mod memory;
mod repository;
mod sqlite;

pub use memory::InMemoryRoomRepository;
pub use repository::RoomRepository;
pub use sqlite::SqliteRoomRepository;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: String,
    pub name: String,
    pub created_at: i64,
}

impl Room {
    pub fn new(name: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            created_at: current_time_millis(),
        }
    }
}

fn current_time_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}
