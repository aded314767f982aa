use super::{Room, RoomRepository};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Rooms keyed by id, each tagged with the order it was created in.
#[derive(Debug, Default)]
pub struct InMemoryRoomRepository {
    rooms: DashMap<String, (u64, Room)>,
    next_seq: AtomicU64,
}

impl InMemoryRoomRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn create_room(&self, name: &str) -> anyhow::Result<()> {
        let room = Room::new(name);
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.rooms.insert(room.id.clone(), (seq, room));
        Ok(())
    }

    async fn list_rooms(&self) -> anyhow::Result<Vec<Room>> {
        let mut rooms = self
            .rooms
            .iter()
            .map(|entry| entry.value().clone())
            .collect::<Vec<_>>();
        rooms.sort_by_key(|(seq, _)| *seq);
        Ok(rooms.into_iter().map(|(_, room)| room).collect())
    }
}
