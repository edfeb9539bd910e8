pub use self::room::{LifeRoomMetadata, SessionAndUserId, UserSessionHandle};

pub use self::room_manager::{RoomJoinResult, RoomManager};

mod room;
#[allow(clippy::module_inception)]
mod room_manager;

#[derive(Debug, Default)]
pub struct RoomManagerBuilder {
    rooms: Vec<LifeRoomMetadata>,
}

impl RoomManagerBuilder {
    pub fn new() -> Self {
        RoomManagerBuilder { rooms: Vec::new() }
    }

    /// Add a room that exists from start-up on
    /// Will panic if a room with the same id already exists
    pub fn create_room(mut self, metadata: LifeRoomMetadata) -> Self {
        if self.rooms.iter().any(|m| m.id.eq(&metadata.id)) {
            panic!("room with the same id already exists");
        }

        self.rooms.push(metadata);

        self
    }

    pub fn build(self) -> RoomManager {
        RoomManager::new(self.rooms)
    }
}
