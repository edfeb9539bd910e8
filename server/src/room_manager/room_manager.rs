use std::{collections::HashMap, sync::Arc};

use comms::event::{Event, JoinRoomReplyEvent, JoinedRoom, ListRoomsReplyEvent, RoomSummary, User};
use nanoid::nanoid;
use tokio::sync::{broadcast, Mutex, RwLock};

use super::room::{LifeRoom, LifeRoomMetadata, SessionAndUserId, UserSessionHandle};

pub type RoomJoinResult = (broadcast::Receiver<Event>, UserSessionHandle, JoinRoomReplyEvent);

const LOBBY_CHANNEL_CAPACITY: usize = 16;
const ROOM_ID_LENGTH: usize = 8;

/// [RoomManager] owns every open room and announces lobby changes to all sessions.
///
/// Locks are always taken in the same order: the room map first, then a single room.
#[derive(Debug)]
pub struct RoomManager {
    rooms: RwLock<HashMap<String, Arc<Mutex<LifeRoom>>>>,
    lobby_tx: broadcast::Sender<Event>,
}

impl RoomManager {
    pub(super) fn new(rooms: Vec<LifeRoomMetadata>) -> RoomManager {
        let (lobby_tx, _) = broadcast::channel(LOBBY_CHANNEL_CAPACITY);

        RoomManager {
            rooms: RwLock::new(
                rooms
                    .into_iter()
                    .map(|metadata| {
                        (
                            metadata.id.clone(),
                            Arc::new(Mutex::new(LifeRoom::new(metadata))),
                        )
                    })
                    .collect(),
            ),
            lobby_tx,
        }
    }

    /// Receive a [Event::ListRoomsSuccess] every time a room is opened, closed or its population changes
    pub fn subscribe_lobby(&self) -> broadcast::Receiver<Event> {
        self.lobby_tx.subscribe()
    }

    /// Summaries of all rooms, ordered by name
    pub async fn list_rooms(&self) -> Vec<RoomSummary> {
        let rooms = self.rooms.read().await;
        let mut summaries = Vec::with_capacity(rooms.len());

        for room in rooms.values() {
            summaries.push(room.lock().await.summary());
        }

        summaries.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));

        summaries
    }

    /// Opens a new empty room with a generated id
    pub async fn create_room(
        &self,
        name: &str,
        password: Option<String>,
    ) -> anyhow::Result<LifeRoomMetadata> {
        let name = name.trim();
        if name.is_empty() {
            return Err(anyhow::anyhow!("room name cannot be empty"));
        }

        let mut rooms = self.rooms.write().await;
        let mut id = nanoid!(ROOM_ID_LENGTH);
        while rooms.contains_key(&id) {
            id = nanoid!(ROOM_ID_LENGTH);
        }

        let metadata = LifeRoomMetadata::new(&id, name, password, false);
        rooms.insert(id, Arc::new(Mutex::new(LifeRoom::new(metadata.clone()))));

        tracing::info!(room = %metadata.id, name = %metadata.name, "room created");

        Ok(metadata)
    }

    /// Joins a room given a user session, checking the room password first
    pub async fn join_room(
        &self,
        room_id: &str,
        password: Option<&str>,
        session_and_user_id: &SessionAndUserId,
        user: User,
    ) -> anyhow::Result<RoomJoinResult> {
        let result = {
            let rooms = self.rooms.read().await;
            let room = rooms
                .get(room_id)
                .ok_or_else(|| anyhow::anyhow!("room '{}' not found", room_id))?;

            let mut room = room.lock().await;
            room.check_password(password)?;

            let (broadcast_rx, user_session_handle) = room.join(session_and_user_id, user);
            let reply = JoinRoomReplyEvent {
                room: JoinedRoom {
                    id: room.metadata().id.clone(),
                    name: room.metadata().name.clone(),
                    password: password.map(String::from),
                },
                users: room.users(),
            };

            (broadcast_rx, user_session_handle, reply)
        };

        self.publish_lobby().await;

        Ok(result)
    }

    /// Records a new life total for the user behind the handle
    pub async fn set_life(&self, handle: &UserSessionHandle, life: i32) -> anyhow::Result<()> {
        let rooms = self.rooms.read().await;
        let room = rooms
            .get(handle.room())
            .ok_or_else(|| anyhow::anyhow!("room '{}' not found", handle.room()))?;

        let mut room = room.lock().await;

        room.set_life(handle, life)
    }

    /// Leaves the room behind the handle, closing the room if it is left empty and not persistent
    pub async fn drop_user_session_handle(&self, handle: UserSessionHandle) -> anyhow::Result<()> {
        {
            let mut rooms = self.rooms.write().await;
            let room_id = String::from(handle.room());
            let room = rooms
                .get(&room_id)
                .ok_or_else(|| anyhow::anyhow!("room '{}' not found", room_id))?;

            let close_room = {
                let mut room = room.lock().await;
                room.leave(handle);

                room.is_empty() && !room.metadata().persistent
            };

            if close_room {
                rooms.remove(&room_id);
                tracing::info!(room = %room_id, "room closed");
            }
        }

        self.publish_lobby().await;

        Ok(())
    }

    async fn publish_lobby(&self) {
        let rooms = self.list_rooms().await;

        // nobody listening is fine
        let _ = self
            .lobby_tx
            .send(Event::ListRoomsSuccess(ListRoomsReplyEvent { rooms }));
    }
}
