use comms::event::{self, Event, RoomSummary, User};
use tokio::sync::broadcast;

use super::{
    user_registry::{Registration, UserRegistry},
    user_session_handle::UserSessionHandle,
    SessionAndUserId,
};

#[derive(Debug, Clone)]
/// [LifeRoomMetadata] holds the metadata that identifies a room
pub struct LifeRoomMetadata {
    pub id: String,
    pub name: String,
    pub password: Option<String>,
    /// Persistent rooms stay listed after their last user leaves
    pub persistent: bool,
}

impl LifeRoomMetadata {
    pub fn new(id: &str, name: &str, password: Option<String>, persistent: bool) -> Self {
        LifeRoomMetadata {
            id: String::from(id),
            name: String::from(name),
            password,
            persistent,
        }
    }
}

const BROADCAST_CHANNEL_CAPACITY: usize = 100;

#[derive(Debug)]
/// [LifeRoom] handles the participants of a room, their life totals and the room broadcast channel
/// A [UserSessionHandle] is handed out to a session when it joins the room
pub struct LifeRoom {
    metadata: LifeRoomMetadata,
    broadcast_tx: broadcast::Sender<Event>,
    user_registry: UserRegistry,
}

impl LifeRoom {
    pub fn new(metadata: LifeRoomMetadata) -> Self {
        let (broadcast_tx, _) = broadcast::channel(BROADCAST_CHANNEL_CAPACITY);

        LifeRoom {
            metadata,
            broadcast_tx,
            user_registry: UserRegistry::new(),
        }
    }

    pub fn metadata(&self) -> &LifeRoomMetadata {
        &self.metadata
    }

    pub fn summary(&self) -> RoomSummary {
        RoomSummary {
            id: self.metadata.id.clone(),
            name: self.metadata.name.clone(),
            user_count: self.user_registry.len(),
            locked: self.metadata.password.is_some(),
        }
    }

    pub fn users(&self) -> Vec<User> {
        self.user_registry.users()
    }

    pub fn is_empty(&self) -> bool {
        self.user_registry.is_empty()
    }

    /// Checks the password given by a joining user against the room password
    pub fn check_password(&self, password: Option<&str>) -> anyhow::Result<()> {
        match self.metadata.password.as_deref() {
            Some(expected) if Some(expected) != password => Err(anyhow::anyhow!(
                "wrong password for room '{}'",
                self.metadata.name
            )),
            _ => Ok(()),
        }
    }

    /// Add a participant to the room and broadcast their arrival or their updated record
    ///
    /// # Returns
    ///
    /// - A broadcast receiver for the user to receive events from the room
    /// - A [UserSessionHandle] for the user to be able to interact with the room
    pub fn join(
        &mut self,
        session_and_user_id: &SessionAndUserId,
        user: User,
    ) -> (broadcast::Receiver<Event>, UserSessionHandle) {
        let broadcast_rx = self.broadcast_tx.subscribe();
        let user_session_handle =
            UserSessionHandle::new(self.metadata.id.clone(), session_and_user_id.clone());

        // Both new users and users that came back with a different record are announced,
        // clients upsert the user either way
        match self.user_registry.insert(&user_session_handle, user.clone()) {
            Registration::NewUser | Registration::UpdatedUser => {
                let _ = self
                    .broadcast_tx
                    .send(Event::UserJoined(event::UserJoinedBroadcastEvent {
                        room_id: self.metadata.id.clone(),
                        user,
                    }));
            }
            Registration::Unchanged => {}
        }

        (broadcast_rx, user_session_handle)
    }

    /// Record a new life total for the user behind the handle and broadcast it
    pub fn set_life(&mut self, user_session_handle: &UserSessionHandle, life: i32) -> anyhow::Result<()> {
        if !self
            .user_registry
            .set_life(user_session_handle.user_id(), life)
        {
            return Err(anyhow::anyhow!(
                "user '{}' is not in room '{}'",
                user_session_handle.user_id(),
                self.metadata.name
            ));
        }

        let _ = self
            .broadcast_tx
            .send(Event::SetLifeSuccess(event::LifeChangedBroadcastEvent {
                room_id: self.metadata.id.clone(),
                user_id: String::from(user_session_handle.user_id()),
                life,
            }));

        Ok(())
    }

    /// Remove a participant from the room and broadcast that they left
    /// Consume the [UserSessionHandle] to drop it
    pub fn leave(&mut self, user_session_handle: UserSessionHandle) {
        if self.user_registry.remove(&user_session_handle) {
            let _ = self
                .broadcast_tx
                .send(Event::UserLeft(event::UserLeftBroadcastEvent {
                    room_id: self.metadata.id.clone(),
                    user_id: String::from(user_session_handle.user_id()),
                }));
        }
    }
}
