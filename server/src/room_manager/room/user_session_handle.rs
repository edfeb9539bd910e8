#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionAndUserId {
    pub session_id: String,
    pub user_id: String,
}

#[derive(Debug)]
/// [UserSessionHandle] ties a specific user/session pair to the room it has joined.
///
/// It is created when a user joins a room and is handed out to the session.
/// Handing it back to the room manager is the only way to leave the room.
pub struct UserSessionHandle {
    /// The id of the room which is associated with this handle
    room: String,
    /// The session and user id associated with this handle
    session_and_user_id: SessionAndUserId,
}

impl UserSessionHandle {
    pub(super) fn new(room: String, session_and_user_id: SessionAndUserId) -> Self {
        UserSessionHandle {
            room,
            session_and_user_id,
        }
    }

    pub fn room(&self) -> &str {
        &self.room
    }

    pub fn session_id(&self) -> &str {
        &self.session_and_user_id.session_id
    }

    pub fn user_id(&self) -> &str {
        &self.session_and_user_id.user_id
    }
}
