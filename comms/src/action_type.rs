use serde::{Deserialize, Serialize};

/// Every `type` a message can carry.
///
/// The wire kinds are the tags of [crate::command::UserCommand] and [crate::event::Event].
/// The remaining kinds never leave the client, they only flow through its store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    ListRoomsRequest,
    ListRoomsSuccess,
    CreateRoomRequest,
    JoinRoomRequest,
    JoinRoomSuccess,
    LeaveRoomRequest,
    LeaveRoomSuccess,
    SetLifeRequest,
    SetLifeSuccess,
    UserJoined,
    UserLeft,
    Error,
    // local only
    ConnectionOpened,
    ConnectionLost,
    IncrementLife,
    DecrementLife,
    ResetLife,
    SetName,
    AttemptRoom,
    CancelAttempt,
    UpdateSettings,
    MoveUser,
    ToggleExperiments,
    DismissToast,
}

impl ActionType {
    /// Whether messages of this kind are ever written to the socket
    pub fn is_local(&self) -> bool {
        !matches!(
            self,
            ActionType::ListRoomsRequest
                | ActionType::ListRoomsSuccess
                | ActionType::CreateRoomRequest
                | ActionType::JoinRoomRequest
                | ActionType::JoinRoomSuccess
                | ActionType::LeaveRoomRequest
                | ActionType::LeaveRoomSuccess
                | ActionType::SetLifeRequest
                | ActionType::SetLifeSuccess
                | ActionType::UserJoined
                | ActionType::UserLeft
                | ActionType::Error
        )
    }
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ActionType {
    /// The constant as it appears in the `type` field of a message
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::ListRoomsRequest => "LIST_ROOMS_REQUEST",
            ActionType::ListRoomsSuccess => "LIST_ROOMS_SUCCESS",
            ActionType::CreateRoomRequest => "CREATE_ROOM_REQUEST",
            ActionType::JoinRoomRequest => "JOIN_ROOM_REQUEST",
            ActionType::JoinRoomSuccess => "JOIN_ROOM_SUCCESS",
            ActionType::LeaveRoomRequest => "LEAVE_ROOM_REQUEST",
            ActionType::LeaveRoomSuccess => "LEAVE_ROOM_SUCCESS",
            ActionType::SetLifeRequest => "SET_LIFE_REQUEST",
            ActionType::SetLifeSuccess => "SET_LIFE_SUCCESS",
            ActionType::UserJoined => "USER_JOINED",
            ActionType::UserLeft => "USER_LEFT",
            ActionType::Error => "ERROR",
            ActionType::ConnectionOpened => "CONNECTION_OPENED",
            ActionType::ConnectionLost => "CONNECTION_LOST",
            ActionType::IncrementLife => "INCREMENT_LIFE",
            ActionType::DecrementLife => "DECREMENT_LIFE",
            ActionType::ResetLife => "RESET_LIFE",
            ActionType::SetName => "SET_NAME",
            ActionType::AttemptRoom => "ATTEMPT_ROOM",
            ActionType::CancelAttempt => "CANCEL_ATTEMPT",
            ActionType::UpdateSettings => "UPDATE_SETTINGS",
            ActionType::MoveUser => "MOVE_USER",
            ActionType::ToggleExperiments => "TOGGLE_EXPERIMENTS",
            ActionType::DismissToast => "DISMISS_TOAST",
        }
    }
}
