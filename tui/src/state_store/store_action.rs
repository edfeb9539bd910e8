use comms::{action_type::ActionType, command::UserCommand, event::Event};

use super::Settings;

/// Everything the reducers react to.
///
/// Messages of the socket flow through here unchanged: inbound events as [StoreAction::Received]
/// and outbound commands as [StoreAction::Sent], right before they are written.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreAction {
    Received(Event),
    Sent(UserCommand),
    ConnectionOpened,
    ConnectionLost,
    IncrementLife,
    DecrementLife,
    ResetLife { life: i32 },
    SetName { name: String },
    AttemptRoom { room_id: String },
    CancelAttempt,
    UpdateSettings(Settings),
    MoveUser { user_id: String, offset: isize },
    ToggleExperiments,
    DismissToast,
}

impl StoreAction {
    pub fn action_type(&self) -> ActionType {
        match self {
            StoreAction::Received(event) => event.action_type(),
            StoreAction::Sent(command) => command.action_type(),
            StoreAction::ConnectionOpened => ActionType::ConnectionOpened,
            StoreAction::ConnectionLost => ActionType::ConnectionLost,
            StoreAction::IncrementLife => ActionType::IncrementLife,
            StoreAction::DecrementLife => ActionType::DecrementLife,
            StoreAction::ResetLife { .. } => ActionType::ResetLife,
            StoreAction::SetName { .. } => ActionType::SetName,
            StoreAction::AttemptRoom { .. } => ActionType::AttemptRoom,
            StoreAction::CancelAttempt => ActionType::CancelAttempt,
            StoreAction::UpdateSettings(_) => ActionType::UpdateSettings,
            StoreAction::MoveUser { .. } => ActionType::MoveUser,
            StoreAction::ToggleExperiments => ActionType::ToggleExperiments,
            StoreAction::DismissToast => ActionType::DismissToast,
        }
    }
}
