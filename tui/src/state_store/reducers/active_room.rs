use comms::{
    action_type::ActionType,
    command::UserCommand,
    event::{Event, JoinedRoom},
};

use crate::state_store::StoreAction;

pub fn reduce(state: &mut Option<JoinedRoom>, action: &StoreAction) {
    match action {
        StoreAction::Received(Event::JoinRoomSuccess(reply)) => {
            *state = Some(reply.room.clone());
        }
        StoreAction::Sent(UserCommand::LeaveRoomRequest(_))
        | StoreAction::Received(Event::LeaveRoomSuccess(_)) => {
            *state = None;
        }
        // a failed (re)join means the room is not ours anymore
        StoreAction::Received(Event::Error(err)) if err.cause == ActionType::JoinRoomRequest => {
            *state = None;
        }
        _ => {}
    }
}
