use comms::event::Event;

use crate::state_store::StoreAction;

pub fn reduce(state: &mut Option<String>, action: &StoreAction) {
    match action {
        StoreAction::AttemptRoom { room_id } => *state = Some(room_id.clone()),
        StoreAction::CancelAttempt | StoreAction::Received(Event::JoinRoomSuccess(_)) => {
            *state = None
        }
        _ => {}
    }
}
