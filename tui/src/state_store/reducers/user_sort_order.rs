use comms::{command::UserCommand, event::Event};

use crate::state_store::StoreAction;

pub fn reduce(state: &mut Vec<String>, action: &StoreAction, self_id: &str) {
    match action {
        StoreAction::Received(Event::JoinRoomSuccess(reply)) => {
            *state = reply
                .users
                .iter()
                .filter(|user| user.id != self_id)
                .map(|user| user.id.clone())
                .collect();
        }
        StoreAction::Received(Event::UserJoined(event)) => {
            if event.user.id != self_id && !state.contains(&event.user.id) {
                state.push(event.user.id.clone());
            }
        }
        StoreAction::Received(Event::UserLeft(event)) => {
            state.retain(|id| id != &event.user_id);
        }
        StoreAction::MoveUser { user_id, offset } => {
            let Some(from) = state.iter().position(|id| id == user_id) else {
                return;
            };
            let to = from
                .saturating_add_signed(*offset)
                .min(state.len().saturating_sub(1));

            let id = state.remove(from);
            state.insert(to, id);
        }
        StoreAction::Sent(UserCommand::LeaveRoomRequest(_))
        | StoreAction::Received(Event::LeaveRoomSuccess(_)) => state.clear(),
        _ => {}
    }
}
