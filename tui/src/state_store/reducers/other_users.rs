use comms::{command::UserCommand, event::Event, event::User};

use crate::state_store::StoreAction;

pub fn reduce(state: &mut Vec<User>, action: &StoreAction, self_id: &str) {
    match action {
        StoreAction::Received(Event::JoinRoomSuccess(reply)) => {
            *state = reply
                .users
                .iter()
                .filter(|user| user.id != self_id)
                .cloned()
                .collect();
        }
        StoreAction::Received(Event::UserJoined(event)) if event.user.id != self_id => {
            match state.iter_mut().find(|user| user.id == event.user.id) {
                Some(existing) => *existing = event.user.clone(),
                None => state.push(event.user.clone()),
            }
        }
        StoreAction::Received(Event::UserLeft(event)) => {
            state.retain(|user| user.id != event.user_id);
        }
        StoreAction::Received(Event::SetLifeSuccess(event)) => {
            if let Some(user) = state.iter_mut().find(|user| user.id == event.user_id) {
                user.life = event.life;
            }
        }
        StoreAction::Sent(UserCommand::LeaveRoomRequest(_))
        | StoreAction::Received(Event::LeaveRoomSuccess(_)) => state.clear(),
        _ => {}
    }
}
