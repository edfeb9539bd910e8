use circular_queue::CircularQueue;
use comms::{command::UserCommand, event::Event, event::User};

use crate::state_store::{state::RoomLogItem, StoreAction};

fn name_of<'a>(users: &'a [User], user_id: &str) -> Option<&'a str> {
    users
        .iter()
        .find(|user| user.id == user_id)
        .map(|user| user.name.as_str())
}

/// `other_users` is the slice as it was before the action
pub fn reduce(
    state: &mut CircularQueue<RoomLogItem>,
    action: &StoreAction,
    self_id: &str,
    other_users: &[User],
) {
    match action {
        StoreAction::Received(Event::JoinRoomSuccess(_))
        | StoreAction::Sent(UserCommand::LeaveRoomRequest(_))
        | StoreAction::Received(Event::LeaveRoomSuccess(_)) => state.clear(),
        StoreAction::Received(Event::UserJoined(event)) => {
            // renames and reconnects of a present user are not news
            if event.user.id != self_id && name_of(other_users, &event.user.id).is_none() {
                state.push(RoomLogItem::Joined {
                    name: event.user.name.clone(),
                });
            }
        }
        StoreAction::Received(Event::UserLeft(event)) => {
            if let Some(name) = name_of(other_users, &event.user_id) {
                state.push(RoomLogItem::Left { name: name.into() });
            }
        }
        StoreAction::Received(Event::SetLifeSuccess(event)) => {
            let Some(user) = other_users.iter().find(|user| user.id == event.user_id) else {
                return;
            };
            if user.life != event.life {
                state.push(RoomLogItem::LifeChanged {
                    name: user.name.clone(),
                    from: user.life,
                    to: event.life,
                });
            }
        }
        _ => {}
    }
}
