use std::time::Duration;

use anyhow::Context;
use comms::{
    command::{JoinRoomCommand, ListRoomsCommand, UserCommand},
    transport::{
        self,
        client::{CommandWriter, EventStream},
    },
};

use super::{State, StoreAction};

/// Delay between a lost connection and the next attempt
pub const RETRY_TIMEOUT: Duration = Duration::from_secs(2);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

pub type ServerHandle = (EventStream, CommandWriter);

/// A single connection attempt, bounded so a silent host can not stall the store
pub async fn open(url: &str) -> anyhow::Result<ServerHandle> {
    tokio::time::timeout(CONNECT_TIMEOUT, transport::client::connect(url))
        .await
        .with_context(|| format!("timed out connecting to '{}'", url))?
}

/// What a fresh socket leads to: the action to dispatch and the commands to send, in order
pub fn on_open(state: &State) -> (Option<StoreAction>, Vec<UserCommand>) {
    let opened = (!state.socket_connected).then_some(StoreAction::ConnectionOpened);

    let mut commands = vec![UserCommand::ListRoomsRequest(ListRoomsCommand)];

    // back into the room we were in, or the one kept from the last run
    if let Some(room) = state.active_room.as_ref().or(state.stored_room.as_ref()) {
        commands.push(UserCommand::JoinRoomRequest(JoinRoomCommand {
            room_id: room.id.clone(),
            password: room.password.clone(),
            user: state.self_user.clone(),
        }));
    }

    (opened, commands)
}

/// Failed attempts while already disconnected stay quiet
pub fn on_close(state: &State) -> Option<StoreAction> {
    state.socket_connected.then_some(StoreAction::ConnectionLost)
}

#[cfg(test)]
mod tests {
    use comms::event::{JoinedRoom, User};

    use super::*;

    fn me() -> User {
        User {
            id: "u1".into(),
            name: "alice".into(),
            life: 17,
        }
    }

    fn room(id: &str) -> JoinedRoom {
        JoinedRoom {
            id: id.into(),
            name: id.to_uppercase(),
            password: Some("pw".into()),
        }
    }

    #[test]
    fn test_first_open_lists_rooms() {
        let state = State::new(me(), None, None);

        let (opened, commands) = on_open(&state);
        assert_eq!(opened, Some(StoreAction::ConnectionOpened));
        assert_eq!(
            commands,
            vec![UserCommand::ListRoomsRequest(ListRoomsCommand)]
        );
    }

    #[test]
    fn test_open_rejoins_stored_room() {
        let state = State::new(me(), Some(room("stored")), None);

        let (_, commands) = on_open(&state);
        assert_eq!(
            commands[1],
            UserCommand::JoinRoomRequest(JoinRoomCommand {
                room_id: "stored".into(),
                password: Some("pw".into()),
                user: me(),
            })
        );
    }

    #[test]
    fn test_active_room_wins_over_stored_room() {
        let mut state = State::new(me(), Some(room("stored")), None);
        state.active_room = Some(room("active"));
        state.socket_connected = true;

        let (opened, commands) = on_open(&state);
        assert_eq!(opened, None);
        assert!(matches!(
            &commands[1],
            UserCommand::JoinRoomRequest(cmd) if cmd.room_id == "active"
        ));
    }

    #[test]
    fn test_close_only_reports_a_live_connection() {
        let mut state = State::new(me(), None, None);
        assert_eq!(on_close(&state), None);

        state.socket_connected = true;
        assert_eq!(on_close(&state), Some(StoreAction::ConnectionLost));
    }
}
