use comms::{action_type::ActionType, event::Event};

use crate::state_store::{state::Errors, StoreAction};

/// Keeps the message of the last failed request of one kind
pub struct ErrorReducer {
    /// Kind of the request whose failures are kept
    pub cause: ActionType,
    /// Kind of the action that makes a kept failure obsolete
    pub cleared_by: ActionType,
}

impl ErrorReducer {
    pub fn reduce(&self, state: &mut Option<String>, action: &StoreAction) {
        match action {
            StoreAction::Received(Event::Error(err)) if err.cause == self.cause => {
                *state = Some(err.message.clone());
            }
            _ => {
                let kind = action.action_type();
                if kind == self.cleared_by || kind == self.cause {
                    *state = None;
                }
            }
        }
    }
}

const JOIN_ROOM: ErrorReducer = ErrorReducer {
    cause: ActionType::JoinRoomRequest,
    cleared_by: ActionType::JoinRoomSuccess,
};

const CREATE_ROOM: ErrorReducer = ErrorReducer {
    cause: ActionType::CreateRoomRequest,
    cleared_by: ActionType::JoinRoomSuccess,
};

pub fn reduce(state: &mut Errors, action: &StoreAction) {
    JOIN_ROOM.reduce(&mut state.join_room, action);
    CREATE_ROOM.reduce(&mut state.create_room, action);
}

#[cfg(test)]
mod tests {
    use comms::command::{JoinRoomCommand, UserCommand};

    use super::*;
    use crate::state_store::reducers::fixtures::{join_success, user};

    fn failure(cause: ActionType, message: &str) -> StoreAction {
        StoreAction::Received(Event::error(cause, message))
    }

    #[test]
    fn test_failure_is_kept_under_its_cause() {
        let mut errors = Errors::default();

        reduce(&mut errors, &failure(ActionType::JoinRoomRequest, "Wrong password"));
        reduce(&mut errors, &failure(ActionType::SetLifeRequest, "Not in room"));

        assert_eq!(errors.join_room.as_deref(), Some("Wrong password"));
        assert_eq!(errors.create_room, None);
    }

    #[test]
    fn test_cleared_by_success() {
        let mut errors = Errors {
            join_room: Some("Wrong password".into()),
            create_room: Some("Name required".into()),
        };

        reduce(&mut errors, &join_success("r1", vec![user("me", 20)]));
        assert_eq!(errors, Errors::default());
    }

    #[test]
    fn test_cleared_by_new_attempt() {
        let mut errors = Errors {
            join_room: Some("Wrong password".into()),
            create_room: None,
        };

        reduce(
            &mut errors,
            &StoreAction::Sent(UserCommand::JoinRoomRequest(JoinRoomCommand {
                room_id: "r1".into(),
                password: Some("pw".into()),
                user: user("me", 20),
            })),
        );
        assert_eq!(errors.join_room, None);
    }
}
