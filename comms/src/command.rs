use serde::{Deserialize, Serialize};

use crate::{action_type::ActionType, event::User};

/// User Command for listing the open rooms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListRoomsCommand;

/// User Command for opening a new room, the sender joins it right away.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomCommand {
    // The display name of the room.
    pub room_name: String,
    // Optional password other users will need to join.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    // The user opening the room.
    #[serde(flatten)]
    pub user: User,
}

/// User Command for joining a room. Carries the room credentials merged with the user's own record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRoomCommand {
    // The room to join.
    pub room_id: String,
    // The password of the room, if it has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    // The user joining.
    #[serde(flatten)]
    pub user: User,
}

/// User Command for publishing a new life total to the active room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetLifeCommand {
    // The room the user is active in.
    pub room_id: String,
    // The user with the new life total.
    #[serde(flatten)]
    pub user: User,
}

/// User Command for leaving a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRoomCommand {
    // The room to leave.
    pub room_id: String,
}

/// A user command which can be sent to the server by a single user session.
/// The tag of each command is one of the [ActionType] constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserCommand {
    ListRoomsRequest(ListRoomsCommand),
    CreateRoomRequest(CreateRoomCommand),
    JoinRoomRequest(JoinRoomCommand),
    SetLifeRequest(SetLifeCommand),
    LeaveRoomRequest(LeaveRoomCommand),
}

impl UserCommand {
    pub fn action_type(&self) -> ActionType {
        match self {
            UserCommand::ListRoomsRequest(_) => ActionType::ListRoomsRequest,
            UserCommand::CreateRoomRequest(_) => ActionType::CreateRoomRequest,
            UserCommand::JoinRoomRequest(_) => ActionType::JoinRoomRequest,
            UserCommand::SetLifeRequest(_) => ActionType::SetLifeRequest,
            UserCommand::LeaveRoomRequest(_) => ActionType::LeaveRoomRequest,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: "u1".to_string(),
            name: "alice".to_string(),
            life: 20,
        }
    }

    // given a command enum, and an expect string, asserts that command is serialized / deserialized appropiately
    fn assert_command_serialization(command: &UserCommand, expected: &str) {
        let serialized = serde_json::to_string(&command).unwrap();
        assert_eq!(serialized, expected);
        let deserialized: UserCommand = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, *command);
    }

    #[test]
    fn test_list_rooms_command() {
        let command = UserCommand::ListRoomsRequest(ListRoomsCommand);

        assert_command_serialization(&command, r#"{"type":"LIST_ROOMS_REQUEST"}"#);
    }

    #[test]
    fn test_join_command_merges_room_and_user() {
        let command = UserCommand::JoinRoomRequest(JoinRoomCommand {
            room_id: "r1".to_string(),
            password: Some("secret".to_string()),
            user: user(),
        });

        assert_command_serialization(
            &command,
            r#"{"type":"JOIN_ROOM_REQUEST","roomId":"r1","password":"secret","userId":"u1","name":"alice","life":20}"#,
        );
    }

    #[test]
    fn test_join_command_without_password() {
        let command = UserCommand::JoinRoomRequest(JoinRoomCommand {
            room_id: "r1".to_string(),
            password: None,
            user: user(),
        });

        assert_command_serialization(
            &command,
            r#"{"type":"JOIN_ROOM_REQUEST","roomId":"r1","userId":"u1","name":"alice","life":20}"#,
        );
    }

    #[test]
    fn test_create_command() {
        let command = UserCommand::CreateRoomRequest(CreateRoomCommand {
            room_name: "friday".to_string(),
            password: None,
            user: user(),
        });

        assert_command_serialization(
            &command,
            r#"{"type":"CREATE_ROOM_REQUEST","roomName":"friday","userId":"u1","name":"alice","life":20}"#,
        );
    }

    #[test]
    fn test_set_life_command() {
        let command = UserCommand::SetLifeRequest(SetLifeCommand {
            room_id: "r1".to_string(),
            user: User { life: 17, ..user() },
        });

        assert_command_serialization(
            &command,
            r#"{"type":"SET_LIFE_REQUEST","roomId":"r1","userId":"u1","name":"alice","life":17}"#,
        );
    }

    #[test]
    fn test_leave_command() {
        let command = UserCommand::LeaveRoomRequest(LeaveRoomCommand {
            room_id: "r1".to_string(),
        });

        assert_command_serialization(&command, r#"{"type":"LEAVE_ROOM_REQUEST","roomId":"r1"}"#);
        assert_eq!(command.action_type(), ActionType::LeaveRoomRequest);
    }

    #[test]
    fn test_unknown_fields_from_older_clients_are_ignored() {
        let deserialized: UserCommand = serde_json::from_str(
            r#"{"type":"SET_LIFE_REQUEST","roomId":"r1","name":"alice","userId":"u1","life":3,"userCount":2}"#,
        )
        .unwrap();

        assert_eq!(
            deserialized,
            UserCommand::SetLifeRequest(SetLifeCommand {
                room_id: "r1".to_string(),
                user: User { life: 3, ..user() },
            })
        );
    }
}
