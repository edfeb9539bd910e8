use serde::{Deserialize, Serialize};

use crate::action_type::ActionType;

/// A participant of a room and their life total
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct User {
    /// Stable id of the user, generated by the client on first start
    #[serde(rename = "userId")]
    pub id: String,
    /// Display name
    pub name: String,
    /// Current life total
    pub life: i32,
}

/// A room as it is listed in the lobby
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummary {
    pub id: String,
    pub name: String,
    /// Number of distinct users in the room
    pub user_count: usize,
    /// Whether the room needs a password to join
    pub locked: bool,
}

/// A room the receiving user has joined
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinedRoom {
    pub id: String,
    pub name: String,
    /// Echo of the password the user joined with, kept so the client can rejoin after a reconnect
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Reply to a room listing, also broadcast to everybody whenever the lobby changes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListRoomsReplyEvent {
    pub rooms: Vec<RoomSummary>,
}

/// The user has joined a room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinRoomReplyEvent {
    /// The room that was joined
    pub room: JoinedRoom,
    /// Everybody in the room, the receiving user included
    pub users: Vec<User>,
}

/// The user has left a room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRoomReplyEvent {
    pub room_id: String,
}

/// Another user has joined a room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserJoinedBroadcastEvent {
    pub room_id: String,
    pub user: User,
}

/// A user has left a room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserLeftBroadcastEvent {
    pub room_id: String,
    pub user_id: String,
}

/// A user of a room has a new life total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifeChangedBroadcastEvent {
    pub room_id: String,
    pub user_id: String,
    pub life: i32,
}

/// A request could not be fulfilled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorReplyEvent {
    /// The kind of the request that failed
    pub cause: ActionType,
    /// Human readable reason
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
/// Events that can be sent to the client
/// Events are either replies to the receiving session or broadcasts of a room or of the lobby
pub enum Event {
    ListRoomsSuccess(ListRoomsReplyEvent),
    JoinRoomSuccess(JoinRoomReplyEvent),
    LeaveRoomSuccess(LeaveRoomReplyEvent),
    UserJoined(UserJoinedBroadcastEvent),
    UserLeft(UserLeftBroadcastEvent),
    SetLifeSuccess(LifeChangedBroadcastEvent),
    Error(ErrorReplyEvent),
}

impl Event {
    pub fn action_type(&self) -> ActionType {
        match self {
            Event::ListRoomsSuccess(_) => ActionType::ListRoomsSuccess,
            Event::JoinRoomSuccess(_) => ActionType::JoinRoomSuccess,
            Event::LeaveRoomSuccess(_) => ActionType::LeaveRoomSuccess,
            Event::UserJoined(_) => ActionType::UserJoined,
            Event::UserLeft(_) => ActionType::UserLeft,
            Event::SetLifeSuccess(_) => ActionType::SetLifeSuccess,
            Event::Error(_) => ActionType::Error,
        }
    }

    pub fn error(cause: ActionType, message: impl Into<String>) -> Self {
        Event::Error(ErrorReplyEvent {
            cause,
            message: message.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // given an event enum, and an expect string, asserts that event is serialized / deserialized appropiately
    fn assert_event_serialization(event: &Event, expected: &str) {
        let serialized = serde_json::to_string(&event).unwrap();
        assert_eq!(serialized, expected);
        let deserialized: Event = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, *event);
    }

    #[test]
    fn test_list_rooms_event() {
        let event = Event::ListRoomsSuccess(ListRoomsReplyEvent {
            rooms: vec![RoomSummary {
                id: "r1".to_string(),
                name: "friday".to_string(),
                user_count: 2,
                locked: true,
            }],
        });

        assert_event_serialization(
            &event,
            r#"{"type":"LIST_ROOMS_SUCCESS","rooms":[{"id":"r1","name":"friday","userCount":2,"locked":true}]}"#,
        );
    }

    #[test]
    fn test_join_room_event() {
        let event = Event::JoinRoomSuccess(JoinRoomReplyEvent {
            room: JoinedRoom {
                id: "r1".to_string(),
                name: "friday".to_string(),
                password: None,
            },
            users: vec![User {
                id: "u1".to_string(),
                name: "alice".to_string(),
                life: 20,
            }],
        });

        assert_event_serialization(
            &event,
            r#"{"type":"JOIN_ROOM_SUCCESS","room":{"id":"r1","name":"friday"},"users":[{"userId":"u1","name":"alice","life":20}]}"#,
        );
    }

    #[test]
    fn test_user_left_event() {
        let event = Event::UserLeft(UserLeftBroadcastEvent {
            room_id: "r1".to_string(),
            user_id: "u1".to_string(),
        });

        assert_event_serialization(&event, r#"{"type":"USER_LEFT","roomId":"r1","userId":"u1"}"#);
    }

    #[test]
    fn test_life_changed_event() {
        let event = Event::SetLifeSuccess(LifeChangedBroadcastEvent {
            room_id: "r1".to_string(),
            user_id: "u1".to_string(),
            life: -3,
        });

        assert_event_serialization(
            &event,
            r#"{"type":"SET_LIFE_SUCCESS","roomId":"r1","userId":"u1","life":-3}"#,
        );
    }

    #[test]
    fn test_error_event_names_its_cause() {
        let event = Event::error(ActionType::JoinRoomRequest, "wrong password");

        assert_event_serialization(
            &event,
            r#"{"type":"ERROR","cause":"JOIN_ROOM_REQUEST","message":"wrong password"}"#,
        );
        assert_eq!(event.action_type(), ActionType::Error);
    }
}
