use circular_queue::CircularQueue;
use comms::event::{JoinedRoom, RoomSummary, User};
use serde::{Deserialize, Serialize};

use super::{reducers, StoreAction};

pub const DEFAULT_STARTING_LIFE: i32 = 20;
const MAX_ROOM_LOG_ITEMS: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Life total a reset goes back to
    pub starting_life: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            starting_life: DEFAULT_STARTING_LIFE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    /// Stays up until replaced or dismissed
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Increases with every raised toast, tells a new toast from an identical earlier one
    pub id: u64,
    pub level: ToastLevel,
    pub message: String,
}

/// Error messages keyed by the request they belong to
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Errors {
    pub join_room: Option<String>,
    pub create_room: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomLogItem {
    Joined { name: String },
    Left { name: String },
    LifeChanged { name: String, from: i32, to: i32 },
}

/// State holds the state of the application
#[derive(Debug, Clone)]
pub struct State {
    /// Rooms of the lobby, unknown until the server lists them
    pub rooms: Option<Vec<RoomSummary>>,
    /// The room the user takes part in
    pub active_room: Option<JoinedRoom>,
    /// The room the user picked from the list and is about to join
    pub attempted_room: Option<String>,
    /// The user of this client
    pub self_user: User,
    /// Everybody else in the active room
    pub other_users: Vec<User>,
    /// The room joined last time, as loaded from the local storage
    pub stored_room: Option<JoinedRoom>,
    /// The settings of last time, as loaded from the local storage
    pub stored_settings: Option<Settings>,
    pub socket_connected: bool,
    /// A connection was lost and none has been opened since
    pub connection_lost: bool,
    pub settings: Settings,
    /// Ids of the other users in the order the user arranged them
    pub user_sort_order: Vec<String>,
    pub enable_experiments: bool,
    pub toast: Option<Toast>,
    pub errors: Errors,
    /// Recent activity of the active room
    pub room_log: CircularQueue<RoomLogItem>,
}

impl State {
    /// Initial state, hydrated with what was kept in the local storage
    pub fn new(
        self_user: User,
        stored_room: Option<JoinedRoom>,
        stored_settings: Option<Settings>,
    ) -> Self {
        let settings = stored_settings.clone().unwrap_or_default();

        State {
            rooms: None,
            active_room: None,
            attempted_room: None,
            self_user,
            other_users: Vec::new(),
            stored_room,
            stored_settings,
            socket_connected: false,
            connection_lost: false,
            settings,
            user_sort_order: Vec::new(),
            enable_experiments: false,
            toast: None,
            errors: Errors::default(),
            room_log: CircularQueue::with_capacity(MAX_ROOM_LOG_ITEMS),
        }
    }

    /// Runs the action through every reducer of the tree
    pub fn dispatch(&mut self, action: &StoreAction) {
        // the log reads the other users as they were before the action
        reducers::room_log::reduce(
            &mut self.room_log,
            action,
            &self.self_user.id,
            &self.other_users,
        );
        reducers::rooms::reduce(&mut self.rooms, action);
        reducers::active_room::reduce(&mut self.active_room, action);
        reducers::attempted_room::reduce(&mut self.attempted_room, action);
        reducers::self_user::reduce(&mut self.self_user, action);
        reducers::other_users::reduce(&mut self.other_users, action, &self.self_user.id);
        // the toast reads whether the connection was lost before the action
        reducers::toast::reduce(&mut self.toast, action, self.connection_lost);
        reducers::connection_lost::reduce(&mut self.connection_lost, action);
        reducers::socket_connected::reduce(&mut self.socket_connected, action);
        reducers::settings::reduce(&mut self.settings, action);
        reducers::user_sort_order::reduce(&mut self.user_sort_order, action, &self.self_user.id);
        reducers::enable_experiments::reduce(&mut self.enable_experiments, action);
        reducers::errors::reduce(&mut self.errors, action);
    }

    /// The other users in display order: by life total while experiments are on, as arranged otherwise
    pub fn ordered_other_users(&self) -> Vec<&User> {
        let mut users: Vec<&User> = self.other_users.iter().collect();

        if self.enable_experiments {
            users.sort_by(|a, b| b.life.cmp(&a.life).then_with(|| a.name.cmp(&b.name)));
        } else {
            let position = |user: &User| {
                self.user_sort_order
                    .iter()
                    .position(|id| id == &user.id)
                    .unwrap_or(usize::MAX)
            };
            users.sort_by_key(|user| position(user));
        }

        users
    }

    /// Looks up a listed room
    pub fn room(&self, room_id: &str) -> Option<&RoomSummary> {
        self.rooms
            .as_ref()
            .and_then(|rooms| rooms.iter().find(|room| room.id == room_id))
    }
}
