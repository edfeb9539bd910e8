//! One reducer per slice of the [super::State] tree.
//!
//! A reducer only looks at its own slice and the action, plus read-only context it is handed explicitly.

pub mod active_room;
pub mod attempted_room;
pub mod connection_lost;
pub mod enable_experiments;
pub mod errors;
pub mod other_users;
pub mod room_log;
pub mod rooms;
pub mod self_user;
pub mod settings;
pub mod socket_connected;
pub mod toast;
pub mod user_sort_order;
