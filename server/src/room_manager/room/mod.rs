mod life_room;
mod user_registry;
mod user_session_handle;

pub use self::life_room::{LifeRoom, LifeRoomMetadata};
pub use self::user_session_handle::{SessionAndUserId, UserSessionHandle};
