pub mod action;
mod connection;
mod life_repeater;
mod reducers;
mod state;
#[allow(clippy::module_inception)]
mod state_store;
mod store_action;

pub use self::{state::*, state_store::StateStore, store_action::StoreAction};
