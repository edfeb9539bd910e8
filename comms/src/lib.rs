/// Discriminators shared by every message on the wire and every local store action
pub mod action_type;
/// Set of commands which the server can receive and process
pub mod command;
/// Set of events the server pushes to the clients, either as replies or room broadcasts
pub mod event;
/// Implementation of event and command transportation over WebSockets.
/// Requires 'server' or 'client' features to be enabled and will bring in tokio dependency alongside with other dependencies
pub mod transport;
