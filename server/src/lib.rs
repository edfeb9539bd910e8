use std::sync::Arc;

use tokio::{net::TcpListener, sync::broadcast, task::JoinSet};

use crate::room_manager::RoomManager;

pub mod room_manager;
mod session;

/// Accepts connections on the listener and serves each of them as a user session
/// until a quit signal is received, then waits for every session to wind down
pub async fn serve(
    listener: TcpListener,
    room_manager: Arc<RoomManager>,
    mut quit_rx: broadcast::Receiver<()>,
) -> anyhow::Result<()> {
    let mut join_set: JoinSet<anyhow::Result<()>> = JoinSet::new();

    loop {
        tokio::select! {
            _ = quit_rx.recv() => {
                tracing::info!("server interrupted, gracefully shutting down");
                break;
            }
            Ok((socket, addr)) = listener.accept() => {
                tracing::debug!(%addr, "accepted connection");
                join_set.spawn(session::handle_user_session(room_manager.clone(), quit_rx.resubscribe(), socket));
            }
            // reap finished sessions so the set does not grow with every connection
            Some(finished) = join_set.join_next(), if !join_set.is_empty() => {
                if let Ok(Err(err)) = finished {
                    tracing::warn!("session failed: {:#}", err);
                }
            }
        }
    }

    while join_set.join_next().await.is_some() {}
    tracing::info!("server shut down");

    Ok(())
}
