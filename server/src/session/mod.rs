use std::sync::Arc;

use comms::{
    event::Event,
    transport::{
        self,
        server::{CommandStream, EventWriter},
    },
};
use nanoid::nanoid;
use tokio::{net::TcpStream, sync::broadcast};
use tokio_stream::StreamExt;

use crate::room_manager::RoomManager;

use self::life_session::LifeSession;

mod life_session;

/// How the event loop of a session came to an end
enum SessionEnd {
    /// The user closed the socket or sent something unreadable
    Closed,
    /// The server is shutting down
    Shutdown,
}

/// Given a tcp stream and a room manager, handles the user session
/// until the user closes the socket, or the socket breaks for some reason, or the server shuts down
pub async fn handle_user_session(
    room_manager: Arc<RoomManager>,
    mut quit_rx: broadcast::Receiver<()>,
    stream: TcpStream,
) -> anyhow::Result<()> {
    let session_id = nanoid!();
    // Upgrade to a websocket and split it into a command stream and an event writer with better ergonomics
    let (mut commands, mut event_writer) = transport::server::accept(stream).await?;
    // Every session hears about lobby changes, whether it has joined a room or not
    let mut lobby_rx = room_manager.subscribe_lobby();

    tracing::debug!(session = %session_id, "session started");

    // Life Session will abstract the room membership handling logic
    let mut life_session = LifeSession::new(&session_id, room_manager);

    let outcome = run_session(
        &session_id,
        &mut life_session,
        &mut commands,
        &mut event_writer,
        &mut lobby_rx,
        &mut quit_rx,
    )
    .await;

    match outcome {
        // Since the server is shutting down, we don't need to notify
        // other users about the user's departure or cleanup resources
        Ok(SessionEnd::Shutdown) => {}
        // Any other end, broken sockets included, must take the user out of the room
        // so the other users are notified about the user's departure
        Ok(SessionEnd::Closed) => life_session.leave_room().await?,
        Err(err) => {
            if let Err(leave_err) = life_session.leave_room().await {
                tracing::warn!(session = %session_id, "could not leave room: {:#}", leave_err);
            }

            return Err(err);
        }
    }

    tracing::debug!(session = %session_id, "session ended");

    Ok(())
}

async fn run_session(
    session_id: &str,
    life_session: &mut LifeSession,
    commands: &mut CommandStream,
    event_writer: &mut EventWriter,
    lobby_rx: &mut broadcast::Receiver<Event>,
    quit_rx: &mut broadcast::Receiver<()>,
) -> anyhow::Result<SessionEnd> {
    loop {
        tokio::select! {
            cmd = commands.next() => match cmd {
                None => return Ok(SessionEnd::Closed),
                Some(Ok(cmd)) => {
                    life_session.handle_user_command(cmd).await?;
                }
                // Unreadable frames end the session, the client reconnects and starts over
                Some(Err(err)) => {
                    tracing::warn!(session = %session_id, "closing session: {:#}", err);
                    return Ok(SessionEnd::Closed);
                }
            },
            // Replies and room broadcasts are sent to the user
            Ok(event) = life_session.recv() => {
                event_writer.write(&event).await?;
            }
            Ok(event) = lobby_rx.recv() => {
                event_writer.write(&event).await?;
            }
            // If the server is shutting down, we can just close the sockets
            Ok(_) = quit_rx.recv() => {
                let _ = event_writer.close().await;
                tracing::debug!(session = %session_id, "gracefully shutting down user socket");
                return Ok(SessionEnd::Shutdown);
            }
        }
    }
}
