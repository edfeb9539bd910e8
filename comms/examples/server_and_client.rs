use anyhow::Context;
use comms::{
    command::{self, UserCommand},
    event::{self, Event},
    transport,
};
use tokio::net::TcpListener;
use tokio_stream::StreamExt;

const PORT: usize = 8081;

async fn server_example() -> anyhow::Result<()> {
    // bind to the example port to wait for client connection
    let listener = TcpListener::bind(format!("0.0.0.0:{}", PORT))
        .await
        .expect("could not bind to the port");

    // accept the only client connection we will have
    let tcp_stream = match listener.accept().await {
        Ok((tcp_stream, _addr)) => tcp_stream,
        Err(e) => return Err(anyhow::anyhow!("failed to accept client: {}", e)),
    };

    // upgrade the connection to a websocket and split it for ease of use
    let (mut command_stream, mut event_writer) = transport::server::accept(tcp_stream).await?;

    // listen for commands from the client until the connection is closed
    while let Some(result) = command_stream.next().await {
        match result {
            Ok(UserCommand::ListRoomsRequest(_)) => {
                println!("SERVER: received a room listing request");

                event_writer
                    .write(&Event::ListRoomsSuccess(event::ListRoomsReplyEvent {
                        rooms: vec![event::RoomSummary {
                            id: "room-1".into(),
                            name: "Friday Night".into(),
                            user_count: 0,
                            locked: false,
                        }],
                    }))
                    .await?;
            }
            // client has sent a valid command which we could read and parse
            Ok(command) => println!("SERVER: received command: {:?}", command),
            // client has sent a command which we could not read or parse
            // could be a bug in the client, malicious client, breaking api changes etc.
            Err(e) => {
                println!("SERVER: failed to read command: {}", e);
                break;
            }
        }
    }

    Ok(())
}

async fn client_example() -> anyhow::Result<()> {
    // open a websocket to the server
    let (mut event_stream, mut command_writer) =
        transport::client::connect(&format!("ws://localhost:{}", PORT)).await?;

    command_writer
        .write(&UserCommand::ListRoomsRequest(command::ListRoomsCommand))
        .await?;

    // read the room listing from the server
    let rooms = match event_stream.next().await {
        Some(Ok(Event::ListRoomsSuccess(reply))) => reply.rooms,
        Some(Ok(event)) => return Err(anyhow::anyhow!("unexpected event: {:?}", event)),
        // server has sent an event which we could not read or parse
        Some(Err(e)) => return Err(e),
        // server has closed the connection, return an error
        None => return Err(anyhow::anyhow!("server closed the connection")),
    };
    println!("CLIENT: received rooms: {:?}", rooms);

    let room = rooms.first().context("server listed no rooms")?;
    command_writer
        .write(&UserCommand::JoinRoomRequest(command::JoinRoomCommand {
            room_id: room.id.clone(),
            password: None,
            user: event::User {
                id: "user-1".into(),
                name: "Alice".into(),
                life: 20,
            },
        }))
        .await?;

    command_writer.close().await?;

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let server = tokio::spawn(server_example());
    // give the server a moment to bind
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;

    client_example().await?;
    server.await.context("server example panicked")??;

    Ok(())
}
