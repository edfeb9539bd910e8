use comms::{
    command::{self, UserCommand},
    event::{self, Event},
    transport,
};
use tokio::net::TcpListener;
use tokio_stream::StreamExt;

const PORT: usize = 8091;

fn alice() -> event::User {
    event::User {
        id: "user-id-1".into(),
        name: "alice".into(),
        life: 20,
    }
}

#[tokio::test]
async fn assert_server_client_transport() {
    // bind before the client tries to connect
    let listener = TcpListener::bind(format!("127.0.0.1:{}", PORT))
        .await
        .expect("could not bind to the port");

    let (server_collected_commands, client_collected_events) =
        tokio::join!(execute_server(listener), execute_client());

    assert!(server_collected_commands.is_ok());
    assert!(client_collected_events.is_ok());

    assert_eq!(
        server_collected_commands.unwrap(),
        vec![
            UserCommand::ListRoomsRequest(command::ListRoomsCommand),
            UserCommand::JoinRoomRequest(command::JoinRoomCommand {
                room_id: "room-1".into(),
                password: Some("secret".into()),
                user: alice(),
            }),
        ]
    );

    assert_eq!(
        client_collected_events.unwrap(),
        vec![Event::ListRoomsSuccess(event::ListRoomsReplyEvent {
            rooms: Vec::default(),
        })]
    );
}

async fn execute_server(listener: TcpListener) -> anyhow::Result<Vec<command::UserCommand>> {
    // accept the only client connection we will have
    let tcp_stream = match listener.accept().await {
        Ok((tcp_stream, _addr)) => tcp_stream,
        Err(e) => return Err(anyhow::anyhow!("failed to accept client: {}", e)),
    };

    // break the client connection into higher level API for ease of use
    let (mut command_stream, mut event_writer) = transport::server::accept(tcp_stream).await?;
    // store commands received from the client
    let mut collected_commands = Vec::new();

    // answer the room listing with an empty lobby
    event_writer
        .write(&Event::ListRoomsSuccess(event::ListRoomsReplyEvent {
            rooms: Vec::default(),
        }))
        .await?;

    // listen for commands from the client until the connection is closed
    while let Some(result) = command_stream.next().await {
        match result {
            // client has sent a valid command which we could read and parse
            Ok(command) => collected_commands.push(command),
            // client has sent a command which we could not read or parse
            // could be a bug in the client, malicious client, breaking api changes etc.
            Err(e) => return Err(anyhow::anyhow!("failed to read command: {}", e)),
        }
    }

    Ok(collected_commands)
}

async fn execute_client() -> anyhow::Result<Vec<event::Event>> {
    // open a websocket to the server
    let (mut event_stream, mut command_writer) =
        transport::client::connect(&format!("ws://127.0.0.1:{}", PORT)).await?;
    // store events received from the server
    let mut collected_events = Vec::new();

    command_writer
        .write(&UserCommand::ListRoomsRequest(command::ListRoomsCommand))
        .await?;

    // read the room listing from the server
    match event_stream.next().await {
        // server has sent a valid event which we could read and parse
        Some(Ok(event)) => collected_events.push(event),
        // server has sent an event which we could not read or parse
        // could be a bug in the server, malicious server, breaking api changes etc.
        Some(Err(e)) => return Err(anyhow::anyhow!("could not parse event: {}", e)),
        // server has closed the connection, return an error
        None => return Err(anyhow::anyhow!("server closed the connection")),
    }

    command_writer
        .write(&UserCommand::JoinRoomRequest(command::JoinRoomCommand {
            room_id: "room-1".into(),
            password: Some("secret".into()),
            user: alice(),
        }))
        .await?;

    // closing the socket ends the command stream on the server side
    command_writer.close().await?;

    // drain until the server acknowledges the close
    while let Some(Ok(event)) = event_stream.next().await {
        collected_events.push(event);
    }

    Ok(collected_events)
}
