use std::{sync::Arc, time::Duration};

use comms::{
    action_type::ActionType,
    command::{self, UserCommand},
    event::{Event, User},
    transport::{
        self,
        client::{CommandWriter, EventStream},
    },
};
use server::room_manager::{LifeRoomMetadata, RoomManagerBuilder};
use tokio::{net::TcpListener, sync::broadcast};
use tokio_stream::StreamExt;

const WAIT_FOR_EVENT: Duration = Duration::from_secs(5);

fn user(id: &str, life: i32) -> User {
    User {
        id: id.into(),
        name: id.into(),
        life,
    }
}

/// Starts a server on a random port, returns its url and the quit switch
async fn start_server() -> (String, broadcast::Sender<()>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("could not bind to a port");
    let addr = listener.local_addr().expect("listener has no address");
    let room_manager = Arc::new(
        RoomManagerBuilder::new()
            .create_room(LifeRoomMetadata::new(
                "locked",
                "Locked",
                Some("pw".into()),
                true,
            ))
            .build(),
    );
    let (quit_tx, quit_rx) = broadcast::channel(1);

    tokio::spawn(server::serve(listener, room_manager, quit_rx));

    (format!("ws://{}", addr), quit_tx)
}

/// Reads events until one matches, lobby updates and other noise are skipped
async fn expect_event<F>(events: &mut EventStream, mut predicate: F) -> Event
where
    F: FnMut(&Event) -> bool,
{
    tokio::time::timeout(WAIT_FOR_EVENT, async {
        loop {
            match events.next().await {
                Some(Ok(event)) if predicate(&event) => break event,
                Some(Ok(_)) => continue,
                Some(Err(err)) => panic!("could not read event: {:#}", err),
                None => panic!("server closed the connection"),
            }
        }
    })
    .await
    .expect("timed out waiting for event")
}

async fn connect(url: &str) -> (EventStream, CommandWriter) {
    transport::client::connect(url)
        .await
        .expect("could not connect to the server")
}

#[tokio::test]
async fn test_two_users_share_a_room() {
    let (url, _quit_tx) = start_server().await;
    let (mut alice_events, mut alice) = connect(&url).await;
    let (mut bob_events, mut bob) = connect(&url).await;

    alice
        .write(&UserCommand::CreateRoomRequest(command::CreateRoomCommand {
            room_name: "friday".into(),
            password: None,
            user: user("alice", 20),
        }))
        .await
        .unwrap();

    let room_id = match expect_event(&mut alice_events, |e| {
        matches!(e, Event::JoinRoomSuccess(_))
    })
    .await
    {
        Event::JoinRoomSuccess(reply) => reply.room.id,
        _ => unreachable!(),
    };

    // bob finds the room through the lobby
    bob.write(&UserCommand::ListRoomsRequest(command::ListRoomsCommand))
        .await
        .unwrap();
    expect_event(&mut bob_events, |e| match e {
        Event::ListRoomsSuccess(reply) => reply.rooms.iter().any(|r| r.id == room_id),
        _ => false,
    })
    .await;

    bob.write(&UserCommand::JoinRoomRequest(command::JoinRoomCommand {
        room_id: room_id.clone(),
        password: None,
        user: user("bob", 20),
    }))
    .await
    .unwrap();

    match expect_event(&mut bob_events, |e| matches!(e, Event::JoinRoomSuccess(_))).await {
        Event::JoinRoomSuccess(reply) => {
            let ids: Vec<&str> = reply.users.iter().map(|u| u.id.as_str()).collect();
            assert_eq!(ids, vec!["alice", "bob"]);
        }
        _ => unreachable!(),
    }

    expect_event(&mut alice_events, |e| {
        matches!(e, Event::UserJoined(joined) if joined.user.id == "bob")
    })
    .await;

    bob.write(&UserCommand::SetLifeRequest(command::SetLifeCommand {
        room_id: room_id.clone(),
        user: user("bob", 14),
    }))
    .await
    .unwrap();

    expect_event(&mut alice_events, |e| {
        matches!(e, Event::SetLifeSuccess(changed) if changed.user_id == "bob" && changed.life == 14)
    })
    .await;

    // dropping the connection is leaving the room
    bob.close().await.unwrap();
    drop(bob_events);

    expect_event(&mut alice_events, |e| {
        matches!(e, Event::UserLeft(left) if left.user_id == "bob")
    })
    .await;
}

#[tokio::test]
async fn test_join_with_wrong_password_fails() {
    let (url, _quit_tx) = start_server().await;
    let (mut events, mut writer) = connect(&url).await;

    writer
        .write(&UserCommand::JoinRoomRequest(command::JoinRoomCommand {
            room_id: "locked".into(),
            password: Some("guess".into()),
            user: user("mallory", 20),
        }))
        .await
        .unwrap();

    match expect_event(&mut events, |e| matches!(e, Event::Error(_))).await {
        Event::Error(err) => assert_eq!(err.cause, ActionType::JoinRoomRequest),
        _ => unreachable!(),
    }

    // the session survives the failed request
    writer
        .write(&UserCommand::JoinRoomRequest(command::JoinRoomCommand {
            room_id: "locked".into(),
            password: Some("pw".into()),
            user: user("mallory", 20),
        }))
        .await
        .unwrap();

    expect_event(&mut events, |e| matches!(e, Event::JoinRoomSuccess(_))).await;
}

#[tokio::test]
async fn test_reconnecting_user_is_not_announced_twice() {
    let (url, _quit_tx) = start_server().await;
    let (mut watcher_events, mut watcher) = connect(&url).await;
    let (_first_events, mut first) = connect(&url).await;

    watcher
        .write(&UserCommand::JoinRoomRequest(command::JoinRoomCommand {
            room_id: "locked".into(),
            password: Some("pw".into()),
            user: user("watcher", 20),
        }))
        .await
        .unwrap();
    expect_event(&mut watcher_events, |e| matches!(e, Event::JoinRoomSuccess(_))).await;

    first
        .write(&UserCommand::JoinRoomRequest(command::JoinRoomCommand {
            room_id: "locked".into(),
            password: Some("pw".into()),
            user: user("alice", 20),
        }))
        .await
        .unwrap();
    expect_event(&mut watcher_events, |e| {
        matches!(e, Event::UserJoined(joined) if joined.user.id == "alice")
    })
    .await;

    // a second connection of alice overlaps the first one
    let (mut second_events, mut second) = connect(&url).await;
    second
        .write(&UserCommand::JoinRoomRequest(command::JoinRoomCommand {
            room_id: "locked".into(),
            password: Some("pw".into()),
            user: user("alice", 20),
        }))
        .await
        .unwrap();
    expect_event(&mut second_events, |e| matches!(e, Event::JoinRoomSuccess(_))).await;

    // the first connection going away does not remove alice from the room
    first.close().await.unwrap();

    second
        .write(&UserCommand::SetLifeRequest(command::SetLifeCommand {
            room_id: "locked".into(),
            user: user("alice", 9),
        }))
        .await
        .unwrap();

    // the next alice related event the watcher sees is the life change, not a departure
    let event = expect_event(&mut watcher_events, |e| match e {
        Event::UserLeft(left) => left.user_id == "alice",
        Event::SetLifeSuccess(changed) => changed.user_id == "alice",
        _ => false,
    })
    .await;
    assert!(matches!(event, Event::SetLifeSuccess(changed) if changed.life == 9));
}

#[tokio::test]
async fn test_member_dropped_during_room_traffic_is_announced_as_left() {
    let (url, _quit_tx) = start_server().await;
    let (mut watcher_events, mut watcher) = connect(&url).await;
    let (mut bob_events, mut bob) = connect(&url).await;

    watcher
        .write(&UserCommand::JoinRoomRequest(command::JoinRoomCommand {
            room_id: "locked".into(),
            password: Some("pw".into()),
            user: user("watcher", 20),
        }))
        .await
        .unwrap();
    expect_event(&mut watcher_events, |e| matches!(e, Event::JoinRoomSuccess(_))).await;

    bob.write(&UserCommand::JoinRoomRequest(command::JoinRoomCommand {
        room_id: "locked".into(),
        password: Some("pw".into()),
        user: user("bob", 20),
    }))
    .await
    .unwrap();
    expect_event(&mut bob_events, |e| matches!(e, Event::JoinRoomSuccess(_))).await;

    // bob vanishes without a closing handshake
    drop(bob_events);
    drop(bob);

    // room traffic keeps flowing towards the broken socket
    for life in (0..20).rev() {
        watcher
            .write(&UserCommand::SetLifeRequest(command::SetLifeCommand {
                room_id: "locked".into(),
                user: user("watcher", life),
            }))
            .await
            .unwrap();
    }

    expect_event(&mut watcher_events, |e| {
        matches!(e, Event::UserLeft(left) if left.user_id == "bob")
    })
    .await;

    // the room no longer counts bob
    watcher
        .write(&UserCommand::ListRoomsRequest(command::ListRoomsCommand))
        .await
        .unwrap();
    expect_event(&mut watcher_events, |e| match e {
        Event::ListRoomsSuccess(reply) => reply
            .rooms
            .iter()
            .any(|r| r.id == "locked" && r.user_count == 1),
        _ => false,
    })
    .await;
}
