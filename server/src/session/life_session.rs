use std::sync::Arc;

use anyhow::Context;
use comms::{
    action_type::ActionType,
    command::{JoinRoomCommand, UserCommand},
    event::{self, Event},
};
use tokio::{
    sync::{broadcast::error::RecvError, mpsc},
    task::{AbortHandle, JoinSet},
};

use crate::room_manager::{RoomManager, SessionAndUserId, UserSessionHandle};

pub(super) struct LifeSession {
    session_id: String,
    room_manager: Arc<RoomManager>,
    /// The room this session takes part in, a session is in at most one room
    joined_room: Option<(UserSessionHandle, AbortHandle)>,
    join_set: JoinSet<()>,
    /// Replies and forwarded room broadcasts, in the order they are sent to the user
    mpsc_tx: mpsc::UnboundedSender<Event>,
    mpsc_rx: mpsc::UnboundedReceiver<Event>,
}

impl LifeSession {
    pub fn new(session_id: &str, room_manager: Arc<RoomManager>) -> Self {
        let (mpsc_tx, mpsc_rx) = mpsc::unbounded_channel();

        LifeSession {
            session_id: String::from(session_id),
            room_manager,
            joined_room: None,
            join_set: JoinSet::new(),
            mpsc_tx,
            mpsc_rx,
        }
    }

    /// Handle a user command. Failures that concern only the request are replied as [Event::Error],
    /// an `Err` is returned only when the session itself cannot go on
    pub async fn handle_user_command(&mut self, cmd: UserCommand) -> anyhow::Result<()> {
        let cause = cmd.action_type();

        let result = match cmd {
            UserCommand::ListRoomsRequest(_) => {
                let rooms = self.room_manager.list_rooms().await;

                self.reply(Event::ListRoomsSuccess(event::ListRoomsReplyEvent { rooms }))
            }
            UserCommand::CreateRoomRequest(cmd) => {
                match self
                    .room_manager
                    .create_room(&cmd.room_name, cmd.password.clone())
                    .await
                {
                    Ok(metadata) => {
                        self.join_room(JoinRoomCommand {
                            room_id: metadata.id,
                            password: cmd.password,
                            user: cmd.user,
                        })
                        .await
                    }
                    Err(err) => Err(err),
                }
            }
            UserCommand::JoinRoomRequest(cmd) => self.join_room(cmd).await,
            UserCommand::SetLifeRequest(cmd) => match self.joined_room.as_ref() {
                Some((handle, _))
                    if handle.room() == cmd.room_id && handle.user_id() == cmd.user.id =>
                {
                    self.room_manager.set_life(handle, cmd.user.life).await
                }
                _ => Err(anyhow::anyhow!("not in room '{}'", cmd.room_id)),
            },
            UserCommand::LeaveRoomRequest(cmd) => {
                let is_joined = self
                    .joined_room
                    .as_ref()
                    .map(|(handle, _)| handle.room() == cmd.room_id)
                    .unwrap_or(false);

                if is_joined {
                    self.leave_room().await?;
                }

                self.reply(Event::LeaveRoomSuccess(event::LeaveRoomReplyEvent {
                    room_id: cmd.room_id,
                }))
            }
        };

        if let Err(err) = result {
            tracing::debug!(session = %self.session_id, %cause, "request failed: {:#}", err);

            self.reply(Event::error(cause, err.to_string()))?;
        }

        Ok(())
    }

    /// Join a room on behalf of the user, switching rooms if the session was in another one
    async fn join_room(&mut self, cmd: JoinRoomCommand) -> anyhow::Result<()> {
        let session_and_user_id = SessionAndUserId {
            session_id: self.session_id.clone(),
            user_id: cmd.user.id.clone(),
        };

        let (mut broadcast_rx, user_session_handle, reply) = self
            .room_manager
            .join_room(
                &cmd.room_id,
                cmd.password.as_deref(),
                &session_and_user_id,
                cmd.user,
            )
            .await?;

        // the old membership is only released once the new one is in place
        if let Some((previous_handle, previous_abort_handle)) = self.joined_room.take() {
            let same_membership = previous_handle.room() == user_session_handle.room()
                && previous_handle.user_id() == user_session_handle.user_id();

            if same_membership {
                // the registry already counts this session, only the forwarder is replaced
                previous_abort_handle.abort();
            } else {
                self.cleanup_room((previous_handle, previous_abort_handle))
                    .await?;
            }
        }

        // start with sending the join reply to the user, then forward the room broadcasts
        // hence the user can receive its replies and the room events via single channel
        self.reply(Event::JoinRoomSuccess(reply))?;

        let abort_handle = self.join_set.spawn({
            let mpsc_tx = self.mpsc_tx.clone();
            let session_id = self.session_id.clone();

            async move {
                loop {
                    match broadcast_rx.recv().await {
                        Ok(event) => {
                            if mpsc_tx.send(event).is_err() {
                                break;
                            }
                        }
                        Err(RecvError::Lagged(skipped)) => {
                            tracing::warn!(session = %session_id, skipped, "session fell behind its room");
                        }
                        Err(RecvError::Closed) => break,
                    }
                }
            }
        });

        tracing::info!(
            session = %self.session_id,
            user = %session_and_user_id.user_id,
            room = %user_session_handle.room(),
            "user joined room"
        );

        self.joined_room = Some((user_session_handle, abort_handle));

        Ok(())
    }

    /// Leave the room the session is currently participating in, if any
    pub async fn leave_room(&mut self) -> anyhow::Result<()> {
        if let Some(joined_room) = self.joined_room.take() {
            self.cleanup_room(joined_room).await?;
        }

        Ok(())
    }

    /// Cleanup the room by removing the user from the room and
    /// aborting the task that forwards broadcasted events to the user
    async fn cleanup_room(
        &mut self,
        (user_session_handle, abort_handle): (UserSessionHandle, AbortHandle),
    ) -> anyhow::Result<()> {
        tracing::info!(
            session = %self.session_id,
            user = %user_session_handle.user_id(),
            room = %user_session_handle.room(),
            "user left room"
        );

        abort_handle.abort();

        self.room_manager
            .drop_user_session_handle(user_session_handle)
            .await
    }

    fn reply(&self, event: Event) -> anyhow::Result<()> {
        self.mpsc_tx
            .send(event)
            .context("could not queue the reply")
    }

    /// Receive an event that is either a reply to this session or a broadcast of the joined room
    pub async fn recv(&mut self) -> anyhow::Result<Event> {
        self.mpsc_rx
            .recv()
            .await
            .context("could not recv from the session channel")
    }

    #[cfg(test)]
    fn joined_room_id(&self) -> Option<&str> {
        self.joined_room.as_ref().map(|(handle, _)| handle.room())
    }
}

#[cfg(test)]
mod tests {
    use comms::{
        command::{CreateRoomCommand, LeaveRoomCommand, SetLifeCommand},
        event::User,
    };

    use super::*;
    use crate::room_manager::{LifeRoomMetadata, RoomManagerBuilder};

    fn user(id: &str, life: i32) -> User {
        User {
            id: id.into(),
            name: id.into(),
            life,
        }
    }

    fn manager() -> Arc<RoomManager> {
        Arc::new(
            RoomManagerBuilder::new()
                .create_room(LifeRoomMetadata::new("a", "A", None, true))
                .create_room(LifeRoomMetadata::new("b", "B", Some("pw".into()), true))
                .build(),
        )
    }

    fn join(room_id: &str, password: Option<&str>, user: User) -> UserCommand {
        UserCommand::JoinRoomRequest(JoinRoomCommand {
            room_id: room_id.into(),
            password: password.map(String::from),
            user,
        })
    }

    #[tokio::test]
    async fn test_wrong_password_is_replied_as_error() {
        let mut session = LifeSession::new("s1", manager());

        session
            .handle_user_command(join("b", Some("nope"), user("u1", 20)))
            .await
            .unwrap();

        match session.recv().await.unwrap() {
            Event::Error(err) => assert_eq!(err.cause, ActionType::JoinRoomRequest),
            other => panic!("unexpected event: {:?}", other),
        }
        assert_eq!(session.joined_room_id(), None);
    }

    #[tokio::test]
    async fn test_switching_rooms_leaves_the_previous_one() {
        let manager = manager();
        let mut session = LifeSession::new("s1", manager.clone());

        session
            .handle_user_command(join("a", None, user("u1", 20)))
            .await
            .unwrap();
        session
            .handle_user_command(join("b", Some("pw"), user("u1", 20)))
            .await
            .unwrap();

        assert_eq!(session.joined_room_id(), Some("b"));
        let rooms = manager.list_rooms().await;
        assert_eq!(rooms.iter().find(|r| r.id == "a").unwrap().user_count, 0);
        assert_eq!(rooms.iter().find(|r| r.id == "b").unwrap().user_count, 1);
    }

    #[tokio::test]
    async fn test_rejoining_the_same_room_keeps_the_membership() {
        let manager = manager();
        let mut session = LifeSession::new("s1", manager.clone());

        session
            .handle_user_command(join("a", None, user("u1", 20)))
            .await
            .unwrap();
        session
            .handle_user_command(join("a", None, user("u1", 11)))
            .await
            .unwrap();

        let rooms = manager.list_rooms().await;
        assert_eq!(rooms.iter().find(|r| r.id == "a").unwrap().user_count, 1);

        session.leave_room().await.unwrap();
        let rooms = manager.list_rooms().await;
        assert_eq!(rooms.iter().find(|r| r.id == "a").unwrap().user_count, 0);
    }

    #[tokio::test]
    async fn test_set_life_outside_of_joined_room_fails() {
        let mut session = LifeSession::new("s1", manager());

        session
            .handle_user_command(UserCommand::SetLifeRequest(SetLifeCommand {
                room_id: "a".into(),
                user: user("u1", 3),
            }))
            .await
            .unwrap();

        match session.recv().await.unwrap() {
            Event::Error(err) => assert_eq!(err.cause, ActionType::SetLifeRequest),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_then_leave() {
        let manager = manager();
        let mut session = LifeSession::new("s1", manager.clone());

        session
            .handle_user_command(UserCommand::CreateRoomRequest(CreateRoomCommand {
                room_name: "friday".into(),
                password: None,
                user: user("u1", 20),
            }))
            .await
            .unwrap();

        let room_id = match session.recv().await.unwrap() {
            Event::JoinRoomSuccess(reply) => {
                assert_eq!(reply.room.name, "friday");
                reply.room.id
            }
            other => panic!("unexpected event: {:?}", other),
        };

        session
            .handle_user_command(UserCommand::LeaveRoomRequest(LeaveRoomCommand {
                room_id: room_id.clone(),
            }))
            .await
            .unwrap();

        assert_eq!(session.joined_room_id(), None);
        assert!(manager.list_rooms().await.iter().all(|r| r.id != room_id));
    }

    #[tokio::test]
    async fn test_reply_is_not_held_back_by_room_traffic() {
        let manager = manager();
        let mut quiet = LifeSession::new("s1", manager.clone());
        let mut busy = LifeSession::new("s2", manager.clone());

        quiet
            .handle_user_command(join("a", None, user("u1", 20)))
            .await
            .unwrap();
        busy.handle_user_command(join("a", None, user("u2", 20)))
            .await
            .unwrap();

        // more room events than the room channel holds, none of them read by the quiet session
        for life in 0..250 {
            busy.handle_user_command(UserCommand::SetLifeRequest(SetLifeCommand {
                room_id: "a".into(),
                user: user("u2", life),
            }))
            .await
            .unwrap();
            tokio::task::yield_now().await;
        }

        tokio::time::timeout(
            std::time::Duration::from_secs(1),
            quiet.handle_user_command(UserCommand::ListRoomsRequest(
                comms::command::ListRoomsCommand,
            )),
        )
        .await
        .expect("reply was blocked by room traffic")
        .unwrap();

        loop {
            match quiet.recv().await.unwrap() {
                Event::ListRoomsSuccess(reply) => {
                    assert!(reply.rooms.iter().any(|r| r.id == "a" && r.user_count == 2));
                    break;
                }
                _ => continue,
            }
        }
    }
}
