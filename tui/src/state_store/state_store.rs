use std::{future, time::Duration};

use comms::{
    command::{
        CreateRoomCommand, JoinRoomCommand, LeaveRoomCommand, ListRoomsCommand, SetLifeCommand,
        UserCommand,
    },
    event::{Event, User},
};
use tokio::{
    sync::{
        broadcast,
        mpsc::{self, UnboundedReceiver, UnboundedSender},
    },
    time::Instant,
};
use tokio_stream::StreamExt;

use crate::{storage::LocalStorage, Interrupted, Terminator};

use super::{
    action::Action,
    connection::{self, ServerHandle, RETRY_TIMEOUT},
    life_repeater::LifeRepeater,
    Settings, State, StoreAction, ToastLevel,
};

const TOAST_TIMEOUT: Duration = Duration::from_secs(3);

pub struct StateStore {
    url: String,
    storage: LocalStorage,
    state_tx: UnboundedSender<State>,
}

impl StateStore {
    pub fn new(url: String, storage: LocalStorage) -> (Self, UnboundedReceiver<State>) {
        let (state_tx, state_rx) = mpsc::unbounded_channel::<State>();

        (
            StateStore {
                url,
                storage,
                state_tx,
            },
            state_rx,
        )
    }
}

/// What woke the main loop up
enum Step {
    Inbound(Option<anyhow::Result<Event>>),
    Ui(Action),
    Reconnect,
    RepeatLife,
    ExpireToast,
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => future::pending().await,
    }
}

async fn next_event(socket: &mut Option<ServerHandle>) -> Option<anyhow::Result<Event>> {
    match socket {
        Some((event_stream, _)) => event_stream.next().await,
        None => future::pending().await,
    }
}

/// The state together with the socket and the timers driving it
struct Store {
    state: State,
    storage: LocalStorage,
    socket: Option<ServerHandle>,
    next_attempt: Option<Instant>,
    toast_deadline: Option<Instant>,
    repeater: LifeRepeater,
}

impl Store {
    fn dispatch(&mut self, action: StoreAction) {
        tracing::debug!(action = %action.action_type(), "dispatching");

        let previous_room = self.state.active_room.clone();
        let previous_settings = self.state.settings.clone();
        let previous_name = self.state.self_user.name.clone();
        let previous_toast = self.state.toast.clone();

        self.state.dispatch(&action);

        if self.state.active_room != previous_room {
            if let Err(err) = self.storage.set_room(self.state.active_room.clone()) {
                tracing::warn!(%err, "could not store the active room");
            }
        }
        if self.state.settings != previous_settings {
            if let Err(err) = self.storage.set_settings(self.state.settings.clone()) {
                tracing::warn!(%err, "could not store the settings");
            }
        }
        if self.state.self_user.name != previous_name {
            if let Err(err) = self.storage.set_identity(&self.state.self_user) {
                tracing::warn!(%err, "could not store the user name");
            }
        }
        if self.state.toast != previous_toast {
            self.toast_deadline = match self.state.toast.as_ref() {
                Some(toast) if toast.level != ToastLevel::Warning => {
                    Some(Instant::now() + TOAST_TIMEOUT)
                }
                _ => None,
            };
        }
    }

    /// Dispatches an action of the user, telling the room when the life total moved
    async fn dispatch_local(&mut self, action: StoreAction) {
        let previous_life = self.state.self_user.life;

        self.dispatch(action);

        if self.state.self_user.life != previous_life {
            if let Some(room) = self.state.active_room.as_ref() {
                let command = UserCommand::SetLifeRequest(SetLifeCommand {
                    room_id: room.id.clone(),
                    user: self.state.self_user.clone(),
                });
                self.ws_send(command).await;
            }
        }
    }

    /// Without a socket the command is dropped, otherwise the store sees it before the server does
    async fn ws_send(&mut self, command: UserCommand) {
        if self.socket.is_none() {
            tracing::debug!(command = %command.action_type(), "not connected, dropping command");
            return;
        }

        self.dispatch(StoreAction::Sent(command.clone()));

        let Some((_, command_writer)) = self.socket.as_mut() else {
            return;
        };
        if let Err(err) = command_writer.write(&command).await {
            self.connection_closed(err);
        }
    }

    async fn connect(&mut self, url: &str) {
        self.next_attempt = None;

        match connection::open(url).await {
            Ok(server_handle) => {
                tracing::info!(url, "connected");
                self.socket = Some(server_handle);

                let (opened, commands) = connection::on_open(&self.state);
                if let Some(action) = opened {
                    self.dispatch(action);
                }
                for command in commands {
                    self.ws_send(command).await;
                }
            }
            Err(err) => self.connection_closed(err),
        }
    }

    fn connection_closed(&mut self, err: anyhow::Error) {
        tracing::warn!("connection closed: {:#}", err);

        // the writer goes with the socket, the server notices on its side
        self.socket = None;
        if let Some(action) = connection::on_close(&self.state) {
            self.dispatch(action);
        }

        self.next_attempt = Some(Instant::now() + RETRY_TIMEOUT);
    }

    async fn handle_action(&mut self, action: Action) {
        match action {
            Action::PressLife { step } => {
                let action = self.repeater.press(step, Instant::now());
                self.dispatch_local(action).await;
            }
            Action::ReleaseLife => self.repeater.release(),
            Action::ResetLife => {
                let life = self.state.settings.starting_life;
                self.dispatch_local(StoreAction::ResetLife { life }).await;
            }
            Action::RefreshRooms => {
                self.ws_send(UserCommand::ListRoomsRequest(ListRoomsCommand))
                    .await
            }
            Action::SelectRoom { room_id } => self.dispatch(StoreAction::AttemptRoom { room_id }),
            Action::CancelJoin => self.dispatch(StoreAction::CancelAttempt),
            Action::JoinRoom { room_id, password } => {
                let command = UserCommand::JoinRoomRequest(JoinRoomCommand {
                    room_id,
                    password,
                    user: self.state.self_user.clone(),
                });
                self.ws_send(command).await;
            }
            Action::CreateRoom { name, password } => {
                let command = UserCommand::CreateRoomRequest(CreateRoomCommand {
                    room_name: name,
                    password,
                    user: self.state.self_user.clone(),
                });
                self.ws_send(command).await;
            }
            Action::LeaveRoom => {
                if let Some(room) = self.state.active_room.as_ref() {
                    let command = UserCommand::LeaveRoomRequest(LeaveRoomCommand {
                        room_id: room.id.clone(),
                    });
                    self.ws_send(command).await;
                }
            }
            Action::MoveUser { user_id, offset } => {
                self.dispatch(StoreAction::MoveUser { user_id, offset })
            }
            Action::SetName { name } => {
                let name = name.trim().to_string();
                if name.is_empty() || name == self.state.self_user.name {
                    return;
                }

                self.dispatch(StoreAction::SetName { name });

                // joining again is how the room learns the new name
                if let Some(room) = self.state.active_room.clone() {
                    let command = UserCommand::JoinRoomRequest(JoinRoomCommand {
                        room_id: room.id,
                        password: room.password,
                        user: self.state.self_user.clone(),
                    });
                    self.ws_send(command).await;
                }
            }
            Action::SetStartingLife { life } => {
                self.dispatch(StoreAction::UpdateSettings(Settings {
                    starting_life: life,
                }))
            }
            Action::ToggleExperiments => self.dispatch(StoreAction::ToggleExperiments),
            Action::DismissToast => self.dispatch(StoreAction::DismissToast),
            // handled by the main loop
            Action::Exit => {}
        }
    }
}

impl StateStore {
    pub async fn main_loop(
        self,
        self_user: User,
        mut terminator: Terminator,
        mut action_rx: UnboundedReceiver<Action>,
        mut interrupt_rx: broadcast::Receiver<Interrupted>,
    ) -> anyhow::Result<Interrupted> {
        let stored = self.storage.data().clone();
        let mut store = Store {
            state: State::new(self_user, stored.room, stored.settings),
            storage: self.storage,
            socket: None,
            // the first attempt goes out right away
            next_attempt: Some(Instant::now()),
            toast_deadline: None,
            repeater: LifeRepeater::default(),
        };

        // the initial state once
        self.state_tx.send(store.state.clone())?;

        let result = loop {
            let step = tokio::select! {
                maybe_event = next_event(&mut store.socket) => Step::Inbound(maybe_event),
                Some(action) = action_rx.recv() => Step::Ui(action),
                _ = sleep_until(store.next_attempt) => Step::Reconnect,
                _ = sleep_until(store.repeater.deadline()) => Step::RepeatLife,
                _ = sleep_until(store.toast_deadline) => Step::ExpireToast,
                // Catch and handle interrupt signal to gracefully shutdown
                Ok(interrupted) = interrupt_rx.recv() => {
                    break interrupted;
                }
            };

            match step {
                Step::Inbound(Some(Ok(event))) => store.dispatch(StoreAction::Received(event)),
                Step::Inbound(Some(Err(err))) => store.connection_closed(err),
                Step::Inbound(None) => {
                    store.connection_closed(anyhow::anyhow!("the server closed the socket"))
                }
                Step::Ui(Action::Exit) => {
                    let _ = terminator.terminate(Interrupted::UserInt);

                    break Interrupted::UserInt;
                }
                Step::Ui(action) => store.handle_action(action).await,
                Step::Reconnect => store.connect(&self.url).await,
                Step::RepeatLife => {
                    if let Some(action) = store.repeater.fire(Instant::now()) {
                        store.dispatch_local(action).await;
                    }
                }
                Step::ExpireToast => {
                    store.toast_deadline = None;
                    store.dispatch(StoreAction::DismissToast);
                }
            }

            self.state_tx.send(store.state.clone())?;
        };

        if let Some((_, mut command_writer)) = store.socket.take() {
            let _ = command_writer.close().await;
        }

        Ok(result)
    }
}
