use comms::event::RoomSummary;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{prelude::*, widgets::*, Frame};
use tokio::sync::mpsc::UnboundedSender;

use crate::{
    state_store::{action::Action, State},
    ui_management::components::{
        input_box::{self, InputBox},
        usage::{HasUsageInfo, UsageInfo, UsageInfoLine},
        CapturesInput, Component, ComponentRender,
    },
};

struct Props {
    room_id: Option<String>,
    /// Listing of the attempted room, gone if the room closed meanwhile
    room: Option<RoomSummary>,
    join_error: Option<String>,
}

impl From<&State> for Props {
    fn from(state: &State) -> Self {
        let room_id = state.attempted_room.clone();
        let room = room_id
            .as_deref()
            .and_then(|room_id| state.room(room_id))
            .cloned();

        Props {
            room_id,
            room,
            join_error: state.errors.join_room.clone(),
        }
    }
}

/// Confirmation step before joining the room picked from the list
pub struct JoinRoom {
    action_tx: UnboundedSender<Action>,
    props: Props,
    password_input: InputBox,
}

impl JoinRoom {
    fn is_locked(&self) -> bool {
        self.props.room.as_ref().map(|room| room.locked).unwrap_or(false)
    }
}

impl CapturesInput for JoinRoom {
    fn is_editing(&self) -> bool {
        self.is_locked()
    }
}

impl Component for JoinRoom {
    fn new(state: &State, action_tx: UnboundedSender<Action>) -> Self
    where
        Self: Sized,
    {
        JoinRoom {
            action_tx: action_tx.clone(),
            props: Props::from(state),
            password_input: InputBox::new(state, action_tx).masked(),
        }
    }

    fn move_with_state(self, state: &State) -> Self
    where
        Self: Sized,
    {
        let props = Props::from(state);
        let mut join_room = JoinRoom { props, ..self };

        // a new attempt starts with an empty password
        if join_room.props.room_id.is_none() {
            join_room.password_input.reset();
        }

        join_room
    }

    fn name(&self) -> &str {
        "Join Room"
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Esc => {
                let _ = self.action_tx.send(Action::CancelJoin);
            }
            KeyCode::Enter => {
                let (Some(room_id), Some(_)) = (self.props.room_id.clone(), &self.props.room)
                else {
                    return;
                };
                let password = self
                    .is_locked()
                    .then(|| self.password_input.text().to_string());

                let _ = self.action_tx.send(Action::JoinRoom { room_id, password });
            }
            _ if self.is_locked() => self.password_input.handle_key_event(key),
            _ => {}
        }
    }
}

impl ComponentRender<Rect> for JoinRoom {
    fn render<B: Backend>(&self, frame: &mut Frame<B>, area: Rect) {
        let [container_info, container_password, container_error, _] = *Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                [
                    Constraint::Length(4),
                    Constraint::Length(if self.is_locked() { 3 } else { 0 }),
                    Constraint::Length(1),
                    Constraint::Min(0),
                ]
                .as_ref(),
            )
            .split(area)
        else {
            panic!("The join layout should have 4 chunks")
        };

        let info = match self.props.room.as_ref() {
            Some(room) => Text::from(vec![
                Line::from(vec!["Join ".into(), Span::from(room.name.clone()).bold(), "?".into()]),
                Line::from(format!("{} player(s) in the room", room.user_count)),
            ]),
            None => Text::from(Line::from(
                Span::from("This room is not listed anymore.").italic(),
            )),
        };
        frame.render_widget(
            Paragraph::new(info).block(Block::default().borders(Borders::ALL).title("Join Room")),
            container_info,
        );

        if self.is_locked() {
            self.password_input.render(
                frame,
                input_box::RenderProps {
                    title: "Password".into(),
                    area: container_password,
                    border_color: Color::Yellow,
                    show_cursor: true,
                },
            );
        }

        if let Some(error) = self.props.join_error.as_ref() {
            frame.render_widget(
                Paragraph::new(Span::from(error.clone()).fg(Color::Red)),
                container_error,
            );
        }
    }
}

impl HasUsageInfo for JoinRoom {
    fn usage_info(&self) -> UsageInfo {
        let mut lines = vec![];
        if self.props.room.is_some() {
            lines.push(UsageInfoLine::new(&["Enter"], "to join"));
        }
        lines.push(UsageInfoLine::new(&["Esc"], "to go back"));

        UsageInfo {
            description: Some("Join".into()),
            lines,
        }
    }
}
