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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CreateField {
    Name,
    Password,
}

struct Props {
    rooms: Vec<RoomSummary>,
    create_error: Option<String>,
}

impl From<&State> for Props {
    fn from(state: &State) -> Self {
        Props {
            rooms: state.rooms.clone().unwrap_or_default(),
            create_error: state.errors.create_room.clone(),
        }
    }
}

/// Rooms of the lobby, and the form to open a new one
pub struct RoomList {
    action_tx: UnboundedSender<Action>,
    props: Props,
    list_state: ListState,
    /// The create form is open, on this field
    creating: Option<CreateField>,
    name_input: InputBox,
    password_input: InputBox,
}

impl RoomList {
    fn next(&mut self) {
        if self.props.rooms.is_empty() {
            return;
        }

        let i = match self.list_state.selected() {
            Some(i) if i + 1 < self.props.rooms.len() => i + 1,
            _ => 0,
        };
        self.list_state.select(Some(i));
    }

    fn previous(&mut self) {
        if self.props.rooms.is_empty() {
            return;
        }

        let i = match self.list_state.selected() {
            Some(0) | None => self.props.rooms.len() - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
    }

    fn selected_room(&self) -> Option<&RoomSummary> {
        self.list_state
            .selected()
            .and_then(|idx| self.props.rooms.get(idx))
    }

    /// Keeps the selection on a listed room as the listing changes
    fn clamp_selection(&mut self) {
        let selected = match (self.list_state.selected(), self.props.rooms.len()) {
            (_, 0) => None,
            (Some(idx), len) => Some(idx.min(len - 1)),
            (None, _) => Some(0),
        };
        self.list_state.select(selected);
    }

    fn open_create_form(&mut self) {
        self.name_input.reset();
        self.password_input.reset();
        self.creating = Some(CreateField::Name);
    }

    fn submit_create_form(&mut self) {
        let name = self.name_input.text().trim().to_string();
        if name.is_empty() {
            return;
        }

        let password = Some(self.password_input.text().to_string()).filter(|pw| !pw.is_empty());
        let _ = self.action_tx.send(Action::CreateRoom { name, password });

        self.creating = None;
    }

    fn handle_create_form_key(&mut self, field: CreateField, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.creating = None,
            KeyCode::Enter => self.submit_create_form(),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.creating = Some(match field {
                    CreateField::Name => CreateField::Password,
                    CreateField::Password => CreateField::Name,
                })
            }
            _ => match field {
                CreateField::Name => self.name_input.handle_key_event(key),
                CreateField::Password => self.password_input.handle_key_event(key),
            },
        }
    }
}

impl CapturesInput for RoomList {
    fn is_editing(&self) -> bool {
        self.creating.is_some()
    }
}

impl Component for RoomList {
    fn new(state: &State, action_tx: UnboundedSender<Action>) -> Self {
        Self {
            action_tx: action_tx.clone(),
            props: Props::from(state),
            list_state: ListState::default(),
            creating: None,
            name_input: InputBox::new(state, action_tx.clone()),
            password_input: InputBox::new(state, action_tx).masked(),
        }
        .move_with_state(state)
    }

    fn move_with_state(self, state: &State) -> Self
    where
        Self: Sized,
    {
        let mut room_list = Self {
            props: Props::from(state),
            ..self
        };
        room_list.clamp_selection();

        room_list
    }

    fn name(&self) -> &str {
        "Room List"
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if let Some(field) = self.creating {
            self.handle_create_form_key(field, key);
            return;
        }

        match key.code {
            KeyCode::Up => self.previous(),
            KeyCode::Down => self.next(),
            KeyCode::Enter => {
                if let Some(room) = self.selected_room() {
                    let _ = self.action_tx.send(Action::SelectRoom {
                        room_id: room.id.clone(),
                    });
                }
            }
            KeyCode::Char('r') => {
                let _ = self.action_tx.send(Action::RefreshRooms);
            }
            KeyCode::Char('n') => self.open_create_form(),
            _ => (),
        }
    }
}

fn room_item(room: &RoomSummary) -> ListItem<'static> {
    let players = match room.user_count {
        1 => "1 player".to_string(),
        count => format!("{} players", count),
    };

    let mut spans = vec![
        Span::from(room.name.clone()).bold(),
        Span::from(format!("  {}", players)),
    ];
    if room.locked {
        spans.push(Span::from("  locked").fg(Color::Yellow));
    }

    ListItem::new(Line::from(spans))
}

impl ComponentRender<Rect> for RoomList {
    fn render<B: Backend>(&self, frame: &mut Frame<B>, area: Rect) {
        let form_height = if self.creating.is_some() { 6 } else { 0 };
        let error_height = if self.props.create_error.is_some() { 1 } else { 0 };

        let [container_list, container_error, container_form] = *Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                [
                    Constraint::Min(1),
                    Constraint::Length(error_height),
                    Constraint::Length(form_height),
                ]
                .as_ref(),
            )
            .split(area)
        else {
            panic!("The room list layout should have 3 chunks")
        };

        if self.props.rooms.is_empty() {
            let empty = Paragraph::new(Line::from(vec![
                "No rooms yet, press ".into(),
                Span::from("(n)").bold(),
                " to open one.".into(),
            ]))
            .block(Block::default().borders(Borders::ALL).title("Rooms"));
            frame.render_widget(empty, container_list);
        } else {
            let rooms: Vec<ListItem> = self.props.rooms.iter().map(room_item).collect();
            let list = List::new(rooms)
                .block(Block::default().borders(Borders::ALL).title("Rooms"))
                .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
                .highlight_symbol("> ");

            let mut list_state = self.list_state.clone();
            frame.render_stateful_widget(list, container_list, &mut list_state);
        }

        if let Some(error) = self.props.create_error.as_ref() {
            frame.render_widget(
                Paragraph::new(Span::from(error.clone()).fg(Color::Red)),
                container_error,
            );
        }

        if let Some(field) = self.creating {
            let [container_name, container_password] = *Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(3), Constraint::Length(3)].as_ref())
                .split(container_form)
            else {
                panic!("The create form should have 2 chunks")
            };

            let border_color = |of: CreateField| {
                if of == field {
                    Color::Yellow
                } else {
                    Color::Reset
                }
            };

            self.name_input.render(
                frame,
                input_box::RenderProps {
                    title: "Room name".into(),
                    area: container_name,
                    border_color: border_color(CreateField::Name),
                    show_cursor: field == CreateField::Name,
                },
            );
            self.password_input.render(
                frame,
                input_box::RenderProps {
                    title: "Password (optional)".into(),
                    area: container_password,
                    border_color: border_color(CreateField::Password),
                    show_cursor: field == CreateField::Password,
                },
            );
        }
    }
}

impl HasUsageInfo for RoomList {
    fn usage_info(&self) -> UsageInfo {
        if self.creating.is_some() {
            return UsageInfo {
                description: Some("New room".into()),
                lines: vec![
                    UsageInfoLine::new(&["Tab"], "to switch field"),
                    UsageInfoLine::new(&["Enter"], "to create"),
                    UsageInfoLine::new(&["Esc"], "to cancel"),
                ],
            };
        }

        UsageInfo {
            description: Some("Rooms".into()),
            lines: vec![
                UsageInfoLine::new(&["↑", "↓"], "to navigate"),
                UsageInfoLine::new(&["Enter"], "to join"),
                UsageInfoLine::new(&["n"], "to create"),
                UsageInfoLine::new(&["r"], "to refresh"),
            ],
        }
    }
}
