use comms::event::{JoinedRoom, User};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{prelude::*, widgets::*, Frame};
use tokio::sync::mpsc::UnboundedSender;

use crate::{
    state_store::{action::Action, RoomLogItem, State},
    ui_management::components::{
        usage::{HasUsageInfo, UsageInfo, UsageInfoLine},
        Component, ComponentRender,
    },
};

struct Props {
    room: Option<JoinedRoom>,
    self_user: User,
    /// In display order
    other_users: Vec<User>,
    sorted_by_life: bool,
    /// Oldest first
    room_log: Vec<RoomLogItem>,
}

impl From<&State> for Props {
    fn from(state: &State) -> Self {
        Props {
            room: state.active_room.clone(),
            self_user: state.self_user.clone(),
            other_users: state.ordered_other_users().into_iter().cloned().collect(),
            sorted_by_life: state.enable_experiments,
            room_log: state.room_log.asc_iter().cloned().collect(),
        }
    }
}

/// Members of the joined room and what happened in it
pub struct ActiveRoom {
    action_tx: UnboundedSender<Action>,
    props: Props,
    /// Selection among the other users
    list_state: ListState,
}

impl ActiveRoom {
    fn select_offset(&mut self, offset: isize) {
        let len = self.props.other_users.len();
        if len == 0 {
            self.list_state.select(None);
            return;
        }

        let selected = self.list_state.selected().unwrap_or(0);
        self.list_state.select(Some(
            selected.saturating_add_signed(offset).min(len - 1),
        ));
    }

    fn move_selected_user(&mut self, offset: isize) {
        // the arranged order does not show while sorted by life
        if self.props.sorted_by_life {
            return;
        }

        let Some(user) = self
            .list_state
            .selected()
            .and_then(|idx| self.props.other_users.get(idx))
        else {
            return;
        };

        let _ = self.action_tx.send(Action::MoveUser {
            user_id: user.id.clone(),
            offset,
        });

        // the selection moves along with the user
        self.select_offset(offset);
    }
}

impl Component for ActiveRoom {
    fn new(state: &State, action_tx: UnboundedSender<Action>) -> Self
    where
        Self: Sized,
    {
        ActiveRoom {
            action_tx,
            props: Props::from(state),
            list_state: ListState::default(),
        }
        .move_with_state(state)
    }

    fn move_with_state(self, state: &State) -> Self
    where
        Self: Sized,
    {
        let mut active_room = ActiveRoom {
            props: Props::from(state),
            ..self
        };
        active_room.select_offset(0);

        active_room
    }

    fn name(&self) -> &str {
        "Active Room"
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        let shifted = key.modifiers.contains(KeyModifiers::SHIFT);
        match key.code {
            KeyCode::Up if shifted => self.move_selected_user(-1),
            KeyCode::Down if shifted => self.move_selected_user(1),
            KeyCode::Char('[') => self.move_selected_user(-1),
            KeyCode::Char(']') => self.move_selected_user(1),
            KeyCode::Up => self.select_offset(-1),
            KeyCode::Down => self.select_offset(1),
            KeyCode::Char('l') => {
                let _ = self.action_tx.send(Action::LeaveRoom);
            }
            _ => {}
        }
    }
}

fn log_line(item: &RoomLogItem) -> Line<'static> {
    match item {
        RoomLogItem::Joined { name } => {
            Line::from(Span::from(format!("{} joined", name)).fg(Color::Green))
        }
        RoomLogItem::Left { name } => Line::from(Span::from(format!("{} left", name)).italic()),
        RoomLogItem::LifeChanged { name, from, to } => Line::from(vec![
            Span::from(name.clone()).bold(),
            Span::from(format!(" {} → {}", from, to)),
        ]),
    }
}

fn calculate_list_offset(height: u16, items_len: usize) -> usize {
    // the borders take 2 lines
    items_len.saturating_sub(height.saturating_sub(2) as usize)
}

impl ComponentRender<Rect> for ActiveRoom {
    fn render<B: Backend>(&self, frame: &mut Frame<B>, area: Rect) {
        let [container_users, container_log] = *Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
            .split(area)
        else {
            panic!("The room layout should have 2 chunks")
        };

        let [container_self, container_others] = *Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(1)].as_ref())
            .split(container_users)
        else {
            panic!("The users layout should have 2 chunks")
        };

        let room_title = self
            .props
            .room
            .as_ref()
            .map(|room| room.name.clone())
            .unwrap_or_default();
        let me = Paragraph::new(Line::from(vec![
            Span::from(format!("{} (you)", self.props.self_user.name)).bold(),
            Span::from(format!("  {}", self.props.self_user.life)),
        ]))
        .block(Block::default().borders(Borders::ALL).title(room_title));
        frame.render_widget(me, container_self);

        let others: Vec<ListItem> = self
            .props
            .other_users
            .iter()
            .map(|user| {
                ListItem::new(Line::from(vec![
                    Span::from(user.name.clone()),
                    Span::from(format!("  {}", user.life)).bold(),
                ]))
            })
            .collect();
        let others_title = if self.props.sorted_by_life {
            format!("Players ({}, by life)", others.len())
        } else {
            format!("Players ({})", others.len())
        };
        let others = List::new(others)
            .block(Block::default().borders(Borders::ALL).title(others_title))
            .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            .highlight_symbol("> ");
        let mut list_state = self.list_state.clone();
        frame.render_stateful_widget(others, container_others, &mut list_state);

        let log_offset = calculate_list_offset(container_log.height, self.props.room_log.len());
        let log: Vec<ListItem> = self
            .props
            .room_log
            .iter()
            .skip(log_offset)
            .map(|item| ListItem::new(log_line(item)))
            .collect();
        frame.render_widget(
            List::new(log).block(Block::default().borders(Borders::ALL).title("Activity")),
            container_log,
        );
    }
}

impl HasUsageInfo for ActiveRoom {
    fn usage_info(&self) -> UsageInfo {
        let mut lines = vec![UsageInfoLine::new(&["↑", "↓"], "to select")];
        if !self.props.sorted_by_life {
            lines.push(UsageInfoLine::new(&["[", "]"], "to reorder"));
        }
        lines.push(UsageInfoLine::new(&["l"], "to leave"));

        UsageInfo {
            description: Some("Room".into()),
            lines,
        }
    }
}
