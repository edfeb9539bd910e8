use comms::event::User;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{prelude::*, widgets::*, Frame};
use tokio::sync::mpsc::UnboundedSender;

use crate::{
    state_store::{
        action::{Action, LifeStep},
        State,
    },
    ui_management::components::{
        totals_bar::{self, TotalsBar},
        usage::{HasUsageInfo, UsageInfo, UsageInfoLine},
        Component, ComponentRender,
    },
};

const TOTALS_BAR_HEIGHT: u16 = 5;

struct Props {
    self_user: User,
    other_users: Vec<User>,
    room_name: Option<String>,
}

impl From<&State> for Props {
    fn from(state: &State) -> Self {
        Props {
            self_user: state.self_user.clone(),
            other_users: state.ordered_other_users().into_iter().cloned().collect(),
            room_name: state.active_room.as_ref().map(|room| room.name.clone()),
        }
    }
}

fn life_step(code: KeyCode) -> Option<LifeStep> {
    match code {
        KeyCode::Up | KeyCode::Char('+') | KeyCode::Char('k') => Some(LifeStep::Increment),
        KeyCode::Down | KeyCode::Char('-') | KeyCode::Char('j') => Some(LifeStep::Decrement),
        _ => None,
    }
}

/// Own life total with the +/- controls
pub struct TotalsPage {
    action_tx: UnboundedSender<Action>,
    props: Props,
}

impl Component for TotalsPage {
    fn new(state: &State, action_tx: UnboundedSender<Action>) -> Self
    where
        Self: Sized,
    {
        TotalsPage {
            action_tx,
            props: Props::from(state),
        }
    }

    fn move_with_state(self, state: &State) -> Self
    where
        Self: Sized,
    {
        TotalsPage {
            props: Props::from(state),
            ..self
        }
    }

    fn name(&self) -> &str {
        "Totals"
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        let action = match (key.kind, life_step(key.code)) {
            (KeyEventKind::Press, Some(step)) => Action::PressLife { step },
            (KeyEventKind::Release, Some(_)) => Action::ReleaseLife,
            (KeyEventKind::Press, None) if key.code == KeyCode::Char('r') => Action::ResetLife,
            _ => return,
        };

        let _ = self.action_tx.send(action);
    }
}

impl ComponentRender<Rect> for TotalsPage {
    fn render<B: Backend>(&self, frame: &mut Frame<B>, area: Rect) {
        let bar_height = if self.props.other_users.is_empty() {
            0
        } else {
            TOTALS_BAR_HEIGHT
        };

        let [container_life, container_bar] = *Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(bar_height)].as_ref())
            .split(area)
        else {
            panic!("The totals layout should have 2 chunks")
        };

        let room_line = match self.props.room_name.as_ref() {
            Some(name) => Line::from(vec!["in ".into(), Span::from(name.clone()).bold()]),
            None => Line::from(Span::from("not in a room").italic()),
        };

        let top_padding = container_life.height.saturating_sub(6) / 2;
        let mut lines = vec![Line::from(""); top_padding as usize];
        lines.extend([
            Line::from(Span::from(self.props.self_user.name.clone()).bold()),
            room_line,
            Line::from(""),
            Line::from(vec![
                Span::from("  -  ").fg(Color::Red),
                Span::from(format!("  {}  ", self.props.self_user.life))
                    .bold()
                    .reversed(),
                Span::from("  +  ").fg(Color::Green),
            ]),
        ]);

        let life = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Life"));
        frame.render_widget(life, container_life);

        let other_users: Vec<&User> = self.props.other_users.iter().collect();
        TotalsBar.render(
            frame,
            totals_bar::RenderProps {
                area: container_bar,
                users: &other_users,
            },
        );
    }
}

impl HasUsageInfo for TotalsPage {
    fn usage_info(&self) -> UsageInfo {
        UsageInfo {
            description: Some("Life".into()),
            lines: vec![
                UsageInfoLine::new(&["↑", "+"], "to gain, hold to repeat"),
                UsageInfoLine::new(&["↓", "-"], "to lose"),
                UsageInfoLine::new(&["r"], "to reset"),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEventState, KeyModifiers};
    use tokio::sync::mpsc;

    use super::*;

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_press_and_release_become_actions() {
        let state = State::new(
            User {
                id: "u1".into(),
                name: "alice".into(),
                life: 20,
            },
            None,
            None,
        );
        let (action_tx, mut action_rx) = mpsc::unbounded_channel();
        let mut page = TotalsPage::new(&state, action_tx);

        page.handle_key_event(key(KeyCode::Char('+'), KeyEventKind::Press));
        page.handle_key_event(key(KeyCode::Char('+'), KeyEventKind::Repeat));
        page.handle_key_event(key(KeyCode::Char('+'), KeyEventKind::Release));
        page.handle_key_event(key(KeyCode::Char('r'), KeyEventKind::Press));

        assert!(matches!(
            action_rx.try_recv(),
            Ok(Action::PressLife {
                step: LifeStep::Increment
            })
        ));
        assert!(matches!(action_rx.try_recv(), Ok(Action::ReleaseLife)));
        assert!(matches!(action_rx.try_recv(), Ok(Action::ResetLife)));
        assert!(action_rx.try_recv().is_err());
    }
}
