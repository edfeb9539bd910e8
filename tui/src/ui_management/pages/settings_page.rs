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
enum Field {
    Name,
    StartingLife,
    Experiments,
}

impl Field {
    const ALL: [Field; 3] = [Field::Name, Field::StartingLife, Field::Experiments];

    fn index(&self) -> usize {
        match self {
            Field::Name => 0,
            Field::StartingLife => 1,
            Field::Experiments => 2,
        }
    }

    fn title(&self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::StartingLife => "Starting life",
            Field::Experiments => "Experiments",
        }
    }
}

struct Props {
    name: String,
    starting_life: i32,
    experiments: bool,
}

impl From<&State> for Props {
    fn from(state: &State) -> Self {
        Props {
            name: state.self_user.name.clone(),
            starting_life: state.settings.starting_life,
            experiments: state.enable_experiments,
        }
    }
}

pub struct SettingsPage {
    action_tx: UnboundedSender<Action>,
    props: Props,
    hovered: Field,
    /// The hovered field takes text
    editing: bool,
    input: InputBox,
    /// Rejected input, cleared on the next edit
    error: Option<String>,
}

impl SettingsPage {
    fn hover(&mut self, offset: isize) {
        let idx = self
            .hovered
            .index()
            .saturating_add_signed(offset)
            .min(Field::ALL.len() - 1);
        self.hovered = Field::ALL[idx];
    }

    fn start_editing(&mut self) {
        let text = match self.hovered {
            Field::Name => self.props.name.clone(),
            Field::StartingLife => self.props.starting_life.to_string(),
            Field::Experiments => {
                let _ = self.action_tx.send(Action::ToggleExperiments);
                return;
            }
        };

        self.input.set_text(&text);
        self.error = None;
        self.editing = true;
    }

    fn submit(&mut self) {
        let text = self.input.text().trim().to_string();

        let action = match self.hovered {
            Field::Name if text.is_empty() => {
                self.error = Some("The name can not be empty".into());
                return;
            }
            Field::Name => Action::SetName { name: text },
            Field::StartingLife => match text.parse::<i32>() {
                Ok(life) if life > 0 => Action::SetStartingLife { life },
                _ => {
                    self.error = Some("Starting life must be a positive number".into());
                    return;
                }
            },
            Field::Experiments => return,
        };

        let _ = self.action_tx.send(action);
        self.editing = false;
    }

    fn value(&self, field: Field) -> String {
        match field {
            Field::Name => self.props.name.clone(),
            Field::StartingLife => self.props.starting_life.to_string(),
            Field::Experiments if self.props.experiments => "on (players sorted by life)".into(),
            Field::Experiments => "off".into(),
        }
    }
}

impl CapturesInput for SettingsPage {
    fn is_editing(&self) -> bool {
        self.editing
    }
}

impl Component for SettingsPage {
    fn new(state: &State, action_tx: UnboundedSender<Action>) -> Self
    where
        Self: Sized,
    {
        SettingsPage {
            action_tx: action_tx.clone(),
            props: Props::from(state),
            hovered: Field::Name,
            editing: false,
            input: InputBox::new(state, action_tx),
            error: None,
        }
    }

    fn move_with_state(self, state: &State) -> Self
    where
        Self: Sized,
    {
        SettingsPage {
            props: Props::from(state),
            ..self
        }
    }

    fn name(&self) -> &str {
        "Settings"
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if self.editing {
            match key.code {
                KeyCode::Esc => {
                    self.editing = false;
                    self.error = None;
                }
                KeyCode::Enter => self.submit(),
                _ => self.input.handle_key_event(key),
            }
            return;
        }

        match key.code {
            KeyCode::Up => self.hover(-1),
            KeyCode::Down => self.hover(1),
            KeyCode::Enter | KeyCode::Char('e') => self.start_editing(),
            _ => {}
        }
    }
}

impl ComponentRender<Rect> for SettingsPage {
    fn render<B: Backend>(&self, frame: &mut Frame<B>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                [
                    Constraint::Length(3),
                    Constraint::Length(3),
                    Constraint::Length(3),
                    Constraint::Length(1),
                    Constraint::Min(0),
                ]
                .as_ref(),
            )
            .split(area);

        for field in Field::ALL {
            let area = chunks[field.index()];
            let hovered = field == self.hovered;

            if hovered && self.editing {
                self.input.render(
                    frame,
                    input_box::RenderProps {
                        title: field.title().into(),
                        area,
                        border_color: Color::Yellow,
                        show_cursor: true,
                    },
                );
                continue;
            }

            let border_color = if hovered { Color::Blue } else { Color::Reset };
            let value = Paragraph::new(self.value(field)).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border_color))
                    .title(field.title()),
            );
            frame.render_widget(value, area);
        }

        if let Some(error) = self.error.as_ref() {
            frame.render_widget(
                Paragraph::new(Span::from(error.clone()).fg(Color::Red)),
                chunks[3],
            );
        }
    }
}

impl HasUsageInfo for SettingsPage {
    fn usage_info(&self) -> UsageInfo {
        if self.editing {
            return UsageInfo {
                description: Some(self.hovered.title().into()),
                lines: vec![
                    UsageInfoLine::new(&["Enter"], "to save"),
                    UsageInfoLine::new(&["Esc"], "to cancel"),
                ],
            };
        }

        let activate = if self.hovered == Field::Experiments {
            "to toggle"
        } else {
            "to edit"
        };

        UsageInfo {
            description: Some("Settings".into()),
            lines: vec![
                UsageInfoLine::new(&["↑", "↓"], "to navigate"),
                UsageInfoLine::new(&["Enter"], activate),
            ],
        }
    }
}
