use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{prelude::*, widgets::*, Frame};
use tokio::sync::mpsc::UnboundedSender;

use crate::state_store::{action::Action, State, Toast};

use self::{rooms::RoomsPage, settings_page::SettingsPage, totals_page::TotalsPage};

use super::components::{
    tab_bar::{self, TabBar},
    toast::{self, ToastOverlay},
    usage::{usage_to_line, HasUsageInfo, UsageInfo, UsageInfoLine},
    CapturesInput, Component, ComponentRender,
};

mod rooms;
mod settings_page;
mod totals_page;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Totals,
    Rooms,
    Settings,
}

impl Tab {
    const ALL: [Tab; 3] = [Tab::Totals, Tab::Rooms, Tab::Settings];
    const TITLES: [&'static str; 3] = ["Totals", "Rooms", "Settings"];

    fn index(&self) -> usize {
        match self {
            Tab::Totals => 0,
            Tab::Rooms => 1,
            Tab::Settings => 2,
        }
    }

    fn next(&self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    fn previous(&self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

struct Props {
    socket_connected: bool,
    toast: Option<Toast>,
}

impl From<&State> for Props {
    fn from(state: &State) -> Self {
        Props {
            socket_connected: state.socket_connected,
            toast: state.toast.clone(),
        }
    }
}

pub struct AppRouter {
    action_tx: UnboundedSender<Action>,
    props: Props,
    active_tab: Tab,
    //
    totals_page: TotalsPage,
    rooms_page: RoomsPage,
    settings_page: SettingsPage,
}

impl AppRouter {
    fn get_active_page_component(&self) -> &dyn Component {
        match self.active_tab {
            Tab::Totals => &self.totals_page,
            Tab::Rooms => &self.rooms_page,
            Tab::Settings => &self.settings_page,
        }
    }

    fn get_active_page_component_mut(&mut self) -> &mut dyn Component {
        match self.active_tab {
            Tab::Totals => &mut self.totals_page,
            Tab::Rooms => &mut self.rooms_page,
            Tab::Settings => &mut self.settings_page,
        }
    }

    fn is_active_page_editing(&self) -> bool {
        match self.active_tab {
            Tab::Totals => false,
            Tab::Rooms => self.rooms_page.is_editing(),
            Tab::Settings => self.settings_page.is_editing(),
        }
    }

    fn active_page_usage(&self) -> UsageInfo {
        match self.active_tab {
            Tab::Totals => self.totals_page.usage_info(),
            Tab::Rooms => self.rooms_page.usage_info(),
            Tab::Settings => self.settings_page.usage_info(),
        }
    }

    /// Keys that work on every page, unless the page is taking text
    fn handle_global_key(&mut self, key: &KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                let _ = self.action_tx.send(Action::Exit);
            }
            _ if self.is_active_page_editing() => return false,
            KeyCode::Char('q') => {
                let _ = self.action_tx.send(Action::Exit);
            }
            KeyCode::Char('1') => self.active_tab = Tab::Totals,
            KeyCode::Char('2') => self.active_tab = Tab::Rooms,
            KeyCode::Char('3') => self.active_tab = Tab::Settings,
            KeyCode::Tab => self.active_tab = self.active_tab.next(),
            KeyCode::BackTab => self.active_tab = self.active_tab.previous(),
            KeyCode::Char('x') if self.props.toast.is_some() => {
                let _ = self.action_tx.send(Action::DismissToast);
            }
            _ => return false,
        }

        true
    }
}

impl Component for AppRouter {
    fn new(state: &State, action_tx: UnboundedSender<Action>) -> Self
    where
        Self: Sized,
    {
        AppRouter {
            action_tx: action_tx.clone(),
            props: Props::from(state),
            active_tab: Tab::Totals,
            //
            totals_page: TotalsPage::new(state, action_tx.clone()),
            rooms_page: RoomsPage::new(state, action_tx.clone()),
            settings_page: SettingsPage::new(state, action_tx),
        }
        .move_with_state(state)
    }

    fn move_with_state(self, state: &State) -> Self
    where
        Self: Sized,
    {
        AppRouter {
            props: Props::from(state),
            //
            totals_page: self.totals_page.move_with_state(state),
            rooms_page: self.rooms_page.move_with_state(state),
            settings_page: self.settings_page.move_with_state(state),
            ..self
        }
    }

    // route all functions to the active page
    fn name(&self) -> &str {
        self.get_active_page_component().name()
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if !self.handle_global_key(&key) {
            self.get_active_page_component_mut().handle_key_event(key)
        }
    }
}

impl HasUsageInfo for AppRouter {
    fn usage_info(&self) -> UsageInfo {
        if self.is_active_page_editing() {
            return UsageInfo {
                description: None,
                lines: vec![UsageInfoLine::new(&["Ctrl+c"], "to exit")],
            };
        }

        let mut lines = vec![
            UsageInfoLine::new(&["q"], "to exit"),
            UsageInfoLine::new(&["1", "2", "3", "Tab"], "to switch tabs"),
        ];
        if self.props.toast.is_some() {
            lines.push(UsageInfoLine::new(&["x"], "to dismiss"));
        }

        UsageInfo {
            description: None,
            lines,
        }
    }
}

impl ComponentRender<()> for AppRouter {
    fn render<B: Backend>(&self, frame: &mut Frame<B>, _props: ()) {
        let [container_tabs, container_page, container_usage] = *Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                [
                    Constraint::Length(3),
                    Constraint::Min(1),
                    Constraint::Length(4),
                ]
                .as_ref(),
            )
            .split(frame.size())
        else {
            panic!("The main layout should have 3 chunks")
        };

        TabBar.render(
            frame,
            tab_bar::RenderProps {
                area: container_tabs,
                titles: &Tab::TITLES,
                selected: self.active_tab.index(),
                connected: self.props.socket_connected,
            },
        );

        match self.active_tab {
            Tab::Totals => self.totals_page.render(frame, container_page),
            Tab::Rooms => self.rooms_page.render(frame, container_page),
            Tab::Settings => self.settings_page.render(frame, container_page),
        }

        let usage = Paragraph::new(vec![
            usage_to_line(self.active_page_usage()),
            usage_to_line(self.usage_info()),
        ])
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Usage"));
        frame.render_widget(usage, container_usage);

        if let Some(toast) = self.props.toast.as_ref() {
            ToastOverlay.render(
                frame,
                toast::RenderProps {
                    area: container_page,
                    toast,
                },
            );
        }
    }
}
