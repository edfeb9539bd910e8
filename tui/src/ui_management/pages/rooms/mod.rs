use crossterm::event::KeyEvent;
use ratatui::{prelude::*, Frame};
use tokio::sync::mpsc::UnboundedSender;

use crate::{
    state_store::{action::Action, State},
    ui_management::components::{
        full_page_loader::{self, FullPageLoader},
        usage::{HasUsageInfo, UsageInfo},
        CapturesInput, Component, ComponentRender,
    },
};

use self::{active_room::ActiveRoom, join_room::JoinRoom, room_list::RoomList};

mod active_room;
mod join_room;
mod room_list;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomsView {
    Loader,
    ActiveRoom,
    JoinRoom,
    RoomList,
}

/// Which view of the rooms tab the state asks for
pub fn route(state: &State) -> RoomsView {
    if state.rooms.is_none() {
        RoomsView::Loader
    } else if state.active_room.is_some() {
        RoomsView::ActiveRoom
    } else if state.attempted_room.is_some() {
        RoomsView::JoinRoom
    } else {
        RoomsView::RoomList
    }
}

pub struct RoomsPage {
    view: RoomsView,
    //
    room_list: RoomList,
    join_room: JoinRoom,
    active_room: ActiveRoom,
}

impl CapturesInput for RoomsPage {
    fn is_editing(&self) -> bool {
        match self.view {
            RoomsView::Loader | RoomsView::ActiveRoom => false,
            RoomsView::JoinRoom => self.join_room.is_editing(),
            RoomsView::RoomList => self.room_list.is_editing(),
        }
    }
}

impl Component for RoomsPage {
    fn new(state: &State, action_tx: UnboundedSender<Action>) -> Self
    where
        Self: Sized,
    {
        RoomsPage {
            view: route(state),
            room_list: RoomList::new(state, action_tx.clone()),
            join_room: JoinRoom::new(state, action_tx.clone()),
            active_room: ActiveRoom::new(state, action_tx),
        }
    }

    fn move_with_state(self, state: &State) -> Self
    where
        Self: Sized,
    {
        RoomsPage {
            view: route(state),
            room_list: self.room_list.move_with_state(state),
            join_room: self.join_room.move_with_state(state),
            active_room: self.active_room.move_with_state(state),
        }
    }

    fn name(&self) -> &str {
        match self.view {
            RoomsView::Loader => "Rooms",
            RoomsView::ActiveRoom => self.active_room.name(),
            RoomsView::JoinRoom => self.join_room.name(),
            RoomsView::RoomList => self.room_list.name(),
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        match self.view {
            RoomsView::Loader => {}
            RoomsView::ActiveRoom => self.active_room.handle_key_event(key),
            RoomsView::JoinRoom => self.join_room.handle_key_event(key),
            RoomsView::RoomList => self.room_list.handle_key_event(key),
        }
    }
}

impl ComponentRender<Rect> for RoomsPage {
    fn render<B: Backend>(&self, frame: &mut Frame<B>, area: Rect) {
        match self.view {
            RoomsView::Loader => FullPageLoader.render(
                frame,
                full_page_loader::RenderProps {
                    area,
                    message: "Waiting for the room list...",
                },
            ),
            RoomsView::ActiveRoom => self.active_room.render(frame, area),
            RoomsView::JoinRoom => self.join_room.render(frame, area),
            RoomsView::RoomList => self.room_list.render(frame, area),
        }
    }
}

impl HasUsageInfo for RoomsPage {
    fn usage_info(&self) -> UsageInfo {
        match self.view {
            RoomsView::Loader => UsageInfo {
                description: Some("Connecting".into()),
                lines: vec![],
            },
            RoomsView::ActiveRoom => self.active_room.usage_info(),
            RoomsView::JoinRoom => self.join_room.usage_info(),
            RoomsView::RoomList => self.room_list.usage_info(),
        }
    }
}
