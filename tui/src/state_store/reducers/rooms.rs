use comms::event::{Event, RoomSummary};

use crate::state_store::StoreAction;

pub fn reduce(state: &mut Option<Vec<RoomSummary>>, action: &StoreAction) {
    if let StoreAction::Received(Event::ListRoomsSuccess(reply)) = action {
        *state = Some(reply.rooms.clone());
    }
}

#[cfg(test)]
mod tests {
    use comms::event::ListRoomsReplyEvent;

    use super::*;

    #[test]
    fn test_listing_replaces_rooms() {
        let mut rooms = None;
        let listing = vec![RoomSummary {
            id: "r1".into(),
            name: "friday".into(),
            user_count: 3,
            locked: false,
        }];

        reduce(
            &mut rooms,
            &StoreAction::Received(Event::ListRoomsSuccess(ListRoomsReplyEvent {
                rooms: listing.clone(),
            })),
        );
        assert_eq!(rooms, Some(listing));

        reduce(&mut rooms, &StoreAction::ConnectionLost);
        assert!(rooms.is_some());
    }
}
