use comms::event::Event;

use crate::state_store::{state::ToastLevel, StoreAction, Toast};

fn raise(state: &mut Option<Toast>, level: ToastLevel, message: String) {
    let id = state.as_ref().map(|toast| toast.id + 1).unwrap_or(0);

    *state = Some(Toast { id, level, message });
}

/// `connection_lost` tells whether a connection was lost before this action
pub fn reduce(state: &mut Option<Toast>, action: &StoreAction, connection_lost: bool) {
    match action {
        StoreAction::Received(Event::Error(err)) => {
            raise(state, ToastLevel::Error, err.message.clone());
        }
        StoreAction::ConnectionLost => {
            raise(
                state,
                ToastLevel::Warning,
                "Connection lost, reconnecting...".into(),
            );
        }
        // the first connection of the program goes without a toast
        StoreAction::ConnectionOpened if connection_lost => {
            raise(state, ToastLevel::Info, "Reconnected".into());
        }
        StoreAction::DismissToast => *state = None,
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use comms::action_type::ActionType;

    use super::*;

    #[test]
    fn test_first_connection_is_silent() {
        let mut toast = None;

        reduce(&mut toast, &StoreAction::ConnectionOpened, false);
        assert_eq!(toast, None);
    }

    #[test]
    fn test_reconnect_replaces_warning() {
        let mut toast = None;

        reduce(&mut toast, &StoreAction::ConnectionLost, false);
        assert_eq!(toast.as_ref().map(|t| t.level), Some(ToastLevel::Warning));

        reduce(&mut toast, &StoreAction::ConnectionOpened, true);
        let toast = toast.expect("a reconnect toast");
        assert_eq!(toast.level, ToastLevel::Info);
        assert_eq!(toast.id, 1);
    }

    #[test]
    fn test_error_event_raises_message() {
        let mut toast = None;

        reduce(
            &mut toast,
            &StoreAction::Received(Event::error(ActionType::JoinRoomRequest, "Wrong password")),
            false,
        );
        assert_eq!(
            toast,
            Some(Toast {
                id: 0,
                level: ToastLevel::Error,
                message: "Wrong password".into()
            })
        );

        reduce(&mut toast, &StoreAction::DismissToast, false);
        assert_eq!(toast, None);
    }

    #[test]
    fn test_reconnect_after_dismissed_warning() {
        let mut toast = None;

        reduce(&mut toast, &StoreAction::ConnectionLost, false);
        reduce(&mut toast, &StoreAction::DismissToast, true);
        assert_eq!(toast, None);

        reduce(&mut toast, &StoreAction::ConnectionOpened, true);
        let toast = toast.expect("a reconnect toast");
        assert_eq!(toast.level, ToastLevel::Info);
        assert_eq!(toast.message, "Reconnected");
    }
}
