use crate::state_store::StoreAction;

/// Set from a lost connection until the next one is opened
pub fn reduce(state: &mut bool, action: &StoreAction) {
    match action {
        StoreAction::ConnectionLost => *state = true,
        StoreAction::ConnectionOpened => *state = false,
        _ => {}
    }
}
