use crate::state_store::StoreAction;

pub fn reduce(state: &mut bool, action: &StoreAction) {
    match action {
        StoreAction::ConnectionOpened => *state = true,
        StoreAction::ConnectionLost => *state = false,
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follows_connection() {
        let mut connected = false;

        reduce(&mut connected, &StoreAction::ConnectionOpened);
        assert!(connected);

        reduce(&mut connected, &StoreAction::IncrementLife);
        assert!(connected);

        reduce(&mut connected, &StoreAction::ConnectionLost);
        assert!(!connected);
    }
}
