use crate::state_store::{Settings, StoreAction};

pub fn reduce(state: &mut Settings, action: &StoreAction) {
    if let StoreAction::UpdateSettings(settings) = action {
        *state = settings.clone();
    }
}
