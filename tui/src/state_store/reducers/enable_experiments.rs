use crate::state_store::StoreAction;

pub fn reduce(state: &mut bool, action: &StoreAction) {
    if let StoreAction::ToggleExperiments = action {
        *state = !*state;
    }
}
