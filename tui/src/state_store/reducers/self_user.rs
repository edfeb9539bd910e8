use comms::event::User;

use crate::state_store::StoreAction;

pub fn reduce(state: &mut User, action: &StoreAction) {
    match action {
        StoreAction::IncrementLife => state.life = state.life.saturating_add(1),
        StoreAction::DecrementLife => state.life = state.life.saturating_sub(1),
        StoreAction::ResetLife { life } => state.life = *life,
        StoreAction::SetName { name } => state.name = name.clone(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_store::reducers::fixtures::user;

    #[test]
    fn test_life_steps() {
        let mut me = user("me", 20);

        reduce(&mut me, &StoreAction::IncrementLife);
        reduce(&mut me, &StoreAction::IncrementLife);
        reduce(&mut me, &StoreAction::DecrementLife);
        assert_eq!(me.life, 21);

        reduce(&mut me, &StoreAction::ResetLife { life: 40 });
        assert_eq!(me.life, 40);
    }

    #[test]
    fn test_life_may_go_negative() {
        let mut me = user("me", 0);

        reduce(&mut me, &StoreAction::DecrementLife);
        assert_eq!(me.life, -1);
    }

    #[test]
    fn test_life_stops_at_the_bounds() {
        let mut me = user("me", i32::MAX);

        reduce(&mut me, &StoreAction::IncrementLife);
        assert_eq!(me.life, i32::MAX);

        reduce(&mut me, &StoreAction::ResetLife { life: i32::MIN });
        reduce(&mut me, &StoreAction::DecrementLife);
        assert_eq!(me.life, i32::MIN);
    }

    #[test]
    fn test_rename_keeps_id() {
        let mut me = user("me", 20);

        reduce(
            &mut me,
            &StoreAction::SetName {
                name: "mallory".into(),
            },
        );
        assert_eq!(me.name, "mallory");
        assert_eq!(me.id, "me");
    }
}
