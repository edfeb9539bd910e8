use std::time::Duration;

use tokio::time::Instant;

use super::{action::LifeStep, StoreAction};

/// How long a control is held before it starts repeating
pub const HOLD_DELAY: Duration = Duration::from_millis(500);
pub const REPEAT_INTERVAL: Duration = Duration::from_millis(48);

fn step_action(step: LifeStep) -> StoreAction {
    match step {
        LifeStep::Increment => StoreAction::IncrementLife,
        LifeStep::Decrement => StoreAction::DecrementLife,
    }
}

/// Press-and-hold on the life controls
#[derive(Debug, Default)]
pub struct LifeRepeater {
    /// The held step and when it fires next
    held: Option<(LifeStep, Instant)>,
}

impl LifeRepeater {
    /// Applies one step right away, a previous hold is dropped
    pub fn press(&mut self, step: LifeStep, now: Instant) -> StoreAction {
        self.held = Some((step, now + HOLD_DELAY));

        step_action(step)
    }

    pub fn release(&mut self) {
        self.held = None;
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.held.map(|(_, deadline)| deadline)
    }

    /// The step to repeat, if the deadline has passed
    pub fn fire(&mut self, now: Instant) -> Option<StoreAction> {
        let (step, deadline) = self.held.as_mut()?;
        if now < *deadline {
            return None;
        }

        *deadline = now + REPEAT_INTERVAL;

        Some(step_action(*step))
    }
}
