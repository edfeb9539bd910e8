/// Direction of a single life total step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeStep {
    Increment,
    Decrement,
}

/// Intents sent by the ui to the state store
#[derive(Debug, Clone)]
pub enum Action {
    /// A +/- control went down, it repeats until released
    PressLife { step: LifeStep },
    ReleaseLife,
    ResetLife,
    RefreshRooms,
    SelectRoom { room_id: String },
    CancelJoin,
    JoinRoom { room_id: String, password: Option<String> },
    CreateRoom { name: String, password: Option<String> },
    LeaveRoom,
    MoveUser { user_id: String, offset: isize },
    SetName { name: String },
    SetStartingLife { life: i32 },
    ToggleExperiments,
    DismissToast,
    Exit,
}
