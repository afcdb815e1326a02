//! Run-state machine
//!
//! A run is either advancing or halted. It halts when every vehicle has come
//! to a stop and only an explicit restart brings it back.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Running,
    Halted,
}

impl RunState {
    pub fn is_running(self) -> bool {
        self == RunState::Running
    }

    pub fn is_halted(self) -> bool {
        self == RunState::Halted
    }
}
