//! Input events understood by the update loop

use super::types::Position;

/// An input event drained at the start of a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Window closed or quit requested
    Quit,
    /// Pointer click at a window position (top-left origin)
    Click(Position),
}

/// What the loop should do after handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    /// The click landed on the restart control while halted
    Restarted,
    Exit,
}
