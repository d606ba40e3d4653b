//! Server use cases: turning received events into cursor actions.

pub mod apply_input;

pub use apply_input::{ApplyInputUseCase, ClickButton, CursorBackend, CursorError};
