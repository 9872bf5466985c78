// State management module.
// Session state store, editor cursors, and the console activity log.

pub mod console;
pub mod editor;
pub mod session;

pub use console::{Console, ConsoleLevel};
pub use editor::TextCursor;
pub use session::{RunPhase, SessionState, Theme};
