//! # Polyzone
//!
//! Application shell: one owned [`Session`] holding the board, the view
//! transform, the drag-drop controller and transient notices, driven by
//! discrete [`AppEvent`]s. A browser front end and the `polyzone` binary
//! feed the same dispatch.

pub mod session;

pub use session::{AppEvent, PointerButton, Response, Session, SessionError};
