//! # Polyzone Drag-Drop
//!
//! Moves polygons from the buffer onto the work canvas. A drag serializes the
//! polygon into a JSON transfer payload; the drop decodes it and converts the
//! pointer position into logical canvas coordinates.
//!
//! Malformed payloads never propagate past the drop: they become a
//! [`DragError`] that callers turn into a transient [`notice::Notice`].

pub mod error;
pub mod payload;
pub mod controller;
pub mod notice;

pub use controller::{DragDropController, DragPhase, DropEffect, PolygonPlaced};
pub use error::DragError;
pub use notice::NoticeBoard;
pub use payload::TransferPayload;
