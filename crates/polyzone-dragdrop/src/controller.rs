use polyzone_core::{Point, PolygonDescriptor, PolygonId};
use polyzone_renderer::ViewTransform;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::payload::{TransferPayload, PAYLOAD_MIME};

/// Opacity of the source tile while its polygon is being dragged.
pub const SOURCE_DIMMED_OPACITY: f32 = 0.5;
/// Opacity of the source tile once the gesture is over.
pub const SOURCE_RESTORED_OPACITY: f32 = 1.0;

/// Where the current drag gesture stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging { source: PolygonId },
    Dropped { id: PolygonId },
    Cancelled { source: PolygonId },
}

/// Visual affordance reported to the platform drag machinery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropEffect {
    Move,
}

/// Everything the front end needs to start a platform drag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragStarted {
    pub mime: String,
    pub payload: String,
    pub effect_allowed: DropEffect,
    pub source_opacity: f32,
}

/// Reply to a drag-over on the work canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragOver {
    /// The default must be suppressed or the platform refuses the drop.
    pub prevent_default: bool,
    pub drop_effect: DropEffect,
}

/// Emitted on a successful drop: the polygon with its logical position filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonPlaced {
    pub polygon: PolygonDescriptor,
}

/// How a gesture finished, and what to do with the source tile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragEnded {
    pub outcome: DragPhase,
    pub source_opacity: f32,
}

/// Per-gesture state machine: `Idle → Dragging → Dropped | Cancelled`.
///
/// The terminal phase is reported by [`DragDropController::drag_end`], after
/// which the controller is idle again.
#[derive(Debug, Default)]
pub struct DragDropController {
    phase: DragPhase,
}

impl DragDropController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// Id of the buffer polygon currently being dragged.
    pub fn dragging(&self) -> Option<PolygonId> {
        match self.phase {
            DragPhase::Dragging { source } => Some(source),
            _ => None,
        }
    }

    /// Serialize `polygon` into a transfer payload and enter `Dragging`.
    pub fn drag_start(&mut self, polygon: &PolygonDescriptor) -> Result<DragStarted> {
        if self.phase != DragPhase::Idle {
            log::debug!("drag started while {:?}, restarting gesture", self.phase);
        }
        let payload = TransferPayload::from_descriptor(polygon).encode()?;
        self.phase = DragPhase::Dragging {
            source: polygon.id(),
        };
        log::debug!("drag start {}", polygon.id());
        Ok(DragStarted {
            mime: PAYLOAD_MIME.to_string(),
            payload,
            effect_allowed: DropEffect::Move,
            source_opacity: SOURCE_DIMMED_OPACITY,
        })
    }

    pub fn drag_over(&self) -> DragOver {
        DragOver {
            prevent_default: true,
            drop_effect: DropEffect::Move,
        }
    }

    /// Decode a dropped payload and place it at `screen`.
    ///
    /// A malformed payload leaves the phase untouched, so the gesture ends as
    /// cancelled. Payloads from outside a tracked gesture are accepted too.
    pub fn drop(
        &mut self,
        data: &str,
        screen: Point,
        canvas_origin: Point,
        view: &ViewTransform,
    ) -> Result<PolygonPlaced> {
        let payload = TransferPayload::decode(data).map_err(|e| {
            log::warn!("rejecting drop: {e}");
            e
        })?;
        let at = view.screen_to_logical(screen, canvas_origin);
        let polygon = payload.into_descriptor().with_position(at);

        self.phase = DragPhase::Dropped { id: polygon.id() };
        log::debug!("dropped {} at ({:.2}, {:.2})", polygon.id(), at.x, at.y);
        Ok(PolygonPlaced { polygon })
    }

    /// Finish the gesture. Always restores the source opacity.
    pub fn drag_end(&mut self) -> DragEnded {
        let outcome = match self.phase {
            DragPhase::Dragging { source } => DragPhase::Cancelled { source },
            other => other,
        };
        self.phase = DragPhase::Idle;
        DragEnded {
            outcome,
            source_opacity: SOURCE_RESTORED_OPACITY,
        }
    }
}
