use polyzone_core::generator::VERTEX_COUNT;
use polyzone_core::{Color, Point, PolygonDescriptor, PolygonId};
use serde::de::Error as _;
use serde::{Deserialize, Serialize};

use crate::error::{DragError, Result};

/// MIME type the payload travels under in the platform drag transfer.
pub const PAYLOAD_MIME: &str = "application/json";

/// What crosses the drag boundary: identity and geometry, never a position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferPayload {
    pub id: PolygonId,
    pub points: Vec<Point>,
    pub fill: Color,
}

impl TransferPayload {
    pub fn from_descriptor(polygon: &PolygonDescriptor) -> Self {
        Self {
            id: polygon.id(),
            points: polygon.points().to_vec(),
            fill: *polygon.fill(),
        }
    }

    pub fn encode(&self) -> Result<String> {
        serde_json::to_string(self).map_err(DragError::Encode)
    }

    /// Parse transfer data. Unknown fields (including a stray position) are ignored.
    ///
    /// An outline outside the generated vertex range is rejected as malformed.
    pub fn decode(data: &str) -> Result<Self> {
        let payload: Self = serde_json::from_str(data).map_err(DragError::MalformedPayload)?;
        let vertices = payload.points.len();
        if !VERTEX_COUNT.contains(&vertices) {
            return Err(DragError::MalformedPayload(serde_json::Error::custom(
                format!(
                    "expected {}..={} points, got {vertices}",
                    VERTEX_COUNT.start(),
                    VERTEX_COUNT.end()
                ),
            )));
        }
        Ok(payload)
    }

    pub fn into_descriptor(self) -> PolygonDescriptor {
        PolygonDescriptor::new(self.id, self.points, self.fill)
    }
}
