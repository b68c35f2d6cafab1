use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::generator::PolygonGenerator;
use crate::geometry::{PolygonDescriptor, PolygonId};

/// Outcome of placing a polygon on the work canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Taken out of the buffer and appended to the work collection.
    Moved,
    /// Not in the buffer (e.g. dropped from elsewhere); appended to work.
    Adopted,
    /// Already on the work canvas; nothing changed.
    AlreadyPlaced,
}

impl Placement {
    pub fn changed(&self) -> bool {
        !matches!(self, Placement::AlreadyPlaced)
    }
}

/// The two polygon collections plus the palette cursor.
///
/// A polygon id lives in at most one of `buffer` and `work`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Board {
    #[serde(default)]
    buffer: Vec<PolygonDescriptor>,
    #[serde(default)]
    work: Vec<PolygonDescriptor>,
    #[serde(default)]
    color_index: usize,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Collections ──────────────────────────────────────────────────

    pub fn buffer(&self) -> &[PolygonDescriptor] {
        &self.buffer
    }

    pub fn work(&self) -> &[PolygonDescriptor] {
        &self.work
    }

    pub fn color_index(&self) -> usize {
        self.color_index
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty() && self.work.is_empty()
    }

    pub fn find(&self, id: &PolygonId) -> Option<&PolygonDescriptor> {
        self.buffer
            .iter()
            .chain(self.work.iter())
            .find(|p| p.id() == *id)
    }

    pub fn find_in_buffer(&self, id: &PolygonId) -> Option<&PolygonDescriptor> {
        self.buffer.iter().find(|p| p.id() == *id)
    }

    /// Generate a batch into the buffer. Returns how many polygons were added.
    pub fn fill_buffer<R: Rng>(&mut self, generator: &mut PolygonGenerator<R>) -> usize {
        let batch = generator.generate_batch(&mut self.color_index);
        let added = batch.len();
        self.extend_buffer(batch);
        added
    }

    /// Append polygons to the buffer. Positions are stripped and ids already
    /// present on the board are skipped.
    pub fn extend_buffer(&mut self, polygons: impl IntoIterator<Item = PolygonDescriptor>) {
        for polygon in polygons {
            if self.find(&polygon.id()).is_some() {
                log::warn!("polygon {} already on the board, not buffering", polygon.id());
                continue;
            }
            self.buffer.push(polygon.without_position());
        }
    }

    /// Move a placed polygon onto the work canvas by id.
    ///
    /// Removes at most one buffer entry and never duplicates an id in work.
    pub fn place(&mut self, placed: PolygonDescriptor) -> Placement {
        let id = placed.id();
        if self.work.iter().any(|p| p.id() == id) {
            log::debug!("polygon {id} already placed, ignoring drop");
            return Placement::AlreadyPlaced;
        }

        let outcome = match self.buffer.iter().position(|p| p.id() == id) {
            Some(idx) => {
                self.buffer.remove(idx);
                Placement::Moved
            }
            None => Placement::Adopted,
        };
        self.work.push(placed);
        log::debug!("polygon {id} placed ({outcome:?})");
        outcome
    }

    /// Clear both collections and the palette cursor.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.work.clear();
        self.color_index = 0;
    }

    // ── Serialization ────────────────────────────────────────────────

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
