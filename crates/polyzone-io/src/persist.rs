use polyzone_core::Board;
use polyzone_renderer::ViewTransform;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreError;
use crate::store::{KeyValueStore, Result};

/// Default key of the board snapshot.
pub const DEFAULT_STATE_KEY: &str = "polygons";
/// Key of the saved view transform.
pub const VIEW_KEY: &str = "view";

/// Board snapshot and view transform on top of a [`KeyValueStore`].
///
/// The snapshot is `{ "buffer": [...], "work": [...], "color_index": n }`
/// under a single key.
#[derive(Debug)]
pub struct PersistedState {
    store: Box<dyn KeyValueStore>,
    key: String,
}

impl PersistedState {
    pub fn new(store: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Read the saved board, `None` if nothing has been saved yet.
    pub fn load(&self) -> Result<Option<Board>> {
        let board = self.read::<Board>(&self.key)?;
        if let Some(board) = &board {
            log::info!(
                "loaded {} buffered and {} placed polygons",
                board.buffer().len(),
                board.work().len()
            );
        }
        Ok(board)
    }

    pub fn save(&mut self, board: &Board) -> Result<()> {
        let key = self.key.clone();
        self.write(&key, board)?;
        log::debug!(
            "saved {} buffered and {} placed polygons",
            board.buffer().len(),
            board.work().len()
        );
        Ok(())
    }

    /// Erase the saved board. The saved view is left alone.
    pub fn clear(&mut self) -> Result<()> {
        self.store.remove(&self.key)?;
        log::info!("cleared persisted state '{}'", self.key);
        Ok(())
    }

    pub fn load_view(&self) -> Result<Option<ViewTransform>> {
        self.read(VIEW_KEY)
    }

    pub fn save_view(&mut self, view: &ViewTransform) -> Result<()> {
        self.write(VIEW_KEY, view)
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(json) = self.store.get(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&json)
            .map(Some)
            .map_err(|source| StoreError::Corrupt {
                key: key.to_string(),
                source,
            })
    }

    fn write<T: Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value).map_err(|source| StoreError::Serialize {
            key: key.to_string(),
            source,
        })?;
        self.store.set(key, &json)
    }
}
