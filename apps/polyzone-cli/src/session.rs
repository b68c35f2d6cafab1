use std::time::Instant;

use polyzone_core::{Board, Placement, Point, PolygonGenerator, PolygonId};
use polyzone_dragdrop::controller::{DragEnded, DragOver, DragStarted};
use polyzone_dragdrop::{DragDropController, DragError, NoticeBoard, PolygonPlaced};
use polyzone_io::{KeyValueStore, PersistedState, StoreError, ZoneSettings};
use polyzone_renderer::{GridLabels, RenderFrame, ViewTransform};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Drag error: {0}")]
    Drag(#[from] DragError),

    #[error("No buffered polygon with id {0}")]
    UnknownPolygon(PolygonId),
}

pub type Result<T> = std::result::Result<T, SessionError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// An input event from the UI layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AppEvent {
    /// Mouse wheel over the work canvas.
    Wheel { delta_y: f64 },
    PointerDown { button: PointerButton, position: Point },
    PointerMove { position: Point },
    PointerUp,
    /// A buffer tile was picked up.
    DragStart { id: PolygonId },
    DragOver,
    /// Transfer data released over the work canvas at a screen position.
    Drop { data: String, position: Point },
    DragEnd,
    /// Timer tick; lets transient notices expire.
    Tick,
}

/// What the UI layer should do in response to an event.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Ignored,
    Redraw,
    DragStarted(DragStarted),
    DragOver(DragOver),
    Placed {
        placed: PolygonPlaced,
        outcome: Placement,
    },
    DropRejected { message: String },
    DragEnded(DragEnded),
}

/// The whole application state, owned in one place and driven by [`Session::handle`].
#[derive(Debug)]
pub struct Session {
    settings: ZoneSettings,
    board: Board,
    view: ViewTransform,
    drag: DragDropController,
    notices: NoticeBoard,
    generator: PolygonGenerator,
    persisted: PersistedState,
}

impl Session {
    /// Open a session on `store`, loading whatever was saved there.
    ///
    /// A corrupt snapshot is logged and replaced by an empty board.
    pub fn open(
        settings: ZoneSettings,
        store: Box<dyn KeyValueStore>,
        generator: PolygonGenerator,
    ) -> Result<Self> {
        let persisted = PersistedState::new(store, settings.storage_key.clone());

        let board = match persisted.load() {
            Ok(board) => board.unwrap_or_default(),
            Err(StoreError::Corrupt { key, source }) => {
                log::warn!("ignoring corrupt snapshot under '{key}': {source}");
                Board::new()
            }
            Err(e) => return Err(e.into()),
        };
        let view = match persisted.load_view() {
            Ok(view) => view.unwrap_or_default(),
            Err(StoreError::Corrupt { key, source }) => {
                log::warn!("ignoring corrupt view under '{key}': {source}");
                ViewTransform::new()
            }
            Err(e) => return Err(e.into()),
        };

        let generator = generator.with_color_mode(settings.color_mode, settings.palette.clone());
        let notices = NoticeBoard::new(settings.notice_ttl());

        Ok(Self {
            settings,
            board,
            view,
            drag: DragDropController::new(),
            notices,
            generator,
            persisted,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    /// Message currently shown over the work canvas.
    pub fn notice(&self, now: Instant) -> Option<&str> {
        self.notices.active(now)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Generate a batch into the buffer and persist. Returns the batch size.
    pub fn generate_batch(&mut self) -> Result<usize> {
        let before = self.board.clone();
        let added = self.board.fill_buffer(&mut self.generator);
        self.commit(before)?;
        log::info!("generated {added} polygons");
        Ok(added)
    }

    /// Persist the board and the current view.
    pub fn save(&mut self) -> Result<()> {
        self.persisted.save(&self.board)?;
        self.persisted.save_view(&self.view)?;
        Ok(())
    }

    /// Empty both collections and erase the saved board.
    pub fn reset(&mut self) -> Result<()> {
        self.persisted.clear()?;
        self.board.reset();
        Ok(())
    }

    /// Persist the board. On failure the board is restored to `before`, so
    /// memory never runs ahead of what the store holds.
    fn commit(&mut self, before: Board) -> Result<()> {
        if let Err(e) = self.persisted.save(&self.board) {
            log::warn!("save failed, rolling back board: {e}");
            self.board = before;
            return Err(e.into());
        }
        Ok(())
    }

    // ── Event dispatch ───────────────────────────────────────────────

    pub fn handle(&mut self, event: AppEvent, now: Instant) -> Result<Response> {
        match event {
            AppEvent::Wheel { delta_y } => {
                let before = self.view.scale();
                let after = self.view.zoom(delta_y);
                Ok(if after != before {
                    Response::Redraw
                } else {
                    Response::Ignored
                })
            }
            AppEvent::PointerDown { button, position } => {
                if button != PointerButton::Primary {
                    return Ok(Response::Ignored);
                }
                self.view.begin_pan(position);
                Ok(Response::Ignored)
            }
            AppEvent::PointerMove { position } => Ok(if self.view.update_pan(position) {
                Response::Redraw
            } else {
                Response::Ignored
            }),
            AppEvent::PointerUp => {
                self.view.end_pan();
                Ok(Response::Ignored)
            }
            AppEvent::DragStart { id } => {
                let polygon = self
                    .board
                    .find_in_buffer(&id)
                    .ok_or(SessionError::UnknownPolygon(id))?;
                Ok(Response::DragStarted(self.drag.drag_start(polygon)?))
            }
            AppEvent::DragOver => Ok(Response::DragOver(self.drag.drag_over())),
            AppEvent::Drop { data, position } => self.accept_drop(&data, position, now),
            AppEvent::DragEnd => Ok(Response::DragEnded(self.drag.drag_end())),
            AppEvent::Tick => Ok(if self.notices.expire(now) {
                Response::Redraw
            } else {
                Response::Ignored
            }),
        }
    }

    fn accept_drop(&mut self, data: &str, position: Point, now: Instant) -> Result<Response> {
        let placed = match self
            .drag
            .drop(data, position, self.settings.canvas_origin, &self.view)
        {
            Ok(placed) => placed,
            Err(e) => {
                let message = e.user_message().to_string();
                self.notices.show(message.clone(), now);
                return Ok(Response::DropRejected { message });
            }
        };

        let before = self.board.clone();
        let outcome = self.board.place(placed.polygon.clone());
        if outcome.changed() {
            self.commit(before)?;
        }
        Ok(Response::Placed { placed, outcome })
    }

    // ── Rendering ────────────────────────────────────────────────────

    pub fn grid(&self) -> GridLabels {
        GridLabels::compute(
            &self.view,
            self.settings.canvas_width,
            self.settings.canvas_height,
        )
    }

    pub fn frame(&self, now: Instant) -> RenderFrame {
        let mut frame = RenderFrame::build(
            &self.board,
            &self.view,
            self.settings.canvas_width,
            self.settings.canvas_height,
            self.settings.canvas_origin,
            self.drag.dragging(),
        );
        frame.notice = self.notices.active(now).map(str::to_string);
        frame
    }
}
