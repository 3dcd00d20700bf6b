//! Editor session: load lifecycle, drag wiring and export.
//!
//! The page owns exactly one [`Editor`]. It starts empty; a load moves it to
//! loaded by replacing the whole [`ViewState`], and nothing ever moves it
//! back.
//!
//! # Loading
//!
//! Reading the user's file and fetching the overlay are asynchronous on the
//! page side. A load is bracketed by [`Editor::begin_load`], which hands out
//! a [`LoadTicket`], and [`Editor::finish_load`], which receives both decoded
//! results at once. Only the most recently issued ticket may commit, so a
//! slow first pick cannot overwrite a faster second one.

use log::{debug, warn};

use crate::config::EditorConfig;
use crate::decode::{decode_image, decode_image_no_orientation, DecodeError, DecodedImage};
use crate::encode::encode_png;
use crate::engine::{initialize, render, DragSession, Offset, Point, Surface, ViewState};
use crate::error::{EditorError, Layer, Result};

/// Identifies one load attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u32);

impl LoadTicket {
    pub fn from_raw(value: u32) -> Self {
        Self(value)
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

/// The editor behind the canvas.
#[derive(Debug)]
pub struct Editor {
    config: EditorConfig,
    state: Option<ViewState>,
    drag: Option<DragSession>,
    surface: Surface,
    dirty: bool,
    latest_ticket: u32,
    loading: bool,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            config,
            state: None,
            drag: None,
            surface: Surface::new(0),
            dirty: false,
            latest_ticket: 0,
            loading: false,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn is_loaded(&self) -> bool {
        self.state.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether the download and reset controls should be shown.
    ///
    /// They hide as soon as a new load begins and come back once it settles.
    pub fn controls_visible(&self) -> bool {
        self.is_loaded() && !self.loading
    }

    pub fn state(&self) -> Option<&ViewState> {
        self.state.as_ref()
    }

    pub fn size(&self) -> Option<u32> {
        self.state.as_ref().map(ViewState::size)
    }

    pub fn current_offset(&self) -> Option<Offset> {
        self.state.as_ref().map(ViewState::current_offset)
    }

    /// Start a load and return its ticket.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.latest_ticket = self.latest_ticket.wrapping_add(1);
        self.loading = true;
        debug!("load {} started", self.latest_ticket);
        LoadTicket(self.latest_ticket)
    }

    /// Fail with `EditorError::StaleLoad` unless `ticket` is the latest.
    ///
    /// Callers that decode on demand check this first so a superseded load
    /// skips decoding altogether.
    pub fn check_ticket(&self, ticket: LoadTicket) -> Result<()> {
        if ticket.0 == self.latest_ticket {
            return Ok(());
        }
        warn!(
            "discarding load {}: superseded by load {}",
            ticket.0, self.latest_ticket
        );
        Err(EditorError::StaleLoad {
            ticket: ticket.0,
            latest: self.latest_ticket,
        })
    }

    /// Commit a load once both images have been decoded.
    ///
    /// The new state replaces the old one only if `ticket` is still the
    /// latest and both images are valid; on any error the previous state is
    /// kept untouched.
    ///
    /// # Errors
    ///
    /// - `EditorError::StaleLoad` if a newer load has begun since
    /// - `EditorError::Decode` if either image failed to decode
    /// - `EditorError::InvalidImage` if either image has a zero dimension
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        photo: std::result::Result<DecodedImage, DecodeError>,
        overlay: std::result::Result<DecodedImage, DecodeError>,
    ) -> Result<()> {
        self.check_ticket(ticket)?;
        self.loading = false;

        let loaded = photo
            .map_err(EditorError::decode(Layer::Photo))
            .and_then(|photo| {
                let overlay = overlay.map_err(EditorError::decode(Layer::Overlay))?;
                initialize(photo, overlay)
            });

        match loaded {
            Ok(state) => {
                debug!("load {} committed ({}px crop)", ticket.0, state.size());
                self.state = Some(state);
                self.drag = None;
                self.dirty = true;
                Ok(())
            }
            Err(e) => {
                warn!("load {} failed: {}", ticket.0, e);
                Err(e)
            }
        }
    }

    /// Decode both byte buffers and load them in one step.
    ///
    /// The overlay skips EXIF orientation; it is an authored asset.
    pub fn load_bytes(&mut self, photo_bytes: &[u8], overlay_bytes: &[u8]) -> Result<()> {
        let ticket = self.begin_load();
        self.finish_load(
            ticket,
            decode_image(photo_bytes),
            decode_image_no_orientation(overlay_bytes),
        )
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Press at `point` (backing-store coordinates). Ignored when empty.
    pub fn pointer_down(&mut self, point: Point) -> bool {
        match &self.state {
            Some(state) => {
                self.drag = Some(DragSession::begin(state, point));
                true
            }
            None => false,
        }
    }

    /// Move to `point` during a drag. Returns whether the offset changed.
    pub fn pointer_move(&mut self, point: Point) -> bool {
        let (Some(drag), Some(state)) = (&self.drag, &mut self.state) else {
            return false;
        };

        let before = state.current_offset();
        let after = drag.update(state, point);
        let changed = after != before;
        self.dirty |= changed;
        changed
    }

    /// Release the pointer. Returns whether a drag was in progress.
    pub fn pointer_up(&mut self) -> bool {
        self.drag.take().is_some()
    }

    /// Restore the centered crop. Returns false when nothing is loaded.
    pub fn reset(&mut self) -> bool {
        match &mut self.state {
            Some(state) => {
                state.reset();
                self.dirty = true;
                debug!("crop reset");
                true
            }
            None => false,
        }
    }

    /// The current composite, re-rendered if the state changed.
    pub fn render(&mut self) -> Option<&DecodedImage> {
        let state = self.state.as_ref()?;
        if self.dirty {
            render(state, &mut self.surface, self.config.render_options());
            self.dirty = false;
        }
        Some(self.surface.image())
    }

    /// Encode the current composite as PNG.
    pub fn export_png(&mut self) -> Result<Vec<u8>> {
        let image = self.render().ok_or(EditorError::NotLoaded)?;
        let png = encode_png(&image.pixels, image.width, image.height)?;
        debug!("exported {} bytes as {}", png.len(), self.config.export_filename);
        Ok(png)
    }

    pub fn export_filename(&self) -> &str {
        &self.config.export_filename
    }
}
