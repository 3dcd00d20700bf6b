//! Editor WASM bindings.
//!
//! [`JsFrameEditor`] is the one object the page keeps: it holds the loaded
//! photo, tracks drags, and produces the pixels for the canvas and the PNG
//! for download.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const editor = new JsFrameEditor({ smooth_edge: true });
//!
//! input.addEventListener('change', async () => {
//!   const ticket = editor.begin_load();
//!   const [photo, overlay] = await Promise.all([
//!     input.files[0].arrayBuffer(),
//!     fetch(overlayUrl).then((r) => r.arrayBuffer()),
//!   ]);
//!   editor.finish_load(ticket, new Uint8Array(photo), new Uint8Array(overlay));
//!   draw();
//! });
//!
//! canvas.addEventListener('mousedown', (e) => {
//!   const r = canvas.getBoundingClientRect();
//!   editor.pointer_down_client(e.clientX, e.clientY, r.left, r.top, r.width, r.height);
//! });
//!
//! function draw() {
//!   const size = editor.size;
//!   canvas.width = canvas.height = size;
//!   ctx.putImageData(new ImageData(editor.render(), size, size), 0, 0);
//! }
//! ```

use frameit_core::decode::{decode_image, decode_image_no_orientation};
use frameit_core::{display_to_backing, DisplayRect, Editor, EditorConfig, LoadTicket, Point};
use wasm_bindgen::prelude::*;

/// The profile frame editor.
#[wasm_bindgen]
pub struct JsFrameEditor {
    inner: Editor,
}

#[wasm_bindgen]
impl JsFrameEditor {
    /// Create an editor.
    ///
    /// `config` is an optional object with `export_filename` and
    /// `smooth_edge`; missing fields take their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsFrameEditor, JsValue> {
        let config: EditorConfig = if config.is_undefined() || config.is_null() {
            EditorConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid editor config: {}", e)))?
        };
        Ok(Self::with_config(config))
    }

    /// Start a load; pass the returned ticket to `finish_load`.
    ///
    /// Hides the download/reset controls until the load settles.
    pub fn begin_load(&mut self) -> u32 {
        self.inner.begin_load().value()
    }

    /// Decode both images and commit them if `ticket` is still current.
    ///
    /// A superseded ticket fails before anything is decoded. On error the
    /// previously loaded photo (if any) stays in place.
    pub fn finish_load(
        &mut self,
        ticket: u32,
        photo: &[u8],
        overlay: &[u8],
    ) -> Result<(), JsValue> {
        self.finish_load_bytes(LoadTicket::from_raw(ticket), photo, overlay)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// `begin_load` + `finish_load` for bytes that are already at hand.
    pub fn load(&mut self, photo: &[u8], overlay: &[u8]) -> Result<(), JsValue> {
        self.inner
            .load_bytes(photo, overlay)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(getter)]
    pub fn is_loaded(&self) -> bool {
        self.inner.is_loaded()
    }

    #[wasm_bindgen(getter)]
    pub fn is_loading(&self) -> bool {
        self.inner.is_loading()
    }

    /// Whether the download and reset buttons should be shown.
    #[wasm_bindgen(getter)]
    pub fn controls_visible(&self) -> bool {
        self.inner.controls_visible()
    }

    /// Whether a drag is in progress (for the canvas cursor style).
    #[wasm_bindgen(getter)]
    pub fn is_dragging(&self) -> bool {
        self.inner.is_dragging()
    }

    /// Side of the output square in pixels, or undefined before a load.
    #[wasm_bindgen(getter)]
    pub fn size(&self) -> Option<u32> {
        self.inner.size()
    }

    #[wasm_bindgen(getter)]
    pub fn offset_x(&self) -> Option<f64> {
        self.inner.current_offset().map(|o| o.x)
    }

    #[wasm_bindgen(getter)]
    pub fn offset_y(&self) -> Option<f64> {
        self.inner.current_offset().map(|o| o.y)
    }

    /// Press at a canvas backing-store position.
    pub fn pointer_down(&mut self, x: f64, y: f64) -> bool {
        self.inner.pointer_down(Point::new(x, y))
    }

    /// Drag to a canvas backing-store position. Returns true if a redraw is needed.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.inner.pointer_move(Point::new(x, y))
    }

    pub fn pointer_up(&mut self) -> bool {
        self.inner.pointer_up()
    }

    /// Press at a client (CSS pixel) position given the canvas bounding rect.
    pub fn pointer_down_client(
        &mut self,
        client_x: f64,
        client_y: f64,
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    ) -> bool {
        match self.to_backing(client_x, client_y, DisplayRect::new(left, top, width, height)) {
            Some(point) => self.inner.pointer_down(point),
            None => false,
        }
    }

    /// Drag to a client (CSS pixel) position given the canvas bounding rect.
    pub fn pointer_move_client(
        &mut self,
        client_x: f64,
        client_y: f64,
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    ) -> bool {
        match self.to_backing(client_x, client_y, DisplayRect::new(left, top, width, height)) {
            Some(point) => self.inner.pointer_move(point),
            None => false,
        }
    }

    /// Restore the centered crop. Returns true if a redraw is needed.
    pub fn reset(&mut self) -> bool {
        self.inner.reset()
    }

    /// RGBA pixels of the composite (`size * size * 4` bytes), or undefined
    /// before a load.
    pub fn render(&mut self) -> Option<Vec<u8>> {
        self.inner.render().map(|image| image.pixels.clone())
    }

    /// The composite encoded as PNG.
    pub fn export_png(&mut self) -> Result<Vec<u8>, JsValue> {
        self.inner
            .export_png()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Suggested download file name.
    #[wasm_bindgen(getter)]
    pub fn export_filename(&self) -> String {
        self.inner.export_filename().to_string()
    }
}

impl JsFrameEditor {
    pub(crate) fn with_config(config: EditorConfig) -> Self {
        Self {
            inner: Editor::new(config),
        }
    }

    fn finish_load_bytes(
        &mut self,
        ticket: LoadTicket,
        photo: &[u8],
        overlay: &[u8],
    ) -> frameit_core::Result<()> {
        self.inner.check_ticket(ticket)?;
        self.inner.finish_load(
            ticket,
            decode_image(photo),
            decode_image_no_orientation(overlay),
        )
    }

    fn to_backing(&self, client_x: f64, client_y: f64, rect: DisplayRect) -> Option<Point> {
        let size = self.inner.size()?;
        Some(display_to_backing(
            Point::new(client_x, client_y),
            rect,
            size,
            size,
        ))
    }
}
