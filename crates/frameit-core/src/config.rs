//! Editor configuration.
//!
//! Passed from the page as a plain object; every field is optional and
//! falls back to its default.

use serde::{Deserialize, Serialize};

use crate::engine::RenderOptions;

/// Download name used for the exported composite.
pub const DEFAULT_EXPORT_FILENAME: &str = "open_to_work_profile.png";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// File name offered for the exported PNG.
    pub export_filename: String,
    /// Anti-alias the circular clip edge over one pixel.
    pub smooth_edge: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            export_filename: DEFAULT_EXPORT_FILENAME.to_string(),
            smooth_edge: true,
        }
    }
}

impl EditorConfig {
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            smooth_edge: self.smooth_edge,
        }
    }
}
