//! Clipboard abstraction for copying boxes as text.

use crate::div_box::{BackgroundLayer, DivBox, DivBoxOptions};
use serde::Deserialize;
use thiserror::Error;

/// Clipboard errors.
#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("Clipboard IO error: {0}")]
    Io(String),
    #[error("Clipboard is empty")]
    Empty,
    #[error("Clipboard does not hold a box: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Result type for clipboard operations.
pub type ClipboardResult<T> = Result<T, ClipboardError>;

/// A text clipboard.
///
/// Backends that can only read asynchronously (the browser) return
/// [`ClipboardError::Unavailable`] here and feed the text back later through
/// [`crate::Canvas::paste_text`].
pub trait ClipboardBackend {
    fn write_text(&mut self, text: &str) -> ClipboardResult<()>;
    fn read_text(&mut self) -> ClipboardResult<String>;
}

/// In-process clipboard.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    text: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current contents.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

impl ClipboardBackend for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> ClipboardResult<()> {
        self.text = Some(text.to_string());
        Ok(())
    }

    fn read_text(&mut self) -> ClipboardResult<String> {
        self.text.clone().ok_or(ClipboardError::Empty)
    }
}

/// Encode a box for the clipboard.
pub fn encode_box(div_box: &DivBox) -> ClipboardResult<String> {
    Ok(div_box.to_json()?)
}

/// The parts of a copied box that a paste carries over. Position and
/// selection in the payload are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PastePayload {
    width: f64,
    height: f64,
    #[serde(default)]
    background: Option<Vec<BackgroundLayer>>,
    #[serde(default)]
    is_resizable: Option<bool>,
}

impl From<PastePayload> for DivBoxOptions {
    fn from(payload: PastePayload) -> Self {
        Self {
            width: Some(payload.width),
            height: Some(payload.height),
            background: payload.background,
            is_resizable: payload.is_resizable,
            ..Self::default()
        }
    }
}

/// Decode clipboard text into the options a paste creates a box with.
/// The box lands wherever the board places defaults.
pub fn decode_paste(text: &str) -> ClipboardResult<DivBoxOptions> {
    let payload: PastePayload = serde_json::from_str(text)?;
    Ok(payload.into())
}
