//! Editor state: the active tool and the pen configuration.

use crate::tools::ToolKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default pen size in canvas units.
pub const DEFAULT_PEN_SIZE: f64 = 100.0;

/// Default gradient color.
pub const DEFAULT_PEN_COLOR: &str = "#15803d";

/// Editor errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditorError {
    #[error("No tool at menu index {0}")]
    UnknownTool(usize),
}

/// Which gradient the pen paints with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PenImageType {
    #[default]
    #[serde(rename = "linear-gradient")]
    Linear,
    #[serde(rename = "radial-gradient")]
    Radial,
}

/// Linear gradient parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearGradient {
    /// Direction in degrees.
    pub deg: f64,
    pub color: String,
    /// Percentage where the color ends.
    pub stop: f64,
}

impl Default for LinearGradient {
    fn default() -> Self {
        Self {
            deg: 0.0,
            color: DEFAULT_PEN_COLOR.to_string(),
            stop: 50.0,
        }
    }
}

/// Radial gradient parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadialGradient {
    /// `circle`, `ellipse`, or `size` to use [`RadialGradient::shape_size`].
    pub shape: String,
    /// Free-form shape used when `shape` is `size`.
    pub shape_size: String,
    pub position: String,
    pub color: String,
    pub stop: f64,
}

impl Default for RadialGradient {
    fn default() -> Self {
        Self {
            shape: "circle".to_string(),
            shape_size: String::new(),
            position: "center".to_string(),
            color: DEFAULT_PEN_COLOR.to_string(),
            stop: 50.0,
        }
    }
}

impl RadialGradient {
    /// The shape that ends up in the gradient, if any.
    pub fn effective_shape(&self) -> Option<&str> {
        let shape = if self.shape == "size" {
            self.shape_size.as_str()
        } else {
            self.shape.as_str()
        };
        (!shape.is_empty()).then_some(shape)
    }
}

/// Pull a stop half a percent back so the color edge stays soft.
/// The 0 and 100 boundaries are kept.
pub fn safe_stop(stop: f64) -> f64 {
    if stop == 100.0 || stop == 0.0 {
        stop
    } else {
        stop - 0.5
    }
}

/// Tool selection and pen configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Editor {
    selected_tool: ToolKind,
    pub pen_image_type: PenImageType,
    pub linear_gradient: LinearGradient,
    pub radial_gradient: RadialGradient,
    pub pen_size: f64,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    /// Create an editor with the pointer tool active and the default pen.
    pub fn new() -> Self {
        Self::with_pen_size(DEFAULT_PEN_SIZE)
    }

    /// Create an editor with a specific pen size.
    pub fn with_pen_size(pen_size: f64) -> Self {
        Self {
            selected_tool: ToolKind::default(),
            pen_image_type: PenImageType::default(),
            linear_gradient: LinearGradient::default(),
            radial_gradient: RadialGradient::default(),
            pen_size,
        }
    }

    /// The active tool.
    pub fn tool(&self) -> ToolKind {
        self.selected_tool
    }

    /// Activate a tool.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.selected_tool = tool;
    }

    /// Activate the tool at a menu index.
    pub fn set_tool_index(&mut self, index: usize) -> Result<ToolKind, EditorError> {
        let tool = ToolKind::from_index(index).ok_or(EditorError::UnknownTool(index))?;
        self.selected_tool = tool;
        Ok(tool)
    }

    /// CSS background-image for the current pen, or `None` when the radial
    /// gradient has no shape to draw with.
    pub fn pen_image(&self) -> Option<String> {
        match self.pen_image_type {
            PenImageType::Linear => {
                let LinearGradient { deg, color, stop } = &self.linear_gradient;
                Some(format!(
                    "linear-gradient({deg}deg, {color}, {}%, transparent {stop}%)",
                    safe_stop(*stop)
                ))
            }
            PenImageType::Radial => {
                let gradient = &self.radial_gradient;
                let shape = gradient.effective_shape()?;
                Some(format!(
                    "radial-gradient({shape} at {}, {} {}%, transparent {}%)",
                    gradient.position,
                    gradient.color,
                    safe_stop(gradient.stop),
                    gradient.stop
                ))
            }
        }
    }

    /// Background shown in the pen preview swatch.
    pub fn pen_preview(&self) -> Option<String> {
        self.pen_image()
    }
}
