//! View transform between layout space and the viewport.
//!
//! Layout coordinates are abstract units centred on `x = 0`; the host maps
//! them to screen pixels with a translate-then-scale transform.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::Serialize;

use crate::consts::{FOCUS_SCALE, INITIAL_OFFSET_X, INITIAL_OFFSET_Y, INITIAL_SCALE, MAX_SCALE, MIN_SCALE};
use crate::layout::Position;

/// Size of the tree container in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Translate/scale transform applied to the tree group.
///
/// `translate_x` / `translate_y` are in CSS pixels.
/// `scale` is a zoom factor (1.0 = no zoom).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewTransform {
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self { translate_x: 0.0, translate_y: 0.0, scale: 1.0 }
    }
}

impl ViewTransform {
    /// Transform shown before the user pans or zooms.
    #[must_use]
    pub fn initial(viewport: Viewport) -> Self {
        Self {
            translate_x: viewport.width / 2.0 - INITIAL_OFFSET_X,
            translate_y: INITIAL_OFFSET_Y,
            scale: INITIAL_SCALE,
        }
    }

    /// Transform that centres `target` in the viewport at the focus zoom.
    #[must_use]
    pub fn focus(target: Position, viewport: Viewport) -> Self {
        Self {
            translate_x: viewport.width / 2.0 - target.x * FOCUS_SCALE,
            translate_y: viewport.height / 2.0 - target.y * FOCUS_SCALE,
            scale: FOCUS_SCALE,
        }
    }

    /// Same translation with the scale clamped to the zoom extent.
    #[must_use]
    pub fn with_scale(self, scale: f64) -> Self {
        Self { scale: scale.clamp(MIN_SCALE, MAX_SCALE), ..self }
    }

    /// Convert a viewport point (CSS pixels) to layout coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Position) -> Position {
        Position {
            x: (screen.x - self.translate_x) / self.scale,
            y: (screen.y - self.translate_y) / self.scale,
        }
    }

    /// Convert a layout point to viewport coordinates (CSS pixels).
    #[must_use]
    pub fn world_to_screen(&self, world: Position) -> Position {
        Position {
            x: world.x * self.scale + self.translate_x,
            y: world.y * self.scale + self.translate_y,
        }
    }

    /// SVG `transform` attribute value.
    #[must_use]
    pub fn to_svg(&self) -> String {
        format!("translate({},{}) scale({})", self.translate_x, self.translate_y, self.scale)
    }
}
