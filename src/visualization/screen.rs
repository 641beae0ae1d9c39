//! Simulation-space to screen-space mapping.

use crate::configuration::config::ViewConfig;
use crate::simulation::states::NVec2;

/// Linear map of `[-zoom, zoom]` onto `[0, width]` x `[0, height]`.
///
/// Screen y grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenMap {
    pub width: f64,
    pub height: f64,
    pub zoom: f64,
}

impl ScreenMap {
    pub fn new(width: f64, height: f64, zoom: f64) -> Self {
        Self { width, height, zoom }
    }

    pub fn from_view(view: &ViewConfig) -> Self {
        Self::new(f64::from(view.width), f64::from(view.height), view.screen_zoom)
    }

    /// Map without clamping; points outside the zoom land off screen
    pub fn to_screen(&self, p: NVec2) -> NVec2 {
        NVec2::new(
            lerp(p.x, -self.zoom, self.zoom, 0.0, self.width),
            lerp(p.y, -self.zoom, self.zoom, 0.0, self.height),
        )
    }

    pub fn is_visible(&self, screen: NVec2) -> bool {
        (0.0..=self.width).contains(&screen.x) && (0.0..=self.height).contains(&screen.y)
    }
}

fn lerp(value: f64, a0: f64, a1: f64, b0: f64, b1: f64) -> f64 {
    b0 + (value - a0) / (a1 - a0) * (b1 - b0)
}
