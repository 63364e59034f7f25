//! Visible-height negotiation.
//!
//! The list is either in its natural height (as tall as its content, bounded
//! by the space the host offers) or pinned to a fixed height by the caller or
//! a drag gesture.

use serde::{Deserialize, Serialize};

/// Height policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LayoutMode {
    Natural,
    Fixed(f32),
}

/// Surface sizes the controller negotiates against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutMetrics {
    /// Height of every row stacked (`len * row_height`).
    pub content_height: f32,
    /// Height of the host map viewport.
    pub viewport_height: f32,
    /// Space offered by a container panel, if any.
    pub container_height: Option<f32>,
}

#[derive(Debug, Clone)]
pub struct LayoutController {
    mode: LayoutMode,
    height: f32,
    min_height: f32,
    max_height_ratio: f32,
}

impl LayoutController {
    pub fn new(min_height: f32, max_height_ratio: f32) -> Self {
        Self {
            mode: LayoutMode::Natural,
            height: 0.0,
            min_height: min_height.max(0.0),
            max_height_ratio: max_height_ratio.clamp(0.05, 1.0),
        }
    }

    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    /// Current list height in pixels.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Upper bound derived from the host: the container, capped by a share
    /// of the viewport.
    pub fn max_height(&self, metrics: &LayoutMetrics) -> f32 {
        let viewport_cap = metrics.viewport_height * self.max_height_ratio;
        match metrics.container_height {
            Some(container) => container.min(viewport_cap),
            None => viewport_cap,
        }
        .max(0.0)
    }

    /// Applies a resize request. `Some(h)` pins the height; `None` returns to
    /// the natural height. Returns the new height if it changed.
    pub fn resize(&mut self, requested: Option<f32>, metrics: &LayoutMetrics) -> Option<f32> {
        let max = self.max_height(metrics);
        let min = self.min_height.min(max);
        let height = match requested {
            Some(h) => {
                // The mode keeps the unclamped request; only the applied height is clamped.
                self.mode = LayoutMode::Fixed(h);
                h.clamp(min, max)
            }
            None => {
                self.mode = LayoutMode::Natural;
                metrics.content_height.min(max).max(min)
            }
        };
        self.apply(height)
    }

    /// Re-derives the height under the current mode, e.g. after the content
    /// or the host surface changed size.
    pub fn relayout(&mut self, metrics: &LayoutMetrics) -> Option<f32> {
        match self.mode {
            LayoutMode::Natural => self.resize(None, metrics),
            LayoutMode::Fixed(h) => self.resize(Some(h), metrics),
        }
    }

    fn apply(&mut self, height: f32) -> Option<f32> {
        if (height - self.height).abs() < f32::EPSILON {
            return None;
        }
        self.height = height;
        Some(height)
    }
}
