//! Scroll boundary primitives
//!
//! Pure predicates over a scroll container's measurements, and the mapping
//! from those predicates to which scroll buttons should be shown.

use serde::Serialize;

const BOTTOM_EPSILON: f32 = 1e-3;

/// Measurements of a vertical scroll container
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollMetrics {
    /// Current scroll offset from the top of the content
    pub scroll_top: f32,
    /// Total content height
    pub scroll_height: f32,
    /// Visible height
    pub client_height: f32,
}

impl ScrollMetrics {
    /// Content is taller than the visible area
    pub fn is_scrollable(&self) -> bool {
        self.scroll_height > self.client_height
    }

    /// Scrolled all the way up
    pub fn is_at_top(&self) -> bool {
        self.scroll_top == 0.0
    }

    /// Scrolled all the way down
    ///
    /// The ceiling absorbs sub-pixel scroll offsets; the epsilon absorbs
    /// float error in an offset clamped to `scroll_height - client_height`.
    pub fn is_at_bottom(&self) -> bool {
        (self.scroll_height - self.scroll_top - BOTTOM_EPSILON).ceil() <= self.client_height
    }
}

/// Which scroll buttons are visible
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollClass {
    /// Content fits; no buttons
    #[default]
    NoScroll,
    /// At the top; only the down button
    Top,
    /// Somewhere in between; both buttons
    Middle,
    /// At the bottom; only the up button
    Bottom,
}

impl ScrollClass {
    /// Classify a container
    pub fn from_metrics(metrics: &ScrollMetrics) -> Self {
        if !metrics.is_scrollable() {
            ScrollClass::NoScroll
        } else if metrics.is_at_top() {
            ScrollClass::Top
        } else if metrics.is_at_bottom() {
            ScrollClass::Bottom
        } else {
            ScrollClass::Middle
        }
    }

    /// Whether the scroll-up button is rendered
    pub fn shows_up_button(&self) -> bool {
        matches!(self, ScrollClass::Middle | ScrollClass::Bottom)
    }

    /// Whether the scroll-down button is rendered
    pub fn shows_down_button(&self) -> bool {
        matches!(self, ScrollClass::Top | ScrollClass::Middle)
    }
}

/// Direction of an auto-scroll session
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollDirection {
    Up,
    Down,
}

impl ScrollDirection {
    /// Sign applied to the scroll step
    pub fn sign(&self) -> f32 {
        match self {
            ScrollDirection::Up => -1.0,
            ScrollDirection::Down => 1.0,
        }
    }

    /// Whether `metrics` has reached the boundary this direction scrolls toward
    pub fn reached_boundary(&self, metrics: &ScrollMetrics) -> bool {
        match self {
            ScrollDirection::Up => metrics.is_at_top(),
            ScrollDirection::Down => metrics.is_at_bottom(),
        }
    }
}
