//! The menu's scroll container
//!
//! `ListViewport` models the listbox as a clipped, vertically scrolling
//! column of option rows with two scroll buttons overlaid on its top and
//! bottom edges. All rectangles it reports are in window coordinates, so
//! they can be hit tested directly against pointer and touch positions.

use civic_platform::{Point, Rect};

use crate::scroll::{ScrollClass, ScrollMetrics};

/// Geometry and scroll offset of the option list
#[derive(Clone, Debug)]
pub struct ListViewport {
    /// Top-left corner of the visible list area
    origin: Point,
    /// Width of the list
    width: f32,
    /// Content-space top of each row
    row_tops: Vec<f32>,
    /// Content-space height of each row
    row_heights: Vec<f32>,
    /// Total content height
    content_height: f32,
    /// Maximum visible height
    max_height: f32,
    /// Current scroll offset (0 = top)
    scroll_top: f32,
    /// Height of each overlaid scroll button
    button_height: f32,
    /// Which scroll buttons are currently rendered
    buttons: ScrollClass,
}

impl ListViewport {
    /// Create a viewport for rows of the given heights
    pub fn new(
        origin: Point,
        width: f32,
        row_heights: impl IntoIterator<Item = f32>,
        max_height: f32,
        button_height: f32,
    ) -> Self {
        let row_heights: Vec<f32> = row_heights.into_iter().map(|h| h.max(0.0)).collect();
        let mut row_tops = Vec::with_capacity(row_heights.len());
        let mut content_height = 0.0;
        for height in &row_heights {
            row_tops.push(content_height);
            content_height += height;
        }

        Self {
            origin,
            width,
            row_tops,
            row_heights,
            content_height,
            max_height: whole_pixels(max_height),
            scroll_top: 0.0,
            button_height,
            buttons: ScrollClass::NoScroll,
        }
    }

    /// Create a viewport where every row has the same height
    pub fn uniform(
        origin: Point,
        width: f32,
        row_count: usize,
        row_height: f32,
        max_height: f32,
        button_height: f32,
    ) -> Self {
        Self::new(
            origin,
            width,
            std::iter::repeat(row_height).take(row_count),
            max_height,
            button_height,
        )
    }

    /// Number of option rows
    pub fn row_count(&self) -> usize {
        self.row_tops.len()
    }

    /// Visible height
    pub fn client_height(&self) -> f32 {
        self.content_height.min(self.max_height)
    }

    /// Current scroll offset
    pub fn scroll_top(&self) -> f32 {
        self.scroll_top
    }

    /// Largest valid scroll offset
    pub fn max_scroll_top(&self) -> f32 {
        (self.content_height - self.client_height()).max(0.0)
    }

    /// Current measurements for the boundary predicates
    pub fn metrics(&self) -> ScrollMetrics {
        ScrollMetrics {
            scroll_top: self.scroll_top,
            scroll_height: self.content_height,
            client_height: self.client_height(),
        }
    }

    /// Window-space top edge of the list
    pub fn top(&self) -> f32 {
        self.origin.y
    }

    /// Visible list area in window coordinates
    pub fn bounds(&self) -> Rect {
        Rect::new(self.origin.x, self.origin.y, self.width, self.client_height())
    }

    /// Change the maximum visible height, keeping the offset in range
    pub fn set_max_height(&mut self, max_height: f32) {
        self.max_height = whole_pixels(max_height);
        self.scroll_to(self.scroll_top);
    }

    // =========================================================================
    // Scrolling
    // =========================================================================

    /// Scroll to an absolute offset, clamped to the content
    pub fn scroll_to(&mut self, top: f32) {
        self.scroll_top = top.clamp(0.0, self.max_scroll_top());
    }

    /// Scroll by a relative amount (positive = down)
    pub fn scroll_by(&mut self, dy: f32) {
        self.scroll_to(self.scroll_top + dy);
    }

    /// Scroll to the very top
    pub fn scroll_to_top(&mut self) {
        self.scroll_to(0.0);
    }

    /// Scroll to the very bottom
    pub fn scroll_to_bottom(&mut self) {
        self.scroll_to(self.content_height);
    }

    /// Scroll the minimum amount that makes row `index` fully visible
    pub fn scroll_into_view(&mut self, index: usize) {
        let (Some(&top), Some(&height)) = (self.row_tops.get(index), self.row_heights.get(index))
        else {
            return;
        };
        let bottom = top + height;
        let client_height = self.client_height();

        if top < self.scroll_top {
            self.scroll_to(top);
        } else if bottom > self.scroll_top + client_height {
            self.scroll_to(bottom - client_height);
        }
    }

    // =========================================================================
    // Rows
    // =========================================================================

    /// Window-space rectangle of row `index`, whether or not it is visible
    pub fn option_rect(&self, index: usize) -> Option<Rect> {
        let top = *self.row_tops.get(index)?;
        let height = *self.row_heights.get(index)?;
        Some(Rect::new(
            self.origin.x,
            self.origin.y + top - self.scroll_top,
            self.width,
            height,
        ))
    }

    /// The row under `point`, if the point is inside the visible area
    pub fn option_at(&self, point: Point) -> Option<usize> {
        if !self.bounds().contains(point) {
            return None;
        }
        let content_y = point.y - self.origin.y + self.scroll_top;
        let index = self
            .row_tops
            .partition_point(|&top| top <= content_y)
            .checked_sub(1)?;
        let bottom = self.row_tops[index] + self.row_heights[index];
        (content_y <= bottom).then_some(index)
    }

    // =========================================================================
    // Scroll buttons
    // =========================================================================

    /// Render the buttons that `class` calls for
    pub fn set_buttons(&mut self, class: ScrollClass) {
        self.buttons = class;
    }

    /// Window-space rectangle of the scroll-up button, if rendered
    pub fn scroll_up_button_rect(&self) -> Option<Rect> {
        self.buttons.shows_up_button().then(|| {
            Rect::new(self.origin.x, self.origin.y, self.width, self.button_height)
        })
    }

    /// Window-space rectangle of the scroll-down button, if rendered
    pub fn scroll_down_button_rect(&self) -> Option<Rect> {
        self.buttons.shows_down_button().then(|| {
            Rect::new(
                self.origin.x,
                self.origin.y + self.client_height() - self.button_height,
                self.width,
                self.button_height,
            )
        })
    }
}

/// Visible heights are whole pixels, like a DOM `clientHeight`
fn whole_pixels(height: f32) -> f32 {
    height.max(0.0).floor()
}
