//! Menu state and its open/close/toggle operations
//!
//! `MenuState` is the only place the menu's visibility, focus, scroll-button
//! classification and keyboard-navigation flag live. The operations here
//! assume a mounted viewport; the controller is responsible for turning them
//! into no-ops while the widget is detached.

use serde::{Deserialize, Serialize};

use crate::focus::{focus_on_option, FocusTarget};
use crate::scroll::ScrollClass;
use crate::viewport::ListViewport;

/// Window measurements used to fit the menu on screen
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenMetrics {
    /// Height of the visible window area
    pub viewport_height: f32,
    /// Full scrollable height of the document
    pub document_height: f32,
}

impl ScreenMetrics {
    pub fn new(viewport_height: f32, document_height: f32) -> Self {
        Self {
            viewport_height,
            document_height,
        }
    }
}

/// Maximum height of a menu whose top edge sits at `menu_top`
///
/// Half the window height, but never past the end of the document. Without
/// screen metrics the `fallback` height is used.
pub fn menu_max_height(screen: Option<ScreenMetrics>, menu_top: f32, fallback: f32) -> f32 {
    match screen {
        Some(screen) => {
            let half_window = screen.viewport_height * 0.5;
            let to_document_end = screen.document_height - menu_top;
            half_window.min(to_document_end).max(0.0)
        }
        None => fallback.max(0.0),
    }
}

/// Visibility and focus state of the menu
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MenuState {
    is_open: bool,
    focus: FocusTarget,
    scroll_class: ScrollClass,
    is_keyboard_navigating: bool,
    /// `aria-expanded` on the combobox
    expanded: bool,
}

impl MenuState {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn focus(&self) -> FocusTarget {
        self.focus
    }

    /// Index of the focused option, if any
    pub fn focused_index(&self) -> Option<usize> {
        self.focus.option_index()
    }

    pub fn scroll_class(&self) -> ScrollClass {
        self.scroll_class
    }

    pub fn is_keyboard_navigating(&self) -> bool {
        self.is_keyboard_navigating
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn set_keyboard_navigating(&mut self, value: bool) {
        self.is_keyboard_navigating = value;
    }

    /// Move focus without scrolling (hover, clicks on the control)
    pub fn set_focus(&mut self, focus: FocusTarget) {
        self.focus = focus;
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Show the menu and focus option `index`
    ///
    /// The viewport is fitted to `max_height` first, then the option is
    /// scrolled into view and the scroll-button classification recomputed.
    /// With no options (or an out-of-range index) focus is left where it was.
    pub fn open(
        &mut self,
        viewport: &mut ListViewport,
        index: usize,
        option_count: usize,
        via_keyboard: bool,
        max_height: f32,
    ) {
        if via_keyboard {
            self.is_keyboard_navigating = true;
        }

        viewport.set_max_height(max_height);
        self.is_open = true;
        // Buttons reflect the current offset while focus corrects against them
        self.update_scroll_class(viewport);

        if let Some(target) = focus_on_option(viewport, index, option_count) {
            self.focus = target;
        }

        self.update_scroll_class(viewport);
        self.expanded = true;
    }

    /// Hide the menu, leaving focus alone
    pub fn close(&mut self) {
        self.is_open = false;
        self.expanded = false;
    }

    /// Hide the menu and return focus to the combobox
    pub fn close_and_focus_combobox(&mut self) {
        self.is_open = false;
        self.expanded = false;
        self.focus = FocusTarget::Combobox;
    }

    /// Open at `index` if closed, otherwise close and refocus the combobox
    pub fn toggle(
        &mut self,
        viewport: &mut ListViewport,
        index: usize,
        option_count: usize,
        via_keyboard: bool,
        max_height: f32,
    ) {
        if self.is_open {
            self.close_and_focus_combobox();
        } else {
            self.open(viewport, index, option_count, via_keyboard, max_height);
        }
    }

    /// Move focus to option `index` while open, scrolling as needed
    ///
    /// Returns false if the index is out of range.
    pub fn move_focus(
        &mut self,
        viewport: &mut ListViewport,
        index: usize,
        option_count: usize,
    ) -> bool {
        match focus_on_option(viewport, index, option_count) {
            Some(target) => {
                self.focus = target;
                self.update_scroll_class(viewport);
                true
            }
            None => false,
        }
    }

    /// Reclassify the scroll buttons from the viewport's current offset
    pub fn update_scroll_class(&mut self, viewport: &mut ListViewport) {
        self.scroll_class = ScrollClass::from_metrics(&viewport.metrics());
        viewport.set_buttons(self.scroll_class);
    }
}
