//! Menu controller
//!
//! The single stateful object shared by the combobox and the menu. It owns
//! the option list, the external field, the menu state, the scroll engine
//! and (once mounted) the list viewport. Both visual components hold no
//! state of their own and call into the controller for every action.
//!
//! Until [`MenuController::mount`] is called, and after
//! [`MenuController::unmount`], every operation is a silent no-op.
//!
//! # Example
//!
//! ```
//! use civic_platform::{Key, Point};
//! use civic_select::{ListViewport, MenuController, SelectOption, SharedField, Field};
//!
//! let options = vec![
//!     SelectOption::new("red", "Red"),
//!     SelectOption::new("green", "Green"),
//! ];
//! let field = SharedField::new("");
//! let mut controller = MenuController::new(options, field.clone());
//! controller.mount(ListViewport::uniform(Point::ZERO, 120.0, 2, 20.0, 200.0, 16.0));
//!
//! controller.open_menu(0, true);
//! controller.handle_keyboard_input(&Key::Down, 0);
//! controller.handle_keyboard_input(&Key::Enter, 1);
//!
//! assert_eq!(field.value(), "green");
//! assert!(!controller.is_open());
//! ```

use std::time::Duration;

use civic_platform::{Key, Rect};

use crate::field::Field;
use crate::focus::FocusTarget;
use crate::menu_state::{menu_max_height, MenuState, ScreenMetrics};
use crate::option::{selected_index, SelectOption};
use crate::scroll::{ScrollClass, ScrollDirection};
use crate::scroll_engine::{ScrollEngine, ScrollEngineConfig};
use crate::typeahead::{find_first_match, typeahead_char};
use crate::viewport::ListViewport;

/// Default max height when no screen metrics have been reported
pub const DEFAULT_FALLBACK_MAX_HEIGHT: f32 = 240.0;

/// Owns all interaction state of one select widget
pub struct MenuController<F: Field> {
    options: Vec<SelectOption>,
    field: F,
    state: MenuState,
    viewport: Option<ListViewport>,
    engine: ScrollEngine,
    screen: Option<ScreenMetrics>,
    fallback_max_height: f32,
}

impl<F: Field> MenuController<F> {
    /// Create an unmounted controller with the default scroll engine
    pub fn new(options: Vec<SelectOption>, field: F) -> Self {
        Self {
            options,
            field,
            state: MenuState::new(),
            viewport: None,
            engine: ScrollEngine::default(),
            screen: None,
            fallback_max_height: DEFAULT_FALLBACK_MAX_HEIGHT,
        }
    }

    /// Use a custom auto-scroll step and interval
    pub fn with_scroll_engine(mut self, config: ScrollEngineConfig) -> Self {
        self.engine = ScrollEngine::new(config);
        self
    }

    /// Max height used until screen metrics arrive
    pub fn with_fallback_max_height(mut self, height: f32) -> Self {
        self.fallback_max_height = height;
        self
    }

    /// Initial screen metrics
    pub fn with_screen(mut self, screen: ScreenMetrics) -> Self {
        self.screen = Some(screen);
        self
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Attach the list viewport; operations take effect from now on
    pub fn mount(&mut self, viewport: ListViewport) {
        tracing::debug!(rows = viewport.row_count(), "menu mounted");
        self.viewport = Some(viewport);
    }

    /// Detach the viewport, cancel any scroll session and reset state
    pub fn unmount(&mut self) {
        if self.viewport.take().is_some() {
            self.engine.stop();
            self.state = MenuState::new();
            tracing::debug!("menu unmounted");
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.viewport.is_some()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn field(&self) -> &F {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut F {
        &mut self.field
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn is_expanded(&self) -> bool {
        self.state.is_expanded()
    }

    pub fn focus(&self) -> FocusTarget {
        self.state.focus()
    }

    pub fn focused_index(&self) -> Option<usize> {
        self.state.focused_index()
    }

    pub fn scroll_class(&self) -> ScrollClass {
        self.state.scroll_class()
    }

    pub fn is_keyboard_navigating(&self) -> bool {
        self.state.is_keyboard_navigating()
    }

    pub fn is_scrolling(&self) -> bool {
        self.engine.is_active()
    }

    pub fn viewport(&self) -> Option<&ListViewport> {
        self.viewport.as_ref()
    }

    pub fn screen(&self) -> Option<ScreenMetrics> {
        self.screen
    }

    /// Index of the option matching the field's current value
    pub fn selected_index(&self) -> Option<usize> {
        selected_index(&self.options, &self.field.value())
    }

    /// Index to focus when opening at the current selection
    pub fn selected_or_first(&self) -> usize {
        self.selected_index().unwrap_or(0)
    }

    /// Rectangle of the scroll button for `direction`, if rendered
    pub fn scroll_button_rect(&self, direction: ScrollDirection) -> Option<Rect> {
        let viewport = self.viewport.as_ref()?;
        if !self.state.is_open() {
            return None;
        }
        match direction {
            ScrollDirection::Up => viewport.scroll_up_button_rect(),
            ScrollDirection::Down => viewport.scroll_down_button_rect(),
        }
    }

    // =========================================================================
    // Menu state
    // =========================================================================

    /// Open the menu with focus on option `index`
    pub fn open_menu(&mut self, index: usize, via_keyboard: bool) {
        let Some(viewport) = self.viewport.as_mut() else {
            return;
        };
        let max_height = menu_max_height(self.screen, viewport.top(), self.fallback_max_height);
        self.state
            .open(viewport, index, self.options.len(), via_keyboard, max_height);
        tracing::debug!(
            index,
            via_keyboard,
            scroll_class = ?self.state.scroll_class(),
            "menu opened"
        );
    }

    /// Close the menu without moving focus
    pub fn close_menu(&mut self) {
        if self.viewport.is_none() {
            return;
        }
        self.engine.stop();
        self.state.close();
        tracing::debug!("menu closed");
    }

    /// Close the menu and return focus to the combobox
    pub fn close_menu_and_focus_on_combobox(&mut self) {
        if self.viewport.is_none() {
            return;
        }
        self.engine.stop();
        self.state.close_and_focus_combobox();
        tracing::debug!("menu closed, focus returned to combobox");
    }

    /// Open at `index` if closed, otherwise close and refocus the combobox
    pub fn toggle_menu(&mut self, index: usize, via_keyboard: bool) {
        let Some(viewport) = self.viewport.as_mut() else {
            return;
        };
        if self.state.is_open() {
            self.engine.stop();
        }
        let max_height = menu_max_height(self.screen, viewport.top(), self.fallback_max_height);
        self.state
            .toggle(viewport, index, self.options.len(), via_keyboard, max_height);
        tracing::debug!(index, open = self.state.is_open(), "menu toggled");
    }

    /// Focus the combobox control (click or tab into the widget)
    pub fn focus_combobox(&mut self) {
        if self.viewport.is_some() {
            self.state.set_focus(FocusTarget::Combobox);
        }
    }

    /// Focus has left the widget
    pub fn blur(&mut self) {
        if self.viewport.is_some() {
            self.state.set_focus(FocusTarget::Elsewhere);
        }
    }

    /// Write option `index` to the field, close and refocus the combobox
    pub fn commit(&mut self, index: usize) {
        if self.viewport.is_none() {
            return;
        }
        if let Some(option) = self.options.get(index) {
            tracing::debug!(index, value = %option.value, "option committed");
            self.field.set_value(&option.value);
        }
        self.close_menu_and_focus_on_combobox();
    }

    // =========================================================================
    // Keyboard
    // =========================================================================

    /// Handle a key pressed while option `option_index` has focus
    ///
    /// Returns true when the key was consumed, which is every key while
    /// mounted.
    pub fn handle_keyboard_input(&mut self, key: &Key, option_index: usize) -> bool {
        if self.viewport.is_none() {
            return false;
        }
        let last = self.options.len().saturating_sub(1);

        match key {
            Key::Down if option_index < last => {
                self.state.set_keyboard_navigating(true);
                self.stop_scrolling();
                self.focus_option(option_index + 1);
            }
            Key::Up if option_index > 0 => {
                self.state.set_keyboard_navigating(true);
                self.stop_scrolling();
                self.focus_option(option_index - 1);
            }
            Key::Enter | Key::Tab => self.commit(option_index),
            Key::Escape => self.close_menu_and_focus_on_combobox(),
            key => {
                if let Some(ch) = typeahead_char(key) {
                    self.state.set_keyboard_navigating(true);
                    match find_first_match(&self.options, ch) {
                        Some(index) => self.focus_option(index),
                        None => tracing::trace!(%ch, "no typeahead match"),
                    }
                }
            }
        }
        true
    }

    fn focus_option(&mut self, index: usize) {
        if let Some(viewport) = self.viewport.as_mut() {
            if self.state.move_focus(viewport, index, self.options.len()) {
                tracing::trace!(index, "option focused");
            }
        }
    }

    // =========================================================================
    // Pointer
    // =========================================================================

    /// Pointer moved over option `index`
    ///
    /// Focus follows the pointer without scrolling, unless the user is
    /// navigating with the keyboard. Returns true if focus moved.
    pub fn hover_option(&mut self, index: usize) -> bool {
        if self.viewport.is_none() || !self.state.is_open() || index >= self.options.len() {
            return false;
        }
        if self.state.is_keyboard_navigating() {
            tracing::trace!(index, "hover ignored while keyboard navigating");
            return false;
        }
        if self.state.focused_index() == Some(index) {
            return false;
        }
        self.state.set_focus(FocusTarget::Option(index));
        tracing::trace!(index, "option focused by hover");
        true
    }

    /// Any pointer movement anywhere ends keyboard navigation
    pub fn pointer_moved(&mut self) {
        if self.state.is_keyboard_navigating() {
            tracing::trace!("keyboard navigation ended by pointer");
            self.state.set_keyboard_navigating(false);
        }
    }

    // =========================================================================
    // Scrolling
    // =========================================================================

    /// Start an auto-scroll session toward `direction`
    pub fn start_scrolling(&mut self, direction: ScrollDirection) {
        if self.viewport.is_none() || !self.state.is_open() {
            return;
        }
        self.engine.start(direction);
    }

    /// Start scrolling because the pointer entered a scroll button
    ///
    /// Suppressed during keyboard navigation: the list may have scrolled the
    /// button under a stationary pointer.
    pub fn start_scrolling_on_hover(&mut self, direction: ScrollDirection) {
        if self.state.is_keyboard_navigating() {
            tracing::trace!(?direction, "hover scroll ignored while keyboard navigating");
            return;
        }
        self.start_scrolling(direction);
    }

    /// Stop the running auto-scroll session, if any
    pub fn stop_scrolling(&mut self) {
        self.engine.stop();
    }

    /// Advance the scroll engine by `dt`
    ///
    /// Each tick that moves the list counts as a scroll event and
    /// reclassifies the scroll buttons.
    pub fn advance(&mut self, dt: Duration) {
        let Some(viewport) = self.viewport.as_mut() else {
            return;
        };
        let outcome = self.engine.advance(dt, viewport);
        if outcome.ticks > 0 {
            self.state.update_scroll_class(viewport);
        }
    }

    /// Scroll the list directly (wheel or drag) and reclassify the buttons
    pub fn scroll_by(&mut self, dy: f32) {
        if !self.state.is_open() {
            return;
        }
        if let Some(viewport) = self.viewport.as_mut() {
            viewport.scroll_by(dy);
            self.state.update_scroll_class(viewport);
        }
    }

    /// The window was resized
    pub fn resize(&mut self, screen: ScreenMetrics) {
        self.screen = Some(screen);
        let Some(viewport) = self.viewport.as_mut() else {
            return;
        };
        if self.state.is_open() {
            let max_height =
                menu_max_height(self.screen, viewport.top(), self.fallback_max_height);
            viewport.set_max_height(max_height);
        }
        self.state.update_scroll_class(viewport);
        tracing::debug!(
            viewport_height = screen.viewport_height,
            scroll_class = ?self.state.scroll_class(),
            "menu resized"
        );
    }
}

impl<F: Field> Drop for MenuController<F> {
    fn drop(&mut self) {
        self.engine.stop();
    }
}

impl<F: Field> std::fmt::Debug for MenuController<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuController")
            .field("options", &self.options.len())
            .field("state", &self.state)
            .field("mounted", &self.viewport.is_some())
            .field("scrolling", &self.engine.direction())
            .finish()
    }
}
