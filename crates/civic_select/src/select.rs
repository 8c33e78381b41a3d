//! Select widget
//!
//! Composes the combobox, the menu and their shared controller into one
//! widget that consumes raw platform events. `Select` does the work a browser
//! does for an HTML listbox: it hit tests pointer and touch
//! positions, tracks hover and press targets to synthesize enter/leave and
//! click, and delivers key presses to whichever element has focus.
//!
//! # Example
//!
//! ```
//! use civic_platform::{Event, InputEvent, Key, KeyboardEvent};
//! use civic_select::{Field, HitTarget, Select, SelectConfig, SelectOption, SharedField};
//!
//! let options = vec![
//!     SelectOption::new("ca", "California"),
//!     SelectOption::new("ny", "New York"),
//! ];
//! let field = SharedField::new("");
//! let mut select = Select::new(SelectConfig::default(), options, field.clone()).unwrap();
//! select.mount();
//!
//! let click = select.target_point(HitTarget::Combobox).unwrap();
//! select.click_at(click);
//! assert!(select.view().combobox.expanded);
//!
//! let key = |k| Event::Input(InputEvent::Keyboard(KeyboardEvent::pressed(k)));
//! select.handle_event(&key(Key::Char('n')));
//! select.handle_event(&key(Key::Enter));
//! assert_eq!(field.value(), "ny");
//! ```

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use civic_platform::{
    Event, InputEvent, Key, KeyState, KeyboardEvent, MouseButton, MouseEvent, Point, Rect,
    TouchEvent, WindowEvent,
};
use serde::{Deserialize, Serialize};

use crate::combobox::{Combobox, ComboboxConfig};
use crate::controller::MenuController;
use crate::error::{non_negative, positive, ConfigError, Result};
use crate::field::Field;
use crate::focus::FocusTarget;
use crate::menu::Menu;
use crate::menu_state::ScreenMetrics;
use crate::option::SelectOption;
use crate::scroll::ScrollDirection;
use crate::scroll_engine::ScrollEngineConfig;
use crate::view::SelectView;
use crate::viewport::ListViewport;

// ============================================================================
// Configuration
// ============================================================================

/// Where the widget sits and how big its parts are
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectLayout {
    /// Left edge of the control and the menu
    pub x: f32,
    /// Top edge of the control
    pub y: f32,
    /// Width of the control and the menu
    pub width: f32,
    /// Height of the combobox control
    pub control_height: f32,
    /// Height of each option row
    pub option_height: f32,
    /// Height of each scroll button
    pub button_height: f32,
    /// Space between the control and the menu
    pub gap: f32,
    /// Menu max height before screen metrics are known
    pub fallback_max_height: f32,
}

impl Default for SelectLayout {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 240.0,
            control_height: 40.0,
            option_height: 32.0,
            button_height: 24.0,
            gap: 4.0,
            fallback_max_height: 240.0,
        }
    }
}

impl SelectLayout {
    /// Check every dimension
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("x", self.x), ("y", self.y)] {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteCoordinate { name, value });
            }
        }
        positive("width", self.width)?;
        positive("control_height", self.control_height)?;
        positive("option_height", self.option_height)?;
        positive("button_height", self.button_height)?;
        non_negative("gap", self.gap)?;
        non_negative("fallback_max_height", self.fallback_max_height)?;
        Ok(())
    }

    /// Window-space rectangle of the combobox control
    pub fn control_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.control_height)
    }

    /// The strip between the control and the menu
    pub fn gap_rect(&self) -> Rect {
        let control = self.control_rect();
        Rect::new(self.x, control.bottom(), self.width, self.gap)
    }

    /// Top-left corner of the menu
    pub fn menu_origin(&self) -> Point {
        Point::new(self.x, self.y + self.control_height + self.gap)
    }
}

/// Everything needed to build a [`Select`] besides its options and field
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectConfig {
    pub combobox: ComboboxConfig,
    pub layout: SelectLayout,
    pub scroll: ScrollEngineConfig,
    /// Screen metrics known up front, if any
    pub screen: Option<ScreenMetrics>,
}

impl SelectConfig {
    pub fn validate(&self) -> Result<()> {
        if self.combobox.listbox_id.trim().is_empty() {
            return Err(ConfigError::EmptyListboxId);
        }
        self.layout.validate()?;
        self.scroll.validate()
    }
}

// ============================================================================
// Hit targets
// ============================================================================

/// The part of the widget under a point
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HitTarget {
    Combobox,
    Option(usize),
    ScrollUp,
    ScrollDown,
    /// Between the control and the open menu; still inside the widget
    Gap,
    /// Anywhere outside the widget
    Outside,
}

impl HitTarget {
    /// The scroll direction of a scroll button target
    pub fn scroll_direction(&self) -> Option<ScrollDirection> {
        match self {
            HitTarget::ScrollUp => Some(ScrollDirection::Up),
            HitTarget::ScrollDown => Some(ScrollDirection::Down),
            _ => None,
        }
    }
}

impl fmt::Display for HitTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HitTarget::Combobox => write!(f, "combobox"),
            HitTarget::Option(index) => write!(f, "option:{index}"),
            HitTarget::ScrollUp => write!(f, "scroll-up"),
            HitTarget::ScrollDown => write!(f, "scroll-down"),
            HitTarget::Gap => write!(f, "gap"),
            HitTarget::Outside => write!(f, "outside"),
        }
    }
}

impl FromStr for HitTarget {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        match name {
            "combobox" => Ok(HitTarget::Combobox),
            "scroll-up" => Ok(HitTarget::ScrollUp),
            "scroll-down" => Ok(HitTarget::ScrollDown),
            "gap" => Ok(HitTarget::Gap),
            "outside" => Ok(HitTarget::Outside),
            _ => name
                .strip_prefix("option:")
                .and_then(|index| index.trim().parse().ok())
                .map(HitTarget::Option)
                .ok_or_else(|| ConfigError::UnknownTarget(name.to_string())),
        }
    }
}

/// A finger currently on the screen
#[derive(Clone, Copy, Debug)]
struct TouchTrack {
    id: u64,
    target: HitTarget,
}

// ============================================================================
// Select
// ============================================================================

/// An accessible single-select dropdown driven by platform events
pub struct Select<F: Field> {
    combobox: Combobox,
    menu: Menu,
    controller: MenuController<F>,
    layout: SelectLayout,
    /// Target under the mouse pointer
    hovered: Option<HitTarget>,
    /// Target the left mouse button went down on
    pressed: Option<HitTarget>,
    touch: Option<TouchTrack>,
}

impl<F: Field> Select<F> {
    /// Build an unmounted widget
    pub fn new(config: SelectConfig, options: Vec<SelectOption>, field: F) -> Result<Self> {
        config.validate()?;

        let mut controller = MenuController::new(options, field)
            .with_scroll_engine(config.scroll)
            .with_fallback_max_height(config.layout.fallback_max_height);
        if let Some(screen) = config.screen {
            controller = controller.with_screen(screen);
        }

        Ok(Self {
            menu: Menu::new(config.combobox.listbox_id.clone()),
            combobox: Combobox::new(config.combobox),
            controller,
            layout: config.layout,
            hovered: None,
            pressed: None,
            touch: None,
        })
    }

    /// Attach the widget; events have no effect before this
    pub fn mount(&mut self) {
        let viewport = ListViewport::uniform(
            self.layout.menu_origin(),
            self.layout.width,
            self.controller.options().len(),
            self.layout.option_height,
            self.layout.fallback_max_height,
            self.layout.button_height,
        );
        self.controller.mount(viewport);
    }

    /// Detach the widget, cancelling any auto-scroll
    pub fn unmount(&mut self) {
        self.controller.unmount();
        self.hovered = None;
        self.pressed = None;
        self.touch = None;
    }

    pub fn controller(&self) -> &MenuController<F> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut MenuController<F> {
        &mut self.controller
    }

    pub fn layout(&self) -> &SelectLayout {
        &self.layout
    }

    pub fn view(&self) -> SelectView {
        SelectView {
            combobox: self.combobox.view(&self.controller),
            listbox: self.menu.view(&self.controller),
        }
    }

    /// Let time pass for auto-scroll
    pub fn advance(&mut self, dt: Duration) {
        self.controller.advance(dt);
    }

    // =========================================================================
    // Hit testing
    // =========================================================================

    /// The part of the widget under `point`
    pub fn hit_test(&self, point: Point) -> HitTarget {
        if self.controller.is_open() {
            if let Some(viewport) = self.controller.viewport() {
                // Buttons are drawn over the rows
                if viewport
                    .scroll_up_button_rect()
                    .is_some_and(|rect| rect.contains(point))
                {
                    return HitTarget::ScrollUp;
                }
                if viewport
                    .scroll_down_button_rect()
                    .is_some_and(|rect| rect.contains(point))
                {
                    return HitTarget::ScrollDown;
                }
                if let Some(index) = viewport.option_at(point) {
                    return HitTarget::Option(index);
                }
            }
        }

        if self.layout.control_rect().contains(point) {
            HitTarget::Combobox
        } else if self.controller.is_open() && self.layout.gap_rect().contains(point) {
            HitTarget::Gap
        } else {
            HitTarget::Outside
        }
    }

    /// A point that hits `target`, if the target is currently on screen
    pub fn target_point(&self, target: HitTarget) -> Option<Point> {
        match target {
            HitTarget::Combobox => Some(self.layout.control_rect().center()),
            HitTarget::Outside => {
                let control = self.layout.control_rect();
                Some(Point::new(control.right() + control.width(), control.top()))
            }
            HitTarget::Option(index) => {
                let viewport = self.controller.viewport()?;
                let center = viewport.option_rect(index)?.center();
                // Closed, scrolled out of view, or under a scroll button
                (self.hit_test(center) == target).then_some(center)
            }
            HitTarget::ScrollUp | HitTarget::ScrollDown => {
                let direction = target.scroll_direction()?;
                Some(self.controller.scroll_button_rect(direction)?.center())
            }
            HitTarget::Gap => {
                let center = self.layout.gap_rect().center();
                (self.hit_test(center) == target).then_some(center)
            }
        }
    }

    // =========================================================================
    // Event routing
    // =========================================================================

    /// Route a platform event; returns true if the widget consumed it
    pub fn handle_event(&mut self, event: &Event) -> bool {
        if !self.controller.is_mounted() {
            return false;
        }
        match event {
            Event::Input(InputEvent::Keyboard(event)) => self.handle_keyboard(event),
            Event::Input(InputEvent::Mouse(event)) => self.handle_mouse(event),
            Event::Input(InputEvent::Touch(event)) => self.handle_touch(event),
            Event::Window(WindowEvent::Resized {
                viewport_height,
                document_height,
            }) => {
                self.controller
                    .resize(ScreenMetrics::new(*viewport_height, *document_height));
                false
            }
        }
    }

    /// Press and release the left button at `point`
    pub fn click_at(&mut self, point: Point) -> bool {
        if !self.controller.is_mounted() {
            return false;
        }
        let pressed = self.handle_mouse(&MouseEvent::ButtonPressed {
            button: MouseButton::Left,
            x: point.x,
            y: point.y,
        });
        let released = self.handle_mouse(&MouseEvent::ButtonReleased {
            button: MouseButton::Left,
            x: point.x,
            y: point.y,
        });
        pressed || released
    }

    fn handle_keyboard(&mut self, event: &KeyboardEvent) -> bool {
        if event.state != KeyState::Pressed {
            return false;
        }
        match self.controller.focus() {
            FocusTarget::Combobox => {
                let handled = self.combobox.handle_key(&mut self.controller, &event.key);
                if !handled && event.key == Key::Tab {
                    // Native tab order takes focus out of the widget
                    self.controller.blur();
                }
                handled
            }
            FocusTarget::Option(index) if self.controller.is_open() => {
                self.menu
                    .option_key_down(&mut self.controller, index, &event.key)
            }
            _ => false,
        }
    }

    fn handle_mouse(&mut self, event: &MouseEvent) -> bool {
        match *event {
            MouseEvent::Moved { x, y } => {
                let target = self.hit_test(Point::new(x, y));
                self.pointer_entered(Some(target));
                self.menu.document_pointer_move(&mut self.controller);
                target != HitTarget::Outside
            }
            MouseEvent::Left => {
                self.pointer_entered(None);
                false
            }
            MouseEvent::ButtonPressed {
                button: MouseButton::Left,
                x,
                y,
            } => {
                let target = self.hit_test(Point::new(x, y));
                self.pressed = Some(target);
                if let Some(direction) = target.scroll_direction() {
                    self.menu
                        .scroll_button_pointer_down(&mut self.controller, direction);
                }
                target != HitTarget::Outside
            }
            MouseEvent::ButtonReleased {
                button: MouseButton::Left,
                x,
                y,
            } => {
                let target = self.hit_test(Point::new(x, y));
                if target.scroll_direction().is_some() {
                    self.menu.scroll_button_pointer_up(&mut self.controller);
                }
                if self.pressed.take() == Some(target) {
                    self.click(target);
                }
                target != HitTarget::Outside
            }
            MouseEvent::ButtonPressed { .. } | MouseEvent::ButtonReleased { .. } => false,
        }
    }

    /// Synthesize leave/enter/over for a change of hovered target
    fn pointer_entered(&mut self, target: Option<HitTarget>) {
        if self.hovered == target {
            return;
        }
        if self
            .hovered
            .is_some_and(|previous| previous.scroll_direction().is_some())
        {
            self.menu.scroll_button_pointer_leave(&mut self.controller);
        }
        self.hovered = target;

        match target {
            Some(HitTarget::Option(index)) => {
                self.menu.option_pointer_over(&mut self.controller, index);
            }
            Some(target) => {
                if let Some(direction) = target.scroll_direction() {
                    self.menu
                        .scroll_button_pointer_enter(&mut self.controller, direction);
                }
            }
            None => {}
        }
    }

    fn click(&mut self, target: HitTarget) {
        match target {
            HitTarget::Combobox => self.combobox.handle_click(&mut self.controller),
            HitTarget::Option(index) => self.menu.option_click(&mut self.controller, index),
            HitTarget::Outside => self.outside_click(),
            HitTarget::ScrollUp | HitTarget::ScrollDown | HitTarget::Gap => {}
        }
    }

    /// Close without refocusing the control; the click moved focus away
    fn outside_click(&mut self) {
        let was_active =
            self.controller.is_open() || self.controller.focus() != FocusTarget::Elsewhere;
        self.controller.close_menu();
        if was_active {
            self.controller.blur();
            self.controller.field_mut().blur();
            tracing::debug!("outside click, field blurred");
        }
    }

    fn handle_touch(&mut self, event: &TouchEvent) -> bool {
        match *event {
            TouchEvent::Started { id, x, y } => {
                let target = self.hit_test(Point::new(x, y));
                self.touch = Some(TouchTrack { id, target });
                if let Some(direction) = target.scroll_direction() {
                    self.menu
                        .scroll_button_touch_start(&mut self.controller, direction);
                }
                target != HitTarget::Outside
            }
            TouchEvent::Moved { id, x, y } => {
                let Some(track) = self.touch.filter(|track| track.id == id) else {
                    return false;
                };
                if let Some(direction) = track.target.scroll_direction() {
                    self.menu.scroll_button_touch_move(
                        &mut self.controller,
                        direction,
                        Point::new(x, y),
                    );
                    return true;
                }
                false
            }
            TouchEvent::Ended { id, x, y } => {
                let Some(track) = self.touch.filter(|track| track.id == id) else {
                    return false;
                };
                self.touch = None;
                if track.target.scroll_direction().is_some() {
                    self.menu.scroll_button_touch_end(&mut self.controller);
                    return true;
                }
                // A tap is a click when the finger lifts where it landed
                if self.hit_test(Point::new(x, y)) == track.target {
                    self.click(track.target);
                }
                track.target != HitTarget::Outside
            }
            TouchEvent::Cancelled { id } => {
                let Some(track) = self.touch.filter(|track| track.id == id) else {
                    return false;
                };
                self.touch = None;
                if track.target.scroll_direction().is_some() {
                    self.menu.scroll_button_touch_cancel(&mut self.controller);
                }
                false
            }
        }
    }
}

impl<F: Field> fmt::Debug for Select<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Select")
            .field("combobox", &self.combobox)
            .field("menu", &self.menu)
            .field("controller", &self.controller)
            .field("layout", &self.layout)
            .finish()
    }
}
