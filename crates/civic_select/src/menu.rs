//! Menu / listbox
//!
//! The popup half of the widget. It renders one option row per
//! [`SelectOption`](crate::SelectOption) and up to two scroll buttons, and
//! forwards option and scroll-button events to the controller:
//!
//! - hovering an option focuses it, unless the user is keyboard navigating
//! - clicking an option commits it
//! - keys pressed on an option go to the controller's keyboard handler
//! - entering, pressing or touching a scroll button starts auto-scroll;
//!   leaving, releasing, lifting or dragging the finger off it stops it
//! - any pointer movement ends keyboard navigation

use civic_platform::{Key, Point, Rect};

use crate::controller::MenuController;
use crate::field::Field;
use crate::focus::FocusTarget;
use crate::scroll::ScrollDirection;
use crate::view::{ListboxView, OptionView};

/// Whether a touch point has left a scroll button
///
/// A button that is no longer rendered counts as left. Points on the
/// button's edge are still inside.
pub fn has_touch_point_exited_button(button: Option<Rect>, point: Point) -> bool {
    match button {
        None => true,
        Some(rect) => {
            point.x < rect.left()
                || point.x > rect.right()
                || point.y < rect.top()
                || point.y > rect.bottom()
        }
    }
}

/// The listbox popup
#[derive(Clone, Debug)]
pub struct Menu {
    id: String,
}

impl Menu {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    // =========================================================================
    // Options
    // =========================================================================

    /// Pointer entered option `index`
    pub fn option_pointer_over<F: Field>(
        &self,
        controller: &mut MenuController<F>,
        index: usize,
    ) -> bool {
        controller.hover_option(index)
    }

    /// Option `index` was clicked or tapped
    pub fn option_click<F: Field>(&self, controller: &mut MenuController<F>, index: usize) {
        controller.commit(index);
    }

    /// A key was pressed on option `index`
    pub fn option_key_down<F: Field>(
        &self,
        controller: &mut MenuController<F>,
        index: usize,
        key: &Key,
    ) -> bool {
        controller.handle_keyboard_input(key, index)
    }

    // =========================================================================
    // Scroll buttons
    // =========================================================================

    pub fn scroll_button_pointer_enter<F: Field>(
        &self,
        controller: &mut MenuController<F>,
        direction: ScrollDirection,
    ) {
        controller.start_scrolling_on_hover(direction);
    }

    pub fn scroll_button_pointer_leave<F: Field>(&self, controller: &mut MenuController<F>) {
        controller.stop_scrolling();
    }

    pub fn scroll_button_pointer_down<F: Field>(
        &self,
        controller: &mut MenuController<F>,
        direction: ScrollDirection,
    ) {
        controller.start_scrolling(direction);
    }

    pub fn scroll_button_pointer_up<F: Field>(&self, controller: &mut MenuController<F>) {
        controller.stop_scrolling();
    }

    pub fn scroll_button_touch_start<F: Field>(
        &self,
        controller: &mut MenuController<F>,
        direction: ScrollDirection,
    ) {
        controller.start_scrolling(direction);
    }

    pub fn scroll_button_touch_end<F: Field>(&self, controller: &mut MenuController<F>) {
        controller.stop_scrolling();
    }

    pub fn scroll_button_touch_cancel<F: Field>(&self, controller: &mut MenuController<F>) {
        controller.stop_scrolling();
    }

    /// A finger that started on the `direction` button moved to `point`
    pub fn scroll_button_touch_move<F: Field>(
        &self,
        controller: &mut MenuController<F>,
        direction: ScrollDirection,
        point: Point,
    ) {
        if has_touch_point_exited_button(controller.scroll_button_rect(direction), point) {
            tracing::trace!(?direction, "touch left scroll button");
            controller.stop_scrolling();
        }
    }

    /// The pointer moved anywhere in the document
    pub fn document_pointer_move<F: Field>(&self, controller: &mut MenuController<F>) {
        controller.pointer_moved();
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    pub fn view<F: Field>(&self, controller: &MenuController<F>) -> ListboxView {
        let value = controller.field().value();
        let focus = controller.focus();
        let class = controller.scroll_class();
        let options = controller
            .options()
            .iter()
            .enumerate()
            .map(|(index, option)| OptionView {
                role: "option",
                value: option.value.clone(),
                text: option.text.clone(),
                selected: option.value == value,
                focused: focus == FocusTarget::Option(index),
            })
            .collect();

        ListboxView {
            role: "listbox",
            id: self.id.clone(),
            hidden: !controller.is_open(),
            options,
            scroll_class: class,
            scroll_up_button: class.shows_up_button(),
            scroll_down_button: class.shows_down_button(),
            scroll_top: controller.viewport().map_or(0.0, |vp| vp.scroll_top()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::SharedField;
    use crate::option::SelectOption;
    use crate::viewport::ListViewport;
    use std::time::Duration;

    const TICK: Duration = Duration::from_millis(10);

    fn setup(rows: usize, value: &str) -> (Menu, MenuController<SharedField>) {
        let options = (0..rows)
            .map(|i| SelectOption::new(format!("v{i}"), format!("Item {i}")))
            .collect();
        let mut controller =
            MenuController::new(options, SharedField::new(value)).with_fallback_max_height(100.0);
        controller.mount(ListViewport::uniform(
            Point::new(0.0, 40.0),
            200.0,
            rows,
            20.0,
            100.0,
            16.0,
        ));
        (Menu::new("items"), controller)
    }

    #[test]
    fn test_touch_exit() {
        let rect = Some(Rect::new(10.0, 10.0, 20.0, 10.0));
        assert!(!has_touch_point_exited_button(rect, Point::new(15.0, 15.0)));
        assert!(!has_touch_point_exited_button(rect, Point::new(30.0, 20.0)));
        assert!(has_touch_point_exited_button(rect, Point::new(9.9, 15.0)));
        assert!(has_touch_point_exited_button(rect, Point::new(15.0, 20.1)));
        assert!(has_touch_point_exited_button(None, Point::new(15.0, 15.0)));
    }

    #[test]
    fn test_option_click_commits() {
        let (menu, mut controller) = setup(3, "");
        controller.open_menu(0, false);
        menu.option_click(&mut controller, 2);
        assert_eq!(controller.field().value(), "v2");
        assert!(!controller.is_open());
        assert_eq!(controller.focus(), FocusTarget::Combobox);
    }

    #[test]
    fn test_option_key_down() {
        let (menu, mut controller) = setup(3, "");
        controller.open_menu(0, false);
        assert!(menu.option_key_down(&mut controller, 0, &Key::Down));
        assert_eq!(controller.focused_index(), Some(1));
    }

    #[test]
    fn test_hover_then_pointer_move() {
        let (menu, mut controller) = setup(3, "");
        controller.open_menu(0, true);
        assert!(!menu.option_pointer_over(&mut controller, 2));
        menu.document_pointer_move(&mut controller);
        assert!(menu.option_pointer_over(&mut controller, 2));
        assert_eq!(controller.focused_index(), Some(2));
    }

    #[test]
    fn test_pointer_scroll_button_lifecycle() {
        let (menu, mut controller) = setup(10, "");
        controller.open_menu(0, false);

        menu.scroll_button_pointer_enter(&mut controller, ScrollDirection::Down);
        assert!(controller.is_scrolling());
        controller.advance(TICK * 2);
        menu.scroll_button_pointer_leave(&mut controller);
        assert!(!controller.is_scrolling());
        assert_eq!(controller.viewport().unwrap().scroll_top(), 10.0);

        menu.scroll_button_pointer_down(&mut controller, ScrollDirection::Up);
        assert!(controller.is_scrolling());
        menu.scroll_button_pointer_up(&mut controller);
        assert!(!controller.is_scrolling());
    }

    #[test]
    fn test_touch_drag_off_button_stops() {
        let (menu, mut controller) = setup(10, "");
        controller.open_menu(0, false);
        // Down button spans y 124..140 at the bottom of the 100px list
        menu.scroll_button_touch_start(&mut controller, ScrollDirection::Down);
        let on_button = Point::new(50.0, 130.0);
        menu.scroll_button_touch_move(&mut controller, ScrollDirection::Down, on_button);
        assert!(controller.is_scrolling());
        let off_button = Point::new(50.0, 100.0);
        menu.scroll_button_touch_move(&mut controller, ScrollDirection::Down, off_button);
        assert!(!controller.is_scrolling());

        menu.scroll_button_touch_start(&mut controller, ScrollDirection::Down);
        menu.scroll_button_touch_cancel(&mut controller);
        assert!(!controller.is_scrolling());
    }

    #[test]
    fn test_touch_move_after_button_hidden() {
        let (menu, mut controller) = setup(10, "");
        controller.open_menu(0, false);
        menu.scroll_button_touch_start(&mut controller, ScrollDirection::Up);
        // No up button at the top of the list
        menu.scroll_button_touch_move(&mut controller, ScrollDirection::Up, Point::new(50.0, 45.0));
        assert!(!controller.is_scrolling());
    }

    #[test]
    fn test_view() {
        let (menu, mut controller) = setup(10, "v3");
        let view = menu.view(&controller);
        assert!(view.hidden);
        assert_eq!(view.id, "items");
        assert!(view.options[3].selected);

        controller.open_menu(3, false);
        let view = menu.view(&controller);
        assert!(!view.hidden);
        assert_eq!(view.focused().map(|(i, _)| i), Some(3));
        assert!(view.scroll_down_button);
        assert!(!view.scroll_up_button);
        assert_eq!(view.options.iter().filter(|o| o.role == "option").count(), 10);
    }
}
