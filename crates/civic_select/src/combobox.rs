//! Combobox control
//!
//! The always-visible, read-only control. It shows the selected option (or
//! the label as a placeholder), carries the combobox semantics, and turns
//! keyboard and click input into controller calls:
//!
//! | Input        | Action                                         |
//! |--------------|------------------------------------------------|
//! | `ArrowDown`  | open focused on the first option               |
//! | `ArrowUp`    | open focused on the last option                |
//! | `Enter`      | open focused on the selection, else the first  |
//! | `a`-`z` etc. | open focused on the first match, else as Enter |
//! | click        | toggle, focused on the selection or the first  |
//!
//! Every other key is left unhandled so the host can apply its default
//! behavior (Tab moves focus out of the widget).

use civic_platform::Key;
use serde::{Deserialize, Serialize};

use crate::controller::MenuController;
use crate::field::Field;
use crate::focus::FocusTarget;
use crate::option::{selected_index, SelectOption};
use crate::typeahead::{find_first_match, typeahead_char};
use crate::view::ComboboxView;

/// Static configuration of the control
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComboboxConfig {
    /// Accessible label, also shown when nothing is selected
    pub label: String,
    /// Id of the listbox the control opens
    pub listbox_id: String,
}

impl Default for ComboboxConfig {
    fn default() -> Self {
        Self {
            label: "Select an option".to_string(),
            listbox_id: "select-listbox".to_string(),
        }
    }
}

/// The combobox control
#[derive(Clone, Debug)]
pub struct Combobox {
    config: ComboboxConfig,
}

impl Combobox {
    pub fn new(config: ComboboxConfig) -> Self {
        Self { config }
    }

    pub fn label(&self) -> &str {
        &self.config.label
    }

    pub fn listbox_id(&self) -> &str {
        &self.config.listbox_id
    }

    /// Text shown in the control, and whether it is the placeholder label
    pub fn display_text<'a>(&'a self, options: &'a [SelectOption], value: &str) -> (&'a str, bool) {
        match selected_index(options, value) {
            Some(index) => (options[index].text.as_str(), false),
            None => (self.config.label.as_str(), true),
        }
    }

    /// Handle a key pressed while the control has focus
    ///
    /// Returns true if the key was consumed.
    pub fn handle_key<F: Field>(&self, controller: &mut MenuController<F>, key: &Key) -> bool {
        match key {
            Key::Down => controller.open_menu(0, true),
            Key::Up => {
                let last = controller.options().len().saturating_sub(1);
                controller.open_menu(last, true);
            }
            Key::Enter => {
                let index = controller.selected_or_first();
                controller.open_menu(index, true);
            }
            key => {
                let Some(ch) = typeahead_char(key) else {
                    return false;
                };
                let index = find_first_match(controller.options(), ch)
                    .unwrap_or_else(|| controller.selected_or_first());
                controller.open_menu(index, true);
            }
        }
        true
    }

    /// The control was clicked
    pub fn handle_click<F: Field>(&self, controller: &mut MenuController<F>) {
        controller.focus_combobox();
        let index = controller.selected_or_first();
        controller.toggle_menu(index, false);
    }

    /// Render the control
    pub fn view<F: Field>(&self, controller: &MenuController<F>) -> ComboboxView {
        let value = controller.field().value();
        let (text, placeholder) = self.display_text(controller.options(), &value);
        ComboboxView {
            role: "combobox",
            expanded: controller.is_expanded(),
            label: self.config.label.clone(),
            controls: self.config.listbox_id.clone(),
            text: text.to_string(),
            placeholder,
            focused: controller.focus() == FocusTarget::Combobox,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::SharedField;
    use crate::viewport::ListViewport;
    use civic_platform::Point;

    fn colors() -> Vec<SelectOption> {
        ["Red", "Green", "Blue", "Yellow", "Purple", "Orange"]
            .iter()
            .map(|name| SelectOption::new(name.to_lowercase(), *name))
            .collect()
    }

    fn setup(value: &str) -> (Combobox, MenuController<SharedField>) {
        let mut controller = MenuController::new(colors(), SharedField::new(value));
        controller.mount(ListViewport::uniform(Point::ZERO, 200.0, 6, 20.0, 100.0, 16.0));
        controller.focus_combobox();
        let combobox = Combobox::new(ComboboxConfig {
            label: "Color".into(),
            listbox_id: "colors".into(),
        });
        (combobox, controller)
    }

    #[test]
    fn test_arrow_keys_open_at_extremes() {
        let (combobox, mut controller) = setup("green");
        assert!(combobox.handle_key(&mut controller, &Key::Down));
        assert_eq!(controller.focused_index(), Some(0));
        assert!(controller.is_keyboard_navigating());

        controller.close_menu_and_focus_on_combobox();
        assert!(combobox.handle_key(&mut controller, &Key::Up));
        assert_eq!(controller.focused_index(), Some(5));
    }

    #[test]
    fn test_enter_opens_at_selection() {
        let (combobox, mut controller) = setup("green");
        combobox.handle_key(&mut controller, &Key::Enter);
        assert_eq!(controller.focused_index(), Some(1));

        let (combobox, mut controller) = setup("");
        combobox.handle_key(&mut controller, &Key::Enter);
        assert_eq!(controller.focused_index(), Some(0));
    }

    #[test]
    fn test_typeahead_opens_at_match_or_selection() {
        let (combobox, mut controller) = setup("blue");
        combobox.handle_key(&mut controller, &Key::Char('Y'));
        assert_eq!(controller.focused_index(), Some(3));

        controller.close_menu_and_focus_on_combobox();
        combobox.handle_key(&mut controller, &Key::Char('z'));
        assert!(controller.is_open());
        assert_eq!(controller.focused_index(), Some(2));
    }

    #[test]
    fn test_other_keys_pass_through() {
        let (combobox, mut controller) = setup("");
        assert!(!combobox.handle_key(&mut controller, &Key::Tab));
        assert!(!combobox.handle_key(&mut controller, &Key::Escape));
        assert!(!combobox.handle_key(&mut controller, &Key::Char(' ')));
        assert!(!controller.is_open());
    }

    #[test]
    fn test_click_toggles() {
        let (combobox, mut controller) = setup("purple");
        combobox.handle_click(&mut controller);
        assert!(controller.is_open());
        assert_eq!(controller.focused_index(), Some(4));
        assert!(!controller.is_keyboard_navigating());

        combobox.handle_click(&mut controller);
        assert!(!controller.is_open());
        assert_eq!(controller.focus(), FocusTarget::Combobox);
    }

    #[test]
    fn test_display_text() {
        let (combobox, _) = setup("");
        let options = colors();
        assert_eq!(combobox.display_text(&options, "green"), ("Green", false));
        assert_eq!(combobox.display_text(&options, ""), ("Color", true));
        assert_eq!(combobox.display_text(&options, "teal"), ("Color", true));
    }

    #[test]
    fn test_view_tracks_expanded() {
        let (combobox, mut controller) = setup("red");
        let view = combobox.view(&controller);
        assert_eq!(view.role, "combobox");
        assert!(!view.expanded);
        assert_eq!(view.text, "Red");
        assert_eq!(view.controls, "colors");
        assert!(view.focused);

        combobox.handle_key(&mut controller, &Key::Down);
        let view = combobox.view(&controller);
        assert!(view.expanded);
        assert!(!view.focused);
    }
}
