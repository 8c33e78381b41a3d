//! Declarative rendering contract
//!
//! A [`SelectView`] is a snapshot of everything a renderer or assistive
//! technology needs: combobox semantics on the control and listbox semantics
//! on the popup. Views are plain data and serialize with serde.

use std::fmt;

use serde::Serialize;

use crate::scroll::ScrollClass;

/// Snapshot of the whole widget
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SelectView {
    pub combobox: ComboboxView,
    pub listbox: ListboxView,
}

/// The always-visible control
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ComboboxView {
    /// Always `"combobox"`
    pub role: &'static str,
    /// `aria-expanded`
    pub expanded: bool,
    /// `aria-label`
    pub label: String,
    /// `aria-controls`: the listbox id
    pub controls: String,
    /// Selected option's text, or the label when nothing is selected
    pub text: String,
    /// `text` is the label standing in for a missing selection
    pub placeholder: bool,
    /// The control has keyboard focus
    pub focused: bool,
}

/// The popup option list
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ListboxView {
    /// Always `"listbox"`
    pub role: &'static str,
    pub id: String,
    pub hidden: bool,
    pub options: Vec<OptionView>,
    pub scroll_class: ScrollClass,
    pub scroll_up_button: bool,
    pub scroll_down_button: bool,
    pub scroll_top: f32,
}

/// One row of the listbox
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OptionView {
    /// Always `"option"`
    pub role: &'static str,
    pub value: String,
    pub text: String,
    /// `aria-selected`: the option's value equals the field's value
    pub selected: bool,
    /// The option has keyboard focus
    pub focused: bool,
}

impl ListboxView {
    /// The focused option, if any
    pub fn focused(&self) -> Option<(usize, &OptionView)> {
        self.options.iter().enumerate().find(|(_, opt)| opt.focused)
    }
}

impl fmt::Display for SelectView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let combobox = &self.combobox;
        let caret = if combobox.expanded { '▴' } else { '▾' };
        let marker = if combobox.focused { '>' } else { ' ' };
        if combobox.placeholder {
            writeln!(f, "{marker}[ ({}) {caret} ]", combobox.text)?;
        } else {
            writeln!(f, "{marker}[ {} {caret} ]", combobox.text)?;
        }

        let listbox = &self.listbox;
        if listbox.hidden {
            return Ok(());
        }
        writeln!(
            f,
            "  #{} scroll={:?} top={}",
            listbox.id, listbox.scroll_class, listbox.scroll_top
        )?;
        if listbox.scroll_up_button {
            writeln!(f, "   ^^^")?;
        }
        for option in &listbox.options {
            let focus = if option.focused { '>' } else { ' ' };
            let check = if option.selected { '*' } else { ' ' };
            writeln!(f, "  {focus}{check} {}", option.text)?;
        }
        if listbox.scroll_down_button {
            writeln!(f, "   vvv")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(hidden: bool) -> SelectView {
        SelectView {
            combobox: ComboboxView {
                role: "combobox",
                expanded: !hidden,
                label: "Color".into(),
                controls: "colors".into(),
                text: "Color".into(),
                placeholder: true,
                focused: true,
            },
            listbox: ListboxView {
                role: "listbox",
                id: "colors".into(),
                hidden,
                options: vec![
                    OptionView {
                        role: "option",
                        value: "red".into(),
                        text: "Red".into(),
                        selected: false,
                        focused: false,
                    },
                    OptionView {
                        role: "option",
                        value: "green".into(),
                        text: "Green".into(),
                        selected: true,
                        focused: true,
                    },
                ],
                scroll_class: ScrollClass::Top,
                scroll_up_button: false,
                scroll_down_button: true,
                scroll_top: 0.0,
            },
        }
    }

    #[test]
    fn test_focused_option() {
        let v = view(false);
        let (index, option) = v.listbox.focused().unwrap();
        assert_eq!(index, 1);
        assert_eq!(option.value, "green");
    }

    #[test]
    fn test_serialize_semantics() {
        let json = serde_json::to_value(view(false)).unwrap();
        assert_eq!(json["combobox"]["role"], "combobox");
        assert_eq!(json["combobox"]["controls"], "colors");
        assert_eq!(json["listbox"]["scroll_class"], "top");
        assert_eq!(json["listbox"]["options"][1]["selected"], true);
    }

    #[test]
    fn test_display_hidden_menu() {
        let text = view(true).to_string();
        assert_eq!(text, ">[ (Color) ▾ ]\n");
    }

    #[test]
    fn test_display_open_menu() {
        let text = view(false).to_string();
        assert!(text.contains(">* Green"));
        assert!(text.contains("vvv"));
        assert!(!text.contains("^^^"));
    }
}
