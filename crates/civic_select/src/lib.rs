//! Civic Select
//!
//! An accessible single-select dropdown: a read-only combobox control that
//! opens a listbox popup. The widget supports mouse, touch and full keyboard
//! navigation, auto-scrolls long lists while a scroll button is hovered or
//! held, and writes the chosen value into an external [`Field`] it never
//! owns.
//!
//! # Components
//!
//! - [`Combobox`] - the always-visible control
//! - [`Menu`] - the listbox popup and its scroll buttons
//! - [`MenuController`] - the shared state machine both of them drive
//! - [`Select`] - the composition, fed with [`civic_platform::Event`]s
//!
//! The widget is headless: [`Select::view`] returns a serializable
//! [`SelectView`] describing what to render and which ARIA state to expose.
//!
//! # Keyboard
//!
//! On the control, `ArrowDown` / `ArrowUp` open at the first / last option,
//! `Enter` opens at the selection, and a letter opens at the first option
//! starting with it. Inside the menu the arrows move focus (clamped at the
//! ends), a letter jumps to the first match, `Enter` or `Tab` commit, and
//! `Escape` closes without committing.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use civic_platform::{Event, InputEvent, Key, KeyboardEvent};
//! use civic_select::prelude::*;
//!
//! let options: Vec<SelectOption> = ["Red", "Green", "Blue"]
//!     .iter()
//!     .map(|c| SelectOption::new(c.to_lowercase(), *c))
//!     .collect();
//! let field = SharedField::new("green");
//!
//! let mut select = Select::new(SelectConfig::default(), options, field.clone())?;
//! select.mount();
//! select.controller_mut().focus_combobox();
//!
//! let press = |key| Event::Input(InputEvent::Keyboard(KeyboardEvent::pressed(key)));
//! select.handle_event(&press(Key::Enter));
//! assert_eq!(select.view().listbox.focused().map(|(i, _)| i), Some(1));
//!
//! select.handle_event(&press(Key::Down));
//! select.handle_event(&press(Key::Enter));
//! select.advance(Duration::from_millis(16));
//! assert_eq!(field.value(), "blue");
//! # Ok::<(), civic_select::ConfigError>(())
//! ```

pub mod combobox;
pub mod controller;
pub mod error;
pub mod field;
pub mod focus;
pub mod menu;
pub mod menu_state;
pub mod option;
pub mod scroll;
pub mod scroll_engine;
pub mod select;
pub mod typeahead;
pub mod view;
pub mod viewport;


pub use combobox::{Combobox, ComboboxConfig};
pub use controller::{MenuController, DEFAULT_FALLBACK_MAX_HEIGHT};
pub use error::{ConfigError, Result};
pub use field::{ChangeListener, Field, SharedField};
pub use focus::{correct_scroll_if_option_is_hidden, focus_on_option, FocusTarget};
pub use menu::{has_touch_point_exited_button, Menu};
pub use menu_state::{menu_max_height, MenuState, ScreenMetrics};
pub use option::{selected_index, SelectOption};
pub use scroll::{ScrollClass, ScrollDirection, ScrollMetrics};
pub use scroll_engine::{AdvanceOutcome, ScrollEngine, ScrollEngineConfig};
pub use select::{HitTarget, Select, SelectConfig, SelectLayout};
pub use typeahead::{find_first_match, typeahead_char};
pub use view::{ComboboxView, ListboxView, OptionView, SelectView};
pub use viewport::ListViewport;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::combobox::ComboboxConfig;
    pub use crate::controller::MenuController;
    pub use crate::field::{Field, SharedField};
    pub use crate::focus::FocusTarget;
    pub use crate::option::SelectOption;
    pub use crate::scroll::{ScrollClass, ScrollDirection};
    pub use crate::select::{HitTarget, Select, SelectConfig, SelectLayout};
    pub use crate::view::SelectView;
}
