//! Host events delivered to widgets

use crate::input::InputEvent;

/// Events a host forwards to a widget
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Window-related event
    Window(WindowEvent),
    /// Input event (mouse, keyboard, touch)
    Input(InputEvent),
}

/// Window events
#[derive(Clone, Debug, PartialEq)]
pub enum WindowEvent {
    /// The visible area or the document changed size
    Resized {
        /// Visible window height in logical pixels
        viewport_height: f32,
        /// Total document height in logical pixels
        document_height: f32,
    },
}

impl From<InputEvent> for Event {
    fn from(event: InputEvent) -> Self {
        Event::Input(event)
    }
}

impl From<WindowEvent> for Event {
    fn from(event: WindowEvent) -> Self {
        Event::Window(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Key, KeyboardEvent};

    #[test]
    fn test_input_into_event() {
        let event: Event = InputEvent::Keyboard(KeyboardEvent::pressed(Key::Enter)).into();
        assert!(matches!(
            event,
            Event::Input(InputEvent::Keyboard(KeyboardEvent { key: Key::Enter, .. }))
        ));
    }
}
