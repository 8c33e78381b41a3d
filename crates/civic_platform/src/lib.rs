//! Civic Platform Layer
//!
//! Platform-agnostic input and geometry types consumed by civic widgets.
//! Hosts translate their native events (browser, winit, a test script) into
//! these types and feed them to widgets; widgets never talk to a windowing
//! system directly.
//!
//! # Example
//!
//! ```
//! use civic_platform::*;
//!
//! let event = Event::Input(InputEvent::Keyboard(KeyboardEvent::pressed(Key::Down)));
//! let button = Rect::new(0.0, 0.0, 40.0, 20.0);
//!
//! assert!(matches!(event, Event::Input(_)));
//! assert!(button.contains(Point::new(10.0, 10.0)));
//! ```

mod event;
mod geometry;
mod input;

// Re-export all public types
pub use event::{Event, WindowEvent};
pub use geometry::{Point, Rect, Size};
pub use input::{
    InputEvent, Key, KeyState, KeyboardEvent, MouseButton, MouseEvent, TouchEvent,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::event::{Event, WindowEvent};
    pub use crate::geometry::{Point, Rect, Size};
    pub use crate::input::{
        InputEvent, Key, KeyState, KeyboardEvent, MouseButton, MouseEvent, TouchEvent,
    };
}
