//! Field adapter - the external owner of the selected value
//!
//! The select never owns its value. It reads the current value from a
//! [`Field`] to decide what to display and which option to focus first, and
//! writes to it only when the user commits an option.
//!
//! [`SharedField`] is a cloneable in-memory field for hosts that don't bring
//! their own form model.
//!
//! ```
//! use civic_select::{Field, SharedField};
//!
//! let mut field = SharedField::new("green");
//! let observer = field.clone();
//!
//! field.set_value("blue");
//! assert_eq!(observer.value(), "blue");
//! ```

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// The external field a select reads from and commits to
pub trait Field {
    /// The field's current value
    fn value(&self) -> String;

    /// Replace the field's value (called only on commit)
    fn set_value(&mut self, value: &str);

    /// Notify the field that the user left the widget without committing
    fn blur(&mut self) {}
}

/// Callback invoked with the new value after every commit
pub type ChangeListener = Arc<dyn Fn(&str) + Send + Sync>;

#[derive(Default)]
struct FieldInner {
    value: String,
    blurred: bool,
    listeners: Vec<ChangeListener>,
}

/// A cloneable field backed by shared state
///
/// Clones observe the same value; listeners fire on `set_value`. A listener
/// that panicked elsewhere does not lose the value: a poisoned lock is
/// recovered.
#[derive(Clone, Default)]
pub struct SharedField {
    inner: Arc<Mutex<FieldInner>>,
}

impl SharedField {
    /// Create a field holding `value`
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(FieldInner {
                value: value.into(),
                ..Default::default()
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, FieldInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a change listener
    pub fn on_change<F>(&self, f: F)
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.lock().listeners.push(Arc::new(f));
    }

    /// Whether `blur` has been called since creation
    pub fn has_been_blurred(&self) -> bool {
        self.lock().blurred
    }
}

impl Field for SharedField {
    fn value(&self) -> String {
        self.lock().value.clone()
    }

    fn set_value(&mut self, value: &str) {
        // Listeners run outside the lock so they may read the field
        let listeners = {
            let mut inner = self.lock();
            inner.value = value.to_string();
            inner.listeners.clone()
        };
        for listener in listeners {
            listener(value);
        }
    }

    fn blur(&mut self) {
        self.lock().blurred = true;
    }
}

impl fmt::Debug for SharedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedField")
            .field("value", &self.value())
            .field("blurred", &self.has_been_blurred())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_clones_share_value() {
        let mut field = SharedField::new("");
        let other = field.clone();
        field.set_value("ny");
        assert_eq!(other.value(), "ny");
    }

    #[test]
    fn test_listeners_fire_on_set() {
        let mut field = SharedField::new("a");
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_in = calls.clone();
        let reader = field.clone();
        field.on_change(move |value| {
            assert_eq!(value, "b");
            // Reading inside the listener must not deadlock
            assert_eq!(reader.value(), "b");
            calls_in.fetch_add(1, Ordering::SeqCst);
        });

        field.set_value("b");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_blur_flag() {
        let mut field = SharedField::new("");
        assert!(!field.has_been_blurred());
        field.blur();
        assert!(field.has_been_blurred());
        assert_eq!(field.value(), "");
    }

    #[test]
    fn test_poisoned_lock_keeps_value() {
        let mut field = SharedField::new("green");
        let inner = Arc::clone(&field.inner);
        let _ = std::thread::spawn(move || {
            let _guard = inner.lock().unwrap();
            panic!("listener blew up");
        })
        .join();
        assert!(field.inner.is_poisoned());

        assert_eq!(field.value(), "green");
        field.set_value("blue");
        assert_eq!(field.value(), "blue");
        field.blur();
        assert!(field.has_been_blurred());
    }
}
