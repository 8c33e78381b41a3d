//! Focus manager
//!
//! Moves focus to an option by index, scrolling the list so the option ends
//! up fully visible and not hidden behind a scroll button.

use serde::Serialize;

use crate::viewport::ListViewport;

/// Where keyboard focus currently is
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "index", rename_all = "lowercase")]
pub enum FocusTarget {
    /// Outside the widget
    #[default]
    Elsewhere,
    /// On the combobox control
    Combobox,
    /// On the option at this index
    Option(usize),
}

impl FocusTarget {
    /// The focused option's index, if an option has focus
    pub fn option_index(&self) -> Option<usize> {
        match self {
            FocusTarget::Option(index) => Some(*index),
            _ => None,
        }
    }
}

/// Scroll option `index` into view and return the new focus target
///
/// The first and last options scroll the list to its absolute top or bottom
/// so the corresponding scroll button disappears. Any other option is scrolled
/// into view and then nudged out from under the scroll buttons. Returns
/// `None` when `index` is out of range.
pub fn focus_on_option(
    viewport: &mut ListViewport,
    index: usize,
    option_count: usize,
) -> Option<FocusTarget> {
    if index >= option_count {
        return None;
    }

    if index == 0 {
        viewport.scroll_to_top();
    } else if index == option_count - 1 {
        viewport.scroll_to_bottom();
    } else {
        viewport.scroll_into_view(index);
        correct_scroll_if_option_is_hidden(viewport, index);
    }

    Some(FocusTarget::Option(index))
}

/// Scroll so option `index` is not covered by a rendered scroll button
pub fn correct_scroll_if_option_is_hidden(viewport: &mut ListViewport, index: usize) {
    if let (Some(button), Some(option)) =
        (viewport.scroll_up_button_rect(), viewport.option_rect(index))
    {
        if option.top() < button.bottom() {
            viewport.scroll_by(option.top() - button.bottom());
        }
    }

    if let (Some(button), Some(option)) =
        (viewport.scroll_down_button_rect(), viewport.option_rect(index))
    {
        if option.bottom() > button.top() {
            viewport.scroll_by(option.bottom() - button.top());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scroll::ScrollClass;
    use civic_platform::Point;

    /// 10 rows of 20px, 100px visible, 16px buttons
    fn viewport() -> ListViewport {
        ListViewport::uniform(Point::ZERO, 100.0, 10, 20.0, 100.0, 16.0)
    }

    #[test]
    fn test_first_option_scrolls_to_top() {
        let mut vp = viewport();
        vp.scroll_to(60.0);
        assert_eq!(focus_on_option(&mut vp, 0, 10), Some(FocusTarget::Option(0)));
        assert_eq!(vp.scroll_top(), 0.0);
    }

    #[test]
    fn test_last_option_scrolls_to_bottom() {
        let mut vp = viewport();
        assert_eq!(focus_on_option(&mut vp, 9, 10), Some(FocusTarget::Option(9)));
        assert!(vp.metrics().is_at_bottom());
    }

    #[test]
    fn test_out_of_range_is_ignored() {
        let mut vp = viewport();
        vp.scroll_to(30.0);
        assert_eq!(focus_on_option(&mut vp, 10, 10), None);
        assert_eq!(focus_on_option(&mut vp, 0, 0), None);
        assert_eq!(vp.scroll_top(), 30.0);
    }

    #[test]
    fn test_middle_option_without_buttons() {
        let mut vp = viewport();
        focus_on_option(&mut vp, 5, 10);
        // Row 5 spans 100..120 -> minimal scroll puts its bottom at 120
        assert_eq!(vp.scroll_top(), 20.0);
    }

    #[test]
    fn test_correction_below_down_button() {
        let mut vp = viewport();
        vp.set_buttons(ScrollClass::Top);
        focus_on_option(&mut vp, 5, 10);
        // Into view -> 20; option bottom at 100 overlaps down button (84..100) by 16
        assert_eq!(vp.scroll_top(), 36.0);
        let option = vp.option_rect(5).unwrap();
        let button = vp.scroll_down_button_rect().unwrap();
        assert!(option.bottom() <= button.top());
    }

    #[test]
    fn test_correction_under_up_button() {
        let mut vp = viewport();
        vp.set_buttons(ScrollClass::Middle);
        vp.scroll_to(70.0);
        focus_on_option(&mut vp, 3, 10);
        // Row 3 spans 60..80 -> into view sets top 60; up button covers 0..16
        assert_eq!(vp.scroll_top(), 44.0);
        let option = vp.option_rect(3).unwrap();
        let button = vp.scroll_up_button_rect().unwrap();
        assert!(option.top() >= button.bottom());
    }

    #[test]
    fn test_focus_target_option_index() {
        assert_eq!(FocusTarget::Option(4).option_index(), Some(4));
        assert_eq!(FocusTarget::Combobox.option_index(), None);
        assert_eq!(FocusTarget::default(), FocusTarget::Elsewhere);
    }
}
