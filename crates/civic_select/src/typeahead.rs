//! Single-character typeahead

use civic_platform::Key;

use crate::option::SelectOption;

/// The typeahead character carried by `key`, if it is a printable key
///
/// Printable means exactly one word character: an ASCII letter, digit or
/// underscore. Space and punctuation are not typeahead keys.
pub fn typeahead_char(key: &Key) -> Option<char> {
    match key {
        Key::Char(c) if c.is_ascii_alphanumeric() || *c == '_' => Some(*c),
        _ => None,
    }
}

/// Index of the first option whose display text starts with `ch`,
/// ignoring case
///
/// A full linear scan per keystroke; option lists are small.
pub fn find_first_match(options: &[SelectOption], ch: char) -> Option<usize> {
    let needle: String = ch.to_lowercase().collect();
    options
        .iter()
        .position(|opt| opt.text.to_lowercase().starts_with(&needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colors() -> Vec<SelectOption> {
        ["Red", "Green", "Blue", "Yellow", "Purple", "Orange"]
            .iter()
            .map(|name| SelectOption::new(name.to_lowercase(), *name))
            .collect()
    }

    #[test]
    fn test_find_first_match_case_insensitive() {
        let opts = colors();
        assert_eq!(find_first_match(&opts, 'g'), Some(1));
        assert_eq!(find_first_match(&opts, 'G'), Some(1));
        assert_eq!(find_first_match(&opts, 'o'), Some(5));
    }

    #[test]
    fn test_find_first_match_returns_first() {
        let opts = vec![
            SelectOption::new("1", "Bravo"),
            SelectOption::new("2", "beta"),
        ];
        assert_eq!(find_first_match(&opts, 'b'), Some(0));
    }

    #[test]
    fn test_find_first_match_none() {
        assert_eq!(find_first_match(&colors(), 'z'), None);
        assert_eq!(find_first_match(&[], 'a'), None);
    }

    #[test]
    fn test_typeahead_char() {
        assert_eq!(typeahead_char(&Key::Char('a')), Some('a'));
        assert_eq!(typeahead_char(&Key::Char('Z')), Some('Z'));
        assert_eq!(typeahead_char(&Key::Char('7')), Some('7'));
        assert_eq!(typeahead_char(&Key::Char('_')), Some('_'));
        assert_eq!(typeahead_char(&Key::Char('-')), None);
        assert_eq!(typeahead_char(&Key::Char('é')), None);
        assert_eq!(typeahead_char(&Key::Space), None);
        assert_eq!(typeahead_char(&Key::Enter), None);
    }
}
