// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Keys the lightbox reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Left or right arrow.
    Arrow(Arrow),
    /// Escape closes the lightbox.
    Escape,
    /// Enter activates a focused trigger or control.
    Enter,
}

/// Arrow direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Arrow {
    /// Previous image.
    Left,
    /// Next image.
    Right,
}

impl Key {
    /// Parses a DOM `KeyboardEvent.key` or `KeyboardEvent.code` value.
    ///
    /// Legacy IE/Edge names (`Left`, `Right`, `Esc`) are accepted too.
    #[must_use]
    pub fn from_dom(name: &str) -> Option<Self> {
        match name {
            "ArrowLeft" | "Left" => Some(Self::Arrow(Arrow::Left)),
            "ArrowRight" | "Right" => Some(Self::Arrow(Arrow::Right)),
            "Escape" | "Esc" => Some(Self::Escape),
            "Enter" | "NumpadEnter" => Some(Self::Enter),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_key_and_code_names() {
        assert_eq!(Key::from_dom("ArrowLeft"), Some(Key::Arrow(Arrow::Left)));
        assert_eq!(Key::from_dom("Right"), Some(Key::Arrow(Arrow::Right)));
        assert_eq!(Key::from_dom("Esc"), Some(Key::Escape));
        assert_eq!(Key::from_dom("NumpadEnter"), Some(Key::Enter));
        assert_eq!(Key::from_dom("KeyA"), None);
    }
}
