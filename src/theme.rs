//! Light/dark theme preference.
//!
//! The theme is stored as a plain string marker. Only the exact marker
//! `"light"` selects light mode; a missing or unrecognized value is dark.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use crate::consts::THEME_STORAGE_KEY;
use crate::page::KeyValueStore;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Interpret a stored marker.
    #[must_use]
    pub fn from_marker(marker: Option<&str>) -> Self {
        if marker == Some("light") { Self::Light } else { Self::Dark }
    }

    #[must_use]
    pub fn marker(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    #[must_use]
    pub fn is_light(self) -> bool {
        self == Self::Light
    }

    /// Theme whose light-mode class state is `light`.
    #[must_use]
    pub fn from_light_class(light: bool) -> Self {
        if light { Self::Light } else { Self::Dark }
    }
}

/// Read the persisted theme, defaulting to dark.
#[must_use]
pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Theme {
    Theme::from_marker(store.get(THEME_STORAGE_KEY).as_deref())
}

/// Persist `theme`, overwriting any previous value.
pub fn save<S: KeyValueStore + ?Sized>(store: &S, theme: Theme) {
    store.set(THEME_STORAGE_KEY, theme.marker());
}
