//! DOM contract and shared constants.
//!
//! Every element id, selector, class name and style value the controller
//! touches lives here so the page markup and the wasm layer can be checked
//! against one list.

// --- Element ids ---

/// Badge showing the current release.
pub const VERSION_BADGE_ID: &str = "version-badge";
/// Container receiving the rendered prior-version rows.
pub const VERSION_LIST_ID: &str = "version-list";
/// Button that expands and collapses the prior-version list.
pub const TOGGLE_VERSIONS_ID: &str = "toggle-versions";
/// Optional link to the repository's releases page.
pub const RELEASES_LINK_ID: &str = "releases-link";

// --- Selectors ---

/// Wrapper hidden entirely when there are no prior versions.
pub const PREVIOUS_VERSIONS_SELECTOR: &str = ".previous-versions";
pub const THEME_TOGGLE_SELECTOR: &str = ".theme-toggle";
pub const FRAGMENT_LINK_SELECTOR: &str = "a[href^=\"#\"]";
/// Elements that fade in on first entering the viewport.
pub const ANIMATED_SELECTOR: &str = ".feature-card, .download-box";

// --- Classes ---

pub const HIDDEN_CLASS: &str = "hidden";
pub const ACTIVE_CLASS: &str = "active";
pub const LIGHT_MODE_CLASS: &str = "light-mode";

// --- Storage ---

pub const THEME_STORAGE_KEY: &str = "theme";

// --- Entrance animation ---

/// Fraction of an element that must be visible before it animates in.
pub const ENTRANCE_THRESHOLD: f64 = 0.1;

/// Style applied before observation starts.
pub const ENTRANCE_INITIAL_STYLE: &[(&str, &str)] = &[
    ("opacity", "0"),
    ("transform", "translateY(20px)"),
    ("transition", "opacity 0.6s ease-out, transform 0.6s ease-out"),
];

/// Resting style applied once the element intersects the viewport.
pub const ENTRANCE_RESTING_STYLE: &[(&str, &str)] = &[("opacity", "1"), ("transform", "translateY(0)")];
