//! Page environment abstraction.
//!
//! SYSTEM CONTEXT
//! ==============
//! The controller never touches `web_sys` directly. It talks to a [`Page`]
//! (DOM lookups, mutation, event registration) and a [`KeyValueStore`]
//! (local storage). The browser build implements both over `web_sys`; tests
//! implement them in memory.
//!
//! TRADE-OFFS
//! ==========
//! Mutation methods return nothing. A browser call that fails is logged by
//! the implementation and otherwise ignored, so the trait stays infallible
//! and every feature degrades to a no-op instead of aborting startup.

use std::fmt;
use std::rc::Rc;

/// What a click handler does with the browser's default action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickBehavior {
    Default,
    PreventDefault,
}

pub type ClickHandler = Box<dyn FnMut()>;

/// Called for each intersection entry with the target and whether it is
/// currently intersecting.
pub type IntersectionHandler<E> = Box<dyn FnMut(&E, bool)>;

/// DOM operations used by the controller.
pub trait Page {
    type Element: Clone + 'static;

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;
    /// First element matching a CSS selector.
    fn query(&self, selector: &str) -> Option<Self::Element>;
    fn query_all(&self, selector: &str) -> Vec<Self::Element>;
    fn body(&self) -> Option<Self::Element>;

    fn attribute(&self, el: &Self::Element, name: &str) -> Option<String>;
    fn set_attribute(&self, el: &Self::Element, name: &str, value: &str);
    fn set_text(&self, el: &Self::Element, text: &str);
    fn set_inner_html(&self, el: &Self::Element, html: &str);
    fn set_style(&self, el: &Self::Element, property: &str, value: &str);

    fn has_class(&self, el: &Self::Element, class: &str) -> bool;
    fn add_class(&self, el: &Self::Element, class: &str);
    /// Flip `class` and return whether it is now present.
    fn toggle_class(&self, el: &Self::Element, class: &str) -> bool;

    /// Register `handler` for every click on `el` for the page's lifetime.
    fn on_click(&self, el: &Self::Element, behavior: ClickBehavior, handler: ClickHandler);
    /// Scroll `el` into view with smooth motion.
    fn scroll_into_view(&self, el: &Self::Element);
    /// Observe `targets` entering and leaving the viewport.
    fn observe_intersections(
        &self,
        targets: &[Self::Element],
        threshold: f64,
        handler: IntersectionHandler<Self::Element>,
    );
}

/// String key-value persistence (browser `localStorage`).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

/// Optional capability that re-renders icon placeholders after markup is
/// inserted (e.g. `feather.replace()`).
#[derive(Clone)]
pub struct IconRefresher(Rc<dyn Fn()>);

impl IconRefresher {
    #[must_use]
    pub fn new(refresh: impl Fn() + 'static) -> Self {
        Self(Rc::new(refresh))
    }

    pub fn refresh(&self) {
        (self.0)();
    }
}

impl fmt::Debug for IconRefresher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("IconRefresher")
    }
}
