//! `web_sys` implementations of [`Page`] and [`KeyValueStore`], plus startup.
//!
//! This module is the only place that touches the DOM. Failing browser calls
//! are logged at `warn` and skipped.

use std::rc::Rc;

use js_sys::{Array, Function, Reflect};
use wasm_bindgen::{JsCast, JsValue, closure::Closure};
use web_sys::{
    Document, Element, Event, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, ScrollBehavior, ScrollIntoViewOptions, Storage,
};

use crate::config::ReleaseConfig;
use crate::controller::PageController;
use crate::page::{ClickBehavior, ClickHandler, IconRefresher, IntersectionHandler, KeyValueStore, Page};

#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
}

fn warn_on_err<T>(result: Result<T, JsValue>, what: &str) {
    if let Err(e) = result {
        log::warn!("{what} failed: {e:?}");
    }
}

// =============================================================================
// PAGE
// =============================================================================

/// The live document.
pub struct BrowserPage {
    document: Document,
}

impl BrowserPage {
    /// Bind to the current window's document.
    ///
    /// # Errors
    ///
    /// Returns `NoWindow` outside a browsing context and `NoDocument` in a
    /// worker-like context without a document.
    pub fn from_window() -> Result<Self, PageError> {
        let window = web_sys::window().ok_or(PageError::NoWindow)?;
        let document = window.document().ok_or(PageError::NoDocument)?;
        Ok(Self { document })
    }
}

impl Page for BrowserPage {
    type Element = Element;

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn query(&self, selector: &str) -> Option<Element> {
        match self.document.query_selector(selector) {
            Ok(found) => found,
            Err(e) => {
                log::warn!("query {selector} failed: {e:?}");
                None
            }
        }
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        let list = match self.document.query_selector_all(selector) {
            Ok(list) => list,
            Err(e) => {
                log::warn!("query_all {selector} failed: {e:?}");
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .map(|node| node.unchecked_into::<Element>())
            .collect()
    }

    fn body(&self) -> Option<Element> {
        self.document.body().map(Element::from)
    }

    fn attribute(&self, el: &Element, name: &str) -> Option<String> {
        el.get_attribute(name)
    }

    fn set_attribute(&self, el: &Element, name: &str, value: &str) {
        warn_on_err(el.set_attribute(name, value), "set_attribute");
    }

    fn set_text(&self, el: &Element, text: &str) {
        el.set_text_content(Some(text));
    }

    fn set_inner_html(&self, el: &Element, html: &str) {
        el.set_inner_html(html);
    }

    fn set_style(&self, el: &Element, property: &str, value: &str) {
        if let Some(html) = el.dyn_ref::<HtmlElement>() {
            warn_on_err(html.style().set_property(property, value), "set style");
        }
    }

    fn has_class(&self, el: &Element, class: &str) -> bool {
        el.class_list().contains(class)
    }

    fn add_class(&self, el: &Element, class: &str) {
        warn_on_err(el.class_list().add_1(class), "add class");
    }

    fn toggle_class(&self, el: &Element, class: &str) -> bool {
        match el.class_list().toggle(class) {
            Ok(present) => present,
            Err(e) => {
                log::warn!("toggle class {class} failed: {e:?}");
                el.class_list().contains(class)
            }
        }
    }

    fn on_click(&self, el: &Element, behavior: ClickBehavior, mut handler: ClickHandler) {
        let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            if behavior == ClickBehavior::PreventDefault {
                event.prevent_default();
            }
            handler();
        });
        warn_on_err(
            el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref()),
            "click listener",
        );
        // Listeners live as long as the page.
        closure.forget();
    }

    fn scroll_into_view(&self, el: &Element) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        el.scroll_into_view_with_scroll_into_view_options(&options);
    }

    fn observe_intersections(&self, targets: &[Element], threshold: f64, mut handler: IntersectionHandler<Element>) {
        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, _observer: IntersectionObserver| {
                for entry in entries.iter() {
                    if let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() {
                        handler(&entry.target(), entry.is_intersecting());
                    }
                }
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(threshold));
        match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
            Ok(observer) => {
                for target in targets {
                    observer.observe(target);
                }
                callback.forget();
            }
            Err(e) => log::warn!("IntersectionObserver unavailable: {e:?}"),
        }
    }
}

// =============================================================================
// STORAGE
// =============================================================================

/// `window.localStorage`, or nothing when storage is disabled.
pub struct BrowserStore {
    storage: Option<Storage>,
}

impl BrowserStore {
    #[must_use]
    pub fn from_window() -> Self {
        let storage = match web_sys::window().map(|w| w.local_storage()) {
            Some(Ok(storage)) => storage,
            Some(Err(e)) => {
                log::warn!("localStorage unavailable: {e:?}");
                None
            }
            None => None,
        };
        Self { storage }
    }
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.storage.as_ref()?.get_item(key) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("localStorage read {key} failed: {e:?}");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = &self.storage {
            warn_on_err(storage.set_item(key, value), "localStorage write");
        }
    }
}

// =============================================================================
// STARTUP
// =============================================================================

/// `feather.replace()` from the page's global scope, if the library is loaded.
#[must_use]
pub fn feather_icons() -> Option<IconRefresher> {
    let Ok(feather) = Reflect::get(&js_sys::global(), &JsValue::from_str("feather")) else {
        return None;
    };
    if !feather.is_object() {
        return None;
    }
    let Ok(replace) = Reflect::get(&feather, &JsValue::from_str("replace")) else {
        return None;
    };
    let Ok(replace) = replace.dyn_into::<Function>() else {
        return None;
    };
    Some(IconRefresher::new(move || {
        warn_on_err(replace.call0(&feather), "feather.replace");
    }))
}

/// Run the controller once the document has been parsed.
pub fn boot() {
    let page = match BrowserPage::from_window() {
        Ok(page) => page,
        Err(e) => {
            log::error!("release page disabled: {e}");
            return;
        }
    };

    if page.document.ready_state() != "loading" {
        launch(page);
        return;
    }

    let document = page.document.clone();
    let mut pending = Some(page);
    let on_ready = Closure::<dyn FnMut()>::new(move || {
        if let Some(page) = pending.take() {
            launch(page);
        }
    });
    warn_on_err(
        document.add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref()),
        "DOMContentLoaded listener",
    );
    on_ready.forget();
}

fn launch(page: BrowserPage) {
    let controller = PageController::new(ReleaseConfig::builtin(), Rc::new(page), Rc::new(BrowserStore::from_window()));
    let controller = match feather_icons() {
        Some(icons) => controller.with_icons(icons),
        None => controller,
    };
    controller.init();
}
