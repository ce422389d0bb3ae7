//! In-memory page environment for unit tests.
//!
//! Elements are plain indices into a flat list. Selectors are matched by exact
//! string: an element answers a selector only if it was registered with it.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::consts::FRAGMENT_LINK_SELECTOR;
use crate::page::{ClickBehavior, ClickHandler, IntersectionHandler, KeyValueStore, Page};

pub type FakeElementId = usize;

#[derive(Default)]
struct FakeElement {
    id: Option<String>,
    selectors: Vec<String>,
    is_body: bool,
    attributes: BTreeMap<String, String>,
    classes: BTreeSet<String>,
    styles: BTreeMap<String, String>,
    text: String,
    inner_html: String,
    clicks: Vec<(ClickBehavior, ClickHandler)>,
}

struct FakeObserver {
    targets: Vec<FakeElementId>,
    threshold: f64,
    handler: IntersectionHandler<FakeElementId>,
}

#[derive(Default)]
pub struct FakePage {
    elements: RefCell<Vec<FakeElement>>,
    observers: RefCell<Vec<FakeObserver>>,
    scrolled: RefCell<Vec<FakeElementId>>,
}

impl FakePage {
    fn push(&self, element: FakeElement) -> FakeElementId {
        let mut elements = self.elements.borrow_mut();
        elements.push(element);
        elements.len() - 1
    }

    /// Add an element reachable by `id`.
    pub fn add_id(&self, id: &str) -> FakeElementId {
        self.push(FakeElement { id: Some(id.to_owned()), ..FakeElement::default() })
    }

    /// Add an element answering `selector`.
    pub fn add_matching(&self, selector: &str) -> FakeElementId {
        self.push(FakeElement { selectors: vec![selector.to_owned()], ..FakeElement::default() })
    }

    pub fn add_body(&self) -> FakeElementId {
        self.push(FakeElement { is_body: true, ..FakeElement::default() })
    }

    /// Add an anchor; in-page `href`s answer the fragment link selector.
    pub fn add_anchor(&self, href: &str) -> FakeElementId {
        let mut element = FakeElement::default();
        if href.starts_with('#') {
            element.selectors.push(FRAGMENT_LINK_SELECTOR.to_owned());
        }
        element.attributes.insert("href".to_owned(), href.to_owned());
        self.push(element)
    }

    pub fn add_class_to(&self, el: FakeElementId, class: &str) {
        self.add_class(&el, class);
    }

    pub fn text(&self, el: FakeElementId) -> String {
        self.elements.borrow()[el].text.clone()
    }

    pub fn inner_html(&self, el: FakeElementId) -> String {
        self.elements.borrow()[el].inner_html.clone()
    }

    pub fn style(&self, el: FakeElementId, property: &str) -> Option<String> {
        self.elements.borrow()[el].styles.get(property).cloned()
    }

    pub fn href(&self, el: FakeElementId) -> Option<String> {
        self.attribute(&el, "href")
    }

    pub fn class_set(&self, el: FakeElementId) -> BTreeSet<String> {
        self.elements.borrow()[el].classes.clone()
    }

    pub fn click_handlers(&self, el: FakeElementId) -> usize {
        self.elements.borrow()[el].clicks.len()
    }

    /// Dispatch a click. Returns whether the default action was prevented.
    pub fn click(&self, el: FakeElementId) -> bool {
        let mut handlers = std::mem::take(&mut self.elements.borrow_mut()[el].clicks);
        let prevented = handlers
            .iter()
            .any(|(behavior, _)| *behavior == ClickBehavior::PreventDefault);
        for (_, handler) in &mut handlers {
            handler();
        }
        let mut elements = self.elements.borrow_mut();
        handlers.append(&mut elements[el].clicks);
        elements[el].clicks = handlers;
        prevented
    }

    /// Deliver an intersection entry for `el` to every observer watching it.
    pub fn intersect(&self, el: FakeElementId, intersecting: bool) {
        let mut observers = std::mem::take(&mut *self.observers.borrow_mut());
        for observer in &mut observers {
            if observer.targets.contains(&el) {
                (observer.handler)(&el, intersecting);
            }
        }
        let mut current = self.observers.borrow_mut();
        observers.append(&mut current);
        *current = observers;
    }

    pub fn observed(&self) -> Vec<FakeElementId> {
        self.observers
            .borrow()
            .iter()
            .flat_map(|o| o.targets.iter().copied())
            .collect()
    }

    pub fn thresholds(&self) -> Vec<f64> {
        self.observers.borrow().iter().map(|o| o.threshold).collect()
    }

    pub fn scrolled(&self) -> Vec<FakeElementId> {
        self.scrolled.borrow().clone()
    }
}

impl Page for FakePage {
    type Element = FakeElementId;

    fn element_by_id(&self, id: &str) -> Option<FakeElementId> {
        self.elements
            .borrow()
            .iter()
            .position(|e| e.id.as_deref() == Some(id))
    }

    fn query(&self, selector: &str) -> Option<FakeElementId> {
        self.query_all(selector).into_iter().next()
    }

    fn query_all(&self, selector: &str) -> Vec<FakeElementId> {
        self.elements
            .borrow()
            .iter()
            .enumerate()
            .filter(|(_, e)| e.selectors.iter().any(|s| s == selector))
            .map(|(i, _)| i)
            .collect()
    }

    fn body(&self) -> Option<FakeElementId> {
        self.elements.borrow().iter().position(|e| e.is_body)
    }

    fn attribute(&self, el: &FakeElementId, name: &str) -> Option<String> {
        self.elements
            .borrow()
            .get(*el)
            .and_then(|e| e.attributes.get(name).cloned())
    }

    fn set_attribute(&self, el: &FakeElementId, name: &str, value: &str) {
        if let Some(e) = self.elements.borrow_mut().get_mut(*el) {
            e.attributes.insert(name.to_owned(), value.to_owned());
        }
    }

    fn set_text(&self, el: &FakeElementId, text: &str) {
        if let Some(e) = self.elements.borrow_mut().get_mut(*el) {
            text.clone_into(&mut e.text);
        }
    }

    fn set_inner_html(&self, el: &FakeElementId, html: &str) {
        if let Some(e) = self.elements.borrow_mut().get_mut(*el) {
            html.clone_into(&mut e.inner_html);
        }
    }

    fn set_style(&self, el: &FakeElementId, property: &str, value: &str) {
        if let Some(e) = self.elements.borrow_mut().get_mut(*el) {
            e.styles.insert(property.to_owned(), value.to_owned());
        }
    }

    fn has_class(&self, el: &FakeElementId, class: &str) -> bool {
        self.elements
            .borrow()
            .get(*el)
            .is_some_and(|e| e.classes.contains(class))
    }

    fn add_class(&self, el: &FakeElementId, class: &str) {
        if let Some(e) = self.elements.borrow_mut().get_mut(*el) {
            e.classes.insert(class.to_owned());
        }
    }

    fn toggle_class(&self, el: &FakeElementId, class: &str) -> bool {
        let mut elements = self.elements.borrow_mut();
        let Some(e) = elements.get_mut(*el) else {
            return false;
        };
        if e.classes.remove(class) {
            false
        } else {
            e.classes.insert(class.to_owned());
            true
        }
    }

    fn on_click(&self, el: &FakeElementId, behavior: ClickBehavior, handler: ClickHandler) {
        if let Some(e) = self.elements.borrow_mut().get_mut(*el) {
            e.clicks.push((behavior, handler));
        }
    }

    fn scroll_into_view(&self, el: &FakeElementId) {
        self.scrolled.borrow_mut().push(*el);
    }

    fn observe_intersections(
        &self,
        targets: &[FakeElementId],
        threshold: f64,
        handler: IntersectionHandler<FakeElementId>,
    ) {
        self.observers
            .borrow_mut()
            .push(FakeObserver { targets: targets.to_vec(), threshold, handler });
    }
}

/// `localStorage` stand-in that records every write.
#[derive(Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
    writes: RefCell<Vec<(String, String)>>,
}

impl MemoryStore {
    pub fn with(key: &str, value: &str) -> Self {
        let store = Self::default();
        store
            .values
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        store
    }

    pub fn writes(&self) -> Vec<(String, String)> {
        self.writes.borrow().clone()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        self.writes
            .borrow_mut()
            .push((key.to_owned(), value.to_owned()));
    }
}
