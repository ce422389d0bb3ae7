//! Page controller: wires every page behavior at load time.
//!
//! DESIGN
//! ======
//! `init` runs six independent setup steps. Each step looks up the elements
//! it needs and returns early when one is missing, so a page that lacks (say)
//! a theme toggle still gets working download links. Nothing here blocks or
//! outlives the registered event handlers.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use std::rc::Rc;

use crate::config::{ArtifactKind, ReleaseConfig};
use crate::consts::{
    ACTIVE_CLASS, ANIMATED_SELECTOR, ENTRANCE_INITIAL_STYLE, ENTRANCE_RESTING_STYLE, ENTRANCE_THRESHOLD,
    FRAGMENT_LINK_SELECTOR, HIDDEN_CLASS, LIGHT_MODE_CLASS, PREVIOUS_VERSIONS_SELECTOR, RELEASES_LINK_ID,
    THEME_TOGGLE_SELECTOR, TOGGLE_VERSIONS_ID, VERSION_BADGE_ID, VERSION_LIST_ID,
};
use crate::markup::version_rows;
use crate::page::{ClickBehavior, IconRefresher, KeyValueStore, Page};
use crate::theme::{self, Theme};
use crate::version::previous_versions;

// =============================================================================
// TYPES
// =============================================================================

/// Outcome of prior-version rendering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PreviousVersions {
    /// No list container on the page.
    #[default]
    Skipped,
    /// Nothing to show; the wrapper was hidden.
    Hidden,
    /// This many rows were rendered.
    Rendered(usize),
}

/// What `init` wired up.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InitReport {
    pub badge: bool,
    pub download_links: usize,
    pub releases_link: bool,
    pub previous_versions: PreviousVersions,
    pub versions_toggle: bool,
    pub fragment_links: usize,
    pub animated: usize,
    pub theme: Theme,
    pub theme_toggle: bool,
}

/// Owns the release configuration and the page environment.
pub struct PageController<P, S> {
    config: Rc<ReleaseConfig>,
    page: Rc<P>,
    store: Rc<S>,
    icons: Option<IconRefresher>,
}

impl<P, S> PageController<P, S>
where
    P: Page + 'static,
    S: KeyValueStore + 'static,
{
    #[must_use]
    pub fn new(config: ReleaseConfig, page: Rc<P>, store: Rc<S>) -> Self {
        Self { config: Rc::new(config), page, store, icons: None }
    }

    /// Inject the icon refresher run after dynamic markup is inserted.
    #[must_use]
    pub fn with_icons(mut self, icons: IconRefresher) -> Self {
        self.icons = Some(icons);
        self
    }

    #[must_use]
    pub fn config(&self) -> &ReleaseConfig {
        &self.config
    }

    /// Run every setup step once.
    pub fn init(&self) -> InitReport {
        let mut report = InitReport::default();
        (report.badge, report.download_links) = self.populate_downloads();
        report.releases_link = self.populate_releases_link();
        report.previous_versions = self.render_previous_versions();
        report.versions_toggle = self.wire_versions_toggle();
        report.fragment_links = self.wire_fragment_links();
        report.animated = self.wire_entrance_animation();
        (report.theme, report.theme_toggle) = self.wire_theme();

        log::info!(
            "release page ready: {} (links={}, previous={:?}, anchors={}, animated={}, theme={})",
            self.config.current_version,
            report.download_links,
            report.previous_versions,
            report.fragment_links,
            report.animated,
            report.theme.marker()
        );
        report
    }

    // --- Download links ---

    /// Fill the version badge and primary download links.
    ///
    /// Returns whether the badge was found and how many links were set.
    pub fn populate_downloads(&self) -> (bool, usize) {
        let version = self.config.current_version.as_str();
        let page = &*self.page;

        let badge = page.element_by_id(VERSION_BADGE_ID);
        if let Some(badge) = &badge {
            page.set_text(badge, &format!("{version} Released"));
        }

        let mut links = 0;
        for kind in ArtifactKind::ALL {
            let (Some(link), Some(url)) = (page.element_by_id(kind.element_id()), self.config.download_url(kind, version))
            else {
                continue;
            };
            page.set_attribute(&link, "href", &url);
            links += 1;
        }
        log::debug!("download links: badge={} links={links}", badge.is_some());
        (badge.is_some(), links)
    }

    /// Point the optional releases link at the repository.
    pub fn populate_releases_link(&self) -> bool {
        let (Some(link), Some(url)) = (self.page.element_by_id(RELEASES_LINK_ID), self.config.releases_url()) else {
            return false;
        };
        self.page.set_attribute(&link, "href", &url);
        true
    }

    // --- Previous versions ---

    pub fn render_previous_versions(&self) -> PreviousVersions {
        let page = &*self.page;
        let Some(list) = page.element_by_id(VERSION_LIST_ID) else {
            return PreviousVersions::Skipped;
        };

        let versions = previous_versions(&self.config.known_versions, &self.config.current_version);
        if versions.is_empty() {
            if let Some(container) = page.query(PREVIOUS_VERSIONS_SELECTOR) {
                page.set_style(&container, "display", "none");
            }
            log::debug!("previous versions: none, section hidden");
            return PreviousVersions::Hidden;
        }

        page.set_inner_html(&list, &version_rows(&self.config, &versions));
        if let Some(icons) = &self.icons {
            icons.refresh();
        }
        log::debug!("previous versions: rendered {}", versions.len());
        PreviousVersions::Rendered(versions.len())
    }

    /// Expand/collapse the prior-version list from its button.
    pub fn wire_versions_toggle(&self) -> bool {
        let page = &*self.page;
        let (Some(button), Some(list)) = (page.element_by_id(TOGGLE_VERSIONS_ID), page.element_by_id(VERSION_LIST_ID))
        else {
            return false;
        };

        let handler_page = Rc::clone(&self.page);
        let handler_button = button.clone();
        page.on_click(
            &button,
            ClickBehavior::Default,
            Box::new(move || {
                let hidden = handler_page.toggle_class(&list, HIDDEN_CLASS);
                handler_page.toggle_class(&handler_button, ACTIVE_CLASS);
                log::debug!("previous versions {}", if hidden { "collapsed" } else { "expanded" });
            }),
        );
        true
    }

    // --- Smooth scrolling ---

    /// Intercept in-page anchor clicks and scroll smoothly to their target.
    pub fn wire_fragment_links(&self) -> usize {
        let anchors = self.page.query_all(FRAGMENT_LINK_SELECTOR);
        for anchor in &anchors {
            let page = Rc::clone(&self.page);
            let target = anchor.clone();
            self.page.on_click(
                anchor,
                ClickBehavior::PreventDefault,
                Box::new(move || {
                    if let Some(href) = page.attribute(&target, "href") {
                        scroll_to_fragment(&*page, &href);
                    }
                }),
            );
        }
        log::debug!("fragment links: {}", anchors.len());
        anchors.len()
    }

    // --- Entrance animation ---

    /// Hide marked elements and reveal each one as it enters the viewport.
    pub fn wire_entrance_animation(&self) -> usize {
        let page = &*self.page;
        let targets = page.query_all(ANIMATED_SELECTOR);
        if targets.is_empty() {
            return 0;
        }

        for el in &targets {
            apply_styles(page, el, ENTRANCE_INITIAL_STYLE);
        }

        let handler_page = Rc::clone(&self.page);
        page.observe_intersections(
            &targets,
            ENTRANCE_THRESHOLD,
            Box::new(move |el, intersecting| {
                if intersecting {
                    apply_styles(&*handler_page, el, ENTRANCE_RESTING_STYLE);
                }
            }),
        );
        log::debug!("entrance animation: observing {}", targets.len());
        targets.len()
    }

    // --- Theme ---

    /// Apply the stored theme and wire the toggle control.
    ///
    /// Returns the theme applied at load and whether a toggle was found.
    pub fn wire_theme(&self) -> (Theme, bool) {
        let page = &*self.page;
        let theme = theme::load(&*self.store);
        let Some(body) = page.body() else {
            return (theme, false);
        };
        if theme.is_light() {
            page.add_class(&body, LIGHT_MODE_CLASS);
        }

        let Some(toggle) = page.query(THEME_TOGGLE_SELECTOR) else {
            return (theme, false);
        };
        let handler_page = Rc::clone(&self.page);
        let store = Rc::clone(&self.store);
        page.on_click(
            &toggle,
            ClickBehavior::Default,
            Box::new(move || {
                let light = handler_page.toggle_class(&body, LIGHT_MODE_CLASS);
                let next = Theme::from_light_class(light);
                theme::save(&*store, next);
                log::debug!("theme switched to {}", next.marker());
            }),
        );
        (theme, true)
    }
}

/// Element id referenced by an in-page `href`, if any.
#[must_use]
pub fn fragment_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

fn scroll_to_fragment<P: Page + ?Sized>(page: &P, href: &str) {
    let Some(id) = fragment_id(href) else {
        return;
    };
    match page.element_by_id(id) {
        Some(target) => page.scroll_into_view(&target),
        None => log::debug!("no scroll target for #{id}"),
    }
}

fn apply_styles<P: Page + ?Sized>(page: &P, el: &P::Element, styles: &[(&str, &str)]) {
    for (property, value) in styles {
        page.set_style(el, property, value);
    }
}
