// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Category filtering for the portfolio grid.
//!
//! ## Transitions
//!
//! Showing an item is two-phase: `display: block` is applied at once, and the
//! fade-in (`opacity: 1; transform: scale(1)`) follows after the reveal delay so
//! the item is laid out before the transition starts. Hiding runs the other way:
//! the fade-out (`opacity: 0; transform: scale(hidden_scale)`) starts at once and
//! `display: none` follows after the collapse delay.
//!
//! Pending transitions are never cancelled. Switching filters quickly leaves the
//! older deferred steps queued, and the last one to fall due wins.

use std::time::Duration;

use tracing::{debug, trace};
use vitrine_dom::{Display, Document, ElementId, Transform};

use crate::scroll_observer::ACTIVE_CLASS;
use crate::timer::Scheduler;

/// Filter value that matches every item.
pub const ALL: &str = "all";

/// Attribute holding a button's filter value.
pub const FILTER_ATTR: &str = "data-filter";

/// Attribute holding an item's category.
pub const CATEGORY_ATTR: &str = "data-category";

/// Whether an item with `category` is visible under `filter`.
///
/// Both sides are optional: a button without [`FILTER_ATTR`] selects exactly the
/// items without [`CATEGORY_ATTR`].
pub fn matches_filter(filter: Option<&str>, category: Option<&str>) -> bool {
    filter == Some(ALL) || category == filter
}

/// Timing and scale of the show/hide transitions.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FilterTiming {
    /// Delay before a shown item fades in.
    pub reveal_delay: Duration,
    /// Delay before a hidden item leaves layout.
    pub collapse_delay: Duration,
    /// Scale of a hidden item.
    pub hidden_scale: f64,
}

impl Default for FilterTiming {
    fn default() -> Self {
        Self {
            reveal_delay: Duration::from_millis(50),
            collapse_delay: Duration::from_millis(300),
            hidden_scale: 0.8,
        }
    }
}

/// Owns the current filter and applies it to the portfolio items.
#[derive(Clone, Debug)]
pub struct PortfolioFilter {
    buttons: Vec<ElementId>,
    items: Vec<ElementId>,
    current: Option<String>,
    timing: FilterTiming,
}

impl PortfolioFilter {
    /// Take over `buttons` and `items` and show every item.
    pub fn install(
        doc: &mut Document,
        scheduler: &mut Scheduler,
        buttons: Vec<ElementId>,
        items: Vec<ElementId>,
        timing: FilterTiming,
    ) -> Self {
        if buttons.is_empty() {
            debug!("no filter buttons found");
        }
        let filter = Self {
            buttons,
            items,
            current: Some(ALL.to_owned()),
            timing,
        };
        for &item in &filter.items {
            filter.show(item, doc, scheduler);
        }
        filter
    }

    /// The current filter value; `None` after activating a button without one.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Filter buttons, in document order.
    pub fn buttons(&self) -> &[ElementId] {
        &self.buttons
    }

    /// Portfolio items, in document order.
    pub fn items(&self) -> &[ElementId] {
        &self.items
    }

    /// Handle activation of `button`: move the active class to it and apply its filter.
    pub fn select_filter(
        &mut self,
        button: ElementId,
        doc: &mut Document,
        scheduler: &mut Scheduler,
    ) {
        for &b in &self.buttons {
            doc.remove_class(b, ACTIVE_CLASS);
        }
        doc.add_class(button, ACTIVE_CLASS);
        let value = doc.attribute(button, FILTER_ATTR).map(str::to_owned);
        self.apply(value.as_deref(), doc, scheduler);
    }

    /// Make `filter` current and show or hide every item accordingly.
    pub fn apply(
        &mut self,
        filter: Option<&str>,
        doc: &mut Document,
        scheduler: &mut Scheduler,
    ) {
        self.current = filter.map(str::to_owned);
        let mut shown = 0_usize;
        for &item in &self.items {
            if matches_filter(filter, doc.attribute(item, CATEGORY_ATTR)) {
                self.show(item, doc, scheduler);
                shown += 1;
            } else {
                self.hide(item, doc, scheduler);
            }
        }
        trace!(?filter, shown, total = self.items.len(), "applied portfolio filter");
    }

    fn show(&self, item: ElementId, doc: &mut Document, scheduler: &mut Scheduler) {
        doc.set_display(item, Display::Block);
        scheduler.schedule(self.timing.reveal_delay, move |doc| {
            doc.set_opacity(item, 1.0);
            doc.set_transform(item, Transform::Scale(1.0));
        });
    }

    fn hide(&self, item: ElementId, doc: &mut Document, scheduler: &mut Scheduler) {
        doc.set_opacity(item, 0.0);
        doc.set_transform(item, Transform::Scale(self.timing.hidden_scale));
        scheduler.schedule(self.timing.collapse_delay, move |doc| {
            doc.set_display(item, Display::None);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_dom::{ElementDesc, InlineStyle};

    struct Fixture {
        doc: Document,
        scheduler: Scheduler,
        buttons: Vec<ElementId>,
        items: Vec<ElementId>,
        filter: PortfolioFilter,
    }

    /// Buttons `all`, `web`, `app`; items web, app, web, design.
    fn fixture() -> Fixture {
        let mut doc = Document::new();
        let root = doc.root();
        let buttons: Vec<_> = ["all", "web", "app"]
            .into_iter()
            .map(|f| {
                doc.insert(
                    Some(root),
                    ElementDesc::new("button")
                        .class("portfolio-filter")
                        .attr(FILTER_ATTR, f),
                )
            })
            .collect();
        let items: Vec<_> = ["web", "app", "web", "design"]
            .into_iter()
            .map(|c| {
                doc.insert(
                    Some(root),
                    ElementDesc::new("div")
                        .class("portfolio-item")
                        .attr(CATEGORY_ATTR, c),
                )
            })
            .collect();
        let mut scheduler = Scheduler::new();
        let filter = PortfolioFilter::install(
            &mut doc,
            &mut scheduler,
            buttons.clone(),
            items.clone(),
            FilterTiming::default(),
        );
        Fixture {
            doc,
            scheduler,
            buttons,
            items,
            filter,
        }
    }

    fn visible() -> InlineStyle {
        InlineStyle {
            display: Some(Display::Block),
            opacity: Some(1.0),
            transform: Some(Transform::Scale(1.0)),
        }
    }

    fn hidden() -> InlineStyle {
        InlineStyle {
            display: Some(Display::None),
            opacity: Some(0.0),
            transform: Some(Transform::Scale(0.8)),
        }
    }

    #[test]
    fn install_shows_everything_in_two_phases() {
        let mut f = fixture();
        assert_eq!(f.filter.current(), Some(ALL));
        for &item in &f.items {
            let style = f.doc.style(item).unwrap();
            assert_eq!(style.display, Some(Display::Block));
            assert_eq!(style.opacity, None, "fade-in waits for the reveal delay");
        }
        f.scheduler.advance(Duration::from_millis(50), &mut f.doc);
        for &item in &f.items {
            assert_eq!(f.doc.style(item), Some(&visible()));
        }
    }

    #[test]
    fn selecting_a_category_hides_the_rest() {
        let mut f = fixture();
        f.scheduler.run_until_idle(&mut f.doc);
        f.filter.select_filter(f.buttons[1], &mut f.doc, &mut f.scheduler);
        assert_eq!(f.filter.current(), Some("web"));

        // Fade-out starts immediately, removal waits for the collapse delay.
        let app = f.doc.style(f.items[1]).unwrap();
        assert_eq!(app.opacity, Some(0.0));
        assert_eq!(app.transform, Some(Transform::Scale(0.8)));
        assert_eq!(app.display, Some(Display::Block));

        f.scheduler.advance(Duration::from_millis(299), &mut f.doc);
        assert_eq!(f.doc.style(f.items[1]).unwrap().display, Some(Display::Block));
        f.scheduler.advance(Duration::from_millis(1), &mut f.doc);

        let styles: Vec<_> = f.items.iter().map(|&i| f.doc.style(i).unwrap().clone()).collect();
        assert_eq!(styles, [visible(), hidden(), visible(), hidden()]);
    }

    #[test]
    fn active_class_moves_to_the_selected_button() {
        let mut f = fixture();
        f.doc.add_class(f.buttons[0], ACTIVE_CLASS);
        f.filter.select_filter(f.buttons[2], &mut f.doc, &mut f.scheduler);
        let active: Vec<_> = f
            .buttons
            .iter()
            .map(|&b| f.doc.has_class(b, ACTIVE_CLASS))
            .collect();
        assert_eq!(active, [false, false, true]);
    }

    #[test]
    fn all_restores_every_item() {
        let mut f = fixture();
        f.filter.select_filter(f.buttons[2], &mut f.doc, &mut f.scheduler);
        f.scheduler.run_until_idle(&mut f.doc);
        f.filter.select_filter(f.buttons[0], &mut f.doc, &mut f.scheduler);
        f.scheduler.run_until_idle(&mut f.doc);
        for &item in &f.items {
            assert_eq!(f.doc.style(item), Some(&visible()));
        }
    }

    #[test]
    fn same_filter_twice_is_idempotent() {
        let mut f = fixture();
        f.scheduler.run_until_idle(&mut f.doc);
        f.filter.apply(Some("app"), &mut f.doc, &mut f.scheduler);
        f.scheduler.run_until_idle(&mut f.doc);
        let once = f.doc.outer_html(f.doc.root());
        f.filter.apply(Some("app"), &mut f.doc, &mut f.scheduler);
        f.scheduler.run_until_idle(&mut f.doc);
        assert_eq!(f.doc.outer_html(f.doc.root()), once);
    }

    #[test]
    fn rapid_toggle_keeps_stale_collapse() {
        // Hide, then show again before the collapse lands: the stale
        // `display: none` still fires after the fade-in. Last write wins.
        let mut f = fixture();
        f.scheduler.run_until_idle(&mut f.doc);
        f.filter.apply(Some("web"), &mut f.doc, &mut f.scheduler);
        f.scheduler.advance(Duration::from_millis(100), &mut f.doc);
        f.filter.apply(Some(ALL), &mut f.doc, &mut f.scheduler);
        f.scheduler.advance(Duration::from_millis(50), &mut f.doc);
        assert_eq!(f.doc.style(f.items[1]), Some(&visible()));
        f.scheduler.run_until_idle(&mut f.doc);
        let app = f.doc.style(f.items[1]).unwrap();
        assert_eq!(app.display, Some(Display::None));
        assert_eq!(app.opacity, Some(1.0));
    }

    #[test]
    fn button_without_filter_value_selects_uncategorized_items() {
        let mut f = fixture();
        let bare = f.doc.insert(
            Some(f.doc.root()),
            ElementDesc::new("button").class("portfolio-filter"),
        );
        let loose = f.doc.insert(
            Some(f.doc.root()),
            ElementDesc::new("div").class("portfolio-item"),
        );
        let mut filter = PortfolioFilter::install(
            &mut f.doc,
            &mut f.scheduler,
            vec![bare],
            vec![f.items[0], loose],
            FilterTiming::default(),
        );
        f.scheduler.run_until_idle(&mut f.doc);
        filter.select_filter(bare, &mut f.doc, &mut f.scheduler);
        f.scheduler.run_until_idle(&mut f.doc);
        assert_eq!(filter.current(), None);
        assert_eq!(f.doc.style(loose), Some(&visible()));
        assert_eq!(f.doc.style(f.items[0]), Some(&hidden()));
    }

    #[test]
    fn filter_predicate() {
        assert!(matches_filter(Some(ALL), Some("web")));
        assert!(matches_filter(Some(ALL), None));
        assert!(matches_filter(Some("web"), Some("web")));
        assert!(!matches_filter(Some("web"), Some("app")));
        assert!(!matches_filter(Some("web"), None));
        assert!(matches_filter(None, None));
    }
}
