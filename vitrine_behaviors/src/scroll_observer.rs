// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll-driven navbar state: the sticky class and the active section link.
//!
//! ## Section windows
//!
//! A section with offset top `t` and height `h` owns the half-open scroll range
//! `(t - offset, t - offset + h]`. Adjacent sections laid out back to back have
//! disjoint windows, so at most one nav link is active for any scroll offset.
//! When windows do overlap, every section whose window holds the offset marks its
//! link active.

use tracing::{debug, trace};
use vitrine_dom::{Document, ElementId, Selector};

use crate::config::PageSelectors;

/// Class toggled on the navbar.
pub const STICKY_CLASS: &str = "sticky";
/// Class toggled on nav links.
pub const ACTIVE_CLASS: &str = "active";

/// Returns true when a navbar should be sticky at scroll offset `scroll_y`.
pub fn is_sticky(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

/// Scroll range in which a section's nav link is active.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SectionWindow {
    /// Exclusive lower bound.
    pub top: f64,
    /// Inclusive upper bound.
    pub bottom: f64,
}

impl SectionWindow {
    /// Window for a section at `offset_top` with `height`, entered `offset` pixels early.
    pub fn new(offset_top: f64, height: f64, offset: f64) -> Self {
        let top = offset_top - offset;
        Self {
            top,
            bottom: top + height,
        }
    }

    /// True if `scroll_y` falls inside the window.
    pub fn contains(&self, scroll_y: f64) -> bool {
        self.top < scroll_y && scroll_y <= self.bottom
    }
}

#[derive(Clone, Debug)]
struct TrackedSection {
    section: ElementId,
    link: Option<Selector>,
}

/// Reacts to scroll events by updating navbar and nav link classes.
///
/// Sections are collected once at install. Their nav links are looked up again on
/// every scroll, so links added or re-targeted later are still picked up.
#[derive(Clone, Debug)]
pub struct ScrollObserver {
    navbar: Option<ElementId>,
    sections: Vec<TrackedSection>,
    sticky_threshold: f64,
    section_offset: f64,
}

impl ScrollObserver {
    /// Collect the navbar and the tracked sections from `doc`.
    pub fn install(
        doc: &Document,
        selectors: &PageSelectors,
        sticky_threshold: f64,
        section_offset: f64,
    ) -> Self {
        let navbar = doc.query_selector(&selectors.navbar);
        if navbar.is_none() {
            debug!(selector = %selectors.navbar, "navbar not found; sticky state disabled");
        }
        let sections = doc
            .query_selector_all(&selectors.sections)
            .into_iter()
            .map(|section| TrackedSection {
                section,
                link: doc
                    .element_id(section)
                    .map(|id| selectors.link_for_section(id)),
            })
            .collect();
        Self {
            navbar,
            sections,
            sticky_threshold,
            section_offset,
        }
    }

    /// The navbar this observer toggles, if one was found.
    pub fn navbar(&self) -> Option<ElementId> {
        self.navbar
    }

    /// Tracked sections in document order.
    pub fn sections(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.sections.iter().map(|s| s.section)
    }

    /// Set the navbar's sticky class from the current scroll offset.
    pub fn update_navbar(&self, doc: &mut Document) {
        if let Some(navbar) = self.navbar {
            let sticky = is_sticky(doc.scroll_y(), self.sticky_threshold);
            doc.toggle_class(navbar, STICKY_CLASS, sticky);
        }
    }

    /// Mark the nav link of every section whose window holds the scroll offset.
    ///
    /// Sections without a matching link are skipped.
    pub fn highlight_active_section(&self, doc: &mut Document) {
        let scroll_y = doc.scroll_y();
        for tracked in &self.sections {
            let Some(link) = tracked.link.as_ref().and_then(|sel| doc.query_selector(sel)) else {
                continue;
            };
            let (Some(top), Some(height)) = (
                doc.offset_top(tracked.section),
                doc.offset_height(tracked.section),
            ) else {
                continue;
            };
            let active = SectionWindow::new(top, height, self.section_offset).contains(scroll_y);
            doc.toggle_class(link, ACTIVE_CLASS, active);
        }
        trace!(scroll_y, "highlighted active section");
    }
}
