// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The page: installs every behaviour over a document and dispatches events to them.
//!
//! ## Installation
//!
//! [`Page::install`] runs once, when the document is ready. It looks up the
//! elements each behaviour needs, registers listeners in an explicit table and
//! performs the one-off work (showing every portfolio item, appending the social
//! links). Behaviours whose elements are missing install as no-ops.
//!
//! ## Dispatch
//!
//! Each input method ([`Page::scroll_to`], [`Page::click`], [`Page::pointer_move`],
//! ...) turns into one or more events. Window events run the window listeners in
//! registration order. Element events are routed with the [`Router`]; listeners
//! run on the target and, for bubbling events, on each ancestor up to the root.
//! The currently dispatching element (`currentTarget` in DOM terms) is what a
//! listener receives.

use std::time::Duration;

use kurbo::{Point, Vec2};
use tracing::{debug, trace};
use vitrine_dom::{Document, ElementId};

use crate::config::{Features, PageConfig};
use crate::error::ConfigError;
use crate::filter::{FilterTiming, PortfolioFilter};
use crate::host::ScrollHost;
use crate::hover::{HoverEvent, HoverState};
use crate::overlay::HoverOverlay;
use crate::router::Router;
use crate::scroll_observer::ScrollObserver;
use crate::smooth_scroll::SmoothScroller;
use crate::social::inject_social_links;
use crate::timer::Scheduler;
use crate::types::{EventKind, Outcome, Phase};

/// Where a listener is attached.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ListenerTarget {
    /// The window (scroll events).
    Window,
    /// A single element.
    Element(ElementId),
}

/// The behaviour a listener invokes.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Handler {
    /// [`ScrollObserver::update_navbar`].
    StickyNav,
    /// [`ScrollObserver::highlight_active_section`].
    ActiveSection,
    /// [`PortfolioFilter::select_filter`].
    SelectFilter,
    /// [`SmoothScroller::on_click`].
    SmoothScroll,
    /// [`HoverOverlay::pointer_enter`].
    OverlayEnter,
    /// [`HoverOverlay::pointer_leave`].
    OverlayLeave,
}

/// One row of the listener table.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Registration {
    /// Event the listener waits for.
    pub kind: EventKind,
    /// Where it is attached.
    pub target: ListenerTarget,
    /// What it does.
    pub handler: Handler,
}

/// What happened while dispatching one event.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct DispatchSummary {
    /// Number of listeners that ran.
    pub listeners: usize,
    /// True if a listener suppressed the default action.
    pub default_prevented: bool,
}

/// A document with the portfolio behaviours installed.
pub struct Page<H: ScrollHost> {
    document: Document,
    scheduler: Scheduler,
    host: H,
    registrations: Vec<Registration>,
    scroll_observer: Option<ScrollObserver>,
    filter: Option<PortfolioFilter>,
    smooth_scroller: Option<SmoothScroller>,
    overlay: Option<HoverOverlay>,
    hover: HoverState<ElementId>,
    social_links_added: usize,
}

impl<H: ScrollHost> core::fmt::Debug for Page<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Page")
            .field("document", &self.document)
            .field("scheduler", &self.scheduler)
            .field("registrations", &self.registrations.len())
            .field("hovered", &self.hover.current_path())
            .finish_non_exhaustive()
    }
}

impl<H: ScrollHost> Page<H> {
    /// Validate `config`, then install the enabled behaviours over `document`.
    ///
    /// Order: scroll listeners, filter (shows every item), smooth-scroll anchors,
    /// hover overlays, social links. Anchors are collected before the social
    /// links are appended.
    pub fn install(document: Document, config: &PageConfig, host: H) -> Result<Self, ConfigError> {
        config.validate()?;
        let selectors = config.selectors.compile()?;
        let features = config.features;
        let mut page = Self {
            document,
            scheduler: Scheduler::new(),
            host,
            registrations: Vec::new(),
            scroll_observer: None,
            filter: None,
            smooth_scroller: None,
            overlay: None,
            hover: HoverState::new(),
            social_links_added: 0,
        };

        if features.intersects(Features::STICKY_NAV | Features::ACTIVE_SECTION) {
            page.scroll_observer = Some(ScrollObserver::install(
                &page.document,
                &selectors,
                config.sticky_threshold,
                config.section_offset,
            ));
            if features.contains(Features::STICKY_NAV) {
                page.listen(EventKind::Scroll, ListenerTarget::Window, Handler::StickyNav);
            }
            if features.contains(Features::ACTIVE_SECTION) {
                page.listen(EventKind::Scroll, ListenerTarget::Window, Handler::ActiveSection);
            }
        }

        let items = page.document.query_selector_all(&selectors.portfolio_items);

        if features.contains(Features::PORTFOLIO_FILTER) {
            let buttons = page.document.query_selector_all(&selectors.filter_buttons);
            for &button in &buttons {
                page.listen(
                    EventKind::Click,
                    ListenerTarget::Element(button),
                    Handler::SelectFilter,
                );
            }
            let timing = FilterTiming {
                reveal_delay: config.reveal_delay(),
                collapse_delay: config.collapse_delay(),
                hidden_scale: config.hidden_scale,
            };
            page.filter = Some(PortfolioFilter::install(
                &mut page.document,
                &mut page.scheduler,
                buttons,
                items.clone(),
                timing,
            ));
        }

        if features.contains(Features::SMOOTH_SCROLL) {
            let anchors = page.document.query_selector_all(&selectors.anchors);
            for &anchor in &anchors {
                page.listen(
                    EventKind::Click,
                    ListenerTarget::Element(anchor),
                    Handler::SmoothScroll,
                );
            }
            page.smooth_scroller = Some(SmoothScroller::new(anchors, config.header_offset));
        }

        if features.contains(Features::HOVER_OVERLAY) {
            for &item in &items {
                page.listen(
                    EventKind::PointerEnter,
                    ListenerTarget::Element(item),
                    Handler::OverlayEnter,
                );
                page.listen(
                    EventKind::PointerLeave,
                    ListenerTarget::Element(item),
                    Handler::OverlayLeave,
                );
            }
            page.overlay = Some(HoverOverlay::new(
                items,
                selectors.item_overlay.clone(),
                selectors.overlay_heading.clone(),
                config.heading_hidden_offset,
            ));
        }

        if features.contains(Features::SOCIAL_LINKS) {
            let container = page.document.query_selector(&selectors.social_container);
            page.social_links_added =
                inject_social_links(&mut page.document, container, &config.social_links);
        }

        debug!(
            listeners = page.registrations.len(),
            social_links = page.social_links_added,
            "page behaviours installed"
        );
        Ok(page)
    }

    fn listen(&mut self, kind: EventKind, target: ListenerTarget, handler: Handler) {
        self.registrations.push(Registration {
            kind,
            target,
            handler,
        });
    }

    /// The document, as mutated by the behaviours so far.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Mutable access to the document, e.g. to update layout after a resize.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// The scroll host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the scroll host.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Pending deferred work.
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// The listener table, in registration order.
    pub fn registrations(&self) -> &[Registration] {
        &self.registrations
    }

    /// The portfolio filter, if installed.
    pub fn filter(&self) -> Option<&PortfolioFilter> {
        self.filter.as_ref()
    }

    /// The scroll observer, if installed.
    pub fn scroll_observer(&self) -> Option<&ScrollObserver> {
        self.scroll_observer.as_ref()
    }

    /// The smooth scroller, if installed.
    pub fn smooth_scroller(&self) -> Option<&SmoothScroller> {
        self.smooth_scroller.as_ref()
    }

    /// Number of social links appended at install.
    pub fn social_links_added(&self) -> usize {
        self.social_links_added
    }

    /// Hovered root→target path.
    pub fn hovered_path(&self) -> &[ElementId] {
        self.hover.current_path()
    }

    // --- input ------------------------------------------------------------

    /// Scroll the viewport to `y` (clamped) and fire a scroll event.
    pub fn scroll_to(&mut self, y: f64) -> DispatchSummary {
        self.document.set_scroll_y(y);
        self.dispatch_window(EventKind::Scroll)
    }

    /// Fire a window event without changing any state first.
    pub fn dispatch_window(&mut self, kind: EventKind) -> DispatchSummary {
        let handlers: Vec<Handler> = self
            .registrations
            .iter()
            .filter(|r| r.kind == kind && r.target == ListenerTarget::Window)
            .map(|r| r.handler)
            .collect();
        let mut summary = DispatchSummary::default();
        for handler in handlers {
            self.run(handler, None, &mut summary);
        }
        summary
    }

    /// Fire `kind` at `target`, propagating as the event kind dictates.
    pub fn dispatch(&mut self, kind: EventKind, target: ElementId) -> DispatchSummary {
        let seq = Router::with_parent(&self.document).route(target);
        let mut summary = DispatchSummary::default();
        for step in seq {
            let runs = match step.phase {
                Phase::Capture => false,
                Phase::Target => true,
                Phase::Bubble => kind.bubbles(),
            };
            if !runs {
                continue;
            }
            let handlers: Vec<Handler> = self
                .registrations
                .iter()
                .filter(|r| r.kind == kind && r.target == ListenerTarget::Element(step.node))
                .map(|r| r.handler)
                .collect();
            for handler in handlers {
                self.run(handler, Some(step.node), &mut summary);
            }
        }
        summary
    }

    /// Click `target`.
    pub fn click(&mut self, target: ElementId) -> DispatchSummary {
        self.dispatch(EventKind::Click, target)
    }

    /// The pointer entered `target`.
    pub fn pointer_enter(&mut self, target: ElementId) -> DispatchSummary {
        self.dispatch(EventKind::PointerEnter, target)
    }

    /// The pointer left `target`.
    pub fn pointer_leave(&mut self, target: ElementId) -> DispatchSummary {
        self.dispatch(EventKind::PointerLeave, target)
    }

    /// Move the pointer to `client` (viewport coordinates).
    ///
    /// Hit tests the document, then delivers pointer-leave to every element the
    /// pointer left (innermost first) and pointer-enter to every element it
    /// entered (outermost first).
    pub fn pointer_move(&mut self, client: Point) -> Vec<HoverEvent<ElementId>> {
        let pt = client + Vec2::new(0.0, self.document.scroll_y());
        let path = self
            .document
            .hit_test_point(pt)
            .map(|hit| hit.path)
            .unwrap_or_default();
        let transitions = self.hover.update_path(&path);
        self.deliver_hover(&transitions);
        transitions
    }

    /// The pointer left the document entirely.
    pub fn pointer_exit(&mut self) -> Vec<HoverEvent<ElementId>> {
        let transitions = self.hover.clear();
        self.deliver_hover(&transitions);
        transitions
    }

    fn deliver_hover(&mut self, transitions: &[HoverEvent<ElementId>]) {
        for t in transitions {
            match *t {
                HoverEvent::Enter(el) => self.pointer_enter(el),
                HoverEvent::Leave(el) => self.pointer_leave(el),
            };
        }
    }

    /// Advance virtual time, running deferred transitions that fall due.
    pub fn advance_time(&mut self, by: Duration) -> usize {
        self.scheduler.advance(by, &mut self.document)
    }

    /// Run every pending deferred transition.
    pub fn settle(&mut self) -> usize {
        self.scheduler.run_until_idle(&mut self.document)
    }

    fn run(&mut self, handler: Handler, current: Option<ElementId>, summary: &mut DispatchSummary) {
        trace!(?handler, ?current, "running listener");
        let outcome = match (handler, current) {
            (Handler::StickyNav, _) => {
                if let Some(observer) = &self.scroll_observer {
                    observer.update_navbar(&mut self.document);
                }
                Outcome::Continue
            }
            (Handler::ActiveSection, _) => {
                if let Some(observer) = &self.scroll_observer {
                    observer.highlight_active_section(&mut self.document);
                }
                Outcome::Continue
            }
            (Handler::SelectFilter, Some(button)) => {
                if let Some(filter) = &mut self.filter {
                    filter.select_filter(button, &mut self.document, &mut self.scheduler);
                }
                Outcome::Continue
            }
            (Handler::SmoothScroll, Some(anchor)) => match &self.smooth_scroller {
                Some(scroller) => scroller.on_click(anchor, &self.document, &mut self.host),
                None => Outcome::Continue,
            },
            (Handler::OverlayEnter, Some(item)) => {
                if let Some(overlay) = &self.overlay {
                    overlay.pointer_enter(item, &mut self.document);
                }
                Outcome::Continue
            }
            (Handler::OverlayLeave, Some(item)) => {
                if let Some(overlay) = &self.overlay {
                    overlay.pointer_leave(item, &mut self.document);
                }
                Outcome::Continue
            }
            // Element handlers registered on the window have nothing to act on.
            (_, None) => Outcome::Continue,
        };
        summary.listeners += 1;
        summary.default_prevented |= outcome == Outcome::PreventDefault;
    }
}
