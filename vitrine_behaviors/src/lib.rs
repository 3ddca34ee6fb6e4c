// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vitrine Behaviors: the interactive layer of a single-page portfolio.
//!
//! ## Overview
//!
//! Five independent behaviours run over a [`vitrine_dom::Document`]:
//!
//! - [`ScrollObserver`](scroll_observer::ScrollObserver) makes the navbar sticky past a
//!   scroll threshold and marks the nav link of the section in view.
//! - [`PortfolioFilter`](filter::PortfolioFilter) shows and hides portfolio items by
//!   category with two-phase transitions.
//! - [`SmoothScroller`](smooth_scroll::SmoothScroller) turns same-page anchor clicks into
//!   smooth scroll requests that clear the fixed header.
//! - [`HoverOverlay`](overlay::HoverOverlay) reveals an item's overlay while it is hovered.
//! - [`inject_social_links`](social::inject_social_links) appends the profile links to the
//!   contact section.
//!
//! [`Page`](page::Page) installs all of them from a [`PageConfig`](config::PageConfig) and
//! dispatches input to them.
//!
//! ## Time and scrolling
//!
//! Deferred transitions run on a virtual clock ([`timer::Scheduler`]) that the embedder
//! advances. Animated scrolling is delegated to a [`ScrollHost`](host::ScrollHost).
//!
//! ## Failure
//!
//! Configuration is validated up front and reported as a [`ConfigError`](error::ConfigError).
//! At runtime nothing fails: behaviours whose elements are missing do nothing and say so
//! through `tracing` at debug level.
//!
//! ## Example
//!
//! ```
//! use kurbo::Rect;
//! use vitrine_behaviors::config::PageConfig;
//! use vitrine_behaviors::host::RecordingHost;
//! use vitrine_behaviors::page::Page;
//! use vitrine_dom::{Document, ElementDesc};
//!
//! let mut doc = Document::new();
//! let root = doc.root();
//! doc.set_layout(root, Rect::new(0.0, 0.0, 1280.0, 3000.0));
//! let nav = doc.insert(Some(root), ElementDesc::new("nav").class("navbar"));
//! let link = doc.insert(Some(nav), ElementDesc::new("a").class("nav-link").attr("href", "#about"));
//! doc.insert(
//!     Some(root),
//!     ElementDesc::new("section")
//!         .id("about")
//!         .layout(Rect::new(0.0, 1000.0, 1280.0, 2000.0)),
//! );
//!
//! let mut page = Page::install(doc, &PageConfig::default(), RecordingHost::new()).unwrap();
//! page.scroll_to(1200.0);
//! assert!(page.document().has_class(nav, "sticky"));
//! assert!(page.document().has_class(link, "active"));
//!
//! let summary = page.click(link);
//! assert!(summary.default_prevented);
//! assert_eq!(page.host().last().unwrap().top, 920.0);
//! ```

pub mod config;
pub mod error;
pub mod filter;
pub mod host;
pub mod hover;
pub mod overlay;
pub mod page;
pub mod router;
pub mod scroll_observer;
pub mod smooth_scroll;
pub mod social;
pub mod timer;
pub mod types;

pub use config::{Features, PageConfig};
pub use error::ConfigError;
pub use page::{DispatchSummary, Page};
