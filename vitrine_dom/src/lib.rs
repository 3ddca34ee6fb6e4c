// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vitrine DOM: a small DOM-like document model for headless page behaviours.
//!
//! - Represents a rooted element tree with tags, attributes, class lists and inline styles.
//! - Carries caller-supplied layout boxes and a scrollable viewport.
//! - Answers selector queries (a CSS subset, see [`selector`]) and point hit tests.
//!
//! ## Not a browser
//!
//! This crate does not parse HTML, cascade stylesheets, or perform layout.
//! Upstream code builds the tree and assigns each element a border box in document
//! coordinates; behaviour code then reads geometry and mutates classes and inline styles.
//! Think of it as the slice of the DOM that scripted UI enhancements touch.
//!
//! ## Example
//!
//! ```
//! use kurbo::{Point, Rect};
//! use vitrine_dom::{Document, ElementDesc, Selector};
//!
//! let mut doc = Document::new();
//! let root = doc.root();
//! doc.set_layout(root, Rect::new(0.0, 0.0, 1280.0, 3000.0));
//! let nav = doc.insert(Some(root), ElementDesc::new("nav").class("navbar"));
//! let about = doc.insert(
//!     Some(root),
//!     ElementDesc::new("section")
//!         .id("about")
//!         .layout(Rect::new(0.0, 800.0, 1280.0, 1600.0)),
//! );
//!
//! let navbar = Selector::parse(".navbar").unwrap();
//! assert_eq!(doc.query_selector(&navbar), Some(nav));
//!
//! doc.set_scroll_y(300.0);
//! assert_eq!(doc.bounding_client_rect(about).unwrap().y0, 500.0);
//!
//! let hit = doc.hit_test_point(Point::new(10.0, 900.0)).unwrap();
//! assert_eq!(hit.element, about);
//! assert_eq!(hit.path, vec![root, about]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod document;
pub mod selector;
pub mod style;
mod types;

pub use document::{Document, Hit};
pub use selector::{Selector, SelectorError};
pub use style::{Display, InlineStyle, Transform};
pub use types::{ElementDesc, ElementId};
