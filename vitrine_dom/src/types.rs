// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the document: element identifiers and element descriptions.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use kurbo::Rect;

/// Identifier for an element in a [`Document`](crate::Document).
///
/// A small, copyable handle. Elements are never removed from a document, so an
/// `ElementId` handed out by a document stays valid for that document's lifetime.
/// Using an id with a different document is not detected; lookups either miss or
/// refer to an unrelated element.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub(crate) u32);

impl ElementId {
    pub(crate) const fn new(idx: u32) -> Self {
        Self(idx)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Description of an element to insert.
///
/// Built with chained setters and passed to [`Document::insert`](crate::Document::insert).
///
/// ```
/// use kurbo::Rect;
/// use vitrine_dom::ElementDesc;
///
/// let desc = ElementDesc::new("section")
///     .id("about")
///     .class("page-section dark")
///     .layout(Rect::new(0.0, 600.0, 1280.0, 1400.0));
/// assert_eq!(desc.classes, ["page-section", "dark"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ElementDesc {
    /// Lowercase tag name.
    pub tag: String,
    /// Class list, in insertion order, without duplicates.
    pub classes: Vec<String>,
    /// Attributes other than `class`, in insertion order. `id` lives here too.
    pub attributes: Vec<(String, String)>,
    /// Border box in document coordinates (`y0` is the offset top).
    pub layout: Rect,
}

impl ElementDesc {
    /// Start describing an element with the given tag.
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    /// Set the `id` attribute.
    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    /// Add one or more whitespace-separated classes.
    pub fn class(mut self, classes: &str) -> Self {
        for class in classes.split_whitespace() {
            if !self.classes.iter().any(|c| c == class) {
                self.classes.push(class.to_string());
            }
        }
        self
    }

    /// Set an attribute, replacing an earlier value of the same name.
    ///
    /// `class` is routed to [`ElementDesc::class`].
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        if name.eq_ignore_ascii_case("class") {
            self.classes.clear();
            return self.class(value);
        }
        let name = name.to_ascii_lowercase();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.attributes.push((name, value.to_string())),
        }
        self
    }

    /// Set the layout box in document coordinates.
    pub fn layout(mut self, layout: Rect) -> Self {
        self.layout = layout;
        self
    }
}
