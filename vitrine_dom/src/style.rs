// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inline style state: the `display`, `opacity` and `transform` properties.

use alloc::string::String;
use core::fmt::{self, Write as _};
use kurbo::Affine;

/// Value of the `display` property.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Display {
    /// `display: block`.
    Block,
    /// `display: none`; the element and its subtree leave layout and hit testing.
    None,
}

impl Display {
    /// CSS keyword for this value.
    pub const fn as_css(self) -> &'static str {
        match self {
            Self::Block => "block",
            Self::None => "none",
        }
    }
}

/// Value of the `transform` property.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Transform {
    /// Uniform `scale(s)`.
    Scale(f64),
    /// Vertical `translateY(dy)` in CSS pixels.
    TranslateY(f64),
}

impl Transform {
    /// The equivalent affine transform.
    pub fn to_affine(self) -> Affine {
        match self {
            Self::Scale(s) => Affine::scale(s),
            Self::TranslateY(dy) => Affine::translate((0.0, dy)),
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scale(s) => write!(f, "scale({s})"),
            Self::TranslateY(dy) => write!(f, "translateY({dy}px)"),
        }
    }
}

/// Inline style of an element. Every property starts unset.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InlineStyle {
    /// `display`, if set.
    pub display: Option<Display>,
    /// `opacity`, if set.
    pub opacity: Option<f64>,
    /// `transform`, if set.
    pub transform: Option<Transform>,
}

impl InlineStyle {
    /// True when no property is set.
    pub fn is_empty(&self) -> bool {
        self.display.is_none() && self.opacity.is_none() && self.transform.is_none()
    }

    /// Serialize as a `style` attribute value, e.g. `display: block; opacity: 1`.
    pub fn to_css_text(&self) -> String {
        let mut out = String::new();
        let mut sep = "";
        if let Some(display) = self.display {
            let _ = write!(out, "{sep}display: {}", display.as_css());
            sep = "; ";
        }
        if let Some(opacity) = self.opacity {
            let _ = write!(out, "{sep}opacity: {opacity}");
            sep = "; ";
        }
        if let Some(transform) = self.transform {
            let _ = write!(out, "{sep}transform: {transform}");
        }
        out
    }
}
