// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page configuration: thresholds, timings, selectors, feature switches and social links.
//!
//! Every field has a default matching the stock portfolio page, so a config
//! file only needs the values it changes:
//!
//! ```
//! use vitrine_behaviors::config::{Features, PageConfig};
//!
//! let config = PageConfig::from_json(r#"{
//!     "header_offset": 64,
//!     "features": "STICKY_NAV | SMOOTH_SCROLL"
//! }"#).unwrap();
//! assert_eq!(config.header_offset, 64.0);
//! assert_eq!(config.sticky_threshold, 20.0);
//! assert!(!config.features.contains(Features::PORTFOLIO_FILTER));
//! ```
//!
//! ## Timing coupling
//!
//! `collapse_delay_ms` must be at least the stylesheet's opacity/transform
//! transition duration, otherwise hidden items leave layout before their fade
//! finishes. The stylesheet is outside this crate, so the coupling is not checked.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use vitrine_dom::Selector;

use crate::error::ConfigError;
use crate::social::{SocialLink, default_social_links};

bitflags::bitflags! {
    /// Behaviours a page installs.
    ///
    /// In JSON this is written as flag names joined by `|`.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Features: u8 {
        /// Toggle the navbar's `sticky` class on scroll.
        const STICKY_NAV       = 0b0000_0001;
        /// Mark the nav link of the visible section `active` on scroll.
        const ACTIVE_SECTION   = 0b0000_0010;
        /// Category filter buttons over the portfolio grid.
        const PORTFOLIO_FILTER = 0b0000_0100;
        /// Animated scrolling for in-page anchors.
        const SMOOTH_SCROLL    = 0b0000_1000;
        /// Overlay reveal on portfolio item hover.
        const HOVER_OVERLAY    = 0b0001_0000;
        /// Append social icon links to the contact section.
        const SOCIAL_LINKS     = 0b0010_0000;
    }
}

impl Default for Features {
    fn default() -> Self {
        Self::all()
    }
}

/// Selector text for every element the page behaviours touch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SelectorConfig {
    /// The navigation bar.
    pub navbar: String,
    /// Category filter buttons.
    pub filter_buttons: String,
    /// Portfolio grid items.
    pub portfolio_items: String,
    /// Sections tracked for active-link highlighting.
    pub sections: String,
    /// Navigation links; `[href*="<section id>"]` is appended per section.
    pub nav_link: String,
    /// Anchors that get smooth scrolling.
    pub anchors: String,
    /// Overlay inside a portfolio item.
    pub item_overlay: String,
    /// Heading inside an overlay.
    pub overlay_heading: String,
    /// List that receives the social links.
    pub social_container: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            navbar: ".navbar".into(),
            filter_buttons: ".portfolio-filter".into(),
            portfolio_items: ".portfolio-item".into(),
            sections: "section[id]".into(),
            nav_link: ".nav-link".into(),
            anchors: "a[href^=\"#\"]".into(),
            item_overlay: ".item-overlay".into(),
            overlay_heading: "h4".into(),
            social_container: ".contact-social .header-social".into(),
        }
    }
}

/// Parsed form of [`SelectorConfig`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageSelectors {
    /// See [`SelectorConfig::navbar`].
    pub navbar: Selector,
    /// See [`SelectorConfig::filter_buttons`].
    pub filter_buttons: Selector,
    /// See [`SelectorConfig::portfolio_items`].
    pub portfolio_items: Selector,
    /// See [`SelectorConfig::sections`].
    pub sections: Selector,
    /// See [`SelectorConfig::nav_link`].
    pub nav_link: Selector,
    /// See [`SelectorConfig::anchors`].
    pub anchors: Selector,
    /// See [`SelectorConfig::item_overlay`].
    pub item_overlay: Selector,
    /// See [`SelectorConfig::overlay_heading`].
    pub overlay_heading: Selector,
    /// See [`SelectorConfig::social_container`].
    pub social_container: Selector,
}

impl PageSelectors {
    /// Selector for the nav link pointing at section `id`: `<nav_link>[href*="<id>"]`.
    pub fn link_for_section(&self, id: &str) -> Selector {
        self.nav_link.with_attr_contains("href", id)
    }
}

fn compile(field: &'static str, text: &str) -> Result<Selector, ConfigError> {
    Selector::parse(text).map_err(|source| ConfigError::Selector {
        field,
        selector: text.to_owned(),
        source,
    })
}

impl SelectorConfig {
    /// Parse every selector, reporting the first one that fails.
    pub fn compile(&self) -> Result<PageSelectors, ConfigError> {
        Ok(PageSelectors {
            navbar: compile("navbar", &self.navbar)?,
            filter_buttons: compile("filter_buttons", &self.filter_buttons)?,
            portfolio_items: compile("portfolio_items", &self.portfolio_items)?,
            sections: compile("sections", &self.sections)?,
            nav_link: compile("nav_link", &self.nav_link)?,
            anchors: compile("anchors", &self.anchors)?,
            item_overlay: compile("item_overlay", &self.item_overlay)?,
            overlay_heading: compile("overlay_heading", &self.overlay_heading)?,
            social_container: compile("social_container", &self.social_container)?,
        })
    }
}

/// Everything [`Page::install`](crate::page::Page::install) needs to know.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
    /// The navbar is sticky while the scroll offset exceeds this many pixels.
    pub sticky_threshold: f64,
    /// Sections count as entered this many pixels before their top edge.
    pub section_offset: f64,
    /// Height of the fixed header; anchor targets land this far below the viewport top.
    pub header_offset: f64,
    /// Delay between `display: block` and the fade-in of a shown item.
    pub reveal_delay_ms: u64,
    /// Delay between the fade-out of a hidden item and `display: none`.
    pub collapse_delay_ms: u64,
    /// Scale applied to hidden items while they fade out.
    pub hidden_scale: f64,
    /// Vertical offset of an overlay heading while the overlay is hidden.
    pub heading_hidden_offset: f64,
    /// Behaviours to install.
    pub features: Features,
    /// Element selectors.
    pub selectors: SelectorConfig,
    /// Links appended to the contact section, in order.
    pub social_links: Vec<SocialLink>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            sticky_threshold: 20.0,
            section_offset: 50.0,
            header_offset: 80.0,
            reveal_delay_ms: 50,
            collapse_delay_ms: 300,
            hidden_scale: 0.8,
            heading_hidden_offset: 20.0,
            features: Features::default(),
            selectors: SelectorConfig::default(),
            social_links: default_social_links(),
        }
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            reason: format!("{value} is not a finite number"),
        })
    }
}

impl PageConfig {
    /// Parse and validate a JSON configuration. Missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check numeric ranges and selector syntax.
    pub fn validate(&self) -> Result<(), ConfigError> {
        finite("sticky_threshold", self.sticky_threshold)?;
        finite("section_offset", self.section_offset)?;
        finite("header_offset", self.header_offset)?;
        finite("heading_hidden_offset", self.heading_hidden_offset)?;
        if !(0.0..=1.0).contains(&self.hidden_scale) {
            return Err(ConfigError::InvalidValue {
                field: "hidden_scale",
                reason: format!("{} is outside [0, 1]", self.hidden_scale),
            });
        }
        self.selectors.compile().map(drop)
    }

    /// [`PageConfig::reveal_delay_ms`] as a duration.
    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }

    /// [`PageConfig::collapse_delay_ms`] as a duration.
    pub fn collapse_delay(&self) -> Duration {
        Duration::from_millis(self.collapse_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid_and_match_the_stock_page() {
        let config = PageConfig::default();
        config.validate().unwrap();
        assert_eq!(config.reveal_delay(), Duration::from_millis(50));
        assert_eq!(config.collapse_delay(), Duration::from_millis(300));
        assert_eq!(config.features, Features::all());
        assert_eq!(config.social_links.len(), 4);
        assert_eq!(config.social_links[3].platform, "LinkedIn");
    }

    #[test]
    fn empty_json_is_the_default() {
        assert_eq!(PageConfig::from_json("{}").unwrap(), PageConfig::default());
    }

    #[test]
    fn partial_selectors_keep_other_defaults() {
        let config =
            PageConfig::from_json(r#"{ "selectors": { "navbar": "header.top" } }"#).unwrap();
        assert_eq!(config.selectors.navbar, "header.top");
        assert_eq!(config.selectors.filter_buttons, ".portfolio-filter");
    }

    #[test]
    fn features_round_trip_as_flag_names() {
        let config = PageConfig {
            features: Features::STICKY_NAV | Features::HOVER_OVERLAY,
            ..PageConfig::default()
        };
        let text = serde_json::to_string(&config).unwrap();
        assert!(text.contains("\"STICKY_NAV | HOVER_OVERLAY\""), "{text}");
        assert_eq!(PageConfig::from_json(&text).unwrap(), config);
    }

    #[test]
    fn rejects_unknown_fields_and_bad_values() {
        assert!(matches!(
            PageConfig::from_json(r#"{ "sticky": 3 }"#),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            PageConfig::from_json(r#"{ "hidden_scale": 1.5 }"#),
            Err(ConfigError::InvalidValue {
                field: "hidden_scale",
                ..
            })
        ));
        let err = PageConfig::from_json(r#"{ "selectors": { "anchors": "a[href" } }"#)
            .unwrap_err();
        assert!(
            matches!(err, ConfigError::Selector { field: "anchors", .. }),
            "{err}"
        );
    }

    #[test]
    fn non_finite_numbers_are_rejected() {
        let config = PageConfig {
            header_offset: f64::INFINITY,
            ..PageConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue {
                field: "header_offset",
                ..
            })
        ));
    }

    #[test]
    fn nav_link_selector_per_section() {
        let selectors = SelectorConfig::default().compile().unwrap();
        let sel = selectors.link_for_section("about");
        assert_eq!(sel.as_str(), ".nav-link[href*=\"about\"]");
        assert_eq!(
            selectors.link_for_section(r#"we"ird"#).as_str(),
            r#".nav-link[href*="we\"ird"]"#
        );
    }
}
