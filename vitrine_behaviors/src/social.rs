// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Social icon links appended to the contact section.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use vitrine_dom::{Document, ElementDesc, ElementId};

/// One social profile link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    /// Display name of the platform.
    pub platform: String,
    /// Icon class string, e.g. `fab fa-github`.
    pub icon: String,
    /// Profile URL.
    pub url: String,
}

impl SocialLink {
    /// Build a record from borrowed parts.
    pub fn new(platform: &str, icon: &str, url: &str) -> Self {
        Self {
            platform: platform.to_owned(),
            icon: icon.to_owned(),
            url: url.to_owned(),
        }
    }
}

/// The profile links shipped with the page.
pub fn default_social_links() -> Vec<SocialLink> {
    vec![
        SocialLink::new("GitHub", "fab fa-github", "https://github.com/s-k-d"),
        SocialLink::new(
            "Quora",
            "fab fa-quora",
            "https://www.quora.com/profile/SKD-86",
        ),
        SocialLink::new("Twitter", "fab fa-twitter", "https://x.com/SKD_real"),
        SocialLink::new(
            "LinkedIn",
            "fab fa-linkedin",
            "https://www.linkedin.com/in/shivanshdogra/",
        ),
    ]
}

/// Append one `<li><a href target="_blank"><i class></i></a></li>` per link to `container`.
///
/// Links are appended in slice order. Nothing happens when `container` is `None`.
/// Calling this twice duplicates the entries. Returns the number of items appended.
pub fn inject_social_links(
    doc: &mut Document,
    container: Option<ElementId>,
    links: &[SocialLink],
) -> usize {
    let Some(container) = container else {
        debug!("no social link container; skipping injection");
        return 0;
    };
    for link in links {
        let item = doc.insert(Some(container), ElementDesc::new("li"));
        let anchor = doc.insert(
            Some(item),
            ElementDesc::new("a")
                .attr("href", &link.url)
                .attr("target", "_blank"),
        );
        doc.insert(Some(anchor), ElementDesc::new("i").class(&link.icon));
        trace!(platform = %link.platform, url = %link.url, "appended social link");
    }
    links.len()
}
