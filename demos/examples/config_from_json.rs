// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Loading a page configuration from JSON.
//!
//! Shows partial configs picking up defaults, feature flag syntax, and the
//! errors reported for bad values and bad selectors.
//!
//! Run:
//! - `cargo run -p vitrine_demos --example config_from_json`

use vitrine_behaviors::config::{Features, PageConfig};

fn main() {
    let partial = r##"{
        "header_offset": 64,
        "features": "STICKY_NAV | SMOOTH_SCROLL",
        "selectors": { "navbar": "#top-nav" }
    }"##;
    match PageConfig::from_json(partial) {
        Ok(config) => {
            println!("== Partial ==");
            println!("  header_offset = {}", config.header_offset);
            println!("  features      = {:?}", config.features);
            println!("  navbar        = {}", config.selectors.navbar);
            println!("  social links  = {}", config.social_links.len());
            assert_eq!(config.features, Features::STICKY_NAV | Features::SMOOTH_SCROLL);
            assert_eq!(config.sticky_threshold, 20.0);
        }
        Err(err) => println!("unexpected error: {err}"),
    }

    println!("== Rejected ==");
    for bad in [
        r#"{ "hidden_scale": 1.5 }"#,
        r#"{ "selectors": { "anchors": "a[href^=" } }"#,
        r#"{ "sticky_treshold": 10 }"#,
    ] {
        match PageConfig::from_json(bad) {
            Ok(_) => println!("  accepted {bad}"),
            Err(err) => println!("  {bad}\n    -> {err}"),
        }
    }
}
