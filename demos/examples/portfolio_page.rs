// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A scripted session over a small portfolio page.
//!
//! Builds the page, installs every behaviour, then scrolls, filters, hovers and
//! follows an anchor, printing what changed at each step.
//!
//! Run:
//! - `RUST_LOG=trace cargo run -p vitrine_demos --example portfolio_page`

use std::time::Duration;

use kurbo::{Point, Rect};
use tracing::info;
use tracing_subscriber::EnvFilter;
use vitrine_behaviors::config::PageConfig;
use vitrine_behaviors::host::RecordingHost;
use vitrine_behaviors::page::Page;
use vitrine_dom::{Document, ElementDesc, ElementId};

struct Landmarks {
    navbar: ElementId,
    links: Vec<ElementId>,
    buttons: Vec<ElementId>,
    items: Vec<ElementId>,
}

fn build() -> (Document, Landmarks) {
    let mut doc = Document::new();
    let root = doc.root();
    doc.set_layout(root, Rect::new(0.0, 0.0, 1280.0, 4400.0));

    let navbar = doc.insert(
        Some(root),
        ElementDesc::new("nav")
            .class("navbar")
            .layout(Rect::new(0.0, 0.0, 1280.0, 80.0)),
    );
    let sections = [
        ("home", 0.0, 900.0),
        ("about", 900.0, 1700.0),
        ("portfolio", 1700.0, 3000.0),
        ("contact", 3000.0, 4400.0),
    ];
    let mut links = Vec::new();
    let mut section_ids = Vec::new();
    for (id, top, bottom) in sections {
        links.push(doc.insert(
            Some(navbar),
            ElementDesc::new("a")
                .class("nav-link")
                .attr("href", &format!("#{id}")),
        ));
        section_ids.push(doc.insert(
            Some(root),
            ElementDesc::new("section")
                .id(id)
                .layout(Rect::new(0.0, top, 1280.0, bottom)),
        ));
    }

    let portfolio = section_ids[2];
    let buttons = ["all", "web", "app", "design"]
        .into_iter()
        .map(|f| {
            doc.insert(
                Some(portfolio),
                ElementDesc::new("button")
                    .class("portfolio-filter")
                    .attr("data-filter", f),
            )
        })
        .collect();
    let mut items = Vec::new();
    for (i, category) in ["web", "app", "design", "web"].into_iter().enumerate() {
        let x = 320.0 * i as f64;
        let rect = Rect::new(x, 1900.0, x + 320.0, 2200.0);
        let item = doc.insert(
            Some(portfolio),
            ElementDesc::new("div")
                .class("portfolio-item")
                .attr("data-category", category)
                .layout(rect),
        );
        let overlay = doc.insert(
            Some(item),
            ElementDesc::new("div").class("item-overlay").layout(rect),
        );
        doc.insert(Some(overlay), ElementDesc::new("h4"));
        items.push(item);
    }

    let social = doc.insert(
        Some(section_ids[3]),
        ElementDesc::new("div").class("contact-social"),
    );
    doc.insert(Some(social), ElementDesc::new("ul").class("header-social"));

    (
        doc,
        Landmarks {
            navbar,
            links,
            buttons,
            items,
        },
    )
}

fn active_link(page: &Page<RecordingHost>, marks: &Landmarks) -> Option<String> {
    marks
        .links
        .iter()
        .find(|&&l| page.document().has_class(l, "active"))
        .and_then(|&l| page.document().attribute(l, "href"))
        .map(str::to_owned)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let (doc, marks) = build();
    let mut page = match Page::install(doc, &PageConfig::default(), RecordingHost::new()) {
        Ok(page) => page,
        Err(err) => {
            eprintln!("invalid configuration: {err}");
            std::process::exit(1);
        }
    };
    page.settle();
    info!(listeners = page.registrations().len(), "page installed");

    info!("scrolling through the sections");
    for y in [0.0, 40.0, 1000.0, 2000.0, 3500.0] {
        page.scroll_to(y);
        println!(
            "  y={:>6.0} sticky={} active={:?}",
            page.document().scroll_y(),
            page.document().has_class(marks.navbar, "sticky"),
            active_link(&page, &marks)
        );
    }
    assert_eq!(active_link(&page, &marks).as_deref(), Some("#contact"));

    info!("filtering by web");
    page.scroll_to(1800.0);
    page.click(marks.buttons[1]);
    let started = page.scheduler().now();
    if let Some(due) = page.scheduler().next_due() {
        println!(
            "  {} transitions pending, first after {:?}",
            page.scheduler().pending(),
            due.saturating_sub(started)
        );
    }
    page.advance_time(Duration::from_millis(300));
    assert_eq!(page.scheduler().next_due(), None, "every transition has landed");
    let hidden: Vec<bool> = marks
        .items
        .iter()
        .map(|&i| page.document().is_display_none(i))
        .collect();
    println!("  hidden: {hidden:?}");
    assert_eq!(hidden, [false, true, true, false]);

    info!("hovering the first item");
    let events = page.pointer_move(Point::new(100.0, 200.0));
    println!("  {events:?}");
    let overlay = page.document().children(marks.items[0])[0];
    println!("  overlay: {}", page.document().outer_html(overlay));

    info!("following #about");
    let summary = page.click(marks.links[1]);
    let requests = page.host_mut().take();
    println!("  {summary:?} -> {requests:?}");
    assert!(summary.default_prevented);
    assert_eq!(requests.len(), 1);
    assert!(page.host().requests().is_empty());

    let root = page.document().root();
    let total = page.document().descendants(root).len();
    info!(elements = total, "done");
}
