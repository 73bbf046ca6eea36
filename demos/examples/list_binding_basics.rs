// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A sectioned feed bound to an in-memory list view.
//!
//! This example shows how to:
//! - implement `ListPresenter` over plain data,
//! - implement `ListHost` and `ReusableView` for a toy view system whose
//!   "content fitting" wraps text at a fixed glyph width,
//! - drive layout passes through `BindingAdapter` and watch the size cache
//!   absorb repeated queries,
//! - apply a batch of structural edits and a container resize.
//!
//! Run with cache invalidation logging:
//! - `RUST_LOG=debug cargo run -p understory_demos --example list_binding_basics`

use kurbo::Size;
use understory_list_binding::{
    BindingAdapter, BindingConfig, FitConstraints, IndexPath, ItemChanges, ItemSizeSpec,
    ListBinding, ListHost, ListPresenter, ReusableView, UpdateCompletion, ViewKind,
};

const GLYPH_WIDTH: f64 = 8.0;
const LINE_HEIGHT: f64 = 18.0;
const PADDING: f64 = 12.0;

struct Feed {
    sections: Vec<(String, Vec<String>)>,
}

impl ListPresenter for Feed {
    type Model = str;

    fn section_count(&self) -> usize {
        self.sections.len()
    }

    fn item_count(&self, section: usize) -> usize {
        self.sections.get(section).map_or(0, |(_, items)| items.len())
    }

    fn item_identifier(&self, _: IndexPath) -> &str {
        "post"
    }

    fn item_model(&self, at: IndexPath) -> Option<&str> {
        let (_, items) = self.sections.get(at.section)?;
        items.get(at.item).map(String::as_str)
    }

    fn item_size(&self, _: IndexPath) -> ItemSizeSpec {
        // Full-width rows whose height follows the text.
        ItemSizeSpec::columns_with_flexible_height(1.0)
    }

    fn section_insets(&self, _: usize) -> kurbo::Insets {
        kurbo::Insets::uniform_xy(16.0, 8.0)
    }

    fn line_spacing(&self, _: usize) -> f64 {
        4.0
    }

    fn header_identifier(&self, _: usize) -> Option<&str> {
        Some("title")
    }

    fn header_model(&self, section: usize) -> Option<&str> {
        self.sections.get(section).map(|(title, _)| title.as_str())
    }
}

/// A text view that wraps its content at the available width.
#[derive(Debug, Default)]
struct TextView {
    text: String,
    frame: Size,
}

impl TextView {
    fn layout(&self, width: f64) -> Size {
        let per_line = ((width - 2.0 * PADDING) / GLYPH_WIDTH).floor().max(1.0);
        let lines = (self.text.chars().count() as f64 / per_line).ceil().max(1.0);
        Size::new(width, lines * LINE_HEIGHT + 2.0 * PADDING)
    }
}

impl ReusableView<str> for TextView {
    fn configure(&mut self, model: &str) {
        self.text.clear();
        self.text.push_str(model);
    }

    fn frame_size(&self) -> Size {
        self.frame
    }

    fn fitting_size(&mut self, constraints: FitConstraints) -> Size {
        let width = constraints
            .width
            .unwrap_or(self.text.chars().count() as f64 * GLYPH_WIDTH + 2.0 * PADDING);
        self.layout(width)
    }
}

/// An in-memory list view: it keeps the views it "displays" and counts dequeues.
#[derive(Debug)]
struct MemoryList {
    size: Size,
    dequeued: usize,
    visible: Vec<(IndexPath, TextView)>,
}

impl ListHost for MemoryList {
    type View = TextView;

    fn container_size(&self) -> Size {
        self.size
    }

    fn dequeue(&mut self, kind: ViewKind, identifier: &str, _: IndexPath) -> Option<TextView> {
        let known = matches!(
            (kind, identifier),
            (ViewKind::Item, "post") | (ViewKind::Header | ViewKind::Footer, "title")
        );
        if known {
            self.dequeued += 1;
        }
        known.then(TextView::default)
    }

    fn visible_view_mut(&mut self, at: IndexPath) -> Option<&mut TextView> {
        self.visible
            .iter_mut()
            .find(|(path, _)| *path == at)
            .map(|(_, view)| view)
    }

    fn reload_data(&mut self) {
        self.visible.clear();
    }

    fn begin_updates(&mut self) {}

    fn end_updates(&mut self, completion: UpdateCompletion) {
        completion(true);
    }

    fn insert_items(&mut self, paths: &[IndexPath]) {
        println!("  host: insert {paths:?}");
    }

    fn delete_items(&mut self, paths: &[IndexPath]) {
        println!("  host: delete {paths:?}");
    }

    fn reload_items(&mut self, paths: &[IndexPath]) {
        println!("  host: reload {paths:?}");
    }

    fn move_item(&mut self, from: IndexPath, to: IndexPath) {
        println!("  host: move {from} -> {to}");
    }

    fn insert_sections(&mut self, sections: &[usize]) {
        println!("  host: insert sections {sections:?}");
    }

    fn delete_sections(&mut self, sections: &[usize]) {
        println!("  host: delete sections {sections:?}");
    }

    fn reload_sections(&mut self, sections: &[usize]) {
        println!("  host: reload sections {sections:?}");
    }

    fn move_section(&mut self, from: usize, to: usize) {
        println!("  host: move section {from} -> {to}");
    }
}

/// One layout pass: ask for every size, then "display" every item at that size.
fn layout_pass(adapter: &mut BindingAdapter<Feed, MemoryList>) -> f64 {
    let mut extent = 0.0;
    let mut shown = Vec::new();
    for section in 0..adapter.section_count() {
        extent += adapter.size_for_header(section).height;
        for item in 0..adapter.item_count(section) {
            let at = IndexPath::new(section, item);
            let size = adapter.size_for_item(at);
            extent += size.height;
            if let Some(mut view) = adapter.provide_item_view(at) {
                view.frame = size;
                adapter.will_display_item(&view, at);
                shown.push((at, view));
            }
        }
    }
    adapter.finish_layout_pass();
    adapter.host_mut().visible = shown;
    extent
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let feed = Feed {
        sections: vec![
            (
                "Today".into(),
                vec![
                    "Shipped the size cache.".into(),
                    "Rotating the device should not show stale row heights anymore, because every cached size is tied to the container it was measured in.".into(),
                    "Lunch.".into(),
                ],
            ),
            (
                "Yesterday".into(),
                vec![
                    "Wrote the batch update guard.".into(),
                    "Argued about whether section moves should keep their sizes.".into(),
                ],
            ),
        ],
    };
    let host = MemoryList {
        size: Size::new(375.0, 667.0),
        dequeued: 0,
        visible: Vec::new(),
    };
    let mut binding = ListBinding::new(
        BindingAdapter::new(feed, host).with_config(BindingConfig::default()),
    );

    let extent = layout_pass(binding.adapter_mut());
    println!(
        "first pass: content extent {extent}, {} views dequeued",
        binding.adapter().host().dequeued
    );

    let extent = layout_pass(binding.adapter_mut());
    println!(
        "second pass: content extent {extent}, {} views dequeued",
        binding.adapter().host().dequeued
    );

    println!("\ndrop the first post of today, add two, edit the last:");
    let feed = binding.adapter_mut().presenter_mut();
    let today = &mut feed.sections[0].1;
    today.remove(0);
    today.insert(0, "Coffee.".into());
    today.insert(1, "Reviewed the layout policy.".into());
    today[3] = "Lunch, late.".into();
    let changes = ItemChanges {
        deleted: [0].into_iter().collect(),
        inserted: [0, 1].into_iter().collect(),
        modified: [3].into_iter().collect(),
    };
    if let Err(error) = binding.update(
        |batch| batch.apply_item_changes(0, &changes),
        |finished| println!("  batch finished: {finished}"),
    ) {
        log::error!("{error}");
    }
    let cache = binding.adapter().cache();
    for item in 0..cache.item_count(0) {
        let at = IndexPath::new(0, item);
        println!("  cached {at}: {:?}", cache.item(at));
    }

    println!("\nrotate to landscape:");
    binding.adapter_mut().host_mut().size = Size::new(667.0, 375.0);
    let extent = layout_pass(binding.adapter_mut());
    println!(
        "landscape pass: content extent {extent}, cache epoch {}",
        binding.adapter().cache().epoch()
    );

    let first = IndexPath::new(0, 0);
    if binding.become_first_responder(first) {
        println!("{first} took focus");
    } else {
        println!("{first} does not accept focus");
    }
}
