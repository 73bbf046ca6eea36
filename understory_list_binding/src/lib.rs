// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory List Binding: presenter-driven data binding for sectioned lists.
//!
//! This crate sits between a list or grid view (the *host*) and the code that
//! owns the data (the *presenter*). The host asks questions a list view asks its
//! data source: how many sections and items, which view shows an item, how big
//! it is. The binding answers them from the presenter and remembers every size it
//! computes or observes, so content-sized items are measured once rather than on
//! every layout pass.
//!
//! The pieces:
//!
//! - [`ItemSizeSpec`] and [`AxisSpec`]: declarative per-axis sizing (fixed,
//!   fill-equally, aspect ratio, content-sized), resolved by
//!   [`resolve_item_size`] against the container, section insets and spacing.
//! - [`BindingAdapter`]: the data-source and delegate surface. Owns a
//!   [`SizeCache`](understory_size_cache::SizeCache) and consults it before
//!   resolving anything.
//! - [`ListBinding`] and [`BatchUpdate`]: the commands a controller issues.
//!   Structural edits go to the cache first and the host second.
//! - [`ListPresenter`], [`ListHost`], [`ReusableView`] and [`ListDelegate`]: the
//!   collaborator traits a UI stack implements.
//!
//! Sizes are invalidated lazily: when the host reports a different container
//! size, earlier entries read as unknown and are remeasured on demand.
//!
//! Misconfiguration (both axes sized by aspect ratio, an identifier the host
//! cannot dequeue, an index outside the cached layout) is reported through the
//! [`ErrorPolicy`] in [`BindingConfig`]. By default that is a debug assertion;
//! in release builds the error is logged with the [`log`] facade and the
//! operation continues with a zero size.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Size;
//! use understory_list_binding::{
//!     BindingAdapter, FitConstraints, IndexPath, ItemSizeSpec, ListHost, ListPresenter,
//!     ReusableView, UpdateCompletion, ViewKind,
//! };
//!
//! struct Words(Vec<&'static str>);
//!
//! impl ListPresenter for Words {
//!     type Model = str;
//!     fn section_count(&self) -> usize { 1 }
//!     fn item_count(&self, _: usize) -> usize { self.0.len() }
//!     fn item_identifier(&self, _: IndexPath) -> &str { "word" }
//!     fn item_model(&self, at: IndexPath) -> Option<&str> { self.0.get(at.item).copied() }
//!     fn item_size(&self, _: IndexPath) -> ItemSizeSpec { ItemSizeSpec::columns_with_flexible_height(1.0) }
//! }
//!
//! #[derive(Default)]
//! struct Label(usize);
//!
//! impl ReusableView<str> for Label {
//!     fn configure(&mut self, text: &str) { self.0 = text.len(); }
//!     fn frame_size(&self) -> Size { Size::ZERO }
//!     fn fitting_size(&mut self, c: FitConstraints) -> Size {
//!         Size::new(c.width.unwrap_or(0.0), 20.0 * self.0 as f64)
//!     }
//! }
//!
//! struct Host;
//!
//! impl ListHost for Host {
//!     type View = Label;
//!     fn container_size(&self) -> Size { Size::new(320.0, 480.0) }
//!     fn dequeue(&mut self, _: ViewKind, _: &str, _: IndexPath) -> Option<Label> { Some(Label::default()) }
//!     fn visible_view_mut(&mut self, _: IndexPath) -> Option<&mut Label> { None }
//!     fn reload_data(&mut self) {}
//!     fn begin_updates(&mut self) {}
//!     fn end_updates(&mut self, completion: UpdateCompletion) { completion(true); }
//!     fn insert_items(&mut self, _: &[IndexPath]) {}
//!     fn delete_items(&mut self, _: &[IndexPath]) {}
//!     fn reload_items(&mut self, _: &[IndexPath]) {}
//!     fn move_item(&mut self, _: IndexPath, _: IndexPath) {}
//!     fn insert_sections(&mut self, _: &[usize]) {}
//!     fn delete_sections(&mut self, _: &[usize]) {}
//!     fn reload_sections(&mut self, _: &[usize]) {}
//!     fn move_section(&mut self, _: usize, _: usize) {}
//! }
//!
//! let mut adapter = BindingAdapter::new(Words(vec!["a", "bcd"]), Host);
//! assert_eq!(adapter.section_count(), 1);
//! assert_eq!(adapter.item_count(0), 2);
//! assert_eq!(adapter.size_for_item(IndexPath::new(0, 1)), Size::new(320.0, 60.0));
//! // The second query is served from the cache.
//! assert_eq!(adapter.cache().item(IndexPath::new(0, 1)), Some(Size::new(320.0, 60.0)));
//! adapter.finish_layout_pass();
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod adapter;
mod binding;
mod config;
mod delegate;
mod error;
mod policy;
mod presenter;
mod view;

pub use adapter::BindingAdapter;
pub use binding::{BatchUpdate, ItemChanges, ListBinding};
pub use config::{BindingConfig, ErrorPolicy};
pub use delegate::{ListDelegate, NoDelegate, ScrollMetrics};
pub use error::{BindingError, LayoutError};
pub use policy::{
    AxisResolution, AxisSpec, FitConstraints, ItemSizeSpec, LayoutContext, RowHeight,
    ScrollDirection, SectionMetrics, SupplementaryHeight, resolve_axis, resolve_item_size,
    resolve_supplementary_size,
};
pub use presenter::{ListPresenter, SwipeAction, SwipeActionsConfiguration};
pub use view::{
    ListHost, ReusableView, ScrollPosition, SupplementaryKind, UpdateCompletion, ViewKind,
};

pub use understory_size_cache::IndexPath;
