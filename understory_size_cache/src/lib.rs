// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Size Cache: measured sizes for sectioned lists.
//!
//! Content-sized list and grid items are expensive to measure. A host usually
//! measures an item once, when it is first asked for its size, and wants to
//! reuse that answer until the item's content or the container changes. This
//! crate provides the bookkeeping for that:
//!
//! - [`IndexPath`]: a `(section, item)` address with section-major ordering.
//! - [`SizeCache`]: per-section item slots plus a header and footer slot per
//!   section, each either unknown or holding the last recorded value.
//!
//! The cache must be told about every structural edit the list goes through
//! (insertions, removals, moves, reloads) so that values stay attached to the
//! items they were measured for. It also tracks the container size the values
//! were measured against and treats everything recorded under a different
//! container as unknown.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_size_cache::{IndexPath, SizeCache};
//!
//! let mut cache = SizeCache::<f64>::new();
//! cache.set_section_count(1);
//! cache.set_item_count(0, 3);
//! cache.validate_container(320.0);
//!
//! let first = IndexPath::new(0, 0);
//! assert_eq!(cache.item(first), None);
//! cache.record_item(first, 44.0);
//! assert_eq!(cache.item(first), Some(44.0));
//!
//! // A new item at the front shifts the cached value along with its item.
//! cache.insert_items(&[IndexPath::new(0, 0)]);
//! assert_eq!(cache.item(IndexPath::new(0, 1)), Some(44.0));
//!
//! // Rotating the device changes the container; old values no longer apply.
//! assert!(!cache.validate_container(568.0));
//! assert_eq!(cache.item(IndexPath::new(0, 1)), None);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod cache;
mod index_path;

pub use cache::SizeCache;
pub use index_path::IndexPath;
