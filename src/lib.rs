//! Keyed binary search tree and binary max-heap collections for Rust.
//!
//! This crate provides two containers mapping unique, totally ordered keys to
//! optional payloads:
//!
//! - [`OrderedTree`] - an unbalanced binary search tree with O(height) lookup,
//!   insertion and removal, and an in-order traversal in key order.
//! - [`PriorityHeap`] - an array-backed binary max-heap with O(1) access to the
//!   largest key and O(log n) extraction.
//!
//! Both treat inserting an existing key as an update of its payload, and both
//! report "not found", "nothing changed" and "empty" through `bool`/`Option`
//! results rather than panics.
//!
//! # Example
//!
//! ```
//! use keyed_trees::{OrderedTree, PriorityHeap};
//!
//! let mut tree = OrderedTree::new();
//! tree.insert(5, Some("five"));
//! tree.insert_keys([3, 8, 1, 4]);
//! assert!(tree.remove(&3));
//! assert!(tree.contains_key(&4));
//! assert_eq!(tree.get(&5), Some(&"five"));
//!
//! let mut heap = PriorityHeap::new();
//! for key in [5, 1, 9, 3, 7] {
//!     heap.insert(key, Some(key * 100));
//! }
//! assert_eq!(heap.extract_max(), Some(900));
//! assert_eq!(heap.extract_max(), Some(700));
//! ```
//!
//! # Presentation
//!
//! Containers expose their shape read-only through [`NodeView`]. The
//! [`traversal`] iterators and the [`render`] helpers are built on nothing
//! else.
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc` without the `sync` feature
//! - **`sync`** (default) - [`Shared`], a `parking_lot` reader-writer lock
//!   wrapper for using one container from several threads
//!
//! # Logging
//!
//! Structural changes are traced through the [`log`](https://docs.rs/log)
//! facade under the `ordered_tree` and `priority_heap` targets. Nothing is
//! printed unless the application installs a logger.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod raw;

pub mod ordered_tree;
pub mod priority_heap;
pub mod render;
#[cfg(feature = "sync")]
mod shared;
pub mod traversal;
pub mod view;

pub use ordered_tree::OrderedTree;
pub use priority_heap::PriorityHeap;
#[cfg(feature = "sync")]
pub use shared::{Shared, SharedOrderedTree, SharedPriorityHeap};
pub use view::{HeapNodeRef, NodeView, TreeNodeRef};
