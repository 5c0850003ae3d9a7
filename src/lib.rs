//! An order-statistic red-black tree for Rust.
//!
//! This crate provides [`OSRBTree`], an ordered multiset over a caller-chosen
//! total order. Besides the usual ordered-index operations it answers
//! order-statistic queries in O(log n):
//!
//! - [`rank_less`](OSRBTree::rank_less) / [`rank_less_eq`](OSRBTree::rank_less_eq) - how many keys sort before a key
//! - [`select`](OSRBTree::select) - the node at a given sorted position
//! - Indexing by [`Rank`] - e.g., `tree[Rank(0)]` for the smallest key
//!
//! # Example
//!
//! ```
//! use osrb_tree::{OSRBTree, Rank};
//!
//! let mut latencies = OSRBTree::new();
//! for ms in [12, 7, 31, 7, 19] {
//!     latencies.insert(ms);
//! }
//!
//! // Ordered lookups
//! let node = latencies.lower_bound(&8).unwrap();
//! assert_eq!(latencies.key(node), &12);
//!
//! // Order statistics (O(log n))
//! assert_eq!(latencies[Rank(latencies.len() / 2)], 12); // median
//! assert_eq!(latencies.rank_less(&19), 3);
//! ```
//!
//! # Implementation
//!
//! Nodes live in an arena and link to each other by index; an absent link
//! stands in for the usual black sentinel. Each node records the size of its
//! subtree, kept exact through rotations and through the successor splice of
//! a two-child removal.
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`
//! - **`tracing`** - Emits `trace`-level events for rotations and rebalancing cases

#![no_std]
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

mod color;
mod comparator;
mod error;
mod order_statistic;
mod raw;

pub mod osrb_tree;

pub use color::Color;
pub use comparator::{Comparator, LessThan, Natural};
pub use error::InvariantViolation;
pub use order_statistic::Rank;
pub use osrb_tree::{NodeHandle, OSRBTree};
