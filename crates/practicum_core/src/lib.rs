#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Content model: categories, sections, prompt items, articles
pub mod catalog;

/// Local durable cache (snapshot, favorites, UI preferences)
pub mod cache;

/// Configuration options
pub mod config;

/// Debounced input (search keystrokes)
pub mod debounce;

/// Error (common error types)
pub mod error;

/// Transient user-facing notices
pub mod notify;

/// Seed dataset for first-run population of an empty remote store
pub mod seed;

/// The data synchronization engine
pub mod service;

/// Admin session and UI preference accessors
pub mod session;

/// Sequence step gating
pub mod steps;

/// Remote table store (trait, rows, REST and in-memory backends)
pub mod store;

/// Derived views: flattened index, search, favorites
pub mod views;
