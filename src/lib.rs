//! A Rust tracker for Snowplow event collectors.
//!
//! # Overview
//!
//! The crate revolves around a [`Tracker`] that turns high-level tracking
//! calls — page views, structured events, e-commerce transactions,
//! self-describing "unstructured" events, and screen views — into the
//! canonical flat parameter set understood by Snowplow collectors, and
//! dispatches each event as a GET request to the configured collector
//! endpoint.
//!
//! Every event carries the tracker identity (version, namespace,
//! application id), a freshly generated event id, a millisecond timestamp
//! captured at assembly time, and whatever subject context (platform,
//! user id, screen resolution, viewport, color depth, timezone) has been
//! set on the tracker. Custom context entries are attached per event as
//! [`SelfDescribingJson`] documents.
//!
//! # Completion notification
//!
//! Tracking calls do not block and have no per-call completion handle.
//! Provide a [`CompletionNotifier`] to observe the outcome of each
//! outbound request:
//!
//! ```
//! # use snowplow_tracker::TrackerConfig;
//! let config = TrackerConfig::new("collector.example.com", "cf", "app-1")
//!     .completion_notifier(|outcome| {
//!         println!("{:?}", outcome);
//!     });
//! ```
//!
//! # Error Handling
//!
//! Errors are represented by the [`Error`] enum. Caller-input errors
//! (a missing required field) are returned synchronously before anything
//! is dispatched; transport errors are only ever reported through the
//! completion notifier.
//!
//! # Logging
//!
//! The package uses the [`log`](https://docs.rs/log/latest/log/) crate
//! for logging messages, under the `snowplow` target. Consider
//! integrating a `log`-compatible logger implementation for better
//! visibility into tracker operations.

#![warn(rustdoc::missing_crate_level_docs)]
#![warn(missing_docs)]

mod config;
mod emitter;
mod envelope;
mod error;
mod payload;
mod subject;
mod tracker;

pub use config::TrackerConfig;
pub use emitter::{CollectorResponse, CompletionNotifier};
pub use envelope::SelfDescribingJson;
pub use error::{Error, Result};
pub use tracker::{Tracker, TransactionItem};
