//! Adapters layer: Concrete implementations of ports.
//!
//! - `mock`: simulated classifier, seeded in-memory history, and the
//!   basic credential check — used when no live backend is configured
//! - `http`: reqwest-based classifier and history store for a live backend
//! - `mailto`: platform mail-client hand-off
//! - `sanitize`: PII filtering for log output

pub mod http;
pub mod mailto;
pub mod mock;
pub mod sanitize;
