//! Utility modules
//!
//! Reusable helpers that sit alongside the cache in a content-serving
//! application: image dimension probing and URL/web string handling.

pub mod imaging;
pub mod web;
