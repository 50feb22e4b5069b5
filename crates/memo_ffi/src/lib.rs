//! Flutter-facing bindings for memo core.

pub mod api;
