//! Flutter-facing bindings for MatLog core.

pub mod api;
