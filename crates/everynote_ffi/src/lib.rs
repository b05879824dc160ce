//! Flutter-facing surface for the everynote core.

pub mod api;
