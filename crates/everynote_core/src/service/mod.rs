//! Session state holders.
//!
//! # Responsibility
//! - Own the authoritative in-memory state for the active session and
//!   mediate every mutation through an injected store.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod notebook;
pub mod profile;
