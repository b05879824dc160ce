//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `everynote_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("everynote_core ping={}", everynote_core::ping());
    println!("everynote_core version={}", everynote_core::core_version());
}
