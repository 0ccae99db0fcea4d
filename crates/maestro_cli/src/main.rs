//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `maestro_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("maestro_core ping={}", maestro_core::ping());
    println!("maestro_core version={}", maestro_core::core_version());
}
