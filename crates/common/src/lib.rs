//! Shared types for the homestead renderer.

mod types;

pub use types::Placement;

pub fn crate_info() -> &'static str {
    "homestead-common v0.1.0"
}
