//! Projectile range search: drag-affected trajectory integration and a launch-angle
//! hill climb, with file export and plotting front-ends.
//!
//! The physics and search live in member crates; this facade re-exports them so the
//! binaries and tests share one import path.

pub use range_config as config;
pub use range_core as core;
pub use range_export as export;
pub use range_search as search;
pub use range_trajectory as trajectory;

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
