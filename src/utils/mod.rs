//! General-purpose helpers shared across the crate.

mod math;

pub use math::roundup;
