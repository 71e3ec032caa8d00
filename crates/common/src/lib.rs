//! Shared types used across the package manager crates.

pub mod types;

pub use types::{PackageId, Version};
