//! HTTP route handlers.

pub mod carriers;
pub mod packages;
pub mod system;
