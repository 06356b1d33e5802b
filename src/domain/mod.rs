//! Domain logic - pure version and tag rules independent of git operations

pub mod tag;
pub mod version;

pub use tag::Tag;
pub use version::{bump, BumpLevel, Component, Version};
