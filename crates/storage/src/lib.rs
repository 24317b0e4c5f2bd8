//! Milestone sources for esdash.
//!
//! This crate provides a trait-based, read-only interface to the system that
//! supplies milestone records, with a JSON file implementation.

#![warn(missing_docs)]

pub mod trait_;
pub mod json_storage;

pub use trait_::{MilestoneSource, StorageError, Result};
pub use json_storage::JsonMilestoneSource;
