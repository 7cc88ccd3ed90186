//! # lectern-core
//!
//! Core types, traits, and abstractions for lectern, a personal
//! research-document manager.
//!
//! This crate provides:
//! - The shared [`Error`]/[`Result`] types
//! - Data models for documents, analyses, notes, tags, and links
//! - Repository and backend traits implemented by the other crates
//! - Centralized default constants
//! - Filename safety helpers for uploaded originals

pub mod defaults;
pub mod error;
pub mod file_safety;
pub mod models;
pub mod traits;

pub use error::{Error, Result};
pub use file_safety::{sanitize_filename, split_extension};
pub use models::*;
pub use traits::*;

/// Generate a time-ordered UUIDv7 identifier for new rows.
pub fn new_v7() -> uuid::Uuid {
    uuid::Uuid::now_v7()
}
