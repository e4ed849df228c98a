//! Job search API access.

pub mod client;
pub mod error;

pub use client::{JobSearchClient, SearchSettings};
pub use error::SearchError;
