//! Model-backed extras: posting enrichment and query autocomplete.

pub mod client;
pub mod prompts;

pub use client::{EnricherConfig, JobEnricher};
