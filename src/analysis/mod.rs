//! Analytics over job postings.
//!
//! `aggregator` builds the summary; `roles` and `skills` hold the static
//! classification tables it uses.

pub mod aggregator;
pub mod roles;
pub mod skills;

pub use aggregator::summarize;
