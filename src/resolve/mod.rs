//! Reconcile a normalised topic table against a reference taxonomy.
//!
//! `exclusion` ranks what is left after removing aggregate labels;
//! `inclusion` rebuilds a fixed, ordered bracket sequence.

pub mod exclusion;
pub mod inclusion;

pub use exclusion::top_languages;
pub use inclusion::{dedup_keep_first, keep_brackets, reindex, resolve_brackets};
