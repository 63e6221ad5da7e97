//! Pure catalog domain logic.
//!
//! No I/O lives here: identifier derivation, slugs, content hashes and
//! materialized-path arithmetic are shared by the repository layer and the
//! HTTP layer alike.

pub mod catalog;
pub mod error;
pub mod hashing;
pub mod identity;
pub mod slug;
pub mod tree;
pub mod types;
