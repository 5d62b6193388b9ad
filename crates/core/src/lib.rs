//! Domain layer for the Vitrine marketing site back office.
//!
//! No internal dependencies: the database, storage, and HTTP crates all build
//! on the types, validation rules, and list-ordering logic defined here.

pub mod content;
pub mod error;
pub mod hashing;
pub mod media;
pub mod ordering;
pub mod pagination;
pub mod types;
pub mod validation;
