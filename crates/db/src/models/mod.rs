//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//!
//! Nullable columns use `Option<Option<T>>` in update DTOs: `None` keeps the
//! stored value, `Some(None)` clears it.

use serde::{Deserialize, Deserializer};
use vitrine_core::validation::patch_value;

pub mod author;
pub mod display_order;
pub mod gallery_item;
pub mod post;
pub mod team_member;
pub mod testimonial;

/// Deserialize a clearable patch field.
///
/// Use with `#[serde(default, deserialize_with = "crate::models::nullable")]`.
/// A missing key stays `None`; an explicit `null` becomes `Some(None)`.
pub fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Split a clearable patch field into the "provided" flag and the value to
/// bind, for `CASE WHEN $provided THEN $value ELSE col END`.
pub fn patch_parts(field: &Option<Option<String>>) -> (bool, Option<&str>) {
    (field.is_some(), patch_value(field))
}
