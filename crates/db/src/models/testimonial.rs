//! Testimonial quote model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vitrine_core::ordering::OrderKey;
use vitrine_core::types::{DbId, Timestamp};

/// A row from the `testimonials` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Testimonial {
    pub id: DbId,
    pub quote: String,
    pub author_name: String,
    pub author_title: Option<String>,
    pub company: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl OrderKey for Testimonial {
    fn order_key(&self) -> String {
        self.id.to_string()
    }
}

/// DTO for creating a new testimonial.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTestimonial {
    pub quote: String,
    pub author_name: String,
    pub author_title: Option<String>,
    pub company: Option<String>,
}

/// DTO for updating an existing testimonial. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTestimonial {
    pub quote: Option<String>,
    pub author_name: Option<String>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub author_title: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub company: Option<Option<String>>,
}
