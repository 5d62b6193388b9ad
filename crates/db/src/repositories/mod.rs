//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod author_repo;
pub mod display_order_repo;
pub mod gallery_item_repo;
pub mod post_repo;
pub mod team_member_repo;
pub mod testimonial_repo;

pub use author_repo::AuthorRepo;
pub use display_order_repo::DisplayOrderRepo;
pub use gallery_item_repo::GalleryItemRepo;
pub use post_repo::PostRepo;
pub use team_member_repo::TeamMemberRepo;
pub use testimonial_repo::TestimonialRepo;
