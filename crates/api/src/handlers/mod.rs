pub mod auth;
pub mod authors;
pub mod gallery;
pub mod order;
pub mod posts;
pub mod site;
pub mod team;
pub mod testimonials;
