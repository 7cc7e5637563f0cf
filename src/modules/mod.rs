pub mod application;
pub mod auth;
pub mod member;
pub mod project;

mod router;
pub use router::get_router;
