pub mod cache;
pub mod dtos;
pub mod models;
pub mod moderation;
pub mod projection;
pub mod reconcile;
pub mod services;

pub use services::BlogService;
