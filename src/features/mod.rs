pub mod auth;
pub mod blogs;
pub mod categories;
