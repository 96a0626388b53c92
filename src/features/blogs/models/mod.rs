mod blog;

pub use blog::{BlogRecord, BlogStatus, ImageRef};
