mod blog_dto;

pub use blog_dto::{BlogFields, CreateBlogDto, UpdateBlogDto};
