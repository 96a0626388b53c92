mod category;

pub use category::{Category, CategoryTag};
