pub mod model;
pub mod permissions;
mod session;

pub use session::{Session, SessionError};
