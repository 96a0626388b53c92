//! Remote store module for the blog backend
//!
//! Defines the `RemoteStore` seam the console talks to, and a reqwest-backed
//! implementation speaking the backend's `{ data, message, error? }` envelope.

mod http_store;
mod store;

pub use http_store::HttpRemoteStore;
pub use store::RemoteStore;
