//! Modules layer - Infrastructure components for external integrations
//!
//! Contains the client for the remote blog backend.

pub mod remote;
