//! HTTP Handlers
//!
//! Request handlers for all HTTP endpoints.

pub mod auth;
pub mod chat;
pub mod group;
pub mod health;
pub mod message;
pub mod user;
