//! Domain services for logic that spans entities.

mod access_control;

pub use access_control::{AccessControl, Membership};
