//! REST API endpoint tests

mod auth_tests;
mod chat_tests;
mod group_tests;
mod health_tests;
