//! # Messenger Server Library
//!
//! This crate provides a messaging backend with:
//! - RESTful HTTP API endpoints for users, chats, groups, and messages
//! - Lazy one-to-one chat creation and bounded group administration
//! - Explicit referential-integrity cascades on deletions
//! - PostgreSQL for persistent storage
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **Domain Layer**: Core business entities, repository traits, and
//!   authorization predicates
//! - **Application Layer**: Business logic services, the cascade engine,
//!   and DTOs
//! - **Infrastructure Layer**: Database and repository implementations
//! - **Presentation Layer**: HTTP handlers, routes, and middleware
//!
//! ## Module Structure
//!
//! ```text
//! messenger_server/
//! +-- config/         Configuration management
//! +-- domain/         Domain entities, traits, and access control
//! +-- application/    Application services and DTOs
//! +-- infrastructure/ Database and repository implementations
//! +-- presentation/   HTTP routes, handlers, and middleware
//! +-- shared/         Common utilities (errors, params, snowflake IDs)
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Business services
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP handlers
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
