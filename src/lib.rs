//! Credential service - user registration, login and password reset
//!
//! Users are keyed by their identity document. Registration generates the
//! username and an initial password; the reset flow issues a time-limited
//! token that is delivered through a [`infra::ResetNotifier`].
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Users, passwords and reset tokens
//! - **services**: The credential use cases
//! - **infra**: Database, repository, hashing and notification
//! - **api**: HTTP handlers, extractors and routes
//! - **types**: Shared response types
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{NewUser, Password, Registration, ResetToken, User, UserProfile};
pub use errors::{AppError, AppResult};
pub use services::{CredentialManager, CredentialService};
